// src/angles.rs - Planar joint angles from body landmarks
use nalgebra::Point2;
use serde::Serialize;

use crate::landmarks::{LandmarkSet, PoseLandmark};

/// Geometric input to [`angle`]: a landmark position or a synthetic
/// reference point.
pub type AnglePoint = Point2<f64>;

/// The three tracked angles for one detected frame, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JointAngles {
    pub upper_body: f64,
    pub back_leg: f64,
    pub front_leg: f64,
}

/// Angle at vertex `b` between the rays `b -> a` and `b -> c`, in degrees.
///
/// The result is always the non-reflex angle in `[0, 180]`. If either ray
/// has zero length the direction is undefined and `0.0` is returned.
pub fn angle(a: &AnglePoint, b: &AnglePoint, c: &AnglePoint) -> f64 {
    let ba = a - b;
    let bc = c - b;
    if ba.norm_squared() == 0.0 || bc.norm_squared() == 0.0 {
        return 0.0;
    }

    let radians = bc.y.atan2(bc.x) - ba.y.atan2(ba.x);
    let degrees = radians.to_degrees().abs();
    if degrees > 180.0 {
        360.0 - degrees
    } else {
        degrees
    }
}

/// Point straight above `p` on the top edge of the frame, used to measure
/// inclination against the vertical axis.
pub fn vertical_ref(p: &AnglePoint) -> AnglePoint {
    AnglePoint::new(p.x, 0.0)
}

/// Computes the tracked joint angles from one frame's landmarks.
///
/// The back-leg angle pairs the *left* hip with the *right* ankle. That
/// cross-body measurement is the established behavior and is kept as-is.
pub fn extract_joint_angles(landmarks: &LandmarkSet) -> JointAngles {
    let left_shoulder = landmarks.get(PoseLandmark::LeftShoulder).point();
    let left_hip = landmarks.get(PoseLandmark::LeftHip).point();
    let left_knee = landmarks.get(PoseLandmark::LeftKnee).point();
    let left_ankle = landmarks.get(PoseLandmark::LeftAnkle).point();
    let right_ankle = landmarks.get(PoseLandmark::RightAnkle).point();

    JointAngles {
        upper_body: angle(&left_shoulder, &left_hip, &vertical_ref(&left_hip)),
        back_leg: angle(&left_hip, &right_ankle, &vertical_ref(&right_ankle)),
        front_leg: angle(&vertical_ref(&left_knee), &left_knee, &left_ankle),
    }
}
