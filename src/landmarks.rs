// src/landmarks.rs - Body landmark model produced by the pose detector
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// MediaPipe BlazePose body landmark indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum PoseLandmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl PoseLandmark {
    pub const COUNT: usize = 33;

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Skeleton edges drawn over detected frames (MediaPipe `POSE_CONNECTIONS`).
pub const POSE_CONNECTIONS: [(PoseLandmark, PoseLandmark); 35] = {
    use PoseLandmark::*;
    [
        // Face
        (Nose, LeftEyeInner),
        (LeftEyeInner, LeftEye),
        (LeftEye, LeftEyeOuter),
        (LeftEyeOuter, LeftEar),
        (Nose, RightEyeInner),
        (RightEyeInner, RightEye),
        (RightEye, RightEyeOuter),
        (RightEyeOuter, RightEar),
        (MouthLeft, MouthRight),
        // Arms and hands
        (LeftShoulder, RightShoulder),
        (LeftShoulder, LeftElbow),
        (LeftElbow, LeftWrist),
        (LeftWrist, LeftPinky),
        (LeftWrist, LeftIndex),
        (LeftWrist, LeftThumb),
        (LeftPinky, LeftIndex),
        (RightShoulder, RightElbow),
        (RightElbow, RightWrist),
        (RightWrist, RightPinky),
        (RightWrist, RightIndex),
        (RightWrist, RightThumb),
        (RightPinky, RightIndex),
        // Torso
        (LeftShoulder, LeftHip),
        (RightShoulder, RightHip),
        (LeftHip, RightHip),
        // Legs and feet
        (LeftHip, LeftKnee),
        (RightHip, RightKnee),
        (LeftKnee, LeftAnkle),
        (RightKnee, RightAnkle),
        (LeftAnkle, LeftHeel),
        (RightAnkle, RightHeel),
        (LeftHeel, LeftFootIndex),
        (RightHeel, RightFootIndex),
        (LeftAnkle, LeftFootIndex),
        (RightAnkle, RightFootIndex),
    ]
};

/// A single landmark in normalized image coordinates.
///
/// `x` and `y` are nominally in `[0, 1]` with the origin at the top-left
/// corner and `y` growing downward. Detectors may report points slightly
/// outside the frame; they are kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn point(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    /// Pixel position inside a `width` x `height` frame.
    pub fn to_pixel(&self, width: u32, height: u32) -> (f32, f32) {
        ((self.x * width as f64) as f32, (self.y * height as f64) as f32)
    }
}

/// The complete set of body landmarks for one frame.
///
/// Detectors either produce all 33 landmarks or nothing, so a partially
/// populated set cannot be constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Landmark>", into = "Vec<Landmark>")]
pub struct LandmarkSet {
    landmarks: [Landmark; PoseLandmark::COUNT],
}

impl LandmarkSet {
    pub fn new(landmarks: [Landmark; PoseLandmark::COUNT]) -> Self {
        Self { landmarks }
    }

    pub fn get(&self, which: PoseLandmark) -> Landmark {
        self.landmarks[which.index()]
    }

    pub fn set(&mut self, which: PoseLandmark, landmark: Landmark) {
        self.landmarks[which.index()] = landmark;
    }

    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.landmarks.iter()
    }
}

impl TryFrom<Vec<Landmark>> for LandmarkSet {
    type Error = AnalysisError;

    fn try_from(landmarks: Vec<Landmark>) -> Result<Self, Self::Error> {
        let actual = landmarks.len();
        let landmarks: [Landmark; PoseLandmark::COUNT] =
            landmarks
                .try_into()
                .map_err(|_| AnalysisError::LandmarkCount {
                    expected: PoseLandmark::COUNT,
                    actual,
                })?;
        Ok(Self { landmarks })
    }
}

impl From<LandmarkSet> for Vec<Landmark> {
    fn from(set: LandmarkSet) -> Self {
        set.landmarks.to_vec()
    }
}
