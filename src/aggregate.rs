// src/aggregate.rs - Running joint-angle statistics for one video
use serde::Serialize;

use crate::angles::JointAngles;

/// Per-video mean of each tracked angle, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AngleAverages {
    pub upper_body: f64,
    pub back_leg: f64,
    pub front_leg: f64,
}

/// Running sums over the frames of one request that had a detection.
///
/// Created at the start of a request and consumed by [`AggregateState::finalize`];
/// it is never reused across videos.
#[derive(Debug, Clone, Default)]
pub struct AggregateState {
    detected_frames: u64,
    sum_upper_body: f64,
    sum_back_leg: f64,
    sum_front_leg: f64,
}

impl AggregateState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one detected frame. Must not be called for frames without a detection.
    pub fn accumulate(&mut self, angles: &JointAngles) {
        self.sum_upper_body += angles.upper_body;
        self.sum_back_leg += angles.back_leg;
        self.sum_front_leg += angles.front_leg;
        self.detected_frames += 1;
    }

    pub fn detected_frames(&self) -> u64 {
        self.detected_frames
    }

    /// Means over all accumulated frames, or all zeros when nothing was
    /// detected.
    pub fn finalize(self) -> AngleAverages {
        if self.detected_frames == 0 {
            return AngleAverages::default();
        }

        let n = self.detected_frames as f64;
        AngleAverages {
            upper_body: self.sum_upper_body / n,
            back_leg: self.sum_back_leg / n,
            front_leg: self.sum_front_leg / n,
        }
    }
}
