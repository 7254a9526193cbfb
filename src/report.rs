// src/report.rs - Response payload for a finished analysis
use base64::Engine;
use serde::Serialize;

use crate::pipeline::AnalysisOutput;

/// JSON-serializable analysis result with the video as base64 text.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub processed_video: String,
    pub avg_upper_body_angle: f64,
    pub avg_back_leg_angle: f64,
    pub avg_front_leg_angle: f64,
    pub frames_total: usize,
    pub frames_detected: u64,
}

impl From<&AnalysisOutput> for AnalysisReport {
    fn from(output: &AnalysisOutput) -> Self {
        Self {
            processed_video: base64::engine::general_purpose::STANDARD.encode(&output.video),
            avg_upper_body_angle: output.averages.upper_body,
            avg_back_leg_angle: output.averages.back_leg,
            avg_front_leg_angle: output.averages.front_leg,
            frames_total: output.frames_total,
            frames_detected: output.frames_detected,
        }
    }
}
