//! Pose angle analysis for movement videos.
//!
//! Frames are pulled from a [`video::FrameSource`], passed to a
//! [`mediapipe_bridge::Detector`], and every frame with a detected subject
//! gets its joint angles measured, a skeleton overlay drawn, and its angles
//! folded into per-video averages. Frames without a detection are passed
//! through untouched.

pub mod aggregate;
pub mod angles;
pub mod config;
pub mod data;
pub mod error;
pub mod landmarks;
pub mod mediapipe_bridge;
pub mod overlay;
pub mod pipeline;
pub mod report;
pub mod video;

pub use aggregate::{AggregateState, AngleAverages};
pub use angles::{angle, extract_joint_angles, JointAngles};
pub use config::AnalyzerConfig;
pub use error::{AnalysisError, Result};
pub use landmarks::{Landmark, LandmarkSet, PoseLandmark};
pub use mediapipe_bridge::{Detector, LandmarkTrack, ProcessDetector};
pub use overlay::{Frame, FrameAnnotator};
pub use pipeline::{AnalysisOutput, FrameOutcome, FrameRecord, VideoPipeline};
pub use report::AnalysisReport;
pub use video::{FfmpegDecoder, FfmpegEncoder, FrameSink, FrameSource, VideoMetadata};
