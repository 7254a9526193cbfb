// src/pipeline.rs - Per-request frame loop: detect, measure, annotate, encode
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, info_span, trace};

use crate::aggregate::{AggregateState, AngleAverages};
use crate::angles::{extract_joint_angles, JointAngles};
use crate::error::Result;
use crate::mediapipe_bridge::Detector;
use crate::overlay::{Frame, FrameAnnotator};
use crate::video::{FrameSink, FrameSource, VideoMetadata};

/// What happened to a single frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// A subject was detected; carries the annotated frame and its angles.
    Annotated { frame: Frame, angles: JointAngles },
    /// No subject; the original frame passes through unmodified.
    PassThrough(Frame),
}

impl FrameOutcome {
    pub fn frame(&self) -> &Frame {
        match self {
            FrameOutcome::Annotated { frame, .. } => frame,
            FrameOutcome::PassThrough(frame) => frame,
        }
    }

    pub fn angles(&self) -> Option<&JointAngles> {
        match self {
            FrameOutcome::Annotated { angles, .. } => Some(angles),
            FrameOutcome::PassThrough(_) => None,
        }
    }
}

/// Timeline entry for one input frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameRecord {
    pub frame: usize,
    /// Presentation time in seconds, derived from the stream frame rate.
    pub timestamp: f64,
    pub angles: Option<JointAngles>,
}

/// Everything a finished request yields.
#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    pub video: Vec<u8>,
    pub averages: AngleAverages,
    pub metadata: VideoMetadata,
    pub frames_total: usize,
    pub frames_detected: u64,
    pub timeline: Vec<FrameRecord>,
}

/// Runs one video through detection, angle extraction, annotation and
/// aggregation.
///
/// A pipeline owns its detector, so each request builds its own; nothing is
/// shared between requests.
pub struct VideoPipeline<D> {
    detector: D,
    annotator: FrameAnnotator,
}

impl<D: Detector> VideoPipeline<D> {
    pub fn new(detector: D, annotator: FrameAnnotator) -> Self {
        Self { detector, annotator }
    }

    /// Detects and, on success, measures and annotates one frame.
    pub fn process_frame(&mut self, frame: Frame) -> Result<FrameOutcome> {
        match self.detector.detect(&frame)? {
            Some(landmarks) => {
                let angles = extract_joint_angles(&landmarks);
                let frame = self.annotator.annotate(&frame, &landmarks, &angles);
                Ok(FrameOutcome::Annotated { frame, angles })
            }
            None => Ok(FrameOutcome::PassThrough(frame)),
        }
    }

    /// Processes every frame of `source` into `sink` and finalizes the
    /// averages.
    ///
    /// Any decode, detector or encode fault aborts the run; the source and
    /// sink are dropped (releasing their processes and scratch files) and no
    /// partial output is returned.
    pub fn run<S, K>(mut self, mut source: S, mut sink: K) -> Result<AnalysisOutput>
    where
        S: FrameSource,
        K: FrameSink,
    {
        let metadata = source.metadata();
        let span = info_span!("analyze", width = metadata.width, height = metadata.height);
        let _guard = span.enter();
        let started = Instant::now();

        let mut aggregate = AggregateState::new();
        let mut timeline = Vec::new();

        while let Some(frame) = source.next_frame()? {
            let index = timeline.len();
            let outcome = self.process_frame(frame)?;

            if let Some(angles) = outcome.angles() {
                aggregate.accumulate(angles);
                trace!(
                    frame = index,
                    upper_body = angles.upper_body,
                    back_leg = angles.back_leg,
                    front_leg = angles.front_leg,
                    "Measured frame"
                );
            } else {
                debug!(frame = index, "No pose detected, passing frame through");
            }

            sink.write_frame(outcome.frame())?;
            timeline.push(FrameRecord {
                frame: index,
                timestamp: if metadata.fps > 0.0 { index as f64 / metadata.fps } else { 0.0 },
                angles: outcome.angles().copied(),
            });
        }

        let frames_total = timeline.len();
        let frames_detected = aggregate.detected_frames();
        let averages = aggregate.finalize();
        let video = sink.finish()?;
        drop(source);

        info!(
            frames_total,
            frames_detected,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Analysis complete: upper body {:.2}, back leg {:.2}, front leg {:.2}",
            averages.upper_body,
            averages.back_leg,
            averages.front_leg
        );

        Ok(AnalysisOutput {
            video,
            averages,
            metadata,
            frames_total,
            frames_detected,
            timeline,
        })
    }
}
