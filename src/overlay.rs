// src/overlay.rs - Skeleton and angle label rendering for detected frames
use std::path::Path;

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_text_mut};
use tracing::debug;

use crate::angles::JointAngles;
use crate::config::OverlayConfig;
use crate::error::{AnalysisError, Result};
use crate::landmarks::{LandmarkSet, POSE_CONNECTIONS};

/// DejaVu Sans, bundled so labels render on hosts without system fonts.
const DEFAULT_FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

pub type Frame = RgbImage;

/// Draws the pose overlay onto detected frames.
pub struct FrameAnnotator {
    config: OverlayConfig,
    font: FontArc,
}

impl FrameAnnotator {
    /// Builds an annotator with the configured label font, or the bundled
    /// DejaVu Sans when `font_path` is unset. A configured font that cannot
    /// be read is an error.
    pub fn new(config: OverlayConfig) -> Result<Self> {
        let font = match &config.font_path {
            Some(path) => load_font(path)?,
            None => FontArc::try_from_slice(DEFAULT_FONT)
                .map_err(|e| AnalysisError::Config(format!("bundled font is invalid: {e}")))?,
        };

        Ok(Self { config, font })
    }

    /// Returns a copy of `frame` with the skeleton and angle labels drawn on it.
    /// The input frame is left untouched.
    pub fn annotate(&self, frame: &Frame, landmarks: &LandmarkSet, angles: &JointAngles) -> Frame {
        let mut annotated = frame.clone();
        self.draw_labels(&mut annotated, angles);
        self.draw_skeleton(&mut annotated, landmarks);
        annotated
    }

    fn draw_labels(&self, frame: &mut Frame, angles: &JointAngles) {
        let font = &self.font;
        let scale = PxScale::from(self.config.font_size);
        let ascent = font.as_scaled(scale).ascent().round() as i32;
        let color = Rgb(self.config.text_color);
        let (x, baseline) = self.config.text_origin;

        for (i, label) in angle_labels(angles).iter().enumerate() {
            let y = baseline + i as i32 * self.config.line_spacing - ascent;
            draw_text_mut(frame, color, x, y, scale, font, label);
        }
    }

    fn draw_skeleton(&self, frame: &mut Frame, landmarks: &LandmarkSet) {
        let (width, height) = frame.dimensions();
        let color = Rgb(self.config.skeleton_color);

        for (from, to) in POSE_CONNECTIONS.iter() {
            let start = landmarks.get(*from).to_pixel(width, height);
            let end = landmarks.get(*to).to_pixel(width, height);
            draw_thick_line(frame, start, end, self.config.stroke_width, color);
        }

        for landmark in landmarks.iter() {
            let (x, y) = landmark.to_pixel(width, height);
            draw_filled_circle_mut(
                frame,
                (x.round() as i32, y.round() as i32),
                self.config.point_radius,
                color,
            );
        }
    }
}

/// The three label lines, formatted with two decimals.
pub fn angle_labels(angles: &JointAngles) -> [String; 3] {
    [
        format!("Upper body angle: {:.2}", angles.upper_body),
        format!("Back leg angle: {:.2}", angles.back_leg),
        format!("Front leg angle: {:.2}", angles.front_leg),
    ]
}

fn load_font(path: &Path) -> Result<FontArc> {
    let data = std::fs::read(path).map_err(|e| {
        AnalysisError::Config(format!("cannot read font {}: {}", path.display(), e))
    })?;
    let font = FontArc::try_from_vec(data)
        .map_err(|e| AnalysisError::Config(format!("invalid font {}: {}", path.display(), e)))?;
    debug!("Loaded label font from {}", path.display());
    Ok(font)
}

// imageproc only draws 1px segments; wider strokes are laid down as parallel offsets.
fn draw_thick_line(frame: &mut Frame, start: (f32, f32), end: (f32, f32), width: u32, color: Rgb<u8>) {
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 || width <= 1 {
        draw_line_segment_mut(frame, start, end, color);
        return;
    }

    let (nx, ny) = (-dy / len, dx / len);
    let half = (width as f32 - 1.0) / 2.0;
    for i in 0..width {
        let offset = i as f32 - half;
        draw_line_segment_mut(
            frame,
            (start.0 + nx * offset, start.1 + ny * offset),
            (end.0 + nx * offset, end.1 + ny * offset),
            color,
        );
    }
}
