// src/config.rs - Analyzer settings, loadable from a JSON file
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub overlay: OverlayConfig,
    pub video: VideoConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub skeleton_color: [u8; 3],
    pub text_color: [u8; 3],
    pub stroke_width: u32,
    pub point_radius: i32,
    /// Baseline of the first text line, in pixels from the top-left corner.
    pub text_origin: (i32, i32),
    pub line_spacing: i32,
    pub font_size: f32,
    /// TTF/OTF file used for the angle labels. When unset a few common
    /// system font locations are tried.
    pub font_path: Option<PathBuf>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            skeleton_color: [0, 255, 0],
            text_color: [255, 255, 255],
            stroke_width: 2,
            point_radius: 2,
            text_origin: (10, 30),
            line_spacing: 30,
            font_size: 22.0,
            font_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
    pub codec: String,
    pub preset: String,
    pub crf: u32,
    pub pixel_format: String,
    /// Used when the container does not report a usable frame rate.
    pub fallback_fps: f64,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            ffprobe: PathBuf::from("ffprobe"),
            codec: "libx264".to_string(),
            preset: "medium".to_string(),
            crf: 23,
            pixel_format: "yuv420p".to_string(),
            fallback_fps: 30.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_directory: PathBuf,
    pub write_csv: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_directory: directories::UserDirs::new()
                .and_then(|dirs| dirs.document_dir().map(|p| p.join("PoseAnalyzer")))
                .unwrap_or_else(|| PathBuf::from("./output")),
            write_csv: false,
        }
    }
}

impl AnalyzerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| AnalysisError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.overlay.stroke_width == 0 {
            return Err(AnalysisError::Config("overlay.stroke_width must be at least 1".into()));
        }
        if !(self.overlay.font_size > 0.0) {
            return Err(AnalysisError::Config("overlay.font_size must be positive".into()));
        }
        if !(self.video.fallback_fps > 0.0) {
            return Err(AnalysisError::Config("video.fallback_fps must be positive".into()));
        }
        Ok(())
    }
}
