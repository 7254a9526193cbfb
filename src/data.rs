// src/data.rs
use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::Local;
use csv::Writer;
use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::pipeline::FrameRecord;

#[derive(Debug, Serialize)]
struct AngleRecord {
    frame: usize,
    timestamp: f64,
    detected: bool,
    upper_body: Option<f64>,
    back_leg: Option<f64>,
    front_leg: Option<f64>,
}

impl From<&FrameRecord> for AngleRecord {
    fn from(record: &FrameRecord) -> Self {
        Self {
            frame: record.frame,
            timestamp: record.timestamp,
            detected: record.angles.is_some(),
            upper_body: record.angles.map(|a| a.upper_body),
            back_leg: record.angles.map(|a| a.back_leg),
            front_leg: record.angles.map(|a| a.front_leg),
        }
    }
}

/// Writes per-frame angle timelines into a session directory.
pub struct DataExporter {
    output_dir: PathBuf,
    session_name: String,
}

impl DataExporter {
    pub fn new(output_dir: impl AsRef<Path>, session_name: Option<String>) -> Self {
        let session_name = session_name.unwrap_or_else(|| {
            format!("session_{}", Local::now().format("%Y%m%d_%H%M%S"))
        });

        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            session_name,
        }
    }

    pub fn session_dir(&self) -> PathBuf {
        self.output_dir.join(&self.session_name)
    }

    pub fn export_csv(&self, timeline: &[FrameRecord]) -> Result<PathBuf> {
        let csv_path = self.session_dir().join("angles.csv");
        std::fs::create_dir_all(self.session_dir())?;

        let file = File::create(&csv_path)?;
        let mut writer = Writer::from_writer(file);
        for record in timeline {
            writer.serialize(AngleRecord::from(record))?;
        }
        writer.flush()?;

        info!("Exported {} frame records to {}", timeline.len(), csv_path.display());
        Ok(csv_path)
    }
}
