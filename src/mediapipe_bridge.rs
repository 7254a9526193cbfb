// src/mediapipe_bridge.rs - Pose detector boundary and its adapters
use std::collections::VecDeque;
use std::ffi::OsStr;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use tracing::{debug, info};

use crate::error::{AnalysisError, Result};
use crate::landmarks::LandmarkSet;
use crate::overlay::Frame;

/// Per-frame body landmark detector.
///
/// `Ok(None)` means no subject was found in the frame, which is a normal
/// outcome. `Err` is a detector fault and aborts the request.
pub trait Detector {
    fn detect(&mut self, frame: &Frame) -> Result<Option<LandmarkSet>>;
}

impl<D: Detector + ?Sized> Detector for Box<D> {
    fn detect(&mut self, frame: &Frame) -> Result<Option<LandmarkSet>> {
        (**self).detect(frame)
    }
}

/// Parses one detector reply: `null` or a JSON array of 33 `{x, y}` objects.
pub fn parse_detection(line: &str) -> Result<Option<LandmarkSet>> {
    serde_json::from_str::<Option<LandmarkSet>>(line.trim())
        .map_err(|e| AnalysisError::Detector(format!("malformed landmark record: {e}")))
}

/// Replays landmarks recorded ahead of time, one entry per frame.
///
/// The on-disk form is JSON lines: each line is `null` (no detection) or the
/// 33 landmarks of that frame.
#[derive(Debug, Clone, Default)]
pub struct LandmarkTrack {
    entries: VecDeque<Option<LandmarkSet>>,
    frame: usize,
}

impl LandmarkTrack {
    pub fn new(entries: Vec<Option<LandmarkSet>>) -> Self {
        Self { entries: entries.into(), frame: 0 }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            AnalysisError::Detector(format!("cannot open landmark track {}: {}", path.display(), e))
        })?;
        let track = Self::from_reader(BufReader::new(file))?;
        info!("Loaded landmark track with {} frames from {}", track.len(), path.display());
        Ok(track)
    }

    pub fn from_reader(reader: impl BufRead) -> Result<Self> {
        let mut entries = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let entry = parse_detection(&line)
                .map_err(|e| AnalysisError::Detector(format!("line {}: {}", i + 1, e)))?;
            entries.push(entry);
        }
        Ok(Self::new(entries))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Detector for LandmarkTrack {
    fn detect(&mut self, _frame: &Frame) -> Result<Option<LandmarkSet>> {
        let entry = self.entries.pop_front().ok_or_else(|| {
            AnalysisError::Detector(format!("landmark track has no entry for frame {}", self.frame))
        })?;
        self.frame += 1;
        Ok(entry)
    }
}

/// Bridge to an external pose model running as a child process.
///
/// For every frame the child receives a `"<width> <height>\n"` header
/// followed by the packed RGB24 pixels on stdin, and must answer with one
/// JSON line on stdout (see [`parse_detection`]). The child lives exactly as
/// long as this value.
pub struct ProcessDetector {
    child: Child,
    stdin: Option<ChildStdin>,
    stdout: BufReader<ChildStdout>,
    frames_sent: usize,
}

impl ProcessDetector {
    pub fn spawn<I, S>(program: impl AsRef<OsStr>, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let program = program.as_ref();
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                AnalysisError::Detector(format!("failed to start {}: {}", program.to_string_lossy(), e))
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| AnalysisError::Detector("detector stdin unavailable".into()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| AnalysisError::Detector("detector stdout unavailable".into()))?;

        info!("Started pose detector process {}", program.to_string_lossy());
        Ok(Self {
            child,
            stdin: Some(stdin),
            stdout: BufReader::new(stdout),
            frames_sent: 0,
        })
    }
}

impl Detector for ProcessDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Option<LandmarkSet>> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| AnalysisError::Detector("detector input closed".into()))?;

        let send = |stdin: &mut ChildStdin| -> std::io::Result<()> {
            writeln!(stdin, "{} {}", frame.width(), frame.height())?;
            stdin.write_all(frame.as_raw())?;
            stdin.flush()
        };
        send(stdin).map_err(|e| {
            AnalysisError::Detector(format!("failed to send frame {}: {}", self.frames_sent, e))
        })?;

        let mut reply = String::new();
        let read = self.stdout.read_line(&mut reply).map_err(|e| {
            AnalysisError::Detector(format!("failed to read reply for frame {}: {}", self.frames_sent, e))
        })?;
        if read == 0 {
            return Err(AnalysisError::Detector(format!(
                "detector process exited before answering frame {}",
                self.frames_sent
            )));
        }

        self.frames_sent += 1;
        let detection = parse_detection(&reply)?;
        debug!(frame = self.frames_sent - 1, detected = detection.is_some(), "Detector reply");
        Ok(detection)
    }
}

impl Drop for ProcessDetector {
    fn drop(&mut self) {
        self.stdin = None;
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
