// src/video.rs - Frame sources and sinks: ffmpeg-backed and in-memory
use std::collections::VecDeque;
use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::VideoConfig;
use crate::error::{AnalysisError, Result};
use crate::overlay::Frame;

const LOG_TAIL_LINES: usize = 20;

/// Stream properties reported by the decoder and reused by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VideoMetadata {
    pub fps: f64,
    pub width: u32,
    pub height: u32,
}

impl VideoMetadata {
    /// Size in bytes of one packed RGB24 frame.
    pub fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }
}

/// Forward-only, finite sequence of decoded frames.
pub trait FrameSource {
    fn metadata(&self) -> VideoMetadata;

    /// Next frame in presentation order, or `None` once the stream is exhausted.
    fn next_frame(&mut self) -> Result<Option<Frame>>;
}

/// Accepts frames in order and produces the encoded stream.
pub trait FrameSink {
    fn write_frame(&mut self, frame: &Frame) -> Result<()>;

    fn finish(self) -> Result<Vec<u8>>
    where
        Self: Sized;
}

/// Request-scoped scratch directory, removed on drop.
struct TempWorkspace {
    dir: PathBuf,
}

impl TempWorkspace {
    fn create() -> Result<Self> {
        let dir = std::env::temp_dir().join(format!("pose_analyzer_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Fresh file for a child's stderr. A file never fills up the way a pipe
    /// does, so a chatty ffmpeg cannot stall on it.
    fn log_file(&self, name: &str) -> Result<Stdio> {
        Ok(Stdio::from(File::create(self.path(name))?))
    }

    /// Last lines of a stderr log, for error messages.
    fn log_tail(&self, name: &str) -> String {
        let log = std::fs::read(self.path(name)).unwrap_or_default();
        let log = String::from_utf8_lossy(&log);
        let lines: Vec<&str> = log.lines().collect();
        lines[lines.len().saturating_sub(LOG_TAIL_LINES)..].join("\n")
    }
}

impl Drop for TempWorkspace {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_dir_all(&self.dir) {
            warn!("Failed to remove scratch directory {}: {}", self.dir.display(), e);
        }
    }
}

/// Parses an ffprobe rational such as `30000/1001` or a plain `25`.
pub fn parse_frame_rate(value: &str) -> Option<f64> {
    let value = value.trim();
    let fps = match value.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => value.parse().ok()?,
    };
    (fps.is_finite() && fps > 0.0).then_some(fps)
}

fn parse_probe_output(output: &str, fallback_fps: f64) -> Result<VideoMetadata> {
    let line = output
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .ok_or_else(|| AnalysisError::Decode("no video stream found".into()))?;
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() < 3 {
        return Err(AnalysisError::Decode(format!("unexpected ffprobe output: {line}")));
    }

    let width: u32 = parts[0]
        .trim()
        .parse()
        .map_err(|_| AnalysisError::Decode(format!("invalid video width: {}", parts[0])))?;
    let height: u32 = parts[1]
        .trim()
        .parse()
        .map_err(|_| AnalysisError::Decode(format!("invalid video height: {}", parts[1])))?;
    if width == 0 || height == 0 {
        return Err(AnalysisError::Decode(format!("invalid video dimensions {width}x{height}")));
    }

    let fps = parse_frame_rate(parts[2]).unwrap_or_else(|| {
        warn!("Unusable frame rate '{}', falling back to {}", parts[2], fallback_fps);
        fallback_fps
    });

    Ok(VideoMetadata { fps, width, height })
}

/// Reads stream metadata with ffprobe.
pub fn probe(path: &Path, config: &VideoConfig) -> Result<VideoMetadata> {
    if !path.exists() {
        return Err(AnalysisError::Decode(format!(
            "video file does not exist: {}",
            path.display()
        )));
    }

    let output = Command::new(&config.ffprobe)
        .args(["-v", "error", "-select_streams", "v:0"])
        .args(["-show_entries", "stream=width,height,r_frame_rate"])
        .args(["-of", "csv=p=0"])
        .arg(path)
        .output()
        .map_err(|e| {
            AnalysisError::Decode(format!(
                "failed to run {} (is FFmpeg installed?): {}",
                config.ffprobe.display(),
                e
            ))
        })?;

    if !output.status.success() {
        return Err(AnalysisError::Decode(format!(
            "ffprobe failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    parse_probe_output(&String::from_utf8_lossy(&output.stdout), config.fallback_fps)
}

const DECODE_LOG: &str = "ffmpeg-decode.log";
const ENCODE_LOG: &str = "ffmpeg-encode.log";

/// Decodes a video into RGB24 frames through an `ffmpeg` child process.
///
/// Frames are streamed one at a time from the child's stdout; nothing is
/// buffered beyond the frame being read. The child's stderr goes to a log in
/// the request's scratch directory.
pub struct FfmpegDecoder {
    child: Option<Child>,
    stdout: Option<ChildStdout>,
    metadata: VideoMetadata,
    frames_read: usize,
    workspace: TempWorkspace,
}

impl FfmpegDecoder {
    pub fn open(path: impl AsRef<Path>, config: &VideoConfig) -> Result<Self> {
        Self::spawn(path.as_ref(), config, TempWorkspace::create()?)
    }

    /// Decodes an in-memory upload by spooling it to a scratch file first.
    pub fn from_bytes(bytes: &[u8], config: &VideoConfig) -> Result<Self> {
        let workspace = TempWorkspace::create()?;
        let input = workspace.path("input.bin");
        std::fs::write(&input, bytes)?;
        Self::spawn(&input, config, workspace)
    }

    fn spawn(path: &Path, config: &VideoConfig, workspace: TempWorkspace) -> Result<Self> {
        let metadata = probe(path, config)?;
        info!(
            "Decoding {} ({}x{} @ {:.2} fps)",
            path.display(),
            metadata.width,
            metadata.height,
            metadata.fps
        );

        let mut child = Command::new(&config.ffmpeg)
            .args(["-v", "error", "-nostdin", "-i"])
            .arg(path)
            .args(["-f", "rawvideo", "-pix_fmt", "rgb24", "-"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(workspace.log_file(DECODE_LOG)?)
            .spawn()
            .map_err(|e| AnalysisError::Decode(format!("failed to start ffmpeg: {e}")))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| AnalysisError::Decode("ffmpeg stdout unavailable".into()))?;

        Ok(Self {
            child: Some(child),
            stdout: Some(stdout),
            metadata,
            frames_read: 0,
            workspace,
        })
    }

    pub fn frames_read(&self) -> usize {
        self.frames_read
    }

    fn finish_stream(&mut self) -> Result<()> {
        self.stdout = None;
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };

        let status = child
            .wait()
            .map_err(|e| AnalysisError::Decode(format!("failed to wait for ffmpeg: {e}")))?;
        if !status.success() {
            return Err(AnalysisError::Decode(format!(
                "ffmpeg exited with {}: {}",
                status,
                self.workspace.log_tail(DECODE_LOG)
            )));
        }
        debug!("Decoder finished after {} frames", self.frames_read);
        Ok(())
    }
}

impl FrameSource for FfmpegDecoder {
    fn metadata(&self) -> VideoMetadata {
        self.metadata
    }

    fn next_frame(&mut self) -> Result<Option<Frame>> {
        let Some(stdout) = self.stdout.as_mut() else {
            return Ok(None);
        };

        let mut buf = vec![0u8; self.metadata.frame_len()];
        let mut filled = 0;
        while filled < buf.len() {
            match stdout.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(AnalysisError::Decode(format!("read from ffmpeg failed: {e}"))),
            }
        }

        if filled == 0 {
            self.finish_stream()?;
            return Ok(None);
        }
        if filled < buf.len() {
            return Err(AnalysisError::Decode(format!(
                "truncated frame {}: got {} of {} bytes",
                self.frames_read,
                filled,
                buf.len()
            )));
        }

        self.frames_read += 1;
        Frame::from_raw(self.metadata.width, self.metadata.height, buf)
            .map(Some)
            .ok_or_else(|| AnalysisError::Decode("frame buffer size mismatch".into()))
    }
}

impl Drop for FfmpegDecoder {
    fn drop(&mut self) {
        self.stdout = None;
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

/// Encodes RGB24 frames to MP4 through an `ffmpeg` child process.
///
/// The child is told the decoder's width and height, but odd sizes are padded
/// by one pixel to the right/bottom because yuv420p needs even dimensions, so
/// the encoded stream can be slightly larger than the frames written.
pub struct FfmpegEncoder {
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    metadata: VideoMetadata,
    output_path: PathBuf,
    frames_written: usize,
    workspace: TempWorkspace,
}

impl FfmpegEncoder {
    pub fn new(metadata: VideoMetadata, config: &VideoConfig) -> Result<Self> {
        let workspace = TempWorkspace::create()?;
        let output_path = workspace.path("annotated.mp4");

        let mut child = Command::new(&config.ffmpeg)
            .args(["-y", "-v", "error"])
            .args(["-f", "rawvideo", "-pix_fmt", "rgb24"])
            .args(["-s", &format!("{}x{}", metadata.width, metadata.height)])
            .args(["-r", &metadata.fps.to_string()])
            .args(["-i", "-"])
            .args(["-vf", "pad=ceil(iw/2)*2:ceil(ih/2)*2"])
            .args(["-c:v", &config.codec])
            .args(["-preset", &config.preset])
            .args(["-crf", &config.crf.to_string()])
            .args(["-pix_fmt", &config.pixel_format])
            .args(["-movflags", "+faststart"])
            .arg(&output_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(workspace.log_file(ENCODE_LOG)?)
            .spawn()
            .map_err(|e| AnalysisError::Encode(format!("failed to start ffmpeg: {e}")))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| AnalysisError::Encode("ffmpeg stdin unavailable".into()))?;

        Ok(Self {
            child: Some(child),
            stdin: Some(stdin),
            metadata,
            output_path,
            frames_written: 0,
            workspace,
        })
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }
}

impl FrameSink for FfmpegEncoder {
    fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        check_dimensions(frame, &self.metadata)?;
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| AnalysisError::Encode("encoder already closed".into()))?;
        if let Err(e) = stdin.write_all(frame.as_raw()) {
            return Err(AnalysisError::Encode(format!(
                "write to ffmpeg failed: {}: {}",
                e,
                self.workspace.log_tail(ENCODE_LOG)
            )));
        }
        self.frames_written += 1;
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<u8>> {
        self.stdin = None;
        let mut child = self
            .child
            .take()
            .ok_or_else(|| AnalysisError::Encode("encoder already finished".into()))?;

        if self.frames_written == 0 {
            let _ = child.kill();
            let _ = child.wait();
            return Ok(Vec::new());
        }

        let status = child
            .wait()
            .map_err(|e| AnalysisError::Encode(format!("failed to wait for ffmpeg: {e}")))?;
        if !status.success() {
            return Err(AnalysisError::Encode(format!(
                "ffmpeg exited with {}: {}",
                status,
                self.workspace.log_tail(ENCODE_LOG)
            )));
        }

        let bytes = std::fs::read(&self.output_path)?;
        info!("Encoded {} frames ({} bytes)", self.frames_written, bytes.len());
        Ok(bytes)
    }
}

impl Drop for FfmpegEncoder {
    fn drop(&mut self) {
        self.stdin = None;
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

fn check_dimensions(frame: &Frame, metadata: &VideoMetadata) -> Result<()> {
    if frame.dimensions() != (metadata.width, metadata.height) {
        return Err(AnalysisError::Encode(format!(
            "frame is {}x{}, stream is {}x{}",
            frame.width(),
            frame.height(),
            metadata.width,
            metadata.height
        )));
    }
    Ok(())
}

/// Frame source over frames already held in memory.
pub struct MemorySource {
    metadata: VideoMetadata,
    frames: VecDeque<Frame>,
}

impl MemorySource {
    pub fn new(fps: f64, frames: Vec<Frame>) -> Self {
        let (width, height) = frames.first().map(|f| f.dimensions()).unwrap_or((0, 0));
        Self {
            metadata: VideoMetadata { fps, width, height },
            frames: frames.into(),
        }
    }
}

impl FrameSource for MemorySource {
    fn metadata(&self) -> VideoMetadata {
        self.metadata
    }

    fn next_frame(&mut self) -> Result<Option<Frame>> {
        Ok(self.frames.pop_front())
    }
}

/// Sink producing a headerless stream of packed RGB24 frames.
pub struct RawVideoSink {
    metadata: VideoMetadata,
    data: Vec<u8>,
    frames_written: usize,
}

impl RawVideoSink {
    pub fn new(metadata: VideoMetadata) -> Self {
        Self { metadata, data: Vec::new(), frames_written: 0 }
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }
}

impl FrameSink for RawVideoSink {
    fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        check_dimensions(frame, &self.metadata)?;
        self.data.extend_from_slice(frame.as_raw());
        self.frames_written += 1;
        Ok(())
    }

    fn finish(self) -> Result<Vec<u8>> {
        Ok(self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn frame_rates() {
        assert_eq!(parse_frame_rate("25"), Some(25.0));
        assert_eq!(parse_frame_rate("30/1"), Some(30.0));
        assert!((parse_frame_rate("30000/1001").unwrap() - 29.97).abs() < 0.01);
        assert_eq!(parse_frame_rate("0/0"), None);
        assert_eq!(parse_frame_rate("abc"), None);
    }

    #[test]
    fn probe_output_parsing() {
        let meta = parse_probe_output("1280,720,60/1\n", 30.0).unwrap();
        assert_eq!(meta, VideoMetadata { fps: 60.0, width: 1280, height: 720 });

        let meta = parse_probe_output("640,480,0/0\n", 30.0).unwrap();
        assert_eq!(meta.fps, 30.0);

        assert!(matches!(parse_probe_output("", 30.0), Err(AnalysisError::Decode(_))));
        assert!(matches!(parse_probe_output("0,480,30/1", 30.0), Err(AnalysisError::Decode(_))));
    }

    #[test]
    fn memory_source_yields_frames_in_order() {
        let frames: Vec<Frame> = (0..3u8).map(|i| Frame::from_pixel(4, 2, Rgb([i, i, i]))).collect();
        let mut source = MemorySource::new(24.0, frames);

        assert_eq!(source.metadata(), VideoMetadata { fps: 24.0, width: 4, height: 2 });
        for i in 0..3u8 {
            let frame = source.next_frame().unwrap().unwrap();
            assert_eq!(*frame.get_pixel(0, 0), Rgb([i, i, i]));
        }
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn raw_sink_concatenates_frames() {
        let meta = VideoMetadata { fps: 30.0, width: 2, height: 2 };
        let mut sink = RawVideoSink::new(meta);
        sink.write_frame(&Frame::from_pixel(2, 2, Rgb([1, 2, 3]))).unwrap();
        sink.write_frame(&Frame::from_pixel(2, 2, Rgb([4, 5, 6]))).unwrap();
        assert_eq!(sink.frames_written(), 2);

        let bytes = sink.finish().unwrap();
        assert_eq!(bytes.len(), 2 * meta.frame_len());
        assert_eq!(&bytes[..3], &[1, 2, 3]);
        assert_eq!(&bytes[meta.frame_len()..meta.frame_len() + 3], &[4, 5, 6]);
    }

    #[test]
    fn raw_sink_rejects_mismatched_frames() {
        let mut sink = RawVideoSink::new(VideoMetadata { fps: 30.0, width: 2, height: 2 });
        let err = sink.write_frame(&Frame::new(3, 2)).unwrap_err();
        assert!(matches!(err, AnalysisError::Encode(_)));
    }

    #[test]
    fn probing_missing_file_is_decode_error() {
        let err = probe(Path::new("/nonexistent/clip.mp4"), &VideoConfig::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::Decode(_)));
    }

    #[cfg(unix)]
    mod ffmpeg {
        use super::*;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        /// Stand-in ffmpeg/ffprobe pair for a 2x2 @ 30 fps stream.
        struct FakeTools {
            dir: TempDir,
            config: VideoConfig,
        }

        impl FakeTools {
            fn new(ffmpeg_body: &str) -> Self {
                let dir = TempDir::new().unwrap();
                let config = VideoConfig {
                    ffmpeg: script(&dir, "ffmpeg", ffmpeg_body),
                    ffprobe: script(&dir, "ffprobe", "echo '2,2,30/1'"),
                    ..VideoConfig::default()
                };
                Self { dir, config }
            }

            fn clip(&self) -> PathBuf {
                let path = self.dir.path().join("clip.mp4");
                std::fs::write(&path, b"not really an mp4").unwrap();
                path
            }
        }

        fn script(dir: &TempDir, name: &str, body: &str) -> PathBuf {
            let path = dir.path().join(name);
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        fn metadata() -> VideoMetadata {
            VideoMetadata { fps: 30.0, width: 2, height: 2 }
        }

        #[test]
        fn decoder_streams_frames_until_eof() {
            let tools = FakeTools::new("head -c 24 /dev/zero");
            let mut decoder = FfmpegDecoder::open(tools.clip(), &tools.config).unwrap();

            assert_eq!(decoder.metadata(), metadata());
            assert!(decoder.next_frame().unwrap().is_some());
            assert!(decoder.next_frame().unwrap().is_some());
            assert!(decoder.next_frame().unwrap().is_none());
            assert_eq!(decoder.frames_read(), 2);
        }

        #[test]
        fn decoder_reads_uploaded_bytes() {
            let tools = FakeTools::new("head -c 12 /dev/zero");
            let mut decoder = FfmpegDecoder::from_bytes(b"upload", &tools.config).unwrap();

            assert!(decoder.workspace.path("input.bin").exists());
            assert!(decoder.next_frame().unwrap().is_some());
            assert!(decoder.next_frame().unwrap().is_none());
        }

        #[test]
        fn noisy_stderr_does_not_stall_decoding() {
            let tools = FakeTools::new(
                "i=0\n\
                 while [ $i -lt 4000 ]; do\n\
                 echo \"[h264 @ 0x5581] error while decoding MB $i 17, bytestream -7\" >&2\n\
                 i=$((i + 1))\n\
                 done\n\
                 head -c 12 /dev/zero",
            );
            let mut decoder = FfmpegDecoder::open(tools.clip(), &tools.config).unwrap();

            let frame = decoder.next_frame().unwrap().unwrap();
            assert_eq!(frame.dimensions(), (2, 2));
            assert!(decoder.next_frame().unwrap().is_none());
        }

        #[test]
        fn short_trailing_read_is_decode_error() {
            let tools = FakeTools::new("head -c 18 /dev/zero");
            let mut decoder = FfmpegDecoder::open(tools.clip(), &tools.config).unwrap();

            assert!(decoder.next_frame().unwrap().is_some());
            let err = decoder.next_frame().unwrap_err();
            assert!(matches!(&err, AnalysisError::Decode(msg) if msg.contains("truncated")));
        }

        #[test]
        fn failed_decode_reports_stderr() {
            let tools = FakeTools::new("echo 'moov atom not found' >&2\nexit 1");
            let mut decoder = FfmpegDecoder::open(tools.clip(), &tools.config).unwrap();

            let err = decoder.next_frame().unwrap_err();
            assert!(matches!(&err, AnalysisError::Decode(msg) if msg.contains("moov atom not found")));
        }

        #[test]
        fn dropping_decoder_stops_ffmpeg_and_cleans_up() {
            let tools = FakeTools::new("head -c 12 /dev/zero\nexec sleep 30");
            let mut decoder = FfmpegDecoder::open(tools.clip(), &tools.config).unwrap();
            assert!(decoder.next_frame().unwrap().is_some());

            let scratch = decoder.workspace.dir.clone();
            assert!(scratch.exists());
            drop(decoder);
            assert!(!scratch.exists());
        }

        #[test]
        fn encoder_returns_written_file() {
            // Copies stdin to the last argument, the output path.
            let tools = FakeTools::new("for last; do :; done\ncat > \"$last\"");
            let mut encoder = FfmpegEncoder::new(metadata(), &tools.config).unwrap();

            encoder.write_frame(&Frame::from_pixel(2, 2, Rgb([9, 8, 7]))).unwrap();
            encoder.write_frame(&Frame::from_pixel(2, 2, Rgb([1, 2, 3]))).unwrap();
            assert_eq!(encoder.frames_written(), 2);

            let bytes = encoder.finish().unwrap();
            assert_eq!(bytes.len(), 2 * metadata().frame_len());
            assert_eq!(&bytes[..3], &[9, 8, 7]);
        }

        #[test]
        fn noisy_stderr_does_not_stall_encoding() {
            let tools = FakeTools::new(
                "i=0\n\
                 while [ $i -lt 4000 ]; do\n\
                 echo \"[libx264 @ 0x5581] frame=$i QP=23.00 NAL=2 size=48213 bytes\" >&2\n\
                 i=$((i + 1))\n\
                 done\n\
                 for last; do :; done\n\
                 cat > \"$last\"",
            );
            let mut encoder = FfmpegEncoder::new(metadata(), &tools.config).unwrap();
            encoder.write_frame(&Frame::new(2, 2)).unwrap();

            assert_eq!(encoder.finish().unwrap().len(), metadata().frame_len());
        }

        #[test]
        fn encoder_with_no_frames_returns_empty_buffer() {
            let tools = FakeTools::new("cat > /dev/null\nexit 1");
            let encoder = FfmpegEncoder::new(metadata(), &tools.config).unwrap();

            assert!(encoder.finish().unwrap().is_empty());
        }

        #[test]
        fn failed_encode_reports_stderr() {
            let tools = FakeTools::new("cat > /dev/null\necho 'Unknown encoder libx264' >&2\nexit 1");
            let mut encoder = FfmpegEncoder::new(metadata(), &tools.config).unwrap();
            encoder.write_frame(&Frame::new(2, 2)).unwrap();

            let err = encoder.finish().unwrap_err();
            assert!(matches!(&err, AnalysisError::Encode(msg) if msg.contains("Unknown encoder")));
        }

        #[test]
        fn dropping_encoder_stops_ffmpeg_and_cleans_up() {
            let tools = FakeTools::new("exec sleep 30");
            let encoder = FfmpegEncoder::new(metadata(), &tools.config).unwrap();

            let scratch = encoder.workspace.dir.clone();
            assert!(scratch.exists());
            drop(encoder);
            assert!(!scratch.exists());
        }
    }
}
