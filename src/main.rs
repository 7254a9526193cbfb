// src/main.rs
use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use pose_analyzer::data::DataExporter;
use pose_analyzer::{
    AnalysisReport, AnalyzerConfig, Detector, FfmpegDecoder, FfmpegEncoder, FrameAnnotator,
    FrameSource, LandmarkTrack, ProcessDetector, VideoPipeline,
};

/// Measure upper-body and leg angles across a movement video and render an
/// annotated copy.
#[derive(Debug, Parser)]
#[command(name = "pose_analyzer", version)]
struct Cli {
    /// Input video file, or `-` to read the video from stdin
    #[arg(short, long)]
    input: PathBuf,

    /// Pre-recorded landmark track (JSON lines, one entry per frame)
    #[arg(long, conflicts_with = "detector", required_unless_present = "detector")]
    landmarks: Option<PathBuf>,

    /// Pose model process speaking the frame/landmark line protocol
    #[arg(long)]
    detector: Option<PathBuf>,

    /// Extra argument for the detector process (repeatable)
    #[arg(long = "detector-arg", requires = "detector", allow_hyphen_values = true)]
    detector_args: Vec<String>,

    /// Where to write the annotated MP4
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the JSON response payload (base64 video plus averages) here
    #[arg(long)]
    report: Option<PathBuf>,

    /// Export per-frame angles as CSV into the configured output directory
    #[arg(long)]
    csv: bool,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AnalyzerConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };

    let opened = if cli.input.as_os_str() == "-" {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .context("Failed to read video from stdin")?;
        FfmpegDecoder::from_bytes(&bytes, &config.video)
    } else {
        FfmpegDecoder::open(&cli.input, &config.video)
    };
    let decoder = opened.context("Failed to open input video")?;

    let detector: Box<dyn Detector> = match (&cli.landmarks, &cli.detector) {
        (Some(track), _) => Box::new(
            LandmarkTrack::open(track)
                .with_context(|| format!("Failed to load landmark track {}", track.display()))?,
        ),
        (None, Some(program)) => Box::new(
            ProcessDetector::spawn(program, &cli.detector_args)
                .context("Failed to start pose detector")?,
        ),
        (None, None) => anyhow::bail!("either --landmarks or --detector is required"),
    };

    let encoder = FfmpegEncoder::new(decoder.metadata(), &config.video)
        .context("Failed to start video encoder")?;
    let annotator = FrameAnnotator::new(config.overlay.clone())?;

    let output = VideoPipeline::new(detector, annotator)
        .run(decoder, encoder)
        .context("Video analysis failed")?;

    if let Some(path) = &cli.output {
        std::fs::write(path, &output.video)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!("Annotated video written to {}", path.display());
    }

    if let Some(path) = &cli.report {
        let report = AnalysisReport::from(&output);
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!("Report written to {}", path.display());
    }

    if cli.csv || config.export.write_csv {
        let exporter = DataExporter::new(&config.export.output_directory, None);
        let path = exporter.export_csv(&output.timeline)?;
        eprintln!("Per-frame angles written to {}", path.display());
    }

    println!("Frames analyzed:   {} ({} with a detected pose)", output.frames_total, output.frames_detected);
    println!("Upper body angle:  {:.2}", output.averages.upper_body);
    println!("Back leg angle:    {:.2}", output.averages.back_leg);
    println!("Front leg angle:   {:.2}", output.averages.front_leg);

    Ok(())
}
