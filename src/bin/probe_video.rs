use pose_analyzer::config::VideoConfig;
use pose_analyzer::video;

fn main() {
    let Some(path) = std::env::args_os().nth(1) else {
        eprintln!("usage: probe_video <video-file>");
        std::process::exit(2);
    };
    let path = std::path::PathBuf::from(path);

    println!("Probing {}...\n", path.display());

    match video::probe(&path, &VideoConfig::default()) {
        Ok(meta) => {
            println!("✓ Video stream found");
            println!("  resolution: {}x{}", meta.width, meta.height);
            println!("  frame rate: {:.3} fps", meta.fps);
            println!("  frame size: {} bytes (rgb24)", meta.frame_len());
        }
        Err(e) => {
            println!("✗ Failed to probe video: {}", e);
            println!("\nPossible causes:");
            println!("1. FFmpeg (ffprobe) is not installed or not in PATH");
            println!("2. The file is not a video or is corrupted");
            println!("3. The file has no video stream");
            std::process::exit(1);
        }
    }
}
