use lsd_detector::config::detect;
use lsd_detector::diagnostics::DetectionReport;
use lsd_detector::image::io::{load_grayscale_image, write_json_file};
use lsd_detector::LineSegmentDetector;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = detect::load_config(Path::new(&config_path))?;

    let gray = load_grayscale_image(&config.input)?;
    let detector = LineSegmentDetector::new(config.lsd);
    let report: DetectionReport = detector
        .detect_with_report(&gray.to_f32())
        .map_err(|e| format!("Detection failed on {}: {e}", config.input.display()))?;

    write_json_file(&config.output.segments_json, &report)?;

    println!(
        "Detected {} segments in {}x{} image ({:.2} ms, {} seeds)",
        report.segments.len(),
        gray.width(),
        gray.height(),
        report.timing.total_ms,
        report.stats.seeds
    );
    println!("Saved report to {}", config.output.segments_json.display());
    Ok(())
}

fn usage() -> String {
    "Usage: detect_segments <config.json>".to_string()
}
