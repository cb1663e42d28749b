use gauge_detector::config::gauge;
use gauge_detector::image::io::{load_grayscale_image, save_rgb, write_json_file};
use gauge_detector::{overlay, DetectionReport, DetectionResult, GaugeDetector};
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
    let config = gauge::load_config(Path::new(&config_path))?;

    let gray = load_grayscale_image(&config.input_path)?;
    let detector = GaugeDetector::new(config.detection.clone());
    let report = detector.process(gray.as_view());

    print_text_summary(&report);

    if let Some(path) = &config.output.json_out {
        write_json_file(path, &report)?;
        println!("JSON report written to {}", path.display());
    }
    if let Some(path) = &config.output.overlay_out {
        let canvas = overlay::render(gray.as_view(), &report.result);
        save_rgb(&canvas, path)?;
        println!("Overlay written to {}", path.display());
    }

    Ok(())
}

fn print_text_summary(report: &DetectionReport) {
    let trace = &report.trace;
    println!("Detection summary");
    println!("  input: {}x{}", trace.input.width, trace.input.height);
    match &report.result {
        DetectionResult::GaugeFound {
            circle,
            region,
            lines,
        } => {
            println!(
                "  dial: center=({}, {}) radius={} votes={}",
                circle.center_x, circle.center_y, circle.radius, circle.votes
            );
            println!(
                "  crop: x0={} y0={} {}x{}",
                region.x0, region.y0, region.width, region.height
            );
            println!("  needle candidates: {}", lines.len());
            for line in report.result.lines_in_image().iter().take(5) {
                println!(
                    "    rho={:.1} theta={:.1}deg votes={}",
                    line.rho,
                    line.theta_deg(),
                    line.votes
                );
            }
        }
        DetectionResult::NotFound => println!("  dial: not found"),
    }
    println!("  latency_ms: {:.3}", trace.timings.total_ms);
    for stage in &trace.timings.stages {
        println!("    {}: {:.3} ms", stage.label, stage.elapsed_ms);
    }
}

fn usage() -> String {
    "Usage: gauge_detector <config.json>".to_string()
}
