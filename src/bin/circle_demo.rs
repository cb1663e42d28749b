use gauge_detector::config::stage;
use gauge_detector::detector::circle_candidates;
use gauge_detector::filters::gaussian_blur;
use gauge_detector::image::io::{load_grayscale_image, save_grayscale_u8, write_json_file};
use gauge_detector::CircleCandidate;
use serde::Serialize;
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
    let config = stage::load_config(Path::new(&config_path))?;

    let gray = load_grayscale_image(&config.input)?;
    let params = config.detection.params();

    if let Some(path) = &config.output.debug_image {
        let smoothed = gaussian_blur(gray.as_view(), params.blur_kernel_size, params.blur_sigma);
        save_grayscale_u8(&smoothed, path)?;
        println!("Saved smoothed input to {}", path.display());
    }

    let circles = circle_candidates(gray.as_view(), &config.detection);
    let summary = CircleStageSummary {
        width: gray.width(),
        height: gray.height(),
        center_threshold: params.center_threshold,
        circle_count: circles.len(),
        circles,
    };
    write_json_file(&config.output.json_out, &summary)?;
    println!(
        "Saved {} circle candidates to {}",
        summary.circle_count,
        config.output.json_out.display()
    );
    Ok(())
}

fn usage() -> String {
    "Usage: circle_demo <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CircleStageSummary {
    width: usize,
    height: usize,
    center_threshold: u32,
    circle_count: usize,
    circles: Vec<CircleCandidate>,
}
