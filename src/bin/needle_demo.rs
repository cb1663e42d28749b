//! Runs only the needle stage on an image that is already cropped to a dial.
use gauge_detector::config::stage;
use gauge_detector::detector::lines::needle_edges;
use gauge_detector::image::io::{load_grayscale_image, save_grayscale_u8, write_json_file};
use gauge_detector::types::DEFAULT_LINE_EXTENT;
use gauge_detector::{locate_lines, LineCandidate};
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

    let region = load_grayscale_image(&config.input)?;

    if let Some(path) = &config.output.debug_image {
        let edges = needle_edges(region.as_view(), &config.detection);
        save_grayscale_u8(&edges, path)?;
        println!("Saved edge map to {}", path.display());
    }

    let lines: Vec<NeedleLine> = locate_lines(region.as_view(), &config.detection)
        .map(|line| {
            let (a, b) = line.endpoints_px(DEFAULT_LINE_EXTENT);
            NeedleLine {
                line,
                theta_deg: line.theta_deg(),
                start: a,
                end: b,
            }
        })
        .collect();

    let summary = NeedleStageSummary {
        width: region.width(),
        height: region.height(),
        vote_threshold: config.detection.params().line_vote_threshold,
        line_count: lines.len(),
        lines,
    };
    write_json_file(&config.output.json_out, &summary)?;
    println!(
        "Saved {} line candidates to {}",
        summary.line_count,
        config.output.json_out.display()
    );
    Ok(())
}

fn usage() -> String {
    "Usage: needle_demo <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NeedleLine {
    #[serde(flatten)]
    line: LineCandidate,
    theta_deg: f32,
    start: (i32, i32),
    end: (i32, i32),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NeedleStageSummary {
    width: usize,
    height: usize,
    vote_threshold: u32,
    line_count: usize,
    lines: Vec<NeedleLine>,
}
