//! I/O helpers for grayscale images and JSON.
//!
//! - `load_grayscale_image`: read a PNG/JPEG/etc. into an owned 8-bit gray grid.
//! - `save_grayscale_u8`: write an owned 8-bit gray grid to disk.
//! - `save_rgb`: write a rendered overlay.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{GrayImageU8, ImageView};
use image::{DynamicImage, GrayImage, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert to 8-bit grayscale.
pub fn load_grayscale_image(path: &Path) -> Result<GrayImageU8, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    GrayImageU8::new(width, height, img.into_raw())
        .ok_or_else(|| format!("Decoded buffer size mismatch for {}", path.display()))
}

/// Convert an owned grid into an `image` crate buffer.
pub fn to_gray_image(grid: &GrayImageU8) -> Result<GrayImage, String> {
    let view = grid.as_view();
    let data = view
        .as_slice()
        .map(<[u8]>::to_vec)
        .ok_or_else(|| "Grid is not contiguous".to_string())?;
    GrayImage::from_raw(grid.width() as u32, grid.height() as u32, data)
        .ok_or_else(|| "Failed to create image buffer".to_string())
}

/// Save an 8-bit grayscale grid; the format follows the file extension.
pub fn save_grayscale_u8(grid: &GrayImageU8, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    DynamicImage::ImageLuma8(to_gray_image(grid)?)
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save an RGB buffer (e.g. a detection overlay).
pub fn save_rgb(image: &RgbImage, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    image
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
