/// Frame sink — encodes a rendered pixmap and writes it to the output
/// directory under a timestamped file name.
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, SecondsFormat};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use tiny_skia::Pixmap;

use crate::config::ImageFormat;

/// Current local time formatted RFC3339 with nanoseconds, used both for the
/// time line inside the frame and for file names.
pub fn timestamp_now() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Encode `pixmap` in `format` and write it to `basepath` named after the
/// given timestamp. Returns the path of the written file.
pub fn write_frame(
    pixmap: &Pixmap,
    format: ImageFormat,
    basepath: &Path,
    timestamp: &str,
) -> Result<PathBuf> {
    let path = basepath.join(format!("{timestamp}{}", format.extension()));
    let file = File::create(&path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    let writer = BufWriter::new(file);

    match format {
        ImageFormat::Png => {
            PngEncoder::new(writer)
                .write_image(
                    pixmap.data(),
                    pixmap.width(),
                    pixmap.height(),
                    ExtendedColorType::Rgba8,
                )
                .context("Failed to encode PNG frame")?;
        }
        ImageFormat::Jpeg => {
            // JPEG carries no alpha; flatten onto a black background.
            let rgb = flatten_to_rgb(pixmap);
            JpegEncoder::new_with_quality(writer, 100)
                .write_image(
                    &rgb,
                    pixmap.width(),
                    pixmap.height(),
                    ExtendedColorType::Rgb8,
                )
                .context("Failed to encode JPEG frame")?;
        }
    }

    Ok(path)
}

fn flatten_to_rgb(pixmap: &Pixmap) -> Vec<u8> {
    let data = pixmap.data();
    let mut rgb = Vec::with_capacity(data.len() / 4 * 3);
    for px in data.chunks_exact(4) {
        let a = px[3] as u16;
        rgb.push((px[0] as u16 * a / 255) as u8);
        rgb.push((px[1] as u16 * a / 255) as u8);
        rgb.push((px[2] as u16 * a / 255) as u8);
    }
    rgb
}
