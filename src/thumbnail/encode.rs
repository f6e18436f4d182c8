use std::fs;
use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat};
use webp::Encoder as WebpEncoder;

const JPEG_QUALITY: u8 = 95;
const WEBP_QUALITY: f32 = 90.0;

/// Encodes `image` according to the extension of `path` and writes it.
pub fn save_image(image: &DynamicImage, path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(path)
        .with_context(|| format!("Unsupported thumbnail extension: {}", path.display()))?;
    let buffer = encode(image, format)
        .with_context(|| format!("Failed to encode thumbnail as {format:?}"))?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, &buffer)
        .with_context(|| format!("Failed to write thumbnail: {}", path.display()))?;
    Ok(())
}

fn encode(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
    match format {
        ImageFormat::Jpeg => encode_jpeg(image),
        ImageFormat::Png => encode_png(image),
        ImageFormat::WebP => encode_webp(image),
        other => {
            let mut cursor = Cursor::new(Vec::new());
            image.write_to(&mut cursor, other)?;
            Ok(cursor.into_inner())
        }
    }
}

fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>> {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    let mut cursor = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY)
        .write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
        .context("JPEG encode failed")?;
    Ok(cursor.into_inner())
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut cursor = Cursor::new(Vec::new());
    PngEncoder::new(&mut cursor)
        .write_image(rgba.as_raw(), width, height, ExtendedColorType::Rgba8)
        .context("PNG encode failed")?;
    Ok(cursor.into_inner())
}

fn encode_webp(image: &DynamicImage) -> Result<Vec<u8>> {
    let rgba = DynamicImage::ImageRgba8(image.to_rgba8());
    let encoder = WebpEncoder::from_image(&rgba)
        .map_err(|err| anyhow!("Failed to prepare WebP encoder: {err}"))?;
    Ok(encoder.encode(WEBP_QUALITY).to_vec())
}
