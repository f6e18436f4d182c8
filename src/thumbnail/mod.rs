//! Thumbnail compositing: frame grab, resize, title band, logo, tone effects.

mod effects;
mod encode;
mod font;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ab_glyph::FontVec;
use anyhow::{Context, Result};
use clap::ValueEnum;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, Rgba, RgbaImage};
use imageproc::drawing::{Blend, draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::Settings;
use crate::placement::Corner;
use crate::video::{CommandRunner, Invocation, MediaError};

pub use effects::{Effects, apply_effects};
pub use encode::save_image;
pub use font::{read_font, resolve_font};

const BAND_PADDING: u32 = 40;
const TITLE_SHADOW_OFFSET: i32 = 3;
const LOGO_PADDING: u32 = 20;
pub const DEFAULT_LOGO_SCALE: f32 = 0.15;
pub const DEFAULT_FRAME_TIMESTAMP: &str = "00:00:05";

/// Vertical placement of the title band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BandPosition {
    #[default]
    Bottom,
    Top,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleStyle {
    pub font_size: f32,
    pub position: BandPosition,
    pub background: Rgba<u8>,
    pub color: Rgba<u8>,
}

impl Default for TitleStyle {
    fn default() -> Self {
        Self {
            font_size: 80.0,
            position: BandPosition::Bottom,
            background: Rgba([0, 0, 0, 180]),
            color: Rgba([255, 255, 255, 255]),
        }
    }
}

/// Logo pasted into a corner after the title is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Branding {
    pub logo: PathBuf,
    pub corner: Corner,
    pub scale: f32,
}

impl Branding {
    pub fn new(logo: impl Into<PathBuf>) -> Self {
        Self {
            logo: logo.into(),
            corner: Corner::BottomRight,
            scale: DEFAULT_LOGO_SCALE,
        }
    }
}

/// Post-processing applied by [`ThumbnailGenerator::compose`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Finish {
    pub effects: Effects,
    pub style: TitleStyle,
    pub branding: Option<Branding>,
}

pub struct ThumbnailGenerator {
    output_dir: PathBuf,
    width: u32,
    height: u32,
    font: Option<FontVec>,
    runner: Arc<dyn CommandRunner>,
}

impl ThumbnailGenerator {
    /// 1280x720 generator with the system font, writing into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>, runner: Arc<dyn CommandRunner>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).with_context(|| {
            format!("Failed to create thumbnail directory: {}", output_dir.display())
        })?;
        Ok(Self {
            output_dir,
            width: 1280,
            height: 720,
            font: resolve_font(None)?,
            runner,
        })
    }

    pub fn from_settings(settings: &Settings, runner: Arc<dyn CommandRunner>) -> Result<Self> {
        let font = resolve_font(settings.thumbnail.font.as_deref())?;
        Ok(Self::new(&settings.paths.thumbnail_dir, runner)?
            .with_size(settings.thumbnail.width, settings.thumbnail.height)
            .with_font(font))
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width.max(1);
        self.height = height.max(1);
        self
    }

    pub fn with_font(mut self, font: Option<FontVec>) -> Self {
        self.font = font;
        self
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Grabs the frame at `timestamp` through ffmpeg.
    pub fn extract_frame(&self, video: &Path, timestamp: &str) -> Result<DynamicImage> {
        if !video.is_file() {
            return Err(MediaError::InputNotFound(video.to_path_buf()).into());
        }
        let frame = tempfile::Builder::new()
            .prefix("frame-")
            .suffix(".jpg")
            .tempfile_in(&self.output_dir)
            .context("Failed to allocate temporary frame file")?;

        let invocation = Invocation::ffmpeg()
            .arg("-ss")
            .arg(timestamp)
            .arg("-i")
            .arg(video)
            .args(["-vframes", "1", "-q:v", "2", "-y"])
            .arg(frame.path());
        self.runner
            .run(&invocation)
            .with_context(|| format!("Frame extraction failed for {}", video.display()))?;

        image::open(frame.path())
            .with_context(|| format!("Failed to decode extracted frame from {}", video.display()))
    }

    pub fn create_from_video(
        &self,
        video: &Path,
        title: &str,
        timestamp: &str,
        output_name: Option<&str>,
        finish: &Finish,
    ) -> Result<PathBuf> {
        let frame = self.extract_frame(video, timestamp)?;
        let composed = self.compose(&frame, title, finish)?;
        let name = output_name
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}_thumbnail.jpg", file_stem(video)));
        self.save(&composed, &name)
    }

    pub fn create_from_image(
        &self,
        source: &Path,
        title: &str,
        output_name: Option<&str>,
        finish: &Finish,
    ) -> Result<PathBuf> {
        if !source.is_file() {
            return Err(MediaError::InputNotFound(source.to_path_buf()).into());
        }
        let image = image::open(source)
            .with_context(|| format!("Failed to open image: {}", source.display()))?;
        let composed = self.compose(&image, title, finish)?;
        let name = output_name
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}_thumbnail.jpg", file_stem(source)));
        self.save(&composed, &name)
    }

    /// Fit, tone effects, title band, then the optional logo.
    pub fn compose(&self, image: &DynamicImage, title: &str, finish: &Finish) -> Result<DynamicImage> {
        let mut composed = self.fit(image);
        if !finish.effects.is_identity() {
            composed = apply_effects(&composed, &finish.effects);
        }
        composed = self.add_title_overlay(&composed, title, &finish.style);
        match &finish.branding {
            Some(branding) => {
                self.add_branding(&composed, &branding.logo, branding.corner, branding.scale)
            }
            None => Ok(composed),
        }
    }

    /// Resizes to the thumbnail canvas with Lanczos resampling.
    pub fn fit(&self, image: &DynamicImage) -> DynamicImage {
        image.resize_exact(self.width, self.height, FilterType::Lanczos3)
    }

    /// Draws a translucent band across the image with the centred, shadowed
    /// title inside it.
    pub fn add_title_overlay(
        &self,
        image: &DynamicImage,
        title: &str,
        style: &TitleStyle,
    ) -> DynamicImage {
        let mut canvas = Blend(image.to_rgba8());
        let (width, height) = canvas.0.dimensions();

        let (text_width, text_height) = match &self.font {
            Some(font) => text_size(style.font_size, font, title),
            None => (0, style.font_size.round() as u32),
        };
        let band_height = text_height + BAND_PADDING * 2;
        let band_y = match style.position {
            BandPosition::Bottom => height.saturating_sub(band_height),
            BandPosition::Top => 0,
            BandPosition::Center => height.saturating_sub(band_height) / 2,
        } as i32;

        draw_filled_rect_mut(
            &mut canvas,
            Rect::at(0, band_y).of_size(width, band_height),
            style.background,
        );

        match &self.font {
            Some(font) => {
                let x = centered(width, text_width);
                let y = band_y + BAND_PADDING as i32;
                draw_shadowed(
                    &mut canvas,
                    font,
                    title,
                    style.font_size,
                    (x, y),
                    style.color,
                    (TITLE_SHADOW_OFFSET, Rgba([0, 0, 0, 200])),
                );
            }
            None => warn!(title, "No font available; title text skipped"),
        }

        DynamicImage::ImageRgba8(canvas.0)
    }

    /// Pastes `logo`, scaled to `scale` of the image width, into a corner.
    /// A missing logo file is not an error: the image comes back unchanged.
    pub fn add_branding(
        &self,
        image: &DynamicImage,
        logo: &Path,
        corner: Corner,
        scale: f32,
    ) -> Result<DynamicImage> {
        if !logo.is_file() {
            warn!(logo = %logo.display(), "Logo file not found; skipping branding");
            return Ok(image.clone());
        }
        let logo_image = image::open(logo)
            .with_context(|| format!("Failed to open logo: {}", logo.display()))?;

        let (width, height) = (image.width(), image.height());
        let logo_width = (width as f32 * scale) as u32;
        let logo_height =
            (logo_width as f32 * logo_image.height() as f32 / logo_image.width().max(1) as f32) as u32;
        if logo_width == 0 || logo_height == 0 {
            warn!(scale, "Logo scales to an empty box; skipping branding");
            return Ok(image.clone());
        }

        let resized = logo_image
            .resize_exact(logo_width, logo_height, FilterType::Lanczos3)
            .to_rgba8();
        let (x, y) = corner.offset((width, height), (logo_width, logo_height), LOGO_PADDING);

        let mut base = image.to_rgba8();
        imageops::overlay(&mut base, &resized, x, y);
        Ok(DynamicImage::ImageRgba8(base))
    }

    /// Builds a thumbnail from a flat background with a title and an
    /// optional subtitle.
    pub fn custom(
        &self,
        background: Rgb<u8>,
        title: &str,
        subtitle: Option<&str>,
        output_name: &str,
    ) -> Result<PathBuf> {
        let Rgb([r, g, b]) = background;
        let mut canvas = Blend(RgbaImage::from_pixel(self.width, self.height, Rgba([r, g, b, 255])));

        match &self.font {
            Some(font) => {
                let (title_width, _) = text_size(90.0, font, title);
                draw_shadowed(
                    &mut canvas,
                    font,
                    title,
                    90.0,
                    (centered(self.width, title_width), (self.height / 3) as i32),
                    Rgba([255, 255, 255, 255]),
                    (4, Rgba([0, 0, 0, 255])),
                );

                if let Some(subtitle) = subtitle.filter(|s| !s.is_empty()) {
                    let (sub_width, _) = text_size(50.0, font, subtitle);
                    draw_shadowed(
                        &mut canvas,
                        font,
                        subtitle,
                        50.0,
                        (centered(self.width, sub_width), (self.height / 2 + 50) as i32),
                        Rgba([200, 200, 200, 255]),
                        (3, Rgba([0, 0, 0, 255])),
                    );
                }
            }
            None => warn!(title, "No font available; custom thumbnail has no text"),
        }

        self.save(&DynamicImage::ImageRgba8(canvas.0), output_name)
    }

    fn save(&self, image: &DynamicImage, name: &str) -> Result<PathBuf> {
        let path = self.output_dir.join(name);
        save_image(image, &path)?;
        info!(path = %path.display(), "Thumbnail saved");
        Ok(path)
    }
}

fn draw_shadowed(
    canvas: &mut Blend<RgbaImage>,
    font: &FontVec,
    text: &str,
    size: f32,
    (x, y): (i32, i32),
    color: Rgba<u8>,
    (offset, shadow): (i32, Rgba<u8>),
) {
    draw_text_mut(canvas, shadow, x + offset, y + offset, size, font, text);
    draw_text_mut(canvas, color, x, y, size, font, text);
}

fn centered(container: u32, item: u32) -> i32 {
    (i64::from(container) - i64::from(item)).div_euclid(2) as i32
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "thumbnail".to_string())
}
