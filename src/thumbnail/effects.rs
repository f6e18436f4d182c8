use image::{DynamicImage, Rgba, RgbaImage};

const BLUR_SIGMA: f32 = 2.0;

/// Tone adjustments. A factor of 1.0 leaves the channel untouched, 0.0
/// collapses it onto its degenerate image (black, flat grey, greyscale).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Effects {
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
    pub blur: bool,
}

impl Default for Effects {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            contrast: 1.0,
            saturation: 1.0,
            blur: false,
        }
    }
}

impl Effects {
    pub fn is_identity(&self) -> bool {
        is_neutral(self.brightness)
            && is_neutral(self.contrast)
            && is_neutral(self.saturation)
            && !self.blur
    }
}

pub fn apply_effects(image: &DynamicImage, effects: &Effects) -> DynamicImage {
    let mut rgba = image.to_rgba8();

    if !is_neutral(effects.brightness) {
        enhance(&mut rgba, effects.brightness, |_| [0.0; 3]);
    }
    if !is_neutral(effects.contrast) {
        let mean = mean_luma(&rgba);
        enhance(&mut rgba, effects.contrast, |_| [mean; 3]);
    }
    if !is_neutral(effects.saturation) {
        enhance(&mut rgba, effects.saturation, |pixel| [luma(pixel); 3]);
    }

    let adjusted = DynamicImage::ImageRgba8(rgba);
    if effects.blur {
        adjusted.blur(BLUR_SIGMA)
    } else {
        adjusted
    }
}

fn is_neutral(factor: f32) -> bool {
    (factor - 1.0).abs() <= f32::EPSILON
}

/// Interpolates every pixel between `degenerate` and itself. Alpha is kept.
fn enhance(image: &mut RgbaImage, factor: f32, degenerate: impl Fn(&Rgba<u8>) -> [f32; 3]) {
    for pixel in image.pixels_mut() {
        let base = degenerate(pixel);
        for (channel, anchor) in base.iter().enumerate() {
            let value = anchor + (f32::from(pixel[channel]) - anchor) * factor;
            pixel[channel] = value.round().clamp(0.0, 255.0) as u8;
        }
    }
}

fn luma(pixel: &Rgba<u8>) -> f32 {
    (f32::from(pixel[0]) * 299.0 + f32::from(pixel[1]) * 587.0 + f32::from(pixel[2]) * 114.0)
        / 1000.0
}

fn mean_luma(image: &RgbaImage) -> f32 {
    let count = u64::from(image.width()) * u64::from(image.height());
    if count == 0 {
        return 0.0;
    }
    let total: f64 = image.pixels().map(|p| f64::from(luma(p))).sum();
    (total / count as f64).round() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageBuffer;

    fn sample() -> DynamicImage {
        DynamicImage::ImageRgba8(ImageBuffer::from_fn(4, 4, |x, y| {
            Rgba([(x * 60) as u8, (y * 60) as u8, 200, 255])
        }))
    }

    #[test]
    fn identity_effects_leave_pixels_alone() {
        let image = sample();
        assert!(Effects::default().is_identity());
        let out = apply_effects(&image, &Effects::default());
        assert_eq!(out.to_rgba8(), image.to_rgba8());
    }

    #[test]
    fn zero_brightness_is_black_with_alpha_kept() {
        let out = apply_effects(
            &sample(),
            &Effects {
                brightness: 0.0,
                ..Effects::default()
            },
        )
        .to_rgba8();
        assert!(out.pixels().all(|p| p.0 == [0, 0, 0, 255]));
    }

    #[test]
    fn zero_saturation_is_grey() {
        let out = apply_effects(
            &sample(),
            &Effects {
                saturation: 0.0,
                ..Effects::default()
            },
        )
        .to_rgba8();
        assert!(out.pixels().all(|p| p[0] == p[1] && p[1] == p[2]));
    }

    #[test]
    fn zero_contrast_is_flat() {
        let out = apply_effects(
            &sample(),
            &Effects {
                contrast: 0.0,
                ..Effects::default()
            },
        )
        .to_rgba8();
        let first = *out.get_pixel(0, 0);
        assert!(out.pixels().all(|p| *p == first));
    }
}
