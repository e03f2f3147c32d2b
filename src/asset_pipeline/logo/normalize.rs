//! Reduction of every color mode to opaque 8-bit RGB.
//!
//! Modes carrying transparency are composited over a black background using
//! their alpha channel as the mask. Opaque modes are converted directly.

use image::{DynamicImage, GrayAlphaImage, Rgb, RgbImage, RgbaImage};
use tracing::debug;

use crate::asset_pipeline::logo::types::{ColorMode, SourceImage};

/// `round(value * alpha / 255)` in integer arithmetic.
#[inline]
fn blend_over_black(value: u8, alpha: u8) -> u8 {
    let t = value as u32 * alpha as u32 + 128;
    ((t + (t >> 8)) >> 8) as u8
}

fn composite_rgba(image: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        Rgb([
            blend_over_black(r, a),
            blend_over_black(g, a),
            blend_over_black(b, a),
        ])
    })
}

fn composite_gray_alpha(image: &GrayAlphaImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let [l, a] = image.get_pixel(x, y).0;
        let v = blend_over_black(l, a);
        Rgb([v, v, v])
    })
}

fn truecolor(image: DynamicImage) -> RgbImage {
    image.into_rgb8()
}

fn truecolor_alpha(image: &DynamicImage) -> RgbImage {
    composite_rgba(&image.to_rgba8())
}

fn grayscale(image: &DynamicImage) -> RgbImage {
    image.to_rgb8()
}

fn grayscale_alpha(image: &DynamicImage) -> RgbImage {
    composite_gray_alpha(&image.to_luma_alpha8())
}

/// Palettes go through RGBA first. Entries without a transparency value get
/// a synthesized opaque alpha.
fn palette(image: &DynamicImage) -> RgbImage {
    composite_rgba(&image.to_rgba8())
}

/// Converts a decoded source into the canonical truecolor representation.
pub fn to_truecolor(source: SourceImage) -> RgbImage {
    debug!("Normalizing {} from {:?}", source.name, source.mode);
    match source.mode {
        ColorMode::Truecolor => truecolor(source.image),
        ColorMode::TruecolorAlpha => truecolor_alpha(&source.image),
        ColorMode::Grayscale => grayscale(&source.image),
        ColorMode::GrayscaleAlpha => grayscale_alpha(&source.image),
        ColorMode::Palette => palette(&source.image),
    }
}
