//! Source image types

use image::{ColorType, DynamicImage};

/// Color layout of a decoded source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// RGB without alpha, any bit depth
    Truecolor,
    /// RGB with an alpha channel
    TruecolorAlpha,
    /// Luma without alpha
    Grayscale,
    /// Luma with an alpha channel
    GrayscaleAlpha,
    /// Indexed color, expanded by the decoder
    Palette,
}

impl ColorMode {
    /// Classifies a decoded color type. Indexed sources are reported by the
    /// reader separately because decoders expand palettes before handing out
    /// pixels.
    pub fn from_color_type(color: ColorType) -> Self {
        match color {
            ColorType::L8 | ColorType::L16 => ColorMode::Grayscale,
            ColorType::La8 | ColorType::La16 => ColorMode::GrayscaleAlpha,
            ColorType::Rgb8 | ColorType::Rgb16 | ColorType::Rgb32F => ColorMode::Truecolor,
            ColorType::Rgba8 | ColorType::Rgba16 | ColorType::Rgba32F => ColorMode::TruecolorAlpha,
            other if other.has_alpha() => ColorMode::TruecolorAlpha,
            _ => ColorMode::Truecolor,
        }
    }

    pub fn has_alpha(&self) -> bool {
        matches!(self, ColorMode::TruecolorAlpha | ColorMode::GrayscaleAlpha)
    }
}

/// A decoded boot logo together with its classified color mode
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub mode: ColorMode,
    pub image: DynamicImage,
    /// File name used in logs and in the header comment
    pub name: String,
}

impl SourceImage {
    pub fn new(image: DynamicImage, name: impl Into<String>) -> Self {
        Self {
            mode: ColorMode::from_color_type(image.color()),
            image,
            name: name.into(),
        }
    }

    pub fn with_mode(mut self, mode: ColorMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }
}
