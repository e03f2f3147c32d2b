//! Boot logo reader backed by the `image` crate.
//!
//! PNG palette images are expanded to RGB or RGBA by the decoder, so the
//! indexed color type is read separately from the PNG header.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::{ImageFormat, ImageReader};
use tracing::debug;

use crate::asset_pipeline::common::error::{ConversionError, Result};
use crate::asset_pipeline::logo::reader::LogoReader;
use crate::asset_pipeline::logo::types::{ColorMode, SourceImage};

pub struct ImageCrateReader;

impl ImageCrateReader {
    fn is_indexed_png(path: &Path) -> Result<bool> {
        let file = File::open(path)
            .map_err(|e| ConversionError::InputReadError(format!("{}: {}", path.display(), e)))?;
        let reader = png::Decoder::new(BufReader::new(file))
            .read_info()
            .map_err(|e| ConversionError::DecodeError(format!("{}: {}", path.display(), e)))?;

        Ok(reader.info().color_type == png::ColorType::Indexed)
    }
}

impl LogoReader for ImageCrateReader {
    /// Decodes the file at `path`, guessing the format from its contents.
    fn read_logo(&self, path: &Path) -> Result<SourceImage> {
        let input_err = |e: std::io::Error| {
            ConversionError::InputReadError(format!("{}: {}", path.display(), e))
        };

        let reader = ImageReader::open(path)
            .map_err(input_err)?
            .with_guessed_format()
            .map_err(input_err)?;
        let format = reader.format();

        let image = reader
            .decode()
            .map_err(|e| ConversionError::DecodeError(format!("{}: {}", path.display(), e)))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let mut source = SourceImage::new(image, name);
        if format == Some(ImageFormat::Png) && Self::is_indexed_png(path)? {
            source = source.with_mode(ColorMode::Palette);
        }

        debug!(
            "Decoded {}: {}x{}, format {:?}, mode {:?}",
            source.name,
            source.image.width(),
            source.image.height(),
            format,
            source.mode
        );
        Ok(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::BufWriter;

    fn write_indexed_png(path: &Path, trns: Option<&[u8]>) {
        let file = File::create(path).unwrap();
        let mut encoder = png::Encoder::new(BufWriter::new(file), 2, 1);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_palette(vec![255u8, 0, 0, 0, 0, 255]);
        if let Some(trns) = trns {
            encoder.set_trns(trns.to_vec());
        }
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&[0, 1]).unwrap();
    }

    #[test]
    fn test_reads_truecolor_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boot_logo.png");
        RgbImage::from_pixel(4, 3, Rgb([1, 2, 3])).save(&path).unwrap();

        let source = ImageCrateReader.read_logo(&path).unwrap();

        assert_eq!(source.mode, ColorMode::Truecolor);
        assert_eq!(source.dimensions(), (4, 3));
        assert_eq!(source.name, "boot_logo.png");
    }

    #[test]
    fn test_reads_alpha_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boot_logo.png");
        RgbaImage::from_pixel(2, 2, Rgba([9, 9, 9, 128])).save(&path).unwrap();

        let source = ImageCrateReader.read_logo(&path).unwrap();

        assert_eq!(source.mode, ColorMode::TruecolorAlpha);
    }

    #[test]
    fn test_detects_palette_png() {
        let dir = tempfile::tempdir().unwrap();
        let opaque = dir.path().join("opaque.png");
        let transparent = dir.path().join("transparent.png");
        write_indexed_png(&opaque, None);
        write_indexed_png(&transparent, Some(&[255, 0]));

        let source = ImageCrateReader.read_logo(&opaque).unwrap();
        assert_eq!(source.mode, ColorMode::Palette);
        assert_eq!(source.image.to_rgb8().get_pixel(1, 0), &Rgb([0, 0, 255]));

        let source = ImageCrateReader.read_logo(&transparent).unwrap();
        assert_eq!(source.mode, ColorMode::Palette);
        assert_eq!(source.image.to_rgba8().get_pixel(1, 0)[3], 0);
    }

    #[test]
    fn test_reads_jpeg_by_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boot_logo.jpg");
        RgbImage::from_pixel(8, 8, Rgb([200, 200, 200])).save(&path).unwrap();

        let source = ImageCrateReader.read_logo(&path).unwrap();

        assert_eq!(source.mode, ColorMode::Truecolor);
        assert_eq!(source.dimensions(), (8, 8));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boot_logo.png");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\ntruncated").unwrap();

        let result = ImageCrateReader.read_logo(&path);

        assert!(matches!(result, Err(ConversionError::DecodeError(_))));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ImageCrateReader.read_logo(&dir.path().join("nope.png"));

        assert!(matches!(result, Err(ConversionError::InputReadError(_))));
    }
}
