use std::path::Path;

use image::{DynamicImage, GenericImageView, Pixel, RgbImage};
use tracing::{debug, info};

use crate::asset_pipeline::common::error::{ConversionError, Result};
use crate::asset_pipeline::header::progmem_writer::ProgmemHeaderWriter;
use crate::asset_pipeline::header::types::{EncodedHeader, EncoderInput, HeaderSpec};
use crate::asset_pipeline::header::writer::HeaderWriter;

/// Turns a truecolor image into a header file on disk.
pub struct PixelArrayEncoder<W: HeaderWriter> {
    writer: W,
}

impl PixelArrayEncoder<ProgmemHeaderWriter> {
    pub fn new() -> Self {
        Self {
            writer: ProgmemHeaderWriter,
        }
    }
}

impl Default for PixelArrayEncoder<ProgmemHeaderWriter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: HeaderWriter> PixelArrayEncoder<W> {
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Copies every pixel of a resident image into a fresh RGB buffer.
    ///
    /// Walking each coordinate guarantees the table is built from fully
    /// realized pixel data rather than whatever a lazy view would yield.
    /// Alpha is dropped without compositing.
    fn realize(image: &DynamicImage) -> RgbImage {
        let (width, height) = image.dimensions();
        let mut realized = RgbImage::new(width, height);
        for y in 0..height {
            for x in 0..width {
                realized.put_pixel(x, y, image.get_pixel(x, y).to_rgb());
            }
        }
        realized
    }

    fn load(input: EncoderInput<'_>) -> Result<(RgbImage, Option<String>)> {
        match input {
            EncoderInput::Path(path) => {
                let image = image::open(path).map_err(|e| {
                    ConversionError::DecodeError(format!("{}: {}", path.display(), e))
                })?;
                let name = path.file_name().map(|n| n.to_string_lossy().into_owned());
                Ok((image.into_rgb8(), name))
            }
            EncoderInput::Image(image) => Ok((Self::realize(image), None)),
        }
    }

    /// Encodes `input` and writes the header to `output_path`.
    ///
    /// The header is rendered completely before the file is touched, so a
    /// failure leaves any previous header in place.
    pub fn encode(
        &self,
        input: EncoderInput<'_>,
        spec: &HeaderSpec,
        output_path: &Path,
    ) -> Result<EncodedHeader> {
        let (image, input_name) = Self::load(input)?;
        let (width, height) = image.dimensions();
        debug!("Encoding {}x{} pixels to RGB565", width, height);

        let spec = match (&spec.label, input_name) {
            (None, Some(name)) => spec.clone().with_label(name),
            _ => spec.clone(),
        };

        let mut buffer = Vec::new();
        self.writer.write_header(&image, &spec, &mut buffer)?;

        std::fs::write(output_path, &buffer).map_err(|e| {
            ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e))
        })?;

        info!(
            output = %output_path.display(),
            width,
            height,
            "Header written"
        );

        Ok(EncodedHeader {
            width,
            height,
            entries: width as usize * height as usize,
            bytes: buffer.len(),
        })
    }
}
