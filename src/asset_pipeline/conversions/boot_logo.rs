use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};
use tempfile::NamedTempFile;
use tracing::{info, instrument, warn};

use crate::asset_pipeline::{
    common::{ConversionError, Result, StructuralWarning},
    config::AssetConfig,
    header::{EncodedHeader, EncoderInput, HeaderSpec, HeaderWriter, PixelArrayEncoder, ProgmemHeaderWriter},
    logo::{normalize, placement::place, ColorMode, ImageCrateReader, LogoReader, Placement},
};

/// What a successful boot logo conversion produced
#[derive(Debug, Clone)]
pub struct BootLogoSummary {
    pub source: PathBuf,
    pub placement: Placement,
    pub header: EncodedHeader,
    pub warnings: Vec<StructuralWarning>,
}

/// Converts the boot logo found in the data directory into a C header.
pub struct BootLogoPipeline<R: LogoReader, W: HeaderWriter> {
    reader: R,
    encoder: PixelArrayEncoder<W>,
    config: AssetConfig,
}

impl BootLogoPipeline<ImageCrateReader, ProgmemHeaderWriter> {
    pub fn new(config: AssetConfig) -> Self {
        Self {
            reader: ImageCrateReader,
            encoder: PixelArrayEncoder::new(),
            config,
        }
    }
}

impl<R: LogoReader, W: HeaderWriter> BootLogoPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: AssetConfig) -> Self {
        Self {
            reader,
            encoder: PixelArrayEncoder::with_writer(writer),
            config,
        }
    }

    /// First existing candidate, PNG before JPG.
    fn resolve_source(&self) -> Result<PathBuf> {
        let candidates = self.config.logo_paths();
        match candidates.iter().find(|p| p.is_file()) {
            Some(found) => {
                info!("Found source logo: {}", found.display());
                Ok(found.clone())
            }
            None => Err(ConversionError::MissingSource(candidates)),
        }
    }

    /// Stores the normalized image in a transient PNG that is removed on drop.
    fn persist_transient(image: &RgbImage, dir: Option<&Path>) -> Result<NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("boot_logo").suffix(".png");
        let mut transient = match dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(|e| ConversionError::EncodeError(format!("transient file: {}", e)))?;

        {
            let mut out = BufWriter::new(transient.as_file_mut());
            image
                .write_to(&mut out, ImageFormat::Png)
                .map_err(|e| ConversionError::EncodeError(format!("transient file: {}", e)))?;
            out.flush()?;
        }
        Ok(transient)
    }

    #[instrument(skip(self))]
    pub fn run(&self) -> Result<BootLogoSummary> {
        info!("Converting boot logo...");
        let mut warnings = Vec::new();

        let source_path = self.resolve_source()?;

        let source = {
            let _span = tracing::info_span!("decode_logo").entered();
            self.reader.read_logo(&source_path)?
        };
        let (width, height) = source.dimensions();
        let mode = source.mode;
        let name = source.name.clone();
        info!("Original size: {}x{}, mode {:?}", width, height, mode);

        let rgb = {
            let _span = tracing::info_span!("normalize").entered();
            normalize::to_truecolor(source)
        };
        if mode.has_alpha() || mode == ColorMode::Palette {
            info!("Flattened {:?} onto a black background", mode);
        }

        let canvas = self.config.canvas;
        let (rgb, placement, oversize) = place(rgb, canvas, self.config.oversize_policy);
        warnings.extend(oversize);

        if let Some(limit) = self.config.max_row_width {
            if placement.width > limit {
                warnings.push(StructuralWarning::RowBufferExceeded {
                    width: placement.width,
                    limit,
                });
            }
        }

        info!(
            "Centered at offset ({}, {}), encoding {}x{} of {} canvas pixels ({:.1}% fewer)",
            placement.offset_x,
            placement.offset_y,
            placement.width,
            placement.height,
            canvas.pixel_count(),
            placement.reduction_percent(canvas)
        );

        let spec = HeaderSpec::new(
            self.config.header.clone(),
            placement.offset_x,
            placement.offset_y,
        )
        .with_label(name);

        let header = {
            let _span = tracing::info_span!("encode_header").entered();
            let transient = Self::persist_transient(&rgb, self.config.transient_dir.as_deref())?;
            let encoded = self.encoder.encode(
                EncoderInput::Path(transient.path()),
                &spec,
                &self.config.header_path,
            );
            if let Err(e) = transient.close() {
                warn!("Could not remove transient logo file: {}", e);
            }
            encoded?
        };

        info!(
            "Boot logo header generated: {} ({} entries)",
            self.config.header_path.display(),
            header.entries
        );

        Ok(BootLogoSummary {
            source: source_path,
            placement,
            header,
            warnings,
        })
    }
}
