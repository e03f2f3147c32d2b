//! Asset conversion pipeline module
//!
//! Turns assets prepared for the single-board computer into what the
//! microcontroller firmware consumes: the boot logo as an RGB565 C header and
//! the speedcam database copied into the filesystem image directory.

pub mod common;
pub mod config;
pub mod conversions;
pub mod header;
pub mod logo;
pub mod runner;

pub use common::{
    ConversionError,
    FailureReason,
    Result,
    RunReport,
    StepOutcome,
    StructuralWarning,
};

pub use config::{
    AssetConfig,
    AssetConfigBuilder,
    Canvas,
    HeaderNaming,
    OversizePolicy,
};

pub use header::{
    EncoderInput,
    HeaderSpec,
    HeaderWriter,
    PixelArrayEncoder,
    ProgmemHeaderWriter,
};

pub use logo::{
    ColorMode,
    ImageCrateReader,
    LogoReader,
    SourceImage,
};

pub use conversions::{
    BootLogoPipeline,
    SpeedcamCopier,
};
