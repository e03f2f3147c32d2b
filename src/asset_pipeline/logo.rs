//! Boot logo reading and normalization
//!
//! Decodes the source logo, classifies its color mode and reduces it to an
//! opaque truecolor image positioned on the display canvas.

mod reader;
mod image_crate_reader;
pub mod normalize;
pub mod placement;
pub mod types;

pub use reader::LogoReader;
pub use image_crate_reader::ImageCrateReader;
pub use placement::Placement;
pub use types::{ColorMode, SourceImage};
