//! C header generation module
//!
//! This module packs truecolor pixels into RGB565 and serializes them as a
//! `PROGMEM` constant table plus the placement constants the firmware reads.

mod writer;
mod progmem_writer;
mod encoder;
pub mod rgb565;
pub mod types;

pub use writer::HeaderWriter;
pub use progmem_writer::ProgmemHeaderWriter;
pub use encoder::PixelArrayEncoder;
pub use types::{EncodedHeader, EncoderInput, HeaderSpec};
