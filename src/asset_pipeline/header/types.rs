//! Header generation types

use std::path::Path;

use image::DynamicImage;

use crate::asset_pipeline::config::HeaderNaming;

/// Image handed to the encoder.
#[derive(Debug, Clone, Copy)]
pub enum EncoderInput<'a> {
    /// Decoded from disk by the encoder
    Path(&'a Path),
    /// Already resident in memory; every pixel is realized before encoding
    Image(&'a DynamicImage),
}

/// Everything the header needs besides the pixels.
#[derive(Debug, Clone)]
pub struct HeaderSpec {
    pub naming: HeaderNaming,
    pub offset_x: i32,
    pub offset_y: i32,
    /// Name printed in the header comment; defaults to the input file name
    pub label: Option<String>,
}

impl HeaderSpec {
    pub fn new(naming: HeaderNaming, offset_x: i32, offset_y: i32) -> Self {
        Self {
            naming,
            offset_x,
            offset_y,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Summary of a written header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedHeader {
    pub width: u32,
    pub height: u32,
    /// Number of packed pixels in the table
    pub entries: usize,
    /// Size of the generated text in bytes
    pub bytes: usize,
}
