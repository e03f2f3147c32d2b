use std::io::Write;

use image::RgbImage;

use crate::asset_pipeline::common::error::Result;
use crate::asset_pipeline::header::types::HeaderSpec;

pub trait HeaderWriter {
    fn write_header(&self, image: &RgbImage, spec: &HeaderSpec, output: &mut dyn Write) -> Result<()>;
}
