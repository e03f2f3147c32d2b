use std::path::Path;

use crate::asset_pipeline::common::error::Result;
use crate::asset_pipeline::logo::types::SourceImage;

pub trait LogoReader {
    fn read_logo(&self, path: &Path) -> Result<SourceImage>;
}
