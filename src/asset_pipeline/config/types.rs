//! Asset conversion configuration types

use std::path::{Path, PathBuf};

/// Size of the target display in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 240,
            height: 240,
        }
    }
}

impl Canvas {
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// What to do with a source image larger than the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OversizePolicy {
    /// Encode the whole image and emit negative offsets
    #[default]
    Warn,
    /// Center-crop the image to the canvas before encoding
    Crop,
}

/// C identifiers used in the generated header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderNaming {
    pub var_name: String,
    pub include_guard: String,
    pub feature_flag: String,
}

impl Default for HeaderNaming {
    fn default() -> Self {
        Self {
            var_name: "boot_logo_data".to_string(),
            include_guard: "BOOT_LOGO_H".to_string(),
            feature_flag: "BOOT_LOGO_DATA_AVAILABLE".to_string(),
        }
    }
}

/// Configuration for a conversion run
#[derive(Debug, Clone)]
pub struct AssetConfig {
    /// Filesystem image directory of the microcontroller project
    pub data_dir: PathBuf,
    /// Boot logo file names looked up in `data_dir`, in order of preference
    pub logo_candidates: Vec<String>,
    /// Generated C header
    pub header_path: PathBuf,
    /// Speedcam database exported by the single-board computer project
    pub speedcam_source: PathBuf,
    /// File name of the copied database inside `data_dir`
    pub speedcam_file_name: String,
    pub canvas: Canvas,
    pub header: HeaderNaming,
    pub oversize_policy: OversizePolicy,
    /// Width of the firmware's per-row render buffer
    pub max_row_width: Option<u32>,
    /// Number of speedcams the firmware keeps in memory
    pub max_records: Option<usize>,
    /// Directory for the transient PNG handed to the encoder (system temp dir
    /// when unset)
    pub transient_dir: Option<PathBuf>,
}

const DEFAULT_MAX_ROW_WIDTH: u32 = 200;
const DEFAULT_MAX_RECORDS: usize = 2000;
const SPEEDCAM_DB_RELATIVE: &str =
    "micronav-pi/micronav-assets/speedcams/json/SCDB-Northern-Italy_cleaned.json";

impl Default for AssetConfig {
    fn default() -> Self {
        AssetConfigBuilder::default().build()
    }
}

impl AssetConfig {
    pub fn builder() -> AssetConfigBuilder {
        AssetConfigBuilder::default()
    }

    /// Candidate boot logo paths, preferred first.
    pub fn logo_paths(&self) -> Vec<PathBuf> {
        self.logo_candidates
            .iter()
            .map(|name| self.data_dir.join(name))
            .collect()
    }

    pub fn speedcam_destination(&self) -> PathBuf {
        self.data_dir.join(&self.speedcam_file_name)
    }
}

/// Builder for AssetConfig
///
/// Paths not set explicitly are derived from the project directory: `data/`
/// and `src/boot_logo.h` inside it, and the speedcam database under the
/// project root two levels above it.
#[derive(Default)]
pub struct AssetConfigBuilder {
    project_dir: Option<PathBuf>,
    project_root: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    header_path: Option<PathBuf>,
    speedcam_source: Option<PathBuf>,
    canvas: Option<Canvas>,
    header: Option<HeaderNaming>,
    oversize_policy: Option<OversizePolicy>,
    max_row_width: Option<Option<u32>>,
    max_records: Option<Option<usize>>,
    transient_dir: Option<PathBuf>,
}

impl AssetConfigBuilder {
    pub fn project_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.project_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn project_root(mut self, dir: impl AsRef<Path>) -> Self {
        self.project_root = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn header_path(mut self, path: impl AsRef<Path>) -> Self {
        self.header_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn speedcam_source(mut self, path: impl AsRef<Path>) -> Self {
        self.speedcam_source = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn canvas(mut self, width: u32, height: u32) -> Self {
        self.canvas = Some(Canvas { width, height });
        self
    }

    pub fn header_naming(mut self, naming: HeaderNaming) -> Self {
        self.header = Some(naming);
        self
    }

    pub fn oversize_policy(mut self, policy: OversizePolicy) -> Self {
        self.oversize_policy = Some(policy);
        self
    }

    pub fn max_row_width(mut self, limit: Option<u32>) -> Self {
        self.max_row_width = Some(limit);
        self
    }

    pub fn max_records(mut self, limit: Option<usize>) -> Self {
        self.max_records = Some(limit);
        self
    }

    pub fn transient_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.transient_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn build(self) -> AssetConfig {
        let project_dir = self.project_dir.unwrap_or_else(|| PathBuf::from("."));
        let project_root = self
            .project_root
            .unwrap_or_else(|| project_dir.join("..").join(".."));

        AssetConfig {
            data_dir: self.data_dir.unwrap_or_else(|| project_dir.join("data")),
            logo_candidates: vec!["boot_logo.png".to_string(), "boot_logo.jpg".to_string()],
            header_path: self
                .header_path
                .unwrap_or_else(|| project_dir.join("src").join("boot_logo.h")),
            speedcam_source: self
                .speedcam_source
                .unwrap_or_else(|| project_root.join(SPEEDCAM_DB_RELATIVE)),
            speedcam_file_name: "speedcams.json".to_string(),
            canvas: self.canvas.unwrap_or_default(),
            header: self.header.unwrap_or_default(),
            oversize_policy: self.oversize_policy.unwrap_or_default(),
            max_row_width: self.max_row_width.unwrap_or(Some(DEFAULT_MAX_ROW_WIDTH)),
            max_records: self.max_records.unwrap_or(Some(DEFAULT_MAX_RECORDS)),
            transient_dir: self.transient_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_project_layout() {
        let config = AssetConfig::builder().project_dir("/work/micronav-esp32/fw").build();

        assert_eq!(config.data_dir, PathBuf::from("/work/micronav-esp32/fw/data"));
        assert_eq!(config.header_path, PathBuf::from("/work/micronav-esp32/fw/src/boot_logo.h"));
        assert_eq!(
            config.speedcam_source,
            PathBuf::from(
                "/work/micronav-esp32/fw/../../micronav-pi/micronav-assets/speedcams/json/SCDB-Northern-Italy_cleaned.json"
            )
        );
        assert_eq!(config.canvas, Canvas { width: 240, height: 240 });
        assert_eq!(config.oversize_policy, OversizePolicy::Warn);
        assert_eq!(config.max_row_width, Some(200));
        assert_eq!(config.max_records, Some(2000));
        assert_eq!(config.transient_dir, None);
    }

    #[test]
    fn test_logo_candidates_prefer_png() {
        let config = AssetConfig::builder().data_dir("/tmp/data").build();
        let paths = config.logo_paths();

        assert_eq!(paths[0], PathBuf::from("/tmp/data/boot_logo.png"));
        assert_eq!(paths[1], PathBuf::from("/tmp/data/boot_logo.jpg"));
        assert_eq!(config.speedcam_destination(), PathBuf::from("/tmp/data/speedcams.json"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = AssetConfig::builder()
            .canvas(128, 160)
            .oversize_policy(OversizePolicy::Crop)
            .max_records(None)
            .speedcam_source("/srv/db.json")
            .build();

        assert_eq!(config.canvas.pixel_count(), 128 * 160);
        assert_eq!(config.oversize_policy, OversizePolicy::Crop);
        assert_eq!(config.max_records, None);
        assert_eq!(config.speedcam_source, PathBuf::from("/srv/db.json"));
    }
}
