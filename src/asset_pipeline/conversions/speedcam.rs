use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::asset_pipeline::{
    common::{ConversionError, Result, StructuralWarning},
    config::AssetConfig,
};

/// Top-level key holding the speedcam records.
const RECORDS_KEY: &str = "result";

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// What a successful database copy produced
#[derive(Debug, Clone)]
pub struct SpeedcamSummary {
    pub destination: PathBuf,
    pub bytes: u64,
    /// Length of `result`, when present
    pub record_count: Option<usize>,
    pub warnings: Vec<StructuralWarning>,
}

impl SpeedcamSummary {
    pub fn size_mib(&self) -> f64 {
        self.bytes as f64 / BYTES_PER_MIB
    }
}

/// Copies the speedcam database into the filesystem image directory.
pub struct SpeedcamCopier {
    config: AssetConfig,
}

impl SpeedcamCopier {
    pub fn new(config: AssetConfig) -> Self {
        Self { config }
    }

    /// Byte copy that also carries over permissions and modification time.
    fn copy_preserving(source: &Path, destination: &Path) -> Result<u64> {
        let bytes = fs::copy(source, destination).map_err(|e| {
            ConversionError::OutputWriteError(format!(
                "{} -> {}: {}",
                source.display(),
                destination.display(),
                e
            ))
        })?;

        let preserved = fs::metadata(source)
            .and_then(|m| m.modified())
            .and_then(|modified| File::open(destination)?.set_modified(modified));
        if let Err(e) = preserved {
            warn!("Could not preserve modification time of {}: {}", destination.display(), e);
        }

        Ok(bytes)
    }

    /// Length of `result`: entries of an array or object, characters of a
    /// string. Any other JSON value has no length and fails the step.
    fn count_records(document: &Value, path: &Path) -> Result<Option<usize>> {
        match document.get(RECORDS_KEY) {
            None => Ok(None),
            Some(Value::Array(records)) => Ok(Some(records.len())),
            Some(Value::Object(records)) => Ok(Some(records.len())),
            Some(Value::String(text)) => Ok(Some(text.chars().count())),
            Some(other) => Err(ConversionError::JsonError(format!(
                "{}: `{}` has no length ({})",
                path.display(),
                RECORDS_KEY,
                other
            ))),
        }
    }

    #[instrument(skip(self))]
    pub fn run(&self) -> Result<SpeedcamSummary> {
        info!("Copying speedcam database...");
        let source = &self.config.speedcam_source;
        let destination = self.config.speedcam_destination();

        if !source.is_file() {
            return Err(ConversionError::MissingSource(vec![source.clone()]));
        }

        let bytes = {
            let _span = tracing::info_span!("copy_database").entered();
            Self::copy_preserving(source, &destination)?
        };
        info!("Database copied: {}", destination.display());

        let size = fs::metadata(&destination)
            .map_err(|e| {
                ConversionError::InputReadError(format!("{}: {}", destination.display(), e))
            })?
            .len();
        debug!("copied {} bytes, destination reports {}", bytes, size);
        info!("Size: {:.2} MB", size as f64 / BYTES_PER_MIB);

        let document: Value = {
            let _span = tracing::info_span!("parse_database").entered();
            let file = File::open(&destination).map_err(|e| {
                ConversionError::InputReadError(format!("{}: {}", destination.display(), e))
            })?;
            serde_json::from_reader(BufReader::new(file)).map_err(|e| {
                ConversionError::JsonError(format!("{}: {}", destination.display(), e))
            })?
        };

        let mut warnings = Vec::new();
        let record_count = Self::count_records(&document, &destination)?;

        if let Some(count) = record_count {
            info!("Speedcam records: {}", count);
            if let Some(limit) = self.config.max_records {
                if count > limit {
                    warnings.push(StructuralWarning::RecordCapacityExceeded { count, limit });
                }
            }
        }

        Ok(SpeedcamSummary {
            destination,
            bytes: size,
            record_count,
            warnings,
        })
    }
}
