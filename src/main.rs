use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use micronav_assets::asset_pipeline::{runner, AssetConfig, OversizePolicy};
use micronav_assets::logger;

use tracing::info;

/// Converts boot logo and speedcam assets for the ESP32 firmware.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Firmware project directory holding `data/` and `src/`
    #[arg(long, default_value = ".")]
    project_dir: PathBuf,

    /// Filesystem image directory (default: <project-dir>/data)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Generated header (default: <project-dir>/src/boot_logo.h)
    #[arg(long)]
    header: Option<PathBuf>,

    /// Speedcam JSON database to copy
    #[arg(long)]
    speedcams: Option<PathBuf>,

    /// Center-crop logos larger than the display instead of emitting negative offsets
    #[arg(long)]
    crop_oversized: bool,

    /// Warn when the database holds more records than the firmware loads
    #[arg(long, default_value_t = 2000)]
    max_records: usize,

    /// Warn when the logo is wider than the firmware row buffer
    #[arg(long, default_value_t = 200)]
    max_row_width: u32,

    /// Exit with a failure status when any step failed
    #[arg(long)]
    strict: bool,

    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> anyhow::Result<AssetConfig> {
        let project_dir = self
            .project_dir
            .canonicalize()
            .with_context(|| format!("project directory {} not found", self.project_dir.display()))?;

        let mut builder = AssetConfig::builder()
            .project_dir(&project_dir)
            .max_records(Some(self.max_records))
            .max_row_width(Some(self.max_row_width));
        if let Some(dir) = self.data_dir {
            builder = builder.data_dir(dir);
        }
        if let Some(path) = self.header {
            builder = builder.header_path(path);
        }
        if let Some(path) = self.speedcams {
            builder = builder.speedcam_source(path);
        }
        if self.crop_oversized {
            builder = builder.oversize_policy(OversizePolicy::Crop);
        }
        Ok(builder.build())
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    logger::init(args.verbose);

    let strict = args.strict;
    let config = args.into_config()?;

    info!("Starting MicroNav ESP32 asset conversion...");
    info!("Data directory: {}", config.data_dir.display());
    info!("Header output: {}", config.header_path.display());

    let report = runner::run(&config);
    report.print_summary();

    if strict && !report.all_succeeded() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
