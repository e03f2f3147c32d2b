//! Entry point shared by the binary and the tests.

use tracing::{info, warn};

use crate::asset_pipeline::{
    common::{RunReport, StepOutcome, Timer},
    config::AssetConfig,
    conversions::{BootLogoPipeline, SpeedcamCopier},
};

pub const BOOT_LOGO_STEP: &str = "boot_logo";
pub const SPEEDCAM_STEP: &str = "speedcam_db";

/// Runs both steps in order. A failure in one never skips the other.
pub fn run(config: &AssetConfig) -> RunReport {
    let mut report = RunReport::new();

    if let Err(e) = std::fs::create_dir_all(&config.data_dir) {
        warn!("Could not create data directory {}: {}", config.data_dir.display(), e);
    }

    let timer = Timer::start(BOOT_LOGO_STEP);
    let result = BootLogoPipeline::new(config.clone())
        .run()
        .map(|summary| summary.warnings);
    let outcome = StepOutcome::from_result(BOOT_LOGO_STEP, result);
    let (name, duration) = timer.stop();
    report.add_step(name, outcome, duration);

    let timer = Timer::start(SPEEDCAM_STEP);
    let result = SpeedcamCopier::new(config.clone())
        .run()
        .map(|summary| summary.warnings);
    let outcome = StepOutcome::from_result(SPEEDCAM_STEP, result);
    let (name, duration) = timer.stop();
    report.add_step(name, outcome, duration);

    info!(
        success = report.all_succeeded(),
        warnings = report.warning_count(),
        "Asset conversion finished"
    );
    report
}
