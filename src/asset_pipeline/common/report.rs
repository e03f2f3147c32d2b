use std::time::{Duration, Instant};

use tracing::{error, info, warn};

use crate::asset_pipeline::common::error::{FailureReason, Result};
use crate::asset_pipeline::common::warning::StructuralWarning;

/// Result of one asset step, reduced to success/failure with a reason code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Succeeded { warnings: Vec<StructuralWarning> },
    Failed { reason: FailureReason, message: String },
}

impl StepOutcome {
    /// Collapses a step result into an outcome, logging the failure.
    pub fn from_result(step: &str, result: Result<Vec<StructuralWarning>>) -> Self {
        match result {
            Ok(warnings) => {
                for warning in &warnings {
                    warn!(step = step, "{}", warning);
                }
                StepOutcome::Succeeded { warnings }
            }
            Err(e) => {
                error!(step = step, reason = %e.reason(), "{}", e);
                StepOutcome::Failed {
                    reason: e.reason(),
                    message: e.to_string(),
                }
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StepOutcome::Succeeded { .. })
    }
}

#[derive(Debug, Clone)]
pub struct StepReport {
    pub name: String,
    pub outcome: StepOutcome,
    pub duration: Duration,
}

/// Outcomes of every step of a run, in execution order.
#[derive(Debug, Default)]
pub struct RunReport {
    steps: Vec<StepReport>,
}

impl RunReport {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn add_step(&mut self, name: impl Into<String>, outcome: StepOutcome, duration: Duration) {
        self.steps.push(StepReport {
            name: name.into(),
            outcome,
            duration,
        });
    }

    pub fn steps(&self) -> &[StepReport] {
        &self.steps
    }

    pub fn get_step(&self, name: &str) -> Option<&StepReport> {
        self.steps.iter().find(|s| s.name == name)
    }

    /// Logical AND of every step. Vacuously true for an empty report.
    pub fn all_succeeded(&self) -> bool {
        self.steps.iter().all(|s| s.outcome.is_success())
    }

    pub fn warning_count(&self) -> usize {
        self.steps
            .iter()
            .map(|s| match &s.outcome {
                StepOutcome::Succeeded { warnings } => warnings.len(),
                StepOutcome::Failed { .. } => 0,
            })
            .sum()
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }

    pub fn print_summary(&self) {
        println!();
        println!("{:=<60}", "");
        for step in &self.steps {
            let status = match &step.outcome {
                StepOutcome::Succeeded { warnings } if warnings.is_empty() => "ok".to_string(),
                StepOutcome::Succeeded { warnings } => format!("ok ({} warnings)", warnings.len()),
                StepOutcome::Failed { reason, .. } => format!("FAILED [{}]", reason),
            };
            println!(
                "{:<20} {:<28} {:>8.1}ms",
                step.name,
                status,
                step.duration.as_secs_f64() * 1000.0
            );
        }
        println!("{:-<60}", "");

        if self.all_succeeded() {
            info!(
                "All {} steps completed in {:.1}ms",
                self.steps.len(),
                self.total_duration().as_secs_f64() * 1000.0
            );
            println!("Conversion complete!");
            println!();
            println!("Next steps:");
            println!("   1. Check the files in data/");
            println!("   2. Upload the filesystem image: sh ./upload_littlefs.sh");
        } else {
            println!("Conversion finished with errors");
        }
        println!("{:=<60}", "");
    }
}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            name: name.into(),
        }
    }

    pub fn stop(self) -> (String, Duration) {
        (self.name, self.start.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset_pipeline::common::error::ConversionError;

    #[test]
    fn test_failed_step_carries_reason() {
        let outcome = StepOutcome::from_result(
            "boot_logo",
            Err(ConversionError::MissingSource(vec!["data/boot_logo.png".into()])),
        );

        match outcome {
            StepOutcome::Failed { reason, message } => {
                assert_eq!(reason, FailureReason::MissingSourceFile);
                assert!(message.contains("boot_logo.png"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_report_aggregates_with_and() {
        let mut report = RunReport::new();
        report.add_step("boot_logo", StepOutcome::Succeeded { warnings: vec![] }, Duration::ZERO);
        assert!(report.all_succeeded());

        report.add_step(
            "speedcams",
            StepOutcome::Failed {
                reason: FailureReason::DecodeFailure,
                message: "bad json".into(),
            },
            Duration::from_millis(3),
        );
        assert!(!report.all_succeeded());
        assert_eq!(report.steps().len(), 2);
        assert!(report.get_step("boot_logo").unwrap().outcome.is_success());
    }

    #[test]
    fn test_warnings_do_not_fail_a_step() {
        let warning = StructuralWarning::RecordCapacityExceeded { count: 2500, limit: 2000 };
        let outcome = StepOutcome::from_result("speedcams", Ok(vec![warning]));

        assert!(outcome.is_success());
        let mut report = RunReport::new();
        report.add_step("speedcams", outcome, Duration::ZERO);
        assert_eq!(report.warning_count(), 1);
    }
}
