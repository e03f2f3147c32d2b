//! Asset conversion steps
//!
//! Orchestration for the boot logo conversion and the speedcam database copy.
//! The two steps are independent; neither reads the other's output.

mod boot_logo;
mod speedcam;


pub use boot_logo::{BootLogoPipeline, BootLogoSummary};
pub use speedcam::{SpeedcamCopier, SpeedcamSummary};
