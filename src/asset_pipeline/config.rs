//! Run configuration
//!
//! Every path, canvas size and firmware limit used by the asset steps lives in
//! [`AssetConfig`], built once at startup and handed to each step.

pub mod types;

pub use types::{AssetConfig, AssetConfigBuilder, Canvas, HeaderNaming, OversizePolicy};
