pub mod asset_pipeline;
pub mod logger;
