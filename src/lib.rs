pub mod assets;
pub mod bake;
pub mod builders;
pub mod cli;
pub mod compose;
pub mod config;
pub mod consolidate;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod preview;
pub mod transform;
pub mod types;

pub use config::{AssetKind, AssetSpec, PipelineConfig};
pub use error::{Result, SceneryError};
pub use pipeline::Pipeline;
