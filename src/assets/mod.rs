//! The three asset generators and their shared preview rig.

pub mod fern;
pub mod house;
pub mod staging;
pub mod tree;

pub use fern::FernParams;
pub use house::HouseParams;
pub use tree::TreeParams;

use crate::config::AssetSpec;
use crate::error::Result;
use crate::types::Model;

/// Build the full working model (parts and scaffolding) for `spec`.
pub fn build_model(spec: &AssetSpec) -> Result<Model> {
    match spec {
        AssetSpec::Fern(params) => fern::build(params),
        AssetSpec::Tree(params) => tree::build(params),
        AssetSpec::House(params) => house::build(params),
    }
}

/// Human-readable lines describing the asset's dimensions.
pub fn summary(spec: &AssetSpec) -> Vec<String> {
    match spec {
        AssetSpec::Fern(params) => params.summary(),
        AssetSpec::Tree(params) => params.summary(),
        AssetSpec::House(params) => params.summary(),
    }
}
