//! Primitive builders: pure functions from shape parameters to a fresh [`Mesh`].
//!
//! Every builder returns outward-facing geometry in local Z-up space and
//! fails fast with [`SceneryError::Parameter`] on out-of-range input instead
//! of emitting degenerate faces.
//!
//! [`Mesh`]: crate::types::Mesh
//! [`SceneryError::Parameter`]: crate::error::SceneryError::Parameter

pub mod blade;
pub mod blob;
pub mod cuboid;
pub mod gable;
pub mod radial;

pub use blade::{BladeParams, tapered_blade};
pub use blob::{BlobClusterParams, Spheroid, blob_cluster, icosphere};
pub use cuboid::{BoxParams, box_mesh, rotate_and_recenter};
pub use gable::{GableParams, gable_prism};
pub use radial::{RadialSolidParams, tapered_radial_solid};

use crate::error::{Result, SceneryError};

pub(crate) fn require_positive(label: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SceneryError::Parameter(format!("{label} must be > 0, got {value}")))
    }
}

pub(crate) fn require_non_negative(label: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SceneryError::Parameter(format!("{label} must be >= 0, got {value}")))
    }
}

pub(crate) fn require_finite(label: &str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SceneryError::Parameter(format!("{label} must be finite, got {value}")))
    }
}
