use glam::Vec3;

use crate::builders::require_positive;
use crate::error::Result;
use crate::types::{Face, Mesh};

/// Triangular gable roof sitting on a rectangular footprint centred on the origin.
///
/// The ridge runs along X; slopes face ±Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GableParams {
    pub width: f32,
    pub depth: f32,
    /// Z of the roof's bottom edge (top of the walls).
    pub wall_height: f32,
    /// Ridge height above `wall_height`.
    pub ridge_height: f32,
}

/// Build the fixed 6-vertex, 4-face roof: two slopes and two gable ends.
pub fn gable_prism(params: &GableParams) -> Result<Mesh> {
    require_positive("gable width", params.width)?;
    require_positive("gable depth", params.depth)?;
    require_positive("gable wall height", params.wall_height)?;
    require_positive("gable ridge height", params.ridge_height)?;

    let hw = params.width / 2.0;
    let hd = params.depth / 2.0;
    let z = params.wall_height;
    let top = params.wall_height + params.ridge_height;

    let vertices = vec![
        Vec3::new(-hw, -hd, z), // back-left
        Vec3::new(hw, -hd, z),  // back-right
        Vec3::new(hw, hd, z),   // front-right
        Vec3::new(-hw, hd, z),  // front-left
        Vec3::new(-hw, 0.0, top),
        Vec3::new(hw, 0.0, top),
    ];

    let faces = vec![
        Face::new([4, 5, 2, 3]), // front slope
        Face::new([5, 4, 0, 1]), // back slope
        Face::new([4, 3, 0]),    // left gable
        Face::new([5, 1, 2]),    // right gable
    ];

    Mesh::new(vertices, faces)
}
