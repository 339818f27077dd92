//! Per-corner vertex color baking.
//!
//! Colors are written per face corner, so the same vertex could in principle
//! carry different colors in different faces. Baking overwrites whatever was
//! there before; bake only once vertex positions are final.

use crate::error::Result;
use crate::types::{Color, Mesh};

/// How a part's corners are colored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorBake {
    Solid(Color),
    /// Two-stop gradient over the mesh's Z range, `base` at the lowest vertex.
    HeightGradient { base: Color, tip: Color },
}

impl ColorBake {
    pub fn apply(&self, mesh: &mut Mesh) -> Result<()> {
        match *self {
            ColorBake::Solid(color) => bake_solid(mesh, color),
            ColorBake::HeightGradient { base, tip } => bake_height_gradient(mesh, base, tip),
        }
    }
}

/// Give every corner of every face the same color.
pub fn bake_solid(mesh: &mut Mesh, color: Color) -> Result<()> {
    color.validate()?;
    mesh.set_corner_colors(vec![color; mesh.corner_count()]);
    Ok(())
}

/// Interpolate between `base` and `tip` by each corner vertex's height.
///
/// The range is the global Z span of the mesh; a flat mesh uses a range of 1,
/// which gives `base` everywhere.
pub fn bake_height_gradient(mesh: &mut Mesh, base: Color, tip: Color) -> Result<()> {
    base.validate()?;
    tip.validate()?;

    let Some((z_min, z_max)) = mesh.z_range() else {
        return Ok(());
    };
    let range = if z_max > z_min { z_max - z_min } else { 1.0 };

    let vertices = mesh.vertices();
    let colors = mesh
        .faces()
        .iter()
        .flat_map(|face| face.vertices.iter())
        .map(|&v| {
            let t = (vertices[v as usize].z - z_min) / range;
            base.lerp(&tip, t)
        })
        .collect();
    mesh.set_corner_colors(colors);
    Ok(())
}
