use std::f32::consts::TAU;

use glam::Vec3;

use crate::builders::{require_finite, require_non_negative, require_positive};
use crate::error::{Result, SceneryError};
use crate::types::{Face, Mesh};

/// Tapered radial solid (trunk, stem): a cylinder or truncated cone around +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialSolidParams {
    pub base_radius: f32,
    /// Equal to `base_radius` for a uniform cylinder, 0 for a cone.
    pub top_radius: f32,
    pub height: f32,
    pub sides: u32,
    /// Z of the base ring.
    pub base_z: f32,
}

impl RadialSolidParams {
    pub fn validate(&self) -> Result<()> {
        if self.sides < 3 {
            return Err(SceneryError::Parameter(format!(
                "radial solid needs at least 3 sides, got {}",
                self.sides
            )));
        }
        require_positive("radial solid height", self.height)?;
        require_non_negative("radial solid base radius", self.base_radius)?;
        require_non_negative("radial solid top radius", self.top_radius)?;
        require_finite("radial solid base z", self.base_z)?;
        if self.base_radius == 0.0 && self.top_radius == 0.0 {
            return Err(SceneryError::Parameter(
                "radial solid needs a non-zero base or top radius".into(),
            ));
        }
        Ok(())
    }
}

fn ring(radius: f32, z: f32, sides: u32) -> impl Iterator<Item = Vec3> {
    (0..sides).map(move |i| {
        let theta = TAU * i as f32 / sides as f32;
        Vec3::new(radius * theta.cos(), radius * theta.sin(), z)
    })
}

/// Build the solid.
///
/// Two rings joined by `sides` quads plus both end caps, or one ring joined
/// to an apex by `sides` triangles plus a single cap when one radius is 0.
pub fn tapered_radial_solid(params: &RadialSolidParams) -> Result<Mesh> {
    params.validate()?;

    let n = params.sides;
    let z0 = params.base_z;
    let z1 = params.base_z + params.height;
    let next = |i: u32| (i + 1) % n;

    let mut vertices = Vec::with_capacity(2 * n as usize);
    let mut faces = Vec::with_capacity(n as usize + 2);

    if params.top_radius == 0.0 {
        // Base ring 0..n, apex n.
        vertices.extend(ring(params.base_radius, z0, n));
        vertices.push(Vec3::new(0.0, 0.0, z1));
        let apex = n;
        faces.extend((0..n).map(|i| Face::new([i, next(i), apex])));
        faces.push(Face::new((0..n).rev().collect::<Vec<_>>()));
    } else if params.base_radius == 0.0 {
        // Apex 0, top ring 1..=n.
        vertices.push(Vec3::new(0.0, 0.0, z0));
        vertices.extend(ring(params.top_radius, z1, n));
        faces.extend((0..n).map(|i| Face::new([0, 1 + next(i), 1 + i])));
        faces.push(Face::new((1..=n).collect::<Vec<_>>()));
    } else {
        // Base ring 0..n, top ring n..2n.
        vertices.extend(ring(params.base_radius, z0, n));
        vertices.extend(ring(params.top_radius, z1, n));
        faces.extend((0..n).map(|i| Face::new([i, next(i), n + next(i), n + i])));
        faces.push(Face::new((n..2 * n).collect::<Vec<_>>()));
        faces.push(Face::new((0..n).rev().collect::<Vec<_>>()));
    }

    Mesh::new(vertices, faces)
}
