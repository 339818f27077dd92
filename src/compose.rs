//! Part composition: turning builder meshes into named, colored, placed parts
//! and the layout rules the three assets use.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec3;

use crate::bake::ColorBake;
use crate::builders::{
    BladeParams, BoxParams, box_mesh, require_non_negative, require_positive, rotate_and_recenter,
    tapered_blade,
};
use crate::error::{Result, SceneryError};
use crate::transform::Transform;
use crate::types::{MaterialId, Mesh, Model};

/// Everything needed to turn a builder mesh into a model part.
#[derive(Debug, Clone)]
pub struct PartRecipe {
    pub name: String,
    pub mesh: Mesh,
    pub bake: ColorBake,
    pub material: MaterialId,
    pub transform: Transform,
    pub smooth: bool,
}

impl PartRecipe {
    pub fn new(name: impl Into<String>, mesh: Mesh, bake: ColorBake, material: MaterialId) -> Self {
        Self {
            name: name.into(),
            mesh,
            bake,
            material,
            transform: Transform::IDENTITY,
            smooth: false,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn smooth(mut self) -> Self {
        self.smooth = true;
        self
    }
}

/// Bake the recipe's colors onto its mesh and add it to `model`.
///
/// Colors are baked in the mesh's local frame, which is final for every
/// builder output: placement lives in the part transform.
pub fn add_part(model: &mut Model, recipe: PartRecipe) -> Result<()> {
    let PartRecipe {
        name,
        mut mesh,
        bake,
        material,
        transform,
        smooth,
    } = recipe;

    if mesh.is_empty() {
        return Err(SceneryError::Layout(format!("part '{name}' has no geometry")));
    }
    bake.apply(&mut mesh)?;
    mesh.set_smooth(smooth);
    model.add_part(name, mesh, material, transform)
}

/// Evenly spaced headings `2π·i/count` for `i` in `0..count`.
pub fn radial_angles(count: u32) -> Result<Vec<f32>> {
    if count == 0 {
        return Err(SceneryError::Parameter(
            "radial layout needs at least one element".into(),
        ));
    }
    Ok((0..count).map(|i| TAU * i as f32 / count as f32).collect())
}

/// One blade per radial heading, each a copy of `template` turned to its angle.
pub fn radial_blades(template: &BladeParams, count: u32) -> Result<Vec<Mesh>> {
    radial_angles(count)?
        .into_iter()
        .map(|rotation| {
            tapered_blade(&BladeParams {
                rotation,
                ..*template
            })
        })
        .collect()
}

/// Height of a canopy's centre above the ground: trunk top plus a fraction of
/// the main sphere's squashed radius.
pub fn canopy_center_height(
    trunk_height: f32,
    main_radius: f32,
    main_squash: f32,
    lift_fraction: f32,
) -> f32 {
    trunk_height + main_radius * main_squash * lift_fraction
}

/// A vertical outer face of a rectangular footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallFace {
    /// +Y
    Front,
    /// -Y
    Back,
    /// -X
    Left,
    /// +X
    Right,
}

impl WallFace {
    pub fn outward(&self) -> Vec3 {
        match self {
            WallFace::Front => Vec3::Y,
            WallFace::Back => Vec3::NEG_Y,
            WallFace::Left => Vec3::NEG_X,
            WallFace::Right => Vec3::X,
        }
    }

    /// Side faces run along Y, so openings on them are turned a quarter turn.
    pub fn is_side(&self) -> bool {
        matches!(self, WallFace::Left | WallFace::Right)
    }
}

/// Rectangular building footprint centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub width: f32,
    pub depth: f32,
}

impl Footprint {
    /// Horizontal position of the middle of `face`, pushed `inset` outward.
    pub fn face_offset(&self, face: WallFace, inset: f32) -> Vec3 {
        let half = match face {
            WallFace::Front | WallFace::Back => self.depth / 2.0,
            WallFace::Left | WallFace::Right => self.width / 2.0,
        };
        face.outward() * (half + inset)
    }
}

/// A door or window box set against one wall face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Opening {
    pub face: WallFace,
    pub width: f32,
    pub height: f32,
    /// Extent through the wall.
    pub thickness: f32,
    /// Height of the bottom edge above the ground.
    pub sill: f32,
    pub inset: f32,
}

impl Opening {
    pub fn center(&self, footprint: &Footprint) -> Vec3 {
        footprint.face_offset(self.face, self.inset) + Vec3::Z * (self.sill + self.height / 2.0)
    }
}

/// Build an opening's box in world coordinates.
///
/// The box is always built facing ±Y (width along X); openings on side faces
/// are then turned 90° about Z and moved back onto their centre.
pub fn place_opening(footprint: &Footprint, opening: &Opening) -> Result<Mesh> {
    require_positive("footprint width", footprint.width)?;
    require_positive("footprint depth", footprint.depth)?;
    require_non_negative("opening sill", opening.sill)?;
    require_non_negative("opening inset", opening.inset)?;

    let center = opening.center(footprint);
    let params = BoxParams {
        width: opening.width,
        depth: opening.thickness,
        height: opening.height,
        center: if opening.face.is_side() { Vec3::ZERO } else { center },
    };
    let mut mesh = box_mesh(&params)?;
    if opening.face.is_side() {
        rotate_and_recenter(&mut mesh, FRAC_PI_2, center)?;
    }
    Ok(mesh)
}
