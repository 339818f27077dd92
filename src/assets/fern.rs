use glam::Vec3;

use crate::assets::staging::{Staging, stage};
use crate::bake::ColorBake;
use crate::builders::{BladeParams, RadialSolidParams, tapered_radial_solid};
use crate::compose::{PartRecipe, add_part, radial_blades};
use crate::error::Result;
use crate::types::{Color, DEFAULT_ROUGHNESS, Material, Model};

/// Small ground fern: a short stem with tapered fronds fanned around it.
#[derive(Debug, Clone, PartialEq)]
pub struct FernParams {
    pub stem_radius: f32,
    pub stem_height: f32,
    pub stem_sides: u32,
    pub stem_color: Color,
    pub frond_count: u32,
    pub frond_length: f32,
    /// Width at the frond base.
    pub frond_width: f32,
    pub frond_taper: f32,
    /// Lean from vertical, degrees.
    pub frond_angle_deg: f32,
    pub frond_segments: u32,
    pub frond_color: Color,
    pub frond_tip_color: Color,
    pub roughness: f32,
}

impl Default for FernParams {
    fn default() -> Self {
        Self {
            stem_radius: 0.03,
            stem_height: 0.15,
            stem_sides: 6,
            stem_color: Color::rgba(0.15, 0.30, 0.10, 1.0),
            frond_count: 6,
            frond_length: 0.35,
            frond_width: 0.10,
            frond_taper: 0.85,
            frond_angle_deg: 35.0,
            frond_segments: 3,
            frond_color: Color::rgba(0.20, 0.45, 0.15, 1.0),
            frond_tip_color: Color::rgba(0.25, 0.50, 0.18, 1.0),
            roughness: DEFAULT_ROUGHNESS,
        }
    }
}

impl FernParams {
    pub fn stem(&self) -> RadialSolidParams {
        RadialSolidParams {
            base_radius: self.stem_radius,
            top_radius: self.stem_radius,
            height: self.stem_height,
            sides: self.stem_sides,
            base_z: 0.0,
        }
    }

    /// Frond template; fronds start at the top of the stem.
    pub fn frond(&self) -> BladeParams {
        BladeParams {
            length: self.frond_length,
            base_width: self.frond_width,
            tip_taper: self.frond_taper,
            segments: self.frond_segments,
            vertical_angle: self.frond_angle_deg.to_radians(),
            rotation: 0.0,
            base_z: self.stem_height,
        }
    }

    /// Approximate overall height: stem plus a frond's vertical reach.
    pub fn total_height(&self) -> f32 {
        self.stem_height + self.frond_length * self.frond_angle_deg.to_radians().cos()
    }

    pub fn staging(&self) -> Staging {
        let focus = Vec3::new(0.0, 0.0, self.stem_height + self.frond_length * 0.3);
        Staging {
            ground_size: 5.0,
            sun_euler_deg: [45.0, 10.0, 30.0],
            fill_energy: 30.0,
            fill_size: 3.0,
            fill_location: Vec3::new(-1.5, 1.2, 1.0),
            fill_target: focus,
            lens_mm: 80.0,
            front_camera: Vec3::new(1.5, -1.2, 0.8),
            side_camera: Vec3::new(-0.5, -1.8, 0.6),
            camera_target: focus,
        }
    }

    pub fn summary(&self) -> Vec<String> {
        vec![
            format!(
                "Stem: {}-sided, r={}m, h={}m",
                self.stem_sides, self.stem_radius, self.stem_height
            ),
            format!(
                "Fronds: {} fronds, length={}m, width={}m, angle={}deg",
                self.frond_count, self.frond_length, self.frond_width, self.frond_angle_deg
            ),
            format!("Total height: ~{:.2}m", self.total_height()),
        ]
    }
}

/// Build the fern: a smooth stem plus `frond_count` gradient-colored fronds.
pub fn build(params: &FernParams) -> Result<Model> {
    let mut model = Model::new("Fern");
    let stem_mat = model.add_material(Material::new("Stem", params.stem_color, params.roughness)?);
    let frond_mat =
        model.add_material(Material::new("Frond", params.frond_color, params.roughness)?);

    let stem = tapered_radial_solid(&params.stem())?;
    add_part(
        &mut model,
        PartRecipe::new("Stem", stem, ColorBake::Solid(params.stem_color), stem_mat).smooth(),
    )?;

    let gradient = ColorBake::HeightGradient {
        base: params.frond_color,
        tip: params.frond_tip_color,
    };
    for (i, frond) in radial_blades(&params.frond(), params.frond_count)?
        .into_iter()
        .enumerate()
    {
        add_part(
            &mut model,
            PartRecipe::new(format!("Frond_{i}"), frond, gradient, frond_mat),
        )?;
    }

    stage(&mut model, &params.staging())?;
    Ok(model)
}
