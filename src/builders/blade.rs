use glam::Vec3;

use crate::builders::{require_finite, require_positive};
use crate::error::{Result, SceneryError};
use crate::types::{Face, Mesh};

/// Tapered flat blade (frond, leaf) leaning out from a vertical axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BladeParams {
    pub length: f32,
    pub base_width: f32,
    /// Fraction of the width lost at the tip: tip width = base width · (1 − taper).
    pub tip_taper: f32,
    pub segments: u32,
    /// Lean away from vertical, radians.
    pub vertical_angle: f32,
    /// Heading around the vertical axis, radians.
    pub rotation: f32,
    /// Z where the blade starts.
    pub base_z: f32,
}

impl BladeParams {
    pub fn validate(&self) -> Result<()> {
        require_positive("blade length", self.length)?;
        require_positive("blade base width", self.base_width)?;
        if !(0.0..1.0).contains(&self.tip_taper) {
            return Err(SceneryError::Parameter(format!(
                "blade tip taper must be in [0, 1), got {}",
                self.tip_taper
            )));
        }
        if self.segments == 0 {
            return Err(SceneryError::Parameter(
                "blade needs at least 1 segment".into(),
            ));
        }
        require_finite("blade vertical angle", self.vertical_angle)?;
        require_finite("blade rotation", self.rotation)?;
        require_finite("blade base z", self.base_z)
    }

    /// Width at fraction `t` of the length.
    pub fn width_at(&self, t: f32) -> f32 {
        self.base_width * (1.0 - t * self.tip_taper)
    }
}

/// Build a blade as `segments` quads between `segments + 1` vertex pairs.
///
/// Each pair straddles the outward path, offset perpendicular to the heading.
pub fn tapered_blade(params: &BladeParams) -> Result<Mesh> {
    params.validate()?;

    let segs = params.segments;
    let (sin_r, cos_r) = params.rotation.sin_cos();
    let (sin_v, cos_v) = params.vertical_angle.sin_cos();
    let side = Vec3::new(-sin_r, cos_r, 0.0);

    let mut vertices = Vec::with_capacity(2 * (segs as usize + 1));
    for s in 0..=segs {
        let t = s as f32 / segs as f32;
        let along = t * params.length;
        let out = along * sin_v;
        let center = Vec3::new(cos_r * out, sin_r * out, params.base_z + along * cos_v);
        let half = side * (params.width_at(t) * 0.5);
        vertices.push(center + half);
        vertices.push(center - half);
    }

    let faces = (0..segs)
        .map(|s| Face::new([s * 2, s * 2 + 1, (s + 1) * 2 + 1, (s + 1) * 2]))
        .collect();

    Mesh::new(vertices, faces)
}
