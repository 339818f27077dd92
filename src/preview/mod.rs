//! Review images. Previews read the whole model (ground and lights included)
//! and never change it.

pub mod raster;

use std::path::Path;

use glam::Vec3;

use crate::config::PreviewConfig;
use crate::error::{Result, SceneryError};
use crate::types::{LightKind, Model, ObjectKind};

pub use raster::RasterPreview;

/// Width of the full-frame sensor the lens focal lengths refer to.
pub const SENSOR_WIDTH_MM: f32 = 36.0;

/// Produces one preview image of `model` as seen from the named camera.
pub trait PreviewRenderer {
    fn render(
        &self,
        model: &Model,
        camera: &str,
        settings: &PreviewConfig,
        path: &Path,
    ) -> Result<()>;
}

/// Where a camera sits and what it looks at, in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
    /// Field of view across the (square) image, in radians.
    pub fov: f32,
}

impl CameraPose {
    /// Resolve camera `name`: its world origin, and the world origin of its
    /// track target (or a point along its local -Z when it tracks nothing).
    pub fn from_model(model: &Model, name: &str) -> Result<Self> {
        let object = model
            .get(name)
            .ok_or_else(|| SceneryError::Layout(format!("no camera named '{name}'")))?;
        let ObjectKind::Camera(camera) = &object.kind else {
            return Err(SceneryError::Layout(format!(
                "object '{name}' is a {}, not a camera",
                object.kind.label()
            )));
        };
        if camera.lens_mm <= 0.0 {
            return Err(SceneryError::Parameter(format!(
                "camera '{name}' has lens {} mm",
                camera.lens_mm
            )));
        }

        let world = model.world_transform(name)?;
        let eye: Vec3 = world.translation.into();
        let target = match &camera.track_target {
            Some(target) => model.world_position(target)?,
            None => eye + world.transform_vector3(Vec3::NEG_Z),
        };
        if target.abs_diff_eq(eye, 1e-6) {
            return Err(SceneryError::Layout(format!(
                "camera '{name}' sits on its own target"
            )));
        }
        Ok(Self {
            eye,
            target,
            fov: 2.0 * (SENSOR_WIDTH_MM / 2.0 / camera.lens_mm).atan(),
        })
    }

    pub fn direction(&self) -> Vec3 {
        (self.target - self.eye).normalize()
    }
}

/// A light reduced to what Lambert shading needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Unit vector from the surface toward the light.
    pub to_light: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

/// Sun strength 3 maps to an intensity of about 0.9.
const SUN_SCALE: f32 = 0.3;
/// Area light power (W) to intensity; the 30..50 W fills land near 0.2.
const AREA_SCALE: f32 = 0.005;

/// Collect every light in `model` as a directional light.
///
/// Suns shine along their local -Z. Area lights are treated as coming from
/// their position toward their track target (or along local -Z).
pub fn collect_lights(model: &Model) -> Result<Vec<DirectionalLight>> {
    let mut lights = Vec::new();
    for object in &model.objects {
        let ObjectKind::Light(light) = &object.kind else {
            continue;
        };
        let world = model.world_transform(&object.name)?;
        let along = match &light.track_target {
            Some(target) => model.world_position(target)? - Vec3::from(world.translation),
            None => world.transform_vector3(Vec3::NEG_Z),
        };
        let Some(along) = along.try_normalize() else {
            continue;
        };
        let scale = match light.kind {
            LightKind::Sun => SUN_SCALE,
            LightKind::Area { .. } => AREA_SCALE,
        };
        lights.push(DirectionalLight {
            to_light: -along,
            color: Vec3::from_array(light.color),
            intensity: light.energy * scale,
        });
    }
    Ok(lights)
}
