//! Preview scaffolding: ground, lights, cameras and their track targets.
//!
//! Nothing added here is ever exported; consolidation strips it all.

use glam::{Quat, Vec3};

use crate::error::Result;
use crate::transform::Transform;
use crate::types::{
    Camera, Color, Face, Light, LightKind, Material, Mesh, Model, ObjectKind, Part, SceneObject,
};

pub const GROUND: &str = "Ground";
pub const SUN: &str = "Sun";
pub const FILL: &str = "Fill";
pub const FILL_TARGET: &str = "FillTarget";
pub const FRONT_CAMERA: &str = "CamFront";
pub const SIDE_CAMERA: &str = "CamSide";

/// Preview views and the cameras that shoot them, in render order.
pub const VIEWS: [(&str, &str); 2] = [("front", FRONT_CAMERA), ("side", SIDE_CAMERA)];

const GROUND_COLOR: Color = Color::rgba(0.30, 0.38, 0.20, 1.0);
const GROUND_ROUGHNESS: f32 = 0.95;
const SUN_ENERGY: f32 = 3.0;
const SUN_COLOR: [f32; 3] = [1.0, 0.95, 0.85];
const FILL_COLOR: [f32; 3] = [0.7, 0.85, 1.0];

/// Per-asset placement of the preview rig.
#[derive(Debug, Clone, PartialEq)]
pub struct Staging {
    /// Edge length of the square ground plane.
    pub ground_size: f32,
    /// Sun orientation as XYZ Euler angles in degrees.
    pub sun_euler_deg: [f32; 3],
    pub fill_energy: f32,
    pub fill_size: f32,
    pub fill_location: Vec3,
    pub fill_target: Vec3,
    pub lens_mm: f32,
    pub front_camera: Vec3,
    pub side_camera: Vec3,
    /// Point both cameras look at.
    pub camera_target: Vec3,
}

impl Staging {
    /// Sun rotation, X applied first, then Y, then Z.
    pub fn sun_rotation(&self) -> Quat {
        let [x, y, z] = self.sun_euler_deg.map(f32::to_radians);
        Quat::from_rotation_z(z) * Quat::from_rotation_y(y) * Quat::from_rotation_x(x)
    }
}

/// Square ground plane at z = 0, facing up.
pub fn ground_plane(size: f32) -> Result<Mesh> {
    let h = size / 2.0;
    Mesh::new(
        vec![
            Vec3::new(-h, -h, 0.0),
            Vec3::new(h, -h, 0.0),
            Vec3::new(h, h, 0.0),
            Vec3::new(-h, h, 0.0),
        ],
        vec![Face::new([0, 1, 2, 3])],
    )
}

fn add(model: &mut Model, name: &str, kind: ObjectKind, transform: Transform) -> Result<()> {
    model.add_object(SceneObject {
        name: name.to_string(),
        kind,
        transform,
        parent: None,
    })
}

fn add_camera(model: &mut Model, name: &str, location: Vec3, staging: &Staging) -> Result<()> {
    let target = format!("{name}Target");
    model.add_empty(&target, staging.camera_target)?;
    add(
        model,
        name,
        ObjectKind::Camera(Camera {
            lens_mm: staging.lens_mm,
            track_target: Some(target),
        }),
        Transform::from_translation(location),
    )
}

/// Add ground, sun, fill light and both cameras to `model`.
pub fn stage(model: &mut Model, staging: &Staging) -> Result<()> {
    let ground_mat = model.add_material(Material::plain(GROUND, GROUND_COLOR, GROUND_ROUGHNESS)?);
    add(
        model,
        GROUND,
        ObjectKind::Ground(Part {
            mesh: ground_plane(staging.ground_size)?,
            material: ground_mat,
        }),
        Transform::IDENTITY,
    )?;

    add(
        model,
        SUN,
        ObjectKind::Light(Light {
            kind: LightKind::Sun,
            energy: SUN_ENERGY,
            color: SUN_COLOR,
            track_target: None,
        }),
        Transform {
            rotation: staging.sun_rotation(),
            ..Transform::IDENTITY
        },
    )?;

    model.add_empty(FILL_TARGET, staging.fill_target)?;
    add(
        model,
        FILL,
        ObjectKind::Light(Light {
            kind: LightKind::Area {
                size: staging.fill_size,
            },
            energy: staging.fill_energy,
            color: FILL_COLOR,
            track_target: Some(FILL_TARGET.to_string()),
        }),
        Transform::from_translation(staging.fill_location),
    )?;

    add_camera(model, FRONT_CAMERA, staging.front_camera, staging)?;
    add_camera(model, SIDE_CAMERA, staging.side_camera, staging)
}
