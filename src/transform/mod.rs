pub mod axes;

use glam::{Affine3A, Quat, Vec3};

use crate::types::Mesh;

pub use axes::{rotate_about_z, z_up_to_y_up};

/// Translation / rotation / per-axis scale of a part, composed as T * R * S.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    pub fn from_affine(affine: &Affine3A) -> Self {
        let (scale, rotation, translation) = affine.to_scale_rotation_translation();
        Self {
            translation,
            rotation,
            scale,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.translation.abs_diff_eq(Vec3::ZERO, 1e-6)
            && self.rotation.abs_diff_eq(Quat::IDENTITY, 1e-6)
            && self.scale.abs_diff_eq(Vec3::ONE, 1e-6)
    }
}

/// Bake an affine transform into the mesh's vertex positions.
///
/// A mirroring transform (negative determinant) also flips face winding so
/// normals keep pointing outward.
pub fn apply_affine(mesh: &mut Mesh, affine: &Affine3A) {
    for v in mesh.vertices_mut() {
        *v = affine.transform_point3(*v);
    }
    if affine.matrix3.determinant() < 0.0 {
        mesh.flip_winding();
    }
}

/// Translate every vertex by `offset`.
pub fn translate(mesh: &mut Mesh, offset: Vec3) {
    for v in mesh.vertices_mut() {
        *v += offset;
    }
}
