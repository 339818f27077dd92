use glam::{Affine3A, Vec3};

use crate::builders::{require_finite, require_positive};
use crate::error::{Result, SceneryError};
use crate::transform::apply_affine;
use crate::types::{Face, Mesh};

/// Axis-aligned box: `width` along X, `depth` along Y, `height` along Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxParams {
    pub width: f32,
    pub depth: f32,
    pub height: f32,
    pub center: Vec3,
}

impl BoxParams {
    pub fn size(&self) -> Vec3 {
        Vec3::new(self.width, self.depth, self.height)
    }
}

const UNIT_CORNERS: [Vec3; 8] = [
    Vec3::new(-0.5, -0.5, -0.5),
    Vec3::new(0.5, -0.5, -0.5),
    Vec3::new(0.5, 0.5, -0.5),
    Vec3::new(-0.5, 0.5, -0.5),
    Vec3::new(-0.5, -0.5, 0.5),
    Vec3::new(0.5, -0.5, 0.5),
    Vec3::new(0.5, 0.5, 0.5),
    Vec3::new(-0.5, 0.5, 0.5),
];

const UNIT_FACES: [[u32; 4]; 6] = [
    [0, 3, 2, 1], // -Z
    [4, 5, 6, 7], // +Z
    [0, 1, 5, 4], // -Y
    [1, 2, 6, 5], // +X
    [2, 3, 7, 6], // +Y
    [3, 0, 4, 7], // -X
];

/// Build the unit cube scaled per axis, with the scale baked into the
/// vertex coordinates, centred on `params.center`.
pub fn box_mesh(params: &BoxParams) -> Result<Mesh> {
    require_positive("box width", params.width)?;
    require_positive("box depth", params.depth)?;
    require_positive("box height", params.height)?;
    if !params.center.is_finite() {
        return Err(SceneryError::Parameter(format!(
            "box center must be finite, got {}",
            params.center
        )));
    }

    let size = params.size();
    let vertices = UNIT_CORNERS
        .iter()
        .map(|c| *c * size + params.center)
        .collect();
    let faces = UNIT_FACES.iter().map(|f| Face::new(*f)).collect();

    Mesh::new(vertices, faces)
}

/// Rotate a mesh about the vertical axis through its bounding-box centre,
/// then move that centre to `new_center`.
///
/// The geometry is already in final local coordinates, so a non-uniform box
/// keeps its own width/depth and only its world-axis extents swap.
pub fn rotate_and_recenter(mesh: &mut Mesh, radians: f32, new_center: Vec3) -> Result<()> {
    require_finite("rotation", radians)?;
    let pivot = mesh
        .bounds()
        .ok_or_else(|| SceneryError::Parameter("cannot rotate an empty mesh".into()))?
        .center();

    let affine = Affine3A::from_translation(new_center)
        * Affine3A::from_rotation_z(radians)
        * Affine3A::from_translation(-pivot);
    apply_affine(mesh, &affine);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::test_support::assert_outward;
    use std::f32::consts::FRAC_PI_2;

    fn door() -> BoxParams {
        BoxParams {
            width: 0.9,
            depth: 0.1,
            height: 2.2,
            center: Vec3::new(0.0, 2.05, 1.1),
        }
    }

    #[test]
    fn box_topology_and_extent() {
        let mesh = box_mesh(&door()).unwrap();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.face_count(), 6);

        let bb = mesh.bounds().unwrap();
        assert!(bb.size().abs_diff_eq(Vec3::new(0.9, 0.1, 2.2), 1e-6));
        assert!(bb.center().abs_diff_eq(Vec3::new(0.0, 2.05, 1.1), 1e-6));
    }

    #[test]
    fn box_faces_outward() {
        assert_outward(&box_mesh(&door()).unwrap());
    }

    #[test]
    fn rotated_box_swaps_world_extents() {
        let mut mesh = box_mesh(&door()).unwrap();
        let before = mesh.bounds().unwrap().size();

        rotate_and_recenter(&mut mesh, FRAC_PI_2, Vec3::new(2.55, 0.0, 1.1)).unwrap();

        let bb = mesh.bounds().unwrap();
        assert!((bb.size().x - before.y).abs() < 1e-5);
        assert!((bb.size().y - before.x).abs() < 1e-5);
        assert!((bb.size().z - before.z).abs() < 1e-5);
        assert!(bb.center().abs_diff_eq(Vec3::new(2.55, 0.0, 1.1), 1e-5));
        assert_outward(&mesh);
    }

    #[test]
    fn invalid_parameters() {
        assert!(box_mesh(&BoxParams { width: 0.0, ..door() }).is_err());
        assert!(box_mesh(&BoxParams { height: -2.0, ..door() }).is_err());
        assert!(
            box_mesh(&BoxParams {
                center: Vec3::new(f32::NAN, 0.0, 0.0),
                ..door()
            })
            .is_err()
        );
        let mut empty = Mesh::default();
        assert!(rotate_and_recenter(&mut empty, 1.0, Vec3::ZERO).is_err());
    }
}
