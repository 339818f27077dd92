use glam::Vec3;

use crate::assets::staging::{Staging, stage};
use crate::bake::ColorBake;
use crate::builders::{
    BlobClusterParams, RadialSolidParams, Spheroid, blob_cluster, tapered_radial_solid,
};
use crate::compose::{PartRecipe, add_part, canopy_center_height};
use crate::error::Result;
use crate::transform::Transform;
use crate::types::{Color, DEFAULT_ROUGHNESS, Material, Model};

/// Stylized deciduous tree: tapered trunk topped by a cluster of squashed blobs.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeParams {
    pub trunk_base_radius: f32,
    pub trunk_top_radius: f32,
    pub trunk_height: f32,
    pub trunk_sides: u32,
    pub trunk_color: Color,
    pub canopy_main_radius: f32,
    pub canopy_squash: f32,
    pub canopy_subdivisions: u32,
    /// Fraction of the squashed main radius the canopy centre sits above the trunk top.
    pub canopy_lift: f32,
    pub canopy_blobs: Vec<Spheroid>,
    pub canopy_color: Color,
    pub roughness: f32,
}

fn blob(x: f32, y: f32, z: f32, radius: f32, squash: f32) -> Spheroid {
    Spheroid {
        offset: Vec3::new(x, y, z),
        radius,
        squash,
    }
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            trunk_base_radius: 0.40,
            trunk_top_radius: 0.18,
            trunk_height: 7.0,
            trunk_sides: 8,
            trunk_color: Color::rgba(0.35, 0.22, 0.12, 1.0),
            canopy_main_radius: 3.0,
            canopy_squash: 0.70,
            canopy_subdivisions: 1,
            canopy_lift: 0.35,
            canopy_blobs: vec![
                blob(1.6, 0.6, -0.6, 2.0, 0.65),
                blob(-1.4, 1.2, -0.3, 2.2, 0.70),
                blob(0.4, -1.7, 0.3, 1.9, 0.60),
                blob(-0.9, -1.0, 0.9, 1.6, 0.75),
            ],
            canopy_color: Color::rgba(0.16, 0.40, 0.18, 1.0),
            roughness: DEFAULT_ROUGHNESS,
        }
    }
}

impl TreeParams {
    /// Trunk centred on its own origin; the part transform lifts it onto the ground.
    pub fn trunk(&self) -> RadialSolidParams {
        RadialSolidParams {
            base_radius: self.trunk_base_radius,
            top_radius: self.trunk_top_radius,
            height: self.trunk_height,
            sides: self.trunk_sides,
            base_z: -self.trunk_height / 2.0,
        }
    }

    pub fn canopy(&self) -> BlobClusterParams {
        BlobClusterParams {
            main_radius: self.canopy_main_radius,
            main_squash: self.canopy_squash,
            satellites: self.canopy_blobs.clone(),
            subdivisions: self.canopy_subdivisions,
        }
    }

    pub fn canopy_center(&self) -> f32 {
        canopy_center_height(
            self.trunk_height,
            self.canopy_main_radius,
            self.canopy_squash,
            self.canopy_lift,
        )
    }

    pub fn staging(&self) -> Staging {
        Staging {
            ground_size: 30.0,
            sun_euler_deg: [45.0, 10.0, 30.0],
            fill_energy: 50.0,
            fill_size: 8.0,
            fill_location: Vec3::new(-8.0, 6.0, 5.0),
            fill_target: Vec3::new(0.0, 0.0, self.trunk_height * 0.5),
            lens_mm: 50.0,
            front_camera: Vec3::new(11.0, -9.0, 7.0),
            side_camera: Vec3::new(-4.0, -13.0, 5.0),
            camera_target: Vec3::new(0.0, 0.0, self.trunk_height * 0.55),
        }
    }

    pub fn summary(&self) -> Vec<String> {
        vec![
            format!(
                "Trunk: tapered {}-sided, base_r={}m, top_r={}m, h={}m",
                self.trunk_sides, self.trunk_base_radius, self.trunk_top_radius, self.trunk_height
            ),
            format!(
                "Canopy: {} blobs, main_r={}m, squash={}",
                1 + self.canopy_blobs.len(),
                self.canopy_main_radius,
                self.canopy_squash
            ),
        ]
    }
}

/// Build the tree. The canopy is parented to the trunk, keeping its placement.
pub fn build(params: &TreeParams) -> Result<Model> {
    let mut model = Model::new("Tree");
    let trunk_mat =
        model.add_material(Material::new("Trunk", params.trunk_color, params.roughness)?);
    let canopy_mat =
        model.add_material(Material::new("Canopy", params.canopy_color, params.roughness)?);

    let trunk = tapered_radial_solid(&params.trunk())?;
    add_part(
        &mut model,
        PartRecipe::new("Trunk", trunk, ColorBake::Solid(params.trunk_color), trunk_mat)
            .with_transform(Transform::from_translation(Vec3::new(
                0.0,
                0.0,
                params.trunk_height / 2.0,
            )))
            .smooth(),
    )?;

    let canopy = blob_cluster(&params.canopy())?;
    add_part(
        &mut model,
        PartRecipe::new("Canopy", canopy, ColorBake::Solid(params.canopy_color), canopy_mat)
            .with_transform(Transform::from_translation(Vec3::new(
                0.0,
                0.0,
                params.canopy_center(),
            ))),
    )?;
    model.set_parent("Canopy", "Trunk")?;

    stage(&mut model, &params.staging())?;
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tree_parts() {
        let model = build(&TreeParams::default()).unwrap();
        assert_eq!(model.part_count(), 2);

        let (_, canopy) = model.parts().find(|(o, _)| o.name == "Canopy").unwrap();
        assert_eq!(canopy.mesh.vertex_count(), 5 * 42);
        assert_eq!(canopy.mesh.face_count(), 5 * 80);
    }

    #[test]
    fn canopy_parented_to_trunk_keeps_height() {
        let params = TreeParams::default();
        let model = build(&params).unwrap();

        let canopy = model.get("Canopy").unwrap();
        assert_eq!(canopy.parent.as_deref(), Some("Trunk"));
        // Local offset is relative to the trunk's centre at h/2.
        assert!((canopy.transform.translation.z - (params.canopy_center() - 3.5)).abs() < 1e-5);
        let world = model.world_position("Canopy").unwrap();
        assert!((world.z - params.canopy_center()).abs() < 1e-5);
    }

    #[test]
    fn trunk_spans_ground_to_height() {
        let params = TreeParams::default();
        let model = build(&params).unwrap();
        let (object, trunk) = model.parts().find(|(o, _)| o.name == "Trunk").unwrap();
        let (zmin, zmax) = trunk.mesh.z_range().unwrap();
        let lift = object.transform.translation.z;
        assert!((zmin + lift).abs() < 1e-6);
        assert!((zmax + lift - 7.0).abs() < 1e-6);
        assert!(trunk.mesh.faces().iter().all(|f| f.smooth));
    }

    #[test]
    fn invalid_blob_fails() {
        let mut params = TreeParams::default();
        params.canopy_blobs[1].squash = 0.0;
        assert!(build(&params).is_err());
    }

    #[test]
    fn summary_counts_blobs() {
        let lines = TreeParams::default().summary();
        assert_eq!(lines[1], "Canopy: 5 blobs, main_r=3m, squash=0.7");
    }
}
