//! Export-time consolidation: strip scaffolding, merge every part into one
//! mesh with one material and put the ground-contact point at z = 0.

use glam::{Affine3A, Vec3};
use tracing::{debug, info};

use crate::error::{Result, SceneryError};
use crate::transform::{apply_affine, translate};
use crate::types::{Color, Material, Mesh, Model, ObjectKind};

/// The single mesh + material that gets exported.
#[derive(Debug, Clone)]
pub struct ConsolidatedAsset {
    pub name: String,
    /// World-space geometry with all part transforms applied.
    pub mesh: Mesh,
    pub material: Material,
}

/// Consume `model` and produce its exportable asset named `name`.
///
/// Part transforms (parents included) are baked into the vertices before the
/// meshes are appended in object order. The first part's material is kept and
/// renamed to `name`. Parts without baked colors are filled white.
pub fn consolidate(model: Model, name: &str) -> Result<ConsolidatedAsset> {
    // Resolve world transforms while parents and empties still exist.
    let mut worlds: Vec<Affine3A> = Vec::with_capacity(model.part_count());
    for (object, _) in model.parts() {
        worlds.push(model.world_transform(&object.name)?);
    }

    let Model {
        materials, objects, ..
    } = model;
    let total = objects.len();
    let parts: Vec<_> = objects
        .into_iter()
        .filter_map(|o| match o.kind {
            ObjectKind::Part(part) => Some((o.name, part)),
            _ => None,
        })
        .collect();
    debug!(removed = total - parts.len(), "Stripped scaffolding objects");

    let Some((_, first)) = parts.first() else {
        return Err(SceneryError::Consolidation(format!(
            "no mesh parts left in '{name}' after removing scaffolding; nothing to export"
        )));
    };
    let mut material = materials.get(first.material.0).cloned().ok_or_else(|| {
        SceneryError::Consolidation(format!("unknown material {}", first.material.0))
    })?;
    material.name = name.to_string();

    let mut merged = Mesh::default();
    for ((part_name, part), world) in parts.into_iter().zip(worlds) {
        let mut mesh = part.mesh;
        apply_affine(&mut mesh, &world);
        debug!(part = %part_name, vertices = mesh.vertex_count(), "Merging part");
        merged.append(mesh, Color::WHITE);
    }

    if let Some((z_min, _)) = merged.z_range() {
        translate(&mut merged, Vec3::new(0.0, 0.0, -z_min));
    }

    info!(
        asset = name,
        vertices = merged.vertex_count(),
        faces = merged.face_count(),
        "Consolidated model"
    );

    Ok(ConsolidatedAsset {
        name: name.to_string(),
        mesh: merged,
        material,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{self, FernParams, TreeParams};
    use crate::bake::bake_solid;
    use crate::config::AssetSpec;
    use crate::transform::Transform;
    use crate::types::Face;

    fn tri(z: f32) -> Mesh {
        Mesh::new(
            vec![Vec3::new(0.0, 0.0, z), Vec3::new(1.0, 0.0, z), Vec3::new(0.0, 1.0, z + 1.0)],
            vec![Face::new([0, 1, 2])],
        )
        .unwrap()
    }

    #[test]
    fn counts_are_sums_of_parts() {
        let model = assets::build_model(&AssetSpec::Fern(FernParams::default())).unwrap();
        let (verts, faces) = model.parts().fold((0, 0), |(v, f), (_, p)| {
            (v + p.mesh.vertex_count(), f + p.mesh.face_count())
        });

        let asset = consolidate(model, "Fern").unwrap();
        assert_eq!(asset.mesh.vertex_count(), verts);
        assert_eq!(asset.mesh.face_count(), faces);
        assert!(asset.mesh.is_baked());
        assert_eq!(asset.material.name, "Fern");
    }

    #[test]
    fn origin_reset_puts_min_z_at_zero() {
        let mut model = Model::new("Floating");
        let mat = model.add_material(Material::new("M", Color::WHITE, 0.9).unwrap());
        model
            .add_part("A", tri(2.0), mat, Transform::from_translation(Vec3::new(3.0, 0.0, 1.5)))
            .unwrap();
        model.add_part("B", tri(4.0), mat, Transform::IDENTITY).unwrap();

        let asset = consolidate(model, "Floating").unwrap();
        let bb = asset.mesh.bounds().unwrap();
        assert_eq!(bb.min.z, 0.0);
        // Horizontal placement is kept.
        assert_eq!(bb.max.x, 4.0);
    }

    #[test]
    fn parented_parts_use_world_transforms() {
        let params = TreeParams::default();
        let model = assets::build_model(&AssetSpec::Tree(params.clone())).unwrap();
        let asset = consolidate(model, "Tree").unwrap();

        let (zmin, zmax) = asset.mesh.z_range().unwrap();
        assert_eq!(zmin, 0.0);
        let canopy_top = params.canopy_center() + 0.9 + 1.6 * 0.75;
        assert!((zmax - canopy_top).abs() < 1e-3, "zmax {zmax} vs {canopy_top}");
    }

    #[test]
    fn first_material_is_retained() {
        let mut model = Model::new("Pair");
        let red = model
            .add_material(Material::new("Red", Color::rgba(1.0, 0.0, 0.0, 1.0), 0.9).unwrap());
        let blue = model
            .add_material(Material::new("Blue", Color::rgba(0.0, 0.0, 1.0, 1.0), 0.5).unwrap());
        let mut a = tri(0.0);
        bake_solid(&mut a, Color::rgba(1.0, 0.0, 0.0, 1.0)).unwrap();
        model.add_part("A", a, red, Transform::IDENTITY).unwrap();
        model.add_part("B", tri(0.0), blue, Transform::IDENTITY).unwrap();

        let asset = consolidate(model, "Pair").unwrap();
        assert_eq!(asset.material.name, "Pair");
        assert_eq!(asset.material.base_color, Color::rgba(1.0, 0.0, 0.0, 1.0));
        // Unbaked part B was padded white.
        assert_eq!(asset.mesh.corner_color(1, 0), Some(Color::WHITE));
    }

    #[test]
    fn scaffolding_only_model_fails() {
        let mut model = Model::new("Empty");
        model.add_empty("CamFrontTarget", Vec3::Z).unwrap();
        let err = consolidate(model, "Empty").unwrap_err();
        assert!(matches!(err, SceneryError::Consolidation(_)));
        assert!(err.to_string().contains("nothing to export"));
    }
}
