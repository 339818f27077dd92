//! End-to-end integration tests.
//!
//! These tests run each generator into a temporary directory and read the
//! written GLB and PNG files back.

use std::path::Path;

use scenery_gen::config::{AssetKind, AssetSpec, PipelineConfig, PreviewConfig};
use scenery_gen::consolidate::consolidate;
use scenery_gen::{Pipeline, assets};

fn export_config(kind: AssetKind, root: &Path) -> PipelineConfig {
    PipelineConfig {
        output_root: root.to_path_buf(),
        export: true,
        preview: PreviewConfig {
            enabled: false,
            ..Default::default()
        },
        ..PipelineConfig::new(AssetSpec::default_for(kind))
    }
}

/// Import the GLB and check the single-primitive layout every asset shares.
fn check_single_primitive(path: &Path, name: &str) -> (gltf::Document, Vec<gltf::buffer::Data>) {
    let (doc, buffers, _) = gltf::import(path).expect("GLB should import");

    assert_eq!(doc.meshes().count(), 1);
    assert_eq!(doc.materials().count(), 1);
    assert_eq!(doc.nodes().count(), 1);

    let node = doc.scenes().next().unwrap().nodes().next().unwrap();
    assert!(node.mesh().is_some());
    let (translation, rotation, scale) = node.transform().decomposed();
    assert_eq!(translation, [0.0, 0.0, 0.0]);
    assert_eq!(rotation, [0.0, 0.0, 0.0, 1.0]);
    assert_eq!(scale, [1.0, 1.0, 1.0]);

    let mesh = doc.meshes().next().unwrap();
    assert_eq!(mesh.name(), Some(name));
    assert_eq!(mesh.primitives().count(), 1);

    let material = doc.materials().next().unwrap();
    assert_eq!(material.name(), Some(name));
    assert!(material.double_sided());
    assert_eq!(
        material.pbr_metallic_roughness().base_color_factor(),
        [1.0, 1.0, 1.0, 1.0]
    );

    let primitive = mesh.primitives().next().unwrap();
    for semantic in [
        gltf::Semantic::Positions,
        gltf::Semantic::Normals,
        gltf::Semantic::TexCoords(0),
        gltf::Semantic::Colors(0),
    ] {
        assert!(primitive.get(&semantic).is_some(), "{name}: missing {semantic:?}");
    }

    // Ground contact at the origin, Y up.
    let bounds = primitive.bounding_box();
    assert!(bounds.min[1].abs() < 1e-5, "{name}: min Y = {}", bounds.min[1]);
    assert!(bounds.max[1] > 0.0);

    (doc, buffers)
}

#[test]
fn every_generator_exports_one_primitive() {
    let tmp = tempfile::tempdir().unwrap();
    for kind in [AssetKind::Fern, AssetKind::Tree, AssetKind::House] {
        let config = export_config(kind, tmp.path());
        let result = Pipeline::run(&config).expect("pipeline should succeed");

        let report = result.export.expect("export requested");
        assert_eq!(
            report.path,
            tmp.path()
                .join("assets/models")
                .join(format!("{}.glb", kind.file_stem()))
        );
        check_single_primitive(&report.path, kind.display_name());
    }
}

#[test]
fn fern_glb_matches_consolidated_mesh() {
    let tmp = tempfile::tempdir().unwrap();
    let config = export_config(AssetKind::Fern, tmp.path());
    Pipeline::run(&config).unwrap();

    // Triangles a fan split of the consolidated polygons produces.
    let model = assets::build_model(&config.asset).unwrap();
    assert_eq!(model.part_count(), 7, "stem and six fronds");
    let asset = consolidate(model, "Fern").unwrap();
    assert!(asset.mesh.is_baked());
    let expected: usize = asset.mesh.faces().iter().map(|f| f.len() - 2).sum();

    let (doc, buffers) = check_single_primitive(&config.export_path(), "Fern");
    let primitive = doc.meshes().next().unwrap().primitives().next().unwrap();
    let reader = primitive.reader(|b| Some(&buffers[b.index()]));
    let indices: Vec<u32> = reader.read_indices().unwrap().into_u32().collect();
    assert_eq!(indices.len() / 3, expected);

    // Every corner carries a green vertex color.
    let colors: Vec<[f32; 4]> = reader.read_colors(0).unwrap().into_rgba_f32().collect();
    assert!(!colors.is_empty());
    for [r, g, b, a] in colors {
        assert!(g > r && g > b, "not green: {r} {g} {b}");
        assert!((a - 1.0).abs() < 1e-6);
    }
}

#[test]
fn house_height_survives_export() {
    let tmp = tempfile::tempdir().unwrap();
    let config = export_config(AssetKind::House, tmp.path());
    Pipeline::run(&config).unwrap();

    let (doc, _) = check_single_primitive(&config.export_path(), "House");
    let bounds = doc
        .meshes()
        .next()
        .unwrap()
        .primitives()
        .next()
        .unwrap()
        .bounding_box();
    // Wall height 3 plus roof peak 2.
    assert!((bounds.max[1] - 5.0).abs() < 1e-4);
}

#[test]
fn compressed_export_declares_meshopt() {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = export_config(AssetKind::Tree, tmp.path());
    config.export_options.compress = true;
    Pipeline::run(&config).unwrap();

    // Validation rejects any required extension gltf-json does not know.
    let data = std::fs::read(config.export_path()).unwrap();
    let gltf = gltf::Gltf::from_slice_without_validation(&data).unwrap();
    let required: Vec<&str> = gltf.document.extensions_required().collect();
    assert_eq!(required, ["EXT_meshopt_compression"]);

    // Every view spans the decoded data its accessor reads.
    let mut accessors = 0;
    for accessor in gltf.document.accessors() {
        let view = accessor.view().unwrap();
        let needed = accessor.count() * view.stride().unwrap_or(accessor.size());
        assert!(
            view.length() >= needed,
            "accessor {}: needs {needed} bytes, view holds {}",
            accessor.index(),
            view.length()
        );
        assert!(view.offset() + view.length() <= view.buffer().length());
        assert!(view.extension_value("EXT_meshopt_compression").is_some());
        accessors += 1;
    }
    assert_eq!(accessors, 5);
}

#[test]
fn previews_are_written_without_export() {
    let tmp = tempfile::tempdir().unwrap();
    let config = PipelineConfig {
        output_root: tmp.path().to_path_buf(),
        preview: PreviewConfig {
            enabled: true,
            resolution: 32,
            samples: 1,
        },
        ..PipelineConfig::new(AssetSpec::default_for(AssetKind::Tree))
    };
    let result = Pipeline::run(&config).unwrap();

    assert!(result.export.is_none());
    assert!(!config.export_path().exists());
    assert_eq!(result.previews.len(), 2);
    for (path, view) in result.previews.iter().zip(["front", "side"]) {
        assert_eq!(*path, tmp.path().join(format!("renders/tree_{view}.png")));
        let img = image::open(path).unwrap();
        assert_eq!((img.width(), img.height()), (32, 32));
    }
}
