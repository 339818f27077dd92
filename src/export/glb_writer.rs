use std::borrow::Cow;
use std::collections::BTreeMap;

use gltf::binary::Glb;
use gltf_json::Index;
use gltf_json::accessor::{ComponentType, GenericComponentType, Type as AccessorType};
use gltf_json::buffer::{Stride, Target};
use gltf_json::mesh::{Mode, Primitive, Semantic};
use gltf_json::validation::{Checked, USize64};

use crate::config::ExportOptions;
use crate::error::{Result, SceneryError};
use crate::types::{IndexedMesh, Material};

const MESHOPT_EXT: &str = "EXT_meshopt_compression";

/// The GLB binary chunk.
const BIN_BUFFER: u32 = 0;
/// Data-less buffer that compressed views decode into.
const FALLBACK_BUFFER: u32 = 1;

/// Bytes written so far: the binary chunk, plus the decoded size claimed in
/// the fallback buffer by meshopt-compressed views.
#[derive(Default)]
struct BufferData {
    bin: Vec<u8>,
    fallback_len: usize,
}

impl BufferData {
    /// Append `bytes` to the binary chunk at a 4-byte boundary; returns the offset.
    fn append(&mut self, bytes: &[u8]) -> usize {
        pad_to_four(&mut self.bin, 0);
        let offset = self.bin.len();
        self.bin.extend_from_slice(bytes);
        offset
    }

    /// Reserve `len` decoded bytes in the fallback buffer; returns the offset.
    fn reserve_fallback(&mut self, len: usize) -> usize {
        let offset = self.fallback_len;
        self.fallback_len = (offset + len).next_multiple_of(4);
        offset
    }
}

/// Serialize one named mesh with one material into a binary GLB (glTF 2.0).
///
/// The document holds a single scene with a single node carrying no
/// transform, one mesh with one triangle-list primitive, and one material.
/// Colors are stored as u8 normalized; indices use u16 when every vertex
/// index fits. With `options.compress` the vertex and index buffers are
/// meshopt-encoded and `EXT_meshopt_compression` is declared required: the
/// encoded bytes live in the binary chunk, while each compressed view
/// describes its decoded layout inside a second, data-less fallback buffer.
pub fn write_glb(
    mesh: &IndexedMesh,
    material: &Material,
    name: &str,
    options: &ExportOptions,
) -> Result<Vec<u8>> {
    mesh.validate().map_err(|e| match e {
        SceneryError::Export(msg) => SceneryError::Export(format!("mesh '{name}': {msg}")),
        other => other,
    })?;

    let compress = options.compress;
    let mut root = gltf_json::Root {
        asset: gltf_json::Asset {
            version: "2.0".into(),
            generator: Some(options.generator.clone()),
            ..Default::default()
        },
        ..Default::default()
    };

    let mut data = BufferData::default();
    let mut attributes = BTreeMap::new();
    let count = mesh.vertex_count();

    // --- Positions ---
    let (pos_min, pos_max) = compute_position_bounds(&mesh.positions);
    let view = write_vertex_attribute_view(
        &mut root,
        &mut data,
        bytemuck::cast_slice(&mesh.positions),
        12,
        count,
        compress.then(|| encode_f32x3(&mesh.positions)).flatten(),
    );
    let accessor = push_accessor(
        &mut root,
        view,
        count,
        ComponentType::F32,
        AccessorType::Vec3,
        false,
        Some((pos_min, pos_max)),
    );
    attributes.insert(Checked::Valid(Semantic::Positions), accessor);

    // --- Normals ---
    if mesh.has_normals() {
        let view = write_vertex_attribute_view(
            &mut root,
            &mut data,
            bytemuck::cast_slice(&mesh.normals),
            12,
            count,
            compress.then(|| encode_f32x3(&mesh.normals)).flatten(),
        );
        let accessor =
            push_accessor(&mut root, view, count, ComponentType::F32, AccessorType::Vec3, false, None);
        attributes.insert(Checked::Valid(Semantic::Normals), accessor);
    }

    // --- UVs ---
    if mesh.has_uvs() {
        let view = write_vertex_attribute_view(
            &mut root,
            &mut data,
            bytemuck::cast_slice(&mesh.uvs),
            8,
            count,
            compress.then(|| encode_f32x2(&mesh.uvs)).flatten(),
        );
        let accessor =
            push_accessor(&mut root, view, count, ComponentType::F32, AccessorType::Vec2, false, None);
        attributes.insert(Checked::Valid(Semantic::TexCoords(0)), accessor);
    }

    // --- Colors (u8 normalized) ---
    if mesh.has_colors() {
        let color_u8: Vec<u8> = mesh
            .colors
            .iter()
            .map(|&c| (c * 255.0).round().clamp(0.0, 255.0) as u8)
            .collect();
        let view = write_vertex_attribute_view(
            &mut root,
            &mut data,
            &color_u8,
            4,
            count,
            compress.then(|| encode_u8x4(&color_u8)).flatten(),
        );
        let accessor =
            push_accessor(&mut root, view, count, ComponentType::U8, AccessorType::Vec4, true, None);
        attributes.insert(Checked::Valid(Semantic::Colors(0)), accessor);
    }

    // --- Indices ---
    let use_u16 = count <= u16::MAX as usize;
    let encoded = if compress {
        meshopt::encode_index_buffer(&mesh.indices, count).ok()
    } else {
        None
    };
    let idx_view = write_index_view(&mut root, &mut data, &mesh.indices, use_u16, encoded);
    let idx_accessor = push_accessor(
        &mut root,
        idx_view,
        mesh.indices.len(),
        if use_u16 {
            ComponentType::U16
        } else {
            ComponentType::U32
        },
        AccessorType::Scalar,
        false,
        None,
    );

    let material_idx = root.push(build_material(material, name));

    let mesh_idx = root.push(gltf_json::Mesh {
        primitives: vec![Primitive {
            attributes,
            indices: Some(idx_accessor),
            material: Some(material_idx),
            mode: Checked::Valid(Mode::Triangles),
            targets: None,
            extensions: Default::default(),
            extras: Default::default(),
        }],
        weights: None,
        name: Some(name.to_string()),
        extensions: Default::default(),
        extras: Default::default(),
    });

    // Transforms are already in the vertices: the node has none.
    let node_idx = root.push(gltf_json::Node {
        mesh: Some(mesh_idx),
        name: Some(name.to_string()),
        ..Default::default()
    });

    let scene_idx = root.push(gltf_json::Scene {
        nodes: vec![node_idx],
        name: None,
        extensions: Default::default(),
        extras: Default::default(),
    });
    root.scene = Some(scene_idx);

    if compress {
        root.extensions_used.push(MESHOPT_EXT.to_string());
        root.extensions_required.push(MESHOPT_EXT.to_string());
    }

    let BufferData {
        bin: mut bin_data,
        fallback_len,
    } = data;
    pad_to_four(&mut bin_data, 0);
    root.push(gltf_json::Buffer {
        byte_length: USize64::from(bin_data.len()),
        uri: None,
        name: None,
        extensions: Default::default(),
        extras: Default::default(),
    });
    if fallback_len > 0 {
        let mut others = serde_json::Map::new();
        others.insert(MESHOPT_EXT.into(), serde_json::json!({ "fallback": true }));
        root.push(gltf_json::Buffer {
            byte_length: USize64::from(fallback_len),
            uri: None,
            name: None,
            extensions: Some(gltf_json::extensions::buffer::Buffer { others }),
            extras: Default::default(),
        });
    }

    let json_string = gltf_json::serialize::to_string(&root)
        .map_err(|e| SceneryError::Export(format!("glTF JSON serialization failed: {e}")))?;
    let mut json_bytes = json_string.into_bytes();
    // JSON chunk is padded with spaces.
    pad_to_four(&mut json_bytes, b' ');

    let glb = Glb {
        header: gltf::binary::Header {
            magic: *b"glTF",
            version: 2,
            length: (12 + 8 + json_bytes.len() + 8 + bin_data.len()) as u32,
        },
        json: Cow::Owned(json_bytes),
        bin: Some(Cow::Owned(bin_data)),
    };

    glb.to_vec()
        .map_err(|e| SceneryError::Export(format!("GLB container encoding failed: {e}")))
}

fn pad_to_four(data: &mut Vec<u8>, fill: u8) {
    while data.len() % 4 != 0 {
        data.push(fill);
    }
}

fn push_accessor(
    root: &mut gltf_json::Root,
    view: Index<gltf_json::buffer::View>,
    count: usize,
    component: ComponentType,
    type_: AccessorType,
    normalized: bool,
    bounds: Option<([f32; 3], [f32; 3])>,
) -> Index<gltf_json::Accessor> {
    root.push(gltf_json::Accessor {
        buffer_view: Some(view),
        byte_offset: Some(USize64(0)),
        count: USize64::from(count),
        component_type: Checked::Valid(GenericComponentType(component)),
        type_: Checked::Valid(type_),
        min: bounds.map(|(min, _)| serde_json::json!(min)),
        max: bounds.map(|(_, max)| serde_json::json!(max)),
        name: None,
        normalized,
        sparse: None,
        extensions: Default::default(),
        extras: Default::default(),
    })
}

fn encode_f32x3(data: &[f32]) -> Option<Vec<u8>> {
    let vertices: &[[f32; 3]] = bytemuck::cast_slice(data);
    meshopt::encode_vertex_buffer(vertices).ok()
}

fn encode_f32x2(data: &[f32]) -> Option<Vec<u8>> {
    let vertices: &[[f32; 2]] = bytemuck::cast_slice(data);
    meshopt::encode_vertex_buffer(vertices).ok()
}

fn encode_u8x4(data: &[u8]) -> Option<Vec<u8>> {
    let vertices: &[[u8; 4]] = bytemuck::cast_slice(data);
    meshopt::encode_vertex_buffer(vertices).ok()
}

fn meshopt_view_extension(
    byte_offset: usize,
    byte_length: usize,
    stride: usize,
    count: usize,
    mode: &str,
) -> gltf_json::extensions::buffer::View {
    let mut others = serde_json::Map::new();
    others.insert(
        MESHOPT_EXT.into(),
        serde_json::json!({
            "buffer": BIN_BUFFER,
            "byteOffset": byte_offset,
            "byteLength": byte_length,
            "byteStride": stride,
            "count": count,
            "mode": mode
        }),
    );
    gltf_json::extensions::buffer::View { others }
}

/// Where a view's bytes live and what its extension says about them.
struct ViewPlacement {
    buffer: u32,
    byte_offset: usize,
    extensions: Option<gltf_json::extensions::buffer::View>,
}

/// Place `decoded_len` bytes of view data. Uncompressed data goes straight
/// into the binary chunk; with `encoded`, the encoded bytes go there and the
/// decoded range is reserved in the fallback buffer.
fn place_view(
    data: &mut BufferData,
    raw: impl FnOnce() -> Vec<u8>,
    decoded_len: usize,
    encoded: Option<Vec<u8>>,
    stride: usize,
    count: usize,
    mode: &str,
) -> ViewPlacement {
    match encoded {
        Some(encoded) => {
            let encoded_offset = data.append(&encoded);
            ViewPlacement {
                buffer: FALLBACK_BUFFER,
                byte_offset: data.reserve_fallback(decoded_len),
                extensions: Some(meshopt_view_extension(
                    encoded_offset,
                    encoded.len(),
                    stride,
                    count,
                    mode,
                )),
            }
        }
        None => ViewPlacement {
            buffer: BIN_BUFFER,
            byte_offset: data.append(&raw()),
            extensions: None,
        },
    }
}

/// Append one vertex attribute and describe it.
///
/// The view always carries the decoded length and stride; `encoded` holds
/// the meshopt-encoded bytes when compressing.
fn write_vertex_attribute_view(
    root: &mut gltf_json::Root,
    data: &mut BufferData,
    raw_bytes: &[u8],
    stride: usize,
    vertex_count: usize,
    encoded: Option<Vec<u8>>,
) -> Index<gltf_json::buffer::View> {
    let decoded_len = stride * vertex_count;
    let placement = place_view(
        data,
        || raw_bytes.to_vec(),
        decoded_len,
        encoded,
        stride,
        vertex_count,
        "ATTRIBUTES",
    );

    root.push(gltf_json::buffer::View {
        buffer: Index::new(placement.buffer),
        byte_length: USize64::from(decoded_len),
        byte_offset: Some(USize64::from(placement.byte_offset)),
        byte_stride: Some(Stride(stride)),
        name: None,
        target: Some(Checked::Valid(Target::ArrayBuffer)),
        extensions: placement.extensions,
        extras: Default::default(),
    })
}

fn write_index_view(
    root: &mut gltf_json::Root,
    data: &mut BufferData,
    indices: &[u32],
    use_u16: bool,
    encoded: Option<Vec<u8>>,
) -> Index<gltf_json::buffer::View> {
    let index_size = if use_u16 { 2 } else { 4 };
    let decoded_len = indices.len() * index_size;
    let raw = || -> Vec<u8> {
        if use_u16 {
            let narrow: Vec<u16> = indices.iter().map(|&i| i as u16).collect();
            bytemuck::cast_slice(&narrow).to_vec()
        } else {
            bytemuck::cast_slice(indices).to_vec()
        }
    };
    let placement = place_view(
        data,
        raw,
        decoded_len,
        encoded,
        index_size,
        indices.len(),
        "TRIANGLES",
    );

    root.push(gltf_json::buffer::View {
        buffer: Index::new(placement.buffer),
        byte_length: USize64::from(decoded_len),
        byte_offset: Some(USize64::from(placement.byte_offset)),
        byte_stride: None,
        name: None,
        target: Some(Checked::Valid(Target::ElementArrayBuffer)),
        extensions: placement.extensions,
        extras: Default::default(),
    })
}

/// Double-sided opaque material. A vertex-color material exports a white base
/// color factor so `COLOR_0` shows through unmodified.
fn build_material(material: &Material, name: &str) -> gltf_json::Material {
    let base_color = if material.vertex_color {
        [1.0; 4]
    } else {
        material.base_color.to_array()
    };

    gltf_json::Material {
        pbr_metallic_roughness: gltf_json::material::PbrMetallicRoughness {
            base_color_factor: gltf_json::material::PbrBaseColorFactor(base_color),
            metallic_factor: gltf_json::material::StrengthFactor(0.0),
            roughness_factor: gltf_json::material::StrengthFactor(material.roughness),
            base_color_texture: None,
            metallic_roughness_texture: None,
            extensions: Default::default(),
            extras: Default::default(),
        },
        alpha_mode: Checked::Valid(gltf_json::material::AlphaMode::Opaque),
        alpha_cutoff: None,
        double_sided: true,
        normal_texture: None,
        occlusion_texture: None,
        emissive_texture: None,
        emissive_factor: gltf_json::material::EmissiveFactor([0.0, 0.0, 0.0]),
        name: Some(name.to_string()),
        extensions: Default::default(),
        extras: Default::default(),
    }
}

/// Min/max of a flat `[x, y, z, ...]` array.
fn compute_position_bounds(positions: &[f32]) -> ([f32; 3], [f32; 3]) {
    let mut min = [f32::INFINITY; 3];
    let mut max = [f32::NEG_INFINITY; 3];

    for chunk in positions.chunks_exact(3) {
        for i in 0..3 {
            min[i] = min[i].min(chunk[i]);
            max[i] = max[i].max(chunk[i]);
        }
    }

    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    fn material() -> Material {
        Material::new("Fern", Color::rgba(0.2, 0.45, 0.15, 1.0), 0.9).unwrap()
    }

    fn make_triangle() -> IndexedMesh {
        IndexedMesh {
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            normals: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            uvs: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            colors: vec![
                1.0, 0.0, 0.0, 1.0, //
                0.0, 1.0, 0.0, 1.0, //
                0.0, 0.0, 1.0, 1.0, //
            ],
            indices: vec![0, 1, 2],
        }
    }

    fn grid(n: usize) -> IndexedMesh {
        let side = n + 1;
        let mut mesh = IndexedMesh::default();
        for y in 0..side {
            for x in 0..side {
                let (fx, fy) = (x as f32 / n as f32, y as f32 / n as f32);
                mesh.positions.extend_from_slice(&[fx, 0.0, fy]);
                mesh.normals.extend_from_slice(&[0.0, 1.0, 0.0]);
                mesh.uvs.extend_from_slice(&[fx, fy]);
                mesh.colors.extend_from_slice(&[0.2, 0.45, 0.15, 1.0]);
            }
        }
        for y in 0..n {
            for x in 0..n {
                let tl = (y * side + x) as u32;
                let bl = tl + side as u32;
                mesh.indices.extend_from_slice(&[tl, bl, tl + 1, tl + 1, bl, bl + 1]);
            }
        }
        mesh
    }

    fn write(mesh: &IndexedMesh, compress: bool) -> Vec<u8> {
        let options = ExportOptions {
            compress,
            ..ExportOptions::default()
        };
        write_glb(mesh, &material(), "Fern", &options).unwrap()
    }

    #[test]
    fn glb_header() {
        let bytes = write(&make_triangle(), false);
        assert_eq!(&bytes[0..4], b"glTF");
        let version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        assert_eq!(version, 2);
        let length = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
        assert_eq!(length as usize, bytes.len());
    }

    #[test]
    fn glb_roundtrip_attributes() {
        let bytes = write(&make_triangle(), false);
        let (doc, _buffers, _images) = gltf::import_slice(&bytes).expect("GLB should import");

        let prim = doc.meshes().next().unwrap().primitives().next().unwrap();
        assert_eq!(prim.get(&Semantic::Positions).unwrap().count(), 3);
        assert!(prim.get(&Semantic::Normals).is_some());
        assert!(prim.get(&Semantic::TexCoords(0)).is_some());

        let colors = prim.get(&Semantic::Colors(0)).unwrap();
        assert_eq!(colors.data_type(), gltf::accessor::DataType::U8);
        assert!(colors.normalized());
        assert_eq!(prim.indices().unwrap().data_type(), gltf::accessor::DataType::U16);
    }

    #[test]
    fn single_named_node_without_transform() {
        let bytes = write(&make_triangle(), false);
        let (doc, _, _) = gltf::import_slice(&bytes).unwrap();

        assert_eq!(doc.nodes().count(), 1);
        assert_eq!(doc.meshes().count(), 1);
        let node = doc.nodes().next().unwrap();
        assert_eq!(node.name(), Some("Fern"));
        let (t, r, s) = node.transform().decomposed();
        assert_eq!(t, [0.0, 0.0, 0.0]);
        assert_eq!(r, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(s, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn vertex_color_material_is_white_and_double_sided() {
        let bytes = write(&make_triangle(), false);
        let (doc, _, _) = gltf::import_slice(&bytes).unwrap();

        assert_eq!(doc.materials().count(), 1);
        let mat = doc.materials().next().unwrap();
        assert_eq!(mat.name(), Some("Fern"));
        assert!(mat.double_sided());
        let pbr = mat.pbr_metallic_roughness();
        assert_eq!(pbr.base_color_factor(), [1.0, 1.0, 1.0, 1.0]);
        assert!((pbr.roughness_factor() - 0.9).abs() < 1e-6);
        assert_eq!(pbr.metallic_factor(), 0.0);
    }

    #[test]
    fn plain_material_keeps_base_color() {
        let plain = Material::plain("Ground", Color::rgba(0.3, 0.38, 0.2, 1.0), 0.95).unwrap();
        let bytes = write_glb(&make_triangle(), &plain, "Ground", &ExportOptions::default()).unwrap();
        let (doc, _, _) = gltf::import_slice(&bytes).unwrap();
        let color = doc.materials().next().unwrap().pbr_metallic_roughness().base_color_factor();
        assert!((color[0] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn position_bounds_recorded() {
        let bytes = write(&grid(4), false);
        let (doc, _, _) = gltf::import_slice(&bytes).unwrap();
        let prim = doc.meshes().next().unwrap().primitives().next().unwrap();
        let bb = prim.bounding_box();
        assert_eq!(bb.min, [0.0, 0.0, 0.0]);
        assert_eq!(bb.max, [1.0, 0.0, 1.0]);
    }

    #[test]
    fn grid_roundtrip_counts() {
        let mesh = grid(10);
        let bytes = write(&mesh, false);
        let (doc, buffers, _) = gltf::import_slice(&bytes).unwrap();
        let prim = doc.meshes().next().unwrap().primitives().next().unwrap();
        let reader = prim.reader(|buf| Some(&buffers[buf.index()]));

        assert_eq!(reader.read_positions().unwrap().count(), 121);
        assert_eq!(reader.read_indices().unwrap().into_u32().count(), 600);
        let first = reader.read_colors(0).unwrap().into_rgba_u8().next().unwrap();
        assert_eq!(first, [51, 115, 38, 255]);
    }

    #[test]
    fn empty_mesh_is_an_export_error() {
        let err = write_glb(&IndexedMesh::default(), &material(), "Fern", &ExportOptions::default())
            .unwrap_err();
        assert!(matches!(err, SceneryError::Export(_)));
    }

    #[test]
    fn ragged_index_list_rejected() {
        let mut mesh = make_triangle();
        mesh.indices.push(0);
        assert!(write_glb(&mesh, &material(), "Fern", &ExportOptions::default()).is_err());
    }

    #[test]
    fn generator_written_to_asset() {
        let options = ExportOptions {
            generator: "test-gen".into(),
            ..ExportOptions::default()
        };
        let bytes = write_glb(&make_triangle(), &material(), "Fern", &options).unwrap();
        let glb = Glb::from_slice(&bytes).unwrap();
        let json = std::str::from_utf8(&glb.json).unwrap();
        assert!(json.contains("\"generator\":\"test-gen\""));
    }

    #[test]
    fn compressed_declares_extension_and_shrinks() {
        let mesh = grid(20);
        let plain = write(&mesh, false);
        let compressed = write(&mesh, true);

        let glb = Glb::from_slice(&compressed).unwrap();
        let json = std::str::from_utf8(&glb.json).unwrap();
        assert!(json.contains(MESHOPT_EXT));
        assert!(
            compressed.len() < plain.len(),
            "compressed ({}) should be smaller than uncompressed ({})",
            compressed.len(),
            plain.len()
        );
    }

    #[test]
    fn compressed_views_describe_decoded_layout() {
        let mesh = grid(20);
        let bytes = write(&mesh, true);
        let gltf = gltf::Gltf::from_slice_without_validation(&bytes).unwrap();
        let doc = &gltf.document;

        let buffers: Vec<_> = doc.buffers().collect();
        assert_eq!(buffers.len(), 2);
        assert_eq!(
            buffers[1].extension_value(MESHOPT_EXT),
            Some(&serde_json::json!({ "fallback": true }))
        );
        let bin_len = buffers[0].length();
        assert_eq!(bin_len, gltf.blob.as_ref().unwrap().len());

        for accessor in doc.accessors() {
            let view = accessor.view().unwrap();
            let needed = accessor.count() * view.stride().unwrap_or(accessor.size());
            assert!(
                view.length() >= needed,
                "accessor {} needs {needed} bytes, view has {}",
                accessor.index(),
                view.length()
            );
            assert_eq!(view.buffer().index(), FALLBACK_BUFFER as usize);
            assert!(view.offset() + view.length() <= buffers[1].length());

            let ext = view.extension_value(MESHOPT_EXT).unwrap();
            let start = ext["byteOffset"].as_u64().unwrap() as usize;
            let len = ext["byteLength"].as_u64().unwrap() as usize;
            assert_eq!(ext["buffer"], 0);
            assert_eq!(ext["count"].as_u64().unwrap() as usize, accessor.count());
            assert!(start + len <= bin_len);
        }

        let positions = doc.accessors().next().unwrap().view().unwrap();
        assert_eq!(positions.stride(), Some(12));
        assert_eq!(positions.length(), 12 * mesh.vertex_count());
    }

    #[test]
    fn uncompressed_export_has_single_buffer() {
        let bytes = write(&grid(4), false);
        let gltf = gltf::Gltf::from_slice(&bytes).unwrap();
        assert_eq!(gltf.document.buffers().count(), 1);
        for view in gltf.document.views() {
            assert!(view.extension_value(MESHOPT_EXT).is_none());
            assert_eq!(view.buffer().index(), BIN_BUFFER as usize);
        }
    }

    #[test]
    fn position_bounds_correct() {
        let positions = vec![
            -1.0, 0.0, 2.0, //
            3.0, -4.0, 5.0, //
            0.0, 1.0, -3.0, //
        ];
        let (min, max) = compute_position_bounds(&positions);
        assert_eq!(min, [-1.0, -4.0, -3.0]);
        assert_eq!(max, [3.0, 1.0, 5.0]);
    }
}
