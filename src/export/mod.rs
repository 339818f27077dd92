//! Export adapter: turn a consolidated asset into a single-mesh GLB on disk.

pub mod glb_writer;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use bytemuck::{Pod, Zeroable};
use tracing::{debug, info};

use crate::config::ExportOptions;
use crate::consolidate::ConsolidatedAsset;
use crate::error::{Result, SceneryError};
use crate::transform::z_up_to_y_up;
use crate::types::{IndexedMesh, Material, Mesh};

pub use glb_writer::write_glb;

/// What was written by [`export_asset`].
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub path: PathBuf,
    pub bytes: usize,
    pub vertices: usize,
    pub triangles: usize,
}

/// One expanded face corner, compared bitwise during welding.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
struct ExportVertex {
    position: [f32; 3],
    normal: [f32; 3],
    uv: [f32; 2],
    color: [f32; 4],
}

impl ExportVertex {
    fn key(&self) -> [u32; 12] {
        bytemuck::cast(*self)
    }
}

/// Convert a polygon mesh into Y-up triangle buffers.
///
/// Every face corner becomes a vertex carrying its position, its normal
/// (averaged for smooth faces, the face normal for flat ones), a planar UV
/// and its baked color. Unbaked meshes take `material.base_color`. Polygons
/// are fan-triangulated, identical corners are welded and the index order is
/// optimized for the vertex cache.
pub fn prepare_indexed_mesh(mesh: &Mesh, material: &Material) -> Result<IndexedMesh> {
    let Some(bounds) = mesh.bounds().filter(|_| !mesh.is_empty()) else {
        return Err(SceneryError::Export("mesh has no faces".into()));
    };
    let size = bounds.size();
    let span_x = if size.x > f32::EPSILON { size.x } else { 1.0 };
    let span_y = if size.y > f32::EPSILON { size.y } else { 1.0 };

    let smooth_normals = if mesh.faces().iter().any(|f| f.smooth) {
        mesh.vertex_normals()
    } else {
        Vec::new()
    };
    let baked = mesh.is_baked();
    let colors = mesh.corner_colors();
    let fallback = material.base_color.to_array();

    let mut vertices: Vec<ExportVertex> = Vec::with_capacity(mesh.corner_count());
    let mut lookup: HashMap<[u32; 12], u32> = HashMap::new();
    let mut indices: Vec<u32> = Vec::new();
    let mut corner = 0usize;

    for (fi, face) in mesh.faces().iter().enumerate() {
        let flat = mesh.face_normal(fi);
        let mut ids = Vec::with_capacity(face.len());
        for &v in &face.vertices {
            let p = mesh.vertices()[v as usize];
            let n = if face.smooth { smooth_normals[v as usize] } else { flat };
            let vertex = ExportVertex {
                position: z_up_to_y_up(p).to_array(),
                normal: z_up_to_y_up(n).to_array(),
                uv: [(p.x - bounds.min.x) / span_x, 1.0 - (p.y - bounds.min.y) / span_y],
                color: if baked { colors[corner].to_array() } else { fallback },
            };
            corner += 1;

            let next = vertices.len() as u32;
            let id = *lookup.entry(vertex.key()).or_insert_with(|| {
                vertices.push(vertex);
                next
            });
            ids.push(id);
        }
        for i in 1..ids.len() - 1 {
            indices.extend_from_slice(&[ids[0], ids[i], ids[i + 1]]);
        }
    }

    let indices = meshopt::optimize_vertex_cache(&indices, vertices.len());
    debug!(
        corners = corner,
        vertices = vertices.len(),
        triangles = indices.len() / 3,
        "Prepared export buffers"
    );

    let mut out = IndexedMesh::with_capacity(vertices.len());
    for v in &vertices {
        out.push_vertex(v.position, v.normal, v.uv, v.color);
    }
    out.indices = indices;
    Ok(out)
}

/// Write `asset` as a GLB at `path`, creating parent directories.
pub fn export_asset(
    asset: &ConsolidatedAsset,
    options: &ExportOptions,
    path: &Path,
) -> Result<ExportReport> {
    let indexed = prepare_indexed_mesh(&asset.mesh, &asset.material)?;
    let glb = write_glb(&indexed, &asset.material, &asset.name, options)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, &glb)?;

    info!(
        path = %path.display(),
        bytes = glb.len(),
        vertices = indexed.vertex_count(),
        triangles = indexed.triangle_count(),
        "Exported GLB"
    );
    Ok(ExportReport {
        path: path.to_path_buf(),
        bytes: glb.len(),
        vertices: indexed.vertex_count(),
        triangles: indexed.triangle_count(),
    })
}
