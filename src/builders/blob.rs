use std::collections::HashMap;

use glam::Vec3;

use crate::builders::require_positive;
use crate::error::{Result, SceneryError};
use crate::types::{Color, Face, Mesh};

/// Highest accepted subdivision level (20 · 4^6 = 81 920 triangles per sphere).
pub const MAX_SUBDIVISIONS: u32 = 6;

/// One sphere of a blob cluster, squashed along Z about its own centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spheroid {
    /// Centre relative to the main sphere's centre.
    pub offset: Vec3,
    pub radius: f32,
    /// Vertical scale factor (1 = round).
    pub squash: f32,
}

/// Canopy-style cluster: a main spheroid at the local origin plus satellites.
#[derive(Debug, Clone, PartialEq)]
pub struct BlobClusterParams {
    pub main_radius: f32,
    pub main_squash: f32,
    pub satellites: Vec<Spheroid>,
    /// Midpoint-subdivision passes applied to the base icosahedron.
    pub subdivisions: u32,
}

impl BlobClusterParams {
    /// All spheroids, main first.
    pub fn spheroids(&self) -> impl Iterator<Item = Spheroid> + '_ {
        std::iter::once(Spheroid {
            offset: Vec3::ZERO,
            radius: self.main_radius,
            squash: self.main_squash,
        })
        .chain(self.satellites.iter().copied())
    }
}

const T: f32 = 1.618_034; // golden ratio

const ICOSAHEDRON_VERTS: [[f32; 3]; 12] = [
    [-1.0, T, 0.0],
    [1.0, T, 0.0],
    [-1.0, -T, 0.0],
    [1.0, -T, 0.0],
    [0.0, -1.0, T],
    [0.0, 1.0, T],
    [0.0, -1.0, -T],
    [0.0, 1.0, -T],
    [T, 0.0, -1.0],
    [T, 0.0, 1.0],
    [-T, 0.0, -1.0],
    [-T, 0.0, 1.0],
];

const ICOSAHEDRON_FACES: [[u32; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Unit-radius icosphere centred on the origin.
///
/// Level 0 is the icosahedron (12 vertices, 20 faces); each level splits every
/// triangle into four, sharing edge midpoints between neighbours.
pub fn icosphere(subdivisions: u32) -> Result<Mesh> {
    if subdivisions > MAX_SUBDIVISIONS {
        return Err(SceneryError::Parameter(format!(
            "icosphere subdivisions must be <= {MAX_SUBDIVISIONS}, got {subdivisions}"
        )));
    }

    let mut vertices: Vec<Vec3> = ICOSAHEDRON_VERTS
        .iter()
        .map(|v| Vec3::from_array(*v).normalize())
        .collect();
    let mut triangles: Vec<[u32; 3]> = ICOSAHEDRON_FACES.to_vec();

    for _ in 0..subdivisions {
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
        let mut midpoint = |a: u32, b: u32, vertices: &mut Vec<Vec3>| -> u32 {
            let key = (a.min(b), a.max(b));
            *midpoints.entry(key).or_insert_with(|| {
                let mid = ((vertices[a as usize] + vertices[b as usize]) * 0.5).normalize();
                vertices.push(mid);
                (vertices.len() - 1) as u32
            })
        };

        let mut next = Vec::with_capacity(triangles.len() * 4);
        for [v0, v1, v2] in triangles {
            let m01 = midpoint(v0, v1, &mut vertices);
            let m12 = midpoint(v1, v2, &mut vertices);
            let m20 = midpoint(v2, v0, &mut vertices);
            next.push([v0, m01, m20]);
            next.push([v1, m12, m01]);
            next.push([v2, m20, m12]);
            next.push([m01, m12, m20]);
        }
        triangles = next;
    }

    Mesh::new(vertices, triangles.into_iter().map(Face::new).collect())
}

/// Build every spheroid at the fixed subdivision level, squash it about its
/// own centre, and concatenate them into one mesh.
///
/// Overlapping spheroids are kept as-is; no boolean union is performed.
pub fn blob_cluster(params: &BlobClusterParams) -> Result<Mesh> {
    let unit = icosphere(params.subdivisions)?;

    let mut cluster = Mesh::default();
    for (i, blob) in params.spheroids().enumerate() {
        require_positive(&format!("blob {i} radius"), blob.radius)?;
        require_positive(&format!("blob {i} squash"), blob.squash)?;
        if !blob.offset.is_finite() {
            return Err(SceneryError::Parameter(format!(
                "blob {i} offset must be finite, got {}",
                blob.offset
            )));
        }

        let scale = Vec3::new(blob.radius, blob.radius, blob.radius * blob.squash);
        let mut sphere = unit.clone();
        for v in sphere.vertices_mut() {
            *v = *v * scale + blob.offset;
        }
        cluster.append(sphere, Color::WHITE);
    }

    Ok(cluster)
}
