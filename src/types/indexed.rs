use crate::error::{Result, SceneryError};

/// Export-ready triangle list with flat per-vertex attribute buffers.
///
/// Every attribute buffer is either empty or covers every vertex; `validate`
/// checks that before serialization.
#[derive(Debug, Clone, Default)]
pub struct IndexedMesh {
    /// xyz per vertex
    pub positions: Vec<f32>,
    /// xyz per vertex, unit length
    pub normals: Vec<f32>,
    /// uv per vertex
    pub uvs: Vec<f32>,
    /// rgba per vertex, linear
    pub colors: Vec<f32>,
    /// Three per triangle.
    pub indices: Vec<u32>,
}

impl IndexedMesh {
    /// Empty buffers sized for `vertices` fully attributed vertices.
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices * 3),
            normals: Vec::with_capacity(vertices * 3),
            uvs: Vec::with_capacity(vertices * 2),
            colors: Vec::with_capacity(vertices * 4),
            indices: Vec::new(),
        }
    }

    /// Append one vertex carrying every attribute; returns its index.
    pub fn push_vertex(
        &mut self,
        position: [f32; 3],
        normal: [f32; 3],
        uv: [f32; 2],
        color: [f32; 4],
    ) -> u32 {
        let index = self.vertex_count() as u32;
        self.positions.extend_from_slice(&position);
        self.normals.extend_from_slice(&normal);
        self.uvs.extend_from_slice(&uv);
        self.colors.extend_from_slice(&color);
        index
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    pub fn has_uvs(&self) -> bool {
        !self.uvs.is_empty()
    }

    pub fn has_colors(&self) -> bool {
        !self.colors.is_empty()
    }

    /// No vertices or no triangles.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.indices.is_empty()
    }

    /// Check buffer shapes and index range.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(SceneryError::Export("mesh has no triangles".into()));
        }
        if self.indices.len() % 3 != 0 {
            return Err(SceneryError::Export(format!(
                "{} indices do not form a triangle list",
                self.indices.len()
            )));
        }
        let n = self.vertex_count();
        for (label, buffer, width) in [
            ("positions", &self.positions, 3),
            ("normals", &self.normals, 3),
            ("uvs", &self.uvs, 2),
            ("colors", &self.colors, 4),
        ] {
            if !buffer.is_empty() && buffer.len() != n * width {
                return Err(SceneryError::Export(format!(
                    "{label} buffer holds {} floats, expected {} for {n} vertices",
                    buffer.len(),
                    n * width
                )));
            }
        }
        if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= n) {
            return Err(SceneryError::Export(format!(
                "index {bad} out of range for {n} vertices"
            )));
        }
        Ok(())
    }
}
