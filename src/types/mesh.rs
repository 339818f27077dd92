use glam::Vec3;

use crate::error::{Result, SceneryError};
use crate::types::{BoundingBox, Color};

/// A planar polygon referencing vertices of its owning [`Mesh`].
///
/// Winding follows the right-hand rule: counter-clockwise seen from the
/// side the normal points to.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub vertices: Vec<u32>,
    /// Smooth faces get averaged vertex normals at export, flat faces their own normal.
    pub smooth: bool,
}

impl Face {
    pub fn new(vertices: impl Into<Vec<u32>>) -> Self {
        Self {
            vertices: vertices.into(),
            smooth: false,
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Polygon mesh with per-corner colors.
///
/// Corner colors are stored in face order: all corners of face 0, then all
/// corners of face 1, and so on. The buffer is either empty (not baked yet)
/// or holds exactly one entry per corner.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
    corner_colors: Vec<Color>,
}

impl Mesh {
    /// Build a mesh, checking that every face has at least three corners and
    /// only references existing vertices.
    pub fn new(vertices: Vec<Vec3>, faces: Vec<Face>) -> Result<Self> {
        for (fi, face) in faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(SceneryError::Parameter(format!(
                    "face {fi} has {} corners, need at least 3",
                    face.len()
                )));
            }
            if let Some(&bad) = face.vertices.iter().find(|&&v| v as usize >= vertices.len()) {
                return Err(SceneryError::Parameter(format!(
                    "face {fi} references vertex {bad} but mesh has {} vertices",
                    vertices.len()
                )));
            }
        }
        Ok(Self {
            vertices,
            faces,
            corner_colors: Vec::new(),
        })
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub(crate) fn vertices_mut(&mut self) -> &mut [Vec3] {
        &mut self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn corner_colors(&self) -> &[Color] {
        &self.corner_colors
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Total number of face corners (sum of face sizes).
    pub fn corner_count(&self) -> usize {
        self.faces.iter().map(Face::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Whether every corner carries a color.
    pub fn is_baked(&self) -> bool {
        !self.faces.is_empty() && self.corner_colors.len() == self.corner_count()
    }

    /// Replace all corner colors. `colors` must hold one entry per corner.
    pub(crate) fn set_corner_colors(&mut self, colors: Vec<Color>) {
        debug_assert_eq!(colors.len(), self.corner_count());
        self.corner_colors = colors;
    }

    /// Color of corner `corner` of face `face`. `None` when unbaked or when
    /// the face or corner does not exist.
    pub fn corner_color(&self, face: usize, corner: usize) -> Option<Color> {
        if !self.is_baked() || corner >= self.faces.get(face)?.len() {
            return None;
        }
        let offset: usize = self.faces[..face].iter().map(Face::len).sum();
        self.corner_colors.get(offset + corner).copied()
    }

    /// Mark every face smooth or flat.
    pub fn set_smooth(&mut self, smooth: bool) {
        for face in &mut self.faces {
            face.smooth = smooth;
        }
    }

    /// Newell's method: along the face normal, with length twice the face area.
    pub fn face_area_vector(&self, face: usize) -> Vec3 {
        let face = &self.faces[face];
        let mut n = Vec3::ZERO;
        for (i, &a) in face.vertices.iter().enumerate() {
            let b = face.vertices[(i + 1) % face.len()];
            let p = self.vertices[a as usize];
            let q = self.vertices[b as usize];
            n.x += (p.y - q.y) * (p.z + q.z);
            n.y += (p.z - q.z) * (p.x + q.x);
            n.z += (p.x - q.x) * (p.y + q.y);
        }
        n
    }

    /// Unit face normal (zero for degenerate faces).
    pub fn face_normal(&self, face: usize) -> Vec3 {
        self.face_area_vector(face).normalize_or_zero()
    }

    /// Area-weighted average normal of every vertex over the faces using it.
    pub fn vertex_normals(&self) -> Vec<Vec3> {
        let mut normals = vec![Vec3::ZERO; self.vertices.len()];
        for (fi, face) in self.faces.iter().enumerate() {
            let n = self.face_area_vector(fi);
            for &v in &face.vertices {
                normals[v as usize] += n;
            }
        }
        normals.into_iter().map(Vec3::normalize_or_zero).collect()
    }

    /// Average of a face's corner positions.
    pub fn face_centroid(&self, face: usize) -> Vec3 {
        let face = &self.faces[face];
        let sum: Vec3 = face.vertices.iter().map(|&v| self.vertices[v as usize]).sum();
        sum / face.len() as f32
    }

    /// Minimum and maximum vertex Z, or `None` for a mesh without vertices.
    pub fn z_range(&self) -> Option<(f32, f32)> {
        self.bounds().map(|b| (b.min.z, b.max.z))
    }

    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.vertices)
    }

    /// Reverse the winding of every face, keeping each corner's color on the
    /// same vertex.
    pub fn flip_winding(&mut self) {
        let baked = self.is_baked();
        let mut offset = 0;
        for face in &mut self.faces {
            let n = face.len();
            face.vertices.reverse();
            if baked {
                self.corner_colors[offset..offset + n].reverse();
            }
            offset += n;
        }
    }

    /// Append `other` into this mesh, consuming it.
    ///
    /// Incoming face indices are shifted by this mesh's pre-merge vertex
    /// count. When only one side is baked, the other side's corners are
    /// filled with `fill` so the color buffer stays one-per-corner.
    pub fn append(&mut self, other: Mesh, fill: Color) {
        let offset = self.vertices.len() as u32;
        let self_baked = self.is_baked();
        let other_baked = other.is_baked();
        let self_corners = self.corner_count();
        let other_corners = other.corner_count();

        if self_baked || other_baked {
            if !self_baked {
                self.corner_colors = vec![fill; self_corners];
            }
            if other_baked {
                self.corner_colors.extend(other.corner_colors);
            } else {
                self.corner_colors.extend(std::iter::repeat_n(fill, other_corners));
            }
        }

        self.vertices.extend(other.vertices);
        self.faces.extend(other.faces.into_iter().map(|mut face| {
            for v in &mut face.vertices {
                *v += offset;
            }
            face
        }));
    }
}
