use crate::error::{Result, SceneryError};
use crate::types::Color;

/// Default roughness for the matte, stylized look.
pub const DEFAULT_ROUGHNESS: f32 = 0.9;

/// Preview/export material.
///
/// When `vertex_color` is set the base color input is driven by the mesh's
/// corner colors; `base_color` then only matters for unbaked geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub base_color: Color,
    pub roughness: f32,
    pub vertex_color: bool,
}

impl Material {
    /// Vertex-color driven material, the kind every asset part uses.
    pub fn new(name: impl Into<String>, base_color: Color, roughness: f32) -> Result<Self> {
        base_color.validate()?;
        if !(0.0..=1.0).contains(&roughness) {
            return Err(SceneryError::Parameter(format!(
                "roughness {roughness} is outside [0, 1]"
            )));
        }
        Ok(Self {
            name: name.into(),
            base_color,
            roughness,
            vertex_color: true,
        })
    }

    /// Plain base-color material without a vertex color input (ground plane).
    pub fn plain(name: impl Into<String>, base_color: Color, roughness: f32) -> Result<Self> {
        Ok(Self {
            vertex_color: false,
            ..Self::new(name, base_color, roughness)?
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_defaults_to_vertex_color() {
        let mat = Material::new("Stem", Color::rgba(0.15, 0.30, 0.10, 1.0), DEFAULT_ROUGHNESS).unwrap();
        assert_eq!(mat.name, "Stem");
        assert!(mat.vertex_color);
        assert_eq!(mat.roughness, 0.9);
    }

    #[test]
    fn plain_material_has_no_vertex_color() {
        let mat = Material::plain("Ground", Color::rgba(0.30, 0.38, 0.20, 1.0), 0.95).unwrap();
        assert!(!mat.vertex_color);
    }

    #[test]
    fn roughness_out_of_range_rejected() {
        let err = Material::new("Bad", Color::WHITE, 1.5).unwrap_err();
        assert!(matches!(err, SceneryError::Parameter(_)));
    }

    #[test]
    fn invalid_base_color_rejected() {
        assert!(Material::new("Bad", Color::rgba(2.0, 0.0, 0.0, 1.0), 0.5).is_err());
    }
}
