use glam::Vec3;

use crate::assets::staging::{Staging, stage};
use crate::bake::ColorBake;
use crate::builders::{BoxParams, GableParams, box_mesh, gable_prism};
use crate::compose::{Footprint, Opening, PartRecipe, WallFace, add_part, place_opening};
use crate::error::Result;
use crate::types::{Color, DEFAULT_ROUGHNESS, Material, Model};

/// Single-room house: box walls, gable roof, a front door and two side windows.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseParams {
    pub width: f32,
    pub depth: f32,
    pub wall_height: f32,
    /// Ridge height above the wall top.
    pub roof_peak: f32,
    pub wall_color: Color,
    pub roof_color: Color,
    pub door_color: Color,
    pub window_color: Color,
    pub door_width: f32,
    pub door_height: f32,
    pub door_inset: f32,
    pub window_width: f32,
    pub window_height: f32,
    pub window_sill: f32,
    pub window_inset: f32,
    /// Thickness of door and window boxes.
    pub opening_thickness: f32,
    pub roughness: f32,
}

impl Default for HouseParams {
    fn default() -> Self {
        Self {
            width: 5.0,
            depth: 4.0,
            wall_height: 3.0,
            roof_peak: 2.0,
            wall_color: Color::rgba(0.72, 0.63, 0.46, 1.0),
            roof_color: Color::rgba(0.55, 0.22, 0.15, 1.0),
            door_color: Color::rgba(0.30, 0.18, 0.10, 1.0),
            window_color: Color::rgba(0.50, 0.65, 0.80, 1.0),
            door_width: 0.9,
            door_height: 2.2,
            door_inset: 0.05,
            window_width: 0.8,
            window_height: 0.8,
            window_sill: 1.5,
            window_inset: 0.05,
            opening_thickness: 0.1,
            roughness: DEFAULT_ROUGHNESS,
        }
    }
}

impl HouseParams {
    pub fn footprint(&self) -> Footprint {
        Footprint {
            width: self.width,
            depth: self.depth,
        }
    }

    pub fn total_height(&self) -> f32 {
        self.wall_height + self.roof_peak
    }

    pub fn walls(&self) -> BoxParams {
        BoxParams {
            width: self.width,
            depth: self.depth,
            height: self.wall_height,
            center: Vec3::new(0.0, 0.0, self.wall_height / 2.0),
        }
    }

    pub fn roof(&self) -> GableParams {
        GableParams {
            width: self.width,
            depth: self.depth,
            wall_height: self.wall_height,
            ridge_height: self.roof_peak,
        }
    }

    pub fn door(&self) -> Opening {
        Opening {
            face: WallFace::Front,
            width: self.door_width,
            height: self.door_height,
            thickness: self.opening_thickness,
            sill: 0.0,
            inset: self.door_inset,
        }
    }

    pub fn window(&self, face: WallFace) -> Opening {
        Opening {
            face,
            width: self.window_width,
            height: self.window_height,
            thickness: self.opening_thickness,
            sill: self.window_sill,
            inset: self.window_inset,
        }
    }

    pub fn staging(&self) -> Staging {
        let focus = Vec3::new(0.0, 0.0, self.total_height() * 0.45);
        Staging {
            ground_size: 30.0,
            sun_euler_deg: [45.0, 15.0, 30.0],
            fill_energy: 40.0,
            fill_size: 8.0,
            fill_location: Vec3::new(-8.0, -6.0, 4.0),
            fill_target: Vec3::new(0.0, 0.0, self.wall_height * 0.5),
            lens_mm: 50.0,
            front_camera: Vec3::new(8.0, -7.0, 5.0),
            side_camera: Vec3::new(-3.0, -10.0, 4.0),
            camera_target: focus,
        }
    }

    pub fn summary(&self) -> Vec<String> {
        vec![
            format!(
                "Footprint: {}m x {}m, wall_h={}m, total_h={}m",
                self.width,
                self.depth,
                self.wall_height,
                self.total_height()
            ),
            "Parts: walls, gable roof, door, 2 windows".to_string(),
        ]
    }
}

/// Build the house. All parts are flat-shaded and carry solid colors.
pub fn build(params: &HouseParams) -> Result<Model> {
    let mut model = Model::new("House");
    let r = params.roughness;
    let wall_mat = model.add_material(Material::new("Wall", params.wall_color, r)?);
    let roof_mat = model.add_material(Material::new("Roof", params.roof_color, r)?);
    let door_mat = model.add_material(Material::new("Door", params.door_color, r)?);
    let window_mat = model.add_material(Material::new("Window", params.window_color, r)?);

    let footprint = params.footprint();
    let parts = [
        ("Walls", box_mesh(&params.walls())?, params.wall_color, wall_mat),
        ("Roof", gable_prism(&params.roof())?, params.roof_color, roof_mat),
        (
            "Door",
            place_opening(&footprint, &params.door())?,
            params.door_color,
            door_mat,
        ),
        (
            "WindowLeft",
            place_opening(&footprint, &params.window(WallFace::Left))?,
            params.window_color,
            window_mat,
        ),
        (
            "WindowRight",
            place_opening(&footprint, &params.window(WallFace::Right))?,
            params.window_color,
            window_mat,
        ),
    ];
    for (name, mesh, color, material) in parts {
        add_part(
            &mut model,
            PartRecipe::new(name, mesh, ColorBake::Solid(color), material),
        )?;
    }

    stage(&mut model, &params.staging())?;
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_house_parts() {
        let model = build(&HouseParams::default()).unwrap();
        let names: Vec<&str> = model.parts().map(|(o, _)| o.name.as_str()).collect();
        assert_eq!(names, ["Walls", "Roof", "Door", "WindowLeft", "WindowRight"]);
        assert_eq!(model.materials.len(), 5); // four part materials + ground
    }

    #[test]
    fn house_reaches_total_height() {
        let model = build(&HouseParams::default()).unwrap();
        let zmax = model
            .parts()
            .filter_map(|(_, p)| p.mesh.z_range())
            .map(|(_, hi)| hi)
            .fold(f32::MIN, f32::max);
        assert!((zmax - 5.0).abs() < 1e-6);
    }

    #[test]
    fn windows_flush_with_side_walls() {
        let model = build(&HouseParams::default()).unwrap();
        let (_, left) = model.parts().find(|(o, _)| o.name == "WindowLeft").unwrap();
        let bb = left.mesh.bounds().unwrap();
        assert!(bb.center().abs_diff_eq(Vec3::new(-2.55, 0.0, 1.9), 1e-5));
        assert!((bb.size().y - 0.8).abs() < 1e-5);
    }

    #[test]
    fn zero_window_width_fails() {
        let params = HouseParams {
            window_width: 0.0,
            ..HouseParams::default()
        };
        assert!(build(&params).is_err());
    }

    #[test]
    fn summary_lines() {
        let lines = HouseParams::default().summary();
        assert_eq!(lines[0], "Footprint: 5m x 4m, wall_h=3m, total_h=5m");
    }
}
