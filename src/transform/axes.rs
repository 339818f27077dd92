use glam::Vec3;

/// Convert from right-handed Z-up (modelling space) to right-handed Y-up (glTF).
///
/// Transform: `(x, y, z)` → `(x, z, -y)`
pub fn z_up_to_y_up(v: Vec3) -> Vec3 {
    Vec3::new(v.x, v.z, -v.y)
}

/// Rotate a point about the vertical (Z) axis through `pivot`.
pub fn rotate_about_z(p: Vec3, pivot: Vec3, radians: f32) -> Vec3 {
    let (sin_a, cos_a) = radians.sin_cos();
    let d = p - pivot;
    Vec3::new(
        pivot.x + d.x * cos_a - d.y * sin_a,
        pivot.y + d.x * sin_a + d.y * cos_a,
        p.z,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn z_up_to_y_up_axes() {
        assert_eq!(z_up_to_y_up(Vec3::Z), Vec3::Y);
        assert_eq!(z_up_to_y_up(Vec3::Y), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(z_up_to_y_up(Vec3::X), Vec3::X);
        assert_eq!(z_up_to_y_up(Vec3::new(1.0, 2.0, 3.0)), Vec3::new(1.0, 3.0, -2.0));
    }

    #[test]
    fn z_up_to_y_up_preserves_handedness() {
        // X × Y = Z must map to X' × Y' = Z'.
        let x = z_up_to_y_up(Vec3::X);
        let y = z_up_to_y_up(Vec3::Y);
        let z = z_up_to_y_up(Vec3::Z);
        assert!((x.cross(y) - z).length() < 1e-6);
    }

    #[test]
    fn rotate_quarter_turn() {
        let p = rotate_about_z(Vec3::new(1.0, 0.0, 5.0), Vec3::ZERO, FRAC_PI_2);
        assert!((p - Vec3::new(0.0, 1.0, 5.0)).length() < 1e-6);
    }

    #[test]
    fn rotate_about_pivot() {
        let pivot = Vec3::new(1.0, 1.0, 0.0);
        let p = rotate_about_z(Vec3::new(2.0, 1.0, 0.0), pivot, FRAC_PI_2);
        assert!((p - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-6);
    }
}
