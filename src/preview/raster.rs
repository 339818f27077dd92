use std::path::Path;

use glam::{Mat4, Vec3, Vec4};
use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgb, RgbImage};
use tracing::{debug, info};

use crate::config::PreviewConfig;
use crate::error::{Result, SceneryError};
use crate::preview::{CameraPose, DirectionalLight, PreviewRenderer, collect_lights};
use crate::transform::apply_affine;
use crate::types::{Color, Mesh, Model, ObjectKind};

const NEAR: f32 = 0.05;
const FAR: f32 = 1000.0;
/// Sky light reaching every surface regardless of orientation.
const AMBIENT: f32 = 0.35;

/// Z-buffered software rasterizer with per-corner colors and Lambert lighting.
///
/// Meshes are drawn double-sided. Sample counts map onto a supersampling
/// factor (1 or 2 per axis), and the oversized frame is filtered down to the
/// requested resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterPreview;

/// Supersampling factor per axis for a sample count.
pub fn supersample_factor(samples: u32) -> u32 {
    ((samples as f32).sqrt() / 4.0).ceil().clamp(1.0, 2.0) as u32
}

/// One shaded, projected triangle corner.
#[derive(Debug, Clone, Copy)]
struct ScreenVertex {
    x: f32,
    y: f32,
    depth: f32,
    color: Vec3,
}

struct Frame {
    size: u32,
    color: Vec<Vec3>,
    depth: Vec<f32>,
}

impl Frame {
    fn new(size: u32, background: Vec3) -> Result<Self> {
        let n = (size as usize).checked_mul(size as usize).ok_or_else(|| {
            SceneryError::Render(format!("preview frame of {size}x{size} pixels is too large"))
        })?;
        Ok(Self {
            size,
            color: vec![background; n],
            depth: vec![f32::INFINITY; n],
        })
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.size as usize + x as usize
    }

    fn draw_triangle(&mut self, tri: [ScreenVertex; 3]) {
        let [a, b, c] = tri;
        let area = edge(a.x, a.y, b.x, b.y, c.x, c.y);
        if area.abs() < 1e-12 {
            return;
        }
        let max = (self.size - 1) as f32;
        let x0 = a.x.min(b.x).min(c.x).floor().clamp(0.0, max) as u32;
        let x1 = a.x.max(b.x).max(c.x).ceil().clamp(0.0, max) as u32;
        let y0 = a.y.min(b.y).min(c.y).floor().clamp(0.0, max) as u32;
        let y1 = a.y.max(b.y).max(c.y).ceil().clamp(0.0, max) as u32;

        for py in y0..=y1 {
            for px in x0..=x1 {
                let (sx, sy) = (px as f32 + 0.5, py as f32 + 0.5);
                let w0 = edge(b.x, b.y, c.x, c.y, sx, sy) / area;
                let w1 = edge(c.x, c.y, a.x, a.y, sx, sy) / area;
                let w2 = 1.0 - w0 - w1;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }
                let depth = w0 * a.depth + w1 * b.depth + w2 * c.depth;
                let i = self.index(px, py);
                if depth < self.depth[i] {
                    self.depth[i] = depth;
                    self.color[i] = a.color * w0 + b.color * w1 + c.color * w2;
                }
            }
        }
    }

    fn into_image(self) -> RgbImage {
        RgbImage::from_fn(self.size, self.size, |x, y| {
            let c = self.color[self.index(x, y)];
            Rgb(c.to_array().map(to_srgb8))
        })
    }
}

fn edge(ax: f32, ay: f32, bx: f32, by: f32, px: f32, py: f32) -> f32 {
    (bx - ax) * (py - ay) - (by - ay) * (px - ax)
}

fn to_srgb8(linear: f32) -> u8 {
    (linear.clamp(0.0, 1.0).powf(1.0 / 2.2) * 255.0).round() as u8
}

fn rgb(color: Color) -> Vec3 {
    Vec3::new(color.r, color.g, color.b)
}

fn shade(albedo: Vec3, normal: Vec3, lights: &[DirectionalLight]) -> Vec3 {
    let mut light = Vec3::splat(AMBIENT);
    for l in lights {
        light += l.color * l.intensity * normal.dot(l.to_light).max(0.0);
    }
    albedo * light
}

impl RasterPreview {
    /// Render into an in-memory image at `settings.resolution`.
    pub fn render_image(
        &self,
        model: &Model,
        camera: &str,
        settings: &PreviewConfig,
    ) -> Result<RgbImage> {
        if settings.resolution == 0 {
            return Err(SceneryError::Render("preview resolution must be positive".into()));
        }
        let pose = CameraPose::from_model(model, camera)?;
        let lights = collect_lights(model)?;
        let ss = supersample_factor(settings.samples);
        let size = settings.resolution.checked_mul(ss).ok_or_else(|| {
            SceneryError::Render(format!(
                "preview resolution {} is too large to supersample {ss}x",
                settings.resolution
            ))
        })?;

        let dir = pose.direction();
        let up = if dir.cross(Vec3::Z).length_squared() < 1e-8 { Vec3::Y } else { Vec3::Z };
        let view_proj = Mat4::perspective_rh(pose.fov, 1.0, NEAR, FAR)
            * Mat4::look_at_rh(pose.eye, pose.target, up);

        let mut frame = Frame::new(size, rgb(model.background))?;
        let mut triangles = 0usize;
        for object in &model.objects {
            let (ObjectKind::Part(part) | ObjectKind::Ground(part)) = &object.kind else {
                continue;
            };
            let material = model.material(part.material).ok_or_else(|| {
                SceneryError::Layout(format!("object '{}' has no material", object.name))
            })?;
            let mut mesh = part.mesh.clone();
            apply_affine(&mut mesh, &model.world_transform(&object.name)?);
            let fallback = if material.vertex_color && mesh.is_baked() {
                None
            } else {
                Some(rgb(material.base_color))
            };
            triangles += draw_mesh(&mut frame, &mesh, fallback, &view_proj, pose.eye, &lights);
        }
        debug!(camera, size, triangles, "Rasterized preview");

        let image = frame.into_image();
        if ss == 1 {
            return Ok(image);
        }
        Ok(imageops::resize(
            &image,
            settings.resolution,
            settings.resolution,
            FilterType::Triangle,
        ))
    }
}

/// Draw every face of a world-space mesh; returns the triangles drawn.
fn draw_mesh(
    frame: &mut Frame,
    mesh: &Mesh,
    fallback: Option<Vec3>,
    view_proj: &Mat4,
    eye: Vec3,
    lights: &[DirectionalLight],
) -> usize {
    let smooth = if mesh.faces().iter().any(|f| f.smooth) {
        mesh.vertex_normals()
    } else {
        Vec::new()
    };
    let colors = mesh.corner_colors();
    let size = frame.size as f32;
    let mut corner = 0usize;
    let mut drawn = 0usize;

    for (fi, face) in mesh.faces().iter().enumerate() {
        let flat = mesh.face_normal(fi);
        // Double-sided: light the side facing the camera.
        let facing: f32 = if flat.dot(eye - mesh.face_centroid(fi)) < 0.0 { -1.0 } else { 1.0 };

        let mut projected = Vec::with_capacity(face.len());
        for &v in &face.vertices {
            let p = mesh.vertices()[v as usize];
            let n = facing * if face.smooth { smooth[v as usize] } else { flat };
            let albedo = fallback.unwrap_or_else(|| rgb(colors[corner]));
            corner += 1;

            let clip = *view_proj * Vec4::new(p.x, p.y, p.z, 1.0);
            if clip.w <= NEAR {
                projected.push(None);
                continue;
            }
            let ndc = clip.truncate() / clip.w;
            projected.push(Some(ScreenVertex {
                x: (ndc.x * 0.5 + 0.5) * size,
                y: (0.5 - ndc.y * 0.5) * size,
                depth: ndc.z,
                color: shade(albedo, n, lights),
            }));
        }

        // Triangles crossing the near plane are dropped.
        for i in 1..projected.len() - 1 {
            if let (Some(a), Some(b), Some(c)) = (projected[0], projected[i], projected[i + 1]) {
                frame.draw_triangle([a, b, c]);
                drawn += 1;
            }
        }
    }
    drawn
}

impl PreviewRenderer for RasterPreview {
    fn render(
        &self,
        model: &Model,
        camera: &str,
        settings: &PreviewConfig,
        path: &Path,
    ) -> Result<()> {
        let image = self.render_image(model, camera, settings)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| SceneryError::Render(format!("{}: {e}", path.display())))?;
        info!(camera, path = %path.display(), "Rendered preview");
        Ok(())
    }
}
