use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::info;

use crate::assets::{self, staging};
use crate::config::PipelineConfig;
use crate::consolidate::consolidate;
use crate::error::Result;
use crate::export::{ExportReport, export_asset};
use crate::preview::{PreviewRenderer, RasterPreview};
use crate::types::Model;

/// Summary of a completed generator run.
#[derive(Debug)]
pub struct ProcessingResult {
    pub part_count: usize,
    /// Vertices over all parts, scaffolding excluded.
    pub vertex_count: usize,
    pub face_count: usize,
    pub previews: Vec<PathBuf>,
    /// Present when the run consolidated and exported the asset.
    pub export: Option<ExportReport>,
    pub duration: Duration,
}

/// Pipeline orchestrator -- build, preview, then optionally export.
pub struct Pipeline;

impl Pipeline {
    /// Run one generator with the built-in rasterizer for previews.
    pub fn run(config: &PipelineConfig) -> Result<ProcessingResult> {
        Self::run_with(config, &RasterPreview)
    }

    /// Run one generator, rendering previews through `renderer`.
    ///
    /// Previews are written before export starts, so a failed export leaves
    /// them in place.
    pub fn run_with(
        config: &PipelineConfig,
        renderer: &dyn PreviewRenderer,
    ) -> Result<ProcessingResult> {
        let start = Instant::now();
        let kind = config.asset.kind();
        info!(asset = %kind, export = config.export, "Starting pipeline");

        info!("Stage 1/3: Build");
        let model = assets::build_model(&config.asset)?;
        let (vertex_count, face_count) = part_totals(&model);
        info!(
            parts = model.part_count(),
            vertices = vertex_count,
            faces = face_count,
            "Model built"
        );

        let mut previews = Vec::new();
        if config.preview.enabled {
            info!("Stage 2/3: Preview");
            for (view, camera) in staging::VIEWS {
                let path = config.render_path(view);
                renderer.render(&model, camera, &config.preview, &path)?;
                previews.push(path);
            }
        }

        let part_count = model.part_count();
        let export = if config.export {
            info!("Stage 3/3: Export");
            let asset = consolidate(model, kind.display_name())?;
            Some(export_asset(
                &asset,
                &config.export_options,
                &config.export_path(),
            )?)
        } else {
            None
        };

        let duration = start.elapsed();
        info!(asset = %kind, elapsed = ?duration, "Pipeline complete");

        let result = ProcessingResult {
            part_count,
            vertex_count,
            face_count,
            previews,
            export,
            duration,
        };
        print_summary(config, &result);
        Ok(result)
    }
}

fn part_totals(model: &Model) -> (usize, usize) {
    model.parts().fold((0, 0), |(v, f), (_, part)| {
        (v + part.mesh.vertex_count(), f + part.mesh.face_count())
    })
}

/// Print the asset dimensions and everything the run wrote.
fn print_summary(config: &PipelineConfig, result: &ProcessingResult) {
    println!("=== {} ===", config.asset.kind().display_name());
    for line in assets::summary(&config.asset) {
        println!("  {line}");
    }
    println!(
        "  Parts: {}, vertices: {}, faces: {}",
        result.part_count, result.vertex_count, result.face_count
    );
    for path in &result.previews {
        println!("  Render: {}", path.display());
    }
    match &result.export {
        Some(report) => println!(
            "  Exported: {} ({} bytes, {} vertices, {} triangles)",
            report.path.display(),
            report.bytes,
            report.vertices,
            report.triangles
        ),
        None => println!("  Export skipped (pass --export to write the GLB)"),
    }
    println!("  Done in {:.2}s", result.duration.as_secs_f64());
}
