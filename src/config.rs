use std::path::PathBuf;

use clap::Parser;

use crate::assets::{FernParams, HouseParams, TreeParams};

/// Which generator is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Fern,
    Tree,
    House,
}

impl AssetKind {
    /// Canonical asset name: consolidated object, retained material.
    pub fn display_name(&self) -> &'static str {
        match self {
            AssetKind::Fern => "Fern",
            AssetKind::Tree => "Tree",
            AssetKind::House => "House",
        }
    }

    /// Stem used for render and export file names.
    pub fn file_stem(&self) -> &'static str {
        match self {
            AssetKind::Fern => "fern",
            AssetKind::Tree => "tree",
            AssetKind::House => "house",
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file_stem())
    }
}

/// Parameters of the asset to generate.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetSpec {
    Fern(FernParams),
    Tree(TreeParams),
    House(HouseParams),
}

impl AssetSpec {
    /// The asset with its stock parameters.
    pub fn default_for(kind: AssetKind) -> Self {
        match kind {
            AssetKind::Fern => AssetSpec::Fern(FernParams::default()),
            AssetKind::Tree => AssetSpec::Tree(TreeParams::default()),
            AssetKind::House => AssetSpec::House(HouseParams::default()),
        }
    }

    pub fn kind(&self) -> AssetKind {
        match self {
            AssetSpec::Fern(_) => AssetKind::Fern,
            AssetSpec::Tree(_) => AssetKind::Tree,
            AssetSpec::House(_) => AssetKind::House,
        }
    }
}

/// Preview render settings.
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    pub enabled: bool,
    /// Square image edge in pixels.
    pub resolution: u32,
    pub samples: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            resolution: 1024,
            samples: 64,
        }
    }
}

/// GLB export options.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Compress vertex and index buffers with `EXT_meshopt_compression`.
    pub compress: bool,
    /// Written to the glTF `asset.generator` field.
    pub generator: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            compress: false,
            generator: concat!("scenery-gen ", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Fully resolved pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub asset: AssetSpec,
    /// Base directory the render and export directories are relative to.
    pub output_root: PathBuf,
    pub render_dir: PathBuf,
    pub export_dir: PathBuf,
    /// Consolidate and write the GLB after previewing.
    pub export: bool,
    pub preview: PreviewConfig,
    pub export_options: ExportOptions,
    pub verbose: bool,
}

impl PipelineConfig {
    pub fn new(asset: AssetSpec) -> Self {
        Self {
            asset,
            output_root: PathBuf::from("."),
            render_dir: PathBuf::from("renders"),
            export_dir: PathBuf::from("assets").join("models"),
            export: false,
            preview: PreviewConfig::default(),
            export_options: ExportOptions::default(),
            verbose: false,
        }
    }

    /// Build the configuration of one generator binary from its flags.
    pub fn from_args(kind: AssetKind, args: CliArgs) -> Self {
        Self {
            export: args.export,
            verbose: args.verbose,
            ..Self::new(AssetSpec::default_for(kind))
        }
    }

    /// Where the preview seen through camera `view` (`"front"`, `"side"`) goes.
    pub fn render_path(&self, view: &str) -> PathBuf {
        self.output_root
            .join(&self.render_dir)
            .join(format!("{}_{view}.png", self.asset.kind().file_stem()))
    }

    pub fn export_path(&self) -> PathBuf {
        self.output_root
            .join(&self.export_dir)
            .join(format!("{}.glb", self.asset.kind().file_stem()))
    }
}

/// CLI flags shared by every generator binary (clap derive).
#[derive(Parser, Debug)]
#[command(about = "Generate a low-poly scenery asset, render previews, optionally export GLB", version)]
pub struct CliArgs {
    /// Consolidate the model and write the GLB asset
    #[arg(long)]
    pub export: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_preview_config() {
        let pc = PreviewConfig::default();
        assert!(pc.enabled);
        assert_eq!(pc.resolution, 1024);
        assert_eq!(pc.samples, 64);
    }

    #[test]
    fn default_export_options() {
        let eo = ExportOptions::default();
        assert!(!eo.compress);
        assert!(eo.generator.starts_with("scenery-gen"));
    }

    #[test]
    fn asset_kind_names() {
        assert_eq!(AssetKind::Fern.display_name(), "Fern");
        assert_eq!(AssetKind::Tree.file_stem(), "tree");
        assert_eq!(AssetKind::House.to_string(), "house");
        assert_eq!(AssetSpec::default_for(AssetKind::Tree).kind(), AssetKind::Tree);
    }

    #[test]
    fn output_paths() {
        let config = PipelineConfig::new(AssetSpec::default_for(AssetKind::House));
        assert_eq!(
            config.render_path("front"),
            PathBuf::from("./renders/house_front.png")
        );
        assert_eq!(
            config.export_path(),
            PathBuf::from("./assets/models/house.glb")
        );
    }

    #[test]
    fn cli_args_to_pipeline_config() {
        let args = CliArgs::parse_from(["fern", "--export", "-v"]);
        let config = PipelineConfig::from_args(AssetKind::Fern, args);

        assert!(config.export);
        assert!(config.verbose);
        assert_eq!(config.asset, AssetSpec::Fern(FernParams::default()));
        assert!(config.preview.enabled);
    }

    #[test]
    fn cli_args_minimal() {
        let args = CliArgs::parse_from(["tree"]);
        let config = PipelineConfig::from_args(AssetKind::Tree, args);

        assert!(!config.export);
        assert!(!config.verbose);
        assert_eq!(config.output_root, PathBuf::from("."));
    }

    #[test]
    fn unknown_flag_rejected() {
        assert!(CliArgs::try_parse_from(["house", "--units", "m"]).is_err());
    }
}
