use std::io;

/// All error types for the scenery generators.
#[derive(thiserror::Error, Debug)]
pub enum SceneryError {
    #[error("Parameter error: {0}")]
    Parameter(String),
    #[error("Layout error: {0}")]
    Layout(String),
    #[error("Consolidation error: {0}")]
    Consolidation(String),
    #[error("Render error: {0}")]
    Render(String),
    #[error("Export error: {0}")]
    Export(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SceneryError>;
