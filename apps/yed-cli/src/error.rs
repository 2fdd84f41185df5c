//! Error types for the yed command line.

use std::path::PathBuf;

/// Unified error for every command; backend errors keep their messages.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("GraphML error: {0}")]
    Graphml(#[from] yed_graphml::GraphmlError),

    #[error("Description error: {0}")]
    Project(#[from] yed_project::ProjectError),

    #[error("Graph error: {0}")]
    Graph(#[from] yed_graph::GraphError),

    #[error("File already exists: {path} (use --overwrite)")]
    OutputExists { path: PathBuf },

    #[error("Round trip changed {what}: {before} before, {after} after")]
    Check {
        what: &'static str,
        before: usize,
        after: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
