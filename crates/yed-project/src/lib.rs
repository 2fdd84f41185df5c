//! yed-project: graph description files (YAML/JSON) and their conversion
//! to and from graphs.

pub mod build;
pub mod export;
pub mod schema;
pub mod validate;

use std::path::Path;

pub use build::build_graph;
pub use export::export_graph;
pub use schema::*;
pub use validate::{LATEST_VERSION, ValidationError, validate_def};

use yed_graph::{Graph, GraphError};
use yed_graphml::{GraphFile, GraphmlError, SaveOptions};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Build error: {what}")]
    Build { what: String },

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("GraphML error: {0}")]
    Graphml(#[from] GraphmlError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &Path) -> ProjectResult<GraphDef> {
    let content = std::fs::read_to_string(path)?;
    let def: GraphDef = serde_yaml::from_str(&content)?;
    validate_def(&def)?;
    Ok(def)
}

pub fn save_yaml(path: &Path, def: &GraphDef) -> ProjectResult<()> {
    validate_def(def)?;
    let content = serde_yaml::to_string(def)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<GraphDef> {
    let content = std::fs::read_to_string(path)?;
    let def: GraphDef = serde_json::from_str(&content)?;
    validate_def(&def)?;
    Ok(def)
}

pub fn save_json(path: &Path, def: &GraphDef) -> ProjectResult<()> {
    validate_def(def)?;
    let content = serde_json::to_string_pretty(def)?;
    std::fs::write(path, content)?;
    Ok(())
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// JSON for `.json` files, YAML otherwise.
pub fn load_def(path: &Path) -> ProjectResult<GraphDef> {
    if is_json(path) { load_json(path) } else { load_yaml(path) }
}

pub fn save_def(path: &Path, def: &GraphDef) -> ProjectResult<()> {
    if is_json(path) { save_json(path, def) } else { save_yaml(path, def) }
}

/// Build the described graph and save it as GraphML.
pub fn write_graphml(def: &GraphDef, file: &GraphFile, options: SaveOptions) -> ProjectResult<Graph> {
    let graph = build_graph(def)?;
    yed_graphml::save(&graph, file, options)?;
    Ok(graph)
}

/// Load a GraphML file and describe it.
pub fn describe_graphml(file: &GraphFile) -> ProjectResult<GraphDef> {
    let graph = yed_graphml::load(file)?;
    Ok(export_graph(&graph))
}
