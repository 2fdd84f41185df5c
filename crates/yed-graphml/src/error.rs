use std::path::PathBuf;

use quick_xml::events::attributes::AttrError;
use yed_core::ValueError;
use yed_graph::GraphError;

pub type GraphmlResult<T> = Result<T, GraphmlError>;

/// Errors raised while reading, writing or persisting GraphML.
#[derive(thiserror::Error, Debug)]
pub enum GraphmlError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attribute(#[from] AttrError),

    #[error("Invalid UTF-8 in document: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Well-formed XML that is not usable GraphML.
    #[error("Malformed GraphML: {what}")]
    Structure { what: String },

    #[error(transparent)]
    Value(#[from] ValueError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("Failed to write XML: {0}")]
    Write(#[from] std::io::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File already exists: {path}")]
    FileExists { path: PathBuf },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },
}

impl GraphmlError {
    pub(crate) fn structure(what: impl Into<String>) -> Self {
        GraphmlError::Structure { what: what.into() }
    }
}
