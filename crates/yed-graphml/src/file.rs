//! Saving and loading `.graphml` files.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;
use yed_graph::Graph;

use crate::error::{GraphmlError, GraphmlResult};

pub const EXTENSION: &str = "graphml";
pub const DEFAULT_FILE: &str = "temp.graphml";

/// Location of a GraphML file. Names built with [`GraphFile::new`] end in
/// `.graphml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphFile {
    path: PathBuf,
}

impl GraphFile {
    /// `None` means `temp.graphml` in the current directory.
    pub fn new(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self {
                path: PathBuf::from(DEFAULT_FILE),
            };
        };
        let path = if path.extension().is_some_and(|ext| ext == EXTENSION) {
            path.to_path_buf()
        } else {
            let mut name = OsString::from(path.as_os_str());
            name.push(".");
            name.push(EXTENSION);
            PathBuf::from(name)
        };
        Self { path }
    }

    /// An existing file to read, taken as given whatever its extension.
    pub fn existing(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn basename(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Containing directory, `.` for a bare file name.
    pub fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

impl Default for GraphFile {
    fn default() -> Self {
        Self::new(None)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveOptions {
    pub pretty: bool,
    pub overwrite: bool,
}

pub fn save(graph: &Graph, file: &GraphFile, options: SaveOptions) -> GraphmlResult<()> {
    if file.exists() && !options.overwrite {
        return Err(GraphmlError::FileExists {
            path: file.path.clone(),
        });
    }
    let text = if options.pretty {
        crate::to_graphml_pretty(graph)?
    } else {
        crate::to_graphml(graph)?
    };
    std::fs::write(&file.path, text).map_err(|source| GraphmlError::Io {
        path: file.path.clone(),
        source,
    })?;
    debug!(path = %file.path.display(), pretty = options.pretty, "saved graph");
    Ok(())
}

pub fn load(file: &GraphFile) -> GraphmlResult<Graph> {
    if !file.exists() {
        return Err(GraphmlError::FileNotFound {
            path: file.path.clone(),
        });
    }
    let text = std::fs::read_to_string(&file.path).map_err(|source| GraphmlError::Io {
        path: file.path.clone(),
        source,
    })?;
    let graph = crate::from_graphml(&text)?;
    debug!(path = %file.path.display(), "loaded graph");
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_and_extension_handling() {
        let default = GraphFile::default();
        assert_eq!(default.path(), Path::new("temp.graphml"));
        assert_eq!(default.dir(), Path::new("."));

        let bare = GraphFile::new(Some(Path::new("out/diagram")));
        assert_eq!(bare.path(), Path::new("out/diagram.graphml"));
        assert_eq!(bare.basename(), "diagram.graphml");
        assert_eq!(bare.dir(), Path::new("out"));

        let dotted = GraphFile::new(Some(Path::new("diagram.v1")));
        assert_eq!(dotted.basename(), "diagram.v1.graphml");

        let kept = GraphFile::new(Some(Path::new("a.graphml")));
        assert_eq!(kept.basename(), "a.graphml");
    }

    #[test]
    fn existing_files_keep_their_extension() {
        let path = std::env::temp_dir().join("yed-graphml-existing.xml");
        let mut graph = Graph::new();
        graph.add_node("a").unwrap();
        save(&graph, &GraphFile::existing(&path), SaveOptions { pretty: false, overwrite: true }).unwrap();

        let file = GraphFile::existing(&path);
        assert_eq!(file.basename(), "yed-graphml-existing.xml");
        assert_eq!(load(&file).unwrap(), graph);
        assert_eq!(GraphFile::new(Some(&path)).basename(), "yed-graphml-existing.xml.graphml");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_is_reported() {
        let file = GraphFile::new(Some(&std::env::temp_dir().join("yed-graphml-missing-file")));
        let err = load(&file).unwrap_err();
        assert!(matches!(err, GraphmlError::FileNotFound { .. }));
    }
}
