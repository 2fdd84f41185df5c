//! yed-graphml: GraphML (yEd dialect) reading and writing.
//!
//! ```
//! use yed_graph::Graph;
//!
//! let mut graph = Graph::new();
//! let a = graph.add_node("a").unwrap();
//! let b = graph.add_node("b").unwrap();
//! graph.add_edge(a, b).unwrap();
//!
//! let text = yed_graphml::to_graphml(&graph).unwrap();
//! let parsed = yed_graphml::from_graphml(&text).unwrap();
//! assert_eq!(parsed, graph);
//! ```

pub mod error;
pub mod file;
mod keys;
mod read;
mod write;
mod xml;

pub use error::{GraphmlError, GraphmlResult};
pub use file::{GraphFile, SaveOptions, load, save};

use yed_graph::Graph;

/// Compact GraphML for `graph`.
pub fn to_graphml(graph: &Graph) -> GraphmlResult<String> {
    let root = write::document(graph)?;
    xml::write_document(&root, false)
}

/// Tab-indented GraphML for `graph`.
pub fn to_graphml_pretty(graph: &Graph) -> GraphmlResult<String> {
    prettify(&to_graphml(graph)?)
}

/// Re-indent any well-formed XML document with tabs.
pub fn prettify(text: &str) -> GraphmlResult<String> {
    let root = xml::parse(text)?;
    xml::write_document(&root, true)
}

pub fn from_graphml(text: &str) -> GraphmlResult<Graph> {
    let root = xml::parse(text)?;
    read::graph_from_document(&root)
}
