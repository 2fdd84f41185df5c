//! yed-graph: object model for yEd-flavoured GraphML.
//!
//! Provides:
//! - Core data structures (Graph, Node, Group, Edge, labels, styles)
//! - Scoped construction with monotonic id allocation
//! - Validated option sets for string-keyed styling
//! - Custom property definitions, statistics and consistency checks
//!
//! # Example
//!
//! ```
//! use yed_graph::{Graph, NodeOptions, Scope};
//! use yed_core::Shape;
//!
//! let mut graph = Graph::new();
//! let a = graph.add_node("a").unwrap();
//! let mut round = NodeOptions::new();
//! round.style.shape = Shape::Ellipse;
//! let b = graph.add_node_with(Scope::Root, "b", &round).unwrap();
//! graph.add_edge(a, b).unwrap();
//!
//! let group = graph.add_group("cluster").unwrap();
//! let inner = graph.group(group).unwrap().add_node("c").unwrap();
//! graph.group(group).unwrap().add_edge(inner, inner).unwrap();
//!
//! assert_eq!(graph.node_count(), 4);
//! assert_eq!(graph.edge_count(), 2);
//! ```

pub mod defaults;
pub mod edge;
pub mod error;
pub mod extension;
pub mod graph;
pub mod label;
pub mod node;
pub mod options;
pub mod property;
pub mod scope;
pub mod stats;
pub mod style;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use edge::{Edge, Endpoint};
pub use error::{GraphError, GraphResult};
pub use extension::{ForeignAttributes, Fragment};
pub use graph::{Graph, GraphExtensions, Members, Scope};
pub use label::{EdgeLabel, LabelStyle, NodeLabel};
pub use node::{GroupState, Node, NodeKind};
pub use options::{EdgeOptionKey, EdgeOptions, NodeOptionKey, NodeOptions};
pub use property::{CustomPropertyDef, PropertyValues};
pub use scope::GroupScope;
pub use stats::GraphStats;
pub use style::{Border, EdgeRealizer, EdgeStyle, Fill, Geometry, NodeRealizer, NodeStyle, UmlData};
