//! yed-core: stable vocabulary for yedgraph.
//!
//! Contains:
//! - ids (compact node/edge handles and their allocator)
//! - style (enumerated yEd style values)
//! - color (validated `#RRGGBB[AA]` colors)
//! - number (yEd-compatible number and boolean text forms)
//! - error (shared value errors)

pub mod color;
pub mod error;
pub mod ids;
pub mod number;
pub mod style;

// Re-exports: nice ergonomics for downstream crates
pub use color::Color;
pub use error::{ValueError, ValueResult};
pub use ids::*;
pub use number::*;
pub use style::*;
