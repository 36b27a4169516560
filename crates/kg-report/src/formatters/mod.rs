//! Renderers for auxiliary report artifacts.
//!
//! - [`TableFormatter`] turns rows of cells into GitHub-flavored Markdown tables
//! - [`MermaidFormatter`] turns small data structures into Mermaid diagram text
//!
//! Both are pure: the same input always renders the same text.

mod mermaid;
mod table;

pub use mermaid::{DiagramType, MermaidError, MermaidFormatter};
pub use table::{Alignment, TableFormatter};
