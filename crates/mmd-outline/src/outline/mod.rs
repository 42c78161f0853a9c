//! Outline derivation: graph extraction, forest construction and formatting
//!
//! Data flows raw text → [`DiagramGraphParser`] → [`DiagramGraph`] →
//! [`TreeBuilder`] → forest → [`GenericFormatter`] / [`SitemapFormatter`].

mod formatter;
pub mod grammar;
mod graph;
mod parser;
mod pipeline;
mod tree;

pub use formatter::*;
pub use graph::*;
pub use parser::*;
pub use pipeline::*;
pub use tree::*;
