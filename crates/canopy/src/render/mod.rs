//! Render adapters over a finished [`CompletionTree`].
//!
//! Two independent consumers of the graph:
//! - [`render_pdf`] / [`to_dot`]: static document via the external
//!   graphviz layout engine
//! - [`render_html`]: self-contained interactive vis.js document
//!
//! Both walk the DAG breadth-first, emit each node once regardless of
//! how many parents reference it, and connect shared nodes with
//! multiple edges. Children render in ascending token-id order.
//!
//! [`CompletionTree`]: crate::tree::CompletionTree

mod color;
mod graphviz;
mod html;
mod label;

pub use graphviz::{render_pdf, to_dot, PdfOptions};
pub use html::render_html;
