//! # Canopy
//!
//! Merged-tree visualization of language-model completions.
//!
//! Canopy takes N token-sequence completions of a shared prompt and
//! merges them into one graph that shows where they agree (shared
//! prefixes), where they split (branch points), and where divergent
//! paths reconverge on an identical remaining suffix (shared subtrees,
//! making the structure a DAG). Each node carries traversal statistics
//! (how many completions pass through it, how many end there, mean
//! score) for the renderers.
//!
//! This crate provides:
//! - **Tree/DAG builder** with trie insertion and suffix merging
//! - **Static renderer** emitting DOT and driving graphviz to PDF
//! - **Interactive renderer** emitting a self-contained vis.js HTML file
//! - **Decode capability** trait so any tokenizer can label nodes
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use canopy::prelude::*;
//!
//! fn main() -> canopy::Result<()> {
//!     let tree = CompletionTree::builder()
//!         .completions(vec![vec![1, 2, 3], vec![4, 2, 3]])
//!         .scores(vec![1.0, 0.0])
//!         .build()?;
//!
//!     let decoder = |id: u32| Some(format!("tok{id}"));
//!     render_html(&tree, &decoder, "completions.html")?;
//!     render_pdf(&tree, &decoder, "completions.pdf", &PdfOptions {
//!         view: false,
//!         fail_silently: true,
//!     })?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod decode;
pub mod error;
pub mod render;
pub mod tree;

pub use error::{CanopyError, Result};

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::decode::TokenDecoder;
    pub use crate::error::{CanopyError, Result};
    pub use crate::render::{render_html, render_pdf, to_dot, PdfOptions};
    pub use crate::tree::{CompletionTree, CompletionTreeBuilder, Node, NodeId, TokenId};
}
