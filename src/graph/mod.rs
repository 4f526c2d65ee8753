//! Connectivity graph derived from a parsed document.
//!
//! Every declared input, output, boolean function, latch and sub-circuit
//! instance becomes a [`Node`] with typed input and output pins. Edges are
//! inferred, never stored in the document: a node driving a signal is
//! connected to every node reading a signal of the same name.
//!
//! Sub-circuit pins are classified by looking up the instantiated model in
//! the files named by `.search`. Those files are obtained through a
//! [`DocumentLoader`], so tests can serve them from memory. Only one level of
//! import is followed.

mod build;
mod loader;
mod types;

pub use build::{Graph, GraphBuilder, GraphConfig};
pub use loader::{DocumentLoader, FileLoader, MemoryLoader};
pub use types::{IdAllocator, Node, NodeId, NodeKind};

use crate::document::Blif;
use crate::error::Result;

/// Build the graph of `blif`, reading imports relative to the working directory.
pub fn build_graph(blif: &Blif) -> Result<Graph> {
    GraphBuilder::new(FileLoader::new()).build(blif)
}
