//! # Blifparser
//!
//! A parser and validator for BLIF (Berkeley Logic Interchange Format)
//! netlist and state machine descriptions.
//!
//! This library provides:
//! - A line-oriented, keyword-dispatching parser that never stops at a bad line
//! - A typed document model with field-level validation
//! - Validation of FSM transition tables and boolean function truth tables
//! - A directed connectivity graph inferred from shared signal names
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`parser`] - Line normalization and keyword dispatch
//! - [`document`] - Parsed entities (`.model`, `.names`, `.latch`, FSM, ...)
//! - [`graph`] - Node/edge graph construction with sub-circuit resolution
//! - [`error`] - Error type and diagnostic categories
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! blifparser circuit.blif
//! ```
//!
//! ### Library
//!
//! ```no_run
//! let blif = blifparser::parse("circuit.blif")?;
//! for problem in &blif.problems {
//!     println!("{}", problem);
//! }
//! let graph = blifparser::build_graph(&blif)?;
//! println!("{} nodes, {} edges", graph.node_count(), graph.edge_count());
//! # Ok::<(), blifparser::BlifError>(())
//! ```
//!
//! ## Diagnostics
//!
//! Problems found inside a file are data, not failures. Each one is a string
//! tagged with its category (`[ERROR]`, `[PARSING ERROR]`, `[FSM PROBLEM]`,
//! `[BOOLEAN FUNCTION PROBLEM]`) and, for line-level problems, the
//! approximate source line (`[LINE ~ n]`). Only an unreadable input file
//! is returned as an error.

pub mod document;
pub mod error;
pub mod graph;
pub mod parser;

// Re-export main types for convenience
pub use document::Blif;
pub use error::{BlifError, Result};
pub use graph::{build_graph, Graph, GraphBuilder, GraphConfig};
pub use parser::parse_str;

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmBlifLinter;

use std::path::Path;

/// Parse the BLIF file at `path`.
pub fn parse(path: impl AsRef<Path>) -> Result<Blif> {
    parser::parse_file(path.as_ref())
}
