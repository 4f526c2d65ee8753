//! BLIF text parser.
//!
//! Parsing runs in two stages: the raw text is normalized into tagged lines
//! (comments removed, `\` continuations joined, each line carrying its
//! original number), then the [`Parser`] dispatches every line by keyword.
//!
//! # Grammar Overview
//!
//! ```text
//! file        = { line }
//! line        = keyword_line | payload_line | empty
//! keyword_line = '.' keyword { parameter }
//! payload_line = truth_row | transition_row
//! truth_row   = { '0' | '1' | '-' } ('0' | '1')
//! transition_row = input_pattern current_state next_state output_pattern
//! ```
//!
//! # Keywords
//!
//! | Keyword | Syntax |
//! |---------|--------|
//! | .model | `.model <name>` |
//! | .inputs / .outputs | `.inputs <signal>...` |
//! | .names | `.names <in>... <out>` followed by truth table rows |
//! | .latch | `.latch <in> <out> [<type> <control>] [<init-val>]` |
//! | .search | `.search <file>` |
//! | .subckt | `.subckt <model> <port>=<signal>...` |
//! | .start_kiss / .end_kiss | FSM body delimiters |
//! | .i .o .s .p | FSM input, output, state and transition counts |
//! | .r | `.r <reset-state>` |
//! | .code | `.code <state> <bits>` |
//! | .exdc | marks following `.names` as don't-care |
//! | .end | end of model |
//!
//! # Example
//!
//! ```text
//! # 2-input AND
//! .model and2
//! .inputs a b
//! .outputs c
//! .names a b c
//! 11 1
//! .end
//! ```

mod normalize;
mod dispatch;

pub use normalize::{normalize, tag, untag};
pub use dispatch::Parser;

use std::path::Path;

use crate::document::Blif;
use crate::error::{BlifError, Result};

/// Parse BLIF text held in memory.
pub fn parse_str(input: &str) -> Blif {
    parse_lines(normalize(input))
}

/// Parse lines that have already been normalized.
pub fn parse_lines<I, S>(lines: I) -> Blif
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Parser::new().parse(lines)
}

/// Parse a BLIF file.
///
/// Only failing to read the file is an error; everything wrong inside it is
/// reported through [`Blif::problems`].
pub fn parse_file(path: &Path) -> Result<Blif> {
    let content = std::fs::read_to_string(path).map_err(|e| BlifError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), "parsing BLIF file");
    Ok(parse_str(&content))
}
