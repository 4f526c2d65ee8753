//! `.names` boolean functions and their truth tables.

use std::fmt;

use super::fields::tokens;
use crate::error::{BlifError, Result};

/// One truth table row: input literals followed by the output bit.
pub type TruthRow = Vec<char>;

/// A boolean function declared with `.names <in>... <out>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Names {
    /// Input signals (empty for a constant)
    pub inputs: Vec<String>,
    /// Output signal
    pub output: String,
    /// Belongs to the external don't-care network (`.exdc`)
    pub is_dontcare: bool,
    pub truth_table: Vec<TruthRow>,
}

impl Names {
    pub fn new(params: &str, is_dontcare: bool) -> Result<Self> {
        let mut signals = tokens(params);
        let output = signals.pop().ok_or_else(|| {
            BlifError::format(".names", "params should contain at least one parameter")
        })?;

        Ok(Self {
            inputs: signals,
            output,
            is_dontcare,
            truth_table: Vec::new(),
        })
    }

    /// Append a payload line, ignoring whitespace between literals.
    pub fn push_row(&mut self, line: &str) {
        self.truth_table
            .push(line.chars().filter(|c| !c.is_whitespace()).collect());
    }

    /// The `.names ...` header line.
    pub fn header(&self) -> String {
        let mut header = String::from(".names");
        for signal in self.inputs.iter().chain(std::iter::once(&self.output)) {
            header.push(' ');
            header.push_str(signal);
        }
        header
    }

    /// Check every truth table row against the declared inputs.
    pub fn validate(&self) -> Result<()> {
        let expected = self.inputs.len() + 1;

        for row in &self.truth_table {
            let Some((&out, literals)) = row.split_last() else {
                return Err(BlifError::truth_table(
                    "the truthtable must not contain empty rows",
                ));
            };
            let formatted = format_row(row);

            if row.len() != expected {
                return Err(BlifError::truth_table(format!(
                    "'{}' row should have {} inputs + 1 output: found {} instead (under '{}')",
                    formatted,
                    self.inputs.len(),
                    row.len(),
                    self.header()
                )));
            }

            if let Some(bad) = literals.iter().find(|c| !matches!(**c, '0' | '1' | '-')) {
                return Err(BlifError::truth_table(format!(
                    "Found unexpected char '{}' as input in row '{}' (under '{}'), only '1', '0' and '-' are accepted",
                    bad,
                    formatted,
                    self.header()
                )));
            }

            if !matches!(out, '0' | '1') {
                return Err(BlifError::truth_table(format!(
                    "Found unexpected char '{}' as output in row '{}' (under '{}'), only '1' and '0' are accepted",
                    out,
                    formatted,
                    self.header()
                )));
            }
        }

        Ok(())
    }
}

/// Render a row as `<inputs> <output>`, or just the output for constants.
fn format_row(row: &[char]) -> String {
    match row.split_last() {
        Some((out, [])) => out.to_string(),
        Some((out, literals)) => format!("{} {}", literals.iter().collect::<String>(), out),
        None => String::new(),
    }
}

impl fmt::Display for Names {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dontcare {
            writeln!(f, ".exdc")?;
        }
        write!(f, "{}", self.header())?;
        for row in &self.truth_table {
            write!(f, "\n{}", format_row(row))?;
        }
        Ok(())
    }
}
