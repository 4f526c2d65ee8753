//! In-memory model of a parsed BLIF document.
//!
//! A [`Blif`] is produced by the parser and holds every recognized entity
//! together with the diagnostics collected while reading the file. It is
//! never modified after parsing completes.

mod fields;
mod fsm;
mod latch;
mod names;

pub use fields::{
    Binding, Count, CountKind, Inputs, Model, Outputs, PortDirection, Ports, ResetState, Search,
    StateCode, Subckt,
};
pub use fsm::{Fsm, TransitionRow};
pub use latch::{InitValue, Latch, LatchType, MISSING_INIT_WARNING};
pub use names::{Names, TruthRow};

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Every keyword the parser recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Keyword {
    Model,
    Inputs,
    Outputs,
    Search,
    Subckt,
    Latch,
    Names,
    End,
    StartKiss,
    I,
    O,
    S,
    P,
    R,
    EndKiss,
    DefaultInputArrival,
    DefaultOutputRequired,
    DefaultInputDrive,
    DefaultOutputLoad,
    DefaultMaxInputLoad,
    LatchOrder,
    Code,
    Exdc,
}

impl Keyword {
    pub const ALL: [Keyword; 23] = [
        Keyword::Model,
        Keyword::Inputs,
        Keyword::Outputs,
        Keyword::Search,
        Keyword::Subckt,
        Keyword::Latch,
        Keyword::Names,
        Keyword::End,
        Keyword::StartKiss,
        Keyword::I,
        Keyword::O,
        Keyword::S,
        Keyword::P,
        Keyword::R,
        Keyword::EndKiss,
        Keyword::DefaultInputArrival,
        Keyword::DefaultOutputRequired,
        Keyword::DefaultInputDrive,
        Keyword::DefaultOutputLoad,
        Keyword::DefaultMaxInputLoad,
        Keyword::LatchOrder,
        Keyword::Code,
        Keyword::Exdc,
    ];

    /// The keyword as written in a file, leading dot included.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Model => ".model",
            Self::Inputs => ".inputs",
            Self::Outputs => ".outputs",
            Self::Search => ".search",
            Self::Subckt => ".subckt",
            Self::Latch => ".latch",
            Self::Names => ".names",
            Self::End => ".end",
            Self::StartKiss => ".start_kiss",
            Self::I => ".i",
            Self::O => ".o",
            Self::S => ".s",
            Self::P => ".p",
            Self::R => ".r",
            Self::EndKiss => ".end_kiss",
            Self::DefaultInputArrival => ".default_input_arrival",
            Self::DefaultOutputRequired => ".default_output_required",
            Self::DefaultInputDrive => ".default_input_drive",
            Self::DefaultOutputLoad => ".default_output_load",
            Self::DefaultMaxInputLoad => ".default_max_input_load",
            Self::LatchOrder => ".latch_order",
            Self::Code => ".code",
            Self::Exdc => ".exdc",
        }
    }
}

impl FromStr for Keyword {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        Self::ALL
            .into_iter()
            .find(|kw| kw.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed BLIF document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blif {
    pub model: Option<Model>,
    pub inputs: Option<Inputs>,
    pub outputs: Option<Outputs>,
    /// Always present; see [`Fsm::is_present`]
    pub fsm: Fsm,
    /// `.search` entries in declaration order
    pub imports: Vec<Search>,
    pub subcircuits: Vec<Subckt>,
    pub latches: Vec<Latch>,
    pub boolean_functions: Vec<Names>,
    /// Diagnostics in the order they were found
    pub problems: Vec<String>,
    /// Occurrences of each recognized keyword
    pub keyword_counts: BTreeMap<Keyword, usize>,
}

impl Blif {
    /// Create an empty document with every keyword counter at zero.
    pub fn new() -> Self {
        Self {
            model: None,
            inputs: None,
            outputs: None,
            fsm: Fsm::new(),
            imports: Vec::new(),
            subcircuits: Vec::new(),
            latches: Vec::new(),
            boolean_functions: Vec::new(),
            problems: Vec::new(),
            keyword_counts: Keyword::ALL.into_iter().map(|kw| (kw, 0)).collect(),
        }
    }

    /// Number of times `keyword` appeared.
    pub fn keyword_count(&self, keyword: Keyword) -> usize {
        self.keyword_counts.get(&keyword).copied().unwrap_or(0)
    }

    /// Name of the declared model, if any.
    pub fn model_name(&self) -> Option<&str> {
        self.model.as_ref().map(|m| m.name.as_str())
    }

    /// Declared input signals (empty when `.inputs` is missing).
    pub fn input_signals(&self) -> &[String] {
        match &self.inputs {
            Some(ports) => &ports.signals,
            None => &[],
        }
    }

    /// Declared output signals (empty when `.outputs` is missing).
    pub fn output_signals(&self) -> &[String] {
        match &self.outputs {
            Some(ports) => &ports.signals,
            None => &[],
        }
    }

    /// Non-fatal notes attached to entities, prefixed with the entity.
    pub fn warnings(&self) -> Vec<String> {
        self.latches
            .iter()
            .filter_map(|latch| latch.warning().map(|w| format!("{}: {}", latch, w)))
            .collect()
    }

    pub fn has_problems(&self) -> bool {
        !self.problems.is_empty()
    }
}

impl Default for Blif {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Blif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(model) = &self.model {
            writeln!(f, "{}", model)?;
        }
        if let Some(inputs) = &self.inputs {
            writeln!(f, "{}", inputs)?;
        }
        if let Some(outputs) = &self.outputs {
            writeln!(f, "{}", outputs)?;
        }
        writeln!(f)?;

        for import in &self.imports {
            writeln!(f, "{}", import)?;
        }
        for subckt in &self.subcircuits {
            writeln!(f, "{}", subckt)?;
        }
        for latch in &self.latches {
            writeln!(f, "{}", latch)?;
        }
        for function in &self.boolean_functions {
            writeln!(f, "{}", function)?;
        }
        if self.fsm.is_present {
            writeln!(f, "{}", self.fsm)?;
        }

        writeln!(f, ".end")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_round_trip() {
        for kw in Keyword::ALL {
            assert_eq!(kw.as_str().parse::<Keyword>(), Ok(kw));
        }
        assert!(".foo".parse::<Keyword>().is_err());
        assert!("model".parse::<Keyword>().is_err());
    }

    #[test]
    fn test_new_blif_seeds_counters() {
        let blif = Blif::new();
        assert_eq!(blif.keyword_counts.len(), Keyword::ALL.len());
        assert!(blif.keyword_counts.values().all(|&n| n == 0));
        assert!(!blif.fsm.is_present);
        assert!(blif.input_signals().is_empty());
        assert_eq!(blif.model_name(), None);
    }

    #[test]
    fn test_latch_warnings_collected() {
        let mut blif = Blif::new();
        blif.latches.push(Latch::new("d q").unwrap());
        blif.latches.push(Latch::new("d r 1").unwrap());
        assert_eq!(
            blif.warnings(),
            vec![format!(".latch d q: {}", MISSING_INIT_WARNING)]
        );
        assert!(!blif.has_problems());
    }

    #[test]
    fn test_blif_display() {
        let mut blif = Blif::new();
        blif.model = Some(Model::new("top").unwrap());
        blif.inputs = Some(Ports::inputs("a b").unwrap());
        blif.outputs = Some(Ports::outputs("c").unwrap());
        blif.latches.push(Latch::new("c q 0").unwrap());
        let mut names = Names::new("a b c", false).unwrap();
        names.push_row("11 1");
        blif.boolean_functions.push(names);

        assert_eq!(
            blif.to_string(),
            ".model top\n.inputs a b\n.outputs c\n\n.latch c q 0\n.names a b c\n11 1\n.end\n"
        );
    }
}
