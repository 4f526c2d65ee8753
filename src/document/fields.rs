//! Single-keyword field types.
//!
//! Each type validates its own parameter string at construction and renders
//! back to its keyword-line form through `Display`.

use std::fmt;

use crate::error::{BlifError, Result};

/// Split a parameter string on whitespace, discarding empty tokens.
pub(crate) fn tokens(params: &str) -> Vec<String> {
    params.split_whitespace().map(str::to_string).collect()
}

/// Validate a single whitespace-free identifier parameter.
fn single_name(keyword: &str, params: &str) -> Result<String> {
    let name = params.trim();
    if name.is_empty() || name.contains(char::is_whitespace) {
        return Err(BlifError::format(
            keyword,
            format!(
                "{} accepts (and needs) only one parameter (the parameter can't contain spaces)",
                keyword
            ),
        ));
    }
    Ok(name.to_string())
}

/// `.model <name>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    pub name: String,
}

impl Model {
    pub fn new(params: &str) -> Result<Self> {
        Ok(Self {
            name: single_name(".model", params)?,
        })
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".model {}", self.name)
    }
}

/// Direction of a declared port list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    Input,
    Output,
}

impl PortDirection {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Input => ".inputs",
            Self::Output => ".outputs",
        }
    }
}

/// `.inputs` / `.outputs` signal list.
///
/// Order is the declared port order. Duplicate signal names are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ports {
    pub direction: PortDirection,
    pub signals: Vec<String>,
}

/// `.inputs <signal>...`
pub type Inputs = Ports;
/// `.outputs <signal>...`
pub type Outputs = Ports;

impl Ports {
    pub fn new(direction: PortDirection, params: &str) -> Result<Self> {
        let signals = tokens(params);
        if signals.is_empty() {
            return Err(BlifError::format(
                direction.keyword(),
                format!("{} keyword expects at least one parameter", direction.keyword()),
            ));
        }
        Ok(Self { direction, signals })
    }

    pub fn inputs(params: &str) -> Result<Self> {
        Self::new(PortDirection::Input, params)
    }

    pub fn outputs(params: &str) -> Result<Self> {
        Self::new(PortDirection::Output, params)
    }
}

impl fmt::Display for Ports {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.direction.keyword(), self.signals.join(" "))
    }
}

/// `.search <file>`: a file providing sub-model definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Search {
    pub filepath: String,
}

impl Search {
    pub fn new(params: &str) -> Result<Self> {
        let filepath = params.trim();
        if filepath.is_empty() {
            return Err(BlifError::format(".search", ".search needs one parameter"));
        }
        Ok(Self {
            filepath: filepath.to_string(),
        })
    }
}

impl fmt::Display for Search {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".search {}", self.filepath)
    }
}

/// One `port=signal` binding of a sub-circuit instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Port name on the referenced model
    pub port: String,
    /// Signal name in the instantiating model
    pub signal: String,
}

impl Binding {
    pub fn new(param: &str) -> Result<Self> {
        let (port, signal) = param.split_once('=').ok_or_else(|| {
            BlifError::format(
                ".subckt",
                format!(
                    "'{}' parameter is incorrect (there needs to be an equal sign '=')",
                    param
                ),
            )
        })?;
        Ok(Self {
            port: port.to_string(),
            signal: signal.to_string(),
        })
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.port, self.signal)
    }
}

/// `.subckt <model> <port=signal>...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subckt {
    pub model_name: String,
    pub bindings: Vec<Binding>,
}

impl Subckt {
    pub fn new(params: &str) -> Result<Self> {
        let mut params = tokens(params).into_iter();
        let model_name = params.next();
        let bindings = params
            .map(|p| Binding::new(&p))
            .collect::<Result<Vec<_>>>()?;

        match model_name {
            Some(model_name) if !bindings.is_empty() => Ok(Self {
                model_name,
                bindings,
            }),
            _ => Err(BlifError::format(
                ".subckt",
                ".subckt expects at least two parameters",
            )),
        }
    }
}

impl fmt::Display for Subckt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".subckt {}", self.model_name)?;
        for binding in &self.bindings {
            write!(f, " {}", binding)?;
        }
        Ok(())
    }
}

/// Which FSM header keyword a [`Count`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountKind {
    /// `.i`: number of inputs
    Inputs,
    /// `.o`: number of outputs
    Outputs,
    /// `.s`: number of distinct states
    States,
    /// `.p`: number of transitions
    Terms,
}

impl CountKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Inputs => ".i",
            Self::Outputs => ".o",
            Self::States => ".s",
            Self::Terms => ".p",
        }
    }
}

/// Numeric FSM header field (`.i .o .s .p`).
///
/// Keeps the trimmed text exactly as written so rendering round-trips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Count {
    pub kind: CountKind,
    pub text: String,
    /// Parsed value, saturated at `usize::MAX`
    pub value: usize,
}

impl Count {
    pub fn new(kind: CountKind, params: &str) -> Result<Self> {
        let text = params.trim();
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BlifError::value(
                kind.keyword(),
                format!(
                    "{} parameter needs to be numeric (it must be made of digits 0-9)",
                    kind.keyword()
                ),
            ));
        }

        // Counts too large for usize saturate; no table can match them.
        let value = text.parse::<usize>().unwrap_or(usize::MAX);

        Ok(Self {
            kind,
            text: text.to_string(),
            value,
        })
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.keyword(), self.text)
    }
}

/// `.r <state>`: the reset state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetState {
    pub name: String,
}

impl ResetState {
    pub fn new(params: &str) -> Result<Self> {
        Ok(Self {
            name: single_name(".r", params)?,
        })
    }
}

impl fmt::Display for ResetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".r {}", self.name)
    }
}

/// `.code <state> <bits>`: a state encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateCode {
    pub state_name: String,
    pub encoding: String,
}

impl StateCode {
    pub fn new(params: &str) -> Result<Self> {
        let params = tokens(params);
        let [state_name, encoding]: [String; 2] = params
            .try_into()
            .map_err(|_| BlifError::format(".code", ".code expects two parameters"))?;

        if !encoding.chars().all(|c| c == '0' || c == '1') {
            return Err(BlifError::value(
                ".code",
                format!(
                    "Unexpected char in the state encoding (only '0's and '1's are accepted): .code {} {}",
                    state_name, encoding
                ),
            ));
        }

        Ok(Self {
            state_name,
            encoding,
        })
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".code {} {}", self.state_name, self.encoding)
    }
}
