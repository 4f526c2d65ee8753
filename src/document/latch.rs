//! `.latch` definitions.

use std::fmt;
use std::str::FromStr;

use super::fields::tokens;
use crate::error::{BlifError, Result};

/// Latch clocking behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatchType {
    /// `fe`
    FallingEdge,
    /// `re`
    RisingEdge,
    /// `ah`
    ActiveHigh,
    /// `al`
    ActiveLow,
    /// `as`
    Asynchronous,
}

impl LatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FallingEdge => "fe",
            Self::RisingEdge => "re",
            Self::ActiveHigh => "ah",
            Self::ActiveLow => "al",
            Self::Asynchronous => "as",
        }
    }
}

impl FromStr for LatchType {
    type Err = BlifError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "fe" => Ok(Self::FallingEdge),
            "re" => Ok(Self::RisingEdge),
            "ah" => Ok(Self::ActiveHigh),
            "al" => Ok(Self::ActiveLow),
            "as" => Ok(Self::Asynchronous),
            _ => Err(BlifError::value(
                ".latch",
                "<type> should be one of these values: ['fe', 're', 'ah', 'al', 'as']",
            )),
        }
    }
}

impl fmt::Display for LatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Initial register value.
///
/// `2` and `3` are markers, not register contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitValue {
    Zero,
    One,
    DontCare,
    Unknown,
}

impl InitValue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zero => "0",
            Self::One => "1",
            Self::DontCare => "2",
            Self::Unknown => "3",
        }
    }
}

impl FromStr for InitValue {
    type Err = BlifError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "0" => Ok(Self::Zero),
            "1" => Ok(Self::One),
            "2" => Ok(Self::DontCare),
            "3" => Ok(Self::Unknown),
            _ => Err(BlifError::value(
                ".latch",
                "<init-val> should be one of these values: ['0', '1', '2', '3']",
            )),
        }
    }
}

impl fmt::Display for InitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `.latch` line, one variant per accepted parameter count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Latch {
    /// `.latch <input> <output>`
    Minimal { input: String, output: String },
    /// `.latch <input> <output> <init-val>`
    WithInit {
        input: String,
        output: String,
        init: InitValue,
    },
    /// `.latch <input> <output> <type> <control>`
    Timed {
        input: String,
        output: String,
        latch_type: LatchType,
        control: String,
    },
    /// `.latch <input> <output> <type> <control> <init-val>`
    TimedWithInit {
        input: String,
        output: String,
        latch_type: LatchType,
        control: String,
        init: InitValue,
    },
}

/// Note attached to a latch declared without an initial value.
pub const MISSING_INIT_WARNING: &str = "WARNING: you should specify the initial value \
(otherwise you'll need to set it later using the set_state command)";

impl Latch {
    pub fn new(params: &str) -> Result<Self> {
        let params = tokens(params);

        match params.as_slice() {
            [] | [_] => Err(BlifError::format(
                ".latch",
                "You need to specify at least an input and an output",
            )),
            [input, output] => {
                tracing::warn!(
                    input = %input,
                    output = %output,
                    "latch has no initial value (it will need to be set later)"
                );
                Ok(Self::Minimal {
                    input: input.clone(),
                    output: output.clone(),
                })
            }
            [input, output, init] => Ok(Self::WithInit {
                input: input.clone(),
                output: output.clone(),
                init: init.parse()?,
            }),
            [input, output, latch_type, control] => Ok(Self::Timed {
                input: input.clone(),
                output: output.clone(),
                latch_type: latch_type.parse()?,
                control: control.clone(),
            }),
            [input, output, latch_type, control, init] => {
                let latch_type = latch_type.parse()?;
                Ok(Self::TimedWithInit {
                    input: input.clone(),
                    output: output.clone(),
                    latch_type,
                    control: control.clone(),
                    init: init.parse()?,
                })
            }
            _ => Err(BlifError::format(
                ".latch",
                "Too many parameters (correct usage is: .latch <input> <output> [<type> <control>] [<init-val>])",
            )),
        }
    }

    pub fn input(&self) -> &str {
        match self {
            Self::Minimal { input, .. }
            | Self::WithInit { input, .. }
            | Self::Timed { input, .. }
            | Self::TimedWithInit { input, .. } => input,
        }
    }

    pub fn output(&self) -> &str {
        match self {
            Self::Minimal { output, .. }
            | Self::WithInit { output, .. }
            | Self::Timed { output, .. }
            | Self::TimedWithInit { output, .. } => output,
        }
    }

    pub fn latch_type(&self) -> Option<LatchType> {
        match self {
            Self::Timed { latch_type, .. } | Self::TimedWithInit { latch_type, .. } => {
                Some(*latch_type)
            }
            _ => None,
        }
    }

    pub fn control(&self) -> Option<&str> {
        match self {
            Self::Timed { control, .. } | Self::TimedWithInit { control, .. } => Some(control),
            _ => None,
        }
    }

    /// Non-fatal note about this declaration, if any.
    pub fn warning(&self) -> Option<&'static str> {
        match self {
            Self::Minimal { .. } => Some(MISSING_INIT_WARNING),
            _ => None,
        }
    }

    pub fn init_value(&self) -> Option<InitValue> {
        match self {
            Self::WithInit { init, .. } | Self::TimedWithInit { init, .. } => Some(*init),
            _ => None,
        }
    }
}

impl fmt::Display for Latch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".latch {} {}", self.input(), self.output())?;
        if let (Some(latch_type), Some(control)) = (self.latch_type(), self.control()) {
            write!(f, " {} {}", latch_type, control)?;
        }
        if let Some(init) = self.init_value() {
            write!(f, " {}", init)?;
        }
        Ok(())
    }
}
