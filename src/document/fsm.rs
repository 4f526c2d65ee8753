//! State machine section (`.start_kiss` ... `.end_kiss`).

use std::collections::BTreeSet;
use std::fmt;

use super::fields::{Count, ResetState, StateCode};
use crate::error::{BlifError, Result};

/// One transition table row as read:
/// `<input-pattern> <current-state> <next-state> <output-pattern>`.
///
/// Rows are kept as raw fields until validation so malformed rows can be
/// reported rather than rejected on the line.
pub type TransitionRow = Vec<String>;

/// Optional finite state machine description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fsm {
    /// Number of inputs (`.i`)
    pub i: Option<Count>,
    /// Number of outputs (`.o`)
    pub o: Option<Count>,
    /// Number of distinct states (`.s`)
    pub s: Option<Count>,
    /// Number of transitions (`.p`)
    pub p: Option<Count>,
    /// Reset state (`.r`)
    pub r: Option<ResetState>,
    /// Set once `.start_kiss` has been seen
    pub is_present: bool,
    pub transition_table: Vec<TransitionRow>,
    pub state_codes: Vec<StateCode>,
}

impl Fsm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a payload line split on whitespace.
    pub fn push_row(&mut self, line: &str) {
        self.transition_table
            .push(line.split_whitespace().map(str::to_string).collect());
    }

    /// Distinct state names across all well-formed (4-field) rows.
    pub fn state_names(&self) -> BTreeSet<&str> {
        self.transition_table
            .iter()
            .filter(|row| row.len() == 4)
            .flat_map(|row| [row[1].as_str(), row[2].as_str()])
            .collect()
    }

    /// Validate the section. Stops at the first failure.
    ///
    /// Order: `.i` present, `.o` present, every table row, then `.p`, `.s`
    /// and `.r` when each was supplied.
    pub fn validate(&self) -> Result<()> {
        let inputs = self.i.as_ref().ok_or_else(|| BlifError::fsm(".i must be set"))?;
        let outputs = self.o.as_ref().ok_or_else(|| BlifError::fsm(".o must be set"))?;

        for row in &self.transition_table {
            validate_row(row, inputs.value, outputs.value)?;
        }

        if let Some(p) = &self.p {
            if self.transition_table.len() != p.value {
                return Err(BlifError::fsm(format!(
                    ".p <num-terms> has incorrect <num-terms> value (it should be '{}' instead of '{}' because the transition table has that amount of rows)",
                    self.transition_table.len(),
                    p.text
                )));
            }
        }

        let states = self.state_names();

        if let Some(s) = &self.s {
            if states.len() != s.value {
                return Err(BlifError::fsm(format!(
                    ".s <num-states> has incorrect <num-states> value (it should be '{}' instead of '{}' because the transition table contains that amount of unique states)",
                    states.len(),
                    s.text
                )));
            }
        }

        if let Some(r) = &self.r {
            if !states.contains(r.name.as_str()) {
                return Err(BlifError::fsm(format!(
                    ".r <reset-state> has incorrect <reset-state> value (can't find '{}' in the transition table)",
                    r.name
                )));
            }
        }

        Ok(())
    }
}

fn is_pattern_char(c: char) -> bool {
    matches!(c, '0' | '1' | '-')
}

fn validate_row(row: &[String], num_inputs: usize, num_outputs: usize) -> Result<()> {
    let joined = row.join(" ");
    let [input, _, _, output] = row else {
        return Err(BlifError::fsm(format!(
            "'{}' row of the transition table doesn't have all the expected data (<input> <current-state> <next-state> <output>)",
            joined
        )));
    };

    if !input.chars().all(is_pattern_char) {
        return Err(BlifError::fsm(format!(
            "'{}' input of the '{}' row (transition table) has unexpected characters (accepted chars are ['0', '1', '-'])",
            input, joined
        )));
    }

    let found = input.chars().count();
    if found != num_inputs {
        return Err(BlifError::fsm(format!(
            "'{}' row (transition table) has an unexpected number of inputs (found {} elements in '{}' but expected {} based on the .i parameter)",
            joined, found, input, num_inputs
        )));
    }

    if !output.chars().all(is_pattern_char) {
        return Err(BlifError::fsm(format!(
            "'{}' output of the '{}' row (transition table) has unexpected characters (accepted chars are ['0', '1', '-'])",
            output, joined
        )));
    }

    let found = output.chars().count();
    if found != num_outputs {
        return Err(BlifError::fsm(format!(
            "'{}' row (transition table) has an unexpected number of outputs (found {} elements in '{}' but expected {} based on the .o parameter)",
            joined, found, output, num_outputs
        )));
    }

    Ok(())
}

impl fmt::Display for Fsm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, ".start_kiss")?;
        for count in [&self.i, &self.o, &self.p, &self.s].into_iter().flatten() {
            writeln!(f, "{}", count)?;
        }
        if let Some(r) = &self.r {
            writeln!(f, "{}", r)?;
        }
        for row in &self.transition_table {
            writeln!(f, "{}", row.join(" "))?;
        }
        write!(f, ".end_kiss")?;
        for code in &self.state_codes {
            write!(f, "\n{}", code)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::fields::CountKind;

    fn fsm(i: &str, o: &str, rows: &[&str]) -> Fsm {
        let mut fsm = Fsm::new();
        fsm.is_present = true;
        fsm.i = Some(Count::new(CountKind::Inputs, i).unwrap());
        fsm.o = Some(Count::new(CountKind::Outputs, o).unwrap());
        for row in rows {
            fsm.push_row(row);
        }
        fsm
    }

    fn valid() -> Fsm {
        fsm(
            "1",
            "2",
            &["0 IDLE IDLE 00", "1 IDLE RUN 01", "- RUN IDLE 10"],
        )
    }

    #[test]
    fn test_requires_i_then_o() {
        let mut fsm = Fsm::new();
        assert_eq!(fsm.validate().unwrap_err().to_string(), ".i must be set");
        fsm.i = Some(Count::new(CountKind::Inputs, "1").unwrap());
        assert_eq!(fsm.validate().unwrap_err().to_string(), ".o must be set");
    }

    #[test]
    fn test_input_width() {
        assert!(fsm("6", "1", &["0----- A B 1"]).validate().is_ok());

        let err = fsm("6", "1", &["0---- A B 1"]).validate().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("unexpected number of inputs"));
        assert!(message.contains("found 5 elements in '0----' but expected 6"));
    }

    #[test]
    fn test_row_shape_and_charset() {
        let err = fsm("1", "1", &["0 A 1"]).validate().unwrap_err();
        assert!(err.to_string().contains("doesn't have all the expected data"));

        let err = fsm("1", "1", &["x A B 1"]).validate().unwrap_err();
        assert!(err.to_string().contains("'x' input of the 'x A B 1' row"));

        let err = fsm("1", "1", &["1 A B 2"]).validate().unwrap_err();
        assert!(err.to_string().contains("'2' output"));

        let err = fsm("1", "1", &["1 A B 11"]).validate().unwrap_err();
        assert!(err.to_string().contains("unexpected number of outputs"));
    }

    #[test]
    fn test_first_invalid_row_stops_validation() {
        let err = fsm("1", "1", &["0 A", "xx A B 1"]).validate().unwrap_err();
        assert!(err.to_string().contains("'0 A' row"));
    }

    #[test]
    fn test_optional_headers_are_monotone() {
        let mut fsm = valid();
        fsm.p = Some(Count::new(CountKind::Terms, "3").unwrap());
        fsm.s = Some(Count::new(CountKind::States, "2").unwrap());
        fsm.r = Some(ResetState::new("IDLE").unwrap());
        assert!(fsm.validate().is_ok());

        let mut bad_p = fsm.clone();
        bad_p.p = Some(Count::new(CountKind::Terms, "4").unwrap());
        assert!(bad_p.validate().unwrap_err().to_string().starts_with(".p"));

        let mut bad_s = fsm.clone();
        bad_s.s = Some(Count::new(CountKind::States, "5").unwrap());
        assert!(bad_s.validate().unwrap_err().to_string().starts_with(".s"));

        let mut bad_r = fsm.clone();
        bad_r.r = Some(ResetState::new("HALT").unwrap());
        let message = bad_r.validate().unwrap_err().to_string();
        assert!(message.starts_with(".r"));
        assert!(message.contains("'HALT'"));
    }

    #[test]
    fn test_state_names_skip_malformed_rows() {
        let fsm = fsm("1", "1", &["0 A B 1", "1 C", "1 B D 0"]);
        let names: Vec<_> = fsm.state_names().into_iter().collect();
        assert_eq!(names, vec!["A", "B", "D"]);
    }

    #[test]
    fn test_display() {
        let mut fsm = valid();
        fsm.p = Some(Count::new(CountKind::Terms, "3").unwrap());
        fsm.r = Some(ResetState::new("IDLE").unwrap());
        fsm.state_codes.push(StateCode::new("IDLE 0").unwrap());
        assert_eq!(
            fsm.to_string(),
            ".start_kiss\n.i 1\n.o 2\n.p 3\n.r IDLE\n0 IDLE IDLE 00\n1 IDLE RUN 01\n- RUN IDLE 10\n.end_kiss\n.code IDLE 0"
        );
    }
}
