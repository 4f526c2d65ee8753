//! Keyword-dispatching parser for normalized BLIF lines.

use super::normalize::untag;
use crate::document::{
    Blif, Count, CountKind, Keyword, Latch, Model, Names, Ports, ResetState, Search,
    StateCode, Subckt,
};
use crate::error::{ProblemKind, Result};

/// Which kind of payload line the parser currently expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseMode {
    /// Payload lines are unexpected
    Neutral,
    /// Payload lines are truth table rows of the last `.names`.
    /// `in_kiss` remembers an enclosing FSM body to return to.
    InNames { in_kiss: bool },
    /// Body of a `.names` that failed to construct; rows are unexpected
    Orphan { in_kiss: bool },
    /// Payload lines are FSM transitions
    InFsm,
}

impl ParseMode {
    fn in_kiss(&self) -> bool {
        matches!(
            self,
            Self::InFsm | Self::InNames { in_kiss: true } | Self::Orphan { in_kiss: true }
        )
    }

    /// Mode after any keyword line closes a `.names` body.
    fn leave_names(self) -> Self {
        match self {
            Self::InNames { in_kiss: true } | Self::Orphan { in_kiss: true } => Self::InFsm,
            Self::InNames { in_kiss: false } | Self::Orphan { in_kiss: false } => Self::Neutral,
            other => other,
        }
    }
}

/// Line-oriented BLIF parser.
///
/// Never aborts on a malformed line: each failure is recorded in
/// [`Blif::problems`] and parsing resumes with the next line.
pub struct Parser {
    blif: Blif,
    mode: ParseMode,
    in_model: bool,
    dontcare: bool,
    line: usize,
}

impl Parser {
    pub fn new() -> Self {
        Self {
            blif: Blif::new(),
            mode: ParseMode::Neutral,
            in_model: false,
            dontcare: false,
            line: 1,
        }
    }

    /// Consume every normalized line and return the validated document.
    pub fn parse<I, S>(mut self, lines: I) -> Blif
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.parse_line(line.as_ref());
        }
        self.finish()
    }

    /// Handle a single normalized line.
    pub fn parse_line(&mut self, raw: &str) {
        let (number, text) = untag(raw);
        if let Some(number) = number {
            self.line = number;
        }

        if text.is_empty() {
            return;
        }

        if let Err(e) = self.dispatch(&text) {
            let line = self.line;
            self.problem(ProblemKind::Parsing, e);
            tracing::debug!(line, "recovered from parsing error");
        }
    }

    fn dispatch(&mut self, text: &str) -> Result<()> {
        if text.starts_with('.') {
            let mut parts = text.split_whitespace();
            let keyword = parts.next().unwrap_or_default();
            let params = parts.collect::<Vec<_>>().join(" ");
            self.mode = self.mode.leave_names();
            self.keyword(keyword, &params)
        } else {
            self.payload(text);
            Ok(())
        }
    }

    fn keyword(&mut self, keyword: &str, params: &str) -> Result<()> {
        let Ok(kw) = keyword.parse::<Keyword>() else {
            self.problem(
                ProblemKind::Error,
                format!("Invalid keyword: '{}'", keyword),
            );
            return Ok(());
        };

        tracing::trace!(line = self.line, keyword, params, "dispatching keyword");

        match kw {
            Keyword::Model => {
                self.in_model = true;
                self.blif.model = Some(Model::new(params)?);
            }
            Keyword::Inputs => self.blif.inputs = Some(Ports::inputs(params)?),
            Keyword::Outputs => self.blif.outputs = Some(Ports::outputs(params)?),
            Keyword::Search => self.blif.imports.push(Search::new(params)?),
            Keyword::Names => {
                let in_kiss = self.mode.in_kiss();
                self.mode = ParseMode::Orphan { in_kiss };
                let names = Names::new(params, self.dontcare)?;
                self.blif.boolean_functions.push(names);
                self.mode = ParseMode::InNames { in_kiss };
            }
            Keyword::Latch => self.blif.latches.push(Latch::new(params)?),
            Keyword::Subckt => self.blif.subcircuits.push(Subckt::new(params)?),
            Keyword::StartKiss => {
                self.blif.fsm.is_present = true;
                self.mode = ParseMode::InFsm;
            }
            Keyword::I => {
                self.expect_kiss(kw);
                self.blif.fsm.i = Some(Count::new(CountKind::Inputs, params)?);
            }
            Keyword::O => {
                self.expect_kiss(kw);
                self.blif.fsm.o = Some(Count::new(CountKind::Outputs, params)?);
            }
            Keyword::S => {
                self.expect_kiss(kw);
                self.blif.fsm.s = Some(Count::new(CountKind::States, params)?);
            }
            Keyword::P => {
                self.expect_kiss(kw);
                self.blif.fsm.p = Some(Count::new(CountKind::Terms, params)?);
            }
            Keyword::R => {
                self.expect_kiss(kw);
                self.blif.fsm.r = Some(ResetState::new(params)?);
            }
            Keyword::EndKiss => {
                if !self.mode.in_kiss() {
                    self.problem(
                        ProblemKind::Error,
                        "Unexpected end of fsm: there needs to be a .start_kiss keyword BEFORE the .end_kiss keyword",
                    );
                }
                self.mode = ParseMode::Neutral;
            }
            Keyword::Exdc => self.dontcare = true,
            Keyword::Code => self.blif.fsm.state_codes.push(StateCode::new(params)?),
            Keyword::End => {
                if !self.in_model {
                    self.problem(ProblemKind::Error, "Unexpected end of model");
                }
                self.in_model = false;
            }
            Keyword::DefaultInputArrival
            | Keyword::DefaultOutputRequired
            | Keyword::DefaultInputDrive
            | Keyword::DefaultOutputLoad
            | Keyword::DefaultMaxInputLoad
            | Keyword::LatchOrder => {}
        }

        *self.blif.keyword_counts.entry(kw).or_insert(0) += 1;
        Ok(())
    }

    fn payload(&mut self, text: &str) {
        match self.mode {
            ParseMode::InNames { .. } => {
                if let Some(names) = self.blif.boolean_functions.last_mut() {
                    names.push_row(text);
                }
            }
            ParseMode::InFsm => self.blif.fsm.push_row(text),
            ParseMode::Neutral | ParseMode::Orphan { .. } => {
                self.problem(ProblemKind::Error, format!("Unexpected text: '{}'", text));
            }
        }
    }

    /// Record a diagnostic for an FSM header keyword outside the FSM body.
    fn expect_kiss(&mut self, kw: Keyword) {
        if !self.mode.in_kiss() {
            self.problem(
                ProblemKind::Error,
                format!(
                    "Unexpected {} keyword: needs to be between .start_kiss and .end_kiss keywords",
                    kw
                ),
            );
        }
    }

    fn problem(&mut self, kind: ProblemKind, message: impl std::fmt::Display) {
        self.blif
            .problems
            .push(kind.diagnostic(Some(self.line), message));
    }

    /// Run end-of-document validation and hand out the document.
    fn finish(mut self) -> Blif {
        if self.blif.fsm.is_present {
            if let Err(e) = self.blif.fsm.validate() {
                self.blif.problems.push(ProblemKind::Fsm.diagnostic(None, e));
            }
        }

        let failures: Vec<String> = self
            .blif
            .boolean_functions
            .iter()
            .filter_map(|names| names.validate().err())
            .map(|e| ProblemKind::BooleanFunction.diagnostic(None, e))
            .collect();
        self.blif.problems.extend(failures);

        tracing::debug!(
            model = self.blif.model_name().unwrap_or("<none>"),
            problems = self.blif.problems.len(),
            "parsed BLIF document"
        );
        self.blif
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{InitValue, LatchType};
    use crate::parser::normalize::tag;

    fn parse(text: &str) -> Blif {
        crate::parser::parse_str(text)
    }

    #[test]
    fn test_parse_simple_model() {
        let blif = parse(".model m\n.inputs a b\n.outputs c\n.names a b c\n11 1\n.end\n");
        assert_eq!(blif.model_name(), Some("m"));
        assert_eq!(blif.input_signals(), ["a", "b"]);
        assert_eq!(blif.output_signals(), ["c"]);
        assert_eq!(blif.boolean_functions.len(), 1);
        let names = &blif.boolean_functions[0];
        assert_eq!(names.inputs, vec!["a", "b"]);
        assert_eq!(names.output, "c");
        assert_eq!(names.truth_table, vec![vec!['1', '1', '1']]);
        assert!(blif.problems.is_empty(), "{:?}", blif.problems);
        assert_eq!(blif.keyword_count(Keyword::Names), 1);
        assert_eq!(blif.keyword_count(Keyword::End), 1);
    }

    #[test]
    fn test_unknown_keyword_does_not_halt() {
        let blif = parse(".model m\n.inputs a\n.foo bar\n.outputs b\n.end\n");
        assert_eq!(blif.problems.len(), 1);
        assert!(blif.problems[0].contains("LINE ~ 3"));
        assert!(blif.problems[0].contains("Invalid keyword: '.foo'"));
        assert_eq!(blif.output_signals(), ["b"]);
        assert_eq!(blif.keyword_counts.len(), Keyword::ALL.len());
    }

    #[test]
    fn test_construction_error_is_line_tagged() {
        let blif = parse(".model m\n\n.latch a\n.end\n");
        assert_eq!(blif.problems.len(), 1);
        assert!(blif.problems[0].starts_with("[PARSING ERROR][LINE ~ 3] "));
        assert_eq!(blif.keyword_count(Keyword::Latch), 0);
        assert!(blif.latches.is_empty());
    }

    #[test]
    fn test_unexpected_text() {
        let blif = parse(".model m\nstray words\n.end\n");
        assert_eq!(
            blif.problems,
            vec!["[ERROR][LINE ~ 2] Unexpected text: 'stray words'"]
        );
    }

    #[test]
    fn test_unexpected_end() {
        let blif = parse(".inputs a\n.end\n");
        assert_eq!(blif.problems, vec!["[ERROR][LINE ~ 2] Unexpected end of model"]);
    }

    #[test]
    fn test_fsm_keywords_outside_kiss_still_set() {
        let blif = parse(".model m\n.i 2\n.end\n");
        assert_eq!(blif.problems.len(), 1);
        assert!(blif.problems[0].contains("Unexpected .i keyword"));
        assert_eq!(blif.fsm.i.as_ref().map(|c| c.value), Some(2));
        assert!(!blif.fsm.is_present);
    }

    #[test]
    fn test_end_kiss_without_start() {
        let blif = parse(".model m\n.end_kiss\n.end\n");
        assert!(blif.problems[0].contains("Unexpected end of fsm"));
    }

    #[test]
    fn test_fsm_body() {
        let blif = parse(
            ".model ctrl\n.start_kiss\n.i 1\n.o 1\n.s 2\n.p 2\n.r A\n0 A B 1\n1 B A 0\n.end_kiss\n.code A 0\n.code B 1\n.end\n",
        );
        assert!(blif.problems.is_empty(), "{:?}", blif.problems);
        assert!(blif.fsm.is_present);
        assert_eq!(blif.fsm.transition_table.len(), 2);
        assert_eq!(blif.fsm.transition_table[0], vec!["0", "A", "B", "1"]);
        assert_eq!(blif.fsm.state_codes.len(), 2);
        assert_eq!(blif.keyword_count(Keyword::Code), 2);
    }

    #[test]
    fn test_fsm_problem_reported_once() {
        let blif = parse(".model m\n.start_kiss\n.i 2\n.o 1\n0 A B 1\n0- B A 1\n.end_kiss\n.end\n");
        assert_eq!(blif.problems.len(), 1);
        assert!(blif.problems[0].starts_with("[FSM PROBLEM] "));
        assert!(blif.problems[0].contains("unexpected number of inputs"));
    }

    #[test]
    fn test_each_boolean_function_validated() {
        let blif = parse(
            ".model m\n.names a b\n1 1\n.names a b c\n1 1\n.names c d\nx 1\n.end\n",
        );
        let failures: Vec<_> = blif
            .problems
            .iter()
            .filter(|p| p.starts_with("[BOOLEAN FUNCTION PROBLEM]"))
            .collect();
        assert_eq!(failures.len(), 2);
    }

    #[test]
    fn test_keyword_leaves_names_body() {
        let blif = parse(".model m\n.names a b\n1 1\n.latch b q 0\n1 1\n.end\n");
        assert_eq!(blif.boolean_functions[0].truth_table.len(), 1);
        assert_eq!(blif.problems.len(), 1);
        assert!(blif.problems[0].contains("Unexpected text: '1 1'"));
    }

    #[test]
    fn test_names_inside_kiss_returns_to_fsm() {
        let blif = parse(
            ".model m\n.start_kiss\n.i 1\n.o 1\n.names x y\n1 1\n.p 1\n0 A A 1\n.end_kiss\n.end\n",
        );
        assert!(blif.problems.is_empty(), "{:?}", blif.problems);
        assert_eq!(blif.boolean_functions[0].truth_table.len(), 1);
        assert_eq!(blif.fsm.transition_table.len(), 1);
    }

    #[test]
    fn test_failed_names_rows_stay_out_of_fsm() {
        let blif = parse(
            ".model m\n.start_kiss\n.i 1\n.o 1\n.names\n1 1\n0 A A 1\n.end_kiss\n.end\n",
        );
        assert_eq!(blif.fsm.transition_table.len(), 0);
        assert_eq!(
            blif.problems,
            vec![
                "[PARSING ERROR][LINE ~ 5] params should contain at least one parameter",
                "[ERROR][LINE ~ 6] Unexpected text: '1 1'",
                "[ERROR][LINE ~ 7] Unexpected text: '0 A A 1'",
            ]
        );

        // the FSM body resumes after the next keyword
        let blif = parse(
            ".model m\n.start_kiss\n.i 1\n.o 1\n.names\n1 1\n.p 1\n0 A A 1\n.end_kiss\n.end\n",
        );
        assert_eq!(blif.fsm.transition_table.len(), 1);
        assert_eq!(blif.problems.len(), 2, "{:?}", blif.problems);
    }

    #[test]
    fn test_oversized_count_is_accepted() {
        let blif = parse(
            ".model m\n.start_kiss\n.i 1\n.o 1\n.p 9999999999999999999999999\n0 A A 1\n.end_kiss\n.end\n",
        );
        assert_eq!(blif.problems.len(), 1, "{:?}", blif.problems);
        assert!(blif.problems[0].starts_with("[FSM PROBLEM] .p <num-terms> has incorrect"));
        assert!(!blif.problems.iter().any(|p| p.contains("needs to be numeric")));
    }

    #[test]
    fn test_exdc_marks_following_names() {
        let blif = parse(".model m\n.names a b\n1 1\n.exdc\n.names a c\n0 1\n.end\n");
        assert!(!blif.boolean_functions[0].is_dontcare);
        assert!(blif.boolean_functions[1].is_dontcare);
    }

    #[test]
    fn test_latch_and_subckt() {
        let blif = parse(".model m\n.latch d q re clk 1\n.subckt add a=x b=y\n.search lib.blif\n.end\n");
        assert!(blif.problems.is_empty());
        assert_eq!(blif.latches[0].latch_type(), Some(LatchType::RisingEdge));
        assert_eq!(blif.latches[0].init_value(), Some(InitValue::One));
        assert_eq!(blif.subcircuits[0].model_name, "add");
        assert_eq!(blif.imports[0].filepath, "lib.blif");
    }

    #[test]
    fn test_latch_without_init_is_warning_not_problem() {
        let blif = parse(".model m\n.latch d q\n.end\n");
        assert!(blif.problems.is_empty());
        assert_eq!(blif.warnings().len(), 1);
        assert!(blif.warnings()[0].starts_with(".latch d q: WARNING"));
    }

    #[test]
    fn test_counted_only_keywords() {
        let blif = parse(".model m\n.default_input_arrival 0 0\n.latch_order a b\n.end\n");
        assert!(blif.problems.is_empty());
        assert_eq!(blif.keyword_count(Keyword::DefaultInputArrival), 1);
        assert_eq!(blif.keyword_count(Keyword::LatchOrder), 1);
    }

    #[test]
    fn test_untagged_lines_reuse_last_number() {
        let lines = vec![tag(7, ".model m"), ".bogus".to_string()];
        let blif = Parser::new().parse(lines);
        assert!(blif.problems[0].contains("LINE ~ 7"));
    }

    #[test]
    fn test_render_round_trip() {
        let source = ".model m\n.inputs a b\n.outputs c\n\n.latch c q 2\n.names a b c\n11 1\n0- 0\n.end\n";
        let blif = parse(source);
        assert!(blif.problems.is_empty());
        assert_eq!(blif.to_string(), source);
        assert_eq!(parse(&blif.to_string()), blif);
    }
}
