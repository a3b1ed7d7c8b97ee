//! Line classifier
//!
//! Looks at one normalized line of source text and decides what it means for
//! the state machine. Matching is textual; no attempt is made to tokenize the
//! language.

use crate::config::ExtractConfig;

/// What a single line contributes to the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// `switch (var)`. `variable` is `None` when no parenthesised name was found.
    DispatchOpen { variable: Option<&'a str> },

    /// `case NAME:`. `state` is `None` when the keyword has no operand.
    BranchLabel { state: Option<&'a str> },

    /// `var = DEST;` for the captured state variable
    Assignment { destination: String },

    Irrelevant,
}

/// Classifies lines against configurable dispatch and branch keywords
#[derive(Debug, Clone)]
pub struct LineClassifier {
    dispatch_keyword: String,
    branch_keyword: String,
    strip_whitespace: bool,
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new(&ExtractConfig::default())
    }
}

impl LineClassifier {
    pub fn new(config: &ExtractConfig) -> Self {
        Self {
            dispatch_keyword: config.dispatch_keyword.trim().to_string(),
            branch_keyword: config.branch_keyword.trim().to_string(),
            strip_whitespace: config.strip_whitespace,
        }
    }

    /// Classify one line.
    ///
    /// `line` must already be trimmed. Assignments are only recognised once
    /// `state_variable` is known.
    pub fn classify<'l>(&self, line: &'l str, state_variable: Option<&str>) -> LineClass<'l> {
        if let Some(rest) = strip_keyword(line, &self.dispatch_keyword) {
            return LineClass::DispatchOpen {
                variable: dispatch_variable(rest),
            };
        }

        if let Some(rest) = strip_keyword(line, &self.branch_keyword) {
            return LineClass::BranchLabel {
                state: branch_state(rest),
            };
        }

        if let Some(variable) = state_variable {
            let pattern = format!("{} = ", variable);
            if let Some(pos) = line.find(&pattern) {
                return LineClass::Assignment {
                    destination: self.destination(&line[pos + pattern.len()..]),
                };
            }
        }

        LineClass::Irrelevant
    }

    /// Right-hand side of the assignment up to its `;` terminator
    fn destination(&self, rhs: &str) -> String {
        let rhs = rhs.split(';').next().unwrap_or_default();
        if self.strip_whitespace {
            rhs.split_whitespace().collect()
        } else {
            rhs.trim().to_string()
        }
    }
}

/// Returns the text after `keyword` if the line starts with it as a whole word
fn strip_keyword<'l>(line: &'l str, keyword: &str) -> Option<&'l str> {
    let rest = line.strip_prefix(keyword)?;
    match rest.chars().next() {
        Some(c) if c.is_alphanumeric() || c == '_' => None,
        _ => Some(rest),
    }
}

fn dispatch_variable(rest: &str) -> Option<&str> {
    let start = rest.find('(')? + 1;
    let end = start + rest[start..].find(')')?;
    let variable = rest[start..end].trim();
    (!variable.is_empty()).then_some(variable)
}

fn branch_state(rest: &str) -> Option<&str> {
    let token = rest.split_whitespace().next()?;
    let state = token.split(':').next().unwrap_or_default();
    (!state.is_empty()).then_some(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify<'l>(line: &'l str, state_variable: Option<&str>) -> LineClass<'l> {
        LineClassifier::default().classify(line, state_variable)
    }

    #[test]
    fn test_dispatch_open() {
        assert_eq!(
            classify("switch (st) {", None),
            LineClass::DispatchOpen { variable: Some("st") }
        );
        assert_eq!(
            classify("switch(serial_state){", Some("st")),
            LineClass::DispatchOpen {
                variable: Some("serial_state")
            }
        );
        assert_eq!(
            classify("switch ( st )", None),
            LineClass::DispatchOpen { variable: Some("st") }
        );
    }

    #[test]
    fn test_dispatch_without_variable() {
        assert_eq!(
            classify("switch", None),
            LineClass::DispatchOpen { variable: None }
        );
        assert_eq!(
            classify("switch () {", None),
            LineClass::DispatchOpen { variable: None }
        );
    }

    #[test]
    fn test_keyword_must_be_whole_word() {
        assert_eq!(classify("switcher(st);", None), LineClass::Irrelevant);
        assert_eq!(classify("cases = 3;", None), LineClass::Irrelevant);
        assert_eq!(classify("// switch (st)", None), LineClass::Irrelevant);
    }

    #[test]
    fn test_branch_label() {
        assert_eq!(
            classify("case WAIT_ADDR:", Some("st")),
            LineClass::BranchLabel {
                state: Some("WAIT_ADDR")
            }
        );
        assert_eq!(
            classify("case A: st = B;", Some("st")),
            LineClass::BranchLabel { state: Some("A") }
        );
        assert_eq!(
            classify("case 'x' :", Some("st")),
            LineClass::BranchLabel { state: Some("'x'") }
        );
        assert_eq!(
            classify("case A:{", Some("st")),
            LineClass::BranchLabel { state: Some("A") }
        );
        assert_eq!(
            classify("case :", Some("st")),
            LineClass::BranchLabel { state: None }
        );
        assert_eq!(
            classify("case", Some("st")),
            LineClass::BranchLabel { state: None }
        );
    }

    #[test]
    fn test_assignment() {
        assert_eq!(
            classify("st = B;", Some("st")),
            LineClass::Assignment {
                destination: "B".to_string()
            }
        );
        assert_eq!(
            classify("if (c == 'A') st = GOT_A;", Some("st")),
            LineClass::Assignment {
                destination: "GOT_A".to_string()
            }
        );
    }

    #[test]
    fn test_assignment_stops_at_terminator() {
        assert_eq!(
            classify("st = IDLE; count = 0;", Some("st")),
            LineClass::Assignment {
                destination: "IDLE".to_string()
            }
        );
        assert_eq!(
            classify("st = IDLE // no terminator", Some("st")),
            LineClass::Assignment {
                destination: "IDLE//noterminator".to_string()
            }
        );
    }

    #[test]
    fn test_assignment_requires_state_variable() {
        assert_eq!(classify("st = B;", None), LineClass::Irrelevant);
        assert_eq!(classify("other = B;", Some("st")), LineClass::Irrelevant);
        assert_eq!(classify("st=B;", Some("st")), LineClass::Irrelevant);
    }

    #[test]
    fn test_destination_whitespace_handling() {
        let stripping = LineClassifier::default();
        assert_eq!(
            stripping.classify("st = NEXT STATE ;", Some("st")),
            LineClass::Assignment {
                destination: "NEXTSTATE".to_string()
            }
        );

        let raw = LineClassifier::new(&ExtractConfig {
            strip_whitespace: false,
            ..ExtractConfig::default()
        });
        assert_eq!(
            raw.classify("st = NEXT STATE ;", Some("st")),
            LineClass::Assignment {
                destination: "NEXT STATE".to_string()
            }
        );
    }

    #[test]
    fn test_custom_keywords() {
        let classifier = LineClassifier::new(&ExtractConfig {
            dispatch_keyword: "match".to_string(),
            branch_keyword: "when".to_string(),
            strip_whitespace: true,
        });
        assert_eq!(
            classifier.classify("match (mode)", None),
            LineClass::DispatchOpen {
                variable: Some("mode")
            }
        );
        assert_eq!(
            classifier.classify("when IDLE:", Some("mode")),
            LineClass::BranchLabel { state: Some("IDLE") }
        );
        assert_eq!(
            classifier.classify("switch (st)", None),
            LineClass::Irrelevant
        );
    }
}
