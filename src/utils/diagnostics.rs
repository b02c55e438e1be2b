//! Structured syntax diagnostics shared by the lexer and the parser.

use crate::frontend::token::Position;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("{position}: unrecognized character '{ch}'")]
    LexicalError { position: Position, ch: char },

    #[error("{}: unexpected '{}' in {}, expected {}", .position, .found, .rule, describe_expected(.expected))]
    UnexpectedToken {
        rule: &'static str,
        expected: Vec<&'static str>,
        found: String,
        position: Position,
    },

    #[error("{}: unterminated {}, expected {} before end of input", .position, .construct, describe_expected(.expected))]
    UnterminatedConstruct {
        construct: &'static str,
        expected: Vec<&'static str>,
        position: Position,
    },

    #[error("{position}: integer literal '{lexeme}' is out of range")]
    InvalidInteger { lexeme: String, position: Position },
}

impl Diagnostic {
    pub fn position(&self) -> Position {
        match self {
            Diagnostic::LexicalError { position, .. }
            | Diagnostic::UnexpectedToken { position, .. }
            | Diagnostic::UnterminatedConstruct { position, .. }
            | Diagnostic::InvalidInteger { position, .. } => *position,
        }
    }

    pub fn line(&self) -> usize {
        self.position().line
    }
}

fn describe_expected(expected: &[&'static str]) -> String {
    match expected {
        [] => "nothing".to_string(),
        [only] => format!("'{}'", only),
        many => {
            let quoted: Vec<String> = many.iter().map(|e| format!("'{}'", e)).collect();
            format!("one of {}", quoted.join(", "))
        }
    }
}

/// Ordered accumulator of diagnostics for one parse session.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.entries.extend(diagnostics);
    }

    /// All entries in source order. The sort is stable, so reports at the
    /// same position keep the order they were made in.
    pub fn into_vec(mut self) -> Vec<Diagnostic> {
        self.entries.sort_by_key(Diagnostic::position);
        self.entries
    }
}
