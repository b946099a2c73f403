//! Parsed command representation
//!
//! A command is a code plus a letter → value map. No machine state here,
//! interpretation happens in the interpreter.

use std::collections::BTreeMap;

use crate::parser::lexer::{Token, TokenKind};

/// A single command line after lexing, e.g. `G1 X6 Y4 F2`
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCommand {
    /// Command code (e.g., "G1", "M6")
    pub code: String,
    /// Numeric parameters keyed by their letter; a repeated letter overwrites
    pub parameters: BTreeMap<char, f64>,
    /// Line text with the comment removed
    pub raw: String,
}

impl ParsedCommand {
    pub fn get(&self, letter: char) -> Option<f64> {
        self.parameters.get(&letter).copied()
    }

    pub fn has(&self, letter: char) -> bool {
        self.parameters.contains_key(&letter)
    }

    pub fn has_parameters(&self) -> bool {
        !self.parameters.is_empty()
    }
}

/// Build a command from a token stream, `None` when there is no code token
pub fn tokens_to_command(tokens: Vec<Token>, raw: &str) -> Option<ParsedCommand> {
    let mut tokens = tokens.into_iter();
    let code = tokens.next().filter(|t| t.kind == TokenKind::Code)?.text;

    let parameters = tokens
        .filter(|t| t.kind == TokenKind::Word)
        .filter_map(|t| parse_parameter_token(&t.text))
        .collect();

    Some(ParsedCommand {
        code,
        parameters,
        raw: raw.to_string(),
    })
}

/// Parse a word like "X10.5" into its letter and value.
///
/// Words that are too short or whose tail is not a finite number are
/// dropped without complaint.
fn parse_parameter_token(text: &str) -> Option<(char, f64)> {
    let mut chars = text.chars();
    let letter = chars.next()?;
    let tail = chars.as_str();

    if tail.is_empty() {
        return None;
    }

    let value: f64 = tail.parse().ok()?;
    value.is_finite().then_some((letter, value))
}
