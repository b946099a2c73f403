//! GCode Parser
//!
//! Lenient line parsing: malformed words are dropped, never reported.
//! Interpretation of the parsed commands lives in `machine`.

pub mod ast;
pub mod lexer;

pub use ast::ParsedCommand;
pub use lexer::{strip_comment, tokenize_line, Token, TokenKind};

/// Parse a single line of GCode
///
/// Returns `None` for blank and comment-only lines.
pub fn parse_line(line: &str) -> Option<ParsedCommand> {
    let tokens = lexer::tokenize_line(line);
    ast::tokens_to_command(tokens, lexer::strip_comment(line))
}
