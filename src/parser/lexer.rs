//! GCode Lexer
//!
//! Splits a line into a command code followed by parameter words.
//! Comments start at the first `;` and run to the end of the line.

/// Token types in a command line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    /// Leading command code like "G1", "M6"
    Code,
    /// Parameter word like "X10", "F2.5"
    Word,
}

/// A token with its upper-cased text
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

/// Remove the trailing `;` comment and surrounding whitespace
pub fn strip_comment(line: &str) -> &str {
    match line.find(';') {
        Some(idx) => line[..idx].trim(),
        None => line.trim(),
    }
}

/// Tokenize a line of GCode.
///
/// The first whitespace-separated token is the code, everything after it is
/// a word. Blank and comment-only lines produce no tokens.
pub fn tokenize_line(line: &str) -> Vec<Token> {
    let upper = strip_comment(line).to_uppercase();

    upper
        .split_whitespace()
        .enumerate()
        .map(|(idx, text)| Token {
            kind: if idx == 0 {
                TokenKind::Code
            } else {
                TokenKind::Word
            },
            text: text.to_string(),
        })
        .collect()
}
