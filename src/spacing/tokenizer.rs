//! logos-based lexer for spacing lengths.
//!
//! A spacing string is a number optionally followed by a unit: `12`, `12px`, `1.5rem`,
//! `.5em`, `5%`, `2vw`. Units are lexed as identifiers and validated by the parser so
//! that unknown units produce a helpful error instead of a lexer failure.

use logos::Logos;

/// Spacing token produced by the lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    /// Unsigned integer or decimal: `12`, `1.5`, `.5`.
    #[regex(r"[0-9]+(\.[0-9]+)?|\.[0-9]+")]
    Number,

    /// Unit identifier: `px`, `rem`, `em`, `vw`.
    #[regex(r"[a-zA-Z]+")]
    Unit,

    /// `%`
    #[token("%")]
    Percent,

    /// `-` (only valid to report negative lengths)
    #[token("-")]
    Minus,
}

/// Tokenize a spacing string into `(Token, &str)` pairs.
///
/// Returns `Err(offset)` with the byte offset of the first character that does not lex.
pub fn tokenize(input: &str) -> Result<Vec<(Token, &str)>, usize> {
    let mut lexer = Token::lexer(input);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.slice())),
            Err(()) => return Err(lexer.span().start),
        }
    }
    Ok(tokens)
}
