//! logos-based tokenizer for size and position tokens.
//!
//! Longest match wins, so `10px` lexes as [`Token::Pixels`] rather than a
//! [`Token::Number`] followed by garbage, and `50%` as [`Token::Percent`].

use logos::Logos;

use super::value::ValueError;

/// A size token produced by the lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    /// Explicit pixels: `12px`, `-4.5px`.
    #[regex(r"[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?px")]
    Pixels,

    /// Percentage of a reference magnitude: `50%`.
    #[regex(r"[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?%")]
    Percent,

    /// Viewport width percentage: `80vw`.
    #[regex(r"[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?vw")]
    ViewportWidth,

    /// Viewport height percentage: `45vh`.
    #[regex(r"[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?vh")]
    ViewportHeight,

    /// Content-sized: `auto`.
    #[token("auto")]
    Auto,

    /// Bare number, read as pixels: `12`, `0.5`, `+3`, `5.`, `1e3`.
    #[regex(r"[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?")]
    Number,
}

impl Token {
    /// The unit suffix this token carries, if any.
    pub fn suffix(self) -> &'static str {
        match self {
            Token::Pixels => "px",
            Token::Percent => "%",
            Token::ViewportWidth => "vw",
            Token::ViewportHeight => "vh",
            Token::Auto | Token::Number => "",
        }
    }
}

/// Tokenize `input` into `(Token, slice)` pairs.
///
/// Unlike a stylesheet lexer, a size token with stray characters is an error
/// rather than something to skip.
pub fn tokenize(input: &str) -> Result<Vec<(Token, &str)>, ValueError> {
    let mut lexer = Token::lexer(input);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.slice())),
            Err(()) => {
                return Err(ValueError::InvalidValue {
                    input: input.to_string(),
                    message: format!("unexpected {:?} at offset {}", lexer.slice(), lexer.span().start),
                })
            }
        }
    }
    Ok(tokens)
}

/// Numeric coefficient of a token slice, with its unit suffix stripped.
pub fn coefficient(token: Token, slice: &str) -> Result<f64, ValueError> {
    slice
        .strip_suffix(token.suffix())
        .unwrap_or(slice)
        .parse::<f64>()
        .map_err(|err| ValueError::InvalidValue {
            input: slice.to_string(),
            message: err.to_string(),
        })
}
