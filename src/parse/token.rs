use logos::Logos;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Default, Error)]
pub enum LexerError {
    #[default]
    #[error("unknown token")]
    UnknownToken,
}

/// Tokens of a normalized command line. Words are raw bytes taken verbatim:
/// there is no quoting, escaping, expansion or decoding.
#[derive(Debug, PartialEq, Logos)]
#[logos(source = [u8])]
#[logos(skip r"[ \t\n\r\f\x0B]+", error = LexerError)]
pub enum Token<'a> {
    #[token(">")]
    Redirect,

    #[regex(br"(?-u)[^ \t\n\r\f\x0B>]+")]
    Word(&'a [u8]),
}
