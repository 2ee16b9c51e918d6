use std::{
    ffi::{OsStr, OsString},
    os::unix::ffi::OsStrExt,
    path::PathBuf,
};

use logos::Logos;
use thiserror::Error;

use self::token::{LexerError, Token};

pub mod preprocess;
pub mod token;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to tokenize command")]
    Lexer(Vec<LexerError>),
    #[error("too many arguments (limit is {limit})")]
    TooManyArguments { limit: usize },
}

/// Where a command's output goes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Redirection {
    #[default]
    None,
    /// Both stdout and stderr are written to this file.
    File(PathBuf),
    /// The `> file` suffix was missing its target or had trailing tokens.
    Malformed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Command name followed by its arguments, byte for byte as typed.
    pub argv: Vec<OsString>,
    pub redirect: Redirection,
}

impl ParsedCommand {
    pub fn name(&self) -> Option<&OsStr> {
        self.argv.first().map(OsString::as_os_str)
    }

    pub fn args(&self) -> &[OsString] {
        self.argv.get(1..).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.argv.is_empty()
    }
}

/// Parses one normalized command (no `&` separators) into its argument list
/// and redirection.
///
/// Everything up to the first `>` is an argument. The token right after the
/// `>` is the target, whatever it is (a second `>` names a file called `>`).
/// A missing target or anything after the target makes the redirection
/// [`Redirection::Malformed`].
pub fn parse_command(line: &[u8], max_args: usize) -> Result<ParsedCommand, ParseError> {
    let tokens = Token::lexer(line).collect::<Vec<_>>();

    if tokens.iter().any(|r| r.is_err()) {
        return Err(ParseError::Lexer(
            tokens.into_iter().filter_map(|r| r.err()).collect(),
        ));
    }

    let mut tokens = tokens.into_iter().flatten();
    let mut cmd = ParsedCommand::default();

    while let Some(token) = tokens.next() {
        match token {
            Token::Word(word) => {
                if cmd.argv.len() == max_args {
                    return Err(ParseError::TooManyArguments { limit: max_args });
                }
                cmd.argv.push(OsStr::from_bytes(word).to_owned());
            }
            Token::Redirect => {
                cmd.redirect = match (tokens.next(), tokens.next()) {
                    (Some(Token::Word(target)), None) => Redirection::File(target_path(target)),
                    (Some(Token::Redirect), None) => Redirection::File(target_path(b">")),
                    _ => Redirection::Malformed,
                };
                break;
            }
        }
    }

    Ok(cmd)
}

fn target_path(bytes: &[u8]) -> PathBuf {
    OsStr::from_bytes(bytes).into()
}
