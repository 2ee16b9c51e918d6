use std::{
    ffi::OsString,
    io::{self, Write},
    path::PathBuf,
};

use thiserror::Error;

use crate::{
    builtins::BuiltinError,
    cmd::execution_plan::CommandSyntaxError,
    config::ConfigError,
    parse::{preprocess::PreprocessError, ParseError},
};

/// The only thing the shell ever prints about a failure. The detailed
/// [`ShellError`] goes to the log.
pub const DIAGNOSTIC: &str = "An error has occurred\n";

#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Preprocess(#[from] PreprocessError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Syntax(#[from] CommandSyntaxError),
    #[error(transparent)]
    Builtin(#[from] BuiltinError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("malformed redirection")]
    MalformedRedirect,
    #[error("redirection without a command")]
    EmptyRedirect,
    #[error("failed to open redirect target {path:?}: {source}")]
    OpenTarget {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}: command not found", .0.to_string_lossy())]
    NotFound(OsString),
    #[error("failed to spawn {program:?}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to wait for child: {0}")]
    Wait(#[source] io::Error),
    #[error("expected at most one argument, got {0}")]
    Usage(usize),
    #[error("failed to open batch file {path:?}: {source}")]
    BatchFile {
        path: OsString,
        #[source]
        source: io::Error,
    },
}

/// Logs `err` and writes the fixed diagnostic to stderr.
pub fn report(err: &ShellError) {
    report_to(err, &mut io::stderr());
}

/// Logs `err` and writes the fixed diagnostic to `sink`.
pub fn report_to<W: Write>(err: &ShellError, sink: &mut W) {
    error!("{err}");

    if let Err(write_err) = sink
        .write_all(DIAGNOSTIC.as_bytes())
        .and_then(|_| sink.flush())
    {
        warn!("failed to write diagnostic: {write_err}");
    }
}
