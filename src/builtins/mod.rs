use std::{
    ffi::{OsStr, OsString},
    path::PathBuf,
};

use async_trait::async_trait;
use enum_dispatch::enum_dispatch;
use strum::{EnumIter, IntoEnumIterator};
use thiserror::Error;

use crate::{
    parse::{ParsedCommand, Redirection},
    prelude::*,
};

pub mod cd;
pub mod exit;
pub mod path;

/// What the line loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug, Error)]
pub enum BuiltinError {
    #[error("exit takes no arguments, got {0}")]
    ExitArguments(usize),
    #[error("cd takes exactly one directory, got {0}")]
    CdArguments(usize),
    #[error("cd {path:?}: {source}")]
    ChangeDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[async_trait]
#[enum_dispatch(BuiltinCommands)]
pub trait BuiltinCommand {
    fn name(&self) -> &'static str;
    async fn execute(&self, session: &mut Session, args: &[OsString]) -> Result<Flow, BuiltinError>;
}

#[enum_dispatch]
#[derive(EnumIter)]
pub enum BuiltinCommands {
    Exit(exit::Exit),
    Cd(cd::Cd),
    Path(path::SetPath),
}

impl BuiltinCommands {
    pub fn from_name(name: &OsStr) -> Option<Self> {
        Self::iter().find(|cmd| OsStr::new(cmd.name()) == name)
    }
}

/// How [`dispatch`] handled a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Ran in-process (or was empty); nothing left to spawn.
    Builtin(Flow),
    /// Not a builtin; the caller spawns it.
    External,
}

/// Runs `cmd` if it is a builtin. An `Err` also means the command was
/// handled and must not be spawned.
///
/// An empty command with a bare or malformed redirect is a silent no-op.
/// Otherwise malformed commands are rejected here, before any builtin runs.
/// Builtins ignore a valid redirection.
pub async fn dispatch(session: &mut Session, cmd: &ParsedCommand) -> Result<Dispatch, ShellError> {
    let Some(name) = cmd.name() else {
        return match cmd.redirect {
            Redirection::File(_) => Err(ShellError::EmptyRedirect),
            Redirection::None | Redirection::Malformed => Ok(Dispatch::Builtin(Flow::Continue)),
        };
    };

    if cmd.redirect == Redirection::Malformed {
        return Err(ShellError::MalformedRedirect);
    }

    match BuiltinCommands::from_name(name) {
        Some(builtin) => {
            trace!(?name, scope = ?session.scope(), "running builtin");
            let flow = builtin.execute(session, cmd.args()).await?;
            Ok(Dispatch::Builtin(flow))
        }
        None => Ok(Dispatch::External),
    }
}
