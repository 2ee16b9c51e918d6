use std::{fmt, os::unix::process::ExitStatusExt, process::ExitStatus};

use nix::sys::signal::Signal;

/// How a child ended: a real process, or one that never got to run.
#[derive(Debug, Clone, Copy)]
pub enum ShellExitStatus {
    Process(ExitStatus),
    Internal(InternalExitStatus),
}

impl From<ExitStatus> for ShellExitStatus {
    fn from(value: ExitStatus) -> Self {
        Self::Process(value)
    }
}

impl From<InternalExitStatus> for ShellExitStatus {
    fn from(value: InternalExitStatus) -> Self {
        Self::Internal(value)
    }
}

impl ShellExitStatus {
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Process(status) => status.code(),
            Self::Internal(status) => status.code(),
        }
    }

    pub fn success(&self) -> bool {
        match self {
            Self::Process(status) => status.success(),
            Self::Internal(status) => status.success(),
        }
    }

    pub fn signal(&self) -> Option<Signal> {
        match self {
            Self::Process(status) => status.signal().and_then(|sig| Signal::try_from(sig).ok()),
            Self::Internal(_) => None,
        }
    }
}

impl fmt::Display for ShellExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code(), self.signal()) {
            (Some(code), _) => write!(f, "exit {code}"),
            (None, Some(signal)) => write!(f, "killed by {}", signal.as_str()),
            (None, None) => write!(f, "unknown"),
        }
    }
}

/// Status of a child the shell settled without running a program, e.g. when
/// the redirect target could not be opened or a parallel builtin ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InternalExitStatus(i32);

impl InternalExitStatus {
    pub fn new_success() -> Self {
        Self(0)
    }

    pub fn new_failure() -> Self {
        Self(1)
    }

    pub fn success(&self) -> bool {
        self.0 == 0
    }

    pub fn code(&self) -> Option<i32> {
        Some(self.0)
    }
}
