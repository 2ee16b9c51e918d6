use std::io;

use tokio::process::Child;

use super::status::{InternalExitStatus, ShellExitStatus};
use crate::prelude::*;

/// A child owned by whoever launched it. The owner must [`reap`] it.
#[derive(Debug)]
pub enum ShellChild {
    Process(Child),
    Finished(InternalExitStatus),
}

impl From<Child> for ShellChild {
    fn from(value: Child) -> Self {
        Self::Process(value)
    }
}

impl ShellChild {
    pub fn id(&self) -> Option<u32> {
        match self {
            Self::Process(process) => process.id(),
            Self::Finished(_) => None,
        }
    }

    /// Waits until the process exits or is killed by a signal.
    pub async fn wait(&mut self) -> io::Result<ShellExitStatus> {
        match self {
            Self::Process(process) => process.wait().await.map(Into::into),
            Self::Finished(status) => Ok((*status).into()),
        }
    }
}

/// Blocks until `child` is gone, reporting a failed wait.
pub async fn reap(mut child: ShellChild) -> Option<ShellExitStatus> {
    let pid = child.id();

    match child.wait().await {
        Ok(status) => {
            debug!(?pid, %status, "child reaped");
            Some(status)
        }
        Err(err) => {
            report(&ShellError::Wait(err));
            None
        }
    }
}
