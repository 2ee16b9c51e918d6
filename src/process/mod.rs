use std::{fs::File, io, path::Path, process::Stdio};

use itertools::Itertools;
use tokio::process::Command;

use self::{child::ShellChild, status::InternalExitStatus};
use crate::{
    error::report_to,
    parse::{ParsedCommand, Redirection},
    prelude::*,
};

pub mod child;
pub mod status;

/// Starts an external command and hands the child back to the caller.
///
/// A redirect target is opened (created or truncated) before anything else.
/// If that open fails, or the name doesn't resolve, the failure is reported
/// where the child's stderr would have gone and a failed [`ShellChild`] is
/// returned in place of a process. Only a malformed command or a failed spawn
/// returns `Err`; nothing is left to wait for in that case.
pub async fn launch(session: &Session, cmd: &ParsedCommand) -> Result<ShellChild, ShellError> {
    let mut sink = match &cmd.redirect {
        Redirection::Malformed => return Err(ShellError::MalformedRedirect),
        Redirection::None => None,
        Redirection::File(target) => {
            let path = session.working_dir().join(target);
            match RedirectSink::open(&path).await {
                Ok(sink) => Some(sink),
                Err(source) => {
                    report(&ShellError::OpenTarget { path, source });
                    return Ok(failed());
                }
            }
        }
    };

    let Some(name) = cmd.name() else {
        return Ok(ShellChild::Finished(InternalExitStatus::new_success()));
    };

    let Some(program) = session.resolve(name) else {
        let err = ShellError::NotFound(name.to_owned());
        match sink.as_mut() {
            Some(sink) => report_to(&err, &mut sink.stderr),
            None => report(&err),
        }
        return Ok(failed());
    };

    let mut command = Command::new(&program);
    command
        .arg0(name)
        .args(cmd.args())
        .current_dir(session.working_dir());

    if let Some(sink) = sink {
        command
            .stdout(Stdio::from(sink.stdout))
            .stderr(Stdio::from(sink.stderr));
    }

    trace!(
        "spawning {} as `{}`",
        program.display(),
        cmd.argv.iter().map(|arg| arg.to_string_lossy()).join(" ")
    );

    let child = command
        .spawn()
        .map_err(|source| ShellError::Spawn { program, source })?;

    Ok(child.into())
}

/// Both output streams of a redirected command, sharing one open file.
struct RedirectSink {
    stdout: File,
    stderr: File,
}

impl RedirectSink {
    async fn open(path: &Path) -> io::Result<Self> {
        let file = tokio::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o644)
            .open(path)
            .await?
            .into_std()
            .await;

        Ok(Self {
            stderr: file.try_clone()?,
            stdout: file,
        })
    }
}

fn failed() -> ShellChild {
    ShellChild::Finished(InternalExitStatus::new_failure())
}
