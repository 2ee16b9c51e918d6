use std::time::Instant;

use crate::{
    builtins::{dispatch, Dispatch},
    parse::{ParseError, ParsedCommand},
    prelude::*,
    process::{
        child::{reap, ShellChild},
        launch,
        status::InternalExitStatus,
    },
};

/// Starts every segment, then waits for all of them in the order they were
/// started.
///
/// Each segment runs against its own copy of the session, so builtins in a
/// branch never change the shell's directory or search path. Segments that
/// fail to start are reported and skipped.
pub async fn run_parallel(session: &Session, segments: Vec<Result<ParsedCommand, ParseError>>) {
    let started = Instant::now();
    let mut children = Vec::with_capacity(segments.len());

    for segment in segments {
        let cmd = match segment {
            Ok(cmd) => cmd,
            Err(err) => {
                report(&err.into());
                continue;
            }
        };

        if cmd.is_empty() {
            continue;
        }

        match spawn_branch(session, &cmd).await {
            Ok(child) => children.push(child),
            Err(err) => report(&err),
        }
    }

    debug!(count = children.len(), "parallel: waiting for branches");

    for child in children {
        reap(child).await;
    }

    debug!(elapsed = ?started.elapsed(), "parallel: all branches done");
}

async fn spawn_branch(session: &Session, cmd: &ParsedCommand) -> Result<ShellChild, ShellError> {
    let mut branch = session.branch();

    match dispatch(&mut branch, cmd).await {
        // a branch ends after its builtin whatever the builtin asked for
        Ok(Dispatch::Builtin(_)) => Ok(ShellChild::Finished(InternalExitStatus::new_success())),
        Ok(Dispatch::External) => launch(&branch, cmd).await,
        Err(err) => {
            report(&err);
            Ok(ShellChild::Finished(InternalExitStatus::new_success()))
        }
    }
}
