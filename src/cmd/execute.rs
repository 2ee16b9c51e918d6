use super::{execution_plan::ExecutionPlan, parallel::run_parallel};
use crate::{
    builtins::{dispatch, Dispatch, Flow},
    parse::ParsedCommand,
    prelude::*,
    process::{child::reap, launch},
};

impl ExecutionPlan {
    /// Runs the plan to completion: every child it starts is reaped before
    /// this returns.
    pub async fn execute(self, session: &mut Session) -> Flow {
        match self {
            Self::Single(cmd) => run_foreground(session, &cmd).await,
            Self::Parallel(segments) => {
                run_parallel(session, segments).await;
                Flow::Continue
            }
        }
    }
}

async fn run_foreground(session: &mut Session, cmd: &ParsedCommand) -> Flow {
    match dispatch(session, cmd).await {
        Ok(Dispatch::Builtin(flow)) => flow,
        Ok(Dispatch::External) => {
            match launch(session, cmd).await {
                Ok(child) => {
                    reap(child).await;
                }
                Err(err) => report(&err),
            }
            Flow::Continue
        }
        Err(err) => {
            report(&err);
            Flow::Continue
        }
    }
}
