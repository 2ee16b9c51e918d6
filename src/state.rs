use std::{
    ffi::OsStr,
    io,
    path::{Path, PathBuf},
};

use nix::{
    errno::Errno,
    unistd::{access, AccessFlags},
};

use crate::{
    builtins::Flow,
    cmd::execution_plan::ExecutionPlan,
    config::ShellConfig,
    input::LineSource,
    parse::preprocess::preprocess,
    prelude::*,
    search::SearchPath,
};

/// Whose working directory a [`Session`] controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The shell itself: `cd` changes the process working directory.
    Shell,
    /// A parallel branch: changes stay inside this copy of the session.
    Branch,
}

/// Mutable state commands run against: the search path and working directory.
#[derive(Debug, Clone)]
pub struct Session {
    pub search_path: SearchPath,
    working_dir: PathBuf,
    scope: Scope,
}

impl Session {
    pub fn new(config: &ShellConfig) -> io::Result<Self> {
        Ok(Self::with_dir(config, std::env::current_dir()?))
    }

    pub fn with_dir(config: &ShellConfig, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            search_path: SearchPath::new(&config.default_path, config.path_capacity),
            working_dir: working_dir.into(),
            scope: Scope::Shell,
        }
    }

    /// A detached copy for one parallel branch.
    pub fn branch(&self) -> Self {
        Self {
            scope: Scope::Branch,
            ..self.clone()
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn change_dir(&mut self, target: impl AsRef<Path>) -> io::Result<()> {
        let full_path = self.working_dir.join(target).canonicalize()?;

        trace!("cd: {:?}", full_path);

        match self.scope {
            Scope::Shell => std::env::set_current_dir(&full_path)?,
            Scope::Branch => {
                if !full_path.is_dir() {
                    return Err(Errno::ENOTDIR.into());
                }
                access(&full_path, AccessFlags::X_OK)?;
            }
        }

        self.working_dir = full_path;

        Ok(())
    }

    pub fn resolve(&self, name: &OsStr) -> Option<PathBuf> {
        self.search_path.resolve(&self.working_dir, name)
    }
}

/// Reads lines from a [`LineSource`] and runs each one to completion.
pub struct Shell {
    config: ShellConfig,
    session: Session,
}

impl Shell {
    pub fn new(config: ShellConfig) -> io::Result<Self> {
        let session = Session::new(&config)?;
        Ok(Self { config, session })
    }

    #[cfg(test)]
    pub fn with_session(config: ShellConfig, session: Session) -> Self {
        Self { config, session }
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Runs until the source is exhausted or `exit` is executed.
    pub async fn run(&mut self, source: &mut LineSource) {
        loop {
            let line = match source.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => {
                    debug!("end of input");
                    break;
                }
                Err(err) => {
                    warn!("failed to read line: {err}");
                    break;
                }
            };

            if self.execute_line(&line).await == Flow::Exit {
                debug!("exit requested");
                break;
            }
        }
    }

    pub async fn execute_line(&mut self, line: impl AsRef<[u8]>) -> Flow {
        let normalized = match preprocess(line.as_ref()) {
            Ok(normalized) => normalized,
            Err(err) => {
                report(&err.into());
                return Flow::Continue;
            }
        };

        let plan = match ExecutionPlan::parse(&normalized, &self.config) {
            Ok(plan) => plan,
            Err(err) => {
                report(&err.into());
                return Flow::Continue;
            }
        };

        trace!(?plan, "execution plan");

        plan.execute(&mut self.session).await
    }
}
