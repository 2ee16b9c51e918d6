use std::{path::Path, process::ExitCode};

use color_eyre::Result;
use itertools::Itertools;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;

use crate::{
    config::ShellConfig,
    error::{report, ShellError},
    input::LineSource,
    state::Shell,
};

#[macro_use]
extern crate tracing;

pub mod builtins;
pub mod cmd;
pub mod config;
pub mod error;
pub mod input;
pub mod parse;
pub mod prelude;
pub mod process;
pub mod search;
pub mod state;

#[cfg(test)]
mod test_support;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let config = match ShellConfig::load() {
        Ok(config) => config,
        Err(err) => {
            report(&err.into());
            return Ok(ExitCode::FAILURE);
        }
    };

    let _guard = init_tracing(&config)?;

    color_eyre::install()?;

    let args = std::env::args_os().skip(1).collect_vec();

    let mut source = match args.as_slice() {
        [] => LineSource::interactive(config.prompt.clone()),
        [batch] => match LineSource::batch(Path::new(batch)).await {
            Ok(source) => source,
            Err(source) => {
                report(&ShellError::BatchFile {
                    path: batch.clone(),
                    source,
                });
                return Ok(ExitCode::FAILURE);
            }
        },
        _ => {
            report(&ShellError::Usage(args.len()));
            return Ok(ExitCode::FAILURE);
        }
    };

    trace!(?config, "starting shell");

    let mut shell = Shell::new(config)?;
    shell.run(&mut source).await;

    Ok(ExitCode::SUCCESS)
}

fn init_tracing(config: &ShellConfig) -> Result<Option<WorkerGuard>> {
    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, "lsh.log"));
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_error::ErrorLayer::default())
        .try_init()?;

    Ok(guard)
}
