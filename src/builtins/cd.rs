use std::ffi::OsString;

use async_trait::async_trait;

use super::{BuiltinCommand, BuiltinError, Flow};
use crate::prelude::*;

#[derive(Default)]
pub struct Cd;

#[async_trait]
impl BuiltinCommand for Cd {
    fn name(&self) -> &'static str {
        "cd"
    }

    async fn execute(&self, session: &mut Session, args: &[OsString]) -> Result<Flow, BuiltinError> {
        trace!("executing cd builtin: {args:?}");

        let [path] = args else {
            return Err(BuiltinError::CdArguments(args.len()));
        };

        session
            .change_dir(path)
            .map_err(|source| BuiltinError::ChangeDir {
                path: path.into(),
                source,
            })?;

        Ok(Flow::Continue)
    }
}
