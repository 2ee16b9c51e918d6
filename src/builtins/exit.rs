use std::ffi::OsString;

use async_trait::async_trait;

use super::{BuiltinCommand, BuiltinError, Flow};
use crate::prelude::*;

#[derive(Default)]
pub struct Exit;

#[async_trait]
impl BuiltinCommand for Exit {
    fn name(&self) -> &'static str {
        "exit"
    }

    async fn execute(&self, _session: &mut Session, args: &[OsString]) -> Result<Flow, BuiltinError> {
        if !args.is_empty() {
            return Err(BuiltinError::ExitArguments(args.len()));
        }

        Ok(Flow::Exit)
    }
}
