use std::ffi::OsString;

use async_trait::async_trait;

use super::{BuiltinCommand, BuiltinError, Flow};
use crate::prelude::*;

/// `path [dir...]`: replaces the whole search path.
#[derive(Default)]
pub struct SetPath;

#[async_trait]
impl BuiltinCommand for SetPath {
    fn name(&self) -> &'static str {
        "path"
    }

    async fn execute(&self, session: &mut Session, args: &[OsString]) -> Result<Flow, BuiltinError> {
        session.search_path.replace(args);

        debug!(dirs = ?session.search_path.dirs(), "search path replaced");

        Ok(Flow::Continue)
    }
}
