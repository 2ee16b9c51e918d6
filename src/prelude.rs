pub use crate::{
    error::{report, ShellError},
    state::Session,
};
