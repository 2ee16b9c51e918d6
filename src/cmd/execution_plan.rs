use thiserror::Error;

use crate::{
    config::ShellConfig,
    parse::{parse_command, preprocess::PARALLEL, ParseError, ParsedCommand},
};

/// What one normalized line asks for.
#[derive(Debug)]
pub enum ExecutionPlan {
    /// One command, run in the foreground.
    Single(ParsedCommand),
    /// `&`-separated commands, run concurrently. Each segment parsed on its
    /// own, so one bad segment does not sink the others.
    Parallel(Vec<Result<ParsedCommand, ParseError>>),
}

#[derive(Debug, Error)]
pub enum CommandSyntaxError {
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl ExecutionPlan {
    /// Segments past `max_parallel` are dropped.
    pub fn parse(line: &[u8], config: &ShellConfig) -> Result<Self, CommandSyntaxError> {
        if !line.contains(&PARALLEL) {
            return Ok(Self::Single(parse_command(line, config.max_args)?));
        }

        let mut segments = line
            .split(|b| *b == PARALLEL)
            .filter(|segment| !segment.is_empty());

        let plan = segments
            .by_ref()
            .take(config.max_parallel)
            .map(|segment| parse_command(segment, config.max_args))
            .collect();

        let dropped = segments.count();
        if dropped > 0 {
            debug!(dropped, limit = config.max_parallel, "parallel segments past the limit dropped");
        }

        Ok(Self::Parallel(plan))
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use itertools::Itertools;

    use super::*;
    use crate::parse::{preprocess::preprocess, Redirection};

    fn plan(line: &str) -> Result<ExecutionPlan, CommandSyntaxError> {
        plan_with(line, &ShellConfig::default())
    }

    fn plan_with(line: &str, config: &ShellConfig) -> Result<ExecutionPlan, CommandSyntaxError> {
        ExecutionPlan::parse(&preprocess(line.as_bytes()).unwrap(), config)
    }

    fn argvs(plan: ExecutionPlan) -> Vec<Vec<OsString>> {
        match plan {
            ExecutionPlan::Parallel(segments) => segments
                .into_iter()
                .map(|segment| segment.unwrap().argv)
                .collect(),
            ExecutionPlan::Single(cmd) => panic!("expected parallel plan, got {cmd:?}"),
        }
    }

    #[test]
    fn no_separator_is_single() {
        let Ok(ExecutionPlan::Single(cmd)) = plan("ls -l>out") else {
            panic!("expected single plan");
        };
        assert_eq!(cmd.argv, ["ls", "-l"]);
        assert_eq!(cmd.redirect, Redirection::File("out".into()));
    }

    #[test]
    fn splits_on_separator() {
        assert_eq!(
            argvs(plan("ls&echo a b & pwd").unwrap()),
            [vec!["ls"], vec!["echo", "a", "b"], vec!["pwd"]]
        );
    }

    #[test]
    fn empty_edges_are_ignored() {
        assert_eq!(argvs(plan("&ls&").unwrap()), [vec!["ls"]]);
    }

    #[test]
    fn blank_segments_parse_empty() {
        assert_eq!(
            argvs(plan("ls & & pwd").unwrap()),
            [vec!["ls"], vec![], vec!["pwd"]]
        );
    }

    #[test]
    fn redirection_is_per_segment() {
        let Ok(ExecutionPlan::Parallel(segments)) = plan("a > x & b > y z & c") else {
            panic!("expected parallel plan");
        };
        let redirects = segments
            .into_iter()
            .map(|segment| segment.unwrap().redirect)
            .collect_vec();
        assert_eq!(
            redirects,
            [
                Redirection::File("x".into()),
                Redirection::Malformed,
                Redirection::None,
            ]
        );
    }

    #[test]
    fn segments_past_the_limit_are_dropped() {
        let config = ShellConfig {
            max_parallel: 2,
            ..ShellConfig::default()
        };
        assert_eq!(
            argvs(plan_with("echo a > a & echo b > b & echo c > c", &config).unwrap()),
            [vec!["echo", "a"], vec!["echo", "b"]]
        );
        assert_eq!(
            argvs(plan_with("&a&&b&", &config).unwrap()),
            [vec!["a"], vec![]]
        );
    }

    #[test]
    fn argument_limit_per_segment() {
        let config = ShellConfig {
            max_args: 2,
            ..ShellConfig::default()
        };
        let Ok(ExecutionPlan::Parallel(segments)) = plan_with("a b c & d", &config) else {
            panic!("expected parallel plan");
        };
        assert!(matches!(
            segments[0],
            Err(ParseError::TooManyArguments { limit: 2 })
        ));
        assert!(segments[1].is_ok());

        assert!(matches!(
            plan_with("a b c", &config),
            Err(CommandSyntaxError::Parse(ParseError::TooManyArguments { .. }))
        ));
    }
}
