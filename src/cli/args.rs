//! Command-line argument parsing.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Run the interactive client (default)
    RunTui,
}

/// Parse command-line arguments and return the command to execute.
///
/// Unknown arguments are ignored.
///
/// # Examples
///
/// ```
/// use gpt_term::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["gpt-term".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    for arg in args.skip(1) {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            _ => {}
        }
    }
    CliCommand::RunTui
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliCommand {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_version_flag() {
        assert_eq!(parse(&["gpt-term", "--version"]), CliCommand::Version);
        assert_eq!(parse(&["gpt-term", "-V"]), CliCommand::Version);
    }

    #[test]
    fn test_parse_help_flag() {
        assert_eq!(parse(&["gpt-term", "--help"]), CliCommand::Help);
        assert_eq!(parse(&["gpt-term", "-h"]), CliCommand::Help);
    }

    #[test]
    fn test_no_args_runs_tui() {
        assert_eq!(parse(&["gpt-term"]), CliCommand::RunTui);
    }

    #[test]
    fn test_unknown_args_ignored() {
        assert_eq!(parse(&["gpt-term", "--bogus"]), CliCommand::RunTui);
        assert_eq!(parse(&["gpt-term", "--bogus", "-V"]), CliCommand::Version);
    }

    #[test]
    fn test_program_name_is_skipped() {
        assert_eq!(parse(&["--version"]), CliCommand::RunTui);
    }
}
