//! Shell command extraction and execution transcripts.
//!
//! The assistant is instructed to wrap every proposed command in
//! `<command>` … `</command>`. [`extract`] pulls those out of free text;
//! [`format_execution`] renders the transcript entry appended after a
//! command has run.
//!
//! # Example
//!
//! ```
//! use gpt_term::commands::extract;
//!
//! let reply = "List files: <command>ls -la</command> or <command> pwd </command>";
//! assert_eq!(extract(reply), vec!["ls -la", "pwd"]);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::traits::ProcessOutput;

pub const OPEN_TAG: &str = "<command>";
pub const CLOSE_TAG: &str = "</command>";

static TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?command>").expect("Invalid command tag regex pattern"));

/// Extract every delimited command from `text`, in document order.
///
/// Bodies are trimmed and empty bodies are dropped. An opening tag with no
/// closing tag produces nothing. When openings nest, the innermost one before
/// the next closing tag wins. Stray closing tags are ignored.
pub fn extract(text: &str) -> Vec<String> {
    let mut commands = Vec::new();
    let mut open_at: Option<usize> = None;

    for tag in TAG_REGEX.find_iter(text) {
        if tag.as_str() == OPEN_TAG {
            open_at = Some(tag.end());
            continue;
        }
        if let Some(start) = open_at.take() {
            let body = text[start..tag.start()].trim();
            if !body.is_empty() {
                commands.push(body.to_string());
            }
        }
    }

    commands
}

/// Transcript entry recording a finished command.
///
/// ````text
/// ```
/// Command ran: <command>
/// Command result:
/// <status line><captured output>```
/// ````
pub fn format_execution(command: &str, output: &ProcessOutput) -> String {
    let status = if output.success() {
        "Command executed successfully\n".to_string()
    } else {
        format!("Command failed: {}\n", output.status_text())
    };
    format!(
        "```\nCommand ran: {}\nCommand result:\n{}{}```",
        command, status, output.combined()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_single_command() {
        let text = "Use <command>ls -la</command> to list files";
        assert_eq!(extract(text), vec!["ls -la"]);
    }

    #[test]
    fn test_extract_preserves_document_order() {
        let text = "<command>b</command> then <command>a</command> then <command>c</command>";
        assert_eq!(extract(text), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_extract_trims_whitespace() {
        let text = "<command>\n  git status\n</command>";
        assert_eq!(extract(text), vec!["git status"]);
    }

    #[test]
    fn test_extract_keeps_inner_newlines() {
        let text = "<command>for f in *; do\n  echo $f\ndone</command>";
        assert_eq!(extract(text), vec!["for f in *; do\n  echo $f\ndone"]);
    }

    #[test]
    fn test_extract_no_commands() {
        assert!(extract("nothing to run here").is_empty());
    }

    #[test]
    fn test_extract_unclosed_tag_yields_nothing() {
        assert!(extract("<command>rm -rf /tmp/x").is_empty());
        assert_eq!(
            extract("<command>ok</command> <command>dangling"),
            vec!["ok"]
        );
    }

    #[test]
    fn test_extract_nested_opening_uses_innermost() {
        let text = "<command>outer <command>inner</command> tail</command>";
        assert_eq!(extract(text), vec!["inner"]);
    }

    #[test]
    fn test_extract_ignores_stray_close_and_empty_bodies() {
        let text = "</command><command>  </command><command>echo hi</command>";
        assert_eq!(extract(text), vec!["echo hi"]);
    }

    #[test]
    fn test_format_execution_success() {
        let output = ProcessOutput {
            stdout: "a\nb\n".to_string(),
            stderr: String::new(),
            exit_code: Some(0),
        };
        assert_eq!(
            format_execution("ls", &output),
            "```\nCommand ran: ls\nCommand result:\nCommand executed successfully\na\nb\n```"
        );
    }

    #[test]
    fn test_format_execution_failure_includes_stderr() {
        let output = ProcessOutput {
            stdout: String::new(),
            stderr: "ls: nope: No such file or directory\n".to_string(),
            exit_code: Some(2),
        };
        let text = format_execution("ls nope", &output);
        assert!(text.contains("Command failed: exit status 2\n"));
        assert!(text.contains("No such file or directory"));
        assert!(text.ends_with("```"));
    }
}
