//! External process abstraction.

use async_trait::async_trait;

use crate::error::ProcessError;

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Everything the process wrote. Scripts from [`shell_argv`] already
    /// send stderr into stdout, so their output keeps its write order; for
    /// other programs stderr follows stdout.
    pub fn combined(&self) -> String {
        let mut text = String::with_capacity(self.stdout.len() + self.stderr.len());
        text.push_str(&self.stdout);
        text.push_str(&self.stderr);
        text
    }

    pub fn status_text(&self) -> String {
        match self.exit_code {
            Some(code) => format!("exit status {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Runs programs outside the TUI.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run `argv[0]` with the remaining arguments, feeding `stdin` if given.
    ///
    /// A non-zero exit is a successful run; only failing to start or talk to
    /// the process is an error.
    async fn run(&self, argv: &[String], stdin: Option<&str>) -> Result<ProcessOutput, ProcessError>;
}

/// argv for running `command` through the POSIX shell with stderr
/// redirected into stdout.
///
/// The redirect sits on its own line so it is in effect before the shell
/// parses `command`, which puts syntax errors in the output too.
pub fn shell_argv(command: &str) -> Vec<String> {
    vec![
        "sh".to_string(),
        "-c".to_string(),
        format!("exec 2>&1\n{}", command),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_appends_stderr() {
        let out = ProcessOutput {
            stdout: "out\n".into(),
            stderr: "err\n".into(),
            exit_code: Some(1),
        };
        assert_eq!(out.combined(), "out\nerr\n");
        assert!(!out.success());
        assert_eq!(out.status_text(), "exit status 1");
    }

    #[test]
    fn test_signal_status_text() {
        let out = ProcessOutput::default();
        assert_eq!(out.status_text(), "terminated by signal");
    }

    #[test]
    fn test_shell_argv() {
        assert_eq!(shell_argv("ls -la"), vec!["sh", "-c", "exec 2>&1\nls -la"]);
    }
}
