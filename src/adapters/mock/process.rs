//! Scripted process runner for testing.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::ProcessError;
use crate::traits::{ProcessOutput, ProcessRunner};

/// A recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRun {
    pub argv: Vec<String>,
    pub stdin: Option<String>,
}

/// Runner that answers from a queue and records every invocation.
///
/// With an empty queue each run succeeds with empty output.
#[derive(Debug, Clone, Default)]
pub struct MockProcessRunner {
    outputs: Arc<Mutex<VecDeque<Result<ProcessOutput, ProcessError>>>>,
    runs: Arc<Mutex<Vec<RecordedRun>>>,
}

impl MockProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_output(&self, stdout: &str, exit_code: i32) {
        self.outputs.lock().unwrap().push_back(Ok(ProcessOutput {
            stdout: stdout.to_string(),
            stderr: String::new(),
            exit_code: Some(exit_code),
        }));
    }

    pub fn push_error(&self, err: ProcessError) {
        self.outputs.lock().unwrap().push_back(Err(err));
    }

    pub fn runs(&self) -> Vec<RecordedRun> {
        self.runs.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessRunner for MockProcessRunner {
    async fn run(&self, argv: &[String], stdin: Option<&str>) -> Result<ProcessOutput, ProcessError> {
        self.runs.lock().unwrap().push(RecordedRun {
            argv: argv.to_vec(),
            stdin: stdin.map(str::to_string),
        });
        self.outputs.lock().unwrap().pop_front().unwrap_or_else(|| {
            Ok(ProcessOutput {
                exit_code: Some(0),
                ..ProcessOutput::default()
            })
        })
    }
}
