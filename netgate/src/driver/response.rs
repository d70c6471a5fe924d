//! Response type for command execution results.

use std::time::Duration;

/// Response from a command execution.
#[derive(Debug, Clone)]
pub struct Response {
    /// The command that was executed.
    pub command: String,

    /// The command output with the echo and trailing prompt removed.
    pub result: String,

    /// Everything the device sent, echo and prompt included.
    pub raw_result: String,

    /// The prompt that was matched at the end.
    pub prompt: String,

    pub elapsed: Duration,

    /// Failure pattern found in the output, if the device rejected the command.
    pub failure_message: Option<String>,
}

impl Response {
    pub fn new(
        command: impl Into<String>,
        result: impl Into<String>,
        raw_result: impl Into<String>,
        prompt: impl Into<String>,
        elapsed: Duration,
    ) -> Self {
        Self {
            command: command.into(),
            result: result.into(),
            raw_result: raw_result.into(),
            prompt: prompt.into(),
            elapsed,
            failure_message: None,
        }
    }

    /// Mark this response as rejected by the device.
    pub fn with_failure(mut self, failure_message: impl Into<String>) -> Self {
        self.failure_message = Some(failure_message.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.failure_message.is_none()
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.result)
    }
}

/// Strip the command echo from the front of `raw` and the prompt line from
/// the end, normalizing CRLF line endings.
pub(crate) fn normalize_output(raw: &str, command: &str) -> String {
    let text = raw.replace("\r\n", "\n");

    let body = text
        .trim_start_matches(['\r', '\n'])
        .strip_prefix(command)
        .unwrap_or(&text)
        .trim_start_matches(['\r', '\n']);

    match body.rfind('\n') {
        Some(pos) => body[..pos].trim_end_matches(['\r', '\n']).to_string(),
        None => String::new(),
    }
}
