// LLM client boundary

/// Error type for completion requests.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The request could not be completed (transport, auth, rate limit...).
    #[error("LLM request failed: {0}")]
    Request(String),

    /// The API answered without any completion choice.
    #[error("LLM returned no completion")]
    EmptyCompletion,
}

/// A chat-completion backend. Calls are expensive; the cache exists to avoid
/// them.
pub trait LlmClient {
    /// Send `prompt` and return the text of the first completion choice.
    fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

impl<F> LlmClient for F
where
    F: Fn(&str) -> Result<String, LlmError>,
{
    fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_clients() {
        let echo = |prompt: &str| -> Result<String, LlmError> { Ok(format!("echo: {prompt}")) };
        assert_eq!(echo.complete("hi").unwrap(), "echo: hi");
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            LlmError::Request("timeout".into()).to_string(),
            "LLM request failed: timeout"
        );
        assert_eq!(
            LlmError::EmptyCompletion.to_string(),
            "LLM returned no completion"
        );
    }
}
