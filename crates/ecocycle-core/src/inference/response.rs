use std::time::Duration;

use uuid::Uuid;

/// Token accounting reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt, image included.
    pub prompt_tokens: u32,
    /// Tokens generated in the reply.
    pub completion_tokens: u32,
}

impl TokenUsage {
    /// Returns the sum of prompt and completion tokens, saturating at `u32::MAX`.
    pub const fn total_tokens(&self) -> u32 {
        self.prompt_tokens.saturating_add(self.completion_tokens)
    }
}

/// Text reply to a [`VisionRequest`](super::VisionRequest).
#[derive(Debug, Clone, PartialEq)]
pub struct VisionResponse {
    /// Identifier of the request this answers.
    pub request_id: Uuid,
    /// Content of the first completion choice.
    pub content: String,
    /// Model that produced the reply, as reported by the backend.
    pub model: String,
    /// Token usage, when reported.
    pub usage: Option<TokenUsage>,
    /// Wall-clock time spent waiting for the backend.
    pub elapsed: Duration,
}

impl VisionResponse {
    /// Creates a response with no usage data and zero elapsed time.
    pub fn new(request_id: Uuid, model: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            request_id,
            content: content.into(),
            model: model.into(),
            usage: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Sets the token usage.
    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    /// Sets the elapsed time.
    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_tokens_sums_usage() {
        let usage = TokenUsage {
            prompt_tokens: 1200,
            completion_tokens: 85,
        };
        assert_eq!(usage.total_tokens(), 1285);
    }

    #[test]
    fn total_tokens_saturates() {
        let usage = TokenUsage {
            prompt_tokens: u32::MAX,
            completion_tokens: 7,
        };
        assert_eq!(usage.total_tokens(), u32::MAX);
    }
}
