use async_trait::async_trait;

/// Decoding randomness controls passed through to the model backend.
///
/// When `do_sample` is false the temperature/top_p values are dropped before
/// they reach a provider: the backend keeps its own defaults rather than
/// receiving conflicting parameters.
#[derive(Debug, Clone)]
pub struct SamplingOptions {
    pub do_sample: bool,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
}

impl SamplingOptions {
    pub fn sampled(temperature: f32, top_p: f32) -> Self {
        Self {
            do_sample: true,
            temperature: Some(temperature),
            top_p: Some(top_p),
        }
    }

    pub fn greedy() -> Self {
        Self {
            do_sample: false,
            temperature: None,
            top_p: None,
        }
    }

    /// Normalize for a provider request: disabled sampling clears the
    /// sampling-branch parameters entirely.
    pub fn effective(&self) -> Self {
        if self.do_sample {
            self.clone()
        } else {
            Self::greedy()
        }
    }
}

/// Trait for LLM backends.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Run one completion over a raw prompt and return the output text.
    async fn complete(&self, prompt: &str, sampling: &SamplingOptions) -> Result<String, LlmError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {status}: {body}")]
    Api { status: u16, body: String },
    #[error("failed to parse response: {0}")]
    Parse(String),
}
