//! Answer generation: prompt assembly, input budgeting, and extraction of
//! the answer span from the model output.

use std::sync::Arc;

use tracing::debug;

use crate::provider::{LlmError, LlmProvider, SamplingOptions};

pub struct Generator {
    provider: Arc<dyn LlmProvider>,
    sampling: SamplingOptions,
    /// Input budget for the formatted prompt, counted in whitespace words as
    /// a stand-in for model tokens (tokenization belongs to the backend).
    max_input_tokens: usize,
}

impl Generator {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        sampling: SamplingOptions,
        max_input_tokens: usize,
    ) -> Self {
        Self {
            provider,
            sampling,
            max_input_tokens,
        }
    }

    /// Produce one complete answer for `question` conditioned on `context`.
    /// With sampling disabled the call is reproducible for identical inputs.
    pub async fn generate(&self, context: &str, question: &str) -> Result<String, LlmError> {
        let prompt = build_prompt(context, question, self.max_input_tokens);
        debug!("Prompt length: {} words", prompt.split_whitespace().count());

        let output = self.provider.complete(&prompt, &self.sampling).await?;
        Ok(extract_answer(&output))
    }
}

/// Format `{context}\n\nQuestion: {question}\nAnswer:`, truncating the
/// context so the whole prompt stays within `max_input_tokens` words. The
/// question and the answer scaffolding always survive truncation.
fn build_prompt(context: &str, question: &str, max_input_tokens: usize) -> String {
    let tail = format!("Question: {question}\nAnswer:");
    let tail_words = tail.split_whitespace().count();
    let context_budget = max_input_tokens.saturating_sub(tail_words);
    let context = truncate_words(context, context_budget);
    format!("{context}\n\nQuestion: {question}\nAnswer:")
}

fn truncate_words(text: &str, max_words: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max_words {
        text.to_string()
    } else {
        words[..max_words].join(" ")
    }
}

/// Keep only what follows the final `Answer:` marker; the full trimmed
/// output when no marker is present.
fn extract_answer(output: &str) -> String {
    output
        .rsplit("Answer:")
        .next()
        .unwrap_or(output)
        .trim()
        .to_string()
}
