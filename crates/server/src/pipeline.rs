//! The answer pipeline: retrieve, assemble context, generate.
//!
//! Failures are typed by kind so each can be tested individually, then
//! collapsed at a single recovery boundary into one fixed user-facing
//! message. Callers of `answer_with_recovery` never observe the kind.

use thiserror::Error;
use tracing::{error, info, warn};

use answerbox_llm::LlmError;

use crate::retriever::RetrieveError;
use crate::state::AppState;

pub const FALLBACK_ANSWER: &str = "An error occurred while processing your request.";

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("retrieval failed: {0}")]
    Retrieval(#[from] RetrieveError),

    #[error("generation failed: {0}")]
    Generation(#[from] LlmError),
}

/// Answer `question` against the loaded index. Empty retrieval is not an
/// error: generation proceeds with an empty context.
pub async fn answer(state: &AppState, question: &str) -> Result<String, PipelineError> {
    let documents = state.retriever.retrieve(question).await?;
    if documents.is_empty() {
        warn!("No relevant documents retrieved for the question");
    } else {
        info!("Retrieved {} relevant documents for the question", documents.len());
    }

    let context = documents
        .iter()
        .map(|doc| doc.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    let answer = state.generator.generate(&context, question).await?;
    info!("Generated answer: {}", answer);
    Ok(answer)
}

/// The recovery boundary: log the failure in full, hand back the fixed
/// fallback answer.
pub async fn answer_with_recovery(state: &AppState, question: &str) -> String {
    match answer(state, question).await {
        Ok(text) => text,
        Err(e) => {
            error!("Error processing question '{}': {}", question, e);
            FALLBACK_ANSWER.to_string()
        }
    }
}
