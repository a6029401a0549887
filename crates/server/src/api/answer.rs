//! The question answering endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::pipeline;
use crate::state::AppState;

use super::ErrorResponse;

#[derive(Deserialize)]
pub struct AnswerRequest {
    pub question: String,
}

#[derive(Serialize)]
pub struct AnswerResponse {
    pub answer: String,
}

pub async fn answer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, (StatusCode, Json<ErrorResponse>)> {
    info!("Received question: {}", req.question);

    if req.question.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                detail: "Question cannot be empty.",
            }),
        ));
    }

    let answer = pipeline::answer_with_recovery(&state, &req.question).await;
    Ok(Json(AnswerResponse { answer }))
}
