use axum::{
    extract::State,
    response::IntoResponse,
    Json,
};

use crate::dto::{AskRequest, AskResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /ask - answer a question from the indexed corpus.
///
/// Every pipeline outcome (answer, refusal, not-initialized, recovered
/// service error) is a 200 with an `answer` body; only an empty question is
/// a client error.
pub async fn handle_ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let question = request.question.trim();

    if question.is_empty() {
        return Err(ApiError::bad_request("Empty question"));
    }

    tracing::info!(question = %question, "Processing question");

    let outcome = state.pipeline.answer(question).await;

    Ok(Json(AskResponse { answer: outcome.into_message() }))
}
