//! Retrieval-augmented chat endpoint.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::error;

use citelens_common::models::{ChatMessage, ChatRequest, ChatResponse};
use citelens_llm::{CompletionRequest, LlmError};

use crate::handlers::papers::load_papers_response;
use crate::retrieval::{
    apply_filters, render_context, select_context, system_prompt, DEMO_MODE_MESSAGE,
    MAX_HISTORY_TURNS,
};
use crate::state::SharedState;
use crate::stub;

const FALLBACK_REPLY: &str = "I apologize, but I couldn't generate a response.";

/// POST /api/chat
pub async fn chat(
    State(state): State<SharedState>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse {
    // Context corpus: live papers when available, stub set otherwise.
    let papers = match load_papers_response(state.storage.as_ref()).await {
        Some(resp) => resp.papers,
        None => stub::stub_papers().papers,
    };
    let papers = apply_filters(papers, request.filters.as_ref());

    let query = request
        .messages
        .last()
        .map(|m| m.content.clone())
        .unwrap_or_default();
    let context_papers = select_context(&query, &papers);
    let relevant_papers: Vec<String> = context_papers.iter().map(|p| p.id.clone()).collect();

    let mut messages = vec![ChatMessage {
        role: "system".to_string(),
        content: system_prompt(&render_context(&context_papers)),
    }];
    let tail = request.messages.len().saturating_sub(MAX_HISTORY_TURNS);
    messages.extend(request.messages[tail..].iter().cloned());

    let completion = state
        .llm
        .complete(CompletionRequest {
            messages,
            model: None,
            temperature: Some(0.7),
            max_tokens: Some(500),
        })
        .await;

    match completion {
        Ok(resp) => {
            let message = if resp.content.is_empty() {
                FALLBACK_REPLY.to_string()
            } else {
                resp.content
            };
            Json(ChatResponse { message, relevant_papers }).into_response()
        }
        // Missing credential is a feature state, not a failure: the site
        // still works, the assistant just announces demo mode.
        Err(LlmError::MissingCredential) => Json(ChatResponse {
            message: DEMO_MODE_MESSAGE.to_string(),
            relevant_papers: Vec::new(),
        })
        .into_response(),
        Err(e) => {
            error!(error = %e, "Chat completion failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to process chat request",
                    "message": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}
