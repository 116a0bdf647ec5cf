//! Route definitions for the quiz generation API.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    generate_next_question, generate_personalized_attributes, generate_technotype_conversation,
    generate_technotype_quiz, health, method_not_allowed, openai_test, AppState,
};

/// Create the API router with all endpoints.
///
/// # Endpoints
///
/// - `GET /api/health` - Liveness probe with credential diagnostics
/// - `GET /api/openai-test` - Upstream connectivity check
/// - `POST /api/generate-next-question` - Next conversational question
/// - `POST /api/generate-technotype-quiz` - Classify quiz answers
/// - `POST /api/generate-technotype-conversation` - Classify a transcript
/// - `POST /api/generate-personalized-attributes` - Skill-tree attributes
///
/// Unsupported methods on generation routes answer 405 with
/// `{"error":"Method not allowed"}`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/openai-test",
            get(openai_test).fallback(method_not_allowed),
        )
        .route(
            "/api/generate-next-question",
            post(generate_next_question).fallback(method_not_allowed),
        )
        .route(
            "/api/generate-technotype-quiz",
            post(generate_technotype_quiz).fallback(method_not_allowed),
        )
        .route(
            "/api/generate-technotype-conversation",
            post(generate_technotype_conversation).fallback(method_not_allowed),
        )
        .route(
            "/api/generate-personalized-attributes",
            post(generate_personalized_attributes).fallback(method_not_allowed),
        )
}
