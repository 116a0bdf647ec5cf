//! HTTP handlers for the quiz generation endpoints.
//!
//! The proxy fails loud at the network boundary (missing credential,
//! upstream errors become 500s) and silent at the content boundary
//! (unparseable model output is downgraded to fallback results with 200).

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::adapters::ai::{OpenAiGenerator, OpenAiGeneratorConfig};
use crate::application::TechnotypePipeline;
use crate::config::AppConfig;

use super::dto::{
    AttributesFailureResponse, AttributesRequest, AttributesResponse,
    ClassificationFailureResponse, ConnectivityResponse, ConversationClassificationRequest,
    EnvDebug, ErrorResponse, HealthResponse, NextQuestionRequest, QuizClassificationRequest,
};

/// Error message returned when no credential is configured.
///
/// The proxy is the last line before the paid upstream call, so this fails
/// loud, unlike the parser fallbacks.
pub const MISSING_KEY_ERROR: &str = "OPENAI_API_KEY is missing in environment variables!";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state.
///
/// `pipeline` is `None` when no API key is configured; generation routes
/// then answer 500 without attempting an upstream call.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Option<TechnotypePipeline>,
    pub env_debug: EnvDebug,
}

impl AppState {
    /// Builds state from the application configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        let pipeline = OpenAiGeneratorConfig::from_app_config(&config.ai).map(|gen_config| {
            TechnotypePipeline::new(
                Arc::new(OpenAiGenerator::new(gen_config)),
                &config.ai.attributes_model,
            )
        });

        Self {
            pipeline,
            env_debug: EnvDebug {
                openai_key_exists: config.ai.has_api_key(),
                openai_key_length: config.ai.key_length(),
                openai_key_prefix: config.ai.key_prefix(),
            },
        }
    }

    /// Builds state around an existing pipeline (tests).
    pub fn with_pipeline(pipeline: TechnotypePipeline) -> Self {
        Self {
            pipeline: Some(pipeline),
            env_debug: EnvDebug {
                openai_key_exists: true,
                openai_key_length: 7,
                openai_key_prefix: "sk-t".to_string(),
            },
        }
    }

    /// Builds state with no credential configured (tests).
    pub fn without_credential() -> Self {
        Self {
            pipeline: None,
            env_debug: EnvDebug {
                openai_key_exists: false,
                openai_key_length: 0,
                openai_key_prefix: String::new(),
            },
        }
    }
}

fn missing_key_response() -> Response {
    tracing::error!("{}", MISSING_KEY_ERROR);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(MISSING_KEY_ERROR)),
    )
        .into_response()
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// Liveness probe with credential diagnostics.
///
/// GET /api/health
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        env_debug: state.env_debug.clone(),
    })
}

/// Lightweight upstream connectivity check.
///
/// GET /api/openai-test
pub async fn openai_test(State(state): State<AppState>) -> Response {
    let Some(pipeline) = state.pipeline else {
        return missing_key_response();
    };

    match pipeline.connectivity_check().await {
        Ok(result) => Json(ConnectivityResponse { result }).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "connectivity check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response()
        }
    }
}

/// Generate the next conversational question.
///
/// POST /api/generate-next-question
pub async fn generate_next_question(
    State(state): State<AppState>,
    Json(request): Json<NextQuestionRequest>,
) -> Response {
    let Some(pipeline) = state.pipeline else {
        return missing_key_response();
    };

    match pipeline
        .next_question(&request.conversation_history, request.current_question_count)
        .await
    {
        // Raw JSON string, matching the original wire contract.
        Ok(question) => Json(question).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "next-question generation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response()
        }
    }
}

/// Classify a completed forced-choice quiz.
///
/// POST /api/generate-technotype-quiz
pub async fn generate_technotype_quiz(
    State(state): State<AppState>,
    Json(request): Json<QuizClassificationRequest>,
) -> Response {
    let Some(pipeline) = state.pipeline else {
        return classification_failure(MISSING_KEY_ERROR);
    };

    let result = pipeline.classify_quiz(&request.answers).await;
    if result.is_defaulted() {
        let details = result.error.unwrap_or_default();
        tracing::error!(error = %details, "quiz classification failed upstream");
        return classification_failure(&details);
    }

    Json(result.profile).into_response()
}

/// Classify a conversational quiz transcript.
///
/// POST /api/generate-technotype-conversation
pub async fn generate_technotype_conversation(
    State(state): State<AppState>,
    Json(request): Json<ConversationClassificationRequest>,
) -> Response {
    let Some(pipeline) = state.pipeline else {
        return classification_failure(MISSING_KEY_ERROR);
    };

    let result = pipeline
        .classify_conversation(&request.conversation_history)
        .await;
    if result.is_defaulted() {
        let details = result.error.unwrap_or_default();
        tracing::error!(error = %details, "conversation classification failed upstream");
        return classification_failure(&details);
    }

    Json(result.profile).into_response()
}

/// Generate the personalized skill-tree attributes.
///
/// POST /api/generate-personalized-attributes
pub async fn generate_personalized_attributes(
    State(state): State<AppState>,
    Json(request): Json<AttributesRequest>,
) -> Response {
    let Some(pipeline) = state.pipeline else {
        return missing_key_response();
    };

    let set = pipeline
        .personalized_attributes(&request.technotype, &request.technotype_summary)
        .await;
    if set.is_defaulted() {
        let error = set.error.unwrap_or_default();
        tracing::error!(error = %error, "attribute generation failed upstream");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(AttributesFailureResponse {
                error,
                attributes: set.attributes,
            }),
        )
            .into_response();
    }

    Json(AttributesResponse {
        attributes: set.attributes,
    })
    .into_response()
}

/// Rejects unsupported methods on mutation routes.
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::new("Method not allowed")),
    )
        .into_response()
}

fn classification_failure(details: &str) -> Response {
    let fallback = crate::domain::quiz::TechnotypeProfile::default_profile();
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ClassificationFailureResponse {
            details: details.to_string(),
            technotype: fallback.technotype,
            description: fallback.description,
        }),
    )
        .into_response()
}
