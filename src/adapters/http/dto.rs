//! HTTP DTOs for the quiz endpoints.
//!
//! Field names mirror the browser wire format (camelCase). Request bodies
//! carry the full quiz state on every call; the server keeps nothing.

use serde::{Deserialize, Serialize};

use crate::domain::quiz::{Answer, ConversationMessage, PersonalizedAttribute};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/generate-next-question`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextQuestionRequest {
    /// Transcript so far.
    pub conversation_history: Vec<ConversationMessage>,
    /// Questions already asked.
    pub current_question_count: u32,
}

/// Body of `POST /api/generate-technotype-quiz`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizClassificationRequest {
    /// All recorded forced-choice answers.
    pub answers: Vec<Answer>,
}

/// Body of `POST /api/generate-technotype-conversation`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationClassificationRequest {
    /// The full conversational transcript.
    pub conversation_history: Vec<ConversationMessage>,
}

/// Body of `POST /api/generate-personalized-attributes`.
///
/// The history and quiz answers are accepted for forward compatibility but
/// the attribute prompt is built from the profile fields alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributesRequest {
    /// The classified technotype label.
    pub technotype: String,
    /// One-sentence profile summary.
    #[serde(default)]
    pub technotype_summary: String,
    /// Conversational transcript, if the quiz ran in conversation mode.
    #[serde(default)]
    pub conversation_history: Vec<ConversationMessage>,
    /// Quiz answers, if the quiz ran in forced-choice mode.
    #[serde(default)]
    pub quiz_answers: Vec<Answer>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Generic error payload: `{"error": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Failure payload for classification routes: the fallback profile shape
/// plus the upstream error text, so the browser can still render a result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationFailureResponse {
    /// Upstream error text.
    pub details: String,
    /// Fallback technotype label.
    pub technotype: String,
    /// Fallback description.
    pub description: String,
}

/// Success payload of `POST /api/generate-personalized-attributes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributesResponse {
    pub attributes: Vec<PersonalizedAttribute>,
}

/// Failure payload for attribute generation: the default list plus the
/// upstream error text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributesFailureResponse {
    pub error: String,
    pub attributes: Vec<PersonalizedAttribute>,
}

/// Payload of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub env_debug: EnvDebug,
}

/// Credential diagnostics exposed by the health endpoint.
///
/// Deliberate convenience for deployment debugging; prefix and length leak
/// nothing usable but confirm which key the process picked up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvDebug {
    pub openai_key_exists: bool,
    pub openai_key_length: usize,
    pub openai_key_prefix: String,
}

/// Payload of `GET /api/openai-test`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectivityResponse {
    pub result: String,
}
