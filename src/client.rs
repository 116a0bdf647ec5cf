//! Client SDK for the quiz backend.
//!
//! Mirrors the browser caller: every proxy call is wrapped in a bounded
//! retry with exponential backoff and a fixed per-attempt timeout. When
//! retries are exhausted, a liveness probe against `/api/health`
//! distinguishes "backend not running" from "backend reachable but the
//! upstream call failed", and the surfaced error differs accordingly.
//!
//! Calls are strictly sequential per quiz session; there is no cancellation
//! of an in-flight request.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::quiz::{Answer, ConversationMessage, PersonalizedAttribute, TechnotypeProfile};

/// Error surfaced to the UI after the retry policy has run its course.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The proxy itself is unreachable (liveness probe failed too).
    #[error("Backend server is not running. Please start the server first.")]
    BackendUnreachable,

    /// The proxy is reachable but the call kept failing; carries the last
    /// error text (upstream `details`/`error` field or HTTP status).
    #[error("{0}")]
    Api(String),
}

#[derive(Debug, serde::Deserialize)]
struct WireError {
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for the quiz generation API.
#[derive(Debug, Clone)]
pub struct QuizClient {
    http: Client,
    probe: Client,
    base_url: String,
    retries: u32,
    backoff_base: Duration,
}

impl QuizClient {
    /// Per-attempt request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
    /// Liveness probe timeout.
    pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);
    /// Retries after the first attempt (3 attempts total).
    pub const DEFAULT_RETRIES: u32 = 2;
    /// First backoff delay; doubles per attempt.
    pub const DEFAULT_BACKOFF_BASE: Duration = Duration::from_secs(1);

    /// Creates a client for the given base URL, e.g. `http://localhost:3001`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeouts(base_url, Self::REQUEST_TIMEOUT, Self::HEALTH_TIMEOUT)
    }

    /// Creates a client with explicit request and probe timeouts.
    pub fn with_timeouts(
        base_url: impl Into<String>,
        request_timeout: Duration,
        health_timeout: Duration,
    ) -> Self {
        let http = Client::builder()
            .timeout(request_timeout)
            .build()
            .expect("Failed to create HTTP client");
        let probe = Client::builder()
            .timeout(health_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            probe,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            retries: Self::DEFAULT_RETRIES,
            backoff_base: Self::DEFAULT_BACKOFF_BASE,
        }
    }

    /// Sets the retry count (attempts = retries + 1).
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Sets the first backoff delay (doubles per subsequent attempt).
    pub fn with_backoff_base(mut self, base: Duration) -> Self {
        self.backoff_base = base;
        self
    }

    /// Generates the next conversational question.
    pub async fn generate_next_question(
        &self,
        history: &[ConversationMessage],
        question_count: u32,
    ) -> Result<String, ClientError> {
        self.post_with_retry(
            "/api/generate-next-question",
            &json!({
                "conversationHistory": history,
                "currentQuestionCount": question_count,
            }),
        )
        .await
    }

    /// Classifies a completed forced-choice quiz.
    pub async fn technotype_from_quiz(
        &self,
        answers: &[Answer],
    ) -> Result<TechnotypeProfile, ClientError> {
        self.post_with_retry("/api/generate-technotype-quiz", &json!({ "answers": answers }))
            .await
    }

    /// Classifies a conversational quiz transcript.
    pub async fn technotype_from_conversation(
        &self,
        history: &[ConversationMessage],
    ) -> Result<TechnotypeProfile, ClientError> {
        self.post_with_retry(
            "/api/generate-technotype-conversation",
            &json!({ "conversationHistory": history }),
        )
        .await
    }

    /// Generates the personalized skill-tree attributes for a profile.
    pub async fn personalized_attributes(
        &self,
        technotype: &str,
        technotype_summary: &str,
    ) -> Result<Vec<PersonalizedAttribute>, ClientError> {
        #[derive(serde::Deserialize)]
        struct Envelope {
            attributes: Vec<PersonalizedAttribute>,
        }

        let envelope: Envelope = self
            .post_with_retry(
                "/api/generate-personalized-attributes",
                &json!({
                    "technotype": technotype,
                    "technotypeSummary": technotype_summary,
                }),
            )
            .await?;
        Ok(envelope.attributes)
    }

    /// Checks whether the proxy is up.
    pub async fn is_healthy(&self) -> bool {
        let url = format!("{}/api/health", self.base_url);
        match self.probe.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    /// POSTs a body with the bounded retry policy.
    ///
    /// Transport failures, non-2xx statuses and undecodable bodies all
    /// count as failed attempts. After the last attempt the liveness probe
    /// decides which error is surfaced.
    async fn post_with_retry<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);

        let mut attempt = 0;
        loop {
            match self.try_post(&url, body).await {
                Ok(value) => return Ok(value),
                Err(message) => {
                    if attempt == self.retries {
                        if !self.is_healthy().await {
                            return Err(ClientError::BackendUnreachable);
                        }
                        return Err(ClientError::Api(message));
                    }
                }
            }

            // Exponential backoff: base, 2*base, 4*base, ...
            sleep(self.backoff_base * 2_u32.pow(attempt)).await;
            attempt += 1;
        }
    }

    /// One POST attempt; errors are reduced to a message for the caller.
    async fn try_post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, String> {
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            // Prefer the backend's own error text when the body carries it.
            let message = match response.json::<WireError>().await {
                Ok(wire) => wire
                    .details
                    .or(wire.error)
                    .unwrap_or_else(|| format!("HTTP {}", status)),
                Err(_) => format!("HTTP {}", status),
            };
            return Err(message);
        }

        response.json::<T>().await.map_err(|e| e.to_string())
    }
}
