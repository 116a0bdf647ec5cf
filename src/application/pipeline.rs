//! The quiz-to-archetype generation pipeline.
//!
//! Orchestrates one generation call per quiz step: render the prompt, send
//! it through the [`TextGenerator`] port, and hand the outcome to the
//! domain parser. Classification calls absorb upstream failures into the
//! default profile (the caller still learns about them through
//! [`Classification::error`]); question generation propagates errors so the
//! HTTP layer can fail loud.

use std::sync::Arc;

use crate::domain::parser::{classify, parse_attributes, AttributeSet, Classification};
use crate::domain::prompts;
use crate::domain::quiz::{Answer, ConversationMessage};
use crate::ports::{GenerationError, GenerationRequest, TextGenerator};

/// Output bound for the connectivity check call.
const CONNECTIVITY_CHECK_MAX_TOKENS: u32 = 10;

/// Generation pipeline shared by all quiz endpoints.
#[derive(Clone)]
pub struct TechnotypePipeline {
    generator: Arc<dyn TextGenerator>,
    /// Model tier for attribute generation.
    attributes_model: String,
}

impl TechnotypePipeline {
    /// Creates a pipeline over a generator.
    pub fn new(generator: Arc<dyn TextGenerator>, attributes_model: impl Into<String>) -> Self {
        Self {
            generator,
            attributes_model: attributes_model.into(),
        }
    }

    /// Generates the next conversational question.
    ///
    /// Errors propagate: a missing question blocks the quiz, so the caller
    /// surfaces the failure and the browser retries.
    pub async fn next_question(
        &self,
        history: &[ConversationMessage],
        question_count: u32,
    ) -> Result<String, GenerationError> {
        let prompt = prompts::next_question_prompt(history, question_count);
        self.generator.generate(GenerationRequest::new(prompt)).await
    }

    /// Classifies a completed forced-choice quiz.
    pub async fn classify_quiz(&self, answers: &[Answer]) -> Classification {
        let prompt = prompts::quiz_classification_prompt(answers);
        let outcome = self
            .generator
            .generate(GenerationRequest::new(prompt).with_json_output())
            .await;
        classify(outcome.map_err(|e| e.to_string()), false)
    }

    /// Classifies a conversational quiz transcript.
    pub async fn classify_conversation(
        &self,
        history: &[ConversationMessage],
    ) -> Classification {
        let prompt = prompts::conversation_classification_prompt(history);
        let outcome = self
            .generator
            .generate(GenerationRequest::new(prompt).with_json_output())
            .await;
        classify(outcome.map_err(|e| e.to_string()), true)
    }

    /// Generates the personalized skill-tree attributes for a profile.
    pub async fn personalized_attributes(
        &self,
        technotype: &str,
        technotype_summary: &str,
    ) -> AttributeSet {
        let prompt = prompts::attributes_prompt(technotype, technotype_summary);
        let outcome = self
            .generator
            .generate(
                GenerationRequest::new(prompt)
                    .with_model(&self.attributes_model)
                    .with_json_output(),
            )
            .await;
        parse_attributes(outcome.map_err(|e| e.to_string()))
    }

    /// Lightweight upstream connectivity check, bounded to a few tokens.
    pub async fn connectivity_check(&self) -> Result<String, GenerationError> {
        self.generator
            .generate(GenerationRequest::new("Hello").with_max_tokens(CONNECTIVITY_CHECK_MAX_TOKENS))
            .await
    }
}
