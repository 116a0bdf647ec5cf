//! Core quiz data types.
//!
//! These types travel between the browser, the proxy and the generation
//! pipeline. A quiz session produces either a fixed list of [`Answer`]s or an
//! open-ended transcript of [`ConversationMessage`]s; both terminate in a
//! [`TechnotypeProfile`].

use serde::{Deserialize, Serialize};

/// Fallback technotype label used when the model output cannot be parsed
/// or the generation call fails entirely.
pub const FALLBACK_TECHNOTYPE: &str = "Digital Explorer";

/// Default description paired with [`FALLBACK_TECHNOTYPE`] on total failure
/// or when the model returned an empty completion.
pub const DEFAULT_DESCRIPTION: &str = "A technology enthusiast who embraces digital innovation \
and adapts quickly to new tools and platforms.";

/// Default one-sentence summary for conversation-based fallbacks.
pub const DEFAULT_SUMMARY: &str = "A curious explorer who thrives on digital innovation.";

/// Number of personalized attributes in every response.
pub const ATTRIBUTE_COUNT: usize = 8;

/// Default skill-tree attributes returned when attribute generation fails.
pub const DEFAULT_ATTRIBUTES: [(&str, &str); ATTRIBUTE_COUNT] = [
    ("Digital Focus", "Set specific goals for each tech session"),
    ("No Screens Before Bed", "Stop using devices 1 hour before sleep"),
    ("Intentional Usage", "Check your phone with purpose, not habit"),
    ("Digital Boundaries", "Set daily limits on app usage"),
    ("Mindful Consumption", "Choose content that adds value to your life"),
    ("Tech Balance", "Spend equal time on digital and analog activities"),
    ("Digital Wellness", "Take regular breaks from screens"),
    ("Smart Habits", "Build consistent daily tech routines"),
];

/// One forced-choice quiz response. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// The question that was asked.
    pub question: String,
    /// The answer the user picked or typed.
    pub answer: String,
}

impl Answer {
    /// Creates a new answer.
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// One turn in an open conversational quiz.
///
/// The assistant role holds generated questions, the user role holds typed
/// answers. History is ordered and appended monotonically by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// Who sent this message.
    pub role: MessageRole,
    /// Message content.
    pub content: String,
}

impl ConversationMessage {
    /// Creates a new message.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// Role of the message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// User input.
    User,
    /// Assistant (model) response.
    Assistant,
}

impl MessageRole {
    /// Lowercase wire name, used when rendering transcripts into prompts.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// Terminal output of the classification pipeline.
///
/// Invariant: `technotype` and `description` are non-empty in every code
/// path; total failure falls back to [`TechnotypeProfile::default_profile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnotypeProfile {
    /// Short archetype label, e.g. "Digital Nomad".
    pub technotype: String,
    /// Prose description (2-3 paragraphs when model-generated).
    pub description: String,
    /// Optional one-sentence subtitle (conversation mode only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl TechnotypeProfile {
    /// The hardcoded profile returned when generation fails entirely.
    pub fn default_profile() -> Self {
        Self {
            technotype: FALLBACK_TECHNOTYPE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            summary: None,
        }
    }

    /// Wraps unstructured model output in the fallback shape.
    ///
    /// The raw text becomes the description verbatim so no information is
    /// discarded; an empty completion falls back to the default description.
    pub fn from_raw_text(raw: &str, with_summary: bool) -> Self {
        Self {
            technotype: FALLBACK_TECHNOTYPE.to_string(),
            description: if raw.is_empty() {
                DEFAULT_DESCRIPTION.to_string()
            } else {
                raw.to_string()
            },
            summary: with_summary.then(|| DEFAULT_SUMMARY.to_string()),
        }
    }
}

/// One entry of the personalized skill tree derived from a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalizedAttribute {
    /// Short attribute name (2-4 words).
    pub title: String,
    /// One actionable suggestion.
    pub suggestion: String,
}

impl PersonalizedAttribute {
    /// Creates a new attribute.
    pub fn new(title: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            suggestion: suggestion.into(),
        }
    }

    /// The hardcoded default attribute list.
    pub fn default_list() -> Vec<Self> {
        DEFAULT_ATTRIBUTES
            .iter()
            .map(|(title, suggestion)| Self::new(*title, *suggestion))
            .collect()
    }
}
