//! Model-output parsing with graceful degradation.
//!
//! Converts raw completion text into structured results, tolerating
//! malformed output. Each invocation is a pure function of
//! `(raw text | error text)`; no state persists between calls.
//!
//! The degradation ladder, in order:
//!
//! 1. `Parsed` — the text deserialized into the expected shape.
//! 2. `Fallback` — parsing failed; the raw text is kept verbatim inside a
//!    default-labelled result so no information is discarded.
//! 3. `Defaulted` — the generation call itself failed; a hardcoded constant
//!    result is returned so the caller is never handed a blank screen.

use serde::Deserialize;

use super::quiz::{PersonalizedAttribute, TechnotypeProfile, ATTRIBUTE_COUNT};

/// How a classification was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// Model output deserialized cleanly.
    Parsed,
    /// Model output was unstructured; wrapped in the fallback shape.
    Fallback,
    /// Generation failed; hardcoded default returned.
    Defaulted,
}

/// Outcome of classifying a quiz or conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// The profile handed to the presentation layer. Always populated.
    pub profile: TechnotypeProfile,
    /// How the profile was obtained.
    pub state: ParseState,
    /// Upstream error text, present only when `state` is `Defaulted`.
    pub error: Option<String>,
}

impl Classification {
    /// True when the upstream generation call failed.
    pub fn is_defaulted(&self) -> bool {
        self.state == ParseState::Defaulted
    }
}

/// Outcome of generating personalized attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSet {
    /// Exactly [`ATTRIBUTE_COUNT`] attributes, each with non-empty fields.
    pub attributes: Vec<PersonalizedAttribute>,
    /// How the list was obtained.
    pub state: ParseState,
    /// Upstream error text, present only when `state` is `Defaulted`.
    pub error: Option<String>,
}

impl AttributeSet {
    /// True when the upstream generation call failed.
    pub fn is_defaulted(&self) -> bool {
        self.state == ParseState::Defaulted
    }
}

/// Converts a generation outcome into a profile.
///
/// `with_summary` selects the conversation-mode fallback shape, which
/// carries the fixed one-sentence summary.
pub fn classify(outcome: Result<String, String>, with_summary: bool) -> Classification {
    match outcome {
        Ok(raw) => {
            let (profile, state) = parse_profile(&raw, with_summary);
            Classification {
                profile,
                state,
                error: None,
            }
        }
        Err(error) => Classification {
            profile: TechnotypeProfile::default_profile(),
            state: ParseState::Defaulted,
            error: Some(error),
        },
    }
}

/// Attempts a structured parse of raw model text.
///
/// On parse failure the raw text becomes the description verbatim under the
/// fallback label.
pub fn parse_profile(raw: &str, with_summary: bool) -> (TechnotypeProfile, ParseState) {
    match serde_json::from_str::<TechnotypeProfile>(raw) {
        Ok(profile) => (profile, ParseState::Parsed),
        Err(_) => (
            TechnotypeProfile::from_raw_text(raw, with_summary),
            ParseState::Fallback,
        ),
    }
}

#[derive(Debug, Deserialize)]
struct AttributesEnvelope {
    attributes: Vec<PersonalizedAttribute>,
}

/// Converts a generation outcome into a fixed-size attribute list.
///
/// The 8-item contract is enforced here: a parsed list only passes through
/// when it contains at least 8 usable entries (extra entries are dropped);
/// anything short of that falls back to the default list.
pub fn parse_attributes(outcome: Result<String, String>) -> AttributeSet {
    let raw = match outcome {
        Ok(raw) => raw,
        Err(error) => {
            return AttributeSet {
                attributes: PersonalizedAttribute::default_list(),
                state: ParseState::Defaulted,
                error: Some(error),
            }
        }
    };

    match serde_json::from_str::<AttributesEnvelope>(&raw) {
        Ok(envelope) => {
            let usable: Vec<PersonalizedAttribute> = envelope
                .attributes
                .into_iter()
                .filter(|attr| !attr.title.is_empty() && !attr.suggestion.is_empty())
                .take(ATTRIBUTE_COUNT)
                .collect();

            if usable.len() == ATTRIBUTE_COUNT {
                AttributeSet {
                    attributes: usable,
                    state: ParseState::Parsed,
                    error: None,
                }
            } else {
                AttributeSet {
                    attributes: PersonalizedAttribute::default_list(),
                    state: ParseState::Fallback,
                    error: None,
                }
            }
        }
        Err(_) => AttributeSet {
            attributes: PersonalizedAttribute::default_list(),
            state: ParseState::Fallback,
            error: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quiz::{DEFAULT_DESCRIPTION, DEFAULT_SUMMARY, FALLBACK_TECHNOTYPE};

    #[test]
    fn well_formed_json_passes_through_unchanged() {
        let raw = r#"{"technotype":"Tech Traditionalist","description":"Prefers proven tools."}"#;
        let result = classify(Ok(raw.to_string()), false);

        assert_eq!(result.state, ParseState::Parsed);
        assert_eq!(result.profile.technotype, "Tech Traditionalist");
        assert_eq!(result.profile.description, "Prefers proven tools.");
        assert!(result.profile.summary.is_none());
        assert!(result.error.is_none());
    }

    #[test]
    fn json_with_summary_round_trips() {
        let raw = r#"{"technotype":"Cyber Explorer","description":"Curious.","summary":"Explores."}"#;
        let result = classify(Ok(raw.to_string()), true);

        assert_eq!(result.state, ParseState::Parsed);
        assert_eq!(result.profile.summary.as_deref(), Some("Explores."));
    }

    #[test]
    fn prose_output_becomes_fallback_with_verbatim_description() {
        let raw = "You strike me as someone who lives on the command line.";
        let result = classify(Ok(raw.to_string()), false);

        assert_eq!(result.state, ParseState::Fallback);
        assert_eq!(result.profile.technotype, FALLBACK_TECHNOTYPE);
        assert_eq!(result.profile.description, raw);
    }

    #[test]
    fn conversation_fallback_carries_default_summary() {
        let result = classify(Ok("not json".to_string()), true);
        assert_eq!(result.state, ParseState::Fallback);
        assert_eq!(result.profile.summary.as_deref(), Some(DEFAULT_SUMMARY));
    }

    #[test]
    fn generation_error_yields_exact_default_profile() {
        let result = classify(Err("upstream quota exceeded".to_string()), false);

        assert_eq!(result.state, ParseState::Defaulted);
        assert_eq!(result.profile, TechnotypeProfile::default_profile());
        assert_eq!(result.profile.technotype, FALLBACK_TECHNOTYPE);
        assert_eq!(result.profile.description, DEFAULT_DESCRIPTION);
        assert_eq!(result.error.as_deref(), Some("upstream quota exceeded"));
    }

    #[test]
    fn empty_completion_falls_back_to_default_description() {
        let result = classify(Ok(String::new()), false);
        assert_eq!(result.state, ParseState::Fallback);
        assert_eq!(result.profile.description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn attributes_parse_exact_list() {
        let raw = serde_json::json!({
            "attributes": (1..=8).map(|i| serde_json::json!({
                "title": format!("Attr {i}"),
                "suggestion": format!("Do thing {i}"),
            })).collect::<Vec<_>>(),
        })
        .to_string();

        let set = parse_attributes(Ok(raw));
        assert_eq!(set.state, ParseState::Parsed);
        assert_eq!(set.attributes.len(), 8);
        assert_eq!(set.attributes[0].title, "Attr 1");
    }

    #[test]
    fn attributes_with_extras_are_truncated_to_eight() {
        let raw = serde_json::json!({
            "attributes": (1..=10).map(|i| serde_json::json!({
                "title": format!("Attr {i}"),
                "suggestion": "s",
            })).collect::<Vec<_>>(),
        })
        .to_string();

        let set = parse_attributes(Ok(raw));
        assert_eq!(set.state, ParseState::Parsed);
        assert_eq!(set.attributes.len(), 8);
    }

    #[test]
    fn short_attribute_list_falls_back_to_defaults() {
        let raw = r#"{"attributes":[{"title":"Only One","suggestion":"s"}]}"#;
        let set = parse_attributes(Ok(raw.to_string()));

        assert_eq!(set.state, ParseState::Fallback);
        assert_eq!(set.attributes, PersonalizedAttribute::default_list());
    }

    #[test]
    fn empty_titled_attributes_do_not_count() {
        let raw = serde_json::json!({
            "attributes": (1..=8).map(|_| serde_json::json!({
                "title": "",
                "suggestion": "s",
            })).collect::<Vec<_>>(),
        })
        .to_string();

        let set = parse_attributes(Ok(raw));
        assert_eq!(set.state, ParseState::Fallback);
    }

    #[test]
    fn attribute_generation_error_returns_default_list_with_error() {
        let set = parse_attributes(Err("rate limited".to_string()));
        assert_eq!(set.state, ParseState::Defaulted);
        assert_eq!(set.attributes, PersonalizedAttribute::default_list());
        assert_eq!(set.error.as_deref(), Some("rate limited"));
    }

    #[test]
    fn attribute_fallback_always_has_eight_items() {
        let set = parse_attributes(Ok("not json".to_string()));
        assert_eq!(set.attributes.len(), 8);
        for attr in &set.attributes {
            assert!(!attr.title.is_empty());
            assert!(!attr.suggestion.is_empty());
        }
    }
}
