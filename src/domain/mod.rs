//! Domain layer: quiz data types, prompt construction and output parsing.
//!
//! Everything here is pure; network and HTTP concerns live in adapters.

pub mod parser;
pub mod prompts;
pub mod quiz;

pub use parser::{classify, parse_attributes, AttributeSet, Classification, ParseState};
pub use quiz::{
    Answer, ConversationMessage, MessageRole, PersonalizedAttribute, TechnotypeProfile,
};
