//! Technotype - Terminal-Styled Personality Quiz Backend
//!
//! This crate implements the quiz-to-archetype generation pipeline: user
//! answers or a conversational transcript are rendered into prompts, sent
//! to a hosted text-generation model, and parsed into a technotype profile
//! with layered fallbacks so the quiz always completes.

pub mod adapters;
pub mod application;
pub mod client;
pub mod config;
pub mod domain;
pub mod ports;
