//! Ports: trait seams between the pipeline and the outside world.

mod generation;

pub use generation::{GenerationError, GenerationRequest, TextGenerator};
