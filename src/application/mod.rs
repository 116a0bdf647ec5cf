//! Application layer: pipeline orchestration over the generation port.

mod pipeline;

pub use pipeline::TechnotypePipeline;
