//! Generation adapters: the OpenAI implementation and a test mock.

mod mock;
mod openai;

pub use mock::{MockFailure, MockGenerator};
pub use openai::{OpenAiGenerator, OpenAiGeneratorConfig};
