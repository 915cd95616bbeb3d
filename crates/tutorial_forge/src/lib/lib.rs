mod error;
pub mod extract;
mod generator;
mod llm;
pub mod server;
pub mod tracing;

pub use error::Error;
pub use generator::{
    builder::TutorialGeneratorBuilder, PollConfig, TutorialGenerator,
};
pub use llm::gemini;
pub use llm::model::{AssetHandle, AssetState, GenerativeModel};
