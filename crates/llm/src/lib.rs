pub mod generate;
pub mod provider;
pub mod providers;

pub use generate::Generator;
pub use provider::{LlmError, LlmProvider, SamplingOptions};
pub use providers::ollama::OllamaGenerator;
