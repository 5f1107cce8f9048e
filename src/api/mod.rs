pub mod dispatcher;
pub mod gemini;
pub mod keys;
pub mod prompt;

pub use dispatcher::{RequestDispatcher, RotationCursor};
pub use gemini::GeminiClient;
pub use keys::{ApiKey, EnvKeys, KeyProvider, KeyRing};
pub use prompt::build_prompt;

use crate::error::Result;
use async_trait::async_trait;

/// A text-generation service that answers one prompt with raw model text.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate_content(&self, api_key: &ApiKey, prompt: &str) -> Result<String>;
}
