pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod package;
pub mod scene;
pub mod session;
pub mod subtitle;

pub use api::{ApiKey, GeminiClient, GenerativeBackend, KeyProvider, KeyRing, RequestDispatcher, RotationCursor};
pub use config::Config;
pub use error::{DirectorError, Result};
pub use form::FormParams;
pub use package::ProductionPackage;
pub use session::{GenerationSession, GenerationState};
