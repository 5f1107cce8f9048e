use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectorError {
    #[error("Please provide at least one Google Gemini API key.")]
    NoCredentials,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("API key not valid: {0}")]
    InvalidApiKey(String),

    #[error("Response blocked by safety filters: {0}")]
    ContentBlocked(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Received an empty response from the AI.")]
    EmptyResponse,

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("All provided Google Gemini API keys are invalid or have issues. Please check your keys and try again.")]
    AllKeysInvalid,

    #[error("The AI returned an invalid response format. This can happen with high safety settings. Please try again with a different theme.")]
    InvalidResponseFormat,

    #[error("Failed to generate story after trying all keys: {0}")]
    Exhausted(Box<DirectorError>),

    #[error("All API keys failed. Please check your keys and try again.")]
    AllKeysFailed,

    #[error("Please wait {remaining_secs}s before generating again")]
    Cooldown { remaining_secs: u64 },

    #[error("Not found: {0}")]
    NotFound(String),
}

impl DirectorError {
    /// True when the service rejected the credential itself.
    pub fn is_invalid_credentials(&self) -> bool {
        match self {
            DirectorError::InvalidApiKey(_) => true,
            DirectorError::Api(msg) => msg.contains("API key not valid"),
            _ => false,
        }
    }

    /// True when the service refused to produce content for safety reasons.
    pub fn is_content_block(&self) -> bool {
        matches!(self, DirectorError::ContentBlocked(_))
    }
}

pub type Result<T> = std::result::Result<T, DirectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_carries_underlying_message() {
        let err = DirectorError::Exhausted(Box::new(DirectorError::Api("503 overloaded".into())));
        assert_eq!(
            err.to_string(),
            "Failed to generate story after trying all keys: API error: 503 overloaded"
        );
    }

    #[test]
    fn invalid_credentials_signature() {
        assert!(DirectorError::InvalidApiKey("x".into()).is_invalid_credentials());
        assert!(DirectorError::Api("API key not valid. Please pass a valid API key.".into())
            .is_invalid_credentials());
        assert!(!DirectorError::EmptyResponse.is_invalid_credentials());
        assert!(DirectorError::ContentBlocked("SAFETY".into()).is_content_block());
    }
}
