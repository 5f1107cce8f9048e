use crate::api::keys::{ApiKey, KeyProvider};
use crate::api::prompt::build_prompt;
use crate::api::GenerativeBackend;
use crate::error::{DirectorError, Result};
use crate::form::FormParams;
use crate::package::ProductionPackage;
use tracing::{info, warn};

/// Round-robin position in the key pool. Callers keep it between calls so
/// successive generations start on the next key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RotationCursor(usize);

impl RotationCursor {
    pub fn new(position: usize) -> Self {
        Self(position)
    }

    pub fn position(&self) -> usize {
        self.0
    }

    /// Index of the key to use in a pool of `len` keys; advances the cursor.
    fn take(&mut self, len: usize) -> usize {
        let index = self.0 % len;
        self.0 = self.0.wrapping_add(1);
        index
    }
}

pub struct RequestDispatcher<B> {
    backend: B,
}

impl<B: GenerativeBackend> RequestDispatcher<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Produces a package, trying each key at most once starting at `cursor`.
    pub async fn generate(
        &self,
        params: &FormParams,
        writing_style_desc: &str,
        keys: &dyn KeyProvider,
        cursor: &mut RotationCursor,
    ) -> Result<ProductionPackage> {
        let keys = keys.keys()?;
        if keys.is_empty() {
            return Err(DirectorError::NoCredentials);
        }
        params.validate()?;

        let prompt = build_prompt(params, writing_style_desc);
        let mut all_invalid = true;

        for attempt in 0..keys.len() {
            let key = &keys[cursor.take(keys.len())];

            let err = match self.attempt(key, &prompt).await {
                Ok(package) => {
                    info!(
                        "Generated {} scenes and {} characters with key {}",
                        package.script.len(),
                        package.character_sheet.len(),
                        key
                    );
                    for clip in package.subtitle_flag_violations() {
                        warn!(
                            "Scene {} clip {} has dialogue subtitles enabled",
                            clip.scene_number,
                            clip.clip_index + 1
                        );
                    }
                    return Ok(package);
                }
                Err(err) => err,
            };

            warn!("Attempt with key ending in {} failed: {}", key, err);
            all_invalid &= err.is_invalid_credentials();

            if attempt == keys.len() - 1 {
                return Err(if all_invalid {
                    DirectorError::AllKeysInvalid
                } else if err.is_content_block() {
                    DirectorError::InvalidResponseFormat
                } else {
                    DirectorError::Exhausted(Box::new(err))
                });
            }
        }

        // The last iteration always returns.
        Err(DirectorError::AllKeysFailed)
    }

    async fn attempt(&self, key: &ApiKey, prompt: &str) -> Result<ProductionPackage> {
        let raw = self.backend.generate_content(key, prompt).await?;
        let json_text = raw.trim();
        if json_text.is_empty() {
            return Err(DirectorError::EmptyResponse);
        }
        ProductionPackage::from_json(json_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_wraps_around_pool() {
        let mut cursor = RotationCursor::default();
        let picks: Vec<usize> = (0..5).map(|_| cursor.take(3)).collect();
        assert_eq!(picks, vec![0, 1, 2, 0, 1]);
        assert_eq!(cursor.position(), 5);
    }

    #[test]
    fn cursor_adapts_to_pool_size_changes() {
        let mut cursor = RotationCursor::new(7);
        assert_eq!(cursor.take(2), 1);
        assert_eq!(cursor.take(4), 0);
    }
}
