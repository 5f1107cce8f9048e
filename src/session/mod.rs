use crate::api::{GenerativeBackend, KeyProvider, RequestDispatcher, RotationCursor};
use crate::error::{DirectorError, Result};
use crate::form::FormParams;
use crate::package::ProductionPackage;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
    Idle,
    Loading,
    Success,
    Error,
    Cooldown,
}

/// Owns everything that outlives a single generation: the rotation cursor,
/// the last package and the resubmission cooldown.
pub struct GenerationSession<B> {
    dispatcher: RequestDispatcher<B>,
    cursor: RotationCursor,
    cooldown: Duration,
    cooldown_until: Option<Instant>,
    state: GenerationState,
    package: Option<ProductionPackage>,
    error_message: Option<String>,
}

impl<B: GenerativeBackend> GenerationSession<B> {
    pub fn new(dispatcher: RequestDispatcher<B>, cooldown: Duration) -> Self {
        Self {
            dispatcher,
            cursor: RotationCursor::default(),
            cooldown,
            cooldown_until: None,
            state: GenerationState::Idle,
            package: None,
            error_message: None,
        }
    }

    pub fn state(&self) -> GenerationState {
        match self.state {
            GenerationState::Cooldown if self.remaining_cooldown().is_zero() => {
                if self.package.is_some() {
                    GenerationState::Success
                } else {
                    GenerationState::Idle
                }
            }
            state => state,
        }
    }

    pub fn remaining_cooldown(&self) -> Duration {
        self.cooldown_until
            .map(|until| until.saturating_duration_since(Instant::now()))
            .unwrap_or(Duration::ZERO)
    }

    pub fn package(&self) -> Option<&ProductionPackage> {
        self.package.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn cursor(&self) -> RotationCursor {
        self.cursor
    }

    /// Runs one generation. Once a valid form and keys were available the
    /// cooldown starts afterwards, whatever the outcome.
    pub async fn submit(
        &mut self,
        params: &FormParams,
        keys: &dyn KeyProvider,
    ) -> Result<&ProductionPackage> {
        let remaining = self.remaining_cooldown();
        if !remaining.is_zero() {
            return Err(DirectorError::Cooldown {
                remaining_secs: remaining.as_secs_f64().ceil() as u64,
            });
        }

        // An invalid form never reaches the dispatcher and leaves the state alone.
        params.validate()?;

        self.transition(GenerationState::Loading);
        self.package = None;
        self.error_message = None;

        let result = self
            .dispatcher
            .generate(
                params,
                params.writing_style.description(),
                keys,
                &mut self.cursor,
            )
            .await;

        let outcome = match result {
            Ok(package) => {
                self.package = Some(package);
                self.transition(GenerationState::Success);
                Ok(())
            }
            Err(err) => {
                self.error_message = Some(err.to_string());
                self.transition(GenerationState::Error);
                Err(err)
            }
        };

        // Nothing was sent without keys, so there is nothing to rate-limit.
        if !matches!(outcome, Err(DirectorError::NoCredentials)) {
            self.start_cooldown();
        }
        outcome?;
        self.package
            .as_ref()
            .ok_or_else(|| DirectorError::NotFound("generated package".to_string()))
    }

    /// Sleeps until another submission is allowed.
    pub async fn wait_for_cooldown(&self) {
        let remaining = self.remaining_cooldown();
        if !remaining.is_zero() {
            info!("Cooling down for {}s", remaining.as_secs_f64().ceil());
            tokio::time::sleep(remaining).await;
        }
    }

    fn start_cooldown(&mut self) {
        self.cooldown_until = Some(Instant::now() + self.cooldown);
        self.transition(GenerationState::Cooldown);
    }

    fn transition(&mut self, next: GenerationState) {
        debug!("Generation state {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
