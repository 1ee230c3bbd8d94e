//! User prompt capability.
//!
//! The engine never draws UI; it awaits a [`UserPrompt`] implementation
//! provided by the host application. Implementations are expected to marshal
//! the actual prompt onto their interaction thread (and pause any "processing"
//! indicator) while the engine stays suspended on the background context —
//! the await is the whole handoff, so neither side can deadlock the other.

use async_trait::async_trait;
use thiserror::Error;

use crate::challenge::status::AuthMethod;

/// Outcome of a prompt that did not produce a value.
///
/// Cancellation is a deliberate user decision, not a failure; the engine
/// surfaces it as [`crate::ChallengeError::Cancelled`] so callers can skip
/// error UI on that path.
#[derive(Debug, Clone, Error)]
pub enum PromptError {
    #[error("action canceled by user")]
    Cancelled,
    #[error("prompt failed: {0}")]
    Failed(String),
}

/// Human-interaction capability consumed by the engine.
#[async_trait]
pub trait UserPrompt: Send + Sync {
    /// Present every offered method and return the user's pick.
    ///
    /// `methods` is non-empty and in backend order; implementations should
    /// render [`AuthMethod::label`] and return the element itself so unknown
    /// wire ids survive the round trip.
    async fn choose_method(&self, methods: &[AuthMethod]) -> Result<AuthMethod, PromptError>;

    /// Ask for the one-time code delivered via `method`.
    async fn prompt_code(&self, method: &AuthMethod) -> Result<String, PromptError>;
}
