//! Challenge resolution orchestration.
//!
//! Wires the pure status interpreter together with the injected collaborators
//! (call object, user prompt, signing device, connectivity predicate) and
//! drives the poll/act/resubmit loop until the call reaches a terminal state.
//! Rounds are strictly sequential: the side effect of one round completes
//! before the next poll, and nothing overlaps for a given call instance.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::challenge::call::{TransportError, TwoFactorCall};
use crate::challenge::interpreter::{ResolutionStep, interpret};
use crate::challenge::status::StatusDocument;
use crate::resolvers::connectivity::{
    ConnectivityWaiter, DEFAULT_CONNECT_ATTEMPTS, DEFAULT_CONNECT_BACKOFF,
};
use crate::resolvers::device::{DeviceCodeResolver, DeviceError, SigningDevice};
use crate::resolvers::prompt::{PromptError, UserPrompt};

/// Result alias used across the orchestration layer.
pub type ChallengeResult<T> = Result<T, ChallengeError>;

/// Terminal failure of one resolution attempt.
///
/// A challenge is either fully resolved or not resolved at all; every variant
/// here aborts the current [`ChallengeEngine::resolve`] immediately. Any
/// higher-level retry (re-prompting for a PIN, say) is the caller's business.
#[derive(Debug, Error)]
pub enum ChallengeError {
    /// Malformed or unrecognised status document, missing required field, or
    /// unknown device action. Never retried.
    #[error("protocol error: {0}")]
    Protocol(String),
    /// The backend reported `status = error`; the message is surfaced
    /// verbatim for the caller to display or classify.
    #[error("authentication failed: {0}")]
    AuthFailure(String),
    /// The user declined a prompt. Distinct from failure so callers can
    /// suppress error UI on this path.
    #[error("action canceled by user")]
    Cancelled,
    /// The connectivity predicate never became true within the configured
    /// attempt budget.
    #[error("connection timed out after {attempts} attempts")]
    Timeout { attempts: u32 },
    /// Prompt collaborator failed for a reason other than cancellation.
    #[error("prompt failed: {0}")]
    Prompt(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Device(#[from] DeviceError),
}

impl ChallengeError {
    /// True when the backend rejected the credentials themselves.
    ///
    /// The backend marks that condition with a `:login failed:` token inside
    /// the error message; callers use this to drive PIN-retry bookkeeping
    /// without string-matching on their own.
    pub fn is_login_failure(&self) -> bool {
        matches!(self, ChallengeError::AuthFailure(message) if message.contains(":login failed:"))
    }
}

impl From<PromptError> for ChallengeError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::Cancelled => ChallengeError::Cancelled,
            PromptError::Failed(message) => ChallengeError::Prompt(message),
        }
    }
}

/// Engine policy values with documented defaults.
///
/// Serde-derived so hosts can read it straight out of their own settings
/// files; everything defaults to the stock policy when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Connectivity checks per wait. Default 5.
    pub connect_attempts: u32,
    /// Pause between failed connectivity checks. Default 3 seconds.
    pub connect_backoff: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            connect_attempts: DEFAULT_CONNECT_ATTEMPTS,
            connect_backoff: DEFAULT_CONNECT_BACKOFF,
        }
    }
}

/// Fluent builder for [`ChallengeEngine`].
pub struct EngineBuilder<C> {
    call: C,
    prompt: Arc<dyn UserPrompt>,
    device: Option<Arc<dyn SigningDevice>>,
    config: EngineConfig,
}

impl<C: TwoFactorCall> EngineBuilder<C> {
    pub fn new(call: C, prompt: Arc<dyn UserPrompt>) -> Self {
        Self {
            call,
            prompt,
            device: None,
            config: EngineConfig::default(),
        }
    }

    /// Attach a hardware signer for device-delegated resolutions.
    pub fn with_signing_device(mut self, device: Arc<dyn SigningDevice>) -> Self {
        self.device = Some(device);
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> ChallengeEngine<C> {
        ChallengeEngine {
            call: self.call,
            prompt: self.prompt,
            device: self.device.map(DeviceCodeResolver::new),
            waiter: ConnectivityWaiter::new(
                self.config.connect_attempts,
                self.config.connect_backoff,
            ),
        }
    }
}

/// Drives one call object through its two-factor handshake.
///
/// The engine holds no state across resolutions beyond its injected
/// collaborators; a [`StatusDocument`] is fetched fresh each round, acted on,
/// and discarded.
pub struct ChallengeEngine<C> {
    call: C,
    prompt: Arc<dyn UserPrompt>,
    device: Option<DeviceCodeResolver>,
    waiter: ConnectivityWaiter,
}

impl<C: TwoFactorCall> ChallengeEngine<C> {
    /// Engine with default policy and no signing device attached.
    pub fn new(call: C, prompt: Arc<dyn UserPrompt>) -> Self {
        EngineBuilder::new(call, prompt).build()
    }

    pub fn builder(call: C, prompt: Arc<dyn UserPrompt>) -> EngineBuilder<C> {
        EngineBuilder::new(call, prompt)
    }

    /// Resolve the challenge, checking `connected` before any submission
    /// that will be followed by a device round trip.
    ///
    /// Returns the terminal `done` document, or the first failure. The loop
    /// has no round bound of its own; termination is the protocol's contract.
    pub async fn resolve<F>(&self, connected: F) -> ChallengeResult<StatusDocument>
    where
        F: Fn() -> bool + Send + Sync,
    {
        let mut round = 0u32;
        loop {
            round += 1;
            let document = self.call.status().await?;
            let step = interpret(&document)?;
            log::debug!("round {round}: {:?} -> {step:?}", document.status);

            match step {
                ResolutionStep::Finished => {
                    log::info!("challenge resolved after {round} round(s)");
                    return Ok(document);
                }
                ResolutionStep::Fail(message) => {
                    log::info!("challenge failed: {message}");
                    return Err(ChallengeError::AuthFailure(message));
                }
                ResolutionStep::PlaceCall => {
                    self.call.call().await?;
                }
                ResolutionStep::RequestCode(method) => {
                    self.call.request_code(&method).await?;
                }
                ResolutionStep::ChooseMethod(methods) => {
                    let method = self.prompt.choose_method(&methods).await?;
                    self.waiter.wait(&connected).await?;
                    self.call.request_code(&method).await?;
                }
                ResolutionStep::ResolveWithDevice(request) => {
                    let resolver = self.device.as_ref().ok_or_else(|| {
                        ChallengeError::Protocol(format!(
                            "device action '{}' requested but no signing device is attached",
                            request.action
                        ))
                    })?;
                    let code = resolver.resolve(&request).await?;
                    self.call.resolve_code(&code).await?;
                }
                ResolutionStep::PromptCode(method) => {
                    let code = self.prompt.prompt_code(&method).await?;
                    self.waiter.wait(&connected).await?;
                    self.call.resolve_code(&code).await?;
                }
            }
        }
    }

    /// Resolve with an always-true connectivity predicate, for sessions with
    /// no attached device to lose.
    pub async fn resolve_unattended(&self) -> ChallengeResult<StatusDocument> {
        self.resolve(|| true).await
    }
}
