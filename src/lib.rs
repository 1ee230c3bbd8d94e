//! # twofactor-rs
//!
//! Client-side two-factor challenge resolution for wallet backends.
//!
//! A backend operation (login, transaction signing, key export…) hands back a
//! call object that must be driven through a multi-round handshake: poll its
//! status, perform whatever side effect the status demands — prompt the user,
//! request a one-time code, delegate to an attached signing device — and
//! resubmit until the call completes. [`ChallengeEngine`] owns that loop; the
//! host application supplies the collaborators as injected capabilities.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use twofactor_rs::{ChallengeEngine, TwoFactorCall, UserPrompt};
//!
//! async fn authorize(
//!     call: impl TwoFactorCall,
//!     prompt: Arc<dyn UserPrompt>,
//! ) -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = ChallengeEngine::new(call, prompt);
//!     let document = engine.resolve_unattended().await?;
//!     println!("authorized: {document:?}");
//!     Ok(())
//! }
//! ```

mod engine;

pub mod challenge;
pub mod resolvers;

pub use crate::engine::{
    ChallengeEngine,
    ChallengeError,
    ChallengeResult,
    EngineBuilder,
    EngineConfig,
};

pub use crate::challenge::{
    AuthMethod,
    DeviceAction,
    DeviceRequest,
    ResolutionStep,
    Status,
    StatusDocument,
    TransportError,
    TwoFactorCall,
    interpret,
};

pub use crate::resolvers::{
    ConnectivityWaiter,
    DEFAULT_CONNECT_ATTEMPTS,
    DEFAULT_CONNECT_BACKOFF,
    DeviceCodeResolver,
    DeviceError,
    PromptError,
    SigningDevice,
    UserPrompt,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
