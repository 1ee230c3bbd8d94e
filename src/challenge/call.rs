//! Call-object boundary.
//!
//! A call object is the backend-side handle for one in-progress authenticated
//! operation (login, transaction signing, key export…). The engine only ever
//! polls it and feeds resolution values back; how those hit the wire is the
//! implementation's business.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use super::status::{AuthMethod, StatusDocument};

/// Opaque transport-level failure raised by a call object.
///
/// The engine propagates these unchanged and never retries around them.
#[derive(Debug, Clone, Error)]
#[error("transport error: {0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Contract implemented by the wallet session's call handle.
///
/// Every method returns the backend's current status snapshot. The snapshots
/// returned by the three advancing operations are advisory: the engine polls
/// [`TwoFactorCall::status`] afresh at the top of each round, so an
/// implementation may return a stale document there without affecting the
/// resolution outcome.
///
/// The engine treats the call object as exclusively owned for the duration of
/// one resolution; implementations do not need to tolerate overlapping rounds.
#[async_trait]
pub trait TwoFactorCall: Send + Sync {
    /// Current protocol state of the call.
    async fn status(&self) -> Result<StatusDocument, TransportError>;

    /// Ask the backend to deliver a one-time code via `method`.
    async fn request_code(&self, method: &AuthMethod) -> Result<StatusDocument, TransportError>;

    /// Submit a resolution code (user-typed OTP or device-produced blob).
    async fn resolve_code(&self, code: &str) -> Result<StatusDocument, TransportError>;

    /// Trigger the backend's non-interactive "call" action (e.g. placing a
    /// voice call); no client-side input is involved.
    async fn call(&self) -> Result<StatusDocument, TransportError>;
}

// Lets hosts hand the engine a clone while keeping their own handle.
#[async_trait]
impl<T> TwoFactorCall for Arc<T>
where
    T: TwoFactorCall + ?Sized,
{
    async fn status(&self) -> Result<StatusDocument, TransportError> {
        (**self).status().await
    }

    async fn request_code(&self, method: &AuthMethod) -> Result<StatusDocument, TransportError> {
        (**self).request_code(method).await
    }

    async fn resolve_code(&self, code: &str) -> Result<StatusDocument, TransportError> {
        (**self).resolve_code(code).await
    }

    async fn call(&self) -> Result<StatusDocument, TransportError> {
        (**self).call().await
    }
}
