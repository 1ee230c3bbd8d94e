//! Hardware signer delegation.
//!
//! When a `resolve_code` document embeds a device request, the resolution
//! code is produced by an attached signing device instead of the human.
//! [`SigningDevice`] is the vendor-agnostic capability the host injects;
//! [`DeviceCodeResolver`] turns one [`DeviceRequest`] into the code string
//! the call object expects. Every operation is single-shot — retry and
//! backoff, if any, belong to the device subsystem.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use thiserror::Error;

use crate::challenge::status::{DeviceAction, DeviceRequest};
use crate::engine::ChallengeError;

/// Opaque failure raised by the device subsystem, passed through unchanged.
#[derive(Debug, Clone, Error)]
#[error("device error: {0}")]
pub struct DeviceError(pub String);

impl DeviceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Operations the engine may ask of an attached signing device.
///
/// Payloads are the backend's full request objects, forwarded untouched;
/// results are opaque strings the backend knows how to read.
#[async_trait]
pub trait SigningDevice: Send + Sync {
    async fn get_xpubs(&self, payload: &Value) -> Result<String, DeviceError>;

    async fn sign_message(&self, payload: &Value) -> Result<String, DeviceError>;

    async fn sign_transaction(&self, payload: &Value) -> Result<String, DeviceError>;

    /// Blinding nonces for balance/transaction/UTXO/subaccount queries.
    async fn get_blinding_nonces(&self, payload: &Value) -> Result<String, DeviceError>;

    /// Blinding keys for transaction construction.
    async fn get_blinding_keys(&self, payload: &Value) -> Result<String, DeviceError>;

    /// Blinding key for a single output script.
    async fn get_blinding_key(&self, script_hash: &str) -> Result<String, DeviceError>;
}

/// Dispatches device requests to the injected [`SigningDevice`].
pub struct DeviceCodeResolver {
    device: Arc<dyn SigningDevice>,
}

impl DeviceCodeResolver {
    pub fn new(device: Arc<dyn SigningDevice>) -> Self {
        Self { device }
    }

    /// Produce the resolution code for one device request.
    ///
    /// `get_receive_address` requires `address.blinding_script_hash` in the
    /// payload; its absence is a protocol failure raised before the device
    /// is contacted. Unknown actions fail the same way — skipping one
    /// silently would leave the call spinning forever.
    pub async fn resolve(&self, request: &DeviceRequest) -> Result<String, ChallengeError> {
        match request.kind() {
            DeviceAction::GetXpubs => Ok(self.device.get_xpubs(&request.to_payload()).await?),
            DeviceAction::SignMessage => {
                Ok(self.device.sign_message(&request.to_payload()).await?)
            }
            DeviceAction::SignTransaction => {
                Ok(self.device.sign_transaction(&request.to_payload()).await?)
            }
            DeviceAction::GetBlindingNonces => {
                Ok(self.device.get_blinding_nonces(&request.to_payload()).await?)
            }
            DeviceAction::GetBlindingKeys => {
                Ok(self.device.get_blinding_keys(&request.to_payload()).await?)
            }
            DeviceAction::GetReceiveAddress => {
                let script_hash = request.blinding_script_hash().ok_or_else(|| {
                    ChallengeError::Protocol(
                        "get_receive_address request is missing address.blinding_script_hash"
                            .to_string(),
                    )
                })?;
                let key = self.device.get_blinding_key(script_hash).await?;
                Ok(json!({ "blinding_key": key }).to_string())
            }
            DeviceAction::Unknown => Err(ChallengeError::Protocol(format!(
                "unknown device action '{}'",
                request.action
            ))),
        }
    }
}
