//! Wire-level types for the two-factor handshake.
//!
//! Every poll of a call object yields one [`StatusDocument`] — an immutable
//! snapshot of the backend's protocol state. The document is interpreted,
//! acted on, and discarded; nothing in this module mutates state.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Protocol state reported by the backend for an in-progress call.
///
/// Unrecognised tokens decode as [`Status::Other`] with the raw string
/// preserved so the interpreter can report exactly what the backend sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Done,
    Error,
    Call,
    RequestCode,
    ResolveCode,
    Other(String),
}

impl From<String> for Status {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "done" => Status::Done,
            "error" => Status::Error,
            "call" => Status::Call,
            "request_code" => Status::RequestCode,
            "resolve_code" => Status::ResolveCode,
            _ => Status::Other(raw),
        }
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        match status {
            Status::Done => "done".into(),
            Status::Error => "error".into(),
            Status::Call => "call".into(),
            Status::RequestCode => "request_code".into(),
            Status::ResolveCode => "resolve_code".into(),
            Status::Other(raw) => raw,
        }
    }
}

/// Authentication method offered by the backend for code delivery.
///
/// Wire identifiers follow the backend (`email`, `phone`, `sms`, `gauth`).
/// Identifiers this client does not know round-trip verbatim through
/// [`AuthMethod::Other`] so they can still be selected and submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AuthMethod {
    Email,
    Phone,
    Sms,
    AuthenticatorApp,
    Other(String),
}

impl AuthMethod {
    /// Wire identifier submitted back to the backend.
    pub fn id(&self) -> &str {
        match self {
            AuthMethod::Email => "email",
            AuthMethod::Phone => "phone",
            AuthMethod::Sms => "sms",
            AuthMethod::AuthenticatorApp => "gauth",
            AuthMethod::Other(id) => id,
        }
    }

    /// Human-facing label for prompts. Unknown methods share the
    /// authenticator-app label rather than getting per-id treatment.
    pub fn label(&self) -> &'static str {
        match self {
            AuthMethod::Email => "Email",
            AuthMethod::Phone => "Phone call",
            AuthMethod::Sms => "SMS",
            AuthMethod::AuthenticatorApp | AuthMethod::Other(_) => "Authenticator app",
        }
    }
}

impl From<String> for AuthMethod {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "email" => AuthMethod::Email,
            "phone" => AuthMethod::Phone,
            "sms" => AuthMethod::Sms,
            "gauth" => AuthMethod::AuthenticatorApp,
            _ => AuthMethod::Other(raw),
        }
    }
}

impl From<AuthMethod> for String {
    fn from(method: AuthMethod) -> Self {
        method.id().to_string()
    }
}

/// Classification of a device request's `action` field.
///
/// Several backend query actions share one device operation (blinding
/// nonces); the mapping lives here so the resolver can stay a plain match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceAction {
    GetXpubs,
    SignMessage,
    SignTransaction,
    GetBlindingNonces,
    GetBlindingKeys,
    GetReceiveAddress,
    Unknown,
}

impl DeviceAction {
    pub fn classify(action: &str) -> Self {
        match action {
            "get_xpubs" => DeviceAction::GetXpubs,
            "sign_message" => DeviceAction::SignMessage,
            "sign_tx" => DeviceAction::SignTransaction,
            "get_balance" | "get_transactions" | "get_unspent_outputs" | "get_subaccounts"
            | "get_subaccount" | "get_expired_deposits" => DeviceAction::GetBlindingNonces,
            "create_transaction" => DeviceAction::GetBlindingKeys,
            "get_receive_address" => DeviceAction::GetReceiveAddress,
            _ => DeviceAction::Unknown,
        }
    }
}

/// Structured payload embedded in a `resolve_code` document when the
/// resolution is delegated to an attached signing device.
///
/// The raw `action` string and all remaining fields are kept as-is; the
/// device subsystem receives the full payload untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceRequest {
    pub action: String,
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl DeviceRequest {
    pub fn kind(&self) -> DeviceAction {
        DeviceAction::classify(&self.action)
    }

    /// Rebuild the complete request object as the backend produced it.
    pub fn to_payload(&self) -> Value {
        let mut map = self.params.clone();
        map.insert("action".to_string(), Value::String(self.action.clone()));
        Value::Object(map)
    }

    /// `address.blinding_script_hash`, required by the receive-address action.
    pub fn blinding_script_hash(&self) -> Option<&str> {
        self.params
            .get("address")?
            .get("blinding_script_hash")?
            .as_str()
    }
}

/// One immutable snapshot of a call's protocol state.
///
/// Which optional fields are populated depends on `status`: `error` only on
/// `Error`, `methods` only on `RequestCode`, and exactly one of `method` /
/// `required_data` on `ResolveCode`. Absent fields stay `None`; an empty
/// string in the wire document is not the same as absence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusDocument {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub methods: Option<Vec<AuthMethod>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<AuthMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_data: Option<DeviceRequest>,
}

impl StatusDocument {
    /// Terminal-success document, handy for fakes and defaults.
    pub fn done() -> Self {
        Self {
            status: Status::Done,
            error: None,
            methods: None,
            method: None,
            required_data: None,
        }
    }
}
