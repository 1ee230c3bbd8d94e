//! Status interpretation.
//!
//! Pure decision layer: one [`StatusDocument`] in, one [`ResolutionStep`]
//! out, no side effects. The engine executes whatever step comes back, so
//! everything the protocol state machine *decides* is testable right here
//! without fakes.

use crate::engine::ChallengeError;

use super::status::{AuthMethod, DeviceRequest, Status, StatusDocument};

/// Side effect a status document demands before the next poll.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionStep {
    /// Terminal success; return the document to the caller.
    Finished,
    /// Terminal failure with the backend's error message.
    Fail(String),
    /// Invoke the call object's non-interactive "call" action.
    PlaceCall,
    /// Exactly one method on offer: request its code directly, no prompt.
    RequestCode(AuthMethod),
    /// Several methods on offer: ask the user to choose, then request.
    ChooseMethod(Vec<AuthMethod>),
    /// Delegate the embedded request to the attached signing device.
    ResolveWithDevice(DeviceRequest),
    /// Ask the user to type the code delivered via `method`.
    PromptCode(AuthMethod),
}

/// Map a status document to the step it requires.
///
/// Malformed documents fail with [`ChallengeError::Protocol`], and so do
/// unrecognised statuses: treating an unknown protocol state as already
/// resolved would hide backend changes, so this match refuses instead of
/// defaulting.
pub fn interpret(document: &StatusDocument) -> Result<ResolutionStep, ChallengeError> {
    match &document.status {
        Status::Done => Ok(ResolutionStep::Finished),
        Status::Error => Ok(ResolutionStep::Fail(
            document.error.clone().unwrap_or_default(),
        )),
        Status::Call => Ok(ResolutionStep::PlaceCall),
        Status::RequestCode => match document.methods.as_deref() {
            None | Some([]) => Err(ChallengeError::Protocol(
                "request_code document carries no methods".to_string(),
            )),
            Some([only]) => Ok(ResolutionStep::RequestCode(only.clone())),
            Some(methods) => Ok(ResolutionStep::ChooseMethod(methods.to_vec())),
        },
        Status::ResolveCode => {
            if let Some(request) = &document.required_data {
                Ok(ResolutionStep::ResolveWithDevice(request.clone()))
            } else if let Some(method) = &document.method {
                Ok(ResolutionStep::PromptCode(method.clone()))
            } else {
                Err(ChallengeError::Protocol(
                    "resolve_code document carries neither method nor required_data".to_string(),
                ))
            }
        }
        Status::Other(raw) => Err(ChallengeError::Protocol(format!(
            "unrecognised status '{raw}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> StatusDocument {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn done_is_terminal() {
        assert_eq!(
            interpret(&doc(json!({ "status": "done" }))).unwrap(),
            ResolutionStep::Finished
        );
    }

    #[test]
    fn error_carries_backend_message() {
        let step = interpret(&doc(json!({
            "status": "error",
            "error": "http request failure"
        })))
        .unwrap();
        assert_eq!(step, ResolutionStep::Fail("http request failure".to_string()));

        // A missing message still fails the challenge, just with nothing to show.
        let step = interpret(&doc(json!({ "status": "error" }))).unwrap();
        assert_eq!(step, ResolutionStep::Fail(String::new()));
    }

    #[test]
    fn single_method_skips_the_chooser() {
        let step = interpret(&doc(json!({
            "status": "request_code",
            "methods": ["sms"]
        })))
        .unwrap();
        assert_eq!(step, ResolutionStep::RequestCode(AuthMethod::Sms));
    }

    #[test]
    fn multiple_methods_require_a_choice() {
        let step = interpret(&doc(json!({
            "status": "request_code",
            "methods": ["sms", "email"]
        })))
        .unwrap();
        assert_eq!(
            step,
            ResolutionStep::ChooseMethod(vec![AuthMethod::Sms, AuthMethod::Email])
        );
    }

    #[test]
    fn request_code_without_methods_is_malformed() {
        for value in [
            json!({ "status": "request_code" }),
            json!({ "status": "request_code", "methods": [] }),
        ] {
            assert!(matches!(
                interpret(&doc(value)),
                Err(ChallengeError::Protocol(_))
            ));
        }
    }

    #[test]
    fn resolve_code_prefers_the_device_request() {
        let step = interpret(&doc(json!({
            "status": "resolve_code",
            "method": "sms",
            "required_data": { "action": "get_xpubs" }
        })))
        .unwrap();
        assert!(matches!(step, ResolutionStep::ResolveWithDevice(_)));
    }

    #[test]
    fn resolve_code_without_device_prompts_the_user() {
        let step = interpret(&doc(json!({
            "status": "resolve_code",
            "method": "gauth"
        })))
        .unwrap();
        assert_eq!(step, ResolutionStep::PromptCode(AuthMethod::AuthenticatorApp));
    }

    #[test]
    fn bare_resolve_code_is_malformed() {
        assert!(matches!(
            interpret(&doc(json!({ "status": "resolve_code" }))),
            Err(ChallengeError::Protocol(_))
        ));
    }

    #[test]
    fn unknown_status_fails_loudly() {
        let err = interpret(&doc(json!({ "status": "re_login" }))).unwrap_err();
        match err {
            ChallengeError::Protocol(message) => assert!(message.contains("re_login")),
            other => panic!("expected protocol error, got {other:?}"),
        }
    }
}
