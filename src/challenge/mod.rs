//! Protocol layer: wire types, the call-object boundary, and the pure
//! status interpreter.

pub mod call;
pub mod interpreter;
pub mod status;

pub use call::{TransportError, TwoFactorCall};
pub use interpreter::{ResolutionStep, interpret};
pub use status::{AuthMethod, DeviceAction, DeviceRequest, Status, StatusDocument};
