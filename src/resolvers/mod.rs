//! Resolution strategies: human prompts, hardware-device delegation, and the
//! connectivity wait that guards submissions after a prompt.

pub mod connectivity;
pub mod device;
pub mod prompt;

pub use connectivity::{ConnectivityWaiter, DEFAULT_CONNECT_ATTEMPTS, DEFAULT_CONNECT_BACKOFF};
pub use device::{DeviceCodeResolver, DeviceError, SigningDevice};
pub use prompt::{PromptError, UserPrompt};
