//! Bounded connectivity wait.
//!
//! A human interaction can last arbitrarily long, and the signing device may
//! drop off the transport in the meantime. Before submitting anything that
//! will be followed by a device round trip, the engine polls a connectivity
//! predicate with a fixed-count, fixed-interval retry. The policy is
//! deliberately not adaptive: a predictable 5 × 3 s window beats chasing
//! transient reconnects.

use std::time::Duration;

use tokio::time::sleep;

use crate::engine::ChallengeError;

/// Default number of predicate checks per wait.
pub const DEFAULT_CONNECT_ATTEMPTS: u32 = 5;

/// Default pause between failed checks.
pub const DEFAULT_CONNECT_BACKOFF: Duration = Duration::from_secs(3);

/// Fixed-policy retry on a connectivity predicate.
///
/// The attempt counter lives inside one [`ConnectivityWaiter::wait`] call and
/// is discarded on completion; waits never influence each other.
#[derive(Debug, Clone)]
pub struct ConnectivityWaiter {
    attempts: u32,
    backoff: Duration,
}

impl ConnectivityWaiter {
    pub fn new(attempts: u32, backoff: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            backoff,
        }
    }

    /// Block (cooperatively) until `connected` returns true.
    ///
    /// The predicate is evaluated once per attempt; a false result sleeps
    /// the backoff before the next try. After the final failed attempt the
    /// wait gives up with [`ChallengeError::Timeout`].
    pub async fn wait<F>(&self, connected: &F) -> Result<(), ChallengeError>
    where
        F: Fn() -> bool + Send + Sync,
    {
        for attempt in 1..=self.attempts {
            if connected() {
                return Ok(());
            }
            if attempt == self.attempts {
                break;
            }
            log::warn!(
                "connectivity check failed (attempt {attempt}/{}), retrying in {:?}",
                self.attempts,
                self.backoff
            );
            sleep(self.backoff).await;
        }
        Err(ChallengeError::Timeout {
            attempts: self.attempts,
        })
    }
}

impl Default for ConnectivityWaiter {
    fn default() -> Self {
        Self::new(DEFAULT_CONNECT_ATTEMPTS, DEFAULT_CONNECT_BACKOFF)
    }
}
