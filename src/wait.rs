//! Bounded polling.
//!
//! Every action and assertion in this crate re-checks the page until a condition holds or its
//! timeout elapses, because the pages under test render asynchronously relative to the input
//! that changed them.

use std::future::Future;
use std::time::{Duration, Instant};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_POLLING_INTERVAL: Duration = Duration::from_millis(100);

/// How long to keep retrying, and how often.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Timing {
    /// Total time budget.
    pub timeout: Duration,
    /// Pause between attempts.
    pub interval: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            timeout: DEFAULT_TIMEOUT,
            interval: DEFAULT_POLLING_INTERVAL,
        }
    }
}

impl Timing {
    /// The same interval with a different time budget.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Timing { timeout, ..self }
    }

    /// Retry `attempt` until it returns `Ok`, or until the timeout elapses.
    ///
    /// The attempt always runs at least once. On timeout, the error from the last attempt is
    /// returned together with the time spent.
    pub async fn until<F, FF, R, E>(&self, mut attempt: F) -> Result<R, Expired<E>>
    where
        F: FnMut() -> FF,
        FF: Future<Output = Result<R, E>>,
    {
        let start = Instant::now();

        loop {
            let last = match attempt().await {
                Ok(result) => return Ok(result),
                Err(e) => e,
            };

            let elapsed = start.elapsed();
            if elapsed >= self.timeout {
                return Err(Expired { elapsed, last });
            }

            let remaining = self.timeout - elapsed;
            tokio::time::sleep(self.interval.min(remaining)).await;
        }
    }
}

/// A poll that ran out of time.
#[derive(Debug)]
pub struct Expired<E> {
    /// Time spent polling.
    pub elapsed: Duration,
    /// What the final attempt reported.
    pub last: E,
}
