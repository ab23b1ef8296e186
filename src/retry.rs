/*!
 * Retry policy with configurable backoff for provider calls.
 *
 * The policy is a value object wrapped around an async operation by
 * [`retry_with_backoff`], rather than retry logic baked into each client.
 * Only errors classified transient are retried; everything else propagates
 * on the first attempt.
 */

use std::future::Future;
use std::time::Duration;

use log::warn;

use crate::errors::{AppError, ProviderError, TranslationError};

/// Hard upper bound on the configurable retry count.
pub const MAX_RETRY_CAP: u32 = 10;

/// How the delay grows between attempts
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backoff {
    /// Same delay before every retry
    Constant,
    /// Delay multiplied by `base` raised to the attempt number
    Exponential {
        /// Growth factor per attempt, e.g. 2.0 for doubling
        base: f64,
    },
}

/// Retry policy for transient provider failures.
#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    /// Delay before the first retry
    initial_delay: Duration,
    /// Delay growth mode
    backoff: Backoff,
    /// Whether to multiply each delay by a random factor in `[1.0, 2.0)`
    jitter: bool,
    /// Maximum number of retries after the initial attempt
    max_retries: u32,
}

impl BackoffPolicy {
    /// Create a policy with exponentially growing delays.
    ///
    /// Fails immediately when `max_retries` exceeds [`MAX_RETRY_CAP`]; an
    /// over-eager retry count is a configuration error, not something to
    /// discover mid-document.
    pub fn exponential(
        initial_delay: Duration,
        base: f64,
        jitter: bool,
        max_retries: u32,
    ) -> Result<Self, AppError> {
        Self::validated(initial_delay, Backoff::Exponential { base }, jitter, max_retries)
    }

    /// Create a policy with a constant delay between attempts.
    pub fn constant(delay: Duration, jitter: bool, max_retries: u32) -> Result<Self, AppError> {
        Self::validated(delay, Backoff::Constant, jitter, max_retries)
    }

    fn validated(
        initial_delay: Duration,
        backoff: Backoff,
        jitter: bool,
        max_retries: u32,
    ) -> Result<Self, AppError> {
        if max_retries > MAX_RETRY_CAP {
            return Err(AppError::Config(format!(
                "max_retries must be at most {MAX_RETRY_CAP}, got {max_retries}"
            )));
        }
        Ok(BackoffPolicy {
            initial_delay,
            backoff,
            jitter,
            max_retries,
        })
    }

    /// Configured retry cap - used by tests and library consumers
    #[allow(dead_code)]
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Delay before retry number `attempt` (1-based).
    ///
    /// With jitter enabled the base delay is multiplied by a uniform random
    /// factor in `[1.0, 2.0)`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let base_secs = self.initial_delay.as_secs_f64();
        let grown = match self.backoff {
            Backoff::Constant => base_secs,
            Backoff::Exponential { base } => base_secs * base.powi(attempt as i32),
        };
        let factor = if self.jitter {
            1.0 + rand::random::<f64>()
        } else {
            1.0
        };
        Duration::from_secs_f64(grown * factor)
    }
}

/// Run `operation`, retrying transient provider errors per `policy`.
///
/// Non-transient errors return immediately with no sleep. When the retry cap
/// is exceeded the result is [`TranslationError::RetriesExhausted`] carrying
/// the error from the final attempt, distinguishable from the transient
/// error itself.
pub async fn retry_with_backoff<F, Fut, T>(
    policy: &BackoffPolicy,
    mut operation: F,
) -> Result<T, TranslationError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if !error.is_transient() => {
                return Err(TranslationError::Provider(error));
            }
            Err(error) => {
                attempt += 1;
                if attempt > policy.max_retries {
                    return Err(TranslationError::RetriesExhausted {
                        max_retries: policy.max_retries,
                        last_error: error,
                    });
                }

                let delay = policy.delay_for(attempt);
                warn!(
                    "Transient provider error: {}. Retry {}/{} in {:.2}s",
                    error,
                    attempt,
                    policy.max_retries,
                    delay.as_secs_f64()
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
