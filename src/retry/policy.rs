//! Retry policy configuration.

use std::time::Duration;

/// Configuration for a retry wrapper.
///
/// Policies are pure data - they describe the attempt budget and the backoff
/// schedule but don't execute anything, which keeps them trivial to test,
/// clone, and (with the `serde` feature) load from configuration.
///
/// A policy is immutable once a [`Retry`](crate::retry::Retry) wrapper is
/// constructed around it.
///
/// # Schedule
///
/// After failed attempt `i` (0-indexed) the wrapper sleeps
/// `base_delay * 2^i`, so the defaults (3 attempts, 300ms) give delays of
/// 300ms and 600ms. Growth is uncapped: callers choosing a large attempt
/// budget accept a proportionally large worst-case latency. The arithmetic
/// saturates rather than overflowing at the extreme.
///
/// # Examples
///
/// ```rust
/// use breakwater::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new(3, Duration::from_millis(300));
///
/// // Backoff after the first and second failed attempts...
/// assert_eq!(policy.backoff_after(0), Some(Duration::from_millis(300)));
/// assert_eq!(policy.backoff_after(1), Some(Duration::from_millis(600)));
/// // ...and none after the third: the budget is spent.
/// assert_eq!(policy.backoff_after(2), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    /// Create a policy making up to `max_attempts` total attempts (the
    /// initial attempt included), sleeping `base_delay * 2^i` after failed
    /// attempt `i`.
    ///
    /// A `max_attempts` of zero is clamped to one: every invocation makes at
    /// least the initial attempt.
    pub const fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: if max_attempts == 0 { 1 } else { max_attempts },
            base_delay,
        }
    }

    /// Set the total attempt budget (clamped to at least one).
    ///
    /// With `max_attempts = 1` the wrapper performs no retries - a single
    /// attempt, wrapped as exhausted on failure.
    pub const fn with_max_attempts(self, max_attempts: u32) -> Self {
        Self::new(max_attempts, self.base_delay)
    }

    /// Set the base delay.
    ///
    /// A zero base collapses the backoff to immediate retries.
    pub const fn with_base_delay(self, base_delay: Duration) -> Self {
        Self {
            max_attempts: self.max_attempts,
            base_delay,
        }
    }

    /// The total attempt budget.
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// The backoff base delay.
    pub const fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// The delay to sleep after failed attempt `attempt` (0-indexed), or
    /// `None` if the budget is spent and the failure is terminal.
    ///
    /// This is the single source of truth for both the loop bound and the
    /// schedule: `Some` exactly when `attempt + 1 < max_attempts`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use breakwater::RetryPolicy;
    /// use std::time::Duration;
    ///
    /// let policy = RetryPolicy::new(5, Duration::from_millis(100));
    ///
    /// // Delay doubles per failed attempt: 100ms, 200ms, 400ms, 800ms.
    /// assert_eq!(policy.backoff_after(2), Some(Duration::from_millis(400)));
    /// assert_eq!(policy.backoff_after(4), None);
    /// ```
    pub fn backoff_after(&self, attempt: u32) -> Option<Duration> {
        if attempt.saturating_add(1) >= self.max_attempts {
            return None;
        }
        Some(self.base_delay.saturating_mul(2u32.saturating_pow(attempt)))
    }
}

impl Default for RetryPolicy {
    /// Three attempts, 300ms base delay.
    fn default() -> Self {
        Self::new(3, Duration::from_millis(300))
    }
}
