//! Error type for exhausted retry budgets.

/// Terminal error raised once a retry wrapper's attempt budget is consumed.
///
/// Carries the total number of attempts made and the error from the final
/// attempt. The underlying failure is not swallowed: it is available through
/// [`last_error`](RetryExhausted::last_error) / `source()`, and its message
/// is embedded in this error's `Display` output.
///
/// Intermediate failures from earlier attempts are discarded - the caller
/// sees a single terminal error, not a list.
///
/// # Examples
///
/// ```rust
/// use breakwater::prelude::*;
/// use std::time::Duration;
///
/// # tokio_test::block_on(async {
/// let doomed = from_fn(|_: &()| Err::<u32, _>("connection refused".to_string()))
///     .retry(RetryPolicy::new(3, Duration::ZERO));
///
/// let err = doomed.call(&()).await.unwrap_err();
/// assert_eq!(err.attempts, 3);
/// assert_eq!(err.last_error, "connection refused");
/// assert!(err.to_string().contains("3 attempts"));
/// assert!(err.to_string().contains("connection refused"));
/// # });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryExhausted<E> {
    /// Total number of attempts made.
    pub attempts: u32,
    /// The error from the final attempt.
    pub last_error: E,
}

impl<E> RetryExhausted<E> {
    /// Create a new exhaustion error.
    pub fn new(last_error: E, attempts: u32) -> Self {
        Self {
            attempts,
            last_error,
        }
    }

    /// Extract the final underlying error, discarding the attempt count.
    pub fn into_inner(self) -> E {
        self.last_error
    }

    /// Borrow the final underlying error.
    pub fn last_error(&self) -> &E {
        &self.last_error
    }
}

impl<E: std::fmt::Display> std::fmt::Display for RetryExhausted<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "retry budget exhausted after {} attempts: {}",
            self.attempts, self.last_error
        )
    }
}

impl<E: std::error::Error + 'static> std::error::Error for RetryExhausted<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.last_error)
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Refused;

    impl std::fmt::Display for Refused {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "connection refused")
        }
    }

    impl std::error::Error for Refused {}

    #[test]
    fn display_mentions_attempts_and_embeds_the_message() {
        let err = RetryExhausted::new("connection refused", 3);

        let display = err.to_string();
        assert!(display.contains("3 attempts"));
        assert!(display.contains("connection refused"));
    }

    #[test]
    fn source_chains_to_the_underlying_error() {
        use std::error::Error as _;

        let err = RetryExhausted::new(Refused, 2);

        let source = err.source().expect("source present");
        assert_eq!(source.to_string(), "connection refused");
    }

    #[test]
    fn into_inner_recovers_the_final_error() {
        let err = RetryExhausted::new("boom".to_string(), 5);

        assert_eq!(err.into_inner(), "boom");
    }
}
