//! Property tests for the backoff schedule.

use std::time::Duration;

use breakwater::RetryPolicy;
use proptest::prelude::*;

proptest! {
    /// The delay after failed attempt `i` is `base * 2^i`, for every attempt
    /// inside the budget.
    #[test]
    fn schedule_doubles_each_step(base in 1u64..500, max_attempts in 2u32..10) {
        let policy = RetryPolicy::new(max_attempts, Duration::from_millis(base));

        for attempt in 0..max_attempts - 1 {
            let delay = policy.backoff_after(attempt).expect("inside the budget");
            prop_assert_eq!(delay.as_millis() as u64, base << attempt);
        }
    }

    /// `backoff_after` is `None` exactly from the final attempt onward.
    #[test]
    fn budget_exhaustion_is_exact(max_attempts in 1u32..10, beyond in 0u32..5) {
        let policy = RetryPolicy::new(max_attempts, Duration::from_millis(10));

        prop_assert!(policy.backoff_after(max_attempts - 1 + beyond).is_none());
        if max_attempts >= 2 {
            prop_assert!(policy.backoff_after(max_attempts - 2).is_some());
        }
    }

    /// The schedule never shrinks between consecutive attempts.
    #[test]
    fn schedule_is_monotonic(base in 0u64..1000, max_attempts in 3u32..12) {
        let policy = RetryPolicy::new(max_attempts, Duration::from_millis(base));

        let mut previous = Duration::ZERO;
        for attempt in 0..max_attempts - 1 {
            let delay = policy.backoff_after(attempt).expect("inside the budget");
            prop_assert!(delay >= previous);
            previous = delay;
        }
    }
}
