//! Cache policy configuration.

use std::time::Duration;

/// Configuration for a cache wrapper.
///
/// Like [`RetryPolicy`](crate::retry::RetryPolicy), this is pure data,
/// immutable once a [`Cached`](crate::cache::Cached) wrapper is constructed
/// around it. The single knob is the freshness window: a stored value older
/// than `ttl` is stale and will be refreshed on the next invocation.
///
/// # Examples
///
/// ```rust
/// use breakwater::CachePolicy;
/// use std::time::Duration;
///
/// let policy = CachePolicy::new(Duration::from_secs(30));
/// assert_eq!(policy.ttl(), Duration::from_secs(30));
///
/// // The default window is five seconds.
/// assert_eq!(CachePolicy::default().ttl(), Duration::from_millis(5000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CachePolicy {
    ttl: Duration,
}

impl CachePolicy {
    /// Create a policy with the given freshness window.
    ///
    /// A zero `ttl` forces a refresh on every call - the wrapper still runs,
    /// but no stored value is ever considered fresh.
    pub const fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    /// Set the freshness window.
    pub const fn with_ttl(self, ttl: Duration) -> Self {
        Self { ttl }
    }

    /// The freshness window.
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl Default for CachePolicy {
    /// A five-second freshness window.
    fn default() -> Self {
        Self::new(Duration::from_millis(5000))
    }
}

#[cfg(test)]
mod policy_tests {
    use super::*;

    #[test]
    fn defaults_match_documentation() {
        assert_eq!(CachePolicy::default().ttl(), Duration::from_millis(5000));
    }

    #[test]
    fn builder_replaces_the_window() {
        let policy = CachePolicy::default().with_ttl(Duration::from_millis(250));

        assert_eq!(policy.ttl(), Duration::from_millis(250));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn policy_round_trips_through_json() {
        let policy = CachePolicy::new(Duration::from_secs(9));

        let json = serde_json::to_string(&policy).unwrap();
        let back: CachePolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, policy);
    }
}
