//! Wait mechanisms for page synchronization.
//!
//! The results page renders its message after navigation settles, so
//! scrapes poll under a deadline instead of sleeping a fixed interval.

use std::time::Duration;

/// Default timeout for wait operations (30 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 30_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Page load states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadState {
    /// Wait for the `load` event to fire
    Load,
    /// Wait for `DOMContentLoaded`
    DomContentLoaded,
    /// Wait for network to be idle
    NetworkIdle,
}

impl LoadState {
    /// Get the event name for this load state
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::DomContentLoaded => "DOMContentLoaded",
            Self::NetworkIdle => "networkidle",
        }
    }

    /// Document ready states that satisfy this load state
    #[must_use]
    pub const fn ready_states(&self) -> &'static [&'static str] {
        match self {
            Self::DomContentLoaded => &["interactive", "complete"],
            Self::Load | Self::NetworkIdle => &["complete"],
        }
    }
}

impl Default for LoadState {
    fn default() -> Self {
        Self::Load
    }
}

impl std::fmt::Display for LoadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.event_name())
    }
}

/// Options for wait operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
    /// State to wait for (for navigation)
    pub wait_until: LoadState,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            wait_until: LoadState::Load,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Set load state to wait for
    #[must_use]
    pub const fn with_wait_until(mut self, state: LoadState) -> Self {
        self.wait_until = state;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Poll an async probe until it yields a value or the deadline passes.
///
/// # Errors
///
/// Returns [`E2eError::Timeout`](crate::E2eError::Timeout) when the
/// probe never yields within `options.timeout_ms`; probe errors
/// propagate immediately.
#[cfg(feature = "browser")]
pub async fn poll_until<T, F, Fut>(
    options: &WaitOptions,
    mut probe: F,
) -> crate::result::E2eResult<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = crate::result::E2eResult<Option<T>>>,
{
    let deadline = std::time::Instant::now() + options.timeout();
    loop {
        if let Some(value) = probe().await? {
            return Ok(value);
        }
        if std::time::Instant::now() >= deadline {
            return Err(crate::result::E2eError::Timeout {
                ms: options.timeout_ms,
            });
        }
        tokio::time::sleep(options.poll_interval()).await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod load_state_tests {
        use super::*;

        #[test]
        fn test_event_names() {
            assert_eq!(LoadState::Load.event_name(), "load");
            assert_eq!(LoadState::DomContentLoaded.event_name(), "DOMContentLoaded");
            assert_eq!(LoadState::NetworkIdle.event_name(), "networkidle");
        }

        #[test]
        fn test_ready_states() {
            assert!(LoadState::DomContentLoaded
                .ready_states()
                .contains(&"interactive"));
            assert_eq!(LoadState::Load.ready_states(), &["complete"]);
        }

        #[test]
        fn test_default_is_load() {
            assert_eq!(LoadState::default(), LoadState::Load);
        }
    }

    mod wait_options_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let options = WaitOptions::new();
            assert_eq!(options.timeout_ms, DEFAULT_WAIT_TIMEOUT_MS);
            assert_eq!(options.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
            assert_eq!(options.wait_until, LoadState::Load);
        }

        #[test]
        fn test_builders() {
            let options = WaitOptions::new()
                .with_timeout(1_000)
                .with_poll_interval(10)
                .with_wait_until(LoadState::NetworkIdle);
            assert_eq!(options.timeout(), Duration::from_millis(1_000));
            assert_eq!(options.poll_interval(), Duration::from_millis(10));
            assert_eq!(options.wait_until, LoadState::NetworkIdle);
        }
    }

    #[cfg(feature = "browser")]
    mod poll_tests {
        use super::*;
        use std::sync::atomic::{AtomicU32, Ordering};

        #[tokio::test]
        async fn test_poll_until_yields() {
            let attempts = AtomicU32::new(0);
            let options = WaitOptions::new().with_timeout(1_000).with_poll_interval(1);
            let value = poll_until(&options, || {
                let attempts = &attempts;
                async move {
                    let n = attempts.fetch_add(1, Ordering::SeqCst);
                    Ok(if n >= 3 { Some(n) } else { None })
                }
            })
            .await
            .unwrap();
            assert_eq!(value, 3);
        }

        #[tokio::test]
        async fn test_poll_until_times_out() {
            let options = WaitOptions::new().with_timeout(20).with_poll_interval(5);
            let result: crate::result::E2eResult<u32> =
                poll_until(&options, || async { Ok(None) }).await;
            assert!(matches!(
                result,
                Err(crate::result::E2eError::Timeout { ms: 20 })
            ));
        }
    }
}
