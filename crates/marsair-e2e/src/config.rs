//! Suite configuration.
//!
//! Defaults mirror the deployment the suite was written against: a
//! 60-second per-test budget, 30s navigation and 15s action timeouts,
//! failure-only artifacts, and a chromium + firefox engine matrix.

use crate::result::E2eResult;
use crate::wait::{LoadState, WaitOptions};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// MarsAir deployment the suite targets by default
pub const DEFAULT_BASE_URL: &str = "https://marsair.recruiting.thoughtworks.net/HoangPham";

/// Environment variable overriding the target deployment
pub const BASE_URL_ENV: &str = "MARSAIR_BASE_URL";

/// Browser engines the suite runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// Chromium via CDP
    Chromium,
    /// Firefox
    Firefox,
}

impl Engine {
    /// Get the engine name string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Chromium => "chromium",
            Self::Firefox => "firefox",
        }
    }
}

/// When to capture a test artifact (screenshot, video)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactPolicy {
    /// Never capture
    Off,
    /// Capture only when the test fails
    #[default]
    OnFailure,
    /// Capture for every test
    Always,
}

impl ArtifactPolicy {
    /// Whether an artifact should be kept for a test with this result
    #[must_use]
    pub const fn should_capture(&self, test_failed: bool) -> bool {
        match self {
            Self::Off => false,
            Self::OnFailure => test_failed,
            Self::Always => true,
        }
    }
}

/// Configuration for the suite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Base URL of the deployment under test
    pub base_url: String,
    /// Per-test timeout in milliseconds
    pub test_timeout_ms: u64,
    /// Navigation timeout in milliseconds
    pub navigation_timeout_ms: u64,
    /// Action (click/fill) timeout in milliseconds
    pub action_timeout_ms: u64,
    /// Screenshot capture policy
    pub screenshot: ArtifactPolicy,
    /// Video capture policy
    pub video: ArtifactPolicy,
    /// Engines to run the suite against
    pub engines: Vec<Engine>,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            test_timeout_ms: 60_000,
            navigation_timeout_ms: 30_000,
            action_timeout_ms: 15_000,
            screenshot: ArtifactPolicy::OnFailure,
            video: ArtifactPolicy::OnFailure,
            engines: vec![Engine::Chromium, Engine::Firefox],
        }
    }
}

impl SuiteConfig {
    /// Create a config with defaults, honoring the base-URL override
    /// from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.is_empty() {
                config.base_url = url;
            }
        }
        config
    }

    /// Load a config from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not parse.
    pub fn from_json(json: &str) -> E2eResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_json_file(path: impl AsRef<Path>) -> E2eResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the navigation timeout
    #[must_use]
    pub const fn with_navigation_timeout(mut self, ms: u64) -> Self {
        self.navigation_timeout_ms = ms;
        self
    }

    /// Set the action timeout
    #[must_use]
    pub const fn with_action_timeout(mut self, ms: u64) -> Self {
        self.action_timeout_ms = ms;
        self
    }

    /// Restrict the engine matrix
    #[must_use]
    pub fn with_engines(mut self, engines: Vec<Engine>) -> Self {
        self.engines = engines;
        self
    }

    /// Wait options for navigations
    #[must_use]
    pub fn navigation_wait(&self) -> WaitOptions {
        WaitOptions::new()
            .with_timeout(self.navigation_timeout_ms)
            .with_wait_until(LoadState::DomContentLoaded)
    }

    /// Wait options for element interactions and scrapes
    #[must_use]
    pub fn action_wait(&self) -> WaitOptions {
        WaitOptions::new().with_timeout(self.action_timeout_ms)
    }
}
