//! Locator abstraction for element selection and interaction.
//!
//! Selectors compile to JavaScript query expressions evaluated over
//! CDP; interaction scripts wrap the query with the DOM calls the
//! MarsAir form needs (fill, click, select-by-label) and report
//! whether the target element existed.

use std::time::Duration;

/// Default timeout for auto-waiting (5 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Default polling interval for auto-waiting (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// CSS selector (e.g., `input[name="promotional_code"]`)
    Css(String),
    /// Text content selector
    Text(String),
    /// Combined selector with text filter
    CssWithText {
        /// Base CSS selector
        css: String,
        /// Text content to match
        text: String,
    },
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create a text selector
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Convert to a JavaScript query expression yielding the element
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelector({s:?})"),
            Self::Text(t) => {
                format!("Array.from(document.querySelectorAll('*')).find(el => el.textContent.includes({t:?}))")
            }
            Self::CssWithText { css, text } => {
                format!("Array.from(document.querySelectorAll({css:?})).find(el => el.textContent.includes({text:?}))")
            }
        }
    }

    /// Convert to a query counting matches
    #[must_use]
    pub fn to_count_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelectorAll({s:?}).length"),
            Self::Text(t) => {
                format!("Array.from(document.querySelectorAll('*')).filter(el => el.textContent.includes({t:?})).length")
            }
            Self::CssWithText { css, text } => {
                format!("Array.from(document.querySelectorAll({css:?})).filter(el => el.textContent.includes({text:?})).length")
            }
        }
    }

    /// Script filling the element with `value`, returning whether it existed
    #[must_use]
    pub fn to_fill_script(&self, value: &str) -> String {
        format!(
            "(() => {{ const el = {query}; if (!el) return false; \
             el.value = {value:?}; \
             el.dispatchEvent(new Event('input', {{bubbles: true}})); \
             el.dispatchEvent(new Event('change', {{bubbles: true}})); \
             return true; }})()",
            query = self.to_query()
        )
    }

    /// Script clicking the element, returning whether it existed
    #[must_use]
    pub fn to_click_script(&self) -> String {
        format!(
            "(() => {{ const el = {query}; if (!el) return false; el.click(); return true; }})()",
            query = self.to_query()
        )
    }

    /// Script selecting the `<option>` whose label matches, returning
    /// whether both the select and the option existed
    #[must_use]
    pub fn to_select_script(&self, option_label: &str) -> String {
        format!(
            "(() => {{ const el = {query}; if (!el) return false; \
             const opt = Array.from(el.options).find(o => o.textContent.trim() === {option_label:?}); \
             if (!opt) return false; \
             el.value = opt.value; \
             el.dispatchEvent(new Event('change', {{bubbles: true}})); \
             return true; }})()",
            query = self.to_query()
        )
    }

    /// Script listing the trimmed labels of the element's options
    #[must_use]
    pub fn to_options_script(&self) -> String {
        format!(
            "(() => {{ const el = {query}; if (!el) return []; \
             return Array.from(el.options).map(o => o.textContent.trim()); }})()",
            query = self.to_query()
        )
    }

    /// Script reading the element's text content, or null when absent
    #[must_use]
    pub fn to_text_script(&self) -> String {
        format!(
            "(() => {{ const el = {query}; return el ? el.textContent : null; }})()",
            query = self.to_query()
        )
    }
}

/// Locator options for customizing behavior
#[derive(Debug, Clone)]
pub struct LocatorOptions {
    /// Timeout for auto-waiting
    pub timeout: Duration,
    /// Polling interval for auto-waiting
    pub poll_interval: Duration,
    /// Whether to require strict single-element match
    pub strict: bool,
    /// Whether the element must be visible
    pub visible: bool,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            strict: true,
            visible: true,
        }
    }
}

/// A locator for finding and interacting with elements
#[derive(Debug, Clone)]
pub struct Locator {
    selector: Selector,
    options: LocatorOptions,
}

impl Locator {
    /// Create a new locator with a CSS selector
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: Selector::Css(selector.into()),
            options: LocatorOptions::default(),
        }
    }

    /// Create a locator from a selector
    #[must_use]
    pub fn from_selector(selector: Selector) -> Self {
        Self {
            selector,
            options: LocatorOptions::default(),
        }
    }

    /// Filter by text content
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        let new_selector = match self.selector {
            Selector::Css(css) => Selector::CssWithText {
                css,
                text: text.into(),
            },
            other => other,
        };
        Self {
            selector: new_selector,
            options: self.options,
        }
    }

    /// Set a custom timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the options
    #[must_use]
    pub const fn options(&self) -> &LocatorOptions {
        &self.options
    }
}
