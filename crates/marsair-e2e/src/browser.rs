//! Browser control for headless testing.
//!
//! When compiled with the `browser` feature this wraps real Chromium
//! via the Chrome DevTools Protocol (chromiumoxide). Without the
//! feature it provides a mock implementation so the page-object and
//! scraping layers unit-test with no browser installed.

use crate::result::E2eResult;

/// Environment variable naming the chromium executable to launch
pub const CHROMIUM_PATH_ENV: &str = "CHROMIUM_PATH";

/// Browser configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// User agent string
    pub user_agent: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            chromium_path: None,
            user_agent: None,
            sandbox: true,
        }
    }
}

impl BrowserConfig {
    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Set user agent
    #[must_use]
    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }

    /// Chromium executable to launch: the configured path, falling
    /// back to the `CHROMIUM_PATH` environment variable. `None` means
    /// auto-detect.
    #[must_use]
    pub fn resolve_executable(&self) -> Option<String> {
        self.chromium_path.clone().or_else(|| {
            std::env::var(CHROMIUM_PATH_ENV)
                .ok()
                .filter(|path| !path.is_empty())
        })
    }
}

// ============================================================================
// Real CDP Implementation (when `browser` feature is enabled)
// ============================================================================

#[cfg(feature = "browser")]
mod cdp {
    use super::{BrowserConfig, E2eResult};
    use crate::locator::Selector;
    use crate::result::E2eError;
    use crate::wait::WaitOptions;
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use std::sync::Arc;
    use tokio::sync::Mutex;
    use tracing::{debug, info};

    /// Browser instance with real CDP connection
    #[derive(Debug)]
    pub struct Browser {
        config: BrowserConfig,
        inner: Arc<Mutex<CdpBrowser>>,
        #[allow(dead_code)]
        handle: tokio::task::JoinHandle<()>,
    }

    impl Browser {
        /// Launch a new browser instance.
        ///
        /// # Errors
        ///
        /// Returns error if the browser cannot be launched.
        pub async fn launch(config: BrowserConfig) -> E2eResult<Self> {
            let mut builder = CdpConfig::builder();

            if !config.headless {
                builder = builder.with_head();
            }

            if !config.sandbox {
                builder = builder.no_sandbox();
            }

            if let Some(path) = config.resolve_executable() {
                builder = builder.chrome_executable(path);
            }

            builder = builder.window_size(config.viewport_width, config.viewport_height);

            // Executable auto-detection happens inside build().
            let cdp_config = builder.build().map_err(|message| {
                if message.contains("auto detect") {
                    E2eError::BrowserNotFound
                } else {
                    E2eError::BrowserLaunch { message }
                }
            })?;

            let (browser, mut handler) =
                CdpBrowser::launch(cdp_config)
                    .await
                    .map_err(|e| E2eError::BrowserLaunch {
                        message: e.to_string(),
                    })?;

            // Spawn handler task
            let handle = tokio::spawn(async move {
                while let Some(h) = handler.next().await {
                    if h.is_err() {
                        break;
                    }
                }
            });

            info!(headless = config.headless, "browser launched");
            Ok(Self {
                config,
                inner: Arc::new(Mutex::new(browser)),
                handle,
            })
        }

        /// Create a new page.
        ///
        /// # Errors
        ///
        /// Returns error if the page cannot be created.
        pub async fn new_page(&self) -> E2eResult<Page> {
            let browser = self.inner.lock().await;
            let cdp_page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| E2eError::Page {
                    message: e.to_string(),
                })?;

            Ok(Page {
                url: String::from("about:blank"),
                inner: Some(Arc::new(Mutex::new(cdp_page))),
            })
        }

        /// Get the browser configuration
        #[must_use]
        pub const fn config(&self) -> &BrowserConfig {
            &self.config
        }

        /// Close the browser.
        ///
        /// # Errors
        ///
        /// Returns error if shutdown fails.
        pub async fn close(self) -> E2eResult<()> {
            let mut browser = self.inner.lock().await;
            browser.close().await.map_err(|e| E2eError::BrowserLaunch {
                message: e.to_string(),
            })?;
            Ok(())
        }
    }

    /// A browser page with real CDP connection
    #[derive(Debug)]
    pub struct Page {
        /// Current URL
        url: String,
        /// CDP page handle (None for detached pages in tests)
        inner: Option<Arc<Mutex<CdpPage>>>,
    }

    impl Page {
        /// Create a detached page with no CDP connection, for tests
        #[must_use]
        pub fn detached() -> Self {
            Self {
                url: String::from("about:blank"),
                inner: None,
            }
        }

        /// Navigate to a URL.
        ///
        /// # Errors
        ///
        /// Returns error if navigation fails.
        pub async fn goto(&mut self, url: &str) -> E2eResult<()> {
            if let Some(ref inner) = self.inner {
                let page = inner.lock().await;
                page.goto(url).await.map_err(|e| E2eError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
            }
            debug!(url, "navigated");
            self.url = url.to_string();
            Ok(())
        }

        /// Evaluate a JavaScript expression.
        ///
        /// # Errors
        ///
        /// Returns error if evaluation fails or no browser is attached.
        pub async fn eval<T: serde::de::DeserializeOwned>(&self, expr: &str) -> E2eResult<T> {
            if let Some(ref inner) = self.inner {
                let page = inner.lock().await;
                let result = page.evaluate(expr).await.map_err(|e| E2eError::Evaluation {
                    message: e.to_string(),
                })?;
                result.into_value().map_err(|e| E2eError::Evaluation {
                    message: e.to_string(),
                })
            } else {
                Err(E2eError::Evaluation {
                    message: "No browser connection".to_string(),
                })
            }
        }

        /// Fill a form field and fire input/change events.
        ///
        /// # Errors
        ///
        /// Returns [`E2eError::Input`] if the element is missing.
        pub async fn fill(&self, selector: &Selector, value: &str) -> E2eResult<()> {
            self.interact(&selector.to_fill_script(value), selector)
                .await
        }

        /// Click an element.
        ///
        /// # Errors
        ///
        /// Returns [`E2eError::Input`] if the element is missing.
        pub async fn click(&self, selector: &Selector) -> E2eResult<()> {
            self.interact(&selector.to_click_script(), selector).await
        }

        /// Select the option with the given label in a `<select>`.
        ///
        /// # Errors
        ///
        /// Returns [`E2eError::Input`] if the select or option is missing.
        pub async fn select_option(&self, selector: &Selector, label: &str) -> E2eResult<()> {
            self.interact(&selector.to_select_script(label), selector)
                .await
        }

        async fn interact(&self, script: &str, selector: &Selector) -> E2eResult<()> {
            if self.inner.is_none() {
                return Ok(());
            }
            let found: bool = self.eval(script).await?;
            if found {
                Ok(())
            } else {
                Err(E2eError::Input {
                    message: format!("element not found for {}", selector.to_query()),
                })
            }
        }

        /// List the trimmed option labels of a `<select>`.
        ///
        /// # Errors
        ///
        /// Returns error if evaluation fails.
        pub async fn option_labels(&self, selector: &Selector) -> E2eResult<Vec<String>> {
            if self.inner.is_none() {
                return Ok(Vec::new());
            }
            self.eval(&selector.to_options_script()).await
        }

        /// Text content of the first matching element, if any.
        ///
        /// # Errors
        ///
        /// Returns error if evaluation fails.
        pub async fn text_content(&self, selector: &Selector) -> E2eResult<Option<String>> {
            if self.inner.is_none() {
                return Ok(None);
            }
            self.eval(&selector.to_text_script()).await
        }

        /// Rendered text of the whole page body.
        ///
        /// # Errors
        ///
        /// Returns error if evaluation fails.
        pub async fn body_text(&self) -> E2eResult<String> {
            if self.inner.is_none() {
                return Ok(String::new());
            }
            self.eval("document.body ? document.body.innerText : ''")
                .await
        }

        /// The document ready state.
        ///
        /// # Errors
        ///
        /// Returns error if evaluation fails.
        pub async fn ready_state(&self) -> E2eResult<String> {
            if self.inner.is_none() {
                return Ok(String::from("complete"));
            }
            self.eval("document.readyState").await
        }

        /// Poll the document ready state until it satisfies
        /// `options.wait_until`.
        ///
        /// # Errors
        ///
        /// Returns [`E2eError::Timeout`] if the state is not reached.
        pub async fn wait_for_load(&self, options: &WaitOptions) -> E2eResult<()> {
            let wanted = options.wait_until.ready_states();
            crate::wait::poll_until(options, || {
                let page = self;
                async move {
                    let state = page.ready_state().await?;
                    Ok(wanted.contains(&state.as_str()).then_some(()))
                }
            })
            .await
        }

        /// Take a PNG screenshot.
        ///
        /// # Errors
        ///
        /// Returns error if the capture fails.
        pub async fn screenshot(&self) -> E2eResult<Vec<u8>> {
            use chromiumoxide::cdp::browser_protocol::page::{
                CaptureScreenshotFormat, CaptureScreenshotParams,
            };

            if let Some(ref inner) = self.inner {
                let page = inner.lock().await;
                let params = CaptureScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .build();

                let screenshot = page.execute(params).await.map_err(|e| E2eError::Screenshot {
                    message: e.to_string(),
                })?;

                use base64::Engine;
                base64::engine::general_purpose::STANDARD
                    .decode(&screenshot.data)
                    .map_err(|e| E2eError::Screenshot {
                        message: e.to_string(),
                    })
            } else {
                Ok(vec![])
            }
        }

        /// Get current URL
        #[must_use]
        pub fn current_url(&self) -> &str {
            &self.url
        }
    }
}

// ============================================================================
// Mock Implementation (when `browser` feature is NOT enabled)
// ============================================================================

#[cfg(not(feature = "browser"))]
mod mock {
    use super::{BrowserConfig, E2eResult};
    use crate::locator::Selector;

    /// Browser instance for testing (mock when `browser` feature disabled)
    #[derive(Debug)]
    pub struct Browser {
        config: BrowserConfig,
    }

    impl Browser {
        /// Launch a new browser instance (mock).
        ///
        /// # Errors
        ///
        /// Never fails in mock mode.
        pub fn launch(config: BrowserConfig) -> E2eResult<Self> {
            Ok(Self { config })
        }

        /// Create a new page.
        ///
        /// # Errors
        ///
        /// Never fails in mock mode.
        pub fn new_page(&self) -> E2eResult<Page> {
            Ok(Page::new())
        }

        /// Get the browser configuration
        #[must_use]
        pub const fn config(&self) -> &BrowserConfig {
            &self.config
        }
    }

    /// A browser page for testing (mock when `browser` feature disabled)
    #[derive(Debug)]
    pub struct Page {
        url: String,
    }

    impl Default for Page {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Page {
        /// Create a new mock page
        #[must_use]
        pub fn new() -> Self {
            Self {
                url: String::from("about:blank"),
            }
        }

        /// Navigate to a URL (records it).
        ///
        /// # Errors
        ///
        /// Never fails in mock mode.
        pub fn goto(&mut self, url: &str) -> E2eResult<()> {
            self.url = url.to_string();
            Ok(())
        }

        /// Fill a form field (mock does nothing).
        ///
        /// # Errors
        ///
        /// Never fails in mock mode.
        pub fn fill(&self, _selector: &Selector, _value: &str) -> E2eResult<()> {
            Ok(())
        }

        /// Click an element (mock does nothing).
        ///
        /// # Errors
        ///
        /// Never fails in mock mode.
        pub fn click(&self, _selector: &Selector) -> E2eResult<()> {
            Ok(())
        }

        /// Select an option (mock does nothing).
        ///
        /// # Errors
        ///
        /// Never fails in mock mode.
        pub fn select_option(&self, _selector: &Selector, _label: &str) -> E2eResult<()> {
            Ok(())
        }

        /// List option labels (mock returns none).
        ///
        /// # Errors
        ///
        /// Never fails in mock mode.
        pub fn option_labels(&self, _selector: &Selector) -> E2eResult<Vec<String>> {
            Ok(Vec::new())
        }

        /// Text content (mock returns none).
        ///
        /// # Errors
        ///
        /// Never fails in mock mode.
        pub fn text_content(&self, _selector: &Selector) -> E2eResult<Option<String>> {
            Ok(None)
        }

        /// Body text (mock returns empty).
        ///
        /// # Errors
        ///
        /// Never fails in mock mode.
        pub fn body_text(&self) -> E2eResult<String> {
            Ok(String::new())
        }

        /// Document ready state (mock is always complete).
        ///
        /// # Errors
        ///
        /// Never fails in mock mode.
        pub fn ready_state(&self) -> E2eResult<String> {
            Ok(String::from("complete"))
        }

        /// Take a screenshot (mock returns empty).
        ///
        /// # Errors
        ///
        /// Never fails in mock mode.
        pub fn screenshot(&self) -> E2eResult<Vec<u8>> {
            Ok(vec![])
        }

        /// Get current URL
        #[must_use]
        pub fn current_url(&self) -> &str {
            &self.url
        }
    }
}

// Re-export based on feature
#[cfg(feature = "browser")]
pub use cdp::{Browser, Page};

#[cfg(not(feature = "browser"))]
pub use mock::{Browser, Page};
