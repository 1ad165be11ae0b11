//! Page Object Model for the MarsAir site.
//!
//! `MarsAirPage` encapsulates the search form and results page: the
//! locators mirror the deployed markup, and the flows drive them
//! through the browser wrapper.

use crate::config::SuiteConfig;
use crate::locator::{Locator, Selector};

/// Trait for page objects representing a page or component in the UI
pub trait PageObject {
    /// URL pattern that matches this page (e.g., "/", "/search")
    fn url_pattern(&self) -> &str;

    /// Check if the page is fully loaded and ready for interaction
    fn is_loaded(&self) -> bool {
        true
    }

    /// Optional wait time for page load (in milliseconds)
    fn load_timeout_ms(&self) -> u64 {
        30_000
    }

    /// Get the page name for logging/debugging
    fn page_name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Travel dates offered by the booking form.
///
/// MarsAir only flies twice a year, so the date selects offer July
/// and December of this year and the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TravelDate {
    /// July this year
    July,
    /// December this year
    December,
    /// July next year
    JulyNextYear,
    /// December next year
    DecemberNextYear,
}

impl TravelDate {
    /// All offered dates, in select-option order
    pub const ALL: [Self; 4] = [
        Self::July,
        Self::December,
        Self::JulyNextYear,
        Self::DecemberNextYear,
    ];

    /// The option label as rendered in the select
    #[must_use]
    pub const fn option_label(&self) -> &'static str {
        match self {
            Self::July => "July",
            Self::December => "December",
            Self::JulyNextYear => "July (next year)",
            Self::DecemberNextYear => "December (next year)",
        }
    }

    /// Months after the first offered July
    #[must_use]
    pub const fn month_ordinal(&self) -> u32 {
        match self {
            Self::July => 0,
            Self::December => 5,
            Self::JulyNextYear => 12,
            Self::DecemberNextYear => 17,
        }
    }

    /// Months between a departure on `self` and this return date.
    /// Negative when the return precedes the departure.
    #[must_use]
    pub const fn months_until(&self, return_date: Self) -> i32 {
        return_date.month_ordinal() as i32 - self.month_ordinal() as i32
    }

    /// Look a date up by its option label
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|date| date.option_label() == label)
    }
}

impl std::fmt::Display for TravelDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.option_label())
    }
}

/// Page object for the MarsAir search form and results page
#[derive(Debug)]
pub struct MarsAirPage {
    config: SuiteConfig,
    departure_select: Locator,
    return_select: Locator,
    promo_input: Locator,
    search_button: Locator,
    logo: Locator,
    results_logo: Locator,
    book_now_link: Locator,
    #[cfg(feature = "browser")]
    page: crate::browser::Page,
}

impl MarsAirPage {
    fn locators() -> (Locator, Locator, Locator, Locator, Locator, Locator, Locator) {
        (
            Locator::new("select[name=\"departing\"]"),
            Locator::new("select[name=\"returning\"]"),
            Locator::new("input[name=\"promotional_code\"]"),
            Locator::new("input[type=\"submit\"][value=\"Search\"]"),
            Locator::new("a[href=\"/\"] img"),
            Locator::new("h1 > a"),
            Locator::from_selector(Selector::text("Book a ticket to the red planet now!")),
        )
    }

    /// The departure-date select
    #[must_use]
    pub fn departure_select(&self) -> &Locator {
        &self.departure_select
    }

    /// The return-date select
    #[must_use]
    pub fn return_select(&self) -> &Locator {
        &self.return_select
    }

    /// The promotional-code input
    #[must_use]
    pub fn promo_input(&self) -> &Locator {
        &self.promo_input
    }

    /// The search submit button
    #[must_use]
    pub fn search_button(&self) -> &Locator {
        &self.search_button
    }

    /// The home-page logo image link
    #[must_use]
    pub fn logo(&self) -> &Locator {
        &self.logo
    }

    /// The heading link back home on the results page
    #[must_use]
    pub fn results_logo(&self) -> &Locator {
        &self.results_logo
    }

    /// The "book now" teaser link
    #[must_use]
    pub fn book_now_link(&self) -> &Locator {
        &self.book_now_link
    }

    /// The suite configuration this page drives against
    #[must_use]
    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }
}

impl PageObject for MarsAirPage {
    fn url_pattern(&self) -> &str {
        "/"
    }

    fn load_timeout_ms(&self) -> u64 {
        self.config.navigation_timeout_ms
    }

    fn page_name(&self) -> &str {
        "MarsAirPage"
    }
}

#[cfg(not(feature = "browser"))]
impl MarsAirPage {
    /// Create a detached page object for wiring tests
    #[must_use]
    pub fn new(config: SuiteConfig) -> Self {
        let (departure_select, return_select, promo_input, search_button, logo, results_logo, book_now_link) =
            Self::locators();
        Self {
            config,
            departure_select,
            return_select,
            promo_input,
            search_button,
            logo,
            results_logo,
            book_now_link,
        }
    }
}

#[cfg(feature = "browser")]
mod flows {
    use super::{MarsAirPage, TravelDate};
    use crate::browser::Page;
    use crate::config::SuiteConfig;
    use crate::messages::{classify_all, extract_result_line, SearchOutcome};
    use crate::result::{E2eError, E2eResult};
    use tracing::info;

    impl MarsAirPage {
        /// Attach a page object to a live browser page
        #[must_use]
        pub fn new(page: Page, config: SuiteConfig) -> Self {
            let (departure_select, return_select, promo_input, search_button, logo, results_logo, book_now_link) =
                Self::locators();
            Self {
                config,
                departure_select,
                return_select,
                promo_input,
                search_button,
                logo,
                results_logo,
                book_now_link,
                page,
            }
        }

        /// Navigate to the home page and wait for the DOM.
        ///
        /// # Errors
        ///
        /// Returns error on navigation failure or load timeout.
        pub async fn open(&mut self) -> E2eResult<()> {
            let url = self.config.base_url.clone();
            self.page.goto(&url).await?;
            self.page.wait_for_load(&self.config.navigation_wait()).await
        }

        /// Run a search: pick the dates, optionally enter a promo
        /// code, submit, and wait for the results page.
        ///
        /// # Errors
        ///
        /// Returns error if any form element is missing or the
        /// results page does not load.
        pub async fn search(
            &mut self,
            departure: TravelDate,
            return_date: TravelDate,
            promo_code: Option<&str>,
        ) -> E2eResult<()> {
            info!(
                departure = %departure,
                return_date = %return_date,
                promo_code = promo_code.unwrap_or(""),
                "searching"
            );
            self.page
                .select_option(self.departure_select.selector(), departure.option_label())
                .await?;
            self.page
                .select_option(self.return_select.selector(), return_date.option_label())
                .await?;
            if let Some(code) = promo_code {
                self.page.fill(self.promo_input.selector(), code).await?;
            }
            self.page.click(self.search_button.selector()).await?;
            self.page.wait_for_load(&self.config.navigation_wait()).await
        }

        /// Scrape the result message line from the results page.
        ///
        /// Polls the body text under the action timeout; the page
        /// renders the message after navigation settles.
        ///
        /// # Errors
        ///
        /// Returns [`E2eError::NoResultMessage`] when no known message
        /// appears before the deadline.
        pub async fn result_message(&self) -> E2eResult<String> {
            let options = self.config.action_wait();
            let scraped = crate::wait::poll_until(&options, || {
                let page = &self.page;
                async move {
                    let body = page.body_text().await?;
                    Ok(extract_result_line(&body).map(str::to_string))
                }
            })
            .await;

            match scraped {
                Ok(line) => Ok(line),
                Err(E2eError::Timeout { .. }) => Err(E2eError::NoResultMessage {
                    url: self.page.current_url().to_string(),
                }),
                Err(other) => Err(other),
            }
        }

        /// Classified outcomes of the last search.
        ///
        /// # Errors
        ///
        /// Propagates scrape failures.
        pub async fn search_outcomes(&self) -> E2eResult<Vec<SearchOutcome>> {
            let message = self.result_message().await?;
            info!(message, "search result");
            Ok(classify_all(&message))
        }

        /// Option labels offered by the departure select, including
        /// the leading placeholder.
        ///
        /// # Errors
        ///
        /// Propagates evaluation failures.
        pub async fn departure_options(&self) -> E2eResult<Vec<String>> {
            self.page
                .option_labels(self.departure_select.selector())
                .await
        }

        /// Option labels offered by the return select, including the
        /// leading placeholder.
        ///
        /// # Errors
        ///
        /// Propagates evaluation failures.
        pub async fn return_options(&self) -> E2eResult<Vec<String>> {
            self.page.option_labels(self.return_select.selector()).await
        }

        /// Whether the search form is present on the current page.
        ///
        /// # Errors
        ///
        /// Propagates evaluation failures.
        pub async fn has_search_form(&self) -> E2eResult<bool> {
            let count: u32 = self
                .page
                .eval(&self.departure_select.selector().to_count_query())
                .await?;
            Ok(count > 0)
        }

        /// The browser's current location.
        ///
        /// Read from the document, not the navigation history, so it
        /// reflects link clicks.
        ///
        /// # Errors
        ///
        /// Propagates evaluation failures.
        pub async fn location(&self) -> E2eResult<String> {
            self.page.eval("window.location.href").await
        }

        /// Click the heading link on the results page to return home.
        ///
        /// # Errors
        ///
        /// Returns error if the link is missing or navigation fails.
        pub async fn click_results_logo(&mut self) -> E2eResult<()> {
            self.page.click(self.results_logo.selector()).await?;
            self.page.wait_for_load(&self.config.navigation_wait()).await
        }

        /// Current URL of the underlying page
        #[must_use]
        pub fn current_url(&self) -> &str {
            self.page.current_url()
        }

        /// Capture a screenshot if the artifact policy asks for one.
        ///
        /// # Errors
        ///
        /// Propagates capture failures.
        pub async fn capture_on_failure(&self, test_failed: bool) -> E2eResult<Option<Vec<u8>>> {
            if self.config.screenshot.should_capture(test_failed) {
                Ok(Some(self.page.screenshot().await?))
            } else {
                Ok(None)
            }
        }

        /// Detach and return the underlying page
        #[must_use]
        pub fn into_page(self) -> Page {
            self.page
        }
    }
}
