//! Browser-driven end-to-end suite for the MarsAir flight-booking demo.
//!
//! The suite validates the user-facing behavior of the deployed site:
//! the search form, promotional-code feedback, and navigation. Promo
//! fixtures come from [`marsair_promo`]; everything here is the
//! orchestration around them.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ Test Cases   │──►│ MarsAirPage  │──►│ Browser/Page │
//! │ (stories)    │   │ (page object)│   │ (CDP)        │
//! └──────────────┘   └──────┬───────┘   └──────────────┘
//!                           │
//!                    ┌──────▼───────┐
//!                    │ messages     │  scraped text → SearchOutcome
//!                    └──────────────┘
//! ```
//!
//! Real browser control requires the `browser` cargo feature; without
//! it the browser layer is a mock and only the pure parts run.

#![warn(missing_docs)]

pub mod browser;
pub mod config;
pub mod locator;
pub mod logging;
pub mod messages;
pub mod page;
mod result;
pub mod wait;

pub use browser::{Browser, BrowserConfig, Page, CHROMIUM_PATH_ENV};
pub use config::{ArtifactPolicy, Engine, SuiteConfig, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use locator::{Locator, LocatorOptions, Selector};
pub use messages::{classify, classify_all, extract_result_line, SearchOutcome};
pub use page::{MarsAirPage, PageObject, TravelDate};
pub use result::{E2eError, E2eResult};
pub use wait::{LoadState, WaitOptions};
