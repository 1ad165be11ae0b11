//! MarsAir booking stories.
//!
//! The live tests drive the deployed site and are `#[ignore]`d by
//! default: run them with `--features browser -- --ignored` against a
//! reachable deployment (override with `MARSAIR_BASE_URL`). Seat
//! availability on the demo site is independent of code validity, so
//! promo assertions accept a no-seats outcome as well.
//!
//! The offline tests exercise the fixture and classification wiring
//! and always run.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use marsair_e2e::{classify_all, SearchOutcome, SuiteConfig};
use marsair_promo::{validate, PromoCodeGenerator, Seed};

// ============================================================================
// Offline wiring
// ============================================================================

#[test]
fn test_suite_defaults_match_deployment_profile() {
    let config = SuiteConfig::default();
    assert_eq!(config.test_timeout_ms, 60_000);
    assert_eq!(config.navigation_timeout_ms, 30_000);
    assert_eq!(config.action_timeout_ms, 15_000);
    assert!(config.base_url.starts_with("https://"));
}

#[test]
fn test_valid_fixture_code_passes_standalone_validation() {
    let mut generator = PromoCodeGenerator::new(Seed::from_u64(1));
    let code = generator.generate(2, true).unwrap();
    assert_eq!(code.discount_percent(), 20);
    assert!(validate(&code.to_string()).unwrap());
}

#[test]
fn test_invalid_fixture_code_fails_standalone_validation() {
    let mut generator = PromoCodeGenerator::new(Seed::from_u64(1));
    let code = generator.generate(2, false).unwrap();
    assert!(!validate(&code.to_string()).unwrap());
}

#[test]
fn test_classify_captured_results_page() {
    // Body text as the results page renders it
    let body = "MarsAir\nBook a ticket to the red planet now!\nSearch Results\nSorry, there are no more seats available.\nBack to home";
    let line = marsair_e2e::extract_result_line(body).unwrap();
    assert_eq!(classify_all(line), vec![SearchOutcome::NoSeats]);
}

#[test]
fn test_classify_promo_confirmation_with_fixture_code() {
    let mut generator = PromoCodeGenerator::new(Seed::from_u64(7));
    let code = generator.generate(2, true).unwrap().to_string();
    let message = format!("Seats available! Promotional code {code} used: 20% discount!");
    let outcomes = classify_all(&message);
    assert!(outcomes.contains(&SearchOutcome::SeatsAvailable));
    assert!(outcomes.contains(&SearchOutcome::PromoApplied {
        discount_percent: 20
    }));
}

#[test]
fn test_classify_rejection_echoes_fixture_code() {
    let mut generator = PromoCodeGenerator::new(Seed::from_u64(7));
    let code = generator.generate(2, false).unwrap().to_string();
    let message = format!("Sorry, code {code} is not valid");
    assert_eq!(
        classify_all(&message),
        vec![SearchOutcome::PromoRejected { code }]
    );
}

// ============================================================================
// Live stories (require a browser and the deployed site)
// ============================================================================

#[cfg(feature = "browser")]
mod live {
    use super::*;
    use marsair_e2e::{Browser, BrowserConfig, E2eResult, MarsAirPage, TravelDate};

    async fn open_home() -> E2eResult<(Browser, MarsAirPage)> {
        marsair_e2e::logging::init();
        let browser = Browser::launch(BrowserConfig::default()).await?;
        let page = browser.new_page().await?;
        let mut marsair = MarsAirPage::new(page, SuiteConfig::from_env());
        marsair.open().await?;
        Ok((browser, marsair))
    }

    fn is_seat_outcome(outcomes: &[SearchOutcome]) -> bool {
        outcomes.contains(&SearchOutcome::SeatsAvailable)
            || outcomes.contains(&SearchOutcome::NoSeats)
    }

    // Story 1: basic search flow

    #[tokio::test]
    #[ignore = "requires the live MarsAir deployment"]
    async fn search_reports_seat_availability() {
        let (browser, mut marsair) = open_home().await.unwrap();
        marsair
            .search(TravelDate::July, TravelDate::DecemberNextYear, None)
            .await
            .unwrap();
        let outcomes = marsair.search_outcomes().await.unwrap();
        assert!(
            is_seat_outcome(&outcomes),
            "expected a seat-availability message, got {outcomes:?}"
        );
        browser.close().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires the live MarsAir deployment"]
    async fn date_selects_offer_only_july_and_december() {
        let (browser, marsair) = open_home().await.unwrap();
        let departures = marsair.departure_options().await.unwrap();
        let returns = marsair.return_options().await.unwrap();

        // Skip the leading "Select..." placeholder
        for option in departures.iter().skip(1).chain(returns.iter().skip(1)) {
            assert!(
                option.starts_with("July") || option.starts_with("December"),
                "unexpected date option {option:?}"
            );
        }
        browser.close().await.unwrap();
    }

    // Story 2: promotional codes

    #[tokio::test]
    #[ignore = "requires the live MarsAir deployment"]
    async fn valid_promo_code_yields_discount_or_no_seats() {
        let (browser, mut marsair) = open_home().await.unwrap();
        let mut generator = PromoCodeGenerator::new(Seed::from_entropy());
        let code = generator.generate(2, true).unwrap().to_string();

        marsair
            .search(TravelDate::July, TravelDate::DecemberNextYear, Some(&code))
            .await
            .unwrap();
        let outcomes = marsair.search_outcomes().await.unwrap();
        // The site only evaluates the code when seats exist
        assert!(
            outcomes.contains(&SearchOutcome::PromoApplied {
                discount_percent: 20
            }) || outcomes.contains(&SearchOutcome::NoSeats),
            "expected 20% discount or no seats, got {outcomes:?}"
        );
        browser.close().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires the live MarsAir deployment"]
    async fn bad_checksum_code_is_rejected_or_no_seats() {
        let (browser, mut marsair) = open_home().await.unwrap();
        let mut generator = PromoCodeGenerator::new(Seed::from_entropy());
        let code = generator.generate(2, false).unwrap().to_string();

        marsair
            .search(TravelDate::July, TravelDate::DecemberNextYear, Some(&code))
            .await
            .unwrap();
        let outcomes = marsair.search_outcomes().await.unwrap();
        assert!(
            outcomes
                .iter()
                .any(|o| matches!(o, SearchOutcome::PromoRejected { .. }))
                || outcomes.contains(&SearchOutcome::NoSeats),
            "expected rejection or no seats, got {outcomes:?}"
        );
        browser.close().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires the live MarsAir deployment"]
    async fn malformed_literal_code_is_rejected_or_no_seats() {
        let (browser, mut marsair) = open_home().await.unwrap();
        marsair
            .search(
                TravelDate::July,
                TravelDate::DecemberNextYear,
                Some("INVALID"),
            )
            .await
            .unwrap();
        let outcomes = marsair.search_outcomes().await.unwrap();
        assert!(
            outcomes.contains(&SearchOutcome::PromoRejected {
                code: "INVALID".to_string()
            }) || outcomes.contains(&SearchOutcome::NoSeats),
            "expected rejection of INVALID or no seats, got {outcomes:?}"
        );
        browser.close().await.unwrap();
    }

    // Story 3: navigation

    #[tokio::test]
    #[ignore = "requires the live MarsAir deployment"]
    async fn home_page_presents_search_form() {
        let (browser, mut marsair) = open_home().await.unwrap();
        assert!(marsair.has_search_form().await.unwrap());
        let location = marsair.location().await.unwrap();
        assert!(location.starts_with(&marsair.config().base_url));

        // A search from the form navigates to a results page with a message
        marsair
            .search(TravelDate::July, TravelDate::DecemberNextYear, None)
            .await
            .unwrap();
        assert!(!marsair.result_message().await.unwrap().is_empty());
        browser.close().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires the live MarsAir deployment"]
    async fn results_logo_returns_home() {
        let (browser, mut marsair) = open_home().await.unwrap();
        marsair
            .search(TravelDate::July, TravelDate::DecemberNextYear, None)
            .await
            .unwrap();
        marsair.click_results_logo().await.unwrap();
        assert!(marsair.has_search_form().await.unwrap());
        browser.close().await.unwrap();
    }

    // Story 4: return-date constraints

    #[tokio::test]
    #[ignore = "requires the live MarsAir deployment"]
    async fn return_before_departure_is_not_bookable() {
        let (browser, mut marsair) = open_home().await.unwrap();
        assert!(TravelDate::December.months_until(TravelDate::July) < 0);
        marsair
            .search(TravelDate::December, TravelDate::July, None)
            .await
            .unwrap();
        let outcomes = marsair.search_outcomes().await.unwrap();
        assert!(
            outcomes.contains(&SearchOutcome::ScheduleNotPossible)
                || outcomes.contains(&SearchOutcome::NoSeats),
            "trip should not be bookable, got {outcomes:?}"
        );
        browser.close().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires the live MarsAir deployment"]
    async fn return_exactly_one_year_out_is_schedulable() {
        let (browser, mut marsair) = open_home().await.unwrap();
        assert_eq!(TravelDate::July.months_until(TravelDate::JulyNextYear), 12);
        marsair
            .search(TravelDate::July, TravelDate::JulyNextYear, None)
            .await
            .unwrap();
        let outcomes = marsair.search_outcomes().await.unwrap();
        assert!(
            !outcomes.contains(&SearchOutcome::ScheduleNotPossible),
            "a one-year round trip should be schedulable, got {outcomes:?}"
        );
        browser.close().await.unwrap();
    }
}
