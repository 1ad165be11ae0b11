//! Result and error types for promo-code handling.

use thiserror::Error;

/// Result type for promo-code operations
pub type PromoResult<T> = Result<T, PromoError>;

/// Errors that can occur when generating or validating promo codes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromoError {
    /// Discount digit outside the 0-9 tier range
    #[error("discount digit {digit} is out of range (expected 0-9)")]
    InvalidDiscountDigit {
        /// The rejected digit
        digit: u8,
    },

    /// Code string does not match the `LLD-LLL-DDDC` format
    #[error("malformed promo code {code:?}: {reason}")]
    MalformedCode {
        /// The rejected input
        code: String,
        /// Why it was rejected
        reason: String,
    },
}
