//! The `PromoCode` value type and the standalone validator.

use crate::error::{PromoError, PromoResult};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Structural pattern for a promo code: `LLD-LLL-DDDC`.
fn code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([A-Z]{2})(\d)-([A-Z]{3})-(\d)(\d)(\d)(\d)$").expect("pattern is valid")
    })
}

/// An immutable, parsed promotional code.
///
/// Codes are ephemeral fixture values: created per test case, passed
/// into the search form, and discarded. The checksum rule is
/// `checksum == (discount + d1 + d2 + d3) mod 10`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoCode {
    letters1: String,
    discount_digit: u8,
    letters2: String,
    digits: [u8; 3],
    checksum: u8,
}

impl PromoCode {
    /// Assemble a code from already-checked parts. Callers guarantee
    /// uppercase letters and single-digit values.
    pub(crate) fn from_parts(
        letters1: String,
        discount_digit: u8,
        letters2: String,
        digits: [u8; 3],
        checksum: u8,
    ) -> Self {
        Self {
            letters1,
            discount_digit,
            letters2,
            digits,
            checksum,
        }
    }

    /// Parse a code string against the `LLD-LLL-DDDC` format.
    ///
    /// # Errors
    ///
    /// Returns [`PromoError::MalformedCode`] if the input does not
    /// match the structural format. Parsing never panics.
    pub fn parse(code: &str) -> PromoResult<Self> {
        let captures = code_pattern().captures(code).ok_or_else(|| {
            let reason = if code.is_empty() {
                "empty string".to_string()
            } else if code.len() != 12 {
                format!("expected 12 characters, got {}", code.len())
            } else {
                "expected format LLD-LLL-DDDC (uppercase letters, digits)".to_string()
            };
            PromoError::MalformedCode {
                code: code.to_string(),
                reason,
            }
        })?;

        let digit_at = |idx: usize| -> u8 {
            // The pattern guarantees a single ASCII digit per group.
            captures[idx].as_bytes()[0] - b'0'
        };

        Ok(Self {
            letters1: captures[1].to_string(),
            discount_digit: digit_at(2),
            letters2: captures[3].to_string(),
            digits: [digit_at(4), digit_at(5), digit_at(6)],
            checksum: digit_at(7),
        })
    }

    /// The checksum the digits imply, regardless of what the code carries.
    #[must_use]
    pub fn expected_checksum(&self) -> u8 {
        (self.discount_digit + self.digits[0] + self.digits[1] + self.digits[2]) % 10
    }

    /// Whether the carried checksum satisfies the mod-10 rule.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.checksum == self.expected_checksum()
    }

    /// The discount tier digit (0-9).
    #[must_use]
    pub fn discount_digit(&self) -> u8 {
        self.discount_digit
    }

    /// The discount percentage this tier advertises (digit x 10).
    #[must_use]
    pub fn discount_percent(&self) -> u8 {
        self.discount_digit * 10
    }

    /// The checksum digit the code carries.
    #[must_use]
    pub fn checksum(&self) -> u8 {
        self.checksum
    }
}

impl fmt::Display for PromoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}-{}-{}{}{}{}",
            self.letters1,
            self.discount_digit,
            self.letters2,
            self.digits[0],
            self.digits[1],
            self.digits[2],
            self.checksum
        )
    }
}

/// Validate a code string against the checksum rule.
///
/// Parses the structural format first, so the rule is verifiable
/// independently of generation internals.
///
/// # Errors
///
/// Returns [`PromoError::MalformedCode`] for inputs that do not match
/// the `LLD-LLL-DDDC` format.
pub fn validate(code: &str) -> PromoResult<bool> {
    Ok(PromoCode::parse(code)?.is_valid())
}
