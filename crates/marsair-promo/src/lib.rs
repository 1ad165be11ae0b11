//! Promotional-code fixtures for the MarsAir booking suite.
//!
//! MarsAir promotional codes have the shape `LLD-LLL-DDDC`: two
//! uppercase letters, the discount digit, three uppercase letters,
//! three digits, and a trailing checksum digit. A code is valid when
//! the checksum equals the sum of the four digits modulo 10.
//!
//! This crate produces codes whose validity is controlled exactly
//! (valid codes carry the correct checksum, invalid ones a checksum
//! perturbed by `+1 mod 10`, which never collides), and exposes a
//! standalone validator so the checksum rule is testable without
//! going through generation.
//!
//! # Example
//!
//! ```
//! use marsair_promo::{PromoCodeGenerator, Seed, validate};
//!
//! let mut generator = PromoCodeGenerator::new(Seed::from_u64(42));
//! let code = generator.generate(2, true).unwrap();
//! assert_eq!(code.discount_percent(), 20);
//! assert!(validate(&code.to_string()).unwrap());
//! ```

#![warn(missing_docs)]

mod code;
mod error;
mod generator;

pub use code::{validate, PromoCode};
pub use error::{PromoError, PromoResult};
pub use generator::{PromoCodeGenerator, Seed};
