//! Strongly-typed identifiers used across the domain.
//!
//! Identifiers are opaque positive integers assigned by the backing store
//! (BIGSERIAL columns), so the newtypes wrap `i64` rather than generating
//! values themselves.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a catalog product (scoped by its category table).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

/// Identifier of a recorded sale.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleId(i64);

macro_rules! impl_i64_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Wrap a store-assigned identifier.
            ///
            /// Accepts any value so rows read back from the store round-trip;
            /// use [`FromStr`] when parsing untrusted input, which rejects
            /// non-positive values.
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            pub fn get(&self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value: i64 = s
                    .parse()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                if value < 1 {
                    return Err(DomainError::invalid_id(format!(
                        "{}: must be positive, got {}",
                        $name, value
                    )));
                }
                Ok(Self(value))
            }
        }
    };
}

impl_i64_newtype!(ProductId, "ProductId");
impl_i64_newtype!(SaleId, "SaleId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_product_id() {
        let id: ProductId = "42".parse().unwrap();
        assert_eq!(id.get(), 42);
    }

    #[test]
    fn rejects_zero_and_negative_ids() {
        assert!("0".parse::<ProductId>().is_err());
        assert!("-7".parse::<SaleId>().is_err());
    }

    #[test]
    fn rejects_non_numeric_ids() {
        let err = "abc".parse::<ProductId>().unwrap_err();
        match err {
            DomainError::InvalidId(_) => {}
            _ => panic!("Expected InvalidId error"),
        }
    }
}
