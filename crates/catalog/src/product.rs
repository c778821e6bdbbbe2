use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use vendora_core::{DomainError, DomainResult, ProductId};

/// Product category tag.
///
/// The three categories share one capability set and one entity shape; the
/// tag selects the per-category table in the store and carries the small
/// integer encoding used on sale records (1 = car, 2 = phone, 3 = TV).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Car,
    Phone,
    Tv,
}

impl ProductCategory {
    /// All categories, in tag order.
    pub const ALL: [ProductCategory; 3] =
        [ProductCategory::Car, ProductCategory::Phone, ProductCategory::Tv];

    /// Small integer encoding stored on sale records.
    pub fn tag(self) -> i16 {
        match self {
            ProductCategory::Car => 1,
            ProductCategory::Phone => 2,
            ProductCategory::Tv => 3,
        }
    }

    /// Decode a sale-record tag; anything outside {1, 2, 3} is unknown.
    pub fn from_tag(tag: i16) -> Option<Self> {
        match tag {
            1 => Some(ProductCategory::Car),
            2 => Some(ProductCategory::Phone),
            3 => Some(ProductCategory::Tv),
            _ => None,
        }
    }

    /// Backing table name. Closed set, safe to splice into SQL.
    pub fn table(self) -> &'static str {
        match self {
            ProductCategory::Car => "car",
            ProductCategory::Phone => "phone",
            ProductCategory::Tv => "tv",
        }
    }

    /// Human-facing category name used in confirmation/error texts.
    pub fn display_name(self) -> &'static str {
        match self {
            ProductCategory::Car => "Car",
            ProductCategory::Phone => "Phone",
            ProductCategory::Tv => "TV",
        }
    }
}

impl core::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The attribute set shared by every catalog item, without its store id.
///
/// Build via [`ProductDetails::validated`] so the invariants hold from the
/// start; rows read back from the store are trusted and constructed directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetails {
    pub brand_name: String,
    pub color: String,
    /// Non-negative unit price, exact decimal.
    pub price: Decimal,
    /// Positive weight in kg.
    pub weight: i64,
    /// Positive length in cm.
    pub length: i64,
    /// Units in stock; never negative, only a sale debit reduces it.
    pub quantity: i64,
}

impl ProductDetails {
    /// Validate and build product details.
    pub fn validated(
        brand_name: impl Into<String>,
        color: impl Into<String>,
        price: Decimal,
        weight: i64,
        length: i64,
        quantity: i64,
    ) -> DomainResult<Self> {
        let brand_name = brand_name.into();
        let color = color.into();

        if brand_name.trim().is_empty() {
            return Err(DomainError::validation("brand_name cannot be empty"));
        }
        if color.trim().is_empty() {
            return Err(DomainError::validation("color cannot be empty"));
        }
        if price < Decimal::ZERO {
            return Err(DomainError::validation("price cannot be negative"));
        }
        if weight < 1 {
            return Err(DomainError::validation("weight must be positive"));
        }
        if length < 1 {
            return Err(DomainError::validation("length must be positive"));
        }
        if quantity < 0 {
            return Err(DomainError::invariant("quantity cannot be negative"));
        }

        Ok(Self {
            brand_name,
            color,
            price,
            weight,
            length,
            quantity,
        })
    }
}

/// A catalog item: store-assigned id plus its attribute set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub details: ProductDetails,
}

impl Product {
    pub fn new(id: ProductId, details: ProductDetails) -> Self {
        Self { id, details }
    }

    pub fn quantity(&self) -> i64 {
        self.details.quantity
    }

    pub fn unit_price(&self) -> Decimal {
        self.details.price
    }
}
