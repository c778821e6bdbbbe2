//! Sale transaction processor.
//!
//! Orchestrates the read-clamp-debit-record workflow across the inventory
//! store and the sale ledger. The processor itself holds no persistent
//! state.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;

use vendora_catalog::{InventoryStore, ProductCategory};
use vendora_core::{ProductId, SaleId, StoreError};

use crate::period::{ReportPeriod, SaleReport};
use crate::sale::{Sale, SaleLedger};

/// Failure of a sale request. Each request fails independently; none of
/// these are fatal to the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SaleError {
    /// `product_type` was none of {1, 2, 3}.
    #[error("no such product type: {0}")]
    UnknownProductType(i16),

    /// No product with the given id exists in the category's table.
    #[error("product not found")]
    ProductNotFound,

    /// Stock is already at zero; nothing was debited or recorded.
    #[error("product is out of stock")]
    OutOfStock,

    /// The requested quantity was not a positive integer.
    #[error("requested quantity must be positive")]
    InvalidQuantity,

    /// A store read/write failed (or the debit retries were exhausted).
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl From<StoreError> for SaleError {
    fn from(err: StoreError) -> Self {
        SaleError::Persistence(err.to_string())
    }
}

/// Confirmation returned for a completed sale.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleReceipt {
    pub sale_id: SaleId,
    pub product_id: ProductId,
    pub product_type: ProductCategory,
    /// Actually-debited quantity (requested, clamped to available stock).
    pub nb_sold: i64,
    /// Total amount for the transaction.
    pub total: Decimal,
}

/// The sale workflow engine.
///
/// The read-clamp-debit window is closed with a compare-and-swap on the
/// stored quantity: the debit only lands if the quantity is still the one
/// the decision was made on, otherwise the loop re-reads and retries.
pub struct SaleProcessor {
    inventory: Arc<dyn InventoryStore>,
    ledger: Arc<dyn SaleLedger>,
    max_debit_attempts: u32,
}

impl SaleProcessor {
    /// Debit attempts before a contended sale gives up.
    pub const DEFAULT_DEBIT_ATTEMPTS: u32 = 5;

    pub fn new(inventory: Arc<dyn InventoryStore>, ledger: Arc<dyn SaleLedger>) -> Self {
        Self {
            inventory,
            ledger,
            max_debit_attempts: Self::DEFAULT_DEBIT_ATTEMPTS,
        }
    }

    pub fn with_debit_attempts(mut self, attempts: u32) -> Self {
        self.max_debit_attempts = attempts.max(1);
        self
    }

    /// Execute one sale: validate, clamp, debit stock, record the sale.
    ///
    /// Side effects per call: exactly one inventory mutation and at most one
    /// sale record, never more. The debit must have landed before the sale
    /// is written, so a reported success always reflects debited stock.
    pub async fn create_sale(
        &self,
        product_id: ProductId,
        product_type: i16,
        requested: i64,
    ) -> Result<SaleReceipt, SaleError> {
        let category = ProductCategory::from_tag(product_type)
            .ok_or(SaleError::UnknownProductType(product_type))?;
        if requested < 1 {
            return Err(SaleError::InvalidQuantity);
        }

        for _ in 0..self.max_debit_attempts {
            let product = self
                .inventory
                .get(category, product_id)
                .await?
                .ok_or(SaleError::ProductNotFound)?;

            let available = product.quantity();
            if available <= 0 {
                return Err(SaleError::OutOfStock);
            }

            // The sale proceeds with whatever is available; it never fails
            // merely because the request exceeds stock.
            let nb_sold = clamp_requested(requested, available);
            let remaining = available - nb_sold;

            if !self
                .inventory
                .debit_quantity(category, product_id, available, remaining)
                .await?
            {
                // Lost the race against a concurrent sale; re-read and retry.
                continue;
            }

            let total = product.unit_price() * Decimal::from(nb_sold);
            let sale = Sale {
                product_id,
                nb_sold,
                sale_date: Utc::now(),
                product_type: category,
                price: total,
            };
            let sale_id = self.ledger.create(&sale).await?;

            return Ok(SaleReceipt {
                sale_id,
                product_id,
                product_type: category,
                nb_sold,
                total,
            });
        }

        Err(SaleError::Persistence(
            "concurrent stock update, debit retries exhausted".to_string(),
        ))
    }

    /// Aggregate units sold and revenue over a normalized report period.
    pub async fn report(&self, period: ReportPeriod) -> Result<SaleReport, SaleError> {
        let (start, end) = period.normalize(Utc::now());

        let units_sold = self.ledger.units_sold_in_range(start, end).await?;
        let revenue = self.ledger.revenue_in_range(start, end).await?;

        Ok(SaleReport { units_sold, revenue })
    }
}

/// Clamp a requested sale quantity to the available stock.
fn clamp_requested(requested: i64, available: i64) -> i64 {
    requested.min(available)
}
