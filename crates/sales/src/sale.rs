use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use vendora_catalog::ProductCategory;
use vendora_core::{ProductId, SaleId, StoreResult};

/// An immutable record of units debited from a product's stock.
///
/// `price` is the total for the transaction (`unit price x nb_sold` at sale
/// time) — a snapshot; later product price changes never touch past sales.
/// Only the [`SaleProcessor`](crate::SaleProcessor) creates these, and no
/// update operation exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub product_id: ProductId,
    /// Actually-debited quantity; positive, may be less than requested.
    pub nb_sold: i64,
    pub sale_date: DateTime<Utc>,
    pub product_type: ProductCategory,
    /// Total monetary amount for this transaction.
    pub price: Decimal,
}

/// Sale ledger port: exclusive owner of sale records.
///
/// Implementations live in `vendora-infra`. Range queries are inclusive on
/// both bounds and return zero sums for an empty range.
#[async_trait]
pub trait SaleLedger: Send + Sync {
    /// Append a sale; the store assigns the id.
    async fn create(&self, sale: &Sale) -> StoreResult<SaleId>;

    /// Sum of `nb_sold` over `[start, end]`.
    async fn units_sold_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<i64>;

    /// Sum of `price` over `[start, end]`.
    async fn revenue_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Decimal>;

    /// Look up a sale by its exact timestamp (test/admin use).
    async fn find_by_date(&self, sale_date: DateTime<Utc>)
        -> StoreResult<Option<(SaleId, Sale)>>;

    /// Remove a sale (test/admin cleanup only; sales are otherwise immutable).
    async fn delete(&self, sale_id: SaleId) -> StoreResult<bool>;
}
