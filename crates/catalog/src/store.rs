//! Inventory store port.
//!
//! The persistent store owns product rows (one table per category); this
//! trait is the only way the rest of the system touches them. Implementations
//! live in `vendora-infra`.

use async_trait::async_trait;
use rust_decimal::Decimal;

use vendora_core::{PageRequest, ProductId, StoreResult};

use crate::product::{Product, ProductCategory, ProductDetails};

/// Per-category product storage.
///
/// Every operation takes the category explicitly; implementations map it to
/// the backing table via [`ProductCategory::table`].
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Load a product by id. `Ok(None)` when no such row exists.
    async fn get(&self, category: ProductCategory, id: ProductId)
        -> StoreResult<Option<Product>>;

    /// List one page of products, ordered by id.
    async fn list(
        &self,
        category: ProductCategory,
        page: PageRequest,
    ) -> StoreResult<Vec<Product>>;

    /// Products whose color contains `color` (substring match), most
    /// expensive first.
    async fn find_by_color(
        &self,
        category: ProductCategory,
        color: &str,
        page: PageRequest,
    ) -> StoreResult<Vec<Product>>;

    /// Products priced at or under `ceiling`, most expensive first.
    async fn find_by_max_price(
        &self,
        category: ProductCategory,
        ceiling: Decimal,
        page: PageRequest,
    ) -> StoreResult<Vec<Product>>;

    /// Insert a new product; the store assigns the id.
    async fn create(
        &self,
        category: ProductCategory,
        details: &ProductDetails,
    ) -> StoreResult<ProductId>;

    /// Overwrite all attribute fields of an existing product.
    /// Returns `false` when the row does not exist.
    async fn update(&self, category: ProductCategory, product: &Product) -> StoreResult<bool>;

    /// Conditionally set `quantity` to `remaining` if it still equals
    /// `seen_quantity` (compare-and-swap). Returns `false` on a lost race,
    /// letting the caller re-read and retry.
    async fn debit_quantity(
        &self,
        category: ProductCategory,
        id: ProductId,
        seen_quantity: i64,
        remaining: i64,
    ) -> StoreResult<bool>;

    /// Delete a product. Returns `false` when the row does not exist.
    async fn delete(&self, category: ProductCategory, id: ProductId) -> StoreResult<bool>;
}
