//! In-memory store implementations for dev wiring and tests.
//!
//! Mutex-guarded maps with the same observable contract as the Postgres
//! stores: store-assigned ascending ids, price-descending filter queries,
//! and a compare-and-swap stock debit. The CAS runs under the same lock as
//! the map, so it is atomic by construction.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use vendora_catalog::{InventoryStore, Product, ProductCategory, ProductDetails};
use vendora_core::{PageRequest, ProductId, SaleId, StoreResult};
use vendora_sales::{Sale, SaleLedger};

#[derive(Default)]
struct Table {
    rows: BTreeMap<i64, Product>,
    next_id: i64,
}

/// In-memory inventory store.
#[derive(Default)]
pub struct InMemoryInventoryStore {
    tables: Mutex<HashMap<ProductCategory, Table>>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn page_slice(products: Vec<Product>, page: PageRequest) -> Vec<Product> {
    products
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect()
}

fn by_price_descending(a: &Product, b: &Product) -> std::cmp::Ordering {
    b.details.price.cmp(&a.details.price)
}

#[async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn get(
        &self,
        category: ProductCategory,
        id: ProductId,
    ) -> StoreResult<Option<Product>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .get(&category)
            .and_then(|table| table.rows.get(&id.get()).cloned()))
    }

    async fn list(
        &self,
        category: ProductCategory,
        page: PageRequest,
    ) -> StoreResult<Vec<Product>> {
        let tables = self.tables.lock().unwrap();
        let products = tables
            .get(&category)
            .map(|table| table.rows.values().cloned().collect())
            .unwrap_or_default();
        Ok(page_slice(products, page))
    }

    async fn find_by_color(
        &self,
        category: ProductCategory,
        color: &str,
        page: PageRequest,
    ) -> StoreResult<Vec<Product>> {
        let tables = self.tables.lock().unwrap();
        let mut products: Vec<Product> = tables
            .get(&category)
            .map(|table| {
                table
                    .rows
                    .values()
                    .filter(|p| p.details.color.contains(color))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        products.sort_by(by_price_descending);
        Ok(page_slice(products, page))
    }

    async fn find_by_max_price(
        &self,
        category: ProductCategory,
        ceiling: Decimal,
        page: PageRequest,
    ) -> StoreResult<Vec<Product>> {
        let tables = self.tables.lock().unwrap();
        let mut products: Vec<Product> = tables
            .get(&category)
            .map(|table| {
                table
                    .rows
                    .values()
                    .filter(|p| p.details.price <= ceiling)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        products.sort_by(by_price_descending);
        Ok(page_slice(products, page))
    }

    async fn create(
        &self,
        category: ProductCategory,
        details: &ProductDetails,
    ) -> StoreResult<ProductId> {
        let mut tables = self.tables.lock().unwrap();
        let table = tables.entry(category).or_default();
        table.next_id += 1;
        let id = ProductId::new(table.next_id);
        table.rows.insert(id.get(), Product::new(id, details.clone()));
        Ok(id)
    }

    async fn update(&self, category: ProductCategory, product: &Product) -> StoreResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        match tables
            .get_mut(&category)
            .and_then(|table| table.rows.get_mut(&product.id.get()))
        {
            Some(existing) => {
                *existing = product.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn debit_quantity(
        &self,
        category: ProductCategory,
        id: ProductId,
        seen_quantity: i64,
        remaining: i64,
    ) -> StoreResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        match tables
            .get_mut(&category)
            .and_then(|table| table.rows.get_mut(&id.get()))
        {
            Some(product) if product.details.quantity == seen_quantity => {
                product.details.quantity = remaining;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, category: ProductCategory, id: ProductId) -> StoreResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables
            .get_mut(&category)
            .and_then(|table| table.rows.remove(&id.get()))
            .is_some())
    }
}

#[derive(Default)]
struct LedgerState {
    rows: BTreeMap<i64, Sale>,
    next_id: i64,
}

/// In-memory sale ledger.
#[derive(Default)]
pub struct InMemorySaleLedger {
    inner: Mutex<LedgerState>,
}

impl InMemorySaleLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SaleLedger for InMemorySaleLedger {
    async fn create(&self, sale: &Sale) -> StoreResult<SaleId> {
        let mut state = self.inner.lock().unwrap();
        state.next_id += 1;
        let id = SaleId::new(state.next_id);
        state.rows.insert(id.get(), sale.clone());
        Ok(id)
    }

    async fn units_sold_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<i64> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .rows
            .values()
            .filter(|s| s.sale_date >= start && s.sale_date <= end)
            .map(|s| s.nb_sold)
            .sum())
    }

    async fn revenue_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Decimal> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .rows
            .values()
            .filter(|s| s.sale_date >= start && s.sale_date <= end)
            .map(|s| s.price)
            .sum())
    }

    async fn find_by_date(
        &self,
        sale_date: DateTime<Utc>,
    ) -> StoreResult<Option<(SaleId, Sale)>> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .rows
            .iter()
            .find(|(_, sale)| sale.sale_date == sale_date)
            .map(|(id, sale)| (SaleId::new(*id), sale.clone())))
    }

    async fn delete(&self, sale_id: SaleId) -> StoreResult<bool> {
        let mut state = self.inner.lock().unwrap();
        Ok(state.rows.remove(&sale_id.get()).is_some())
    }
}
