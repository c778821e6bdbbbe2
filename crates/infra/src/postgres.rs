//! Postgres-backed store implementations.
//!
//! One table per product category (`car`, `phone`, `tv`) plus the `sale`
//! table. Table names come from the closed [`ProductCategory::table`] set,
//! never from user input, so splicing them into SQL text is safe. All
//! parameters are positional binds.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use vendora_catalog::{InventoryStore, Product, ProductCategory, ProductDetails};
use vendora_core::{PageRequest, ProductId, SaleId, StoreError, StoreResult};
use vendora_sales::{Sale, SaleLedger};

fn map_sql(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::PoolTimedOut => StoreError::timeout("connection pool acquire timed out"),
        sqlx::Error::PoolClosed | sqlx::Error::Io(_) => StoreError::unavailable(err.to_string()),
        _ => StoreError::query(err.to_string()),
    }
}

fn product_from_row(row: &PgRow) -> StoreResult<Product> {
    let id: i64 = row.try_get("id").map_err(map_sql)?;
    let details = ProductDetails {
        brand_name: row.try_get("brand_name").map_err(map_sql)?,
        color: row.try_get("color").map_err(map_sql)?,
        price: row.try_get("price").map_err(map_sql)?,
        weight: row.try_get("weight").map_err(map_sql)?,
        length: row.try_get("length").map_err(map_sql)?,
        quantity: row.try_get("quantity").map_err(map_sql)?,
    };
    Ok(Product::new(ProductId::new(id), details))
}

/// Inventory store on a sqlx Postgres pool.
///
/// The pool is configured with a bounded acquire timeout at bootstrap, so a
/// saturated or unreachable database surfaces [`StoreError::Timeout`] /
/// [`StoreError::Unavailable`] instead of hanging requests.
#[derive(Clone)]
pub struct PgInventoryStore {
    pool: PgPool,
}

impl PgInventoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryStore for PgInventoryStore {
    async fn get(
        &self,
        category: ProductCategory,
        id: ProductId,
    ) -> StoreResult<Option<Product>> {
        let query = format!(
            "SELECT id, brand_name, color, price, weight, length, quantity \
             FROM {} WHERE id = $1",
            category.table()
        );
        let row = sqlx::query(&query)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sql)?;

        row.as_ref().map(product_from_row).transpose()
    }

    async fn list(
        &self,
        category: ProductCategory,
        page: PageRequest,
    ) -> StoreResult<Vec<Product>> {
        let query = format!(
            "SELECT id, brand_name, color, price, weight, length, quantity \
             FROM {} ORDER BY id OFFSET $1 LIMIT $2",
            category.table()
        );
        let rows = sqlx::query(&query)
            .bind(page.offset())
            .bind(page.limit())
            .fetch_all(&self.pool)
            .await
            .map_err(map_sql)?;

        rows.iter().map(product_from_row).collect()
    }

    async fn find_by_color(
        &self,
        category: ProductCategory,
        color: &str,
        page: PageRequest,
    ) -> StoreResult<Vec<Product>> {
        let query = format!(
            "SELECT id, brand_name, color, price, weight, length, quantity \
             FROM {} WHERE color LIKE $1 ORDER BY price DESC OFFSET $2 LIMIT $3",
            category.table()
        );
        let rows = sqlx::query(&query)
            .bind(format!("%{color}%"))
            .bind(page.offset())
            .bind(page.limit())
            .fetch_all(&self.pool)
            .await
            .map_err(map_sql)?;

        rows.iter().map(product_from_row).collect()
    }

    async fn find_by_max_price(
        &self,
        category: ProductCategory,
        ceiling: Decimal,
        page: PageRequest,
    ) -> StoreResult<Vec<Product>> {
        let query = format!(
            "SELECT id, brand_name, color, price, weight, length, quantity \
             FROM {} WHERE price <= $1 ORDER BY price DESC OFFSET $2 LIMIT $3",
            category.table()
        );
        let rows = sqlx::query(&query)
            .bind(ceiling)
            .bind(page.offset())
            .bind(page.limit())
            .fetch_all(&self.pool)
            .await
            .map_err(map_sql)?;

        rows.iter().map(product_from_row).collect()
    }

    async fn create(
        &self,
        category: ProductCategory,
        details: &ProductDetails,
    ) -> StoreResult<ProductId> {
        let query = format!(
            "INSERT INTO {} (brand_name, color, price, weight, length, quantity) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
            category.table()
        );
        let row = sqlx::query(&query)
            .bind(&details.brand_name)
            .bind(&details.color)
            .bind(details.price)
            .bind(details.weight)
            .bind(details.length)
            .bind(details.quantity)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sql)?;

        let id: i64 = row.try_get("id").map_err(map_sql)?;
        Ok(ProductId::new(id))
    }

    async fn update(&self, category: ProductCategory, product: &Product) -> StoreResult<bool> {
        let query = format!(
            "UPDATE {} SET brand_name = $1, color = $2, price = $3, \
             weight = $4, length = $5, quantity = $6 WHERE id = $7",
            category.table()
        );
        let result = sqlx::query(&query)
            .bind(&product.details.brand_name)
            .bind(&product.details.color)
            .bind(product.details.price)
            .bind(product.details.weight)
            .bind(product.details.length)
            .bind(product.details.quantity)
            .bind(product.id.get())
            .execute(&self.pool)
            .await
            .map_err(map_sql)?;

        Ok(result.rows_affected() == 1)
    }

    async fn debit_quantity(
        &self,
        category: ProductCategory,
        id: ProductId,
        seen_quantity: i64,
        remaining: i64,
    ) -> StoreResult<bool> {
        // Compare-and-swap: the write only lands if the quantity is still
        // the one the caller decided on.
        let query = format!(
            "UPDATE {} SET quantity = $1 WHERE id = $2 AND quantity = $3",
            category.table()
        );
        let result = sqlx::query(&query)
            .bind(remaining)
            .bind(id.get())
            .bind(seen_quantity)
            .execute(&self.pool)
            .await
            .map_err(map_sql)?;

        let debited = result.rows_affected() == 1;
        if !debited {
            tracing::debug!(
                category = category.table(),
                product_id = id.get(),
                "stock debit lost a concurrent update"
            );
        }
        Ok(debited)
    }

    async fn delete(&self, category: ProductCategory, id: ProductId) -> StoreResult<bool> {
        let query = format!("DELETE FROM {} WHERE id = $1", category.table());
        let result = sqlx::query(&query)
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(map_sql)?;

        Ok(result.rows_affected() == 1)
    }
}

/// Sale ledger on a sqlx Postgres pool.
#[derive(Clone)]
pub struct PgSaleLedger {
    pool: PgPool,
}

impl PgSaleLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn sale_from_row(row: &PgRow) -> StoreResult<(SaleId, Sale)> {
    let sale_id: i64 = row.try_get("sale_id").map_err(map_sql)?;
    let product_id: i64 = row.try_get("product_id").map_err(map_sql)?;
    let tag: i16 = row.try_get("product_type").map_err(map_sql)?;
    let product_type = ProductCategory::from_tag(tag)
        .ok_or_else(|| StoreError::query(format!("unknown product_type tag in sale row: {tag}")))?;

    Ok((
        SaleId::new(sale_id),
        Sale {
            product_id: ProductId::new(product_id),
            nb_sold: row.try_get("nb_sold").map_err(map_sql)?,
            sale_date: row.try_get("sale_date").map_err(map_sql)?,
            product_type,
            price: row.try_get("price").map_err(map_sql)?,
        },
    ))
}

#[async_trait]
impl SaleLedger for PgSaleLedger {
    async fn create(&self, sale: &Sale) -> StoreResult<SaleId> {
        let row = sqlx::query(
            "INSERT INTO sale (product_id, nb_sold, sale_date, product_type, price) \
             VALUES ($1, $2, $3, $4, $5) RETURNING sale_id",
        )
        .bind(sale.product_id.get())
        .bind(sale.nb_sold)
        .bind(sale.sale_date)
        .bind(sale.product_type.tag())
        .bind(sale.price)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sql)?;

        let sale_id: i64 = row.try_get("sale_id").map_err(map_sql)?;
        Ok(SaleId::new(sale_id))
    }

    async fn units_sold_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<i64> {
        // SUM over BIGINT widens to NUMERIC; cast back after the COALESCE.
        let row = sqlx::query(
            "SELECT COALESCE(SUM(nb_sold), 0)::BIGINT AS units \
             FROM sale WHERE sale_date BETWEEN $1 AND $2",
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sql)?;

        row.try_get("units").map_err(map_sql)
    }

    async fn revenue_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Decimal> {
        let row = sqlx::query(
            "SELECT COALESCE(SUM(price), 0) AS revenue \
             FROM sale WHERE sale_date BETWEEN $1 AND $2",
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sql)?;

        row.try_get("revenue").map_err(map_sql)
    }

    async fn find_by_date(
        &self,
        sale_date: DateTime<Utc>,
    ) -> StoreResult<Option<(SaleId, Sale)>> {
        let row = sqlx::query(
            "SELECT sale_id, product_id, nb_sold, sale_date, product_type, price \
             FROM sale WHERE sale_date = $1",
        )
        .bind(sale_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sql)?;

        row.as_ref().map(sale_from_row).transpose()
    }

    async fn delete(&self, sale_id: SaleId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM sale WHERE sale_id = $1")
            .bind(sale_id.get())
            .execute(&self.pool)
            .await
            .map_err(map_sql)?;

        Ok(result.rows_affected() == 1)
    }
}
