//! Infrastructure layer: store implementations behind the catalog and sales
//! ports.
//!
//! Two flavors, wired by the API at bootstrap:
//! - `postgres`: sqlx-backed, one table per product category plus the sale
//!   table (schema under `migrations/`).
//! - `memory`: mutex-guarded maps for dev and tests.

pub mod memory;
pub mod postgres;

pub use memory::{InMemoryInventoryStore, InMemorySaleLedger};
pub use postgres::{PgInventoryStore, PgSaleLedger};
