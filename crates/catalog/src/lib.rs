//! Catalog domain module.
//!
//! This crate contains the product entity shared by all three categories
//! (cars, phones, TVs), its validation rules, and the store port the rest of
//! the system consumes. No IO, no HTTP, no storage.

pub mod product;
pub mod store;

pub use product::{Product, ProductCategory, ProductDetails};
pub use store::InventoryStore;
