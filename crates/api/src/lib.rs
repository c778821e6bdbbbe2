//! HTTP API for the inventory-and-sales backend.

pub mod app;
