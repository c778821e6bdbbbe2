//! Sales domain module: the sale workflow engine.
//!
//! Contains the immutable [`Sale`] record and its ledger port, the
//! [`SaleProcessor`] that turns a sale request into a stock debit plus a
//! ledger entry, and the report period normalizer.

pub mod period;
pub mod processor;
pub mod sale;

pub use period::{ReportPeriod, SaleReport};
pub use processor::{SaleError, SaleProcessor, SaleReceipt};
pub use sale::{Sale, SaleLedger};
