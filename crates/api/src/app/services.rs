//! Service wiring: store selection and the shared handler state.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

use vendora_catalog::InventoryStore;
use vendora_infra::{InMemoryInventoryStore, InMemorySaleLedger, PgInventoryStore, PgSaleLedger};
use vendora_sales::{SaleLedger, SaleProcessor};

/// Shared handles injected into every handler via `Extension`.
#[derive(Clone)]
pub struct AppServices {
    pub inventory: Arc<dyn InventoryStore>,
    pub ledger: Arc<dyn SaleLedger>,
    pub processor: Arc<SaleProcessor>,
}

impl AppServices {
    pub fn new(inventory: Arc<dyn InventoryStore>, ledger: Arc<dyn SaleLedger>) -> Self {
        let processor = Arc::new(SaleProcessor::new(inventory.clone(), ledger.clone()));
        Self {
            inventory,
            ledger,
            processor,
        }
    }
}

/// Pick the store backend from the environment.
///
/// `USE_PERSISTENT_STORES=true` selects Postgres (requires `DATABASE_URL`);
/// anything else wires the in-memory stores for dev/test.
pub async fn build_services() -> AppServices {
    let use_persistent = std::env::var("USE_PERSISTENT_STORES")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);

    if use_persistent {
        build_persistent_services().await
    } else {
        build_in_memory_services()
    }
}

pub fn build_in_memory_services() -> AppServices {
    AppServices::new(
        Arc::new(InMemoryInventoryStore::new()),
        Arc::new(InMemorySaleLedger::new()),
    )
}

async fn build_persistent_services() -> AppServices {
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set when USE_PERSISTENT_STORES=true");

    // Bounded acquire timeout so a saturated pool fails requests instead of
    // hanging them.
    let pool = PgPoolOptions::new()
        .max_connections(16)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&database_url)
        .await
        .expect("Failed to connect to Postgres");

    AppServices::new(
        Arc::new(PgInventoryStore::new(pool.clone())),
        Arc::new(PgSaleLedger::new(pool)),
    )
}
