//! # State Module
//!
//! Shared application state handed to every route through axum's `State`.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  AppState (Clone, every field is a shared handle)                      │
//! │     │                                                                   │
//! │     ├── db: Database            SQLite pool: staff, pharmacy profile   │
//! │     ├── inventory: InventoryState   Arc<Mutex<Vec<StockItem>>>          │
//! │     ├── bills: BillState            Arc<Mutex<BillBook>>                │
//! │     ├── session: SessionState       Arc<Mutex<Option<Session>>>         │
//! │     ├── realtime: RealtimeState     Arc<RwLock<HashMap<id, client>>>    │
//! │     └── config: Arc<ApiConfig>      read-only after startup            │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Database has its own pool                                           │
//! │  • Each in-memory store has its own lock; none is held across .await   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod bills;
mod inventory;
pub mod sample;
mod session;

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use medix_db::Database;

use crate::config::ApiConfig;
use crate::realtime::RealtimeState;

pub use bills::BillState;
pub use inventory::InventoryState;
pub use session::{Session, SessionState};

#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<ApiConfig>,
    pub inventory: InventoryState,
    pub bills: BillState,
    pub session: SessionState,
    pub realtime: RealtimeState,
}

impl AppState {
    /// Builds the state with empty in-memory stores.
    pub fn new(db: Database, config: ApiConfig) -> Self {
        AppState {
            db,
            config: Arc::new(config),
            inventory: InventoryState::new(),
            bills: BillState::new(),
            session: SessionState::new(),
            realtime: RealtimeState::new(),
        }
    }

    /// Loads the sample shelf and bills.
    pub fn seed_sample_data(&self) {
        sample::load(
            &self.inventory,
            &self.bills,
            today(),
            self.config.default_tax_rate(),
        );
    }
}

/// The business date: the server's local calendar day.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// State backed by an in-memory database and empty stores.
#[cfg(test)]
pub(crate) async fn test_state() -> AppState {
    use medix_db::DbConfig;

    let db = Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory database");
    AppState::new(db, ApiConfig::default())
}
