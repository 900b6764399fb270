//! # Medix API
//!
//! JSON API behind the pharmacy pages.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Medix API Server                                │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  Staff         │  │  Pharmacy      │  │  Stock / Bills / Reports   ││
//! │  │                │  │                │  │                            ││
//! │  │ • list/search  │  │ • get (or null)│  │ • shelf CRUD + adjust      ││
//! │  │ • create/edit  │  │ • save (upsert)│  │ • bill creation            ││
//! │  │ • delete       │  │                │  │ • sales / stock summaries  ││
//! │  └───────┬────────┘  └───────┬────────┘  └─────────────┬──────────────┘│
//! │          │                   │                          │               │
//! │          ▼                   ▼                          ▼               │
//! │  ┌──────────────────────────────────┐  ┌────────────────────────────┐  │
//! │  │  SQLite (medix-db)               │  │  In-memory stores          │  │
//! │  │  staff, pharmacy_profile         │  │  shelf, bill book, session │  │
//! │  └──────────────────────────────────┘  └────────────────────────────┘  │
//! │                                                                         │
//! │  /ws: connection registry only, no messages                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `HTTP_PORT` - listen port (default: 3000)
//! - `BIND_ADDR` - listen interface (default: 0.0.0.0)
//! - `DATABASE_PATH` - SQLite file (default: ./data/medix.db)
//! - `DB_MAX_CONNECTIONS` - pool size (default: 5)
//! - `SEED_SAMPLE_DATA` - load sample stock and bills (default: true)
//! - `EXPIRY_WINDOW_DAYS` - "expiring soon" window (default: 30)
//! - `DEFAULT_TAX_RATE_BPS` - tax for bills without a rate (default: 0)
//! - `RUST_LOG` - log filter

pub mod config;
pub mod error;
pub mod extract;
pub mod realtime;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::build_router;
pub use state::AppState;
