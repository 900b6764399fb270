//! # medix-db: Database Layer for the Medix Pharmacy POS
//!
//! SQLite storage for the records that must survive a restart: staff
//! accounts and the pharmacy profile. Uses sqlx for async access.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Medix Data Flow                                  │
//! │                                                                         │
//! │  HTTP route (GET /api/staff)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     medix-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ StaffRepo     │    │ 001_initial  │  │   │
//! │  │   │ SqlitePool    │◄───│ ProfileRepo   │    │ _schema.sql  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ./data/medix.db (DATABASE_PATH)                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use medix_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./data/medix.db")).await?;
//!
//! let staff = db.staff().list(&StaffFilter::default()).await?;
//! let profile = db.pharmacy_profile().get().await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use migrations::MigrationStatus;
pub use pool::{Database, DbConfig, StoreLocation};

pub use repository::profile::PharmacyProfileRepository;
pub use repository::staff::StaffRepository;
