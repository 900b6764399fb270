//! # Repository Module
//!
//! Database repositories for the Medix pharmacy POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Route handler                                                         │
//! │       │                                                                 │
//! │       │  db.staff().list(&filter)                                      │
//! │       ▼                                                                 │
//! │  StaffRepository                                                       │
//! │  ├── list(&self, filter)                                               │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── insert(&self, new_member)                                         │
//! │  ├── update(&self, id, update)                                         │
//! │  └── delete(&self, id)                                                 │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`StaffRepository`](staff::StaffRepository) - Staff CRUD and search
//! - [`PharmacyProfileRepository`](profile::PharmacyProfileRepository) - Singleton profile get/upsert

pub mod profile;
pub mod staff;
