//! # medix-core: Pure Business Logic for the Medix Pharmacy POS
//!
//! This crate contains the pharmacy's business rules as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Medix Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Pharmacy pages (browser)                     │   │
//! │  │   Bill ──► Stock Entry ──► Staff ──► Settings ──► Reports       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON over HTTP                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    medix-api (axum routes)                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ medix-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────┐ │   │
//! │  │   │  types   │ │  money   │ │   bill   │ │validation│ │report│ │   │
//! │  │   │  Staff   │ │  Money   │ │  totals  │ │  rules   │ │ sums │ │   │
//! │  │   │  Stock   │ │ TaxRate  │ │  lines   │ │  checks  │ │      │ │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘ └──────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    medix-db (Database Layer)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (StaffMember, PharmacyProfile, StockItem, Bill)
//! - [`money`] - Money type with integer arithmetic
//! - [`bill`] - Bill line and total computation
//! - [`stock`] - Stock status evaluation and filtering
//! - [`report`] - Sales and stock summaries
//! - [`validation`] - Form field validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use medix_core::money::Money;
//! use medix_core::types::TaxRate;
//!
//! let price = Money::from_cents(1099);
//! let tax = price.calculate_tax(TaxRate::from_bps(1200)); // 12% GST
//! assert_eq!(tax.cents(), 132);
//! ```

pub mod bill;
pub mod error;
pub mod money;
pub mod report;
pub mod stock;
pub mod types;
pub mod validation;

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

/// Fixed key of the singleton pharmacy profile row.
pub const PHARMACY_PROFILE_ID: &str = "pharmacy-profile";

/// Maximum line items on a single bill.
pub const MAX_BILL_ITEMS: usize = 50;

/// Maximum quantity of a single bill line.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Days ahead of expiry at which stock is reported as expiring soon.
pub const DEFAULT_EXPIRY_WINDOW_DAYS: i64 = 30;

/// Longest expiry look-ahead accepted, in days.
pub const MAX_EXPIRY_WINDOW_DAYS: i64 = 36_500;

/// Highest unit price accepted, in paise (₹1,00,00,000).
pub const MAX_UNIT_PRICE_CENTS: i64 = 1_000_000_000;

/// Most units a single shelf item may hold.
///
/// With the price cap this keeps every line, bill and inventory total far
/// inside `i64`.
pub const MAX_STOCK_QUANTITY: i64 = 1_000_000;
