//! # Domain Types
//!
//! Core domain types used throughout the Medix pharmacy POS.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  StaffMember    │   │ PharmacyProfile │   │   StockItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (fixed key) │   │  id (UUID)      │       │
//! │  │  username       │   │  license_number │   │  batch          │       │
//! │  │  status         │   │  address…       │   │  expiry_date    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │        SQLite                SQLite               in-memory             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │      Bill       │──►│    BillItem     │   in-memory                 │
//! │  │  bill_number    │   │  quantity       │                             │
//! │  │  total_cents    │   │  line_total     │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All API-facing types serialize as camelCase and export TypeScript
//! definitions for the pharmacy pages.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (1200 = 12%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

// =============================================================================
// Staff
// =============================================================================

/// Whether a staff member may sign in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
pub enum StaffStatus {
    #[default]
    #[serde(alias = "active")]
    Active,
    #[serde(alias = "disabled")]
    Disabled,
}

impl StaffStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffStatus::Active => "active",
            StaffStatus::Disabled => "disabled",
        }
    }
}

impl fmt::Display for StaffStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaffStatus::Active => f.write_str("Active"),
            StaffStatus::Disabled => f.write_str("Disabled"),
        }
    }
}

/// A pharmacy staff account.
///
/// Passwords are never part of this type: they are accepted on create and
/// update requests, validated, and dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StaffMember {
    /// Unique identifier (UUID v4).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Sign-in name, unique.
    pub username: String,
    /// Contact email, unique.
    pub email: String,
    pub status: StaffStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl StaffMember {
    pub fn is_active(&self) -> bool {
        self.status == StaffStatus::Active
    }
}

/// Body of the "Add staff" form.
#[derive(Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewStaffMember {
    pub name: String,
    pub username: String,
    pub email: String,
    /// Checked for length only; never stored.
    pub password: String,
    #[serde(default)]
    pub status: StaffStatus,
}

impl fmt::Debug for NewStaffMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewStaffMember")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("status", &self.status)
            .finish()
    }
}

/// Body of the "Edit staff" form. Absent fields are left unchanged.
#[derive(Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StaffUpdate {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub status: Option<StaffStatus>,
    /// Checked for length only; never stored.
    pub password: Option<String>,
}

impl StaffUpdate {
    /// True when the update would not change any stored column.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.username.is_none()
            && self.email.is_none()
            && self.status.is_none()
    }

    /// Returns the member with this update's fields applied.
    pub fn apply_to(&self, member: &StaffMember) -> StaffMember {
        StaffMember {
            id: member.id.clone(),
            name: self
                .name
                .as_deref()
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|| member.name.clone()),
            username: self
                .username
                .as_deref()
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|| member.username.clone()),
            email: self
                .email
                .as_deref()
                .map(|s| s.trim().to_lowercase())
                .unwrap_or_else(|| member.email.clone()),
            status: self.status.unwrap_or(member.status),
            created_at: member.created_at,
            updated_at: Utc::now(),
        }
    }
}

impl fmt::Debug for StaffUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaffUpdate")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("status", &self.status)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Query of the staff list page.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StaffFilter {
    pub status: Option<StaffStatus>,
    /// Matched against name, username and email.
    pub search: Option<String>,
}

// =============================================================================
// Pharmacy Profile
// =============================================================================

/// The pharmacy's own details, printed on bills and shown in settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PharmacyProfile {
    /// Always [`crate::PHARMACY_PROFILE_ID`].
    pub id: String,
    pub pharmacy_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub phone: String,
    pub email: Option<String>,
    /// Drug license number.
    pub license_number: String,
    /// GST / tax registration number.
    pub tax_id: Option<String>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Body of the settings form.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PharmacyProfileInput {
    pub pharmacy_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postal_code: String,
    pub phone: String,
    pub email: Option<String>,
    pub license_number: String,
    pub tax_id: Option<String>,
}

// =============================================================================
// Stock
// =============================================================================

/// One batch of a medicine on the shelf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockItem {
    pub id: String,
    pub name: String,
    pub batch: String,
    pub quantity: i64,
    #[ts(as = "String")]
    pub expiry_date: NaiveDate,
    /// At or below this quantity the item is reported as low stock.
    pub threshold: i64,
    pub unit_price_cents: i64,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl StockItem {
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// "Name (batch)" label used in bills and error messages.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.batch)
    }
}

/// Shelf state derived from quantity, threshold and expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
    Expired,
}

/// A stock item together with its computed status, as listed on the stock page.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockItemView {
    #[serde(flatten)]
    pub item: StockItem,
    pub status: StockStatus,
}

/// Body of the stock entry form.
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewStockItem {
    pub name: String,
    pub batch: String,
    pub quantity: i64,
    #[ts(as = "String")]
    pub expiry_date: NaiveDate,
    #[serde(default = "default_threshold")]
    pub threshold: i64,
    #[serde(default)]
    pub unit_price_cents: i64,
}

fn default_threshold() -> i64 {
    10
}

/// Partial stock edit. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockUpdate {
    pub name: Option<String>,
    pub batch: Option<String>,
    pub quantity: Option<i64>,
    #[ts(as = "Option<String>")]
    pub expiry_date: Option<NaiveDate>,
    pub threshold: Option<i64>,
    pub unit_price_cents: Option<i64>,
}

impl StockUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.batch.is_none()
            && self.quantity.is_none()
            && self.expiry_date.is_none()
            && self.threshold.is_none()
            && self.unit_price_cents.is_none()
    }
}

/// Signed quantity change (receipt of goods, breakage, returns).
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockAdjustment {
    pub delta: i64,
    pub reason: Option<String>,
}

/// Query of the stock page.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockFilter {
    pub status: Option<StockStatus>,
    /// Matched against name and batch.
    pub search: Option<String>,
    /// Only items expiring within this many days (expired items included).
    pub expiring_within_days: Option<i64>,
}

// =============================================================================
// Bills
// =============================================================================

/// A generated bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Bill {
    pub id: String,
    /// Human-readable sequence number, e.g. `INV-00042`.
    pub bill_number: String,
    pub patient_name: String,
    pub doctor_name: Option<String>,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub items: Vec<BillItem>,
    pub subtotal_cents: i64,
    pub discount_bps: u32,
    pub discount_cents: i64,
    pub tax_rate_bps: u32,
    pub tax_cents: i64,
    pub total_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Bill {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Units across all lines.
    pub fn units(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

/// A bill line. Name, batch and price are frozen at billing time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BillItem {
    pub stock_item_id: Option<String>,
    pub name: String,
    pub batch: Option<String>,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
}

/// Body of the bill creation form.
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewBill {
    pub patient_name: String,
    pub doctor_name: Option<String>,
    /// Defaults to today.
    #[ts(as = "Option<String>")]
    pub date: Option<NaiveDate>,
    pub items: Vec<NewBillItem>,
    #[serde(default)]
    pub discount_bps: u32,
    /// Defaults to the server's configured rate.
    pub tax_rate_bps: Option<u32>,
}

/// One line of the bill form.
///
/// A line either references a stock item (name, batch and price come from
/// the shelf) or is free-form (name and price required).
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewBillItem {
    pub stock_item_id: Option<String>,
    pub name: Option<String>,
    pub batch: Option<String>,
    pub quantity: i64,
    pub unit_price_cents: Option<i64>,
}

/// Query of the bills page.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BillFilter {
    #[ts(as = "Option<String>")]
    pub from: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub to: Option<NaiveDate>,
    /// Matched against patient, doctor and bill number.
    pub search: Option<String>,
}

// =============================================================================
// Reports
// =============================================================================

/// Inclusive date range of a report.
#[derive(Debug, Clone, Copy, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReportRange {
    #[ts(as = "Option<String>")]
    pub from: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub to: Option<NaiveDate>,
}

impl ReportRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

/// Sales totals over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SalesReport {
    #[ts(as = "Option<String>")]
    pub from: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub to: Option<NaiveDate>,
    pub bill_count: usize,
    pub units_sold: i64,
    pub gross_cents: i64,
    pub discount_cents: i64,
    pub tax_cents: i64,
    pub net_cents: i64,
    pub daily: Vec<DailySales>,
}

/// One row of the sales report, per bill date.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DailySales {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub bill_count: usize,
    pub units_sold: i64,
    pub total_cents: i64,
}

/// Shelf summary.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockReport {
    pub total_items: usize,
    pub total_units: i64,
    /// Σ quantity × unit price over unexpired items.
    pub inventory_value_cents: i64,
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
    pub expired: usize,
    pub expiring_soon: usize,
    pub expiry_window_days: i64,
}
