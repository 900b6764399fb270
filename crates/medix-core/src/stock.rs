//! # Stock Evaluation
//!
//! Shelf status rules and the stock page filters.
//!
//! ## Status Precedence
//! ```text
//! expiry < today          → Expired      (checked first: never sell)
//! quantity == 0           → OutOfStock
//! quantity <= threshold   → LowStock
//! otherwise               → InStock
//! ```

use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{NewStockItem, StockFilter, StockItem, StockItemView, StockStatus, StockUpdate};
use crate::MAX_STOCK_QUANTITY;

impl StockItem {
    /// Creates a shelf item from the stock entry form.
    pub fn from_input(input: &NewStockItem) -> Self {
        StockItem {
            id: Uuid::new_v4().to_string(),
            name: input.name.trim().to_string(),
            batch: input.batch.trim().to_string(),
            quantity: input.quantity,
            expiry_date: input.expiry_date,
            threshold: input.threshold,
            unit_price_cents: input.unit_price_cents,
            updated_at: Utc::now(),
        }
    }

    pub fn status(&self, today: NaiveDate) -> StockStatus {
        if self.expiry_date < today {
            StockStatus::Expired
        } else if self.quantity == 0 {
            StockStatus::OutOfStock
        } else if self.quantity <= self.threshold {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    /// True when the item expires on or before `today + days`. A window
    /// reaching past the last representable date covers every item.
    pub fn expires_within(&self, today: NaiveDate, days: i64) -> bool {
        match Duration::try_days(days).and_then(|d| today.checked_add_signed(d)) {
            Some(limit) => self.expiry_date <= limit,
            None => days > 0,
        }
    }

    pub fn view(&self, today: NaiveDate) -> StockItemView {
        StockItemView {
            item: self.clone(),
            status: self.status(today),
        }
    }

    /// Applies a partial edit in place.
    pub fn apply(&mut self, update: &StockUpdate) {
        if let Some(name) = &update.name {
            self.name = name.trim().to_string();
        }
        if let Some(batch) = &update.batch {
            self.batch = batch.trim().to_string();
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(expiry) = update.expiry_date {
            self.expiry_date = expiry;
        }
        if let Some(threshold) = update.threshold {
            self.threshold = threshold;
        }
        if let Some(price) = update.unit_price_cents {
            self.unit_price_cents = price;
        }
        self.updated_at = Utc::now();
    }

    /// Adds a signed delta to the quantity. The result must stay within
    /// `0..=MAX_STOCK_QUANTITY`; on error the quantity is unchanged.
    pub fn adjust(&mut self, delta: i64) -> CoreResult<()> {
        let next = match self.quantity.checked_add(delta) {
            Some(next) if next < 0 => {
                return Err(CoreError::InsufficientStock {
                    item: self.label(),
                    available: self.quantity,
                    requested: delta.saturating_neg(),
                });
            }
            Some(next) if next <= MAX_STOCK_QUANTITY => next,
            _ => {
                return Err(ValidationError::OutOfRange {
                    field: "quantity".to_string(),
                    min: 0,
                    max: MAX_STOCK_QUANTITY,
                }
                .into());
            }
        };
        self.quantity = next;
        self.updated_at = Utc::now();
        Ok(())
    }
}

impl StockFilter {
    pub fn matches(&self, item: &StockItem, today: NaiveDate) -> bool {
        if let Some(status) = self.status {
            if item.status(today) != status {
                return false;
            }
        }

        if let Some(days) = self.expiring_within_days {
            if !item.expires_within(today, days) {
                return false;
            }
        }

        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                item.name.to_lowercase().contains(&term) || item.batch.to_lowercase().contains(&term)
            }
            _ => true,
        }
    }
}
