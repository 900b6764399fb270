//! # Bill Computation
//!
//! Turns a bill form into priced lines and totals.
//!
//! ## Bill Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  NewBill (form)                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  resolve_lines()  ── stock line? ──► freeze name/batch/price from shelf │
//! │       │           ── free-form?  ──► use name/price from the form       │
//! │       │           ── demand > shelf quantity? ──► InsufficientStock     │
//! │       ▼                                                                 │
//! │  compute_totals()                                                       │
//! │       subtotal  = Σ line totals                                         │
//! │       discount  = subtotal × discount%                                  │
//! │       tax       = (subtotal − discount) × tax%                          │
//! │       total     = subtotal − discount + tax                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  build_bill() ──► Bill { bill_number: "INV-00042", … }                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Bill, BillItem, NewBill, NewBillItem, StockItem, TaxRate};
use crate::{MAX_BILL_ITEMS, MAX_ITEM_QUANTITY};

impl BillItem {
    /// Prices a line from a shelf item, freezing its name, batch and price.
    pub fn from_stock(item: &StockItem, quantity: i64) -> Self {
        BillItem {
            stock_item_id: Some(item.id.clone()),
            name: item.name.clone(),
            batch: Some(item.batch.clone()),
            quantity,
            unit_price_cents: item.unit_price_cents,
            line_total_cents: item.unit_price().multiply_quantity(quantity).cents(),
        }
    }

    /// Prices a free-form line (items not tracked on the shelf).
    pub fn free_form(
        name: impl Into<String>,
        batch: Option<String>,
        quantity: i64,
        unit_price_cents: i64,
    ) -> Self {
        BillItem {
            stock_item_id: None,
            name: name.into(),
            batch,
            quantity,
            unit_price_cents,
            line_total_cents: Money::from_cents(unit_price_cents)
                .multiply_quantity(quantity)
                .cents(),
        }
    }

    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

/// Computed money fields of a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillTotals {
    pub subtotal: Money,
    pub discount: Money,
    pub tax: Money,
    pub total: Money,
}

/// Computes subtotal, discount, tax and total for priced lines.
///
/// Tax applies after the discount.
pub fn compute_totals(items: &[BillItem], discount_bps: u32, tax_rate: TaxRate) -> BillTotals {
    let subtotal: Money = items.iter().map(BillItem::line_total).sum();
    let discount = subtotal.percentage(discount_bps);
    let taxable = subtotal - discount;
    let tax = taxable.calculate_tax(tax_rate);

    BillTotals {
        subtotal,
        discount,
        tax,
        total: taxable + tax,
    }
}

/// Prices every line of a bill form against the current shelf.
///
/// Stock-linked lines must reference an existing, unexpired item, and the
/// summed demand per item across lines must not exceed its quantity.
/// Nothing is mutated; the caller decrements stock with [`stock_demand`].
pub fn resolve_lines(
    lines: &[NewBillItem],
    stock: &[StockItem],
    today: NaiveDate,
) -> CoreResult<Vec<BillItem>> {
    if lines.len() > MAX_BILL_ITEMS {
        return Err(CoreError::BillTooLarge {
            max: MAX_BILL_ITEMS,
        });
    }

    let by_id: HashMap<&str, &StockItem> = stock.iter().map(|s| (s.id.as_str(), s)).collect();
    let mut demand: HashMap<&str, i64> = HashMap::new();
    let mut items = Vec::with_capacity(lines.len());

    for line in lines {
        if line.quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: line.quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        let Some(stock_id) = line.stock_item_id.as_deref() else {
            items.push(BillItem::free_form(
                line.name.as_deref().unwrap_or_default().trim(),
                line.batch.clone().filter(|b| !b.trim().is_empty()),
                line.quantity,
                line.unit_price_cents.unwrap_or_default(),
            ));
            continue;
        };

        let shelf = by_id
            .get(stock_id)
            .copied()
            .ok_or_else(|| CoreError::StockItemNotFound(stock_id.to_string()))?;

        if shelf.expiry_date < today {
            return Err(CoreError::ExpiredStock {
                item: shelf.label(),
                expiry: shelf.expiry_date.to_string(),
            });
        }

        let requested = demand.entry(shelf.id.as_str()).or_insert(0);
        *requested += line.quantity;
        if *requested > shelf.quantity {
            return Err(CoreError::InsufficientStock {
                item: shelf.label(),
                available: shelf.quantity,
                requested: *requested,
            });
        }

        items.push(BillItem::from_stock(shelf, line.quantity));
    }

    Ok(items)
}

/// Units to take off the shelf per stock item id.
pub fn stock_demand(items: &[BillItem]) -> HashMap<String, i64> {
    let mut demand = HashMap::new();
    for item in items {
        if let Some(id) = &item.stock_item_id {
            *demand.entry(id.clone()).or_insert(0) += item.quantity;
        }
    }
    demand
}

/// Formats a bill sequence number: `INV-00001`.
pub fn format_bill_number(seq: u64) -> String {
    format!("INV-{:05}", seq)
}

/// Assembles a bill from priced lines.
pub fn build_bill(
    input: &NewBill,
    items: Vec<BillItem>,
    seq: u64,
    today: NaiveDate,
    default_tax: TaxRate,
) -> Bill {
    let tax_rate = input.tax_rate_bps.map(TaxRate::from_bps).unwrap_or(default_tax);
    let totals = compute_totals(&items, input.discount_bps, tax_rate);

    Bill {
        id: Uuid::new_v4().to_string(),
        bill_number: format_bill_number(seq),
        patient_name: input.patient_name.trim().to_string(),
        doctor_name: input
            .doctor_name
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string),
        date: input.date.unwrap_or(today),
        items,
        subtotal_cents: totals.subtotal.cents(),
        discount_bps: input.discount_bps,
        discount_cents: totals.discount.cents(),
        tax_rate_bps: tax_rate.bps(),
        tax_cents: totals.tax.cents(),
        total_cents: totals.total.cents(),
        created_at: Utc::now(),
    }
}
