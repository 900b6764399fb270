//! # Reports
//!
//! Sales and shelf summaries for the reports page. Both are plain folds over
//! the current bills and stock; nothing is cached.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::types::{
    Bill, DailySales, ReportRange, SalesReport, StockItem, StockReport, StockStatus,
};

/// Summarizes bills dated within `range` (inclusive on both ends).
///
/// Daily rows come out sorted by date.
pub fn sales_report<'a, I>(bills: I, range: ReportRange) -> SalesReport
where
    I: IntoIterator<Item = &'a Bill>,
{
    let mut report = SalesReport {
        from: range.from,
        to: range.to,
        bill_count: 0,
        units_sold: 0,
        gross_cents: 0,
        discount_cents: 0,
        tax_cents: 0,
        net_cents: 0,
        daily: Vec::new(),
    };
    let mut days: BTreeMap<NaiveDate, DailySales> = BTreeMap::new();

    for bill in bills.into_iter().filter(|b| range.contains(b.date)) {
        let units = bill.units();

        report.bill_count += 1;
        report.units_sold += units;
        report.gross_cents += bill.subtotal_cents;
        report.discount_cents += bill.discount_cents;
        report.tax_cents += bill.tax_cents;
        report.net_cents += bill.total_cents;

        let row = days.entry(bill.date).or_insert(DailySales {
            date: bill.date,
            bill_count: 0,
            units_sold: 0,
            total_cents: 0,
        });
        row.bill_count += 1;
        row.units_sold += units;
        row.total_cents += bill.total_cents;
    }

    report.daily = days.into_values().collect();
    report
}

/// Summarizes the shelf as of `today`.
///
/// Inventory value excludes expired batches; `expiring_soon` counts unexpired
/// batches that expire within `expiry_window_days`.
pub fn stock_report<'a, I>(items: I, today: NaiveDate, expiry_window_days: i64) -> StockReport
where
    I: IntoIterator<Item = &'a StockItem>,
{
    let mut report = StockReport {
        total_items: 0,
        total_units: 0,
        inventory_value_cents: 0,
        in_stock: 0,
        low_stock: 0,
        out_of_stock: 0,
        expired: 0,
        expiring_soon: 0,
        expiry_window_days,
    };

    for item in items {
        report.total_items += 1;
        report.total_units += item.quantity;

        let status = item.status(today);
        match status {
            StockStatus::InStock => report.in_stock += 1,
            StockStatus::LowStock => report.low_stock += 1,
            StockStatus::OutOfStock => report.out_of_stock += 1,
            StockStatus::Expired => report.expired += 1,
        }

        if status != StockStatus::Expired {
            let value = item.unit_price().multiply_quantity(item.quantity).cents();
            report.inventory_value_cents = report.inventory_value_cents.saturating_add(value);
            if item.expires_within(today, expiry_window_days) {
                report.expiring_soon += 1;
            }
        }
    }

    report
}
