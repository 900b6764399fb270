//! # Bill State
//!
//! Generated bills, held in process memory with their sequence counter.
//!
//! ## Creating a Bill
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  NewBill                                                               │
//! │     │                                                                   │
//! │     ▼   inventory lock held ──────────────────────────────┐            │
//! │  resolve_lines(form, shelf)   any line short? → Err, shelf untouched   │
//! │     │                                                      │            │
//! │     ▼                                                      │            │
//! │  shelf.quantity -= demand   (every stock line at once)     │            │
//! │     │   ───────────────────────────────────────────────────┘            │
//! │     ▼   bill book lock held                                            │
//! │  build_bill(seq) → push                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Locks are always taken inventory first, then bills, and never both at
//! once.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use medix_core::bill::{build_bill, resolve_lines, stock_demand};
use medix_core::{Bill, BillFilter, CoreError, CoreResult, NewBill, TaxRate};
use tracing::{debug, info};

use super::inventory::InventoryState;

#[derive(Debug)]
struct BillBook {
    bills: Vec<Bill>,
    next_seq: u64,
}

impl Default for BillBook {
    fn default() -> Self {
        BillBook {
            bills: Vec::new(),
            next_seq: 1,
        }
    }
}

/// Shared handle to the bill book.
#[derive(Debug, Clone, Default)]
pub struct BillState {
    book: Arc<Mutex<BillBook>>,
}

impl BillState {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_book<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut BillBook) -> R,
    {
        let mut book = self.book.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut book)
    }

    /// Prices the form, takes the stock-linked quantities off the shelf and
    /// records the bill.
    ///
    /// Either every stock line is decremented or none is.
    pub fn create(
        &self,
        inventory: &InventoryState,
        input: &NewBill,
        today: NaiveDate,
        default_tax: TaxRate,
    ) -> CoreResult<Bill> {
        let items = inventory.with_stock_mut(|shelf| {
            let items = resolve_lines(&input.items, shelf, today)?;
            for (id, quantity) in stock_demand(&items) {
                if let Some(item) = shelf.iter_mut().find(|s| s.id == id) {
                    item.adjust(-quantity)?;
                }
            }
            Ok::<_, CoreError>(items)
        })?;

        let bill = self.with_book(|book| {
            let bill = build_bill(input, items, book.next_seq, today, default_tax);
            book.next_seq += 1;
            book.bills.push(bill.clone());
            bill
        });

        info!(
            bill_number = %bill.bill_number,
            lines = bill.items.len(),
            total = %bill.total(),
            "Bill created"
        );
        Ok(bill)
    }

    /// Bills matching the filter, newest first.
    pub fn list(&self, filter: &BillFilter) -> Vec<Bill> {
        let term = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut bills: Vec<Bill> = self.with_book(|book| {
            book.bills
                .iter()
                .filter(|b| filter.from.map_or(true, |from| b.date >= from))
                .filter(|b| filter.to.map_or(true, |to| b.date <= to))
                .filter(|b| term.as_deref().map_or(true, |t| bill_matches(b, t)))
                .cloned()
                .collect()
        });
        bills.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));

        debug!(count = bills.len(), "Bills listed");
        bills
    }

    pub fn get(&self, id: &str) -> CoreResult<Bill> {
        self.with_book(|book| book.bills.iter().find(|b| b.id == id).cloned())
            .ok_or_else(|| CoreError::BillNotFound(id.to_string()))
    }

    pub fn snapshot(&self) -> Vec<Bill> {
        self.with_book(|book| book.bills.clone())
    }
}

fn bill_matches(bill: &Bill, term: &str) -> bool {
    bill.patient_name.to_lowercase().contains(term)
        || bill.bill_number.to_lowercase().contains(term)
        || bill
            .doctor_name
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(term))
}

#[cfg(test)]
mod tests {
    use super::*;
    use medix_core::{NewBillItem, NewStockItem};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn shelf() -> (InventoryState, String, String) {
        let inventory = InventoryState::new();
        let a = inventory.create(&NewStockItem {
            name: "Amoxicillin 250mg".into(),
            batch: "AMX-7".into(),
            quantity: 10,
            expiry_date: day(30),
            threshold: 2,
            unit_price_cents: 800,
        });
        let b = inventory.create(&NewStockItem {
            name: "ORS Sachet".into(),
            batch: "ORS-2".into(),
            quantity: 3,
            expiry_date: day(30),
            threshold: 2,
            unit_price_cents: 2000,
        });
        (inventory, a.id, b.id)
    }

    fn line(id: &str, quantity: i64) -> NewBillItem {
        NewBillItem {
            stock_item_id: Some(id.to_string()),
            name: None,
            batch: None,
            quantity,
            unit_price_cents: None,
        }
    }

    fn form(patient: &str, items: Vec<NewBillItem>) -> NewBill {
        NewBill {
            patient_name: patient.into(),
            doctor_name: Some("Dr. Rao".into()),
            date: None,
            items,
            discount_bps: 0,
            tax_rate_bps: None,
        }
    }

    #[test]
    fn test_create_decrements_stock_and_numbers_bills() {
        let (inventory, a, b) = shelf();
        let bills = BillState::new();

        let first = bills
            .create(&inventory, &form("Kiran", vec![line(&a, 4), line(&b, 1)]), day(1), TaxRate::zero())
            .unwrap();
        assert_eq!(first.bill_number, "INV-00001");
        assert_eq!(first.total_cents, 4 * 800 + 2000);
        assert_eq!(inventory.get(&a).unwrap().quantity, 6);
        assert_eq!(inventory.get(&b).unwrap().quantity, 2);

        let second = bills
            .create(&inventory, &form("Latha", vec![line(&a, 1)]), day(2), TaxRate::zero())
            .unwrap();
        assert_eq!(second.bill_number, "INV-00002");
    }

    #[test]
    fn test_short_line_leaves_shelf_untouched() {
        let (inventory, a, b) = shelf();
        let bills = BillState::new();

        let err = bills
            .create(&inventory, &form("Kiran", vec![line(&a, 5), line(&b, 4)]), day(1), TaxRate::zero())
            .unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { .. }));
        assert_eq!(inventory.get(&a).unwrap().quantity, 10);
        assert_eq!(inventory.get(&b).unwrap().quantity, 3);
        assert!(bills.snapshot().is_empty());
    }

    #[test]
    fn test_list_filters_and_orders_newest_first() {
        let (inventory, a, _) = shelf();
        let bills = BillState::new();
        let mut old = form("Kiran", vec![line(&a, 1)]);
        old.date = Some(day(1));
        bills.create(&inventory, &old, day(5), TaxRate::zero()).unwrap();
        bills
            .create(&inventory, &form("Latha", vec![line(&a, 1)]), day(5), TaxRate::zero())
            .unwrap();

        let all = bills.list(&BillFilter::default());
        assert_eq!(all[0].patient_name, "Latha");

        let by_patient = bills.list(&BillFilter {
            search: Some("kir".into()),
            ..Default::default()
        });
        assert_eq!(by_patient.len(), 1);

        let by_number = bills.list(&BillFilter {
            search: Some("inv-00002".into()),
            ..Default::default()
        });
        assert_eq!(by_number[0].patient_name, "Latha");

        let ranged = bills.list(&BillFilter {
            from: Some(day(2)),
            ..Default::default()
        });
        assert_eq!(ranged.len(), 1);

        assert!(matches!(bills.get("missing"), Err(CoreError::BillNotFound(_))));
    }
}
