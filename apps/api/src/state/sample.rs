//! Sample shelf and bills loaded at startup when `SEED_SAMPLE_DATA` is on.
//!
//! Expiry and bill dates are relative to the day the server starts, so the
//! stock page always shows a mix of healthy, low, empty and expired batches.

use chrono::{Duration, NaiveDate};
use medix_core::{NewBill, NewBillItem, NewStockItem, TaxRate};
use tracing::{info, warn};

use super::bills::BillState;
use super::inventory::InventoryState;

/// (name, batch, quantity, days until expiry, threshold, unit price in paise)
const SHELF: &[(&str, &str, i64, i64, i64, i64)] = &[
    ("Paracetamol 500mg", "PCM-2406", 240, 540, 50, 150),
    ("Amoxicillin 250mg", "AMX-0711", 60, 300, 20, 850),
    ("Cetirizine 10mg", "CTZ-1903", 8, 400, 15, 250),
    ("Pantoprazole 40mg", "PAN-0412", 90, 20, 25, 1200),
    ("Azithromycin 500mg", "AZI-3301", 0, 365, 10, 2400),
    ("ORS Sachet", "ORS-0220", 35, -10, 10, 2000),
    ("Metformin 500mg", "MET-0918", 150, 700, 40, 300),
    ("Cough Syrup 100ml", "CSY-1102", 18, 12, 10, 9500),
];

/// (patient, doctor, days ago, [(shelf index, quantity)])
const BILLS: &[(&str, Option<&str>, i64, &[(usize, i64)])] = &[
    ("Kiran Desai", Some("Dr. Rao"), 6, &[(0, 10), (1, 6)]),
    ("Latha Menon", None, 4, &[(6, 30)]),
    ("Imran Qureshi", Some("Dr. Nair"), 2, &[(3, 5), (7, 1), (0, 4)]),
    ("Sunita Pillai", Some("Dr. Rao"), 0, &[(2, 2), (1, 10)]),
];

/// Fills an empty shelf and bill book.
pub fn load(inventory: &InventoryState, bills: &BillState, today: NaiveDate, default_tax: TaxRate) {
    let ids: Vec<String> = SHELF
        .iter()
        .map(|&(name, batch, quantity, expires_in, threshold, price)| {
            inventory
                .create(&NewStockItem {
                    name: name.to_string(),
                    batch: batch.to_string(),
                    quantity,
                    expiry_date: today + Duration::days(expires_in),
                    threshold,
                    unit_price_cents: price,
                })
                .id
        })
        .collect();

    let mut created = 0;
    for &(patient, doctor, days_ago, lines) in BILLS {
        let form = NewBill {
            patient_name: patient.to_string(),
            doctor_name: doctor.map(str::to_string),
            date: Some(today - Duration::days(days_ago)),
            items: lines
                .iter()
                .map(|&(index, quantity)| NewBillItem {
                    stock_item_id: Some(ids[index].clone()),
                    name: None,
                    batch: None,
                    quantity,
                    unit_price_cents: None,
                })
                .collect(),
            discount_bps: 0,
            tax_rate_bps: None,
        };

        match bills.create(inventory, &form, today, default_tax) {
            Ok(_) => created += 1,
            Err(e) => warn!(patient, error = %e, "Sample bill skipped"),
        }
    }

    info!(stock_items = ids.len(), bills = created, "Sample data loaded");
}
