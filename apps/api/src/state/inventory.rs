//! # Inventory State
//!
//! The shelf: stock batches held in process memory. Nothing here is
//! persisted; a restart brings back the sample shelf (or an empty one).
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Route                    InventoryState           Shelf change         │
//! │  ─────                    ──────────────           ────────────         │
//! │  POST /api/stock ───────► create() ──────────────► items.push(item)    │
//! │  PUT  /api/stock/{id} ──► update() ──────────────► item.apply(edit)    │
//! │  POST …/{id}/adjust ────► adjust() ──────────────► quantity += delta   │
//! │  DELETE /api/stock/{id} ► delete() ──────────────► items.remove(i)     │
//! │  POST /api/bills ───────► with_stock_mut() ──────► quantity -= demand  │
//! │                                                                         │
//! │  All writes hold the Mutex for the whole read-check-write.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use medix_core::{
    CoreError, CoreResult, NewStockItem, StockFilter, StockItem, StockItemView, StockUpdate,
};
use tracing::{debug, info};

/// Shared handle to the shelf. Cloning shares the same items.
#[derive(Debug, Clone, Default)]
pub struct InventoryState {
    items: Arc<Mutex<Vec<StockItem>>>,
}

impl InventoryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<StockItem>) -> Self {
        InventoryState {
            items: Arc::new(Mutex::new(items)),
        }
    }

    /// Executes a function with read access to the shelf.
    pub fn with_stock<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[StockItem]) -> R,
    {
        let items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        f(&items)
    }

    /// Executes a function with write access to the shelf.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// inventory.with_stock_mut(|items| items.retain(|i| i.quantity > 0));
    /// ```
    pub fn with_stock_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Vec<StockItem>) -> R,
    {
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut items)
    }

    /// Items matching the filter, ordered by name then expiry.
    pub fn list(&self, filter: &StockFilter, today: NaiveDate) -> Vec<StockItemView> {
        let mut views: Vec<StockItemView> = self.with_stock(|items| {
            items
                .iter()
                .filter(|item| filter.matches(item, today))
                .map(|item| item.view(today))
                .collect()
        });
        views.sort_by(|a, b| {
            a.item
                .name
                .to_lowercase()
                .cmp(&b.item.name.to_lowercase())
                .then(a.item.expiry_date.cmp(&b.item.expiry_date))
        });
        views
    }

    pub fn get(&self, id: &str) -> CoreResult<StockItem> {
        self.with_stock(|items| items.iter().find(|i| i.id == id).cloned())
            .ok_or_else(|| CoreError::StockItemNotFound(id.to_string()))
    }

    pub fn create(&self, input: &NewStockItem) -> StockItem {
        let item = StockItem::from_input(input);
        info!(id = %item.id, item = %item.label(), quantity = item.quantity, "Stock item added");
        self.with_stock_mut(|items| items.push(item.clone()));
        item
    }

    pub fn update(&self, id: &str, update: &StockUpdate) -> CoreResult<StockItem> {
        self.with_stock_mut(|items| {
            let item = find_mut(items, id)?;
            item.apply(update);
            debug!(id = %id, ?update, "Stock item updated");
            Ok(item.clone())
        })
    }

    /// Applies a signed quantity change. The quantity never goes below zero.
    pub fn adjust(&self, id: &str, delta: i64, reason: Option<&str>) -> CoreResult<StockItem> {
        self.with_stock_mut(|items| {
            let item = find_mut(items, id)?;
            item.adjust(delta)?;
            info!(
                id = %id,
                delta,
                quantity = item.quantity,
                reason = reason.unwrap_or(""),
                "Stock adjusted"
            );
            Ok(item.clone())
        })
    }

    pub fn delete(&self, id: &str) -> CoreResult<()> {
        self.with_stock_mut(|items| {
            let before = items.len();
            items.retain(|i| i.id != id);
            if items.len() == before {
                return Err(CoreError::StockItemNotFound(id.to_string()));
            }
            info!(id = %id, "Stock item removed");
            Ok(())
        })
    }

    pub fn snapshot(&self) -> Vec<StockItem> {
        self.with_stock(|items| items.to_vec())
    }
}

fn find_mut<'a>(items: &'a mut [StockItem], id: &str) -> CoreResult<&'a mut StockItem> {
    items
        .iter_mut()
        .find(|i| i.id == id)
        .ok_or_else(|| CoreError::StockItemNotFound(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use medix_core::StockStatus;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn input(name: &str, batch: &str, quantity: i64) -> NewStockItem {
        NewStockItem {
            name: name.into(),
            batch: batch.into(),
            quantity,
            expiry_date: day(30),
            threshold: 10,
            unit_price_cents: 500,
        }
    }

    #[test]
    fn test_create_list_sorted_with_status() {
        let inventory = InventoryState::new();
        inventory.create(&input("Pantoprazole 40mg", "PAN-1", 50));
        inventory.create(&input("azithromycin 500mg", "AZI-3", 4));

        let views = inventory.list(&StockFilter::default(), day(1));
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].item.batch, "AZI-3");
        assert_eq!(views[0].status, StockStatus::LowStock);
        assert_eq!(views[1].status, StockStatus::InStock);

        let low = inventory.list(
            &StockFilter {
                status: Some(StockStatus::LowStock),
                ..Default::default()
            },
            day(1),
        );
        assert_eq!(low.len(), 1);
    }

    #[test]
    fn test_adjust_and_delete() {
        let inventory = InventoryState::new();
        let item = inventory.create(&input("Metformin 500mg", "MET-9", 5));

        let adjusted = inventory.adjust(&item.id, 20, Some("delivery")).unwrap();
        assert_eq!(adjusted.quantity, 25);

        let err = inventory.adjust(&item.id, -30, None).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { .. }));
        assert_eq!(inventory.get(&item.id).unwrap().quantity, 25);

        inventory.delete(&item.id).unwrap();
        assert!(matches!(
            inventory.delete(&item.id),
            Err(CoreError::StockItemNotFound(_))
        ));
    }

    #[test]
    fn test_update_missing_item() {
        let inventory = InventoryState::new();
        let err = inventory
            .update(
                "nope",
                &StockUpdate {
                    quantity: Some(1),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::StockItemNotFound(_)));
    }

    #[test]
    fn test_clones_share_items() {
        let inventory = InventoryState::new();
        let other = inventory.clone();
        inventory.create(&input("Cetirizine 10mg", "CTZ-1", 10));
        assert_eq!(other.snapshot().len(), 1);
    }
}
