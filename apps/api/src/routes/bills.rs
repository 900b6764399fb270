//! Bill creation and the bills page.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use medix_core::validation::validate_search_query;
use medix_core::{Bill, BillFilter, NewBill};

use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiQuery};
use crate::state::{today, AppState};

pub async fn list(
    State(state): State<AppState>,
    ApiQuery(mut filter): ApiQuery<BillFilter>,
) -> ApiResult<Json<Vec<Bill>>> {
    if let (Some(from), Some(to)) = (filter.from, filter.to) {
        if from > to {
            return Err(ApiError::validation("from must not be after to"));
        }
    }
    if let Some(search) = filter.search.as_deref() {
        filter.search = Some(validate_search_query(search)?);
    }
    Ok(Json(state.bills.list(&filter)))
}

/// Validates the form, prices it against the shelf and records the bill.
///
/// Stock-linked lines are all-or-nothing: if any line is short, no stock is
/// taken and no bill is recorded.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewBill>,
) -> ApiResult<(StatusCode, Json<Bill>)> {
    input.validate()?;

    let bill = state.bills.create(
        &state.inventory,
        &input,
        today(),
        state.config.default_tax_rate(),
    )?;

    Ok((StatusCode::CREATED, Json(bill)))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Bill>> {
    Ok(Json(state.bills.get(&id)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::test_state;
    use chrono::Duration;
    use medix_core::{NewBillItem, NewStockItem};

    fn stock_line(id: &str, quantity: i64) -> NewBillItem {
        NewBillItem {
            stock_item_id: Some(id.to_string()),
            name: None,
            batch: None,
            quantity,
            unit_price_cents: None,
        }
    }

    fn free_line(name: &str, quantity: i64, price: i64) -> NewBillItem {
        NewBillItem {
            stock_item_id: None,
            name: Some(name.to_string()),
            batch: None,
            quantity,
            unit_price_cents: Some(price),
        }
    }

    fn form(items: Vec<NewBillItem>) -> NewBill {
        NewBill {
            patient_name: "Meera Joshi".into(),
            doctor_name: None,
            date: None,
            items,
            discount_bps: 500,
            tax_rate_bps: Some(1200),
        }
    }

    fn stocked(state: &AppState, quantity: i64) -> String {
        state
            .inventory
            .create(&NewStockItem {
                name: "Dolo 650".into(),
                batch: "DL-0301".into(),
                quantity,
                expiry_date: today() + Duration::days(90),
                threshold: 5,
                unit_price_cents: 1000,
            })
            .id
    }

    #[tokio::test]
    async fn test_create_prices_and_decrements() {
        let state = test_state().await;
        let id = stocked(&state, 10);

        let (status, Json(bill)) = create(
            State(state.clone()),
            ApiJson(form(vec![stock_line(&id, 2), free_line("Crepe bandage", 1, 8000)])),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(bill.subtotal_cents, 10000);
        assert_eq!(bill.discount_cents, 500);
        // 12% of 9500
        assert_eq!(bill.tax_cents, 1140);
        assert_eq!(bill.total_cents, 10640);
        assert_eq!(bill.date, today());
        assert_eq!(state.inventory.get(&id).unwrap().quantity, 8);

        let Json(fetched) = get(State(state.clone()), Path(bill.id.clone())).await.unwrap();
        assert_eq!(fetched.bill_number, bill.bill_number);

        let Json(listed) = list(
            State(state),
            ApiQuery(BillFilter {
                search: Some("meera".into()),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_short_stock_is_all_or_nothing() {
        let state = test_state().await;
        let plenty = stocked(&state, 50);
        let scarce = stocked(&state, 1);

        let err = create(
            State(state.clone()),
            ApiJson(form(vec![stock_line(&plenty, 10), stock_line(&scarce, 2)])),
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(state.inventory.get(&plenty).unwrap().quantity, 50);
        assert_eq!(state.inventory.get(&scarce).unwrap().quantity, 1);
        assert!(state.bills.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_forms() {
        let state = test_state().await;

        let err = create(State(state.clone()), ApiJson(form(vec![]))).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let unknown = "550e8400-e29b-41d4-a716-446655440000";
        let err = create(State(state.clone()), ApiJson(form(vec![stock_line(unknown, 1)])))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = list(
            State(state),
            ApiQuery(BillFilter {
                from: Some(today()),
                to: Some(today() - Duration::days(1)),
                search: None,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_create_rejects_price_past_cap() {
        let state = test_state().await;

        let err = create(
            State(state.clone()),
            ApiJson(form(vec![free_line("Glucometer", 2, i64::MAX)])),
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("unitPriceCents"));
        assert!(state.bills.snapshot().is_empty());
    }
}
