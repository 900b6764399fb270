//! Stock page: shelf listing with computed status, the entry form, edits,
//! and quantity adjustments.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use medix_core::validation::{validate_expiry_window, validate_search_query};
use medix_core::{NewStockItem, StockAdjustment, StockFilter, StockItemView, StockUpdate};

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiQuery};
use crate::state::{today, AppState};

pub async fn list(
    State(state): State<AppState>,
    ApiQuery(mut filter): ApiQuery<StockFilter>,
) -> ApiResult<Json<Vec<StockItemView>>> {
    if let Some(search) = filter.search.as_deref() {
        filter.search = Some(validate_search_query(search)?);
    }
    if let Some(days) = filter.expiring_within_days {
        validate_expiry_window(days)?;
    }
    Ok(Json(state.inventory.list(&filter, today())))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewStockItem>,
) -> ApiResult<(StatusCode, Json<StockItemView>)> {
    input.validate()?;
    let item = state.inventory.create(&input);
    Ok((StatusCode::CREATED, Json(item.view(today()))))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<StockItemView>> {
    Ok(Json(state.inventory.get(&id)?.view(today())))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<StockUpdate>,
) -> ApiResult<Json<StockItemView>> {
    update.validate()?;
    Ok(Json(state.inventory.update(&id, &update)?.view(today())))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.inventory.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Applies a signed delta; a result below zero is rejected with
/// `INSUFFICIENT_STOCK` and the quantity is left as it was.
pub async fn adjust(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(adjustment): ApiJson<StockAdjustment>,
) -> ApiResult<Json<StockItemView>> {
    adjustment.validate()?;
    let item = state
        .inventory
        .adjust(&id, adjustment.delta, adjustment.reason.as_deref())?;
    Ok(Json(item.view(today())))
}
