//! Reports page. Both summaries are computed on request from the current
//! bills and shelf.

use axum::extract::State;
use axum::Json;
use medix_core::report::{sales_report, stock_report};
use medix_core::{ReportRange, SalesReport, StockReport};

use crate::error::{ApiError, ApiResult};
use crate::extract::ApiQuery;
use crate::state::{today, AppState};

pub async fn sales(
    State(state): State<AppState>,
    ApiQuery(range): ApiQuery<ReportRange>,
) -> ApiResult<Json<SalesReport>> {
    if let (Some(from), Some(to)) = (range.from, range.to) {
        if from > to {
            return Err(ApiError::validation("from must not be after to"));
        }
    }
    let bills = state.bills.snapshot();
    Ok(Json(sales_report(&bills, range)))
}

pub async fn stock(State(state): State<AppState>) -> Json<StockReport> {
    let items = state.inventory.snapshot();
    Json(stock_report(
        &items,
        today(),
        state.config.expiry_window_days,
    ))
}
