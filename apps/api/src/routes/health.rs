use axum::extract::State;
use axum::Json;
use serde::Serialize;
use ts_rs::TS;

use crate::state::AppState;

#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database does not answer.
    #[ts(type = "\"ok\" | \"degraded\"")]
    pub status: &'static str,
    pub database: bool,
    pub realtime_clients: usize,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = state.db.health_check().await;
    Json(HealthResponse {
        status: if database { "ok" } else { "degraded" },
        database,
        realtime_clients: state.realtime.client_count().await,
    })
}
