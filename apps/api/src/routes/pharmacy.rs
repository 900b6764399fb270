//! Pharmacy profile settings: read the singleton, or save it (create on the
//! first save, overwrite after).

use axum::extract::State;
use axum::Json;
use medix_core::{PharmacyProfile, PharmacyProfileInput};

use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Responds `null` until the profile has been saved once.
pub async fn get(State(state): State<AppState>) -> ApiResult<Json<Option<PharmacyProfile>>> {
    Ok(Json(state.db.pharmacy_profile().get().await?))
}

pub async fn save(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<PharmacyProfileInput>,
) -> ApiResult<Json<PharmacyProfile>> {
    input.validate()?;
    Ok(Json(state.db.pharmacy_profile().upsert(&input).await?))
}
