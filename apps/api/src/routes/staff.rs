//! Staff CRUD. Each handler validates the form, then makes one repository
//! call. Passwords on create and edit are checked for length and dropped.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use medix_core::validation::validate_search_query;
use medix_core::{NewStaffMember, StaffFilter, StaffMember, StaffUpdate};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiQuery};
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    ApiQuery(mut filter): ApiQuery<StaffFilter>,
) -> ApiResult<Json<Vec<StaffMember>>> {
    if let Some(search) = filter.search.as_deref() {
        filter.search = Some(validate_search_query(search)?);
    }
    Ok(Json(state.db.staff().list(&filter).await?))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewStaffMember>,
) -> ApiResult<(StatusCode, Json<StaffMember>)> {
    input.validate()?;

    let member = state.db.staff().insert(&input).await?;
    info!(id = %member.id, username = %member.username, "Staff member created");

    Ok((StatusCode::CREATED, Json(member)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<StaffMember>> {
    state
        .db
        .staff()
        .get_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Staff member", &id))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<StaffUpdate>,
) -> ApiResult<Json<StaffMember>> {
    update.validate()?;

    let member = state.db.staff().update(&id, &update).await?;
    info!(id = %member.id, status = %member.status, "Staff member updated");

    Ok(Json(member))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.db.staff().delete(&id).await?;
    info!(id = %id, "Staff member deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::test_state;
    use medix_core::StaffStatus;

    fn form(username: &str, email: &str) -> NewStaffMember {
        NewStaffMember {
            name: "Asha Verma".into(),
            username: username.into(),
            email: email.into(),
            password: "pharmacy123".into(),
            status: StaffStatus::Active,
        }
    }

    #[tokio::test]
    async fn test_create_get_list() {
        let state = test_state().await;

        let (status, Json(member)) = create(State(state.clone()), ApiJson(form("asha", "asha@citycare.in")))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let Json(fetched) = get(State(state.clone()), Path(member.id.clone())).await.unwrap();
        assert_eq!(fetched.id, member.id);
        assert_eq!(fetched.email, "asha@citycare.in");

        let Json(found) = list(
            State(state),
            ApiQuery(StaffFilter {
                status: None,
                search: Some("  citycare ".into()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_and_duplicate() {
        let state = test_state().await;

        let mut short = form("asha", "asha@citycare.in");
        short.password = "short".into();
        let err = create(State(state.clone()), ApiJson(short)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        create(State(state.clone()), ApiJson(form("asha", "asha@citycare.in")))
            .await
            .unwrap();
        let err = create(State(state), ApiJson(form("asha2", "ASHA@citycare.in")))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert!(err.message.contains("email"));
    }

    #[tokio::test]
    async fn test_update_and_remove() {
        let state = test_state().await;
        let (_, Json(member)) = create(State(state.clone()), ApiJson(form("ravi", "ravi@citycare.in")))
            .await
            .unwrap();

        let err = update(
            State(state.clone()),
            Path(member.id.clone()),
            ApiJson(StaffUpdate::default()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let Json(updated) = update(
            State(state.clone()),
            Path(member.id.clone()),
            ApiJson(StaffUpdate {
                status: Some(StaffStatus::Disabled),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
        assert_eq!(updated.status, StaffStatus::Disabled);

        let status = remove(State(state.clone()), Path(member.id.clone())).await.unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        let err = get(State(state.clone()), Path(member.id.clone())).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        let err = remove(State(state), Path(member.id)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
