//! Sign-in flag for the terminal.
//!
//! Login looks the username up and requires the account to be active. The
//! password field is accepted and ignored; no token is issued.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use medix_core::validation::validate_username;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::state::{AppState, Session};

#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LoginRequest {
    pub username: String,
    /// Accepted so the login form can post as-is; never checked.
    #[serde(default)]
    pub password: Option<String>,
}

/// A device with an active session. Devices are not tracked, so the list is
/// always empty.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Device {
    pub id: String,
    pub name: String,
}

pub async fn current(State(state): State<AppState>) -> Json<Option<Session>> {
    Json(state.session.current())
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> ApiResult<Json<Session>> {
    let username = request.username.trim();
    validate_username(username)?;

    let member = state
        .db
        .staff()
        .get_by_username(username)
        .await?
        .ok_or_else(|| ApiError::not_found("Staff member", username))?;

    if !member.is_active() {
        warn!(username = %member.username, "Sign-in refused for disabled account");
        return Err(ApiError::validation(format!(
            "Account '{}' is disabled",
            member.username
        )));
    }

    let session = Session::for_member(&member);
    state.session.sign_in(session.clone());
    info!(username = %session.username, "Signed in");

    Ok(Json(session))
}

pub async fn logout(State(state): State<AppState>) -> StatusCode {
    if let Some(session) = state.session.sign_out() {
        info!(username = %session.username, "Signed out");
    }
    StatusCode::NO_CONTENT
}

pub async fn devices() -> Json<Vec<Device>> {
    Json(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::test_state;
    use medix_core::{NewStaffMember, StaffStatus};

    async fn with_staff(status: StaffStatus) -> AppState {
        let state = test_state().await;
        state
            .db
            .staff()
            .insert(&NewStaffMember {
                name: "Asha Verma".into(),
                username: "asha".into(),
                email: "asha@citycare.in".into(),
                password: "pharmacy123".into(),
                status,
            })
            .await
            .unwrap();
        state
    }

    fn request(username: &str) -> ApiJson<LoginRequest> {
        ApiJson(LoginRequest {
            username: username.into(),
            password: Some("anything at all".into()),
        })
    }

    #[tokio::test]
    async fn test_login_current_logout() {
        let state = with_staff(StaffStatus::Active).await;

        let Json(session) = login(State(state.clone()), request(" asha ")).await.unwrap();
        assert_eq!(session.username, "asha");

        let Json(current_session) = current(State(state.clone())).await;
        assert_eq!(current_session.map(|s| s.staff_id), Some(session.staff_id));

        assert_eq!(logout(State(state.clone())).await, StatusCode::NO_CONTENT);
        let Json(current_session) = current(State(state)).await;
        assert!(current_session.is_none());
    }

    #[tokio::test]
    async fn test_login_refuses_unknown_and_disabled() {
        let state = with_staff(StaffStatus::Disabled).await;

        let err = login(State(state.clone()), request("asha")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = login(State(state.clone()), request("nobody")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let Json(current_session) = current(State(state)).await;
        assert!(current_session.is_none());
    }

    #[tokio::test]
    async fn test_devices_is_empty() {
        let Json(list) = devices().await;
        assert!(list.is_empty());
        assert_eq!(serde_json::to_string(&list).unwrap(), "[]");
    }

    #[test]
    fn test_login_and_device_bindings() {
        let decl = LoginRequest::decl();
        assert!(decl.contains("username: string"), "{decl}");
        assert!(decl.contains("password"), "{decl}");
        assert!(Device::decl().contains("name: string"));
    }
}
