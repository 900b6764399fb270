//! # Session State
//!
//! The signed-in staff member for this terminal. A session is a flag, not a
//! credential: there is no token, and the password on the login form is not
//! checked against anything.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use medix_core::StaffMember;
use serde::Serialize;
use ts_rs::TS;

/// Who is signed in, as shown in the header bar.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Session {
    pub staff_id: String,
    pub username: String,
    pub name: String,
    #[ts(as = "String")]
    pub signed_in_at: DateTime<Utc>,
}

impl Session {
    pub fn for_member(member: &StaffMember) -> Self {
        Session {
            staff_id: member.id.clone(),
            username: member.username.clone(),
            name: member.name.clone(),
            signed_in_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    current: Arc<Mutex<Option<Session>>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Session> {
        self.current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Replaces any existing session.
    pub fn sign_in(&self, session: Session) {
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = Some(session);
    }

    /// Returns the session that was ended, if any.
    pub fn sign_out(&self) -> Option<Session> {
        self.current.lock().unwrap_or_else(|e| e.into_inner()).take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medix_core::StaffStatus;

    #[test]
    fn test_sign_in_replaces_and_sign_out_clears() {
        let now = Utc::now();
        let member = |id: &str| StaffMember {
            id: id.into(),
            name: format!("Member {id}"),
            username: id.into(),
            email: format!("{id}@example.com"),
            status: StaffStatus::Active,
            created_at: now,
            updated_at: now,
        };

        let sessions = SessionState::new();
        assert!(sessions.current().is_none());

        sessions.sign_in(Session::for_member(&member("asha")));
        sessions.sign_in(Session::for_member(&member("ravi")));
        assert_eq!(sessions.current().map(|s| s.username), Some("ravi".to_string()));

        let ended = sessions.sign_out();
        assert_eq!(ended.map(|s| s.staff_id), Some("ravi".to_string()));
        assert!(sessions.current().is_none());
        assert!(sessions.sign_out().is_none());
    }

    #[test]
    fn test_session_binding_uses_wire_names() {
        let decl = Session::decl();
        assert!(decl.contains("staffId: string"), "{decl}");
        assert!(decl.contains("signedInAt: string"), "{decl}");
    }
}
