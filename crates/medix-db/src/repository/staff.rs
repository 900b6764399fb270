//! # Staff Repository
//!
//! Database operations for pharmacy staff accounts.
//!
//! ## Key Operations
//! - Filtered listing (status + free-text search)
//! - CRUD with unique username / email
//!
//! ## Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User types: "asha"                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LIKE '%asha%' across: name, username, email (case-insensitive)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │ Asha Verma  | asha.v   | asha@…  active │ ← MATCH                   │
//! │  │ Ravi Kumar  | ravi     | ravi@…  active │                           │
//! │  │ Nisha Asha… | nisha    | nisha@… disabled│ ← MATCH                  │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ordered by name                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use medix_core::{NewStaffMember, StaffFilter, StaffMember, StaffUpdate};

const STAFF_COLUMNS: &str = "id, name, username, email, status, created_at, updated_at";

/// Repository for staff database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = StaffRepository::new(pool);
///
/// let member = repo.insert(&new_member).await?;
/// let active = repo.list(&StaffFilter { status: Some(StaffStatus::Active), ..Default::default() }).await?;
/// ```
#[derive(Debug, Clone)]
pub struct StaffRepository {
    pool: SqlitePool,
}

impl StaffRepository {
    /// Creates a new StaffRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StaffRepository { pool }
    }

    /// Lists staff matching the filter, ordered by name.
    ///
    /// An empty or whitespace search term matches everyone.
    pub async fn list(&self, filter: &StaffFilter) -> DbResult<Vec<StaffMember>> {
        let pattern = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(like_pattern);

        debug!(status = ?filter.status, search = ?pattern, "Listing staff");

        let sql = format!(
            r#"
            SELECT {STAFF_COLUMNS}
            FROM staff
            WHERE (?1 IS NULL OR status = ?1)
            AND (
                ?2 IS NULL
                OR name LIKE ?2 ESCAPE '\'
                OR username LIKE ?2 ESCAPE '\'
                OR email LIKE ?2 ESCAPE '\'
            )
            ORDER BY name COLLATE NOCASE, username
            "#
        );

        let staff = sqlx::query_as::<_, StaffMember>(&sql)
            .bind(filter.status)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = staff.len(), "Staff list returned");
        Ok(staff)
    }

    /// Gets a staff member by ID.
    ///
    /// ## Returns
    /// * `Ok(Some(StaffMember))` - Found
    /// * `Ok(None)` - No such member
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<StaffMember>> {
        let sql = format!("SELECT {STAFF_COLUMNS} FROM staff WHERE id = ?1");

        let member = sqlx::query_as::<_, StaffMember>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(member)
    }

    /// Gets a staff member by sign-in name (exact match).
    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<StaffMember>> {
        let sql = format!("SELECT {STAFF_COLUMNS} FROM staff WHERE username = ?1");

        let member = sqlx::query_as::<_, StaffMember>(&sql)
            .bind(username.trim())
            .fetch_optional(&self.pool)
            .await?;

        Ok(member)
    }

    /// Inserts a new staff member. The password is not stored.
    ///
    /// ## Returns
    /// * `Ok(StaffMember)` - The stored row
    /// * `Err(DbError::UniqueViolation)` - Username or email already taken
    pub async fn insert(&self, input: &NewStaffMember) -> DbResult<StaffMember> {
        let now = Utc::now();
        let member = StaffMember {
            id: Uuid::new_v4().to_string(),
            name: input.name.trim().to_string(),
            username: input.username.trim().to_string(),
            email: input.email.trim().to_lowercase(),
            status: input.status,
            created_at: now,
            updated_at: now,
        };

        debug!(username = %member.username, "Inserting staff member");

        sqlx::query(
            r#"
            INSERT INTO staff (id, name, username, email, status, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&member.id)
        .bind(&member.name)
        .bind(&member.username)
        .bind(&member.email)
        .bind(member.status)
        .bind(member.created_at)
        .bind(member.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| with_duplicate_value(e.into(), &member))?;

        Ok(member)
    }

    /// Applies a partial update.
    ///
    /// ## Returns
    /// * `Ok(StaffMember)` - The updated row
    /// * `Err(DbError::NotFound)` - No such member
    /// * `Err(DbError::UniqueViolation)` - New username or email already taken
    pub async fn update(&self, id: &str, update: &StaffUpdate) -> DbResult<StaffMember> {
        debug!(id = %id, ?update, "Updating staff member");

        let current = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Staff member", id))?;

        let updated = update.apply_to(&current);

        let result = sqlx::query(
            r#"
            UPDATE staff SET
                name = ?2,
                username = ?3,
                email = ?4,
                status = ?5,
                updated_at = ?6
            WHERE id = ?1
            "#,
        )
        .bind(&updated.id)
        .bind(&updated.name)
        .bind(&updated.username)
        .bind(&updated.email)
        .bind(updated.status)
        .bind(updated.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| with_duplicate_value(e.into(), &updated))?;

        // Deleted between the read and the write.
        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Staff member", id));
        }

        Ok(updated)
    }

    /// Hard-deletes a staff member.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting staff member");

        let result = sqlx::query("DELETE FROM staff WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Staff member", id));
        }

        Ok(())
    }

    /// Counts all staff (for diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM staff")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Builds a `LIKE` pattern matching `term` anywhere, with `%`, `_` and `\`
/// in the term taken literally.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Fills in the offending value of a unique violation, which SQLite does not
/// report.
fn with_duplicate_value(err: DbError, member: &StaffMember) -> DbError {
    match err {
        DbError::UniqueViolation { field, .. } => {
            let value = match field.as_str() {
                "username" => member.username.clone(),
                "email" => member.email.clone(),
                _ => "unknown".to_string(),
            };
            DbError::UniqueViolation { field, value }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use medix_core::StaffStatus;

    async fn repo() -> StaffRepository {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.staff()
    }

    fn new_member(name: &str, username: &str, email: &str) -> NewStaffMember {
        NewStaffMember {
            name: name.into(),
            username: username.into(),
            email: email.into(),
            password: "correct-horse".into(),
            status: StaffStatus::Active,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = repo().await;
        let member = repo
            .insert(&new_member(" Asha Verma ", "asha", "Asha@Example.com"))
            .await
            .unwrap();

        assert_eq!(member.name, "Asha Verma");
        assert_eq!(member.email, "asha@example.com");

        let fetched = repo.get_by_id(&member.id).await.unwrap().unwrap();
        assert_eq!(fetched.username, "asha");
        assert_eq!(fetched.status, StaffStatus::Active);

        let by_name = repo.get_by_username("asha").await.unwrap();
        assert_eq!(by_name.map(|m| m.id), Some(member.id));
        assert!(repo.get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_reports_value() {
        let repo = repo().await;
        repo.insert(&new_member("Asha", "asha", "asha@example.com"))
            .await
            .unwrap();

        let err = repo
            .insert(&new_member("Other", "asha", "other@example.com"))
            .await
            .unwrap_err();

        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "username");
                assert_eq!(value, "asha");
            }
            other => panic!("expected unique violation, got {other:?}"),
        }
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_filters_and_orders() {
        let repo = repo().await;
        repo.insert(&new_member("Ravi Kumar", "ravi", "ravi@example.com"))
            .await
            .unwrap();
        repo.insert(&new_member("asha verma", "asha", "asha@example.com"))
            .await
            .unwrap();
        let mut disabled = new_member("Nisha", "nisha_r", "nisha@clinic.in");
        disabled.status = StaffStatus::Disabled;
        repo.insert(&disabled).await.unwrap();

        let all = repo.list(&StaffFilter::default()).await.unwrap();
        let names: Vec<_> = all.iter().map(|m| m.username.as_str()).collect();
        assert_eq!(names, vec!["asha", "nisha_r", "ravi"]);

        let active = repo
            .list(&StaffFilter {
                status: Some(StaffStatus::Active),
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(active.len(), 2);

        let by_email = repo
            .list(&StaffFilter {
                status: None,
                search: Some("CLINIC".into()),
            })
            .await
            .unwrap();
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].username, "nisha_r");

        // Underscore is literal, not a single-character wildcard
        let literal = repo
            .list(&StaffFilter {
                status: None,
                search: Some("a_h".into()),
            })
            .await
            .unwrap();
        assert!(literal.is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repo = repo().await;
        let member = repo
            .insert(&new_member("Ravi", "ravi", "ravi@example.com"))
            .await
            .unwrap();

        let updated = repo
            .update(
                &member.id,
                &StaffUpdate {
                    status: Some(StaffStatus::Disabled),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, StaffStatus::Disabled);
        assert_eq!(updated.username, "ravi");

        let stored = repo.get_by_id(&member.id).await.unwrap().unwrap();
        assert_eq!(stored.status, StaffStatus::Disabled);

        repo.delete(&member.id).await.unwrap();
        assert!(matches!(
            repo.delete(&member.id).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            repo.update(&member.id, &StaffUpdate::default()).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("asha"), "%asha%");
        assert_eq!(like_pattern("50%_x"), "%50\\%\\_x%");
    }
}
