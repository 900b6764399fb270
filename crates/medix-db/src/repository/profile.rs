//! # Pharmacy Profile Repository
//!
//! The profile is a single row under a fixed key. Saving the settings form
//! always goes through [`PharmacyProfileRepository::upsert`], so the first
//! save creates the row and every later save overwrites it.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;
use medix_core::{PharmacyProfile, PharmacyProfileInput, PHARMACY_PROFILE_ID};

#[derive(Debug, Clone)]
pub struct PharmacyProfileRepository {
    pool: SqlitePool,
}

impl PharmacyProfileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        PharmacyProfileRepository { pool }
    }

    /// Returns the stored profile, or `None` before the first save.
    pub async fn get(&self) -> DbResult<Option<PharmacyProfile>> {
        let profile = sqlx::query_as::<_, PharmacyProfile>(
            r#"
            SELECT
                id, pharmacy_name, address, city, state, postal_code,
                phone, email, license_number, tax_id, updated_at
            FROM pharmacy_profile
            WHERE id = ?1
            "#,
        )
        .bind(PHARMACY_PROFILE_ID)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Creates or replaces the profile.
    ///
    /// Text fields are trimmed; blank optional fields are stored as NULL.
    pub async fn upsert(&self, input: &PharmacyProfileInput) -> DbResult<PharmacyProfile> {
        let profile = PharmacyProfile {
            id: PHARMACY_PROFILE_ID.to_string(),
            pharmacy_name: input.pharmacy_name.trim().to_string(),
            address: input.address.trim().to_string(),
            city: input.city.trim().to_string(),
            state: input.state.trim().to_string(),
            postal_code: input.postal_code.trim().to_string(),
            phone: input.phone.trim().to_string(),
            email: non_blank(input.email.as_deref()).map(str::to_lowercase),
            license_number: input.license_number.trim().to_string(),
            tax_id: non_blank(input.tax_id.as_deref()).map(str::to_string),
            updated_at: Utc::now(),
        };

        debug!(name = %profile.pharmacy_name, "Saving pharmacy profile");

        sqlx::query(
            r#"
            INSERT INTO pharmacy_profile (
                id, pharmacy_name, address, city, state, postal_code,
                phone, email, license_number, tax_id, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            ON CONFLICT(id) DO UPDATE SET
                pharmacy_name = excluded.pharmacy_name,
                address = excluded.address,
                city = excluded.city,
                state = excluded.state,
                postal_code = excluded.postal_code,
                phone = excluded.phone,
                email = excluded.email,
                license_number = excluded.license_number,
                tax_id = excluded.tax_id,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&profile.id)
        .bind(&profile.pharmacy_name)
        .bind(&profile.address)
        .bind(&profile.city)
        .bind(&profile.state)
        .bind(&profile.postal_code)
        .bind(&profile.phone)
        .bind(&profile.email)
        .bind(&profile.license_number)
        .bind(&profile.tax_id)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await?;

        info!(name = %profile.pharmacy_name, "Pharmacy profile saved");
        Ok(profile)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn input(name: &str) -> PharmacyProfileInput {
        PharmacyProfileInput {
            pharmacy_name: name.into(),
            address: "12 MG Road".into(),
            city: "Pune".into(),
            state: "MH".into(),
            postal_code: "411001".into(),
            phone: "+91 20 5550 1234".into(),
            email: Some("  ".into()),
            license_number: "MH-PUN-20B-1234".into(),
            tax_id: Some("27ABCDE1234F1Z5".into()),
        }
    }

    #[tokio::test]
    async fn test_get_before_first_save() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.pharmacy_profile().get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_creates_then_replaces() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.pharmacy_profile();

        let first = repo.upsert(&input(" City Care Pharmacy ")).await.unwrap();
        assert_eq!(first.id, PHARMACY_PROFILE_ID);
        assert_eq!(first.pharmacy_name, "City Care Pharmacy");
        assert_eq!(first.email, None);

        repo.upsert(&input("City Care Chemists")).await.unwrap();

        let stored = repo.get().await.unwrap().unwrap();
        assert_eq!(stored.pharmacy_name, "City Care Chemists");
        assert_eq!(stored.tax_id.as_deref(), Some("27ABCDE1234F1Z5"));

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pharmacy_profile")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }
}
