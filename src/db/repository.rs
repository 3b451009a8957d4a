//! Database repository for weddings and their guest lists.
//!
//! Guest lists are written whole, guarded by the wedding's version column.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::directory::GuestListStore;
use crate::errors::AppError;
use crate::models::{CreateWeddingRequest, GuestRecord, StoredGuestList, Wedding};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a wedding.
    ///
    /// `unified_list` may be `None` when legacy responses still need to be
    /// migrated on first access.
    pub async fn create_wedding(
        &self,
        request: &CreateWeddingRequest,
        unified_list: Option<&[GuestRecord]>,
    ) -> Result<Wedding, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let names_json = serde_json::to_string(&request.guest_name_list)?;
        let legacy_json = request
            .legacy_rsvps
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let unified_json = unified_list.map(serde_json::to_string).transpose()?;

        sqlx::query(
            "INSERT INTO weddings (id, couple_names, wedding_date, guest_name_list, legacy_rsvps, unified_list, created_at, updated_at, version) VALUES (?, ?, ?, ?, ?, ?, ?, ?, 1)"
        )
        .bind(&id)
        .bind(request.couple_names.trim())
        .bind(&request.wedding_date)
        .bind(&names_json)
        .bind(&legacy_json)
        .bind(&unified_json)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Wedding {
            id,
            couple_names: request.couple_names.trim().to_string(),
            wedding_date: request.wedding_date.clone(),
            created_at: now.clone(),
            updated_at: now,
            version: 1,
        })
    }

    /// Get a wedding by ID.
    pub async fn get_wedding(&self, id: &str) -> Result<Option<Wedding>, AppError> {
        let row = sqlx::query(
            "SELECT id, couple_names, wedding_date, created_at, updated_at, version FROM weddings WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(wedding_from_row))
    }

    /// Current version of a wedding's guest data.
    async fn get_version(&self, id: &str) -> Result<Option<i64>, AppError> {
        let row = sqlx::query("SELECT version FROM weddings WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get("version")))
    }
}

impl GuestListStore for Repository {
    async fn load(&self, wedding_id: &str) -> Result<Option<StoredGuestList>, AppError> {
        let row = sqlx::query(
            "SELECT guest_name_list, legacy_rsvps, unified_list, version FROM weddings WHERE id = ?",
        )
        .bind(wedding_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let names: String = row.get("guest_name_list");
        let legacy: Option<String> = row.get("legacy_rsvps");
        let unified: Option<String> = row.get("unified_list");

        Ok(Some(StoredGuestList {
            guest_name_list: serde_json::from_str(&names)?,
            legacy_rsvps: legacy.as_deref().map(serde_json::from_str).transpose()?,
            unified_list: unified.as_deref().map(serde_json::from_str).transpose()?,
            version: row.get("version"),
        }))
    }

    async fn save(
        &self,
        wedding_id: &str,
        guests: &[GuestRecord],
        expected_version: i64,
    ) -> Result<i64, AppError> {
        let now = Utc::now().to_rfc3339();
        let unified_json = serde_json::to_string(guests)?;

        // Conditional UPDATE so a concurrent writer cannot be silently overwritten
        let result = sqlx::query(
            "UPDATE weddings SET unified_list = ?, updated_at = ?, version = version + 1 WHERE id = ? AND version = ?"
        )
        .bind(&unified_json)
        .bind(&now)
        .bind(wedding_id)
        .bind(expected_version)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return match self.get_version(wedding_id).await? {
                Some(current) => Err(AppError::Conflict {
                    message: format!(
                        "Version mismatch: expected {}, current {}",
                        expected_version, current
                    ),
                    current_version: current,
                }),
                None => Err(AppError::NotFound(format!(
                    "Wedding {} not found",
                    wedding_id
                ))),
            };
        }

        Ok(expected_version + 1)
    }
}

// Helper functions for row conversion

fn wedding_from_row(row: &sqlx::sqlite::SqliteRow) -> Wedding {
    Wedding {
        id: row.get("id"),
        couple_names: row.get("couple_names"),
        wedding_date: row.get("wedding_date"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        version: row.get("version"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use crate::models::{LegacyRsvpRecord, RsvpStatus};
    use tempfile::TempDir;

    async fn repo() -> (Repository, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let pool = init_database(&temp_dir.path().join("test.sqlite"))
            .await
            .expect("Failed to init DB");
        (Repository::new(pool), temp_dir)
    }

    fn request(names: &[&str]) -> CreateWeddingRequest {
        CreateWeddingRequest {
            couple_names: " Alice & Bob ".to_string(),
            wedding_date: Some("2026-09-12".to_string()),
            guest_name_list: names.iter().map(|n| n.to_string()).collect(),
            legacy_rsvps: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_load() {
        let (repo, _dir) = repo().await;
        let mut req = request(&["Carol", "Dan"]);
        req.legacy_rsvps = Some(vec![LegacyRsvpRecord {
            guest_name: "Dan".to_string(),
            email: Some("dan@x.com".to_string()),
            attending: true,
            number_of_guests: 1,
            plus_one_name: None,
            dietary_restrictions: None,
            song_suggestion: None,
            submitted_at: None,
        }]);

        let wedding = repo.create_wedding(&req, None).await.unwrap();
        assert_eq!(wedding.couple_names, "Alice & Bob");

        let fetched = repo.get_wedding(&wedding.id).await.unwrap().unwrap();
        assert_eq!(fetched.wedding_date.as_deref(), Some("2026-09-12"));

        let stored = repo.load(&wedding.id).await.unwrap().unwrap();
        assert_eq!(stored.guest_name_list, vec!["Carol", "Dan"]);
        assert_eq!(stored.legacy_rsvps.unwrap()[0].guest_name, "Dan");
        assert!(stored.unified_list.is_none());
        assert_eq!(stored.version, 1);

        assert!(repo.load("missing").await.unwrap().is_none());
        assert!(repo.get_wedding("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_checks_version() {
        let (repo, _dir) = repo().await;
        let list = vec![GuestRecord::pending("Carol")];
        let wedding = repo
            .create_wedding(&request(&["Carol"]), Some(&list))
            .await
            .unwrap();

        let mut answered = list.clone();
        answered[0].rsvp_status = RsvpStatus::Yes;
        let version = repo.save(&wedding.id, &answered, 1).await.unwrap();
        assert_eq!(version, 2);

        let stale = repo.save(&wedding.id, &list, 1).await.unwrap_err();
        assert!(matches!(
            stale,
            AppError::Conflict {
                current_version: 2,
                ..
            }
        ));

        let stored = repo.load(&wedding.id).await.unwrap().unwrap();
        assert_eq!(stored.unified_list.unwrap(), answered);

        let missing = repo.save("missing", &list, 1).await.unwrap_err();
        assert!(matches!(missing, AppError::NotFound(_)));
    }
}
