//! Startup user seeding.
//!
//! Accounts come from a declarative JSON file of `{username, password}`
//! records. The pass is an idempotent reconciliation: usernames that already
//! exist are skipped, new ones are inserted with a hashed password, and
//! malformed records are logged and skipped. This is the only place the
//! system continues past a per-record error.

use super::{errors::AuthResult, manager::AuthManager};
use log::{info, warn};
use serde::Deserialize;
use std::path::Path;

/// One account record from the seed file.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedRecord {
    pub username: String,
    pub password: String,
}

/// Outcome of a seeding pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub created: usize,
    pub skipped: usize,
    pub malformed: usize,
}

impl AuthManager {
    /// Reconcile the users table with a JSON seed file.
    ///
    /// Fails only when the file cannot be read or is not a JSON array;
    /// individual malformed records are counted and skipped.
    pub async fn seed_users_from_file(&self, path: &Path) -> AuthResult<SeedSummary> {
        let raw = tokio::fs::read_to_string(path).await?;
        let entries: Vec<serde_json::Value> = serde_json::from_str(&raw)?;

        let mut summary = SeedSummary::default();
        for (index, value) in entries.into_iter().enumerate() {
            let record = match parse_seed_record(value) {
                Ok(record) => record,
                Err(reason) => {
                    warn!("Skipping malformed seed record {index}: {reason}");
                    summary.malformed += 1;
                    continue;
                }
            };

            if self.seed_user(&record).await? {
                info!("Seeded user {}", record.username);
                summary.created += 1;
            } else {
                summary.skipped += 1;
            }
        }

        info!(
            "User seeding complete: {} created, {} existing, {} malformed",
            summary.created, summary.skipped, summary.malformed
        );
        Ok(summary)
    }

    /// Insert one seeded account; returns false when the username exists.
    async fn seed_user(&self, record: &SeedRecord) -> AuthResult<bool> {
        let password_hash = self.hash_password(&record.password)?;

        // ON CONFLICT keeps the pass idempotent and race-free against a
        // concurrent seeding run.
        let result = sqlx::query(
            "INSERT INTO users (username, password_hash) VALUES ($1, $2)
             ON CONFLICT (username) DO NOTHING",
        )
        .bind(&record.username)
        .bind(&password_hash)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn parse_seed_record(value: serde_json::Value) -> Result<SeedRecord, String> {
    let record: SeedRecord =
        serde_json::from_value(value).map_err(|err| err.to_string())?;
    if record.username.trim().is_empty() {
        return Err("empty username".to_string());
    }
    if record.password.is_empty() {
        return Err("empty password".to_string());
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_well_formed_record() {
        let record = parse_seed_record(json!({"username": "arbiter", "password": "s3cret"}))
            .expect("record should parse");
        assert_eq!(record.username, "arbiter");
        assert_eq!(record.password, "s3cret");
    }

    #[test]
    fn rejects_missing_fields_and_blanks() {
        assert!(parse_seed_record(json!({"username": "arbiter"})).is_err());
        assert!(parse_seed_record(json!({"username": "  ", "password": "x"})).is_err());
        assert!(parse_seed_record(json!({"username": "a", "password": ""})).is_err());
        assert!(parse_seed_record(json!("not-an-object")).is_err());
    }
}
