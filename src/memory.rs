//! Persistent project memory backed by SQLite.
//!
//! Driver-level collaborator: agents never touch it. Stores the details of
//! successfully created projects so `boulevard list` survives restarts.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::path::Path;
use tracing::info;

use crate::error::{BoulevardError, Result};

/// A stored project row.
#[derive(Debug, Clone)]
pub struct ProjectRecord {
    pub name: String,
    pub details: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct MemoryManager {
    pool: SqlitePool,
}

impl MemoryManager {
    /// Open (creating if needed) the database at `data_dir/boulevard.db`.
    pub async fn open(data_dir: &Path) -> Result<Self> {
        tokio::fs::create_dir_all(data_dir).await?;

        let options = SqliteConnectOptions::new()
            .filename(data_dir.join("boulevard.db"))
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let manager = Self { pool };
        manager.init_schema().await?;
        info!(dir = %data_dir.display(), "memory store ready");
        Ok(manager)
    }

    async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS projects (
                name TEXT PRIMARY KEY,
                details TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Insert or replace the stored details for a project.
    pub async fn store_project_details(&self, name: &str, details: &Value) -> Result<()> {
        sqlx::query(
            "INSERT OR REPLACE INTO projects (name, details, created_at) VALUES (?1, ?2, ?3)",
        )
        .bind(name)
        .bind(details.to_string())
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// All stored projects, oldest first.
    pub async fn get_all_projects(&self) -> Result<Vec<ProjectRecord>> {
        let rows = sqlx::query("SELECT name, details, created_at FROM projects ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|row| {
                let details: Value = serde_json::from_str(&row.get::<String, _>("details"))?;
                let created_at =
                    DateTime::parse_from_rfc3339(&row.get::<String, _>("created_at"))
                        .map_err(|e| {
                            BoulevardError::Internal(format!("corrupt created_at column: {e}"))
                        })?
                        .with_timezone(&Utc);
                Ok(ProjectRecord {
                    name: row.get("name"),
                    details,
                    created_at,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    #[tokio::test]
    async fn store_and_list_round_trip() {
        let dir = std::env::temp_dir().join(format!("boulevard-mem-{}", Uuid::new_v4()));
        let memory = MemoryManager::open(&dir).await.unwrap();

        memory
            .store_project_details("demo", &json!({"framework": "flask"}))
            .await
            .unwrap();
        // Same name again: replaced, not duplicated.
        memory
            .store_project_details("demo", &json!({"framework": "react"}))
            .await
            .unwrap();

        let projects = memory.get_all_projects().await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "demo");
        assert_eq!(projects[0].details["framework"], "react");

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
