use crate::config::Storage;
use crate::model::{Feedback, NewFeedback};
use anyhow::Result;
use libsql::{Builder, Connection, Database as LibsqlDatabase};
use std::time::Duration;

const SCHEMA: &str = include_str!("schema/feedback.sql");

/// Owns the single connection every request goes through.
pub struct Database {
    conn: Connection,
    // Must outlive `conn`; replicas sync in the background.
    _db: LibsqlDatabase,
}

impl Database {
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub async fn new(cfg: &Storage) -> Result<Self> {
        let path = cfg.get_db();

        let db = match cfg.replica() {
            Some((url, token)) => {
                tracing::info!("[db] running in synced database mode");
                let sync_interval = Duration::from_secs(cfg.sync_interval_seconds);
                Builder::new_synced_database(path, url.to_string(), token.to_string())
                    .sync_interval(sync_interval)
                    .build()
                    .await?
            }
            None => Builder::new_local(path).build().await?,
        };

        Self::open(db).await
    }

    /// A private database that lives as long as the returned handle.
    pub async fn in_memory() -> Result<Self> {
        let db = Builder::new_local(":memory:").build().await?;
        Self::open(db).await
    }

    async fn open(db: LibsqlDatabase) -> Result<Self> {
        let conn = db.connect()?;
        conn.query("SELECT 1", ()).await?;
        conn.execute_batch(SCHEMA)
            .await
            .map_err(|e| anyhow::anyhow!("failed to apply schema: {e}"))?;

        Ok(Database { conn, _db: db })
    }

    pub async fn insert_feedback(&self, input: &NewFeedback) -> Result<Feedback> {
        let query = r#"
            INSERT INTO Feedback (studentName, courseCode, comments, rating)
            VALUES (?, ?, ?, ?)
            RETURNING id, studentName, courseCode, comments, rating
        "#;

        let mut rows = self
            .conn
            .query(
                query,
                libsql::params![
                    input.student_name.as_str(),
                    input.course_code.as_str(),
                    input.comments.as_deref(),
                    input.rating
                ],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Self::row_to_feedback(&row),
            None => anyhow::bail!("insert returned no row"),
        }
    }

    pub async fn list_feedback(&self) -> Result<Vec<Feedback>> {
        let query = r#"
            SELECT id, studentName, courseCode, comments, rating
            FROM Feedback
            ORDER BY id DESC
        "#;

        let mut rows = self.conn.query(query, ()).await?;
        let mut feedback = Vec::new();

        while let Some(row) = rows.next().await? {
            feedback.push(Self::row_to_feedback(&row)?);
        }

        Ok(feedback)
    }

    /// Returns false when no row had the given id. The deleted row is read
    /// back with `RETURNING` because the connection's change counter is shared
    /// with concurrent requests.
    pub async fn delete_feedback(&self, id: i64) -> Result<bool> {
        let mut rows = self
            .conn
            .query("DELETE FROM Feedback WHERE id = ? RETURNING id", libsql::params![id])
            .await?;
        Ok(rows.next().await?.is_some())
    }

    fn row_to_feedback(row: &libsql::Row) -> Result<Feedback> {
        Ok(Feedback {
            id: row.get(0)?,
            student_name: row.get(1)?,
            course_code: row.get(2)?,
            comments: row.get(3)?,
            rating: row.get(4)?,
        })
    }
}
