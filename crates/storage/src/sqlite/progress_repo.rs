use async_trait::async_trait;
use sqlx::Row;

use quiz_core::model::{Answer, QuizId};

use super::SqliteRepository;
use crate::repository::{ProgressRecord, ProgressRepository, StorageError};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

fn id_i64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

fn map_progress_row(row: &sqlx::sqlite::SqliteRow) -> Result<ProgressRecord, StorageError> {
    let quiz_id: i64 = row.try_get("quiz_id").map_err(ser)?;
    let quiz_id = u64::try_from(quiz_id)
        .map(QuizId::new)
        .map_err(|_| StorageError::Serialization(format!("invalid quiz_id: {quiz_id}")))?;

    let current_index: i64 = row.try_get("current_index").map_err(ser)?;
    let current_index = usize::try_from(current_index)
        .map_err(|_| StorageError::Serialization(format!("invalid current_index: {current_index}")))?;

    let answers_json: String = row.try_get("answers").map_err(ser)?;
    let answers: Vec<Answer> = serde_json::from_str(&answers_json).map_err(ser)?;

    let started_at = row.try_get("started_at").map_err(ser)?;

    Ok(ProgressRecord {
        quiz_id,
        current_index,
        answers,
        started_at,
    })
}

#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn load_progress(&self) -> Result<Option<ProgressRecord>, StorageError> {
        let row = sqlx::query(
            r"
                SELECT quiz_id, current_index, answers, started_at
                FROM quiz_progress
                WHERE id = 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_progress_row).transpose()
    }

    async fn save_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let quiz_id = id_i64("quiz_id", record.quiz_id.value())?;
        let current_index = i64::try_from(record.current_index)
            .map_err(|_| StorageError::Serialization("current_index overflow".into()))?;
        let answers = serde_json::to_string(&record.answers).map_err(ser)?;

        sqlx::query(
            r"
                INSERT INTO quiz_progress (id, quiz_id, current_index, answers, started_at)
                VALUES (1, ?1, ?2, ?3, ?4)
                ON CONFLICT(id) DO UPDATE SET
                    quiz_id = excluded.quiz_id,
                    current_index = excluded.current_index,
                    answers = excluded.answers,
                    started_at = excluded.started_at
            ",
        )
        .bind(quiz_id)
        .bind(current_index)
        .bind(answers)
        .bind(record.started_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    async fn clear_progress(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM quiz_progress WHERE id = 1")
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(())
    }
}
