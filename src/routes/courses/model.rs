use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

const COURSE_COLUMNS: &str = "id, title, provider, duration, level, skills, description, \
     certificate, cost_amount, cost_currency, created_at";

pub const RECENT_COURSES_LIMIT: i64 = 50;

#[derive(Debug, Serialize, FromRow)]
pub struct Course {
    pub id: i32,
    pub title: String,
    pub provider: String,
    pub duration: String,
    pub level: String,
    pub skills: Vec<String>,
    pub description: String,
    pub certificate: bool,
    pub cost_amount: i32,
    pub cost_currency: String,
    pub created_at: DateTime<Utc>,
}

impl Course {
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses ORDER BY created_at DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, course_id: i32) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"
        ))
        .bind(course_id)
        .fetch_optional(pool)
        .await
    }
}
