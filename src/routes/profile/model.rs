use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::AppError;
use crate::routes::auth::model::User;

#[derive(Debug, Serialize, FromRow)]
pub struct Skill {
    pub id: i32,
    pub name: String,
    pub level: String,
    pub endorsed: i32,
}

#[derive(Debug, Serialize, FromRow)]
pub struct Education {
    pub id: i32,
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub in_progress: bool,
}

#[derive(Debug, Serialize, FromRow)]
pub struct Experience {
    pub id: i32,
    pub title: String,
    pub company: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

/// Denormalized profile response. Composed from four independent reads with
/// no transaction; a concurrent insert between the reads may or may not
/// appear in the arrays.
#[derive(Debug, Serialize)]
pub struct Profile {
    #[serde(flatten)]
    pub user: User,
    pub skills: Vec<Skill>,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub phone: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddSkillRequest {
    pub name: String,
    pub level: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AddEducationRequest {
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub in_progress: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AddExperienceRequest {
    pub title: String,
    pub company: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("Name is required".into()));
        }
        Ok(())
    }
}

impl Skill {
    pub async fn for_user(pool: &PgPool, user_id: i32) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Skill>(
            "SELECT id, name, level, endorsed FROM skills WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    pub async fn names_for_user(pool: &PgPool, user_id: i32) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT name FROM skills WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        user_id: i32,
        req: &AddSkillRequest,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Skill>(
            "INSERT INTO skills (user_id, name, level)
             VALUES ($1, $2, $3)
             RETURNING id, name, level, endorsed",
        )
        .bind(user_id)
        .bind(&req.name)
        .bind(&req.level)
        .fetch_one(pool)
        .await
    }
}

impl Education {
    pub async fn for_user(pool: &PgPool, user_id: i32) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Education>(
            "SELECT id, institution, degree, field_of_study, start_date, end_date, in_progress
             FROM education WHERE user_id = $1 ORDER BY start_date DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    pub async fn create(
        pool: &PgPool,
        user_id: i32,
        req: &AddEducationRequest,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Education>(
            "INSERT INTO education
                 (user_id, institution, degree, field_of_study, start_date, end_date, in_progress)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id, institution, degree, field_of_study, start_date, end_date, in_progress",
        )
        .bind(user_id)
        .bind(&req.institution)
        .bind(&req.degree)
        .bind(&req.field_of_study)
        .bind(req.start_date)
        .bind(req.end_date)
        .bind(req.in_progress)
        .fetch_one(pool)
        .await
    }
}

impl Experience {
    pub async fn for_user(pool: &PgPool, user_id: i32) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Experience>(
            "SELECT id, title, company, location, start_date, end_date, current, description
             FROM experience WHERE user_id = $1 ORDER BY start_date DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    pub async fn create(
        pool: &PgPool,
        user_id: i32,
        req: &AddExperienceRequest,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Experience>(
            "INSERT INTO experience
                 (user_id, title, company, location, start_date, end_date, current, description)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id, title, company, location, start_date, end_date, current, description",
        )
        .bind(user_id)
        .bind(&req.title)
        .bind(&req.company)
        .bind(&req.location)
        .bind(req.start_date)
        .bind(req.end_date)
        .bind(req.current)
        .bind(&req.description)
        .fetch_one(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_request_rejects_unknown_fields() {
        let body = json!({
            "name": "Alice",
            "phone": null,
            "location": "Arusha",
            "email": "alice@x.com"
        });
        assert!(serde_json::from_value::<UpdateProfileRequest>(body).is_err());
    }

    #[test]
    fn update_request_requires_a_name() {
        let req: UpdateProfileRequest =
            serde_json::from_value(json!({ "name": "  ", "phone": null, "location": null }))
                .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn education_request_parses_camel_case_dates() {
        let req: AddEducationRequest = serde_json::from_value(json!({
            "institution": "University of Dar es Salaam",
            "degree": "BSc",
            "fieldOfStudy": "Computer Science",
            "startDate": "2021-09-01",
            "endDate": null
        }))
        .unwrap();
        assert_eq!(req.start_date.to_string(), "2021-09-01");
        assert!(!req.in_progress);
    }

    #[test]
    fn profile_serializes_user_fields_at_the_top_level() {
        let profile = Profile {
            user: crate::routes::auth::model::User {
                id: 7,
                name: "Alice".into(),
                email: "alice@x.com".into(),
                password_hash: "hash".into(),
                phone: None,
                location: None,
                user_type: "jobseeker".into(),
                created_at: chrono::Utc::now(),
            },
            skills: vec![],
            education: vec![],
            experience: vec![],
        };
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["id"], 7);
        assert!(value.get("password_hash").is_none());
        assert!(value["skills"].as_array().unwrap().is_empty());
    }
}
