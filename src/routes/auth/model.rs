use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::AppError;

pub const USER_TYPES: &[&str] = &["jobseeker", "employer"];

const USER_COLUMNS: &str =
    "id, name, email, password_hash, phone, location, user_type, created_at";

#[derive(Debug, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub user_type: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "userType")]
    pub user_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("Name is required".into()));
        }
        if !self.email.contains('@') {
            return Err(AppError::Validation("A valid email is required".into()));
        }
        if self.password.len() < 6 {
            return Err(AppError::Validation(
                "Password must be at least 6 characters".into(),
            ));
        }
        // bcrypt truncates beyond 72 bytes
        if self.password.len() > 72 {
            return Err(AppError::Validation(
                "Password must be at most 72 characters".into(),
            ));
        }
        if !USER_TYPES.contains(&self.user_type.as_str()) {
            return Err(AppError::Validation(
                "userType must be 'jobseeker' or 'employer'".into(),
            ));
        }
        Ok(())
    }
}

pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

impl User {
    pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        req: &RegisterRequest,
        password_hash: &str,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (name, email, password_hash, phone, location, user_type)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&req.name)
        .bind(&req.email)
        .bind(password_hash)
        .bind(&req.phone)
        .bind(&req.location)
        .bind(&req.user_type)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, user_id: i32) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn update_profile(
        pool: &PgPool,
        user_id: i32,
        name: &str,
        phone: Option<&str>,
        location: Option<&str>,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET name = $1, phone = $2, location = $3
             WHERE id = $4
             RETURNING {USER_COLUMNS}"
        ))
        .bind(name)
        .bind(phone)
        .bind(location)
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_register() -> serde_json::Value {
        json!({
            "name": "Alice",
            "email": "alice@x.com",
            "password": "hunter42",
            "phone": "+255700000000",
            "location": "Dar es Salaam",
            "userType": "jobseeker"
        })
    }

    #[test]
    fn register_request_accepts_the_documented_shape() {
        let req: RegisterRequest = serde_json::from_value(valid_register()).unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn register_request_rejects_unknown_fields() {
        let mut body = valid_register();
        body["isAdmin"] = json!(true);
        assert!(serde_json::from_value::<RegisterRequest>(body).is_err());
    }

    #[test]
    fn register_request_rejects_missing_fields() {
        let mut body = valid_register();
        body.as_object_mut().unwrap().remove("email");
        assert!(serde_json::from_value::<RegisterRequest>(body).is_err());
    }

    #[test]
    fn register_request_validates_password_length_and_user_type() {
        let mut body = valid_register();
        body["password"] = json!("short");
        let req: RegisterRequest = serde_json::from_value(body).unwrap();
        assert!(req.validate().is_err());

        let mut body = valid_register();
        body["userType"] = json!("admin");
        let req: RegisterRequest = serde_json::from_value(body).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn serialized_user_never_contains_the_password_hash() {
        let user = User {
            id: 1,
            name: "Alice".into(),
            email: "alice@x.com".into(),
            password_hash: "$2b$10$secret".into(),
            phone: None,
            location: None,
            user_type: "jobseeker".into(),
            created_at: chrono::Utc::now(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password_hash").is_none());
        assert_eq!(value["email"], "alice@x.com");
    }
}
