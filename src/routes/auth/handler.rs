use axum::{
    Json,
    extract::{Extension, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    AppState,
    error::AppError,
    utils::{AppJson, Claims, generate_token, hash_password, verify_password},
};

use super::model::{AuthResponse, LoginRequest, RegisterRequest, User, is_unique_violation};

/// One message for both "no such user" and "wrong password", so the login
/// endpoint gives no user-enumeration signal.
fn invalid_credentials() -> AppError {
    AppError::Validation("Invalid credentials".into())
}

#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    if User::email_exists(&state.pool, &req.email).await? {
        return Err(AppError::Validation(
            "User with this email already exists".into(),
        ));
    }

    let password_hash = hash_password(&req.password)?;

    // The unique index on email is the real guard against a racing
    // duplicate registration; the existence check above only gives the
    // common case a clean message.
    let user = match User::create(&state.pool, &req, &password_hash).await {
        Ok(user) => user,
        Err(e) if is_unique_violation(&e) => {
            return Err(AppError::Validation(
                "User with this email already exists".into(),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    let token = generate_token(user.id, &state.config)?;
    tracing::info!("registered user {} ({})", user.id, user.user_type);

    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = User::find_by_email(&state.pool, &req.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !verify_password(&req.password, &user.password_hash)? {
        return Err(invalid_credentials());
    }

    let token = generate_token(user.id, &state.config)?;

    Ok(Json(AuthResponse { token, user }))
}

#[axum::debug_handler]
pub async fn me(
    Extension(claims): Extension<Claims>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let user = User::find_by_id(&state.pool, claims.sub)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(Json(user))
}

#[cfg(test)]
mod tests {
    use super::invalid_credentials;
    use axum::http::StatusCode;

    #[test]
    fn unknown_user_and_wrong_password_share_one_error() {
        // Both login failure paths go through the same constructor, so the
        // message and status cannot drift apart.
        let err = invalid_credentials();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Invalid credentials");
    }
}
