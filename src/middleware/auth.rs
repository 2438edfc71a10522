use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};

use crate::{AppState, error::AppError, utils::verify_token};

/// Verifies the bearer token on protected routes and makes the decoded
/// claims available to handlers as a request extension. Missing and invalid
/// tokens are both 401 but are logged distinctly.
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(TypedHeader(Authorization(bearer))) = bearer else {
        tracing::warn!("request rejected: missing bearer token");
        return Err(AppError::MissingToken);
    };

    let claims = verify_token(bearer.token(), &state.config).map_err(|e| {
        tracing::warn!("request rejected: invalid or expired token: {e}");
        AppError::InvalidToken
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
