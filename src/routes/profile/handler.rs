use axum::{
    Json,
    extract::{Extension, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    AppState,
    error::AppError,
    utils::{AppJson, Claims},
};

use super::model::{
    AddEducationRequest, AddExperienceRequest, AddSkillRequest, Education, Experience, Profile,
    Skill, UpdateProfileRequest,
};
use crate::routes::auth::model::User;

#[axum::debug_handler]
pub async fn get_profile(
    Extension(claims): Extension<Claims>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let user = User::find_by_id(&state.pool, claims.sub)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    // Three independent reads, no transaction. Accepted read skew: a skill
    // inserted concurrently may or may not appear alongside the user row.
    let skills = Skill::for_user(&state.pool, user.id).await?;
    let education = Education::for_user(&state.pool, user.id).await?;
    let experience = Experience::for_user(&state.pool, user.id).await?;

    Ok(Json(Profile {
        user,
        skills,
        education,
        experience,
    }))
}

#[axum::debug_handler]
pub async fn update_profile(
    Extension(claims): Extension<Claims>,
    State(state): State<AppState>,
    AppJson(req): AppJson<UpdateProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let user = User::update_profile(
        &state.pool,
        claims.sub,
        &req.name,
        req.phone.as_deref(),
        req.location.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(Json(user))
}

#[axum::debug_handler]
pub async fn add_skill(
    Extension(claims): Extension<Claims>,
    State(state): State<AppState>,
    AppJson(req): AppJson<AddSkillRequest>,
) -> Result<impl IntoResponse, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("Skill name is required".into()));
    }

    let skill = Skill::create(&state.pool, claims.sub, &req).await?;
    Ok((StatusCode::CREATED, Json(skill)))
}

#[axum::debug_handler]
pub async fn add_education(
    Extension(claims): Extension<Claims>,
    State(state): State<AppState>,
    AppJson(req): AppJson<AddEducationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let education = Education::create(&state.pool, claims.sub, &req).await?;
    Ok((StatusCode::CREATED, Json(education)))
}

#[axum::debug_handler]
pub async fn add_experience(
    Extension(claims): Extension<Claims>,
    State(state): State<AppState>,
    AppJson(req): AppJson<AddExperienceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let experience = Experience::create(&state.pool, claims.sub, &req).await?;
    Ok((StatusCode::CREATED, Json(experience)))
}
