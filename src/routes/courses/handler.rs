use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{AppState, error::AppError};

use super::model::{Course, RECENT_COURSES_LIMIT};

#[axum::debug_handler]
pub async fn list_courses(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let courses = Course::list_recent(&state.pool, RECENT_COURSES_LIMIT).await?;
    Ok(Json(courses))
}

#[axum::debug_handler]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let course = Course::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".into()))?;

    Ok(Json(course))
}
