use axum::{
    Json,
    extract::{Extension, Path, Query, State},
    response::IntoResponse,
};

use crate::{AppState, error::AppError, utils::Claims};

use super::model::{Job, JobFilters, JobListQuery, RECENT_JOBS_LIMIT};
use crate::routes::profile::model::Skill;

/// Returns the most recent jobs. Optional multi-value filters are applied
/// in memory over the fetched page, the same intersection the web client
/// performs over its checkbox sets.
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let jobs = Job::list_recent(&state.pool, RECENT_JOBS_LIMIT).await?;

    let filters = JobFilters::from_query(&query);
    if filters.is_empty() {
        return Ok(Json(jobs));
    }

    let filtered: Vec<Job> = jobs.into_iter().filter(|job| filters.matches(job)).collect();
    Ok(Json(filtered))
}

#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let job = Job::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".into()))?;

    Ok(Json(job))
}

#[axum::debug_handler]
pub async fn recommended_jobs(
    Extension(claims): Extension<Claims>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let skill_names = Skill::names_for_user(&state.pool, claims.sub).await?;
    let jobs = Job::recommended_for(&state.pool, &skill_names).await?;

    Ok(Json(jobs))
}
