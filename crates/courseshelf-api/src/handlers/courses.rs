//! Course listing and lookup endpoint.

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use courseshelf_core::{AppError, Course};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CourseQuery {
    pub id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct CourseEnvelope {
    pub course: Course,
}

#[derive(Debug, Serialize)]
pub struct CoursesEnvelope {
    pub courses: Vec<Course>,
}

/// `GET /api/courses` lists everything; `GET /api/courses?id={id}` returns a
/// single course or 404. An unknown id is a distinct outcome from a server
/// error.
pub async fn get_courses(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CourseQuery>,
) -> Result<Response, HttpAppError> {
    if let Some(id) = query.id {
        let course = state
            .registry
            .get_course(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Course {} not found", id)))?;
        return Ok(Json(CourseEnvelope { course }).into_response());
    }

    let courses = state.registry.list_courses().await?;
    Ok(Json(CoursesEnvelope { courses }).into_response())
}
