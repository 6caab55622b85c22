//! Student endpoint handlers.
//!
//! Same verbs and status codes as the course endpoints, with an
//! optional `birth_date` field on the record.

use hyper::{body::Bytes, Request, Response};

use crate::router::{AppState, RouterError};
use campus_core::model::StudentFilter;

use super::request_utils::{
    build_empty_response, json_response, map_store_error, parse_list_query, parse_record_id,
    read_request_body_with_timeout, CreateStudentRequest, MatchitParams, ReplaceStudentRequest,
    UpdateStudentRequest,
};

/// Lists students, optionally filtered by exact `id` or `name`.
///
/// `GET /api/v1/students/` → 200, JSON array in insertion order.
pub async fn list_students(
    req: Request<hyper::body::Incoming>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let query = parse_list_query(req.uri().query())?;
    let filter = StudentFilter {
        id: query.id,
        name: query.name,
    };

    let students = state.registry.students(&filter).map_err(map_store_error)?;
    json_response(200, &students)
}

/// Retrieves a single student.
///
/// `GET /api/v1/students/{id}/` → 200 + object, or 404.
pub async fn get_student(
    _req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let record_id = parse_record_id(&params)?;
    let student = state.registry.student(record_id).map_err(map_store_error)?;
    json_response(200, &student)
}

/// Creates a new student.
///
/// `POST /api/v1/students/` with `{"name", "birth_date"?}` → 201.
/// Missing or blank name, or a malformed date, → 400.
pub async fn create_student(
    req: Request<hyper::body::Incoming>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let body_bytes = read_request_body_with_timeout(req, state.config.request_timeout_ms).await?;

    let request: CreateStudentRequest = serde_json::from_slice(&body_bytes)
        .map_err(|e| RouterError::BadRequest(format!("Failed to parse request: {}", e)))?;

    let student = state
        .registry
        .create_student(request.name, request.birth_date)
        .map_err(map_store_error)?;
    tracing::info!("Created student {}", student.id);

    json_response(201, &student)
}

/// Fully updates a student.
///
/// `PUT /api/v1/students/{id}/` → 200 + object, or 404.
pub async fn replace_student(
    req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let record_id = parse_record_id(&params)?;
    let body_bytes = read_request_body_with_timeout(req, state.config.request_timeout_ms).await?;

    let request: ReplaceStudentRequest = serde_json::from_slice(&body_bytes)
        .map_err(|e| RouterError::BadRequest(format!("Failed to parse request: {}", e)))?;

    let student = state
        .registry
        .replace_student(record_id, request.name, request.birth_date)
        .map_err(map_store_error)?;

    json_response(200, &student)
}

/// Partially updates a student.
///
/// `PATCH /api/v1/students/{id}/` → 200 + object, or 404. Absent
/// fields (or an empty body) are left unchanged.
pub async fn update_student(
    req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let record_id = parse_record_id(&params)?;
    let body_bytes = read_request_body_with_timeout(req, state.config.request_timeout_ms).await?;

    let request: UpdateStudentRequest = if body_bytes.is_empty() {
        UpdateStudentRequest::default()
    } else {
        serde_json::from_slice(&body_bytes)
            .map_err(|e| RouterError::BadRequest(format!("Failed to parse request: {}", e)))?
    };

    let student = state
        .registry
        .update_student(record_id, request.name, request.birth_date)
        .map_err(map_store_error)?;

    json_response(200, &student)
}

/// Deletes a student.
///
/// `DELETE /api/v1/students/{id}/` → 204 empty body, or 404.
pub async fn delete_student(
    _req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let record_id = parse_record_id(&params)?;
    state
        .registry
        .delete_student(record_id)
        .map_err(map_store_error)?;
    tracing::info!("Deleted student {}", record_id);

    build_empty_response(204)
}
