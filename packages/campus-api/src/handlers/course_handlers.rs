//! Course endpoint handlers.

use hyper::{body::Bytes, Request, Response};

use crate::router::{AppState, RouterError};
use campus_core::model::CourseFilter;

use super::request_utils::{
    build_empty_response, json_response, map_store_error, parse_list_query, parse_record_id,
    read_request_body_with_timeout, CreateCourseRequest, MatchitParams, ReplaceCourseRequest,
    UpdateCourseRequest,
};

/// Lists courses, optionally filtered.
///
/// # Endpoint
/// `GET /api/v1/courses/`
///
/// # Query Parameters
/// - `id`: exact id filter
/// - `name`: exact name filter
///
/// # Response
/// - **200 OK**: JSON array of courses in insertion order
/// ```json
/// [
///   {"id": 1, "name": "algebra"},
///   {"id": 2, "name": "physics"}
/// ]
/// ```
///
/// # Errors
/// - **400 Bad Request**: Malformed `id` filter value
///
/// # Example
/// ```bash
/// curl "http://localhost:8080/api/v1/courses/?name=algebra"
/// ```
pub async fn list_courses(
    req: Request<hyper::body::Incoming>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let query = parse_list_query(req.uri().query())?;
    let filter = CourseFilter {
        id: query.id,
        name: query.name,
    };

    let courses = state.registry.courses(&filter).map_err(map_store_error)?;
    json_response(200, &courses)
}

/// Retrieves a single course.
///
/// # Endpoint
/// `GET /api/v1/courses/{id}/`
///
/// # Response
/// - **200 OK**: `{"id": <int>, "name": <string>}`
///
/// # Errors
/// - **400 Bad Request**: Non-integer id
/// - **404 Not Found**: No course with that id
pub async fn get_course(
    _req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let record_id = parse_record_id(&params)?;
    let course = state.registry.course(record_id).map_err(map_store_error)?;
    json_response(200, &course)
}

/// Creates a new course.
///
/// # Endpoint
/// `POST /api/v1/courses/`
///
/// # Request Body
/// ```json
/// {"name": "test course"}
/// ```
///
/// # Response
/// - **201 Created**: the created course with its assigned id
///
/// # Errors
/// - **400 Bad Request**: Missing or blank name
pub async fn create_course(
    req: Request<hyper::body::Incoming>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let body_bytes = read_request_body_with_timeout(req, state.config.request_timeout_ms).await?;

    let request: CreateCourseRequest = serde_json::from_slice(&body_bytes)
        .map_err(|e| RouterError::BadRequest(format!("Failed to parse request: {}", e)))?;

    let course = state
        .registry
        .create_course(request.name)
        .map_err(map_store_error)?;
    tracing::info!("Created course {}", course.id);

    json_response(201, &course)
}

/// Fully updates a course.
///
/// # Endpoint
/// `PUT /api/v1/courses/{id}/`
///
/// # Errors
/// - **400 Bad Request**: Missing or blank name
/// - **404 Not Found**: No course with that id
pub async fn replace_course(
    req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let record_id = parse_record_id(&params)?;
    let body_bytes = read_request_body_with_timeout(req, state.config.request_timeout_ms).await?;

    let request: ReplaceCourseRequest = serde_json::from_slice(&body_bytes)
        .map_err(|e| RouterError::BadRequest(format!("Failed to parse request: {}", e)))?;

    let course = state
        .registry
        .replace_course(record_id, request.name)
        .map_err(map_store_error)?;

    json_response(200, &course)
}

/// Partially updates a course.
///
/// # Endpoint
/// `PATCH /api/v1/courses/{id}/`
///
/// # Request Body
/// ```json
/// {"name": "new name"}
/// ```
///
/// An empty body or absent `name` leaves the record unchanged.
///
/// # Response
/// - **200 OK**: the updated course
///
/// # Errors
/// - **400 Bad Request**: Blank name
/// - **404 Not Found**: No course with that id
pub async fn update_course(
    req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let record_id = parse_record_id(&params)?;
    let body_bytes = read_request_body_with_timeout(req, state.config.request_timeout_ms).await?;

    let request: UpdateCourseRequest = if body_bytes.is_empty() {
        UpdateCourseRequest::default()
    } else {
        serde_json::from_slice(&body_bytes)
            .map_err(|e| RouterError::BadRequest(format!("Failed to parse request: {}", e)))?
    };

    let course = state
        .registry
        .update_course(record_id, request.name)
        .map_err(map_store_error)?;

    json_response(200, &course)
}

/// Deletes a course.
///
/// # Endpoint
/// `DELETE /api/v1/courses/{id}/`
///
/// # Response
/// - **204 No Content**: Course removed
///
/// # Errors
/// - **400 Bad Request**: Non-integer id
/// - **404 Not Found**: No course with that id
pub async fn delete_course(
    _req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let record_id = parse_record_id(&params)?;
    state
        .registry
        .delete_course(record_id)
        .map_err(map_store_error)?;
    tracing::info!("Deleted course {}", record_id);

    build_empty_response(204)
}
