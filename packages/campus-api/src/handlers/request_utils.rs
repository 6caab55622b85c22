//! Request utilities for HTTP endpoints.

use chrono::NaiveDate;
use http_body_util::BodyExt;
use hyper::{body::Bytes, Request, Response};
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use tokio::time;

use crate::router::RouterError;
use campus_core::error::StoreError;

/// Type alias for matchit parameters with explicit lifetimes
pub type MatchitParams<'a, 'b> = matchit::Params<'a, 'b>;

/// Reads the request body, failing with a timeout after `timeout_ms`.
pub async fn read_request_body_with_timeout(
    req: Request<hyper::body::Incoming>,
    timeout_ms: u64,
) -> Result<Bytes, RouterError> {
    let collected = time::timeout(time::Duration::from_millis(timeout_ms), req.collect())
        .await
        .map_err(|_| RouterError::Timeout)?
        .map_err(|e| RouterError::InternalError(format!("Failed to read request body: {}", e)))?;
    Ok(collected.to_bytes())
}

/// Parses the `{id}` route parameter.
pub fn parse_record_id(params: &MatchitParams<'_, '_>) -> Result<u64, RouterError> {
    let record_id_str = params.get("id").unwrap_or("0");
    record_id_str.parse().map_err(|e| {
        RouterError::BadRequest(format!("Invalid record ID '{}': {}", record_id_str, e))
    })
}

/// Map StoreError to appropriate RouterError
pub fn map_store_error(e: StoreError) -> RouterError {
    match e {
        StoreError::RecordNotFound { .. } => RouterError::NotFound(e.to_string()),
        StoreError::Validation { .. } => RouterError::BadRequest(e.to_string()),
        StoreError::LockPoisoned => RouterError::InternalError(e.to_string()),
    }
}

/// Request to create a course.
#[derive(Debug, Deserialize)]
pub struct CreateCourseRequest {
    /// Course name
    pub name: String,
}

/// Request for partial course update.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCourseRequest {
    /// New course name; absent leaves the name unchanged
    pub name: Option<String>,
}

/// Request for full course update.
#[derive(Debug, Deserialize)]
pub struct ReplaceCourseRequest {
    /// Course name
    pub name: String,
}

/// Request to create a student.
#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    /// Student name
    pub name: String,
    /// ISO-8601 date of birth
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

/// Request for partial student update.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateStudentRequest {
    /// New student name; absent leaves the name unchanged
    pub name: Option<String>,
    /// New date of birth; absent leaves the date unchanged
    pub birth_date: Option<NaiveDate>,
}

/// Request for full student update.
#[derive(Debug, Deserialize)]
pub struct ReplaceStudentRequest {
    /// Student name
    pub name: String,
    /// ISO-8601 date of birth
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

/// Builds a JSON response from already-serialized bytes.
pub fn build_response(status: u16, json: Vec<u8>) -> Result<Response<Bytes>, RouterError> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Bytes::from(json))
        .map_err(|e| RouterError::InternalError(format!("Failed to build {} response: {}", status, e)))
}

/// Builds a bodiless response (for 204 No Content).
pub fn build_empty_response(status: u16) -> Result<Response<Bytes>, RouterError> {
    Response::builder()
        .status(status)
        .body(Bytes::new())
        .map_err(|e| RouterError::InternalError(format!("Failed to build {} response: {}", status, e)))
}

/// Serializes data into a JSON response with the given status.
pub fn json_response<T: Serialize>(status: u16, data: &T) -> Result<Response<Bytes>, RouterError> {
    let json = serde_json::to_vec(data)
        .map_err(|e| RouterError::InternalError(format!("Failed to serialize response: {}", e)))?;
    build_response(status, json)
}

/// Exact-match list filters parsed from the URL query string.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ListQuery {
    /// Exact id filter
    pub id: Option<u64>,
    /// Exact name filter
    pub name: Option<String>,
}

/// Parse list filters from URL query string.
///
/// Only `id` and `name` are recognized; unknown keys are ignored.
pub fn parse_list_query(query_str: Option<&str>) -> Result<ListQuery, RouterError> {
    let mut query = ListQuery::default();

    if let Some(query_str) = query_str {
        for pair in query_str.split('&') {
            // Split on the first '=' only; the value may itself contain one
            let parts: Vec<&str> = pair.splitn(2, '=').collect();
            if parts.len() != 2 {
                continue;
            }
            let key = parts[0];
            // Form encoding turns spaces into '+'; a literal plus arrives as %2B
            let encoded_value = parts[1].replace('+', " ");
            let decoded_value = percent_decode_str(&encoded_value).decode_utf8_lossy();

            match key {
                "id" => {
                    query.id = Some(decoded_value.parse().map_err(|e| {
                        RouterError::BadRequest(format!(
                            "Invalid id value '{}': {}",
                            decoded_value, e
                        ))
                    })?);
                }
                "name" => {
                    query.name = Some(decoded_value.into_owned());
                }
                _ => {}
            }
        }
    }

    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_query() {
        // Empty query
        let query = parse_list_query(None).unwrap();
        assert!(query.id.is_none());
        assert!(query.name.is_none());

        // id filter
        let query = parse_list_query(Some("id=42")).unwrap();
        assert_eq!(query.id, Some(42));
        assert!(query.name.is_none());

        // name filter with percent and plus encoded spaces
        let query = parse_list_query(Some("name=test%20course")).unwrap();
        assert_eq!(query.name.as_deref(), Some("test course"));
        let query = parse_list_query(Some("name=test+course")).unwrap();
        assert_eq!(query.name.as_deref(), Some("test course"));

        // Combined filters
        let query = parse_list_query(Some("id=7&name=algebra")).unwrap();
        assert_eq!(query.id, Some(7));
        assert_eq!(query.name.as_deref(), Some("algebra"));

        // Unknown keys are ignored
        let query = parse_list_query(Some("limit=10&name=algebra")).unwrap();
        assert!(query.id.is_none());
        assert_eq!(query.name.as_deref(), Some("algebra"));

        // Malformed pairs are skipped
        let query = parse_list_query(Some("id&name=x")).unwrap();
        assert!(query.id.is_none());
        assert_eq!(query.name.as_deref(), Some("x"));

        // A value containing '=' keeps everything after the first one
        let query = parse_list_query(Some("name=a=b")).unwrap();
        assert_eq!(query.name.as_deref(), Some("a=b"));

        // Invalid id
        let result = parse_list_query(Some("id=abc"));
        assert!(result.is_err());
    }

    #[test]
    fn test_map_store_error() {
        let not_found = map_store_error(StoreError::RecordNotFound {
            resource: "Course",
            id: 5,
        });
        assert!(matches!(not_found, RouterError::NotFound(_)));

        let bad_request = map_store_error(StoreError::Validation {
            field: "name",
            reason: "may not be blank".to_string(),
        });
        assert!(matches!(bad_request, RouterError::BadRequest(_)));

        let internal = map_store_error(StoreError::LockPoisoned);
        assert!(matches!(internal, RouterError::InternalError(_)));
    }
}
