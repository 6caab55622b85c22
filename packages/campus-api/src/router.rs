//! Matchit routing configuration.

use std::sync::Arc;

use hyper::{body::Bytes, Request, Response};
use matchit::Router as MatchitRouter;

use crate::handlers;
use campus_core::{config::RegistryConfig, store::Registry};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Record store
    pub registry: Arc<Registry>,
    /// Registry configuration
    pub config: Arc<RegistryConfig>,
}

/// HTTP request router.
pub struct Router {
    inner: MatchitRouter<RouteHandler>,
    state: AppState,
}

impl Router {
    /// Creates a new router with the resource routes.
    pub fn new(registry: Arc<Registry>, config: Arc<RegistryConfig>) -> Self {
        let mut router = MatchitRouter::new();

        // Course resource endpoints
        router
            .insert("/api/v1/courses", RouteHandler::Course)
            .expect("Failed to insert /api/v1/courses route");
        router
            .insert("/api/v1/courses/{id}", RouteHandler::Course)
            .expect("Failed to insert /api/v1/courses/{id} route");

        // Student resource endpoints
        router
            .insert("/api/v1/students", RouteHandler::Student)
            .expect("Failed to insert /api/v1/students route");
        router
            .insert("/api/v1/students/{id}", RouteHandler::Student)
            .expect("Failed to insert /api/v1/students/{id} route");

        Self {
            inner: router,
            state: AppState { registry, config },
        }
    }

    /// Routes an incoming request to the appropriate handler.
    ///
    /// # Arguments
    /// * `req` - HTTP request
    ///
    /// # Returns
    /// `Result<Response<Bytes>, RouterError>` containing the response or an error.
    pub async fn route(
        &self,
        req: Request<hyper::body::Incoming>,
    ) -> Result<Response<Bytes>, RouterError> {
        let path = req.uri().path().to_string();

        // Resource URLs carry an optional trailing slash
        let normalized = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path.as_str()
        };

        match self.inner.at(normalized) {
            Ok(matched) => {
                let handler = matched.value;
                handler
                    .handle(req, matched.params, self.state.clone())
                    .await
            }
            Err(_) => {
                // Return 404 for unmatched routes
                let error_response = crate::handlers::error_response(
                    404,
                    "Not Found".to_string(),
                    Some(format!("No route found for {}", path)),
                );
                let body = serde_json::to_vec(&error_response).map_err(|e| {
                    RouterError::InternalError(format!("Failed to serialize error response: {}", e))
                })?;
                Ok(Response::builder()
                    .status(404)
                    .header("Content-Type", "application/json")
                    .body(Bytes::from(body))
                    .map_err(|e| {
                        RouterError::InternalError(format!("Failed to build response: {}", e))
                    })?)
            }
        }
    }
}

/// Route handler selector.
enum RouteHandler {
    Course,
    Student,
}

impl RouteHandler {
    /// Handles a request with the given route parameters.
    async fn handle(
        &self,
        req: Request<hyper::body::Incoming>,
        params: matchit::Params<'_, '_>,
        state: AppState,
    ) -> Result<Response<Bytes>, RouterError> {
        let has_id_param = params.get("id").is_some();
        match self {
            RouteHandler::Course => {
                if req.method() == hyper::Method::GET && !has_id_param {
                    handlers::list_courses(req, params, state).await
                } else if req.method() == hyper::Method::GET && has_id_param {
                    handlers::get_course(req, params, state).await
                } else if req.method() == hyper::Method::POST && !has_id_param {
                    handlers::create_course(req, params, state).await
                } else if req.method() == hyper::Method::PUT && has_id_param {
                    handlers::replace_course(req, params, state).await
                } else if req.method() == hyper::Method::PATCH && has_id_param {
                    handlers::update_course(req, params, state).await
                } else if req.method() == hyper::Method::DELETE && has_id_param {
                    handlers::delete_course(req, params, state).await
                } else {
                    Err(RouterError::MethodNotAllowed)
                }
            }
            RouteHandler::Student => {
                if req.method() == hyper::Method::GET && !has_id_param {
                    handlers::list_students(req, params, state).await
                } else if req.method() == hyper::Method::GET && has_id_param {
                    handlers::get_student(req, params, state).await
                } else if req.method() == hyper::Method::POST && !has_id_param {
                    handlers::create_student(req, params, state).await
                } else if req.method() == hyper::Method::PUT && has_id_param {
                    handlers::replace_student(req, params, state).await
                } else if req.method() == hyper::Method::PATCH && has_id_param {
                    handlers::update_student(req, params, state).await
                } else if req.method() == hyper::Method::DELETE && has_id_param {
                    handlers::delete_student(req, params, state).await
                } else {
                    Err(RouterError::MethodNotAllowed)
                }
            }
        }
    }
}

/// Router error type.
#[derive(Debug)]
pub enum RouterError {
    MethodNotAllowed,
    InternalError(String),
    Timeout,
    BadRequest(String),
    NotFound(String),
}

impl std::fmt::Display for RouterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouterError::MethodNotAllowed => write!(f, "Method Not Allowed"),
            RouterError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
            RouterError::Timeout => write!(f, "Request Timeout"),
            RouterError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            RouterError::NotFound(msg) => write!(f, "Not Found: {}", msg),
        }
    }
}

impl std::error::Error for RouterError {}

impl From<RouterError> for Response<Bytes> {
    fn from(err: RouterError) -> Self {
        let (status, message) = match &err {
            RouterError::MethodNotAllowed => (405, "Method Not Allowed"),
            RouterError::InternalError(msg) => (500, msg.as_str()),
            RouterError::Timeout => (408, "Request Timeout"),
            RouterError::BadRequest(msg) => (400, msg.as_str()),
            RouterError::NotFound(msg) => (404, msg.as_str()),
        };

        let error_response = crate::handlers::error_response(status, message.to_string(), None);
        // Static fallback for when error serialization itself fails
        let body = serde_json::to_vec(&error_response).unwrap_or_else(|_| {
            br#"{"success":false,"error":{"code":"500","message":"error serialization failed"}}"#
                .to_vec()
        });

        match Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Bytes::from(body))
        {
            Ok(response) => response,
            Err(_) => {
                let mut response = Response::new(Bytes::from_static(b"Internal Server Error"));
                *response.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
                response
            }
        }
    }
}
