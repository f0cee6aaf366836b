//! Error pipeline.
//!
//! Every error a handler returns runs through the same three stages, in order:
//! log, structured response, generic 500 fallback. Handler panics are turned into
//! internal errors and enter the same chain.

use crate::error::ContactError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::any::Any;
use std::backtrace::{Backtrace, BacktraceStatus};
use thiserror::Error;
use tracing::error;

/// Body written by the fallback stage.
#[derive(Debug, Serialize)]
pub struct FallbackBody {
    pub message: String,
    pub stack: String,
}

/// A handler panicked while serving a request.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct HandlerPanic(String);

/// Run `error` through the whole chain and produce the response.
pub fn handle(error: ContactError) -> Response {
    let error = log_stage(error);
    match structured_stage(error) {
        Ok(response) => response,
        Err(error) => fallback_stage(&error),
    }
}

/// Stage 1: record the error and pass it on unchanged.
pub fn log_stage(error: ContactError) -> ContactError {
    match &error {
        ContactError::Internal(_) => error!(error = %error, "Unhandled error"),
        _ => error!(error = %error, "Request failed"),
    }
    error
}

/// Stage 2: write recognized structured errors, hand everything else on.
pub fn structured_stage(error: ContactError) -> Result<Response, ContactError> {
    match error.structured() {
        Some(payload) => {
            let status = StatusCode::from_u16(payload.status_code)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            Ok((status, Json(payload)).into_response())
        }
        None => Err(error),
    }
}

/// Stage 3: generic 500 carrying the message and diagnostic trace.
pub fn fallback_stage(error: &ContactError) -> Response {
    let body = FallbackBody {
        message: error.to_string(),
        stack: stack_trace(error),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

/// Response for a caught handler panic.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "handler panicked".to_string()
    };

    handle(ContactError::internal(HandlerPanic(message)))
}

/// Error message followed by its causes, plus a backtrace when capture is enabled.
fn stack_trace(error: &ContactError) -> String {
    let mut lines = vec![format!("Error: {}", error)];

    // Internal errors display their inner error, so start one level further down.
    let mut source = std::error::Error::source(error);
    if matches!(error, ContactError::Internal(_)) {
        source = source.and_then(|inner| inner.source());
    }
    while let Some(cause) = source {
        lines.push(format!("    caused by: {}", cause));
        source = cause.source();
    }

    let backtrace = Backtrace::capture();
    if backtrace.status() == BacktraceStatus::Captured {
        lines.push(backtrace.to_string());
    }

    lines.join("\n")
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        handle(self)
    }
}
