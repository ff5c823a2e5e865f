//! Serving errors and their HTTP mapping.

use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use feature_spi::FeatureError;
use thiserror::Error;

use crate::page;

/// Errors raised while starting the server or answering a request.
#[derive(Error, Debug)]
pub enum ServingError {
    /// The promoted model or the scaler could not be loaded. Fatal at start.
    #[error("Failed to load {path}: {reason}")]
    ModelLoad { path: PathBuf, reason: String },

    /// Prediction did not finish within the configured budget.
    #[error("Prediction timed out after {timeout_ms} ms")]
    PredictionTimeout { timeout_ms: u64 },

    /// A form field is missing or not a finite number.
    #[error(transparent)]
    Input(#[from] FeatureError),

    #[error("Prediction failed: {0}")]
    Prediction(String),

    /// Bad server environment (`PORT`, `PREDICT_TIMEOUT_MS`, ...).
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServingError {
    pub fn model_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ServingError::ModelLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServingError::Input(_) => StatusCode::BAD_REQUEST,
            ServingError::PredictionTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            ServingError::ModelLoad { .. } => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServingError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "rejected request");
        }
        (status, Html(page::render(None, Some(&self.to_string())))).into_response()
    }
}
