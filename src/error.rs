//! Error type shared by the loading and configuration entry points.
//!
//! The transformation stages themselves never fail: malformed rows and slots
//! are skipped. Errors only come from decoding input documents or from the
//! browser environment.

use thiserror::Error;

/// Failures surfaced to the caller of the pipeline.
#[derive(Debug, Error)]
pub enum GraphError {
	/// The rows or config document was not valid JSON of the expected shape.
	#[error("invalid JSON: {0}")]
	Json(#[from] serde_json::Error),

	/// A required input (element, field, node) was not present.
	#[error("missing data: {0}")]
	MissingData(String),

	/// The browser environment refused an operation.
	#[error("DOM error: {0}")]
	Dom(String),
}

/// Result alias for fallible pipeline operations.
pub type Result<T> = std::result::Result<T, GraphError>;
