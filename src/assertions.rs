//! Response checks used by the suite steps.
//!
//! Checks return an [`AssertionFailure`] instead of panicking, so the
//! orchestrator can record a failed step and keep going.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::client::ApiResponse;
use crate::error::StepError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssertionFailure {
    #[error("expected HTTP {expected}, got HTTP {actual}")]
    Status { expected: u16, actual: u16 },

    #[error("expected body to contain {marker:?}, got: {excerpt}")]
    MissingMarker { marker: String, excerpt: String },

    #[error("expected a non-empty array, got an empty one")]
    EmptyArray,
}

pub fn expect_status(response: &ApiResponse, expected: StatusCode) -> Result<(), AssertionFailure> {
    if response.status == expected {
        Ok(())
    } else {
        Err(AssertionFailure::Status {
            expected: expected.as_u16(),
            actual: response.status.as_u16(),
        })
    }
}

pub fn expect_body_contains(response: &ApiResponse, marker: &str) -> Result<(), AssertionFailure> {
    if response.body.contains(marker) {
        Ok(())
    } else {
        Err(AssertionFailure::MissingMarker {
            marker: marker.to_string(),
            excerpt: response.excerpt(),
        })
    }
}

/// Decode the body as a JSON array and require at least one element.
///
/// A body that is not a JSON array is a decode error, not an assertion
/// failure.
pub fn expect_non_empty_array(response: &ApiResponse) -> Result<Vec<Value>, StepError> {
    let items: Vec<Value> = response.json("story listing")?;
    if items.is_empty() {
        return Err(AssertionFailure::EmptyArray.into());
    }
    Ok(items)
}
