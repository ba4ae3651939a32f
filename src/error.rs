//! Error types shared by the client, authenticator and orchestrator.
//!
//! Two tiers exist. [`SuiteError`] covers failures that make the rest of the
//! run meaningless (unreachable host, undecodable body, rejected login) and
//! aborts it. [`StepError`] is what a single step returns: either one of those
//! fatal errors or an [`AssertionFailure`] that only fails that step.

use thiserror::Error;

use crate::assertions::AssertionFailure;

#[derive(Debug, Error)]
pub enum SuiteError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("{method} {url} failed: {source}")]
    Transport {
        method: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid request URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to decode {what}: {source}")]
    Decode {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("authentication rejected with HTTP {status}: {body}")]
    Authentication { status: u16, body: String },

    #[error("step '{name}' declares order {order}, which does not follow {previous}")]
    StepOrder {
        name: &'static str,
        order: u32,
        previous: u32,
    },

    #[error("step '{step}' aborted the run: {source}")]
    Aborted {
        step: &'static str,
        #[source]
        source: Box<SuiteError>,
    },
}

/// Outcome of a failed step.
#[derive(Debug, Error)]
pub enum StepError {
    #[error(transparent)]
    Assertion(#[from] AssertionFailure),

    #[error(transparent)]
    Fatal(#[from] SuiteError),
}

impl StepError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, StepError::Fatal(_))
    }
}
