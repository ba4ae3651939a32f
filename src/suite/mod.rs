//! Ordered execution of the story suite.
//!
//! The suite is a table of [`Step`] descriptors run strictly in array order
//! against one authenticated [`ApiClient`]. State shared between steps lives
//! in a [`SuiteContext`] that is passed to every step explicitly.

pub mod report;
pub mod steps;

use chrono::Utc;
use std::time::Instant;
use tracing::{error, info, info_span, warn};
use uuid::Uuid;

use crate::auth::authenticated_client;
use crate::client::ApiClient;
use crate::config::SuiteConfig;
use crate::error::{StepError, SuiteError};
use report::{StepOutcome, StepResult, SuiteReport};

pub use steps::STEPS;

/// Signature of a step body.
pub type StepFn = fn(&ApiClient, &mut SuiteContext) -> Result<(), StepError>;

#[derive(Debug, Clone, Copy)]
pub struct Step {
    /// Declared position; must be strictly increasing across the table.
    pub order: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub run: StepFn,
}

/// State threaded through the steps of one run.
#[derive(Debug, Default, Clone)]
pub struct SuiteContext {
    story_id: Option<String>,
}

impl SuiteContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_story_id(&mut self, story_id: String) {
        self.story_id = Some(story_id);
    }

    /// The recorded id, or an empty string when none was recorded.
    pub fn story_id(&self) -> &str {
        match &self.story_id {
            Some(id) => id,
            None => {
                warn!("no story id recorded, using an empty id");
                ""
            }
        }
    }

    pub fn has_story_id(&self) -> bool {
        self.story_id.is_some()
    }

    /// Clear the recorded id once the story no longer exists.
    pub fn take_story_id(&mut self) -> Option<String> {
        self.story_id.take()
    }
}

/// Check that declared orders strictly increase along the table.
pub fn validate_order(steps: &[Step]) -> Result<(), SuiteError> {
    for pair in steps.windows(2) {
        if pair[1].order <= pair[0].order {
            return Err(SuiteError::StepOrder {
                name: pair[1].name,
                order: pair[1].order,
                previous: pair[0].order,
            });
        }
    }
    Ok(())
}

/// Run `steps` in order.
///
/// Assertion failures are recorded and the run continues. The first fatal
/// error stops the run; it is stored in the returned report next to the
/// results of the steps that already finished. Only an invalid table is
/// returned as an error, before any step runs.
pub fn run_steps(
    client: &ApiClient,
    ctx: &mut SuiteContext,
    steps: &[Step],
) -> Result<SuiteReport, SuiteError> {
    validate_order(steps)?;

    let mut report = SuiteReport::new(Utc::now());
    for step in steps {
        info!(order = step.order, step = step.name, "running step");
        let start = Instant::now();
        let outcome = match (step.run)(client, ctx) {
            Ok(()) => StepOutcome::Passed,
            Err(StepError::Assertion(failure)) => {
                warn!(step = step.name, %failure, "step failed");
                StepOutcome::Failed(failure.to_string())
            }
            Err(StepError::Fatal(err)) => {
                error!(step = step.name, error = %err, "step aborted the run");
                report.abort(step.name, err);
                break;
            }
        };
        report.push(StepResult::new(
            step.order,
            step.name,
            outcome,
            start.elapsed(),
        ));
    }
    Ok(report)
}

/// An authenticated client and a fresh context, ready to run.
///
/// [`Suite::run`] consumes the suite, so the client and its token are
/// released when the run ends, whatever its outcome.
#[derive(Debug)]
pub struct Suite {
    client: ApiClient,
    context: SuiteContext,
}

impl Suite {
    /// Log in with the configured credentials and build the client.
    pub fn setup(config: &SuiteConfig) -> Result<Self, SuiteError> {
        let client = ApiClient::new(config)?;
        let client = authenticated_client(client, &config.username, &config.password)?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: ApiClient) -> Self {
        Self {
            client,
            context: SuiteContext::new(),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn run(self) -> Result<SuiteReport, SuiteError> {
        self.run_with(STEPS)
    }

    pub fn run_with(mut self, steps: &[Step]) -> Result<SuiteReport, SuiteError> {
        let span = info_span!(
            "suite",
            run_id = %Uuid::new_v4(),
            base_url = %self.client.base_url()
        );
        let _guard = span.enter();

        let report = run_steps(&self.client, &mut self.context, steps)?;
        info!(
            passed = report.passed_count(),
            failed = report.failed_count(),
            aborted = report.is_aborted(),
            "suite finished"
        );
        Ok(report)
    }
}
