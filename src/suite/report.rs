use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::error::SuiteError;

/// What happened when a step ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Passed,
    /// The step's first failing check, rendered for display.
    Failed(String),
}

/// Result of executing a single step.
#[derive(Debug, Clone)]
pub struct StepResult {
    pub order: u32,
    pub name: &'static str,
    pub outcome: StepOutcome,
    pub duration: Duration,
}

impl StepResult {
    pub fn new(order: u32, name: &'static str, outcome: StepOutcome, duration: Duration) -> Self {
        Self {
            order,
            name,
            outcome,
            duration,
        }
    }

    pub fn passed(&self) -> bool {
        self.outcome == StepOutcome::Passed
    }
}

/// Results of one pass over the step table, in execution order.
///
/// When a step hits a fatal error the run stops there. The results of the
/// steps that already finished are kept and the error is stored in
/// [`SuiteReport::aborted`].
#[derive(Debug)]
pub struct SuiteReport {
    pub started_at: DateTime<Utc>,
    pub results: Vec<StepResult>,
    /// `SuiteError::Aborted` naming the step that stopped the run.
    pub aborted: Option<SuiteError>,
}

impl SuiteReport {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            results: Vec::new(),
            aborted: None,
        }
    }

    pub fn push(&mut self, result: StepResult) {
        self.results.push(result);
    }

    pub fn abort(&mut self, step: &'static str, source: SuiteError) {
        self.aborted = Some(SuiteError::Aborted {
            step,
            source: Box::new(source),
        });
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.is_some()
    }

    /// Name of the step that aborted the run, if any.
    pub fn aborted_step(&self) -> Option<&'static str> {
        match &self.aborted {
            Some(SuiteError::Aborted { step, .. }) => Some(*step),
            _ => None,
        }
    }

    /// True when the run completed and every step passed.
    pub fn all_passed(&self) -> bool {
        !self.is_aborted() && self.results.iter().all(StepResult::passed)
    }

    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| !r.passed()).count()
    }

    pub fn total_duration(&self) -> Duration {
        self.results.iter().map(|r| r.duration).sum()
    }

    /// `"<step>: <reason>"` for every failed step.
    pub fn failures(&self) -> Vec<String> {
        self.results
            .iter()
            .filter_map(|r| match &r.outcome {
                StepOutcome::Passed => None,
                StepOutcome::Failed(reason) => Some(format!("{}: {}", r.name, reason)),
            })
            .collect()
    }

    pub fn result(&self, name: &str) -> Option<&StepResult> {
        self.results.iter().find(|r| r.name == name)
    }
}
