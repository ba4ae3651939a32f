//! `spoiler-suite run`: authenticate, run every step, print the report.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::Path;

use crate::config::{ConfigOverrides, SuiteConfig};
use crate::suite::report::{StepOutcome, StepResult, SuiteReport};
use crate::suite::Suite;

/// Execute the run command. Fails when setup fails, the run aborts, or any
/// step fails.
pub fn execute(config_path: Option<&Path>, overrides: &ConfigOverrides) -> Result<()> {
    let config = SuiteConfig::load(config_path, overrides)?;

    println!(
        "{} Running story suite against {}\n",
        "→".cyan().bold(),
        config.base_url.bold()
    );

    let suite = Suite::setup(&config).context("Suite setup failed")?;
    let mut report = suite.run().context("Invalid step table")?;

    print_report(&report);

    if let Some(err) = report.aborted.take() {
        return Err(anyhow::Error::new(err).context("Suite run aborted"));
    }
    if !report.all_passed() {
        bail!(
            "{} of {} steps failed",
            report.failed_count(),
            report.results.len()
        );
    }
    Ok(())
}

pub fn print_report(report: &SuiteReport) {
    for result in &report.results {
        print_step(result);
    }
    if let Some(err) = &report.aborted {
        println!("  {} {}", "!".red().bold(), err.to_string().red());
    }

    println!();
    let summary = format!(
        "{} passed, {} failed in {}ms (started {})",
        report.passed_count(),
        report.failed_count(),
        report.total_duration().as_millis(),
        report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    if report.all_passed() {
        println!("{} {}", "✓".green().bold(), summary);
    } else {
        println!("{} {}", "✗".red().bold(), summary);
    }
}

fn print_step(result: &StepResult) {
    let label = format!("{}. {}", result.order, result.name);
    let elapsed = format!("({}ms)", result.duration.as_millis());
    match &result.outcome {
        StepOutcome::Passed => {
            println!("  {} {} {}", "✓".green().bold(), label, elapsed.dimmed());
        }
        StepOutcome::Failed(reason) => {
            println!("  {} {} {}", "✗".red().bold(), label, elapsed.dimmed());
            println!("      {}", reason.red());
        }
    }
}
