//! `spoiler-suite steps`: print the step table.

use anyhow::Result;
use colored::Colorize;

use crate::suite::{validate_order, STEPS};

pub fn execute() -> Result<()> {
    validate_order(STEPS)?;

    println!("{}", "Story suite steps".bold().blue());
    println!("{}", "=".repeat(50));
    for step in STEPS {
        println!(
            "  {:>2}. {} {}",
            step.order,
            format!("{:<16}", step.name).bold(),
            step.description.dimmed()
        );
    }
    Ok(())
}
