pub mod run;
pub mod steps;
