pub mod assertions;
pub mod auth;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod suite;

pub use client::{ApiClient, ApiResponse};
pub use config::{ConfigOverrides, SuiteConfig};
pub use error::{StepError, SuiteError};
pub use suite::{Suite, SuiteContext};
