#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for star-history
//!
//! This library consolidates all functionality for the star-history tool, which
//! retrieves the stargazers of a GitHub repository and charts how its star count
//! grew over time.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`stargazers`]: Paginated retrieval of star events from the GitHub API
//! - [`series`]: Daily and quarterly aggregation of star events
//! - [`reports`]: CSV persistence and chart rendering

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

pub mod reports;
pub mod series;
pub mod stargazers;

pub use crate::commands::{Host, run};
