//! Command-line interface and orchestration for star-history
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **fetch**: Walk every page of a repository's stargazer listing, save the raw
//!   star events, aggregate them into daily and quarterly series, and write the
//!   series CSV files and the HTML chart
//! - **plot**: Re-run aggregation and charting on star events saved by an
//!   earlier fetch, without touching the network
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes to the
//! command handler. Both handlers start from `Common`, which initializes logging,
//! loads the optional `stars.toml` configuration, and owns the output and
//! reporting steps they share.
//!
//! The GitHub token is read from `github_token.json` or, failing that, from the
//! `GITHUB_TOKEN` environment variable. Only `fetch` needs one.

mod common;
mod config;
mod credentials;
mod fetch;
mod host;
mod plot;
mod progress_reporter;
mod run;

#[cfg(debug_assertions)]
pub use config::Config;

pub use credentials::{DEFAULT_TOKEN_FILE, discover_token};
pub use fetch::{FetchArgs, process_fetch};
pub use host::Host;
pub use plot::{PlotArgs, process_plot};
pub use progress_reporter::ProgressReporter;
pub use run::run;
