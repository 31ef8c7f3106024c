//! Retrieval of star events from the GitHub REST API
//!
//! # Implementation Model
//!
//! The stargazer listing is paged. A probe request reads the number of the last
//! page from the `Link` response header, after which every page is requested in
//! order. Before each page the rate-limit endpoint is queried; the remaining quota
//! is surfaced through [`Progress`] and the log, and when it runs out the walk
//! sleeps until the quota resets.
//!
//! Requests are strictly sequential and never retried. Any transport failure,
//! error status, or malformed pagination header aborts the walk.

mod client;
mod link;
mod progress;
mod rate_limit;
mod repo_spec;
mod walker;

const LOG_TARGET: &str = "stargazers";

/// Base URL of the public GitHub REST API.
pub const GITHUB_API_URL: &str = "https://api.github.com";

pub use client::{Client, RateLimit, STAR_MEDIA_TYPE};
pub use link::extract_last_page_num;
pub use progress::{NoProgress, Progress};
pub use rate_limit::{DEFAULT_MAX_RATE_LIMIT_WAIT, RateLimitPolicy};
pub use repo_spec::RepoSpec;
pub use walker::{MAX_PER_PAGE, StargazerWalker};
