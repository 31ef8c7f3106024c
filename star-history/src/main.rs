//! Chart the star history of a GitHub repository.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use star_history_lib::{Host, run};
use std::io::{Write, stderr, stdout};

/// Host wired to the process's standard streams.
#[derive(Debug, Clone, Default)]
pub struct ConsoleHost;

#[cfg_attr(coverage_nightly, coverage(off))]
impl Host for ConsoleHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }
}

#[tokio::main]
#[cfg_attr(coverage_nightly, coverage(off))]
async fn main() -> Result<(), ohno::AppError> {
    run(&mut ConsoleHost, std::env::args()).await
}
