//! Command dispatch logic for star-history

use super::{FetchArgs, PlotArgs, process_fetch, process_plot};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "star-history", version, author, long_about = None)]
#[command(about = "Chart how the star count of a GitHub repository grew over time")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: StarSubcommand,
}

#[derive(Subcommand, Debug)]
enum StarSubcommand {
    /// Fetch a repository's stargazers from GitHub, then save and chart its star history
    Fetch(Box<FetchArgs>),
    /// Chart star events saved by a previous fetch
    Plot(PlotArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        StarSubcommand::Fetch(fetch_args) => process_fetch(host, fetch_args).await,
        StarSubcommand::Plot(plot_args) => process_plot(host, plot_args),
    }
}
