use super::Host;
use super::common::{Common, CommonArgs};
use super::credentials::{DEFAULT_TOKEN_FILE, discover_token};
use crate::Result;
use crate::reports::{OutputBatch, replace_extension, validate_chart_path};
use crate::series::StarHistory;
use crate::stargazers::{Client, Progress, RepoSpec, StargazerWalker};
use camino::Utf8PathBuf;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct FetchArgs {
    /// Owner of the repository
    #[arg(short, long, value_name = "OWNER")]
    pub owner: String,

    /// Name of the repository
    #[arg(short, long, value_name = "REPO")]
    pub repo: String,

    /// Path of the HTML chart; CSV files are written next to it
    #[arg(short, long, default_value = "stars.html", value_name = "PATH")]
    pub fig_path: Utf8PathBuf,

    /// JSON file holding a GitHub token in its `token` field
    #[arg(long, default_value = DEFAULT_TOKEN_FILE, value_name = "PATH")]
    pub token_file: Utf8PathBuf,

    /// GitHub personal access token, used when the token file does not exist
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Fetch every stargazer of a repository, then save and chart its star history.
///
/// # Errors
///
/// Returns an error if the chart path is invalid, no token is available, any
/// request fails, or an output file cannot be written. Nothing is written
/// unless the whole fetch succeeds.
pub async fn process_fetch<H: Host>(host: &mut H, args: &FetchArgs) -> Result<()> {
    let mut common = Common::new(host, &args.common)?;

    validate_chart_path(&args.fig_path)?;
    let repo = RepoSpec::new(&args.owner, &args.repo)?;
    let title = format!("Repository URL: {}", repo.url()?);
    let token = discover_token(&args.token_file, args.github_token.as_deref())?;

    let config = &common.config;
    let client = Client::new(Some(token.as_str()), config.api_base_url.as_str(), config.request_timeout())?;
    let walker = StargazerWalker::new(client, config.per_page, config.rate_limit_policy());

    let progress = common.progress_reporter();
    let result = walker.fetch_stars(&repo, &progress).await;
    progress.done();
    let events = result?;

    let history = StarHistory::aggregate(&events);
    let csv_base = replace_extension(&args.fig_path, "csv");

    let mut batch = OutputBatch::new();
    batch.add_events(&csv_base, &events)?;
    common.report(batch, &history, &csv_base, &args.fig_path, Some(&title))?;
    common.say(&format!("Fetched {} star(s) of '{repo}' into '{csv_base}'", events.len()));
    Ok(())
}
