use super::Host;
use super::common::{Common, CommonArgs};
use crate::Result;
use crate::reports::{CHART_EXTENSION, OutputBatch, load_events, replace_extension};
use crate::series::StarHistory;
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::bail;

#[derive(Parser, Debug)]
pub struct PlotArgs {
    /// CSV file of star events written by a previous fetch
    #[arg(short, long, default_value = "stars.csv", value_name = "PATH")]
    pub csv_path: Utf8PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Re-aggregate and chart star events saved by an earlier fetch.
///
/// The chart lands next to the CSV file with an `.html` extension and carries no title.
///
/// # Errors
///
/// Returns an error if the CSV file cannot be read, would be replaced by the chart,
/// or an output file cannot be written
pub fn process_plot<H: Host>(host: &mut H, args: &PlotArgs) -> Result<()> {
    let mut common = Common::new(host, &args.common)?;

    let chart_path = replace_extension(&args.csv_path, CHART_EXTENSION);
    if chart_path == args.csv_path {
        bail!("'{}' would be overwritten by its own chart; pass the CSV file of star events", args.csv_path);
    }

    let events = load_events(&args.csv_path)?;
    if events.is_empty() {
        common.warn(&format!("warning: no star events found in '{}'", args.csv_path));
    }

    let history = StarHistory::aggregate(&events);
    common.report(OutputBatch::new(), &history, &args.csv_path, &chart_path, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::common::{ColorMode, LogLevel};
    use crate::commands::host::TestHost;
    use std::fs;

    fn plot_args(csv_path: Utf8PathBuf) -> PlotArgs {
        PlotArgs {
            csv_path,
            common: CommonArgs {
                config: None,
                color: ColorMode::Never,
                log_level: LogLevel::None,
            },
        }
    }

    #[test]
    fn test_plot_writes_series_and_untitled_chart() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let csv_path = dir.join("tokio.csv");
        fs::write(&csv_path, "starred_at\n2022-12-31T23:59:59Z\n2023-01-01T00:00:00Z\n").unwrap();

        let mut host = TestHost::new();
        process_plot(&mut host, &plot_args(csv_path)).unwrap();

        assert_eq!(
            fs::read_to_string(dir.join("tokio_quarterly.csv")).unwrap(),
            "quarter,star_count,cumulative_star_count\n2022-Q4,1,1\n2023-Q1,1,2\n"
        );
        let html = fs::read_to_string(dir.join("tokio.html")).unwrap();
        assert!(html.contains("<title>Star History</title>"));

        let output = host.output_text();
        assert!(output.contains("Wrote 2 daily row(s)"));
        assert!(output.contains("tokio.html"));
        assert!(host.error_text().is_empty());
    }

    #[test]
    fn test_plot_invalid_csv_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let csv_path = dir.join("stars.csv");
        fs::write(&csv_path, "starred_at\nnot-a-date\n").unwrap();

        let mut host = TestHost::new();
        let _ = process_plot(&mut host, &plot_args(csv_path)).unwrap_err();
        assert!(!dir.join("stars_daily.csv").exists());
        assert!(!dir.join("stars.html").exists());
    }

    #[test]
    fn test_plot_refuses_to_overwrite_its_input() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let csv_path = dir.join("stars.html");
        let contents = "starred_at\n2023-01-01T00:00:00Z\n";
        fs::write(&csv_path, contents).unwrap();

        let mut host = TestHost::new();
        let err = process_plot(&mut host, &plot_args(csv_path.clone())).unwrap_err();
        assert!(err.to_string().contains("overwritten"));

        assert_eq!(fs::read_to_string(&csv_path).unwrap(), contents);
        assert!(!dir.join("stars_daily.csv").exists());
    }

    #[test]
    fn test_plot_unwritable_chart_leaves_no_series() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let csv_path = dir.join("stars.csv");
        fs::write(&csv_path, "starred_at\n2023-01-01T00:00:00Z\n").unwrap();
        fs::create_dir(dir.join("stars.html")).unwrap();

        let mut host = TestHost::new();
        let _ = process_plot(&mut host, &plot_args(csv_path)).unwrap_err();

        assert!(!dir.join("stars_daily.csv").exists());
        assert!(!dir.join("stars_quarterly.csv").exists());
        assert!(host.output_text().is_empty());
    }
}
