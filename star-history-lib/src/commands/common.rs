//! Setup and reporting shared between the fetch and plot commands.

use super::ProgressReporter;
use super::config::Config;
use crate::Result;
use crate::reports::{OutputBatch, SeriesPaths, validate_chart_path};
use crate::series::StarHistory;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, ValueEnum};
use core::time::Duration;
use ohno::IntoAppError;
use std::io::{IsTerminal, Write};

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Arguments shared between the fetch and plot commands
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Path to configuration file (default is `stars.toml`)
    #[arg(long, value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

pub struct Common<'a, H: super::Host> {
    pub config: Config,
    host: &'a mut H,
    log_level: LogLevel,
    use_colors: bool,
    page_lines: bool,
}

impl<'a, H: super::Host> Common<'a, H> {
    /// Initialize logging and load the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded
    pub fn new(host: &'a mut H, args: &CommonArgs) -> Result<Self> {
        Self::init_logging(args.log_level);

        let cwd = std::env::current_dir().into_app_err("determining the current directory")?;
        let cwd = Utf8PathBuf::try_from(cwd).into_app_err("current directory is not valid UTF-8")?;
        let config = Config::load(&cwd, args.config.as_ref())?;

        let stderr_is_terminal = std::io::stderr().is_terminal();
        let use_colors = match args.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => stderr_is_terminal,
        };

        Ok(Self {
            config,
            host,
            log_level: args.log_level,
            use_colors,
            page_lines: args.log_level == LogLevel::None && !stderr_is_terminal,
        })
    }

    /// Initialize logger based on log level
    fn init_logging(log_level: LogLevel) {
        let level = match log_level {
            LogLevel::None => return,
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };

        let env = env_logger::Env::default().filter_or("RUST_LOG", level);

        // a logger may already be installed when commands run more than once in a process
        let _ = env_logger::Builder::from_env(env)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
            .try_init();
    }

    /// Create the progress bar for a long-running fetch.
    ///
    /// The bar stays out of the way when diagnostic logging is enabled. Without a
    /// terminal and without logging, each page is reported as a plain stderr line.
    #[must_use]
    pub fn progress_reporter(&self) -> ProgressReporter {
        let delay = if self.log_level == LogLevel::None {
            Duration::from_millis(300)
        } else {
            Duration::from_hours(365 * 24)
        };

        ProgressReporter::new(delay, self.use_colors).with_page_lines(self.page_lines)
    }

    /// Write a line to the host's standard output.
    pub fn say(&mut self, line: &str) {
        let _ = writeln!(self.host.output(), "{line}");
    }

    /// Write a line to the host's error output.
    pub fn warn(&mut self, line: &str) {
        let _ = writeln!(self.host.error(), "{line}");
    }

    /// Add both series next to `csv_base` and the chart at `chart_path` to `batch`,
    /// then write everything at once.
    ///
    /// # Errors
    ///
    /// Returns an error if the chart path is invalid or a file cannot be written, in
    /// which case none of the batch's files are left behind
    pub fn report(
        &mut self,
        mut batch: OutputBatch,
        history: &StarHistory,
        csv_base: &Utf8Path,
        chart_path: &Utf8Path,
        title: Option<&str>,
    ) -> Result<()> {
        validate_chart_path(chart_path)?;
        let SeriesPaths { daily, quarterly } = batch.add_history(csv_base, history)?;
        batch.add_chart(chart_path, history, title)?;
        batch.commit()?;

        self.say(&format!("Wrote {} daily row(s) to '{daily}'", history.daily.len()));
        self.say(&format!("Wrote {} quarterly row(s) to '{quarterly}'", history.quarterly.len()));
        self.say(&format!("Wrote chart of {} star(s) to '{chart_path}'", history.daily.total()));

        Ok(())
    }
}
