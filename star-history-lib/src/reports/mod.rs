//! Persistence and rendering of star history
//!
//! This module turns aggregated star counts into files on disk:
//! - **CSV**: one file per granularity (`<base>_daily.csv`, `<base>_quarterly.csv`)
//!   plus the raw event list at `<base>.csv`
//! - **HTML**: a self-contained page that loads plotly.js from a CDN and draws the
//!   daily and quarterly cumulative counts as two stacked panels
//!
//! The generators write to in-memory writers. [`OutputBatch`] collects their output
//! and writes all files together, so a failed run leaves nothing behind.

mod csv;
mod html;
mod paths;

pub use self::csv::{read_events, write_events, write_series};
pub use html::generate as generate_html;
pub use paths::{CHART_EXTENSION, add_suffix, replace_extension, validate_chart_path};

use crate::Result;
use crate::series::{AggregatedSeries, Bucket, StarEvent, StarHistory};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Local;
use ohno::{EnrichableExt, IntoAppError};
use std::fs::{self, File};
use std::io::BufReader;

const LOG_TARGET: &str = "   reports";

/// Files written for one star history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesPaths {
    pub daily: Utf8PathBuf,
    pub quarterly: Utf8PathBuf,
}

impl SeriesPaths {
    /// Derive the per-granularity file names from a base CSV path.
    #[must_use]
    pub fn from_base(base: &Utf8Path) -> Self {
        Self {
            daily: add_suffix(base, "daily"),
            quarterly: add_suffix(base, "quarterly"),
        }
    }
}

/// Output files rendered in memory and written together.
///
/// Nothing reaches disk until [`OutputBatch::commit`], which first stages every file
/// next to its destination and only then moves the staged files into place. When any
/// step fails, the files the batch has already written are removed again.
#[derive(Debug, Default)]
pub struct OutputBatch {
    files: Vec<PendingFile>,
}

#[derive(Debug)]
struct PendingFile {
    path: Utf8PathBuf,
    contents: Vec<u8>,
}

impl OutputBatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the raw star events for `path`.
    pub fn add_events(&mut self, path: &Utf8Path, events: &[StarEvent]) -> Result<()> {
        let mut contents = Vec::new();
        write_events(events, &mut contents).map_err(|e| e.enrich_with(|| format!("rendering '{path}'")))?;
        self.push(path, contents);
        Ok(())
    }

    /// Queue the daily and quarterly series next to `base`.
    pub fn add_history(&mut self, base: &Utf8Path, history: &StarHistory) -> Result<SeriesPaths> {
        let paths = SeriesPaths::from_base(base);
        self.add_series(&paths.daily, &history.daily)?;
        self.add_series(&paths.quarterly, &history.quarterly)?;
        Ok(paths)
    }

    fn add_series<B: Bucket>(&mut self, path: &Utf8Path, series: &AggregatedSeries<B>) -> Result<()> {
        let mut contents = Vec::new();
        write_series(series, &mut contents).map_err(|e| e.enrich_with(|| format!("rendering '{path}'")))?;
        self.push(path, contents);
        Ok(())
    }

    /// Queue the chart for `path`, which must end in `.html`.
    ///
    /// The path is validated before any rendering happens.
    pub fn add_chart(&mut self, path: &Utf8Path, history: &StarHistory, title: Option<&str>) -> Result<()> {
        validate_chart_path(path)?;

        let mut html = String::new();
        generate_html(history, title, Local::now(), &mut html)?;
        self.push(path, html.into_bytes());
        Ok(())
    }

    fn push(&mut self, path: &Utf8Path, contents: Vec<u8>) {
        self.files.push(PendingFile {
            path: path.to_path_buf(),
            contents,
        });
    }

    /// Write every queued file, or none of them.
    pub fn commit(self) -> Result<()> {
        let mut staged = Vec::with_capacity(self.files.len());

        for file in &self.files {
            let staging = staging_path(&file.path);
            if let Err(e) = fs::write(&staging, &file.contents) {
                let _ = fs::remove_file(&staging);
                discard(&staged);
                return Err(e).into_app_err_with(|| format!("writing '{}'", file.path));
            }
            staged.push(staging);
        }

        for (index, (file, staging)) in self.files.iter().zip(&staged).enumerate() {
            if let Err(e) = fs::rename(staging, &file.path) {
                let moved: Vec<Utf8PathBuf> = self.files[..index].iter().map(|f| f.path.clone()).collect();
                discard(&moved);
                discard(&staged[index..]);
                return Err(e).into_app_err_with(|| format!("writing '{}'", file.path));
            }
        }

        for file in &self.files {
            log::info!(target: LOG_TARGET, "Wrote {} byte(s) to '{}'", file.contents.len(), file.path);
        }

        Ok(())
    }
}

/// Hidden sibling a file is written to before being moved into place.
fn staging_path(path: &Utf8Path) -> Utf8PathBuf {
    let name = path.file_name().unwrap_or("output");
    path.with_file_name(format!(".{name}.partial"))
}

fn discard(paths: &[Utf8PathBuf]) {
    for path in paths {
        let _ = fs::remove_file(path);
    }
}

/// Read star events previously written by [`OutputBatch::add_events`].
pub fn load_events(path: &Utf8Path) -> Result<Vec<StarEvent>> {
    let file = File::open(path).into_app_err_with(|| format!("opening '{path}'"))?;
    let events = read_events(BufReader::new(file)).map_err(|e| e.enrich_with(|| format!("reading star events from '{path}'")))?;
    log::info!(target: LOG_TARGET, "Read {} star event(s) from '{path}'", events.len());
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn utf8_dir(dir: &tempfile::TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap()
    }

    fn sample_events() -> Vec<StarEvent> {
        vec![
            StarEvent::new(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()),
            StarEvent::new(Utc.with_ymd_and_hms(2023, 1, 1, 1, 0, 0).unwrap()),
            StarEvent::new(Utc.with_ymd_and_hms(2023, 4, 5, 0, 0, 0).unwrap()),
        ]
    }

    #[test]
    fn test_series_paths_from_base() {
        let paths = SeriesPaths::from_base(Utf8Path::new("out/stars.csv"));
        assert_eq!(paths.daily, "out/stars_daily.csv");
        assert_eq!(paths.quarterly, "out/stars_quarterly.csv");
    }

    #[test]
    fn test_batch_writes_history_and_events() {
        let dir = tempfile::tempdir().unwrap();
        let base = utf8_dir(&dir).join("stars.csv");

        let mut batch = OutputBatch::new();
        batch.add_events(&base, &sample_events()).unwrap();
        let paths = batch.add_history(&base, &StarHistory::aggregate(&sample_events())).unwrap();
        assert!(!paths.daily.exists());
        batch.commit().unwrap();

        let daily = fs::read_to_string(&paths.daily).unwrap();
        assert_eq!(daily, "starred_at,star_count,cumulative_star_count\n2023-01-01,2,2\n2023-04-05,1,3\n");

        let quarterly = fs::read_to_string(&paths.quarterly).unwrap();
        assert_eq!(quarterly, "quarter,star_count,cumulative_star_count\n2023-Q1,2,2\n2023-Q2,1,3\n");

        assert_eq!(load_events(&base).unwrap(), sample_events());
    }

    #[test]
    fn test_load_events_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let _ = load_events(&utf8_dir(&dir).join("missing.csv")).unwrap_err();
    }

    #[test]
    fn test_batch_writes_chart() {
        let dir = tempfile::tempdir().unwrap();
        let path = utf8_dir(&dir).join("stars.html");

        let mut batch = OutputBatch::new();
        batch
            .add_chart(&path, &StarHistory::aggregate(&sample_events()), Some("Repository URL: https://github.com/o/r"))
            .unwrap();
        batch.commit().unwrap();

        let html = fs::read_to_string(&path).unwrap();
        assert!(html.contains("Repository URL: https://github.com/o/r"));
    }

    #[test]
    fn test_batch_rejects_non_html_chart_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = utf8_dir(&dir).join("stars.png");

        let mut batch = OutputBatch::new();
        let _ = batch.add_chart(&path, &StarHistory::aggregate(&sample_events()), None).unwrap_err();
        batch.commit().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_batch_unwritable_chart_removes_series() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = utf8_dir(&tmp);
        let base = dir.join("stars.csv");
        let chart = dir.join("stars.html");
        fs::create_dir(&chart).unwrap();

        let history = StarHistory::aggregate(&sample_events());
        let mut batch = OutputBatch::new();
        batch.add_events(&base, &sample_events()).unwrap();
        let paths = batch.add_history(&base, &history).unwrap();
        batch.add_chart(&chart, &history, None).unwrap();

        let _ = batch.commit().unwrap_err();

        assert!(!base.exists());
        assert!(!paths.daily.exists());
        assert!(!paths.quarterly.exists());
        assert!(chart.is_dir());

        let mut leftovers: Vec<String> = fs::read_dir(&dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        leftovers.sort();
        assert_eq!(leftovers, ["stars.html"]);
    }

    #[test]
    fn test_staging_path_is_hidden_sibling() {
        assert_eq!(staging_path(Utf8Path::new("out/stars.html")), "out/.stars.html.partial");
    }
}
