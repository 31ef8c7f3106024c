use crate::Result;
use crate::series::{AggregatedSeries, Bucket, StarEvent};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use ohno::{IntoAppError, app_err};
use serde::Deserialize;
use std::io::{Read, Write};

const STAR_COUNT: &str = "star_count";
const CUMULATIVE_STAR_COUNT: &str = "cumulative_star_count";

/// Write a series as `<bucket>,star_count,cumulative_star_count` rows under a header.
pub fn write_series<B: Bucket, W: Write>(series: &AggregatedSeries<B>, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([B::COLUMN, STAR_COUNT, CUMULATIVE_STAR_COUNT])?;

    for row in series.rows() {
        csv_writer.write_record([
            row.bucket.to_string(),
            row.star_count.to_string(),
            row.cumulative_star_count.to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write raw star events as a single `starred_at` column.
pub fn write_events<W: Write>(events: &[StarEvent], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for event in events {
        csv_writer.serialize(event)?;
    }

    // serialize() only emits the header alongside the first record
    if events.is_empty() {
        csv_writer.write_record(["starred_at"])?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct EventRow {
    starred_at: String,
}

/// Read star events from a CSV file with a `starred_at` column.
///
/// Other columns are ignored. Timestamps may be RFC 3339, `YYYY-MM-DD HH:MM:SS[+HH:MM]`,
/// or a bare date; values without an offset are taken as UTC.
pub fn read_events<R: Read>(reader: R) -> Result<Vec<StarEvent>> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    csv_reader
        .deserialize::<EventRow>()
        .enumerate()
        .map(|(index, row)| {
            // header is line 1
            let line = index + 2;
            let row = row.into_app_err_with(|| format!("reading star event on line {line}"))?;
            parse_timestamp(row.starred_at.trim())
                .map(StarEvent::new)
                .ok_or_else(|| app_err!("invalid timestamp '{}' on line {line}", row.starred_at))
        })
        .collect()
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }

    if let Ok(ts) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%:z") {
        return Some(ts.with_timezone(&Utc));
    }

    if let Ok(ts) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(ts.and_utc());
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|ts| ts.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{Day, Quarter};
    use chrono::TimeZone;

    fn sample_events() -> Vec<StarEvent> {
        vec![
            StarEvent::new(Utc.with_ymd_and_hms(2023, 1, 1, 10, 0, 0).unwrap()),
            StarEvent::new(Utc.with_ymd_and_hms(2023, 1, 1, 11, 30, 0).unwrap()),
            StarEvent::new(Utc.with_ymd_and_hms(2023, 4, 5, 0, 0, 0).unwrap()),
        ]
    }

    #[test]
    fn test_write_daily_series() {
        let series = AggregatedSeries::<Day>::from_events(&sample_events());
        let mut output = Vec::new();
        write_series(&series, &mut output).unwrap();

        insta::assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        starred_at,star_count,cumulative_star_count
        2023-01-01,2,2
        2023-04-05,1,3
        ");
    }

    #[test]
    fn test_write_quarterly_series() {
        let series = AggregatedSeries::<Quarter>::from_events(&sample_events());
        let mut output = Vec::new();
        write_series(&series, &mut output).unwrap();

        insta::assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        quarter,star_count,cumulative_star_count
        2023-Q1,2,2
        2023-Q2,1,3
        ");
    }

    #[test]
    fn test_write_empty_series_has_header_only() {
        let series = AggregatedSeries::<Quarter>::from_events(&[]);
        let mut output = Vec::new();
        write_series(&series, &mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "quarter,star_count,cumulative_star_count\n");
    }

    #[test]
    fn test_write_events() {
        let mut output = Vec::new();
        write_events(&sample_events(), &mut output).unwrap();

        insta::assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        starred_at
        2023-01-01T10:00:00Z
        2023-01-01T11:30:00Z
        2023-04-05T00:00:00Z
        ");
    }

    #[test]
    fn test_write_no_events_has_header_only() {
        let mut output = Vec::new();
        write_events(&[], &mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "starred_at\n");
    }

    #[test]
    fn test_events_read_back() {
        let events = sample_events();
        let mut output = Vec::new();
        write_events(&events, &mut output).unwrap();

        assert_eq!(read_events(output.as_slice()).unwrap(), events);
    }

    #[test]
    fn test_read_events_ignores_extra_columns() {
        let text = "login,starred_at\noctocat,2023-01-01T10:00:00Z\n";
        let events = read_events(text.as_bytes()).unwrap();
        assert_eq!(events, sample_events()[..1]);
    }

    #[test]
    fn test_read_events_accepts_dataframe_style_timestamps() {
        let text = "starred_at\n2023-01-01 10:00:00+00:00\n2023-01-01 11:30:00\n2023-04-05\n";
        assert_eq!(read_events(text.as_bytes()).unwrap(), sample_events());
    }

    #[test]
    fn test_read_events_invalid_timestamp_fails() {
        let text = "starred_at\n2023-01-01T10:00:00Z\nyesterday\n";
        let err = read_events(text.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_read_events_missing_column_fails() {
        let text = "login\noctocat\n";
        let _ = read_events(text.as_bytes()).unwrap_err();
    }

    #[test]
    fn test_read_events_empty_file() {
        let text = "starred_at\n";
        assert!(read_events(text.as_bytes()).unwrap().is_empty());
    }
}
