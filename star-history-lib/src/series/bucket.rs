use chrono::{DateTime, Datelike, NaiveDate, Utc};
use core::fmt::{Display, Formatter};

/// A grouping key that star events are counted under.
pub trait Bucket: Copy + Ord + Display {
    /// Column heading used when the series is persisted.
    const COLUMN: &'static str;

    /// The bucket a timestamp falls into.
    fn of(timestamp: &DateTime<Utc>) -> Self;
}

/// A UTC calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(NaiveDate);

impl Bucket for Day {
    const COLUMN: &'static str = "starred_at";

    fn of(timestamp: &DateTime<Utc>) -> Self {
        Self(timestamp.date_naive())
    }
}

impl Display for Day {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// A calendar quarter, displayed as `YYYY-Qn`.
///
/// Ordering is by year, then quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quarter {
    year: i32,
    quarter: u8,
}

impl Bucket for Quarter {
    const COLUMN: &'static str = "quarter";

    #[expect(clippy::cast_possible_truncation, reason = "quarter is always in 1..=4")]
    fn of(timestamp: &DateTime<Utc>) -> Self {
        Self {
            year: timestamp.year(),
            quarter: (timestamp.month0() / 3 + 1) as u8,
        }
    }
}

impl Display for Quarter {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}-Q{}", self.year, self.quarter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_day_floors_time_of_day() {
        let morning = Day::of(&ts(2023, 1, 1, 0));
        let evening = Day::of(&ts(2023, 1, 1, 23));
        assert_eq!(morning, evening);
        assert_eq!(morning.to_string(), "2023-01-01");
    }

    #[test]
    fn test_quarter_boundaries() {
        assert_eq!(Quarter::of(&ts(2023, 1, 1, 0)).to_string(), "2023-Q1");
        assert_eq!(Quarter::of(&ts(2023, 3, 31, 23)).to_string(), "2023-Q1");
        assert_eq!(Quarter::of(&ts(2023, 4, 1, 0)).to_string(), "2023-Q2");
        assert_eq!(Quarter::of(&ts(2023, 6, 30, 0)).to_string(), "2023-Q2");
        assert_eq!(Quarter::of(&ts(2023, 7, 1, 0)).to_string(), "2023-Q3");
        assert_eq!(Quarter::of(&ts(2023, 10, 1, 0)).to_string(), "2023-Q4");
        assert_eq!(Quarter::of(&ts(2023, 12, 31, 23)).to_string(), "2023-Q4");
    }

    #[test]
    fn test_quarter_ordering_crosses_years() {
        let q4_2022 = Quarter::of(&ts(2022, 12, 31, 23));
        let q1_2023 = Quarter::of(&ts(2023, 1, 1, 0));
        let q3_2022 = Quarter::of(&ts(2022, 8, 1, 0));
        assert!(q3_2022 < q4_2022);
        assert!(q4_2022 < q1_2023);
    }

    #[test]
    fn test_day_ordering_crosses_years() {
        assert!(Day::of(&ts(2022, 12, 31, 23)) < Day::of(&ts(2023, 1, 1, 0)));
    }

    #[test]
    fn test_columns() {
        assert_eq!(Day::COLUMN, "starred_at");
        assert_eq!(Quarter::COLUMN, "quarter");
    }
}
