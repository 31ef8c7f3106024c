use super::{Bucket, StarEvent};
use std::collections::BTreeMap;

/// One row of an aggregated series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesRow<B> {
    pub bucket: B,
    pub star_count: u64,
    pub cumulative_star_count: u64,
}

/// Star counts per bucket, sorted ascending by bucket, with running totals.
///
/// `cumulative_star_count` of row `i` is the sum of `star_count` over rows `0..=i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedSeries<B> {
    rows: Vec<SeriesRow<B>>,
}

impl<B: Bucket> AggregatedSeries<B> {
    /// Group `events` by bucket, count each group, and accumulate the counts in bucket order.
    #[must_use]
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a StarEvent>) -> Self {
        let mut counts: BTreeMap<B, u64> = BTreeMap::new();
        for event in events {
            *counts.entry(B::of(&event.starred_at)).or_default() += 1;
        }

        let mut cumulative_star_count = 0;
        let rows = counts
            .into_iter()
            .map(|(bucket, star_count)| {
                cumulative_star_count += star_count;
                SeriesRow {
                    bucket,
                    star_count,
                    cumulative_star_count,
                }
            })
            .collect();

        Self { rows }
    }
}

impl<B> AggregatedSeries<B> {
    #[must_use]
    pub fn rows(&self) -> &[SeriesRow<B>] {
        &self.rows
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Total number of stars covered by the series.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.rows.last().map_or(0, |row| row.cumulative_star_count)
    }
}
