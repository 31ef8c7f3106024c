//! Aggregation of star events into time series
//!
//! Star events are grouped into buckets (UTC calendar days or calendar quarters),
//! counted per bucket, sorted by bucket, and accumulated into a running total.
//! The same grouping code serves both granularities through the [`Bucket`] trait.

mod aggregated_series;
mod bucket;
mod star_event;

pub use aggregated_series::{AggregatedSeries, SeriesRow};
pub use bucket::{Bucket, Day, Quarter};
pub use star_event::StarEvent;

/// Daily star counts.
pub type DailySeries = AggregatedSeries<Day>;

/// Quarterly star counts.
pub type QuarterlySeries = AggregatedSeries<Quarter>;

/// Both series derived from one list of star events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarHistory {
    pub daily: DailySeries,
    pub quarterly: QuarterlySeries,
}

impl StarHistory {
    #[must_use]
    pub fn aggregate(events: &[StarEvent]) -> Self {
        Self {
            daily: DailySeries::from_events(events),
            quarterly: QuarterlySeries::from_events(events),
        }
    }
}
