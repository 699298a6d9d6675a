//! Position within an active tour.

use std::sync::Arc;

use serde::Serialize;

use super::catalog::{Tour, TourStop};

/// Where a stop sits relative to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopStatus {
    /// Before the current stop.
    Completed,
    /// The current stop.
    Current,
    /// After the current stop.
    Upcoming,
}

/// An active tour and the index of the current stop.
///
/// Invariant: `0 <= current_index < tour.stops.len()`.
#[derive(Debug, Clone)]
pub struct TourProgress {
    tour: Arc<Tour>,
    current_index: usize,
}

impl TourProgress {
    /// Starts `tour` at its first stop.
    #[must_use]
    pub fn start(tour: Arc<Tour>) -> Self {
        Self {
            tour,
            current_index: 0,
        }
    }

    /// The tour being followed.
    #[must_use]
    pub fn tour(&self) -> &Arc<Tour> {
        &self.tour
    }

    /// Index of the current stop.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The current stop.
    #[must_use]
    pub fn current_stop(&self) -> &TourStop {
        &self.tour.stops[self.current_index]
    }

    /// The stop at `index`, if it exists. Negative indices never exist.
    #[must_use]
    pub fn stop_at(&self, index: i64) -> Option<(usize, &TourStop)> {
        let index = usize::try_from(index).ok()?;
        self.tour.stops.get(index).map(|stop| (index, stop))
    }

    pub(crate) fn move_to(&mut self, index: usize) {
        debug_assert!(index < self.tour.stops.len());
        self.current_index = index;
    }

    /// Index of the previous stop; `None` on the first stop.
    #[must_use]
    pub fn previous(&self) -> Option<usize> {
        self.current_index.checked_sub(1)
    }

    /// Index of the next stop; `None` on the last stop.
    #[must_use]
    pub fn next(&self) -> Option<usize> {
        let next = self.current_index + 1;
        (next < self.tour.stops.len()).then_some(next)
    }

    /// Share of the tour reached, counting the current stop, in percent.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent_complete(&self) -> f64 {
        (self.current_index + 1) as f64 / self.tour.stops.len() as f64 * 100.0
    }

    /// Status of the stop at `index` relative to the current one.
    #[must_use]
    pub fn status_of(&self, index: usize) -> StopStatus {
        match index.cmp(&self.current_index) {
            std::cmp::Ordering::Less => StopStatus::Completed,
            std::cmp::Ordering::Equal => StopStatus::Current,
            std::cmp::Ordering::Greater => StopStatus::Upcoming,
        }
    }
}
