//! Tour Stepper.
//!
//! Moves the current stop of an active tour. Out-of-range selections are
//! ignored rather than rejected; the caller disables previous/next at the
//! boundaries.

use tracing::debug;

use crate::domain::catalog::TourStop;
use crate::domain::progress::TourProgress;

/// Outcome of a stop selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopSelection {
    /// The index was out of range; nothing changed.
    NoOp,
    /// The current stop moved; its query must now be resolved.
    Selected {
        /// New current index.
        index: usize,
        /// The selected stop.
        stop: TourStop,
    },
}

/// Selects the stop at `index`.
pub fn select_stop(progress: &mut TourProgress, index: i64) -> StopSelection {
    let Some((index, stop)) = progress.stop_at(index).map(|(i, s)| (i, s.clone())) else {
        debug!(tour = %progress.tour().id, index, "ignoring out-of-range stop selection");
        return StopSelection::NoOp;
    };
    progress.move_to(index);
    debug!(tour = %progress.tour().id, index, stop = %stop.name, "tour stop selected");
    StopSelection::Selected { index, stop }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::TourCatalog;

    fn stations() -> TourProgress {
        let catalog = TourCatalog::embedded().unwrap();
        TourProgress::start(catalog.find("stations-of-the-cross").unwrap())
    }

    #[test]
    fn test_select_stop_moves_current_index() {
        let mut progress = stations();

        let selection = select_stop(&mut progress, 9);

        assert_eq!(progress.current_index(), 9);
        match selection {
            StopSelection::Selected { index, stop } => {
                assert_eq!(index, 9);
                assert_eq!(stop.query, "Church of the Holy Sepulchre, Jerusalem");
            }
            StopSelection::NoOp => panic!("expected Selected"),
        }
    }

    #[test]
    fn test_out_of_range_selection_leaves_index_unchanged() {
        let mut progress = stations();
        select_stop(&mut progress, 3);

        assert_eq!(select_stop(&mut progress, 14), StopSelection::NoOp);
        assert_eq!(select_stop(&mut progress, -1), StopSelection::NoOp);
        assert_eq!(progress.current_index(), 3);
    }
}
