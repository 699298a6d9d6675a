//! Scripted random sources.

use pathfinder_core::rng::DeterministicRng;

/// Always the low end of the range, so `pick_one` picks the first option.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }
}

/// Replays scripted values, clamped into the requested range, so a test can
/// choose which narrative style or voice gets picked.
///
/// Panics when asked for more values than were scripted.
#[derive(Debug)]
pub struct SequenceRng {
    values: std::vec::IntoIter<u32>,
}

impl SequenceRng {
    /// Scripts `values` in draw order.
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        Self {
            values: values.into_iter(),
        }
    }

    /// Whether every scripted value was drawn.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.values.len() == 0
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        let Some(value) = self.values.next() else {
            panic!("SequenceRng exhausted");
        };
        value.clamp(min, max)
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }
}
