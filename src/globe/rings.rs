use rand::{seq::index, Rng};

use super::arcs::RenderPoint;
use super::engine::{GlobeEngine, PointDatum};

/// Cadence of the ring pulse cycle.
pub const RING_INTERVAL_MS: u64 = 2000;

/// How many of `n` points pulse per cycle, or `None` when there is nothing to choose from.
pub fn ring_count(n: usize) -> Option<usize> {
    if n <= 1 {
        return None;
    }
    let max_index = n - 1;
    Some((max_index * 4 / 5).clamp(1, max_index))
}

/// `count` distinct integers drawn from `[min, max)`.
///
/// Degenerate requests (empty range, zero count, or more values than the range holds)
/// return `[min]` so the caller's animation loop keeps going.
pub fn gen_random_numbers<R>(rng: &mut R, min: usize, max: usize, count: usize) -> Vec<usize>
where
    R: Rng + ?Sized,
{
    if min >= max || count == 0 || max - min < count {
        return vec![min];
    }
    index::sample(rng, max - min, count)
        .into_iter()
        .map(|i| i + min)
        .collect()
}

/// Picks which points pulse each cycle. The current selection lives here, per globe.
#[derive(Debug, Default)]
pub struct RingScheduler {
    selection: Vec<usize>,
}

impl RingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    pub fn reset(&mut self) {
        self.selection.clear();
    }

    /// Run one cycle. Skips silently when there is no engine or no points.
    pub fn tick<E, R>(&mut self, points: &[RenderPoint], engine: Option<&mut E>, rng: &mut R)
    where
        E: GlobeEngine + ?Sized,
        R: Rng + ?Sized,
    {
        let Some(engine) = engine else {
            return;
        };
        if points.is_empty() {
            return;
        }

        let Some(count) = ring_count(points.len()) else {
            self.selection.clear();
            if let Err(err) = engine.set_rings_data(&[]) {
                log::error!("Error clearing rings: {err}");
            }
            return;
        };

        let mut selection = gen_random_numbers(rng, 0, points.len(), count);
        if selection.is_empty() {
            selection.push(0);
        }
        selection.sort_unstable();

        let rings = selection
            .iter()
            .filter_map(|&i| points.get(i).map(|p| PointDatum::new(i, p)))
            .collect::<Vec<_>>();
        self.selection = selection;
        if rings.is_empty() {
            return;
        }
        if let Err(err) = engine.set_rings_data(&rings) {
            log::error!("Error updating rings: {err}");
            self.selection.clear();
            if let Err(err) = engine.set_rings_data(&[]) {
                log::error!("Error resetting rings: {err}");
            }
        }
    }
}
