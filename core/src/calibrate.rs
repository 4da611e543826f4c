use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fastest spread the search will try. Interval 1 advances the frost on every
/// single move and loses on any interesting layout, so the search starts one
/// notch slower.
pub const MIN_SPREAD_INTERVAL: Ticks = 2;

/// Hazard timing accepted by the calibration search, together with the seed
/// that produced it so the spread is replayable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibratedHazard {
    pub freeze: FreezeMap,
    pub interval: Ticks,
    /// Escape length the accepted map allows; always below the step budget.
    pub shortest_steps: StepCount,
    /// Seed fed to the spread rng for the accepted attempt. Feeding it back
    /// into [`spread_times`] with the same grid and interval reproduces
    /// `freeze` exactly.
    pub spread_seed: u64,
}

/// Searches propagation intervals from fastest to slowest until the exit is
/// reachable in strictly fewer moves than `step_budget`.
///
/// Every freeze tick is a layer count times the interval and layer counts are
/// bounded by the grid diameter, so slowing the spread eventually lifts every
/// freeze tick above any fixed path length: the loop terminates on its own,
/// no iteration cap needed.
pub fn calibrate<R: Rng>(grid: &GridLayout, step_budget: StepCount, rng: &mut R) -> CalibratedHazard {
    let mut interval = MIN_SPREAD_INTERVAL;
    loop {
        let spread_seed: u64 = rng.random();
        let freeze = spread_times(grid, interval, &mut SmallRng::seed_from_u64(spread_seed));

        if let Some(shortest_steps) = shortest_safe_steps(grid, &freeze) {
            if shortest_steps < step_budget {
                log::debug!("accepted interval {interval}, escape in {shortest_steps} steps");
                return CalibratedHazard {
                    freeze,
                    interval,
                    shortest_steps,
                    spread_seed,
                };
            }
        }

        interval += 1;
    }
}
