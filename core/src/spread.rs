use alloc::collections::VecDeque;
use rand::Rng;
use rand::seq::SliceRandom;
use smallvec::SmallVec;

use crate::*;

/// How many of the four cardinal directions each frontier expansion attempts.
///
/// Deliberately one short of exhaustive: the frontier under-explores, so the
/// frost edge grows ragged instead of a perfect Manhattan diamond, and some
/// cells end up freezing later than a full relaxation would give them. Do not
/// raise this to 4 without recalibrating step budgets.
pub const SPREAD_FAN_OUT: usize = 3;

/// Computes the earliest freeze tick of every cell by multi-source expansion
/// from the seed cells, advancing one layer per `interval` ticks.
///
/// The result depends on `rng`: each expansion shuffles the cardinal
/// directions and attempts only the first [`SPREAD_FAN_OUT`] of them. Cells
/// the expansion never reaches keep [`NEVER`]. Recorded times only ever
/// decrease, so the frontier drains and the loop always terminates.
pub fn spread_times<R: Rng>(grid: &GridLayout, interval: Ticks, rng: &mut R) -> FreezeMap {
    let bounds = grid.size();
    let mut freeze = FreezeMap::never(bounds);
    let mut frontier: VecDeque<(Coord2, Ticks)> = VecDeque::new();

    for pos in grid.iter_seeds() {
        freeze.record(pos, 0);
        frontier.push_back((pos, 0));
    }

    while let Some((pos, tick)) = frontier.pop_front() {
        let arrival = tick + interval;
        let mut directions: SmallVec<[(isize, isize); 4]> = SmallVec::from_slice(&CARDINALS);
        directions.shuffle(rng);

        for &delta in directions.iter().take(SPREAD_FAN_OUT) {
            let Some(next) = apply_delta(pos, delta, bounds) else {
                continue;
            };
            if grid.is_passable(next) && freeze.time_at(next) > arrival {
                freeze.record(next, arrival);
                frontier.push_back((next, arrival));
            }
        }
    }

    freeze
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    fn grid_with_seeds(seeds: &[Coord2]) -> GridLayout {
        GridLayout::from_cells((10, 10), &[(0, 8), (4, 0), (9, 5)], seeds).unwrap()
    }

    #[test]
    fn seeds_freeze_at_tick_zero_and_nothing_else_does() {
        let grid = grid_with_seeds(&[(5, 5), (8, 8)]);
        let mut rng = SmallRng::seed_from_u64(1);

        let freeze = spread_times(&grid, 2, &mut rng);

        let (rows, cols) = grid.size();
        for row in 0..rows {
            for col in 0..cols {
                let pos = (row, col);
                if grid[pos].is_seed() {
                    assert_eq!(freeze[pos], 0);
                } else {
                    assert!(freeze[pos] >= 1, "non-seed {pos:?} froze at tick 0");
                }
            }
        }
    }

    #[test]
    fn finite_times_are_multiples_of_the_interval() {
        let grid = grid_with_seeds(&[(6, 6)]);
        let interval = 3;
        let mut rng = SmallRng::seed_from_u64(2);

        let freeze = spread_times(&grid, interval, &mut rng);

        let (rows, cols) = grid.size();
        for row in 0..rows {
            for col in 0..cols {
                let time = freeze[(row, col)];
                if time != NEVER {
                    assert_eq!(time % interval, 0);
                }
            }
        }
    }

    #[test]
    fn reached_neighbors_of_a_seed_freeze_no_earlier_than_one_interval() {
        let grid = grid_with_seeds(&[(5, 5)]);

        for rng_seed in 0..16 {
            let mut rng = SmallRng::seed_from_u64(rng_seed);
            let freeze = spread_times(&grid, 2, &mut rng);

            for next in grid.iter_neighbors((5, 5)) {
                let time = freeze[next];
                assert!(time == NEVER || time >= 2, "neighbor froze at {time}");
            }
        }
    }

    #[test]
    fn walls_are_never_frozen() {
        let grid = grid_with_seeds(&[(8, 4), (9, 6)]);
        let mut rng = SmallRng::seed_from_u64(3);

        let freeze = spread_times(&grid, 2, &mut rng);

        assert_eq!(freeze[(9, 5)], NEVER);
        assert_eq!(freeze[(4, 0)], NEVER);
        assert_eq!(freeze[(0, 8)], NEVER);
    }

    #[test]
    fn no_seeds_means_nothing_ever_freezes() {
        let grid = grid_with_seeds(&[]);
        let mut rng = SmallRng::seed_from_u64(4);

        let freeze = spread_times(&grid, 2, &mut rng);

        assert_eq!(freeze, FreezeMap::never(grid.size()));
    }

    #[test]
    fn seed_next_to_the_exit_freezes_it_late_or_never() {
        // The randomized fan-out may skip the exit entirely, or reach it by a
        // longer route; it must never freeze before one full interval.
        let grid = grid_with_seeds(&[(1, 9)]);

        for rng_seed in 0..32 {
            let mut rng = SmallRng::seed_from_u64(rng_seed);
            let freeze = spread_times(&grid, 2, &mut rng);

            let exit_time = freeze[grid.exit()];
            assert!(exit_time == NEVER || (exit_time >= 2 && exit_time % 2 == 0));
        }
    }

    #[test]
    fn identical_rng_seeds_give_identical_maps() {
        let grid = grid_with_seeds(&[(5, 5), (7, 2), (2, 8)]);

        let a = spread_times(&grid, 2, &mut SmallRng::seed_from_u64(11));
        let b = spread_times(&grid, 2, &mut SmallRng::seed_from_u64(11));

        assert_eq!(a, b);
    }
}
