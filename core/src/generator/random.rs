use alloc::vec::Vec;
use ndarray::Array2;

use super::*;

/// Rows and columns around the start corner where seeds may never land, so a
/// fresh puzzle always gives the player a little breathing room.
const START_EXCLUSION: Coord = 3;

/// Generation strategy that bakes in the configured walls and scatters a
/// random number of hazard seeds uniformly over the half of the grid farther
/// from the start corner.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomGridGenerator {
    seed: u64,
}

impl RandomGridGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl GridGenerator for RandomGridGenerator {
    fn generate(self, config: &PuzzleConfig) -> GridLayout {
        use rand::prelude::*;

        let (rows, cols) = config.size;
        let mut tiles: Array2<Tile> = Array2::default(config.size.to_nd_index());

        for &wall in &config.walls {
            if wall.0 >= rows || wall.1 >= cols {
                log::warn!("Wall at {wall:?} is outside the {rows}x{cols} grid, skipped");
                continue;
            }
            tiles[wall.to_nd_index()] = Tile::Wall;
        }

        let start = config.start();
        let exit = config.exit();
        let mut eligible: Vec<Coord2> = (0..rows)
            .flat_map(|row| (cols / 2..cols).map(move |col| (row, col)))
            .filter(|&pos| tiles[pos.to_nd_index()] == Tile::Open)
            .filter(|&pos| pos != start && pos != exit)
            .filter(|&(row, col)| !(row < START_EXCLUSION && col < START_EXCLUSION))
            .collect();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let requested = usize::from(rng.random_range(config.min_seeds..=config.max_seeds));
        eligible.shuffle(&mut rng);

        let mut placed = 0;
        for &pos in &eligible {
            if placed == requested {
                break;
            }
            tiles[pos.to_nd_index()] = Tile::Seed;
            if keeps_escape_open(&tiles) {
                placed += 1;
            } else {
                // A seed here would wall the exit off before the clock even
                // starts; skip the candidate and keep sampling.
                tiles[pos.to_nd_index()] = Tile::Open;
            }
        }

        if placed < requested {
            log::warn!("Requested {requested} seeds but could only place {placed}");
        }

        GridLayout::from_tiles(tiles)
    }
}

/// Whether the exit is still reachable from the start when every seed is
/// treated as frozen from tick 0. Seeds have freeze time 0 at any interval,
/// so a placement that fails this check can never be calibrated solvable.
fn keeps_escape_open(tiles: &Array2<Tile>) -> bool {
    let grid = GridLayout::from_tiles(tiles.clone());
    let mut freeze = FreezeMap::never(grid.size());
    for pos in grid.iter_seeds() {
        freeze.record(pos, 0);
    }
    shortest_safe_steps(&grid, &freeze).is_some()
}
