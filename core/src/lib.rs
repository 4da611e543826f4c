#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use calibrate::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use reach::*;
pub use spread::*;
pub use tile::*;
pub use types::*;

mod calibrate;
mod engine;
mod error;
mod generator;
mod reach;
mod spread;
mod tile;
mod types;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PuzzleConfig {
    pub size: Coord2,
    /// Fixed wall positions baked into every generated layout.
    pub walls: Vec<Coord2>,
    pub min_seeds: u8,
    pub max_seeds: u8,
    /// A puzzle is only accepted when the exit is reachable in strictly fewer
    /// moves than this.
    pub step_budget: StepCount,
}

impl PuzzleConfig {
    pub fn new(
        (rows, cols): Coord2,
        walls: Vec<Coord2>,
        seed_range: (u8, u8),
        step_budget: StepCount,
    ) -> Self {
        let rows = rows.clamp(2, Coord::MAX);
        let cols = cols.clamp(2, Coord::MAX);
        let (min_seeds, max_seeds) = seed_range;
        let max_seeds = max_seeds.max(min_seeds);
        Self {
            size: (rows, cols),
            walls,
            min_seeds,
            max_seeds,
            step_budget: step_budget.max(1),
        }
    }

    /// Player start corner.
    pub const fn start(&self) -> Coord2 {
        (0, 0)
    }

    /// Exit cell, the far corner of the start row.
    pub const fn exit(&self) -> Coord2 {
        (0, self.size.1 - 1)
    }
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            size: (10, 10),
            walls: alloc::vec![(0, 8), (4, 0), (9, 5)],
            min_seeds: 3,
            max_seeds: 5,
            step_budget: 15,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    tiles: Array2<Tile>,
}

impl GridLayout {
    pub fn from_tiles(tiles: Array2<Tile>) -> Self {
        Self { tiles }
    }

    /// Builds a layout from explicit wall and seed positions. Intended for
    /// fixed scenarios; generated layouts come from [`GridGenerator`].
    pub fn from_cells(size: Coord2, walls: &[Coord2], seeds: &[Coord2]) -> Result<Self> {
        let mut tiles: Array2<Tile> = Array2::default(size.to_nd_index());

        for &coords in walls {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(PuzzleError::InvalidCoords);
            }
            tiles[coords.to_nd_index()] = Tile::Wall;
        }
        for &coords in seeds {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(PuzzleError::InvalidCoords);
            }
            if tiles[coords.to_nd_index()] == Tile::Wall {
                return Err(PuzzleError::InvalidCoords);
            }
            tiles[coords.to_nd_index()] = Tile::Seed;
        }

        Ok(Self::from_tiles(tiles))
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.tiles.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub const fn start(&self) -> Coord2 {
        (0, 0)
    }

    pub fn exit(&self) -> Coord2 {
        (0, self.size().1 - 1)
    }

    pub fn tile_at(&self, coords: Coord2) -> Tile {
        self[coords]
    }

    pub fn is_passable(&self, coords: Coord2) -> bool {
        self[coords].is_passable()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(PuzzleError::InvalidCoords)
        }
    }

    pub fn seed_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_seed()).count()
    }

    pub fn iter_seeds(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.tiles
            .indexed_iter()
            .filter(|(_, tile)| tile.is_seed())
            .map(|((row, col), _)| (row.try_into().unwrap(), col.try_into().unwrap()))
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.tiles.iter_neighbors(coords)
    }
}

impl Index<Coord2> for GridLayout {
    type Output = Tile;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.tiles[(row as usize, col as usize)]
    }
}

/// Earliest freeze tick per cell, aligned index-for-index with the grid.
///
/// Seed cells hold 0, unreached cells hold [`NEVER`]. Wall entries are never
/// consulted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FreezeMap {
    times: Array2<Ticks>,
}

impl FreezeMap {
    /// Map where nothing ever freezes.
    pub fn never(size: Coord2) -> Self {
        Self {
            times: Array2::from_elem(size.to_nd_index(), NEVER),
        }
    }

    pub fn from_times(times: Array2<Ticks>) -> Self {
        Self { times }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.times.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn time_at(&self, coords: Coord2) -> Ticks {
        self[coords]
    }

    pub(crate) fn record(&mut self, coords: Coord2, tick: Ticks) {
        self.times[coords.to_nd_index()] = tick;
    }

    /// Whether a cell may be occupied at the given step count. Entering a cell
    /// exactly as it freezes is disallowed, hence the strict inequality.
    pub fn is_safe_entry(&self, coords: Coord2, steps: StepCount) -> bool {
        Ticks::from(steps) < self[coords]
    }
}

impl Index<Coord2> for FreezeMap {
    type Output = Ticks;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.times[(row as usize, col as usize)]
    }
}

/// A fully calibrated, immutable puzzle ready to hand to the runtime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PuzzleInstance {
    grid: GridLayout,
    freeze: FreezeMap,
    interval: Ticks,
    start: Coord2,
    exit: Coord2,
}

impl PuzzleInstance {
    pub fn new(grid: GridLayout, freeze: FreezeMap, interval: Ticks) -> Result<Self> {
        let start = grid.start();
        let exit = grid.exit();
        if freeze.time_at(start) == 0 {
            return Err(PuzzleError::FrozenStart);
        }
        Ok(Self {
            grid,
            freeze,
            interval,
            start,
            exit,
        })
    }

    pub fn grid(&self) -> &GridLayout {
        &self.grid
    }

    pub fn freeze(&self) -> &FreezeMap {
        &self.freeze
    }

    pub fn interval(&self) -> Ticks {
        self.interval
    }

    pub fn start(&self) -> Coord2 {
        self.start
    }

    pub fn exit(&self) -> Coord2 {
        self.exit
    }

    /// Runtime legality check for a single move: may the player stand on
    /// `target` after having taken `steps_after_move` moves in total?
    pub fn is_safe_move(&self, target: Coord2, steps_after_move: StepCount) -> bool {
        self.freeze.is_safe_entry(target, steps_after_move)
    }
}

/// Generates a layout and calibrates the hazard against the step budget.
///
/// All randomness derives from `seed`; the same seed always yields the same
/// instance.
pub fn build_puzzle(config: &PuzzleConfig, seed: u64) -> Result<PuzzleInstance> {
    use rand::prelude::*;

    let mut rng = SmallRng::seed_from_u64(seed);
    let grid = RandomGridGenerator::new(rng.random()).generate(config);
    let hazard = calibrate(&grid, config.step_budget, &mut rng);
    PuzzleInstance::new(grid, hazard.freeze, hazard.interval)
}
