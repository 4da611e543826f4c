use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineState {
    Ready,
    Active,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Ready
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MoveOutcome {
    /// Move rejected, player did not advance: wall or grid edge.
    Blocked,
    Moved,
    /// The target cell froze at or before the arrival step.
    Frozen,
    Escaped,
}

impl MoveOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Blocked)
    }
}

/// Drives a single run of a calibrated puzzle: tracks the player position and
/// step count and applies the freeze rule on every move.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EscapeEngine {
    puzzle: PuzzleInstance,
    position: Coord2,
    steps: StepCount,
    state: EngineState,
}

impl EscapeEngine {
    pub fn new(puzzle: PuzzleInstance) -> Result<Self> {
        if !puzzle.is_safe_move(puzzle.start(), 0) {
            return Err(PuzzleError::FrozenStart);
        }
        Ok(Self {
            position: puzzle.start(),
            puzzle,
            steps: 0,
            state: Default::default(),
        })
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn position(&self) -> Coord2 {
        self.position
    }

    pub fn steps(&self) -> StepCount {
        self.steps
    }

    pub fn puzzle(&self) -> &PuzzleInstance {
        &self.puzzle
    }

    /// Whether a cell is visibly frozen at the current step count.
    pub fn is_frozen(&self, coords: Coord2) -> bool {
        !self.puzzle.is_safe_move(coords, self.steps)
    }

    pub fn step(&mut self, direction: Direction) -> Result<MoveOutcome> {
        self.check_not_finished()?;

        let bounds = self.puzzle.grid().size();
        let Some(next) = apply_delta(self.position, direction.delta(), bounds) else {
            return Ok(MoveOutcome::Blocked);
        };
        if !self.puzzle.grid().is_passable(next) {
            return Ok(MoveOutcome::Blocked);
        }

        let steps = self.steps + 1;
        self.position = next;
        self.steps = steps;

        if !self.puzzle.is_safe_move(next, steps) {
            self.state = EngineState::Lost;
            return Ok(MoveOutcome::Frozen);
        }

        if next == self.puzzle.exit() {
            self.state = EngineState::Won;
            Ok(MoveOutcome::Escaped)
        } else {
            self.mark_started();
            Ok(MoveOutcome::Moved)
        }
    }

    fn mark_started(&mut self) {
        if matches!(self.state, EngineState::Ready) {
            self.state = EngineState::Active;
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(PuzzleError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
