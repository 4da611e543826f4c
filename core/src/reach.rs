use alloc::collections::VecDeque;
use ndarray::Array2;

use crate::*;

/// Minimum number of moves from the start corner to the exit that never
/// enters a cell at or after its freeze tick, or `None` when no such route
/// exists.
///
/// Plain breadth-first search over non-wall cells; a neighbor is enterable
/// only while `steps + 1` is strictly below its freeze tick. First-reached
/// wins, which is optimal because BFS dequeues in non-decreasing step order.
pub fn shortest_safe_steps(grid: &GridLayout, freeze: &FreezeMap) -> Option<StepCount> {
    let start = grid.start();
    let exit = grid.exit();

    let mut visited: Array2<bool> = Array2::default(grid.size().to_nd_index());
    let mut frontier: VecDeque<(Coord2, StepCount)> = VecDeque::from([(start, 0)]);
    visited[start.to_nd_index()] = true;

    while let Some((pos, steps)) = frontier.pop_front() {
        if pos == exit {
            return Some(steps);
        }

        for next in grid.iter_neighbors(pos) {
            if visited[next.to_nd_index()] || !grid.is_passable(next) {
                continue;
            }
            if !freeze.is_safe_entry(next, steps + 1) {
                continue;
            }
            visited[next.to_nd_index()] = true;
            frontier.push_back((next, steps + 1));
        }
    }

    None
}
