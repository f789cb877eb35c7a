//! Iterative local-majority smoothing that removes generation artifacts.

use super::grid::CaveGrid;
use super::params::CaveParameters;

pub(super) fn smooth(grid: &CaveGrid, params: &CaveParameters) -> CaveGrid {
    let mut cave = grid.clone();
    for _ in 0..params.smoothing_passes {
        cave = smoothing_pass(&cave, params.room_size_preference > 0.5);
    }
    cave
}

/// One snapshot pass over interior cells. The large-room rule opens isolated
/// walls and fills pockets earlier than the strict small-room rule.
fn smoothing_pass(cave: &CaveGrid, prefer_large_rooms: bool) -> CaveGrid {
    let (open_at_most, fill_at_least) = if prefer_large_rooms { (3, 5) } else { (2, 6) };

    let mut next = cave.clone();
    if cave.width() < 3 || cave.height() < 3 {
        return next;
    }
    for y in 1..cave.height() - 1 {
        for x in 1..cave.width() - 1 {
            let neighbors = cave.count_wall_neighbors(x, y);
            if cave.get(x, y) && neighbors <= open_at_most {
                next.set(x, y, false);
            } else if !cave.get(x, y) && neighbors >= fill_at_least {
                next.set(x, y, true);
            }
        }
    }
    next
}
