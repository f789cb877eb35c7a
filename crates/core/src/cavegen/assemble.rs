//! Final grid assembly: border enforcement, wall rects, spawn-safe cells.

use crate::types::Pos;

use super::grid::CaveGrid;
use super::model::{CellRect, GeneratedRoom};

/// Spawn candidates keep this many cells of margin from the grid edge.
const SPAWN_MARGIN: usize = 2;

pub(super) fn assemble(mut cave: CaveGrid) -> GeneratedRoom {
    force_border_walls(&mut cave);
    let walls = collect_wall_rects(&cave);
    let open_spaces = enumerate_open_spaces(&cave);
    GeneratedRoom { grid: cave, walls, open_spaces }
}

/// The playable area is always interior-bounded, whatever the pipeline left
/// on the border.
fn force_border_walls(cave: &mut CaveGrid) {
    let width = cave.width();
    let height = cave.height();
    for x in 0..width {
        cave.set(x, 0, true);
        cave.set(x, height - 1, true);
    }
    for y in 0..height {
        cave.set(0, y, true);
        cave.set(width - 1, y, true);
    }
}

fn collect_wall_rects(cave: &CaveGrid) -> Vec<CellRect> {
    let mut walls = Vec::new();
    for y in 0..cave.height() {
        for x in 0..cave.width() {
            if cave.get(x, y) {
                walls.push(CellRect { x: x as u32, y: y as u32, width: 1, height: 1 });
            }
        }
    }
    walls
}

/// Cells whose full 3x3 neighborhood is open, inside the spawn margin. The
/// caller places entities only on these.
fn enumerate_open_spaces(cave: &CaveGrid) -> Vec<Pos> {
    let mut open_spaces = Vec::new();
    if cave.width() <= SPAWN_MARGIN * 2 || cave.height() <= SPAWN_MARGIN * 2 {
        return open_spaces;
    }
    for y in SPAWN_MARGIN..cave.height() - SPAWN_MARGIN {
        for x in SPAWN_MARGIN..cave.width() - SPAWN_MARGIN {
            if cave.count_walls_3x3(x, y) == 0 {
                open_spaces.push(Pos { y: y as i32, x: x as i32 });
            }
        }
    }
    open_spaces
}
