//! Boolean occupancy grid shared by every pipeline stage.

use crate::types::Pos;

/// Row-major wall grid, origin top-left. `true` is wall, `false` is open floor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaveGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl CaveGrid {
    pub fn filled(width: usize, height: usize, wall: bool) -> Self {
        Self { width, height, cells: vec![wall; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, wall: bool) {
        self.cells[y * self.width + x] = wall;
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Out-of-bounds cells read as walls so edge neighborhoods bias solid.
    pub fn is_wall(&self, pos: Pos) -> bool {
        if !self.in_bounds(pos) {
            return true;
        }
        self.get(pos.x as usize, pos.y as usize)
    }

    /// Wall count over the full 3x3 neighborhood, the center cell included.
    pub fn count_walls_3x3(&self, x: usize, y: usize) -> usize {
        let mut count = 0;
        for dy in -1..=1_i32 {
            for dx in -1..=1_i32 {
                if self.is_wall(Pos { y: y as i32 + dy, x: x as i32 + dx }) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Wall count over the eight surrounding cells only.
    pub fn count_wall_neighbors(&self, x: usize, y: usize) -> usize {
        self.count_walls_3x3(x, y) - usize::from(self.get(x, y))
    }

    pub fn open_cell_count(&self) -> usize {
        self.cells.iter().filter(|&&wall| !wall).count()
    }
}
