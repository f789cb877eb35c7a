//! Public data model for assembled rooms consumed by placement code.

use xxhash_rust::xxh3::xxh3_64;

use crate::types::Pos;

use super::grid::CaveGrid;

/// Grid-aligned wall bounding box in cell units; the caller scales by its
/// tile size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Final generation artifact: validated occupancy grid plus the derived
/// wall-rectangle and spawn-safe open-cell lists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedRoom {
    pub grid: CaveGrid,
    pub walls: Vec<CellRect>,
    pub open_spaces: Vec<Pos>,
}

impl GeneratedRoom {
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn is_wall(&self, pos: Pos) -> bool {
        self.grid.is_wall(pos)
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.width() as u32).to_le_bytes());
        bytes.extend((self.height() as u32).to_le_bytes());
        for &wall in self.grid.cells() {
            bytes.push(u8::from(wall));
        }
        bytes.extend((self.walls.len() as u32).to_le_bytes());
        bytes.extend((self.open_spaces.len() as u32).to_le_bytes());
        for pos in &self.open_spaces {
            bytes.extend(pos.y.to_le_bytes());
            bytes.extend(pos.x.to_le_bytes());
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_room(width: usize, height: usize) -> GeneratedRoom {
        super::super::assemble::assemble(CaveGrid::filled(width, height, false))
    }

    #[test]
    fn out_of_bounds_queries_read_as_wall() {
        let room = open_room(8, 6);
        assert!(room.is_wall(Pos { y: -1, x: 3 }));
        assert!(room.is_wall(Pos { y: 2, x: 8 }));
        assert!(!room.is_wall(Pos { y: 2, x: 3 }));
    }

    #[test]
    fn equal_rooms_share_canonical_bytes_and_fingerprint() {
        let left = open_room(10, 7);
        let right = open_room(10, 7);
        assert_eq!(left.canonical_bytes(), right.canonical_bytes());
        assert_eq!(left.fingerprint(), right.fingerprint());
    }

    #[test]
    fn canonical_bytes_change_with_the_grid() {
        let small = open_room(10, 7);
        let wide = open_room(11, 7);
        assert_ne!(small.canonical_bytes(), wide.canonical_bytes());
        assert_ne!(small.fingerprint(), wide.fingerprint());
    }
}
