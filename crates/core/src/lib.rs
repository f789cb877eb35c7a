pub mod cavegen;
pub mod types;

pub use cavegen::{
    CaveGenError, CaveGrid, CaveKind, CaveParameters, CellRect, GeneratedRoom,
    generate_playable_room, generate_room, generate_room_with_rng, preset_for_room,
};
pub use types::*;
