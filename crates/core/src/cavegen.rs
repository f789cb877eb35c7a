//! Procedural cave generation domain split into coherent submodules.
//!
//! The pipeline is a linear composition over one grid representation:
//! strategy generator, smoother, connectivity repairer, grid assembler.
//! All randomness flows through an explicitly injected `ChaCha8Rng`
//! stream, so every result is reproducible from a seed.

pub mod model;
pub mod params;
pub mod presets;

mod assemble;
mod connect;
mod grid;
mod rng;
mod smooth;
mod strategies;

pub use grid::CaveGrid;
pub use model::{CellRect, GeneratedRoom};
pub use params::{CaveKind, CaveParameters};
pub use presets::preset_for_room;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

/// Bounded retry count before the playable fallback force-opens space.
const MAX_GENERATION_ATTEMPTS: usize = 3;
const DENSITY_RELAXATION_STEP: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub enum CaveGenError {
    InvalidDimensions { width: usize, height: usize },
    InvalidParameter { field: &'static str, value: f64 },
}

/// Generates one validated room. A missing seed draws runtime entropy;
/// a given seed makes the result exactly reproducible.
pub fn generate_room(
    width: usize,
    height: usize,
    params: &CaveParameters,
    seed: Option<u64>,
) -> Result<GeneratedRoom, CaveGenError> {
    validate_request(width, height, params)?;
    let seed = seed.unwrap_or_else(rng::generate_runtime_seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Ok(run_pipeline(width, height, params, &mut rng))
}

/// Variant for callers that own the RNG stream, e.g. to generate several
/// rooms from one run seed.
pub fn generate_room_with_rng(
    width: usize,
    height: usize,
    params: &CaveParameters,
    rng: &mut ChaCha8Rng,
) -> Result<GeneratedRoom, CaveGenError> {
    validate_request(width, height, params)?;
    Ok(run_pipeline(width, height, params, rng))
}

/// Like [`generate_room`], but guarantees a non-empty spawn list on grids
/// large enough to host one: unlucky degenerate output is retried with
/// relaxed density a bounded number of times, then a small block near the
/// grid center is force-opened. Deterministic for a given seed.
pub fn generate_playable_room(
    width: usize,
    height: usize,
    params: &CaveParameters,
    seed: Option<u64>,
) -> Result<GeneratedRoom, CaveGenError> {
    validate_request(width, height, params)?;
    let base_seed = seed.unwrap_or_else(rng::generate_runtime_seed);

    let mut relaxed = params.clone();
    let mut last_room = None;
    for attempt in 0..MAX_GENERATION_ATTEMPTS {
        // Attempt zero replays generate_room exactly.
        let attempt_seed =
            if attempt == 0 { base_seed } else { derive_attempt_seed(base_seed, attempt as u64) };
        let mut rng = ChaCha8Rng::seed_from_u64(attempt_seed);
        let room = run_pipeline(width, height, &relaxed, &mut rng);
        if !room.open_spaces.is_empty() {
            return Ok(room);
        }
        relaxed.density = (relaxed.density - DENSITY_RELAXATION_STEP).max(0.0);
        last_room = Some(room);
    }

    let mut cave = last_room.expect("at least one attempt always runs").grid;
    force_open_spawn_block(&mut cave);
    Ok(assemble::assemble(cave))
}

fn run_pipeline(
    width: usize,
    height: usize,
    params: &CaveParameters,
    rng: &mut ChaCha8Rng,
) -> GeneratedRoom {
    let raw = strategies::generate(width, height, params, rng);
    let smoothed = smooth::smooth(&raw, params);
    let repaired = connect::ensure_connected(smoothed, params);
    assemble::assemble(repaired)
}

fn validate_request(
    width: usize,
    height: usize,
    params: &CaveParameters,
) -> Result<(), CaveGenError> {
    if width == 0 || height == 0 {
        return Err(CaveGenError::InvalidDimensions { width, height });
    }
    params.validate()
}

/// Opens a fixed 5x5 block (clipped to the interior) around the grid
/// center, the minimal guaranteed region for a degenerate grid.
fn force_open_spawn_block(cave: &mut CaveGrid) {
    let center_x = cave.width() / 2;
    let center_y = cave.height() / 2;
    let min_x = center_x.saturating_sub(2).max(1);
    let min_y = center_y.saturating_sub(2).max(1);
    let max_x = (center_x + 2).min(cave.width().saturating_sub(2));
    let max_y = (center_y + 2).min(cave.height().saturating_sub(2));
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            cave.set(x, y, false);
        }
    }
}

fn derive_attempt_seed(base_seed: u64, attempt: u64) -> u64 {
    let mut mixed = base_seed ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= attempt.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}
