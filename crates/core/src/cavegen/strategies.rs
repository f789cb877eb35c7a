//! The five competing raw-grid strategies behind one parameter object.

use std::collections::BTreeSet;

use rand_chacha::ChaCha8Rng;

use crate::types::Pos;

use super::grid::CaveGrid;
use super::params::{CaveKind, CaveParameters};
use super::rng;

/// Maze carve steps jump four cells so corridors keep wall mass between them.
const MAZE_STEP: i32 = 4;
const MAZE_BRANCH_CHANCE: f64 = 0.7;

pub(super) fn generate(
    width: usize,
    height: usize,
    params: &CaveParameters,
    rng: &mut ChaCha8Rng,
) -> CaveGrid {
    match params.kind {
        CaveKind::Cellular => generate_cellular(width, height, params, rng),
        CaveKind::Perlin => generate_perlin(width, height, params, rng),
        CaveKind::Maze => generate_maze(width, height, params, rng),
        CaveKind::Cavern => generate_cavern(width, height, params, rng),
        CaveKind::Mixed => generate_mixed(width, height, params, rng),
    }
}

pub(super) fn generate_cellular(
    width: usize,
    height: usize,
    params: &CaveParameters,
    rng: &mut ChaCha8Rng,
) -> CaveGrid {
    let mut cave = CaveGrid::filled(width, height, false);
    let half_width = (width / 2).max(1) as f64;
    let half_height = (height / 2).max(1) as f64;

    for y in 0..height {
        for x in 0..width {
            let mut wall_chance = params.density;
            if params.vertical_bias != 0.0 {
                let center_distance = (x as f64 - (width / 2) as f64).abs() / half_width;
                wall_chance += params.vertical_bias * center_distance * 0.3;
            }
            if params.horizontal_bias != 0.0 {
                let center_distance = (y as f64 - (height / 2) as f64).abs() / half_height;
                wall_chance += params.horizontal_bias * center_distance * 0.3;
            }
            cave.set(x, y, rng::unit_f64(rng) < wall_chance);
        }
    }

    let threshold = params.automata_threshold();
    for _ in 0..params.iterations {
        cave = automata_pass(&cave, threshold);
    }
    cave
}

/// One full-grid majority pass reading a stable snapshot; in-place mutation
/// would bias the result directionally.
fn automata_pass(cave: &CaveGrid, threshold: usize) -> CaveGrid {
    let mut next = CaveGrid::filled(cave.width(), cave.height(), false);
    for y in 0..cave.height() {
        for x in 0..cave.width() {
            next.set(x, y, cave.count_walls_3x3(x, y) >= threshold);
        }
    }
    next
}

pub(super) fn generate_perlin(
    width: usize,
    height: usize,
    params: &CaveParameters,
    rng: &mut ChaCha8Rng,
) -> CaveGrid {
    let offset_x = rng::range_usize(rng, 0, 999) as f64;
    let offset_y = rng::range_usize(rng, 0, 999) as f64;
    let threshold = params.noise_threshold();
    let x_freq_scale = 1.0 + params.horizontal_bias * 0.5;
    let y_freq_scale = 1.0 + params.vertical_bias * 0.5;

    let mut cave = CaveGrid::filled(width, height, false);
    for y in 0..height {
        for x in 0..width {
            let mut value = 0.0;
            let mut amplitude = 1.0;
            let mut frequency = params.noise_scale;
            for _ in 0..params.noise_octaves {
                let sample_x = (x as f64 + offset_x) * frequency * x_freq_scale;
                let sample_y = (y as f64 + offset_y) * frequency * y_freq_scale;
                value += amplitude * sample_x.sin() * sample_y.cos();
                amplitude *= 0.5;
                frequency *= 2.0;
            }
            let normalized = (value + 1.0) / 2.0;
            cave.set(x, y, normalized > threshold);
        }
    }
    cave
}

pub(super) fn generate_maze(
    width: usize,
    height: usize,
    params: &CaveParameters,
    rng: &mut ChaCha8Rng,
) -> CaveGrid {
    let mut cave = CaveGrid::filled(width, height, true);
    // Half-width below 2 leaves gaps between step-4 carve squares.
    let carve_half_width = params.carve_half_width().max(2);
    let start = Pos { y: (height / 2) as i32, x: (width / 2) as i32 };

    let mut stack = vec![start];
    let mut visited = BTreeSet::new();
    while let Some(cell) = stack.pop() {
        if !visited.insert(cell) {
            continue;
        }

        carve_square(&mut cave, cell, carve_half_width);

        let mut directions = if params.horizontal_bias > 0.0 {
            [
                Pos { y: 0, x: MAZE_STEP },
                Pos { y: 0, x: -MAZE_STEP },
                Pos { y: MAZE_STEP, x: 0 },
                Pos { y: -MAZE_STEP, x: 0 },
            ]
        } else {
            [
                Pos { y: MAZE_STEP, x: 0 },
                Pos { y: -MAZE_STEP, x: 0 },
                Pos { y: 0, x: MAZE_STEP },
                Pos { y: 0, x: -MAZE_STEP },
            ]
        };
        rng::shuffle(rng, &mut directions);

        for step in directions {
            let next = Pos { y: cell.y + step.y, x: cell.x + step.x };
            let interior = next.x > 0
                && next.y > 0
                && (next.x as usize) < width.saturating_sub(1)
                && (next.y as usize) < height.saturating_sub(1);
            if interior && !visited.contains(&next) && rng::unit_f64(rng) < MAZE_BRANCH_CHANCE {
                stack.push(next);
            }
        }
    }
    cave
}

fn carve_square(cave: &mut CaveGrid, center: Pos, half_width: usize) {
    let reach = half_width as i32;
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let pos = Pos { y: center.y + dy, x: center.x + dx };
            if cave.in_bounds(pos) {
                cave.set(pos.x as usize, pos.y as usize, false);
            }
        }
    }
}

pub(super) fn generate_cavern(
    width: usize,
    height: usize,
    params: &CaveParameters,
    rng: &mut ChaCha8Rng,
) -> CaveGrid {
    let mut cave = CaveGrid::filled(width, height, true);
    let blob_count = ((4.0 * params.room_size_preference).round() as usize).max(2);
    let base_radius = 20.0 + params.room_size_preference * 30.0;
    let x_scale = 1.0 + params.horizontal_bias * 0.5;
    let y_scale = 1.0 + params.vertical_bias * 0.5;
    let reach = base_radius as i32;

    for _ in 0..blob_count {
        // Blob centers stay within the central 50% of the grid.
        let center_x = rng::range_usize(rng, width / 4, 3 * width / 4) as i32;
        let center_y = rng::range_usize(rng, height / 4, 3 * height / 4) as i32;

        for y in (center_y - reach).max(0)..(center_y + reach).min(height as i32) {
            for x in (center_x - reach).max(0)..(center_x + reach).min(width as i32) {
                let dx = f64::from(x - center_x) / x_scale;
                let dy = f64::from(y - center_y) / y_scale;
                let distance = (dx * dx + dy * dy).sqrt();
                let jitter = 0.7 + rng::unit_f64(rng) * 0.3;
                if distance < base_radius * jitter {
                    cave.set(x as usize, y as usize, false);
                }
            }
        }
    }
    cave
}

pub(super) fn generate_mixed(
    width: usize,
    height: usize,
    params: &CaveParameters,
    rng: &mut ChaCha8Rng,
) -> CaveGrid {
    let cellular = generate_cellular(width, height, params, rng);

    let noise_params = CaveParameters {
        noise_scale: params.noise_scale * 1.5,
        room_size_preference: 1.0 - params.room_size_preference,
        ..CaveParameters::default()
    };
    let noise = generate_perlin(width, height, &noise_params, rng);

    let prefer_large_rooms = params.room_size_preference > 0.5;
    let mut combined = CaveGrid::filled(width, height, false);
    for y in 0..height {
        for x in 0..width {
            // Large-room preference keeps only cells both sub-grids opened;
            // otherwise either sub-grid opening a cell is enough.
            let wall = if prefer_large_rooms {
                cellular.get(x, y) || noise.get(x, y)
            } else {
                cellular.get(x, y) && noise.get(x, y)
            };
            combined.set(x, y, wall);
        }
    }
    combined
}
