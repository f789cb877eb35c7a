//! Flood-fill region analysis and tunnel carving to repair connectivity.

use crate::types::Pos;

use super::grid::CaveGrid;
use super::params::CaveParameters;

/// Closest-pair search is bounded to the first points of each region;
/// "close enough" is all the repair step needs.
const REGION_SAMPLE_LIMIT: usize = 20;

pub(super) fn ensure_connected(mut cave: CaveGrid, params: &CaveParameters) -> CaveGrid {
    let regions = open_regions(&cave, params.min_region_size());
    if regions.len() <= 1 {
        return cave;
    }

    let anchor_index = largest_region_index(&regions);
    let max_connections =
        (regions.len() as f64 * params.connectivity_strength).round() as usize;

    let mut connections_made = 0_usize;
    for (index, region) in regions.iter().enumerate() {
        if index == anchor_index || connections_made >= max_connections {
            continue;
        }
        if let Some((from, to)) = closest_pair(&regions[anchor_index], region) {
            carve_tunnel(&mut cave, from, to, params.carve_half_width());
            connections_made += 1;
        }
    }
    cave
}

/// Partitions open cells into 4-connected regions in row-major discovery
/// order, dropping regions at or below `min_region_size`.
pub(super) fn open_regions(cave: &CaveGrid, min_region_size: usize) -> Vec<Vec<Pos>> {
    let mut visited = vec![false; cave.width() * cave.height()];
    let mut regions = Vec::new();
    for y in 0..cave.height() {
        for x in 0..cave.width() {
            if cave.get(x, y) || visited[y * cave.width() + x] {
                continue;
            }
            let region = flood_fill(cave, &mut visited, Pos { y: y as i32, x: x as i32 });
            if region.len() > min_region_size {
                regions.push(region);
            }
        }
    }
    regions
}

fn flood_fill(cave: &CaveGrid, visited: &mut [bool], start: Pos) -> Vec<Pos> {
    let mut region = Vec::new();
    let mut stack = vec![start];
    while let Some(pos) = stack.pop() {
        if cave.is_wall(pos) {
            continue;
        }
        let index = pos.y as usize * cave.width() + pos.x as usize;
        if visited[index] {
            continue;
        }
        visited[index] = true;
        region.push(pos);

        stack.push(Pos { y: pos.y + 1, x: pos.x });
        stack.push(Pos { y: pos.y - 1, x: pos.x });
        stack.push(Pos { y: pos.y, x: pos.x + 1 });
        stack.push(Pos { y: pos.y, x: pos.x - 1 });
    }
    region
}

fn largest_region_index(regions: &[Vec<Pos>]) -> usize {
    let mut best_index = 0;
    for (index, region) in regions.iter().enumerate() {
        if region.len() > regions[best_index].len() {
            best_index = index;
        }
    }
    best_index
}

/// Closest pair between two bounded region samples. Equidistant candidates
/// resolve by lexicographic `(y, x)` order of both endpoints so results do
/// not depend on platform iteration order.
fn closest_pair(anchor: &[Pos], region: &[Pos]) -> Option<(Pos, Pos)> {
    let anchor_sample = &anchor[..REGION_SAMPLE_LIMIT.min(anchor.len())];
    let region_sample = &region[..REGION_SAMPLE_LIMIT.min(region.len())];
    let mut best: Option<(i64, Pos, Pos)> = None;

    for &from in anchor_sample {
        for &to in region_sample {
            let dx = i64::from(to.x - from.x);
            let dy = i64::from(to.y - from.y);
            let distance_sq = dx * dx + dy * dy;
            let replace = match best {
                None => true,
                Some((best_distance, best_from, best_to)) => {
                    (distance_sq, (from.y, from.x, to.y, to.x))
                        < (best_distance, (best_from.y, best_from.x, best_to.y, best_to.x))
                }
            };
            if replace {
                best = Some((distance_sq, from, to));
            }
        }
    }
    best.map(|(_, from, to)| (from, to))
}

/// Opens every cell within `half_width` of a Bresenham line between the two
/// points.
fn carve_tunnel(cave: &mut CaveGrid, start: Pos, end: Pos, half_width: usize) {
    let reach = half_width as i32;
    let dx = (end.x - start.x).abs();
    let dy = (end.y - start.y).abs();
    let step_x = if start.x < end.x { 1 } else { -1 };
    let step_y = if start.y < end.y { 1 } else { -1 };
    let mut err = dx - dy;

    let mut x = start.x;
    let mut y = start.y;
    loop {
        for offset_y in -reach..=reach {
            for offset_x in -reach..=reach {
                let pos = Pos { y: y + offset_y, x: x + offset_x };
                if cave.in_bounds(pos) {
                    cave.set(pos.x as usize, pos.y as usize, false);
                }
            }
        }

        if x == end.x && y == end.y {
            break;
        }
        let doubled_err = 2 * err;
        if doubled_err > -dy {
            err -= dy;
            x += step_x;
        }
        if doubled_err < dx {
            err += dx;
            y += step_y;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

    use super::super::params::CaveKind;
    use super::super::strategies;
    use super::*;

    /// Two open blocks separated by a solid column.
    fn split_grid() -> CaveGrid {
        let mut cave = CaveGrid::filled(30, 20, true);
        for y in 2..18 {
            for x in 2..12 {
                cave.set(x, y, false);
            }
            for x in 18..28 {
                cave.set(x, y, false);
            }
        }
        cave
    }

    #[test]
    fn split_grid_starts_as_two_regions() {
        let regions = open_regions(&split_grid(), 5);
        assert_eq!(regions.len(), 2);
    }

    #[test]
    fn repair_merges_qualifying_regions_into_one() {
        let params = CaveParameters {
            tunnel_width: 2,
            connectivity_strength: 1.0,
            ..CaveParameters::default()
        };
        let repaired = ensure_connected(split_grid(), &params);
        let regions = open_regions(&repaired, params.min_region_size());
        assert_eq!(regions.len(), 1, "both halves must join the anchor region");
    }

    #[test]
    fn zero_connectivity_strength_leaves_regions_apart() {
        let params = CaveParameters {
            connectivity_strength: 0.0,
            ..CaveParameters::default()
        };
        let repaired = ensure_connected(split_grid(), &params);
        let regions = open_regions(&repaired, params.min_region_size());
        assert_eq!(regions.len(), 2, "strength zero must not carve any tunnel");
    }

    #[test]
    fn sub_threshold_pockets_are_ignored_by_the_repairer() {
        let mut cave = split_grid();
        // A 2x2 pocket well below the minimum region size.
        cave.set(14, 2, false);
        cave.set(15, 2, false);
        cave.set(14, 3, false);
        cave.set(15, 3, false);

        let regions = open_regions(&cave, CaveParameters::default().min_region_size());
        assert_eq!(regions.len(), 2, "the pocket must not count as a region");
    }

    #[test]
    fn all_solid_grid_is_a_no_op() {
        let cave = CaveGrid::filled(16, 16, true);
        let repaired = ensure_connected(cave.clone(), &CaveParameters::default());
        assert_eq!(repaired, cave);
    }

    #[test]
    fn carved_tunnel_opens_the_full_padded_line() {
        let mut cave = CaveGrid::filled(20, 20, true);
        carve_tunnel(&mut cave, Pos { y: 5, x: 3 }, Pos { y: 14, x: 16 }, 1);

        assert!(!cave.is_wall(Pos { y: 5, x: 3 }));
        assert!(!cave.is_wall(Pos { y: 14, x: 16 }));
        // Padding must reach one cell around both endpoints.
        assert!(!cave.is_wall(Pos { y: 4, x: 2 }));
        assert!(!cave.is_wall(Pos { y: 15, x: 17 }));

        let regions = open_regions(&cave, 0);
        assert_eq!(regions.len(), 1, "a tunnel is a single connected region");
    }

    #[test]
    fn closest_pair_breaks_distance_ties_lexicographically() {
        let anchor = vec![Pos { y: 5, x: 5 }];
        // Both candidates sit at distance 2 from the anchor point.
        let region = vec![Pos { y: 7, x: 5 }, Pos { y: 3, x: 5 }];
        let (from, to) = closest_pair(&anchor, &region).expect("pair must exist");
        assert_eq!(from, Pos { y: 5, x: 5 });
        assert_eq!(to, Pos { y: 3, x: 5 });
    }

    #[test]
    fn closest_pair_samples_each_region_independently() {
        // A single-point anchor must not truncate the other region's sample.
        let anchor = vec![Pos { y: 0, x: 0 }];
        let region = vec![
            Pos { y: 9, x: 9 },
            Pos { y: 8, x: 8 },
            Pos { y: 1, x: 1 },
            Pos { y: 7, x: 7 },
        ];
        let (from, to) = closest_pair(&anchor, &region).expect("pair must exist");
        assert_eq!(from, Pos { y: 0, x: 0 });
        assert_eq!(to, Pos { y: 1, x: 1 });
    }

    #[test]
    fn cavern_with_high_room_preference_has_few_regions_before_repair() {
        let params = CaveParameters {
            kind: CaveKind::Cavern,
            room_size_preference: 0.9,
            ..CaveParameters::default()
        };
        for seed in [1_u64, 42, 99, 2_026] {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let cave = strategies::generate(50, 37, &params, &mut rng);
            let regions = open_regions(&cave, params.min_region_size());
            assert!(
                regions.len() < 6,
                "cavern blobs should overlap: seed {seed} produced {} regions",
                regions.len()
            );
        }
    }
}
