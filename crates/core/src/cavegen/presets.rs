//! Room-style parameter presets cycling the five cave kinds by room index.

use super::params::{CaveKind, CaveParameters};

/// Maps a room index to one of five tuned styles. This is a convenience
/// policy for callers, not part of the generator contract; drifting values
/// are clamped so every preset passes validation regardless of depth.
pub fn preset_for_room(room_index: usize) -> CaveParameters {
    let drift = room_index as f64;
    match room_index % 5 {
        // Organic, bubble-like caves that densify with depth.
        0 => CaveParameters {
            kind: CaveKind::Cellular,
            density: (0.45 + drift * 0.03).min(0.6),
            iterations: 4 + room_index % 3,
            room_size_preference: 0.6,
            smoothing_passes: 2,
            ..CaveParameters::default()
        },
        // Flowing, natural shapes with alternating elongation.
        1 => CaveParameters {
            kind: CaveKind::Perlin,
            noise_scale: 0.08 + drift * 0.02,
            noise_octaves: 3,
            room_size_preference: 0.7,
            vertical_bias: if room_index % 2 == 0 { 0.3 } else { -0.3 },
            ..CaveParameters::default()
        },
        // Structured corridor networks.
        2 => CaveParameters {
            kind: CaveKind::Maze,
            tunnel_width: 2 + room_index % 3,
            horizontal_bias: if room_index % 2 == 0 { 0.5 } else { 0.0 },
            vertical_bias: if room_index % 2 == 1 { 0.5 } else { 0.0 },
            connectivity_strength: 0.8,
            ..CaveParameters::default()
        },
        // Large open chambers.
        3 => CaveParameters {
            kind: CaveKind::Cavern,
            room_size_preference: (0.8 + drift * 0.05).min(1.0),
            tunnel_width: 4,
            smoothing_passes: 3,
            connectivity_strength: 1.2,
            ..CaveParameters::default()
        },
        // Combination of techniques.
        _ => CaveParameters {
            kind: CaveKind::Mixed,
            density: (0.4 + drift * 0.02).min(0.6),
            noise_scale: 0.1,
            room_size_preference: 0.5 + (room_index % 3) as f64 * 0.15,
            horizontal_bias: ((room_index % 3) as f64 - 1.0) * 0.4,
            vertical_bias: (room_index % 2) as f64 * 0.3,
            smoothing_passes: 2,
            connectivity_strength: 1.0,
            ..CaveParameters::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_cycle_through_all_five_kinds() {
        let kinds: Vec<CaveKind> = (0..5).map(|index| preset_for_room(index).kind).collect();
        assert_eq!(
            kinds,
            vec![
                CaveKind::Cellular,
                CaveKind::Perlin,
                CaveKind::Maze,
                CaveKind::Cavern,
                CaveKind::Mixed
            ]
        );
        assert_eq!(preset_for_room(7).kind, CaveKind::Maze);
    }

    #[test]
    fn every_preset_is_valid_at_any_depth() {
        for room_index in 0..60 {
            let params = preset_for_room(room_index);
            assert_eq!(
                params.validate(),
                Ok(()),
                "preset for room {room_index} failed validation: {params:?}"
            );
        }
    }

    #[test]
    fn presets_are_deterministic_per_room_index() {
        assert_eq!(preset_for_room(9), preset_for_room(9));
        assert_ne!(preset_for_room(0), preset_for_room(5), "density drifts with depth");
    }
}
