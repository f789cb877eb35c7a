//! Tunable parameter object selecting a generation strategy and its knobs.

use serde::{Deserialize, Serialize};

use super::CaveGenError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaveKind {
    Cellular,
    Perlin,
    Maze,
    Cavern,
    Mixed,
}

/// Immutable per-room configuration. Constructed once, never mutated by the
/// pipeline; all randomness comes from the injected RNG stream instead.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaveParameters {
    pub kind: CaveKind,
    /// Initial wall probability for the cellular strategy, in `[0, 1]`.
    pub density: f64,
    /// Cellular-automata pass count.
    pub iterations: usize,
    pub smoothing_passes: usize,
    /// Half-width of carved connector tunnels, in cells. At least 1; the
    /// maze carve raises it to 2 so its step-4 squares stay connected.
    pub tunnel_width: usize,
    /// 0 favors small maze-like spaces, 1 favors large open rooms.
    pub room_size_preference: f64,
    /// Skews density and frequency along the y axis, in `[-1, 1]`.
    pub vertical_bias: f64,
    /// Skews density and frequency along the x axis, in `[-1, 1]`.
    pub horizontal_bias: f64,
    pub noise_scale: f64,
    pub noise_octaves: usize,
    /// Fraction of disconnected regions that must be actively reconnected.
    pub connectivity_strength: f64,
}

impl Default for CaveParameters {
    fn default() -> Self {
        Self {
            kind: CaveKind::Mixed,
            density: 0.45,
            iterations: 5,
            smoothing_passes: 2,
            tunnel_width: 5,
            room_size_preference: 0.5,
            vertical_bias: 0.0,
            horizontal_bias: 0.0,
            noise_scale: 0.5,
            noise_octaves: 3,
            connectivity_strength: 1.0,
        }
    }
}

impl CaveParameters {
    pub fn validate(&self) -> Result<(), CaveGenError> {
        if !(0.0..=1.0).contains(&self.density) {
            return Err(CaveGenError::InvalidParameter { field: "density", value: self.density });
        }
        if !(0.0..=1.0).contains(&self.room_size_preference) {
            return Err(CaveGenError::InvalidParameter {
                field: "room_size_preference",
                value: self.room_size_preference,
            });
        }
        if !(-1.0..=1.0).contains(&self.vertical_bias) {
            return Err(CaveGenError::InvalidParameter {
                field: "vertical_bias",
                value: self.vertical_bias,
            });
        }
        if !(-1.0..=1.0).contains(&self.horizontal_bias) {
            return Err(CaveGenError::InvalidParameter {
                field: "horizontal_bias",
                value: self.horizontal_bias,
            });
        }
        if !(self.noise_scale > 0.0) {
            return Err(CaveGenError::InvalidParameter {
                field: "noise_scale",
                value: self.noise_scale,
            });
        }
        if self.noise_octaves == 0 {
            return Err(CaveGenError::InvalidParameter { field: "noise_octaves", value: 0.0 });
        }
        if self.tunnel_width == 0 {
            return Err(CaveGenError::InvalidParameter { field: "tunnel_width", value: 0.0 });
        }
        if !(self.connectivity_strength >= 0.0) {
            return Err(CaveGenError::InvalidParameter {
                field: "connectivity_strength",
                value: self.connectivity_strength,
            });
        }
        Ok(())
    }

    /// Moore-neighborhood wall threshold: higher room-size preference lowers
    /// the threshold and opens the automata up.
    pub(super) fn automata_threshold(&self) -> usize {
        4 + ((1.0 - self.room_size_preference) * 2.0).round() as usize
    }

    pub(super) fn noise_threshold(&self) -> f64 {
        0.3 + (self.room_size_preference - 0.5) * 0.4
    }

    /// Regions at or below this size are generation noise, not playable space.
    pub(super) fn min_region_size(&self) -> usize {
        (10.0 * self.room_size_preference + 5.0).round() as usize
    }

    pub(super) fn carve_half_width(&self) -> usize {
        self.tunnel_width.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_parameters_pass_validation() {
        assert_eq!(CaveParameters::default().validate(), Ok(()));
    }

    #[test]
    fn out_of_range_fields_are_rejected() {
        let cases: Vec<(&str, CaveParameters)> = vec![
            ("density", CaveParameters { density: 1.2, ..CaveParameters::default() }),
            ("density", CaveParameters { density: -0.1, ..CaveParameters::default() }),
            (
                "room_size_preference",
                CaveParameters { room_size_preference: 2.0, ..CaveParameters::default() },
            ),
            ("vertical_bias", CaveParameters { vertical_bias: -1.5, ..CaveParameters::default() }),
            (
                "horizontal_bias",
                CaveParameters { horizontal_bias: 1.5, ..CaveParameters::default() },
            ),
            ("noise_scale", CaveParameters { noise_scale: 0.0, ..CaveParameters::default() }),
            ("noise_scale", CaveParameters { noise_scale: f64::NAN, ..CaveParameters::default() }),
            ("noise_octaves", CaveParameters { noise_octaves: 0, ..CaveParameters::default() }),
            ("tunnel_width", CaveParameters { tunnel_width: 0, ..CaveParameters::default() }),
            (
                "connectivity_strength",
                CaveParameters { connectivity_strength: -0.5, ..CaveParameters::default() },
            ),
        ];

        for (expected_field, params) in cases {
            match params.validate() {
                Err(CaveGenError::InvalidParameter { field, .. }) => {
                    assert_eq!(field, expected_field);
                }
                other => panic!("expected {expected_field} rejection, got {other:?}"),
            }
        }
    }

    #[test]
    fn automata_threshold_never_increases_with_room_size_preference() {
        let mut previous = usize::MAX;
        for step in 0..=10 {
            let params = CaveParameters {
                room_size_preference: f64::from(step) / 10.0,
                ..CaveParameters::default()
            };
            let threshold = params.automata_threshold();
            assert!(
                threshold <= previous,
                "threshold must be non-increasing, got {threshold} after {previous}"
            );
            previous = threshold;
        }
    }

    #[test]
    fn automata_threshold_spans_four_to_six() {
        let at = |room_size_preference: f64| {
            CaveParameters { room_size_preference, ..CaveParameters::default() }
                .automata_threshold()
        };
        assert_eq!(at(1.0), 4);
        assert_eq!(at(0.6), 5);
        assert_eq!(at(0.0), 6);
    }

    #[test]
    fn min_region_size_rounds_from_room_size_preference() {
        let at = |room_size_preference: f64| {
            CaveParameters { room_size_preference, ..CaveParameters::default() }.min_region_size()
        };
        assert_eq!(at(0.0), 5);
        assert_eq!(at(0.5), 10);
        assert_eq!(at(1.0), 15);
    }
}
