//! Random marker placement on the map plane

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MARKER_COUNT, MAP_PLANE_SIZE, MARKER_HOVER_HEIGHT};
use crate::marker::{LabelContent, MarkerRecord};

/// How markers are scattered over the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Number of markers to create
    pub count: usize,
    /// Half of the map plane edge length
    pub half_extent: f32,
    /// Sprite height above the plane
    pub hover_height: f32,
    /// Fixed RNG seed; `None` draws from the thread RNG
    pub seed: Option<u64>,
    /// Label content given to every marker
    pub label: LabelContent,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_MARKER_COUNT,
            half_extent: MAP_PLANE_SIZE * 0.5,
            hover_height: MARKER_HOVER_HEIGHT,
            seed: None,
            label: LabelContent::default(),
        }
    }
}

/// Uniform random point inside `[-half_extent, half_extent]²`.
///
/// Returns `[x, z]` in plane coordinates. A non-positive or non-finite
/// extent collapses to the origin.
pub fn random_position<R: Rng + ?Sized>(half_extent: f32, rng: &mut R) -> [f32; 2] {
    if !half_extent.is_finite() || half_extent <= 0.0 {
        return [0.0, 0.0];
    }
    [
        rng.random_range(-half_extent..=half_extent),
        rng.random_range(-half_extent..=half_extent),
    ]
}

/// Scatter markers using the configured seed (or the thread RNG).
pub fn scatter_markers(config: &PlacementConfig) -> Vec<MarkerRecord> {
    match config.seed {
        Some(seed) => scatter_markers_with(config, &mut StdRng::seed_from_u64(seed)),
        None => scatter_markers_with(config, &mut rand::rng()),
    }
}

/// Scatter markers drawing positions from `rng`.
pub fn scatter_markers_with<R: Rng + ?Sized>(
    config: &PlacementConfig,
    rng: &mut R,
) -> Vec<MarkerRecord> {
    let markers: Vec<MarkerRecord> = (0..config.count)
        .map(|_| {
            let [x, z] = random_position(config.half_extent, rng);
            MarkerRecord::new(Vec3::new(x, config.hover_height, z), config.label.clone())
        })
        .collect();

    tracing::debug!(count = markers.len(), "Scattered markers");
    markers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_position_within_extent() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let [x, z] = random_position(20.0, &mut rng);
            assert!((-20.0..=20.0).contains(&x));
            assert!((-20.0..=20.0).contains(&z));
        }
    }

    #[test]
    fn test_random_position_degenerate_extent() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_position(0.0, &mut rng), [0.0, 0.0]);
        assert_eq!(random_position(-5.0, &mut rng), [0.0, 0.0]);
    }

    #[test]
    fn test_random_position_non_finite_extent() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_position(f32::NAN, &mut rng), [0.0, 0.0]);
        assert_eq!(random_position(f32::INFINITY, &mut rng), [0.0, 0.0]);
    }

    #[test]
    fn test_scatter_markers_with_nan_extent_stays_at_origin() {
        let config = PlacementConfig {
            half_extent: f32::NAN,
            seed: Some(1),
            ..Default::default()
        };
        let markers = scatter_markers(&config);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].anchor(), Vec3::new(0.0, MARKER_HOVER_HEIGHT, 0.0));
    }

    #[test]
    fn test_random_position_covers_all_quadrants() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut quadrants = [false; 4];
        for _ in 0..200 {
            let [x, z] = random_position(20.0, &mut rng);
            let idx = usize::from(x >= 0.0) * 2 + usize::from(z >= 0.0);
            quadrants[idx] = true;
        }
        assert!(quadrants.iter().all(|&q| q));
    }

    #[test]
    fn test_scatter_markers_hover_height_and_count() {
        let config = PlacementConfig {
            count: 5,
            seed: Some(3),
            ..Default::default()
        };
        let markers = scatter_markers(&config);
        assert_eq!(markers.len(), 5);
        for marker in &markers {
            assert_eq!(marker.anchor().y, MARKER_HOVER_HEIGHT);
            assert_eq!(marker.label, LabelContent::default());
        }
    }

    #[test]
    fn test_scatter_markers_seed_is_deterministic() {
        let config = PlacementConfig {
            count: 3,
            seed: Some(99),
            ..Default::default()
        };
        let a: Vec<Vec3> = scatter_markers(&config).iter().map(|m| m.anchor()).collect();
        let b: Vec<Vec3> = scatter_markers(&config).iter().map(|m| m.anchor()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_default_config_places_single_marker() {
        let markers = scatter_markers(&PlacementConfig::default());
        assert_eq!(markers.len(), 1);
    }
}
