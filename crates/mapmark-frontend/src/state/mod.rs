//! Application state module

mod scene;
mod viewport;

pub use scene::{AssetRequester, SceneLoader, SceneStatus, SceneTarget};
pub use viewport::{SharedViewportState, ViewportState};

use std::sync::Arc;

use glam::Vec3;
use parking_lot::Mutex;

use mapmark_core::{CameraState, LabelPlacement, LabelProjector, MarkerId, MarkerSet, Viewport};

/// Label position for one marker in the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedLabel {
    pub id: MarkerId,
    pub anchor: Vec3,
    pub placement: LabelPlacement,
}

/// Application state
pub struct AppState {
    /// Markers placed once the scene has loaded
    pub markers: MarkerSet,
    /// Loading progress
    pub status: SceneStatus,
    /// Screen-space label projector
    pub projector: LabelProjector,
    /// Label positions from the most recent frame
    labels: Vec<ProjectedLabel>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            markers: MarkerSet::new(),
            status: SceneStatus::LoadingMap,
            projector: LabelProjector::default(),
            labels: Vec::new(),
        }
    }
}

impl AppState {
    /// State with a custom label base offset
    pub fn with_base_offset(base_offset: f32) -> Self {
        Self {
            projector: LabelProjector::new(base_offset),
            ..Default::default()
        }
    }

    /// Reproject every marker label for this frame.
    pub fn project_labels(&mut self, camera: &CameraState, viewport: Viewport) {
        let placements = self
            .projector
            .project_all(self.markers.as_slice(), camera, viewport);
        self.labels = self
            .markers
            .iter()
            .zip(placements)
            .map(|(marker, (id, placement))| ProjectedLabel {
                id,
                anchor: marker.anchor(),
                placement,
            })
            .collect();
    }

    /// Label positions from the last [`Self::project_labels`] call
    pub fn labels(&self) -> &[ProjectedLabel] {
        &self.labels
    }

    /// `(anchor, offset direction)` pairs for the debug arrows
    pub fn offset_arrows(&self) -> Vec<(Vec3, Vec3)> {
        self.labels
            .iter()
            .map(|label| (label.anchor, label.placement.offset_dir))
            .collect()
    }
}

/// Shared application state
pub type SharedAppState = Arc<Mutex<AppState>>;

/// Create shared state
pub fn create_shared_state(state: AppState) -> SharedAppState {
    Arc::new(Mutex::new(state))
}

#[cfg(test)]
mod tests {
    use super::*;

    use glam::Mat4;
    use mapmark_core::{LabelContent, MarkerRecord};

    fn top_down_camera() -> CameraState {
        let eye = Vec3::new(0.0, 60.0, 0.0);
        let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::NEG_Z);
        let proj = Mat4::perspective_rh(45f32.to_radians(), 800.0 / 600.0, 0.1, 1000.0);
        CameraState::new(eye, proj * view)
    }

    #[test]
    fn test_no_markers_no_labels() {
        let mut state = AppState::default();
        state.project_labels(&top_down_camera(), Viewport::new(800.0, 600.0));
        assert!(state.labels().is_empty());
        assert!(state.offset_arrows().is_empty());
    }

    #[test]
    fn test_labels_follow_marker_order() {
        let mut state = AppState::default();
        let a = state
            .markers
            .push(MarkerRecord::new(Vec3::new(-5.0, 0.5, 3.0), LabelContent::default()));
        let b = state
            .markers
            .push(MarkerRecord::new(Vec3::new(7.0, 0.5, -2.0), LabelContent::default()));

        state.project_labels(&top_down_camera(), Viewport::new(800.0, 600.0));

        let labels = state.labels();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].id, a);
        assert_eq!(labels[1].id, b);
        assert!(labels[0].placement.x < labels[1].placement.x);
        assert_eq!(state.offset_arrows()[0].0, Vec3::new(-5.0, 0.5, 3.0));
    }

    #[test]
    fn test_reprojection_replaces_previous_frame() {
        let mut state = AppState::default();
        state
            .markers
            .push(MarkerRecord::new(Vec3::new(0.0, 0.5, 0.0), LabelContent::default()));
        let viewport = Viewport::new(800.0, 600.0);
        state.project_labels(&top_down_camera(), viewport);
        state.project_labels(&top_down_camera(), viewport);
        assert_eq!(state.labels().len(), 1);
    }

    #[test]
    fn test_custom_base_offset() {
        let mut state = AppState::with_base_offset(40.0);
        state
            .markers
            .push(MarkerRecord::new(Vec3::new(0.0, 0.5, 0.0), LabelContent::default()));
        state.project_labels(&top_down_camera(), Viewport::new(800.0, 600.0));
        assert!(state.labels()[0].placement.up_y >= 40.0);
        assert!(state.labels()[0].placement.up_y <= 120.0);
    }
}
