//! Scene loading sequence
//!
//! The map texture is loaded first; only once it is on the plane is the
//! marker texture requested, and markers are scattered after that. A failed
//! load is replaced by a generated image so the viewer keeps running.

use mapmark_core::constants::{MAP_TEXTURE_FILE, MARKER_TEXTURE_FILE};
use mapmark_core::{AssetError, ImageData, MarkerSet, PlacementConfig, scatter_markers};
use mapmark_renderer::{fallback_map_image, fallback_marker_image};

use crate::assets::{AssetSlot, take_ready};

/// Receives scene content as it becomes available
pub trait SceneTarget {
    /// The map image is ready for the plane
    fn set_map_image(&mut self, image: &ImageData);
    /// The marker image is ready for the sprites
    fn set_marker_image(&mut self, image: &ImageData);
    /// Markers have been placed
    fn set_markers(&mut self, markers: &MarkerSet);
}

/// Starts an image request for a file name
pub type AssetRequester = Box<dyn FnMut(&str) -> AssetSlot>;

/// Loading progress shown in the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneStatus {
    /// Waiting for the map image
    LoadingMap,
    /// Waiting for the marker image
    LoadingMarker,
    /// Everything loaded
    Ready,
    /// Loaded with stand-ins for the listed failures
    Degraded(Vec<String>),
}

impl SceneStatus {
    /// Whether loading has finished (with or without failures)
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Ready | Self::Degraded(_))
    }

    /// Short human-readable description
    pub fn message(&self) -> String {
        match self {
            Self::LoadingMap => "Loading map...".to_string(),
            Self::LoadingMarker => "Loading marker...".to_string(),
            Self::Ready => "Ready".to_string(),
            Self::Degraded(failures) => format!("Using fallback: {}", failures.join("; ")),
        }
    }
}

enum Phase {
    Map(AssetSlot),
    Marker(AssetSlot),
    Done,
}

/// Drives the map → marker → markers loading chain
pub struct SceneLoader {
    phase: Phase,
    placement: PlacementConfig,
    request: AssetRequester,
    failures: Vec<String>,
}

impl SceneLoader {
    /// Start loading; the map request is issued immediately.
    pub fn new(placement: PlacementConfig, mut request: AssetRequester) -> Self {
        let slot = request(MAP_TEXTURE_FILE);
        Self {
            phase: Phase::Map(slot),
            placement,
            request,
            failures: Vec::new(),
        }
    }

    /// Current progress
    pub fn status(&self) -> SceneStatus {
        match self.phase {
            Phase::Map(_) => SceneStatus::LoadingMap,
            Phase::Marker(_) => SceneStatus::LoadingMarker,
            Phase::Done if self.failures.is_empty() => SceneStatus::Ready,
            Phase::Done => SceneStatus::Degraded(self.failures.clone()),
        }
    }

    /// Advance as far as finished requests allow.
    ///
    /// Returns the placed markers on the call that completes the scene.
    pub fn poll(&mut self, target: &mut dyn SceneTarget) -> Option<MarkerSet> {
        if let Phase::Map(slot) = &self.phase {
            let result = take_ready(slot)?;
            let image = self.resolve(MAP_TEXTURE_FILE, result, fallback_map_image);
            target.set_map_image(&image);
            self.phase = Phase::Marker((self.request)(MARKER_TEXTURE_FILE));
        }

        if let Phase::Marker(slot) = &self.phase {
            let result = take_ready(slot)?;
            let image = self.resolve(MARKER_TEXTURE_FILE, result, fallback_marker_image);
            target.set_marker_image(&image);

            let mut markers = MarkerSet::new();
            markers.extend(scatter_markers(&self.placement));
            target.set_markers(&markers);
            self.phase = Phase::Done;

            tracing::info!(count = markers.len(), status = ?self.status(), "Scene ready");
            return Some(markers);
        }

        None
    }

    fn resolve(
        &mut self,
        name: &str,
        result: Result<ImageData, AssetError>,
        fallback: fn() -> ImageData,
    ) -> ImageData {
        match result {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!("Using fallback for {}: {}", name, e);
                self.failures.push(format!("{}: {}", name, e));
                fallback()
            }
        }
    }
}
