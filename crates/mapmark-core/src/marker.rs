//! Marker records

use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{DEFAULT_LABEL_BODY, DEFAULT_LABEL_TITLE};

/// Marker identifier
pub type MarkerId = Uuid;

/// Text shown in a marker's floating label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelContent {
    pub title: String,
    pub body: String,
}

impl LabelContent {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

impl Default for LabelContent {
    fn default() -> Self {
        Self::new(DEFAULT_LABEL_TITLE, DEFAULT_LABEL_BODY)
    }
}

/// A marker placed on the map.
///
/// The anchor is copied from the sprite's world position when the marker is
/// created and never changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerRecord {
    pub id: MarkerId,
    anchor: Vec3,
    pub label: LabelContent,
}

impl MarkerRecord {
    /// Create a marker anchored at `anchor`
    pub fn new(anchor: Vec3, label: LabelContent) -> Self {
        Self {
            id: Uuid::new_v4(),
            anchor,
            label,
        }
    }

    /// World position the label tracks
    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }
}

/// Append-only collection of markers
#[derive(Debug, Clone, Default)]
pub struct MarkerSet {
    markers: Vec<MarkerRecord>,
}

impl MarkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a marker, returns its ID
    pub fn push(&mut self, marker: MarkerRecord) -> MarkerId {
        let id = marker.id;
        self.markers.push(marker);
        id
    }

    pub fn iter(&self) -> impl Iterator<Item = &MarkerRecord> {
        self.markers.iter()
    }

    pub fn as_slice(&self) -> &[MarkerRecord] {
        &self.markers
    }

    pub fn get(&self, id: MarkerId) -> Option<&MarkerRecord> {
        self.markers.iter().find(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Anchor positions in insertion order
    pub fn anchors(&self) -> Vec<Vec3> {
        self.markers.iter().map(MarkerRecord::anchor).collect()
    }
}

impl Extend<MarkerRecord> for MarkerSet {
    fn extend<T: IntoIterator<Item = MarkerRecord>>(&mut self, iter: T) {
        self.markers.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_label_content() {
        let label = LabelContent::default();
        assert_eq!(label.title, "This is label");
        assert!(label.body.starts_with("Lorem ipsum"));
    }

    #[test]
    fn test_marker_set_keeps_insertion_order() {
        let mut set = MarkerSet::new();
        let a = set.push(MarkerRecord::new(Vec3::new(1.0, 0.5, 2.0), LabelContent::default()));
        let b = set.push(MarkerRecord::new(Vec3::new(-3.0, 0.5, 4.0), LabelContent::default()));

        assert_eq!(set.len(), 2);
        assert_ne!(a, b);
        assert_eq!(
            set.anchors(),
            vec![Vec3::new(1.0, 0.5, 2.0), Vec3::new(-3.0, 0.5, 4.0)]
        );
        assert_eq!(set.get(b).map(|m| m.anchor()), Some(Vec3::new(-3.0, 0.5, 4.0)));
    }

    #[test]
    fn test_marker_set_lookup_missing() {
        let set = MarkerSet::new();
        assert!(set.is_empty());
        assert!(set.get(Uuid::new_v4()).is_none());
    }
}
