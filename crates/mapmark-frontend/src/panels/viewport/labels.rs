//! Floating marker labels over the viewport

use mapmark_core::{MarkerId, MarkerSet};

use crate::config::LabelConfig;
use crate::state::ProjectedLabel;
use crate::theme;

/// Screen positions of the labels that should be drawn this frame.
///
/// Positions are label centers offset by the viewport's top-left corner.
/// Labels behind the camera are dropped when `hide_behind_camera` is set;
/// non-finite positions are always dropped.
pub fn visible_label_positions(
    viewport_rect: egui::Rect,
    labels: &[ProjectedLabel],
    config: &LabelConfig,
) -> Vec<(MarkerId, egui::Pos2)> {
    if !config.visible {
        return Vec::new();
    }

    labels
        .iter()
        .filter(|label| label.placement.in_front || !config.hide_behind_camera)
        .filter_map(|label| {
            let center = label.placement.label_center();
            let pos = viewport_rect.min + egui::vec2(center.x, center.y);
            (pos.x.is_finite() && pos.y.is_finite()).then_some((label.id, pos))
        })
        .collect()
}

/// Draw one label per visible marker.
///
/// Each label is an area pivoted at its center. Labels never take pointer
/// input so camera drags pass through them.
pub fn render_labels(
    ctx: &egui::Context,
    viewport_rect: egui::Rect,
    markers: &MarkerSet,
    labels: &[ProjectedLabel],
    config: &LabelConfig,
) {
    for (id, pos) in visible_label_positions(viewport_rect, labels, config) {
        let Some(marker) = markers.get(id) else {
            continue;
        };

        egui::Area::new(egui::Id::new(("marker_label", id)))
            .fixed_pos(pos)
            .pivot(egui::Align2::CENTER_CENTER)
            .order(egui::Order::Middle)
            .interactable(false)
            .constrain(false)
            .show(ctx, |ui| {
                theme::label_frame().show(ui, |ui| {
                    ui.set_max_width(config.max_width);
                    ui.label(
                        egui::RichText::new(&marker.label.title)
                            .strong()
                            .color(theme::palette::LABEL_TITLE),
                    );
                    ui.label(
                        egui::RichText::new(&marker.label.body)
                            .small()
                            .color(theme::palette::LABEL_BODY),
                    );
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use glam::Vec3;
    use mapmark_core::{LabelContent, LabelPlacement, MarkerRecord};

    fn label(x: f32, y: f32, up_y: f32, in_front: bool) -> ProjectedLabel {
        ProjectedLabel {
            id: MarkerRecord::new(Vec3::ZERO, LabelContent::default()).id,
            anchor: Vec3::ZERO,
            placement: LabelPlacement {
                x,
                y,
                up_y,
                offset_dir: Vec3::Y,
                in_front,
            },
        }
    }

    fn viewport() -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(10.0, 30.0), egui::vec2(800.0, 600.0))
    }

    #[test]
    fn test_positions_offset_by_viewport_origin() {
        let labels = [label(100.0, 200.0, 80.0, true)];
        let positions = visible_label_positions(viewport(), &labels, &LabelConfig::default());
        assert_eq!(positions, vec![(labels[0].id, egui::pos2(110.0, 150.0))]);
    }

    #[test]
    fn test_labels_behind_camera_hidden() {
        let labels = [label(100.0, 200.0, 80.0, false), label(50.0, 50.0, 80.0, true)];
        let positions = visible_label_positions(viewport(), &labels, &LabelConfig::default());
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].0, labels[1].id);
    }

    #[test]
    fn test_labels_behind_camera_kept_when_allowed() {
        let config = LabelConfig {
            hide_behind_camera: false,
            ..Default::default()
        };
        let labels = [label(100.0, 200.0, 80.0, false)];
        let positions = visible_label_positions(viewport(), &labels, &config);
        assert_eq!(positions.len(), 1);
    }

    #[test]
    fn test_non_finite_positions_skipped() {
        let config = LabelConfig {
            hide_behind_camera: false,
            ..Default::default()
        };
        let labels = [
            label(f32::NAN, 200.0, 80.0, true),
            label(100.0, f32::INFINITY, 80.0, true),
            label(100.0, 200.0, 80.0, true),
        ];
        let positions = visible_label_positions(viewport(), &labels, &config);
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].0, labels[2].id);
    }

    #[test]
    fn test_hidden_labels_produce_nothing() {
        let config = LabelConfig {
            visible: false,
            ..Default::default()
        };
        let labels = [label(100.0, 200.0, 80.0, true)];
        assert!(visible_label_positions(viewport(), &labels, &config).is_empty());
    }
}
