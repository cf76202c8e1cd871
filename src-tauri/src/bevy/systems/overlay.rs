//! Overlay projection
//!
//! Projects world-anchored [`OverlayLabel`]s into render-target pixels so the
//! frontend can position its HTML labels over the streamed frame.

use bevy::prelude::*;

use crate::bevy::components::{Animated, LabelVisibility, OffscreenCamera, OverlayLabel};
use crate::bevy::resources::PresentationRes;
use crate::tauri_bridge::shared_state::OverlayView;

/// Whether a label should currently be shown, given a hover lookup for its target
pub fn label_visible(label: &OverlayLabel, is_hovered: impl Fn(Entity) -> bool) -> bool {
    match label.visibility {
        LabelVisibility::Always => true,
        LabelVisibility::WhileHovered(target) => is_hovered(target),
    }
}

/// Publish the projected labels of the active scene
pub fn project_overlays(
    presentation: Option<Res<PresentationRes>>,
    cameras: Query<(&Camera, &GlobalTransform), With<OffscreenCamera>>,
    labels: Query<&OverlayLabel>,
    animated: Query<&Animated>,
) {
    let Some(presentation) = presentation else {
        return;
    };
    let Some((camera, camera_transform)) = cameras.iter().next() else {
        return;
    };

    let is_hovered = |entity: Entity| {
        animated
            .get(entity)
            .map(|animated| animated.object.is_hovered())
            .unwrap_or(false)
    };

    let overlays: Vec<OverlayView> = labels
        .iter()
        .map(|label| {
            // Anchors behind the camera or outside the viewport fail to project
            let projected = camera.world_to_viewport(camera_transform, label.anchor).ok();
            let (x, y) = projected.map_or((0.0, 0.0), |p| (p.x, p.y));
            OverlayView {
                text: label.text.clone(),
                x,
                y,
                visible: projected.is_some() && label_visible(label, is_hovered),
            }
        })
        .collect();

    if let Ok(mut guard) = presentation.0 .0.lock() {
        guard.overlays = overlays;
    };
}
