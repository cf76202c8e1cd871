//! Camera control systems
//!
//! Orbit camera controls fed by pointer input from the frontend:
//! - Left button drag: rotate camera (yaw/pitch)
//! - Scroll wheel: zoom (adjust distance)
//!
//! Panning is not supported and the camera never dips below the orbit center.

use bevy::prelude::*;

use crate::bevy::components::CameraController;
use crate::bevy::resources::{OrbitCameraState, PointerInputRes, PointerState, SceneCamera};

/// Copy the frontend pointer state into [`PointerState`] and clear the accumulated deltas
pub fn sync_pointer_input(
    pointer_input_res: Option<Res<PointerInputRes>>,
    mut pointer: ResMut<PointerState>,
) {
    let Some(pointer_res) = pointer_input_res else {
        return;
    };

    let input = {
        let mut guard = match pointer_res.0 .0.lock() {
            Ok(g) => g,
            Err(_) => return,
        };
        let input = guard.clone();
        guard.delta_x = 0.0;
        guard.delta_y = 0.0;
        guard.scroll_delta = 0.0;
        input
    };

    pointer.position = input.position.map(|(x, y)| Vec2::new(x, y));
    pointer.drag = if input.left_button {
        Vec2::new(input.delta_x, input.delta_y)
    } else {
        Vec2::ZERO
    };
    pointer.scroll = input.scroll_delta;
}

/// Update camera transform, lens and background from orbit state and the active scene
pub fn update_camera_from_input(
    pointer: Res<PointerState>,
    scene_camera: Res<SceneCamera>,
    mut orbit_state: ResMut<OrbitCameraState>,
    mut camera_query: Query<(&mut Transform, &mut Camera, &mut Projection), With<CameraController>>,
) {
    orbit_state.apply_input(pointer.drag, pointer.scroll);

    let camera_position = orbit_state.camera_position();
    let lens_changed = scene_camera.is_changed();

    for (mut transform, mut camera, mut projection) in camera_query.iter_mut() {
        *transform =
            Transform::from_translation(camera_position).looking_at(orbit_state.center, Vec3::Y);

        if lens_changed {
            camera.clear_color = ClearColorConfig::Custom(scene_camera.0.clear_color);
            if let Projection::Perspective(perspective) = &mut *projection {
                perspective.fov = scene_camera.0.fov_degrees.to_radians();
            }
        }
    }
}
