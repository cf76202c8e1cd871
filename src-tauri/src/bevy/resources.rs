//! Bevy resource definitions
//!
//! This module contains all global resources used by Bevy systems.
//! Resources are singleton data that can be accessed by any system.

use bevy::prelude::*;
use std::time::Duration;

use crate::bevy::scenes::CameraPreset;
use crate::config::{camera::*, ShowcaseSettings};
use crate::tauri_bridge::shared_state::{
    SharedFrameBuffer, SharedPerfStats, SharedPointerInput, SharedPresentation, SharedRequests,
};

/// Runtime settings loaded at startup
#[derive(Resource, Clone, Debug, Default)]
pub struct SettingsRes(pub ShowcaseSettings);

// =============================================================================
// Camera Control
// =============================================================================

/// Orbit camera state for spherical coordinate camera control
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct OrbitCameraState {
    /// Horizontal rotation angle (radians)
    pub yaw: f32,
    /// Elevation above the orbit center (radians), clamped so the camera stays above ground
    pub pitch: f32,
    /// Distance from the camera to the center point
    pub distance: f32,
    /// The point the camera orbits around
    pub center: Vec3,
}

impl OrbitCameraState {
    /// Orbit state that places the camera at `position` looking at `center`
    pub fn from_position(position: Vec3, center: Vec3) -> Self {
        let offset = position - center;
        let distance = offset.length().clamp(MIN_DISTANCE, MAX_DISTANCE);
        let pitch = if offset.length() > f32::EPSILON {
            (offset.y / offset.length()).clamp(-1.0, 1.0).asin()
        } else {
            0.0
        };

        Self {
            yaw: offset.x.atan2(offset.z),
            pitch: pitch.clamp(MIN_PITCH, MAX_PITCH),
            distance,
            center,
        }
    }

    /// Apply a pointer drag (in pixels) and a scroll delta
    pub fn apply_input(&mut self, drag: Vec2, scroll: f32) {
        if drag != Vec2::ZERO {
            self.yaw -= drag.x * ROTATION_SPEED;
            self.pitch = (self.pitch - drag.y * ROTATION_SPEED).clamp(MIN_PITCH, MAX_PITCH);
        }

        if scroll != 0.0 {
            self.distance = (self.distance - scroll * ZOOM_SPEED).clamp(MIN_DISTANCE, MAX_DISTANCE);
        }
    }

    /// Camera position from the spherical coordinates
    pub fn camera_position(&self) -> Vec3 {
        // yaw: rotation around Y axis
        // pitch: elevation above the XZ plane
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.center + Vec3::new(x, y, z)
    }
}

/// Lens and background of the active scene, applied to the camera when changed
#[derive(Resource, Debug, Clone, Copy)]
pub struct SceneCamera(pub CameraPreset);

/// Pointer state for the current frame, copied out of the shared input
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct PointerState {
    /// Position in render-target pixels
    pub position: Option<Vec2>,
    /// Drag accumulated since the last frame while the left button was held
    pub drag: Vec2,
    pub scroll: f32,
}

/// World-space ray under the pointer, `None` when it is off the canvas
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerRay(pub Option<Ray3d>);

/// Resource to hold shared pointer input in Bevy
#[derive(Resource)]
pub struct PointerInputRes(pub SharedPointerInput);

/// Body colour of the product scene, kept across scene switches
#[derive(Resource, Debug, Clone, Copy)]
pub struct ProductColor(pub Color);

impl Default for ProductColor {
    fn default() -> Self {
        Self(crate::bevy::scenes::product::DEFAULT_BODY_COLOR)
    }
}

impl ProductColor {
    /// `#RRGGBB` form, as reported to the frontend
    pub fn hex(&self) -> String {
        self.0.to_srgba().to_hex()
    }
}

// =============================================================================
// Frontend Bridge
// =============================================================================

/// Shared overlay and product-info state for Bevy
#[derive(Resource, Clone)]
pub struct PresentationRes(pub SharedPresentation);

/// Shared pending frontend requests for Bevy
#[derive(Resource, Clone)]
pub struct RequestsRes(pub SharedRequests);

// =============================================================================
// Rendering
// =============================================================================

/// Shared frame buffer resource for Bevy
#[derive(Resource, Clone)]
pub struct FrameBufferRes(pub SharedFrameBuffer);

// =============================================================================
// Frame Management
// =============================================================================

/// Counter for total frames rendered
#[derive(Resource, Default)]
pub struct FrameCount(pub u32);

/// Number of pre-roll frames to skip before starting output
#[derive(Resource, Default)]
pub struct PreRollFrames(pub u32);

/// Frame rate limiter to control output FPS
#[derive(Resource)]
pub struct FrameRateLimiter {
    pub last_frame_time: std::time::Instant,
    pub min_frame_interval: Duration,
}

impl FrameRateLimiter {
    pub fn new(target_fps: f64) -> Self {
        Self {
            last_frame_time: std::time::Instant::now(),
            min_frame_interval: Duration::from_secs_f64(1.0 / target_fps),
        }
    }
}

impl Default for FrameRateLimiter {
    fn default() -> Self {
        Self::new(60.0) // Default to 60 FPS
    }
}

// =============================================================================
// Performance Monitoring
// =============================================================================

/// Performance timing tracker for frame processing
#[derive(Resource, Default)]
pub struct FrameTimings {
    pub last_print_time: f64,
    pub frame_times: Vec<f64>,
}

/// Shared performance statistics resource
#[derive(Resource)]
pub struct PerfStatsRes(pub SharedPerfStats);

// =============================================================================
// Channel Communication (Main World <-> Render World)
// =============================================================================

use crossbeam_channel::{Receiver, Sender};

/// Receives data from render world
#[derive(Resource, Deref)]
pub struct MainWorldReceiver(pub Receiver<Vec<u8>>);

/// Sends data to main world
#[derive(Resource, Deref)]
pub struct RenderWorldSender(pub Sender<Vec<u8>>);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_preset_position_round_trips() {
        let position = Vec3::new(3.0, 2.0, 4.0);
        let orbit = OrbitCameraState::from_position(position, Vec3::ZERO);
        assert_relative_eq!(orbit.distance, position.length(), epsilon = 1e-5);
        let rebuilt = orbit.camera_position();
        assert_relative_eq!(rebuilt.x, position.x, epsilon = 1e-4);
        assert_relative_eq!(rebuilt.y, position.y, epsilon = 1e-4);
        assert_relative_eq!(rebuilt.z, position.z, epsilon = 1e-4);
    }

    #[test]
    fn test_pitch_never_goes_below_ground() {
        let mut orbit = OrbitCameraState::from_position(Vec3::new(0.0, 1.8, 4.0), Vec3::ZERO);
        orbit.apply_input(Vec2::new(0.0, 100_000.0), 0.0);
        assert_eq!(orbit.pitch, MIN_PITCH);
        assert!(orbit.camera_position().y >= orbit.center.y - 1e-5);

        orbit.apply_input(Vec2::new(0.0, -100_000.0), 0.0);
        assert_eq!(orbit.pitch, MAX_PITCH);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut orbit = OrbitCameraState::from_position(Vec3::new(3.0, 2.0, 4.0), Vec3::ZERO);
        orbit.apply_input(Vec2::ZERO, 1_000.0);
        assert_eq!(orbit.distance, MIN_DISTANCE);
        orbit.apply_input(Vec2::ZERO, -1_000.0);
        assert_eq!(orbit.distance, MAX_DISTANCE);
    }

    #[test]
    fn test_horizontal_drag_only_changes_yaw() {
        let mut orbit = OrbitCameraState::from_position(Vec3::new(0.0, 1.8, 4.0), Vec3::ZERO);
        let before = orbit.clone();
        orbit.apply_input(Vec2::new(40.0, 0.0), 0.0);
        assert_relative_eq!(orbit.yaw, before.yaw - 40.0 * ROTATION_SPEED);
        assert_eq!(orbit.pitch, before.pitch);
        assert_eq!(orbit.distance, before.distance);
    }

    #[test]
    fn test_preset_below_center_is_lifted_to_horizon() {
        let orbit = OrbitCameraState::from_position(Vec3::new(0.0, -6.0, 5.0), Vec3::ZERO);
        assert_eq!(orbit.pitch, MIN_PITCH);
    }
}
