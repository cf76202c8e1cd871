//! Shared state structures for communication between Tauri and Bevy
//!
//! This module defines thread-safe data structures that allow bidirectional
//! communication between the Tauri frontend and the Bevy render backend.

use bevy::color::Srgba;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

use crate::bevy::scenes::{ShowcaseInfo, ShowcaseScene};

// =============================================================================
// Frame Buffer
// =============================================================================

/// Thread-safe RGBA frame buffer shared between Bevy and Tauri
/// Stores raw RGBA8 pixel data (4 bytes per pixel)
#[derive(Clone, Default)]
pub struct SharedFrameBuffer(pub Arc<Mutex<Option<Vec<u8>>>>);

/// Frame response containing Base64-encoded RGBA pixel data
#[derive(Serialize, Deserialize)]
pub struct FrameResponse {
    /// Base64-encoded RGBA pixel data (avoids slow JSON array serialization)
    pub data: String,
    pub width: u32,
    pub height: u32,
}

// =============================================================================
// Pointer Input
// =============================================================================

/// Pointer state received from the frontend canvas
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct PointerInput {
    /// Accumulated X movement delta
    pub delta_x: f32,
    /// Accumulated Y movement delta
    pub delta_y: f32,
    /// Accumulated scroll wheel delta
    pub scroll_delta: f32,
    /// Left button is pressed
    pub left_button: bool,
    /// Pointer position in render-target pixels, `None` once it leaves the canvas
    pub position: Option<(f32, f32)>,
}

/// Thread-safe pointer input shared between Tauri and Bevy
#[derive(Clone, Default)]
pub struct SharedPointerInput(pub Arc<Mutex<PointerInput>>);

// =============================================================================
// Presentation (overlays and product details)
// =============================================================================

/// One projected overlay label
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OverlayView {
    pub text: String,
    /// Label center in render-target pixels
    pub x: f32,
    pub y: f32,
    pub visible: bool,
}

/// What the frontend draws around and on top of the frame
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Presentation {
    pub info: Option<ShowcaseInfo>,
    pub overlays: Vec<OverlayView>,
}

/// Thread-safe presentation state written by Bevy each frame
#[derive(Clone, Default)]
pub struct SharedPresentation(pub Arc<Mutex<Presentation>>);

// =============================================================================
// Frontend Requests
// =============================================================================

/// Requests from the frontend, consumed by Bevy on its next frame
#[derive(Clone, Debug, Default)]
pub struct FrontendRequests {
    pub scene: Option<ShowcaseScene>,
    pub product_color: Option<Srgba>,
}

/// Thread-safe pending requests
#[derive(Clone, Default)]
pub struct SharedRequests(pub Arc<Mutex<FrontendRequests>>);

// =============================================================================
// Performance Statistics
// =============================================================================

/// Performance statistics for debugging and monitoring
#[derive(Serialize, Deserialize, Clone, Default)]
pub struct PerformanceStats {
    // Backend (Bevy/Rust) timings
    pub gpu_transfer_ms: f64,
    pub data_processing_ms: f64,
    pub frame_encoding_ms: f64,
    pub bevy_fps: f64,
    pub frame_count: u32,
    pub data_size_kb: f64,
    // Tauri command timings
    pub tauri_get_frame_ms: f64,
    pub tauri_serialize_ms: f64,
}

/// Thread-safe performance statistics
#[derive(Clone, Default)]
pub struct SharedPerfStats(pub Arc<Mutex<PerformanceStats>>);

// =============================================================================
// Bundle
// =============================================================================

/// Every piece of state shared across the Tauri/Bevy thread boundary
#[derive(Clone, Default)]
pub struct SharedState {
    pub frame_buffer: SharedFrameBuffer,
    pub perf_stats: SharedPerfStats,
    pub pointer: SharedPointerInput,
    pub presentation: SharedPresentation,
    pub requests: SharedRequests,
}
