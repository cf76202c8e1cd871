//! Tauri command handlers
//!
//! This module contains all the Tauri command functions that can be invoked
//! from the frontend JavaScript code. Each command delegates to a plain
//! function over the shared state so the logic can be exercised without a
//! running webview.

use base64::{engine::general_purpose::STANDARD, Engine};
use bevy::color::Srgba;
use std::time::Instant;
use tauri::State;

use super::error::BridgeError;
use super::shared_state::{
    FrameResponse, OverlayView, PerformanceStats, SharedFrameBuffer, SharedPerfStats,
    SharedPointerInput, SharedPresentation, SharedRequests,
};
use crate::bevy::scenes::{ShowcaseInfo, ShowcaseScene};
use crate::config::{RENDER_HEIGHT, RENDER_WIDTH};

/// Get the current rendered frame as Base64-encoded RGBA data
#[tauri::command]
pub fn get_frame(
    state: State<SharedFrameBuffer>,
    perf_state: State<SharedPerfStats>,
) -> Result<FrameResponse, BridgeError> {
    let cmd_start = Instant::now();

    let guard = state
        .0
        .lock()
        .map_err(|_| BridgeError::LockPoisoned("frame buffer"))?;
    let rgba_data = guard.as_ref().ok_or(BridgeError::NoFrame)?;
    let data_fetch_time = cmd_start.elapsed().as_secs_f64() * 1000.0;

    let encode_start = Instant::now();
    let base64_data = STANDARD.encode(rgba_data);
    let encode_time = encode_start.elapsed().as_secs_f64() * 1000.0;

    if let Ok(mut stats) = perf_state.0.lock() {
        stats.tauri_get_frame_ms = data_fetch_time;
        stats.tauri_serialize_ms = encode_time;
    }

    Ok(FrameResponse {
        data: base64_data,
        width: RENDER_WIDTH,
        height: RENDER_HEIGHT,
    })
}

/// Get the render resolution
#[tauri::command]
pub fn get_render_size() -> (u32, u32) {
    (RENDER_WIDTH, RENDER_HEIGHT)
}

/// Get performance statistics
#[tauri::command]
pub fn get_performance_stats(
    state: State<SharedPerfStats>,
) -> Result<PerformanceStats, BridgeError> {
    let guard = state
        .0
        .lock()
        .map_err(|_| BridgeError::LockPoisoned("performance stats"))?;
    Ok(guard.clone())
}

/// Receive pointer input from the canvas
///
/// Movement and scroll deltas are accumulated until consumed by Bevy; the
/// position (render-target pixels) and button states replace the previous ones.
#[tauri::command]
pub fn send_pointer_input(
    state: State<SharedPointerInput>,
    x: f32,
    y: f32,
    delta_x: f32,
    delta_y: f32,
    scroll_delta: f32,
    left_button: bool,
) -> Result<(), BridgeError> {
    record_pointer_input(&state, (x, y), (delta_x, delta_y), scroll_delta, left_button)
}

/// The pointer left the canvas: nothing is hovered any more
#[tauri::command]
pub fn pointer_leave(state: State<SharedPointerInput>) -> Result<(), BridgeError> {
    clear_pointer(&state)
}

/// Switch to another showcase scene by name
#[tauri::command]
pub fn select_scene(state: State<SharedRequests>, name: String) -> Result<ShowcaseInfo, BridgeError> {
    queue_scene(&state, &name).map(ShowcaseScene::info)
}

/// Recolour the product body with a hex colour
#[tauri::command]
pub fn set_product_color(state: State<SharedRequests>, color: String) -> Result<(), BridgeError> {
    queue_product_color(&state, &color)
}

/// Projected overlay labels of the current frame
#[tauri::command]
pub fn get_overlays(state: State<SharedPresentation>) -> Result<Vec<OverlayView>, BridgeError> {
    let guard = state
        .0
        .lock()
        .map_err(|_| BridgeError::LockPoisoned("presentation"))?;
    Ok(guard.overlays.clone())
}

/// Product details of the scene on display
#[tauri::command]
pub fn get_showcase_info(
    state: State<SharedPresentation>,
) -> Result<Option<ShowcaseInfo>, BridgeError> {
    let guard = state
        .0
        .lock()
        .map_err(|_| BridgeError::LockPoisoned("presentation"))?;
    Ok(guard.info.clone())
}

pub fn record_pointer_input(
    pointer: &SharedPointerInput,
    position: (f32, f32),
    delta: (f32, f32),
    scroll_delta: f32,
    left_button: bool,
) -> Result<(), BridgeError> {
    let mut guard = pointer
        .0
        .lock()
        .map_err(|_| BridgeError::LockPoisoned("pointer input"))?;
    guard.delta_x += delta.0;
    guard.delta_y += delta.1;
    guard.scroll_delta += scroll_delta;
    guard.left_button = left_button;
    guard.position = Some(position);
    Ok(())
}

pub fn clear_pointer(pointer: &SharedPointerInput) -> Result<(), BridgeError> {
    let mut guard = pointer
        .0
        .lock()
        .map_err(|_| BridgeError::LockPoisoned("pointer input"))?;
    guard.position = None;
    guard.left_button = false;
    Ok(())
}

pub fn queue_scene(requests: &SharedRequests, name: &str) -> Result<ShowcaseScene, BridgeError> {
    let scene =
        ShowcaseScene::from_name(name).ok_or_else(|| BridgeError::UnknownScene(name.to_string()))?;
    let mut guard = requests
        .0
        .lock()
        .map_err(|_| BridgeError::LockPoisoned("requests"))?;
    guard.scene = Some(scene);
    Ok(scene)
}

pub fn queue_product_color(requests: &SharedRequests, color: &str) -> Result<(), BridgeError> {
    let parsed = Srgba::hex(color.trim()).map_err(|source| BridgeError::InvalidColor {
        input: color.to_string(),
        source,
    })?;
    let mut guard = requests
        .0
        .lock()
        .map_err(|_| BridgeError::LockPoisoned("requests"))?;
    guard.product_color = Some(parsed);
    Ok(())
}
