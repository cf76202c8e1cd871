//! Product showcase: headless Bevy scenes streamed into a Tauri webview
//!
//! Three small 3D scenes (a hexagonal prism, a car model and a product
//! bottle) idle-rotate, tilt and react to the pointer. Bevy renders them
//! offscreen in a background thread and the frontend pulls frames over the
//! `frame://` protocol.
//!
//! # Module Structure
//!
//! - `animator`: Engine-independent idle rotation, tilt and hover scale
//! - `config`: Constants and user settings
//! - `tauri_bridge`: Bridge layer between Tauri and Bevy
//!   - `shared_state`: Thread-safe data structures
//!   - `commands`: Tauri command handlers
//!   - `protocol`: Custom protocol handlers
//!   - `error`: Errors returned to the frontend
//! - `bevy`: Bevy engine integration
//!   - `components`, `messages`, `resources`: ECS data
//!   - `scenes`: The three showcase scenes
//!   - `plugins`: GPU readback
//!   - `systems`: Per-frame systems
//!   - `app`: Application setup

// Module declarations
mod animator;
mod bevy;
mod config;
mod tauri_bridge;

use std::{thread, time::Duration};

use config::ShowcaseSettings;
use tauri_bridge::SharedState;

/// Main entry point for the Tauri application
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let (settings, settings_error) = ShowcaseSettings::load_or_default();
    let jpeg_quality = settings.jpeg_quality;

    let shared = SharedState::default();

    // Start Bevy in background thread
    bevy::start_bevy(shared.clone(), settings, settings_error);

    // Give Bevy a head start so the first frames are ready when the page loads
    thread::sleep(Duration::from_millis(500));

    let protocol_state = shared.clone();

    let result = tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .manage(shared.frame_buffer)
        .manage(shared.perf_stats)
        .manage(shared.pointer)
        .manage(shared.presentation)
        .manage(shared.requests)
        // Register custom protocol "frame://" for direct binary transfer
        .register_asynchronous_uri_scheme_protocol("frame", move |_ctx, request, responder| {
            let state = protocol_state.clone();

            // Encode off the webview thread
            thread::spawn(move || {
                // For Tauri v2, URL format is: http://frame.localhost/path
                let response = tauri_bridge::protocol::handle_frame_protocol(
                    request.uri().path(),
                    &state,
                    jpeg_quality,
                );
                responder.respond(response);
            });
        })
        .invoke_handler(tauri::generate_handler![
            tauri_bridge::commands::get_frame,
            tauri_bridge::commands::get_render_size,
            tauri_bridge::commands::get_performance_stats,
            tauri_bridge::commands::send_pointer_input,
            tauri_bridge::commands::pointer_leave,
            tauri_bridge::commands::select_scene,
            tauri_bridge::commands::set_product_color,
            tauri_bridge::commands::get_overlays,
            tauri_bridge::commands::get_showcase_info,
        ])
        .run(tauri::generate_context!());

    if let Err(err) = result {
        ::bevy::log::error!("Tauri exited with an error: {err}");
    }
}
