//! Bevy application setup and execution
//!
//! This module handles the creation and configuration of the Bevy app,
//! including plugin registration and system scheduling.

use bevy::{
    app::{App, ScheduleRunnerPlugin},
    prelude::*,
    window::ExitCondition,
};
use std::thread;
use std::time::Duration;

use crate::bevy::messages::PointerEvent;
use crate::bevy::plugins::ImageCopyPlugin;
use crate::bevy::resources::*;
use crate::bevy::scenes::{
    car::spawn_car_scene, hexagon::spawn_hexagon_scene, product::spawn_product_scene,
    ShowcaseScene,
};
use crate::bevy::systems::*;
use crate::config::{ConfigError, ShowcaseSettings};
use crate::tauri_bridge::shared_state::SharedState;

/// Create and configure the Bevy application
pub fn create_app(
    shared: SharedState,
    settings: ShowcaseSettings,
    settings_error: Option<ConfigError>,
) -> App {
    let mut app = App::new();

    // Use DefaultPlugins but configure for headless operation
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: None,
                exit_condition: ExitCondition::DontExit,
                ..default()
            })
            .set(ImagePlugin::default_nearest()),
    );

    // Logging is available from here on
    if let Some(err) = settings_error {
        warn!("{err}; using default settings");
    }

    // Add schedule runner for controlled frame rate
    app.add_plugins(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
        1.0 / settings.target_fps,
    )));

    app.add_plugins(ImageCopyPlugin);

    app.insert_state(settings.initial_scene);
    app.add_message::<PointerEvent>();

    // Scene lifecycle
    app.add_systems(Startup, setup_render_target);
    for scene in ShowcaseScene::ALL {
        app.add_systems(OnEnter(scene), prepare_scene);
        app.add_systems(OnExit(scene), despawn_showcase_entities);
    }
    app.add_systems(
        OnEnter(ShowcaseScene::Hexagon),
        spawn_hexagon_scene.after(prepare_scene),
    );
    app.add_systems(OnEnter(ShowcaseScene::Car), spawn_car_scene.after(prepare_scene));
    app.add_systems(
        OnEnter(ShowcaseScene::Product),
        spawn_product_scene.after(prepare_scene),
    );

    // Per-frame interaction and animation
    app.add_systems(
        Update,
        (
            apply_frontend_requests,
            sync_pointer_input,
            update_camera_from_input,
            poll_pending_models,
            update_pointer_ray,
            pick_hovered_objects,
            apply_pointer_events,
            animate_showcase_objects,
        )
            .chain(),
    );
    app.add_systems(Last, (project_overlays, extract_and_process_frame).chain());

    // Insert resources
    let preset = settings.initial_scene.camera_preset();
    app.insert_resource(FrameBufferRes(shared.frame_buffer));
    app.insert_resource(PerfStatsRes(shared.perf_stats));
    app.insert_resource(PointerInputRes(shared.pointer));
    app.insert_resource(PresentationRes(shared.presentation));
    app.insert_resource(RequestsRes(shared.requests));
    app.insert_resource(OrbitCameraState::from_position(preset.position, preset.center));
    app.insert_resource(SceneCamera(preset));
    app.insert_resource(PointerState::default());
    app.insert_resource(PointerRay::default());
    app.insert_resource(ProductColor::default());
    app.insert_resource(FrameCount::default());
    app.insert_resource(PreRollFrames(settings.pre_roll_frames));
    app.insert_resource(FrameTimings::default());
    app.insert_resource(FrameRateLimiter::new(settings.target_fps));

    info!(
        "Bevy app configured (headless, offscreen readback, {} fps, initial scene {})",
        settings.target_fps,
        settings.initial_scene.name()
    );
    app.insert_resource(SettingsRes(settings));
    app
}

/// Start Bevy in a background thread
pub fn start_bevy(
    shared: SharedState,
    settings: ShowcaseSettings,
    settings_error: Option<ConfigError>,
) {
    thread::spawn(move || {
        let mut app = create_app(shared, settings, settings_error);
        info!("Running render loop");
        app.run();
    });
}
