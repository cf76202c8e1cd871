//! Car model viewer
//!
//! Loads a glTF car and turns it slowly with a gentle rocking tilt. The model
//! stays still until the asset server has finished loading it.

use bevy::{
    gltf::{Gltf, GltfAssetLabel},
    prelude::*,
};

use super::{spawn_lighting, CameraPreset, LightingPreset, ShowcaseInfo, ShowcaseScene};
use crate::animator::{AnimatorSettings, Tilt};
use crate::bevy::components::{Animated, Hoverable, OverlayLabel, PendingModel, ShowcaseEntity};
use crate::bevy::resources::SettingsRes;
use crate::config::picking::CAR_PICK_RADIUS;

pub const CAMERA: CameraPreset = CameraPreset {
    position: Vec3::new(0.0, 1.8, 4.0),
    center: Vec3::ZERO,
    fov_degrees: 45.0,
    clear_color: Color::WHITE,
};

pub const LIGHTING: LightingPreset = LightingPreset {
    ambient_brightness: 480.0,
    key_illuminance: 4_000.0,
    key_position: Vec3::new(5.0, 5.0, 5.0),
    fill_intensity: 600_000.0,
    fill_position: Vec3::new(-5.0, 2.0, -5.0),
};

pub const ANIMATOR: AnimatorSettings = AnimatorSettings::new(0.2)
    .with_tilt(Tilt::new(0.1, 0.03))
    .with_hover_scale(1.05);

pub fn info() -> ShowcaseInfo {
    ShowcaseInfo {
        scene: ShowcaseScene::Car.name().to_string(),
        title: "Lamborghini Aventador".to_string(),
        price: Some("$393,695".to_string()),
        description: Some(
            "High-performance supercar with V12 engine and cutting-edge aerodynamics.".to_string(),
        ),
        swatches: Vec::new(),
        current_color: None,
    }
}

pub fn spawn_car_scene(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    settings: Res<SettingsRes>,
) {
    let model_path = settings.0.car_model_path.clone();
    info!("Spawning car scene, loading {model_path}");
    spawn_lighting(&mut commands, &LIGHTING);

    let source: Handle<Gltf> = asset_server.load(model_path.clone());
    let model: Handle<Scene> = asset_server.load(GltfAssetLabel::Scene(0).from_asset(model_path));

    let car = commands
        .spawn((
            SceneRoot(model.clone()),
            Transform::from_xyz(0.0, -0.6, 0.0),
            Animated::new(ANIMATOR),
            Hoverable::new(CAR_PICK_RADIUS).with_offset(Vec3::new(0.0, 0.6, 0.0)),
            PendingModel {
                scene: model,
                source,
            },
            ShowcaseEntity,
        ))
        .id();

    commands.spawn((
        OverlayLabel::while_hovered("Lamborghini", Vec3::new(0.0, 1.2, 0.0), car),
        ShowcaseEntity,
    ));
}
