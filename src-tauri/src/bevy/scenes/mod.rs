//! Showcase scene catalog
//!
//! Each showcase is a Bevy state. Entering a state spawns the scene's meshes,
//! lights and overlays (all tagged with [`ShowcaseEntity`]); leaving it
//! despawns them again.

pub mod car;
pub mod hexagon;
pub mod product;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::bevy::components::ShowcaseEntity;

/// The scene currently on display
#[derive(
    States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ShowcaseScene {
    #[default]
    Hexagon,
    Car,
    Product,
}

impl ShowcaseScene {
    pub const ALL: [ShowcaseScene; 3] = [Self::Hexagon, Self::Car, Self::Product];

    pub fn name(self) -> &'static str {
        match self {
            Self::Hexagon => "hexagon",
            Self::Car => "car",
            Self::Product => "product",
        }
    }

    /// Look up a scene by its frontend name, ignoring case and surrounding whitespace
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|scene| scene.name().eq_ignore_ascii_case(name))
    }

    pub fn camera_preset(self) -> CameraPreset {
        match self {
            Self::Hexagon => hexagon::CAMERA,
            Self::Car => car::CAMERA,
            Self::Product => product::CAMERA,
        }
    }

    /// Product details shown next to the canvas
    pub fn info(self) -> ShowcaseInfo {
        match self {
            Self::Hexagon => hexagon::info(),
            Self::Car => car::info(),
            Self::Product => product::info(),
        }
    }
}

/// Initial camera placement and background for a scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPreset {
    pub position: Vec3,
    pub center: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub clear_color: Color,
}

/// Light rig of a scene, in Bevy photometric units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingPreset {
    /// Ambient brightness (cd/m²)
    pub ambient_brightness: f32,
    /// Key directional light illuminance (lux)
    pub key_illuminance: f32,
    pub key_position: Vec3,
    /// Fill point light intensity (lumens)
    pub fill_intensity: f32,
    pub fill_position: Vec3,
}

/// Product details for the frontend panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowcaseInfo {
    pub scene: String,
    pub title: String,
    pub price: Option<String>,
    pub description: Option<String>,
    /// Selectable body colours as `#rrggbb`, empty when the scene has none
    pub swatches: Vec<String>,
    /// Body colour on display, only for scenes with swatches
    #[serde(default)]
    pub current_color: Option<String>,
}

/// Spawn the light rig of `preset`, all lights tagged for despawn on exit
pub fn spawn_lighting(commands: &mut Commands, preset: &LightingPreset) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: preset.ambient_brightness,
        ..default()
    });

    commands.spawn((
        DirectionalLight {
            illuminance: preset.key_illuminance,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(preset.key_position).looking_at(Vec3::ZERO, Vec3::Y),
        ShowcaseEntity,
    ));

    commands.spawn((
        PointLight {
            intensity: preset.fill_intensity,
            ..default()
        },
        Transform::from_translation(preset.fill_position),
        ShowcaseEntity,
    ));
}
