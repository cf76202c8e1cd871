//! Product bottle viewer
//!
//! A stylised product (body, cap and logo plate) on a base plate. The whole
//! group rotates; only the body grows on hover, and its colour follows the
//! swatch picked in the frontend.

use bevy::prelude::*;

use super::{spawn_lighting, CameraPreset, LightingPreset, ShowcaseInfo, ShowcaseScene};
use crate::animator::{AnimatorSettings, Tilt};
use crate::bevy::components::{
    Animated, Hoverable, OverlayLabel, ProductBody, ShowcaseEntity,
};
use crate::bevy::resources::ProductColor;

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

pub const DEFAULT_BODY_COLOR: Color = Color::srgb_u8(0x10, 0xb9, 0x81);

pub const SWATCHES: [&str; 4] = ["#10B981", "#3B82F6", "#EF4444", "#F59E0B"];

pub fn info() -> ShowcaseInfo {
    ShowcaseInfo {
        scene: ShowcaseScene::Product.name().to_string(),
        title: "EcoBottle Pro".to_string(),
        price: Some("₱1,599.00".to_string()),
        description: Some("Stylish reusable bottle — insulated, BPA-free, 750ml.".to_string()),
        swatches: SWATCHES.iter().map(|swatch| swatch.to_string()).collect(),
        current_color: None,
    }
}

pub fn spawn_product_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    body_color: Res<ProductColor>,
) {
    info!("Spawning product scene");
    spawn_lighting(&mut commands, &LIGHTING);

    let body = commands
        .spawn((
            Mesh3d(meshes.add(Cuboid::new(1.8, 0.6, 1.2))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: body_color.0,
                metallic: 0.6,
                perceptual_roughness: 0.2,
                ..default()
            })),
            Transform::default(),
            ProductBody,
        ))
        .id();

    let base_plate = (
        Mesh3d(meshes.add(Plane3d::default().mesh().size(6.0, 6.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(0x11, 0x18, 0x27),
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::from_xyz(0.0, -0.6, 0.0),
    );
    let cap = (
        Mesh3d(meshes.add(Cylinder::new(0.6, 0.18).mesh().resolution(32))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(0x34, 0xd3, 0x99),
            metallic: 0.9,
            perceptual_roughness: 0.15,
            ..default()
        })),
        Transform::from_xyz(0.0, 0.45, 0.0),
    );
    let logo_plate = (
        Mesh3d(meshes.add(Rectangle::new(0.8, 0.4))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            emissive: LinearRgba::rgb(0.02, 0.02, 0.02),
            ..default()
        })),
        Transform::from_xyz(0.0, 0.0, 0.62),
    );

    let group = commands
        .spawn((
            Transform::default(),
            Visibility::default(),
            Animated::new(ANIMATOR).scaling_child(body),
            Hoverable::new(1.1),
            ShowcaseEntity,
        ))
        .with_children(|group| {
            group.spawn(base_plate);
            group.spawn(cap);
            group.spawn(logo_plate);
        })
        .add_child(body)
        .id();

    commands.spawn((
        OverlayLabel::while_hovered("Hovering", Vec3::new(0.0, 1.2, 0.0), group),
        ShowcaseEntity,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_details_match_the_catalog() {
        let info = info();
        assert_eq!(info.title, "EcoBottle Pro");
        assert_eq!(info.price.as_deref(), Some("₱1,599.00"));
        assert_eq!(
            info.description.as_deref(),
            Some("Stylish reusable bottle — insulated, BPA-free, 750ml.")
        );
        assert_eq!(info.swatches, SWATCHES);
    }
}
