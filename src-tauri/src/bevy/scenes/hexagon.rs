//! Hexagonal prism scene
//!
//! A slowly spinning hexagonal prism with a sphere resting on top, over a dark
//! ground plane. The prism is outlined in black and is the hover target; the
//! whole group grows while it is hovered.

use std::f32::consts::{FRAC_PI_2, TAU};

use bevy::{asset::RenderAssetUsages, prelude::*, render::render_resource::PrimitiveTopology};

use super::{spawn_lighting, CameraPreset, LightingPreset, ShowcaseInfo, ShowcaseScene};
use crate::animator::AnimatorSettings;
use crate::bevy::components::{Animated, Hoverable, OverlayLabel, ShowcaseEntity};

pub const CAMERA: CameraPreset = CameraPreset {
    position: Vec3::new(3.0, 2.0, 4.0),
    center: Vec3::ZERO,
    fov_degrees: 50.0,
    clear_color: Color::srgb_u8(0x0f, 0x17, 0x2a),
};

pub const LIGHTING: LightingPreset = LightingPreset {
    ambient_brightness: 400.0,
    key_illuminance: 4_000.0,
    key_position: Vec3::new(5.0, 5.0, 5.0),
    fill_intensity: 300_000.0,
    fill_position: Vec3::new(-5.0, -2.0, -5.0),
};

pub const ANIMATOR: AnimatorSettings = AnimatorSettings::new(0.5).with_hover_scale(1.12);

const RADIUS: f32 = 1.1;
const HEIGHT: f32 = 0.45;

/// Line-list vertices outlining a flat-topped hexagonal prism centered on the origin
///
/// Each pair of points is one edge: six around the top, six around the bottom
/// and six vertical ones.
pub fn hexagon_edge_positions(radius: f32, height: f32) -> Vec<[f32; 3]> {
    let half = height / 2.0;
    let corner = |i: usize, y: f32| {
        let angle = i as f32 * TAU / 6.0;
        [radius * angle.cos(), y, radius * angle.sin()]
    };

    let mut positions = Vec::with_capacity(36);
    for i in 0..6 {
        let next = (i + 1) % 6;
        positions.extend([corner(i, half), corner(next, half)]);
        positions.extend([corner(i, -half), corner(next, -half)]);
        positions.extend([corner(i, half), corner(i, -half)]);
    }
    positions
}

/// Bounding sphere of the prism
fn prism_pick_volume() -> Hoverable {
    Hoverable::new(RADIUS.hypot(HEIGHT / 2.0))
}

pub fn info() -> ShowcaseInfo {
    ShowcaseInfo {
        scene: ShowcaseScene::Hexagon.name().to_string(),
        title: "Hexagon".to_string(),
        price: None,
        description: None,
        swatches: Vec::new(),
        current_color: None,
    }
}

pub fn spawn_hexagon_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    info!("Spawning hexagon scene");
    spawn_lighting(&mut commands, &LIGHTING);

    let prism_mesh = meshes.add(Cylinder::new(RADIUS, HEIGHT).mesh().resolution(6));
    let prism_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0xef, 0x44, 0x44),
        metallic: 0.4,
        perceptual_roughness: 0.25,
        ..default()
    });
    let marker_mesh = meshes.add(Circle::new(RADIUS * 0.45).mesh().resolution(6));
    let marker_material = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 1.0, 1.0, 0.06),
        alpha_mode: AlphaMode::Blend,
        ..default()
    });
    let sphere_mesh = meshes.add(Sphere::new(1.0).mesh().uv(32, 32));
    let sphere_material = materials.add(Color::srgb_u8(0x00, 0xaa, 0xff));
    let edge_mesh = meshes.add(
        Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::default())
            .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, hexagon_edge_positions(RADIUS, HEIGHT)),
    );
    let edge_material = materials.add(StandardMaterial {
        base_color: Color::BLACK,
        unlit: true,
        ..default()
    });

    commands
        .spawn((
            Transform::default(),
            Visibility::default(),
            Animated::new(ANIMATOR),
            prism_pick_volume(),
            ShowcaseEntity,
        ))
        .with_children(|group| {
            group.spawn((
                Mesh3d(prism_mesh),
                MeshMaterial3d(prism_material),
                Transform::default(),
            ));
            group.spawn((
                Mesh3d(edge_mesh),
                MeshMaterial3d(edge_material),
                Transform::default(),
            ));
            // Faces up so the orientation of the prism is visible from above
            group.spawn((
                Mesh3d(marker_mesh),
                MeshMaterial3d(marker_material),
                Transform::from_xyz(0.0, HEIGHT / 2.0 + 0.001, 0.0)
                    .with_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
            ));
            group.spawn((
                Mesh3d(sphere_mesh),
                MeshMaterial3d(sphere_material),
                Transform::from_xyz(0.0, 1.0, 0.0),
            ));
        });

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(20.0, 20.0))),
        MeshMaterial3d(materials.add(Color::srgb_u8(0x07, 0x10, 0x24))),
        Transform::from_xyz(0.0, -0.6, 0.0),
        ShowcaseEntity,
    ));

    commands.spawn((
        OverlayLabel::always("Hexagon", Vec3::new(0.0, 1.2, 0.0)),
        ShowcaseEntity,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_has_eighteen_edges_on_the_prism_corners() {
        let positions = hexagon_edge_positions(RADIUS, HEIGHT);
        assert_eq!(positions.len(), 36);

        for [x, y, z] in positions {
            assert!((x.hypot(z) - RADIUS).abs() < 1e-5);
            assert!((y.abs() - HEIGHT / 2.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_outline_edges_are_sides_or_uprights() {
        let side = RADIUS;
        for pair in hexagon_edge_positions(RADIUS, HEIGHT).chunks_exact(2) {
            let (a, b) = (Vec3::from(pair[0]), Vec3::from(pair[1]));
            let length = a.distance(b);
            if a.y == b.y {
                // Regular hexagon sides equal the circumradius
                assert!((length - side).abs() < 1e-5);
            } else {
                assert!((length - HEIGHT).abs() < 1e-6);
                assert!(a.xz().distance(b.xz()) < 1e-6);
            }
        }
    }

    #[test]
    fn test_pick_volume_covers_the_whole_prism() {
        let volume = prism_pick_volume();
        assert_eq!(volume.offset, Vec3::ZERO);

        let far_corner = Vec3::new(RADIUS, HEIGHT / 2.0, 0.0);
        assert!(far_corner.length() <= volume.radius + 1e-6);
        assert!(Vec3::new(RADIUS, -HEIGHT / 2.0, 0.0).length() <= volume.radius + 1e-6);
        // Not padded far past the prism
        assert!(volume.radius < RADIUS + HEIGHT / 2.0);
    }
}
