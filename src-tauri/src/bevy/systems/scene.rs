//! Scene setup and lifecycle systems
//!
//! The render target and camera are created once at startup and survive scene
//! switches. Showcase content is spawned on entering a [`ShowcaseScene`] and
//! despawned on leaving it.

use bevy::{
    asset::Assets,
    camera::RenderTarget,
    core_pipeline::tonemapping::Tonemapping,
    image::Image,
    prelude::*,
    render::{
        render_resource::{Extent3d, TextureFormat, TextureUsages},
        renderer::RenderDevice,
    },
};

use crate::bevy::components::{CameraController, OffscreenCamera, ShowcaseEntity};
use crate::bevy::plugins::ImageCopier;
use crate::bevy::resources::{
    OrbitCameraState, PreRollFrames, PresentationRes, ProductColor, SceneCamera, SettingsRes,
};
use crate::bevy::scenes::ShowcaseScene;
use crate::config::{RENDER_HEIGHT, RENDER_WIDTH};

/// Create the offscreen render target, its GPU readback and the orbit camera
pub fn setup_render_target(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    render_device: Res<RenderDevice>,
    scene_camera: Res<SceneCamera>,
    orbit: Res<OrbitCameraState>,
) {
    info!("Creating {RENDER_WIDTH}x{RENDER_HEIGHT} offscreen render target");

    let size = Extent3d {
        width: RENDER_WIDTH,
        height: RENDER_HEIGHT,
        depth_or_array_layers: 1,
    };

    let mut render_target_image =
        Image::new_target_texture(size.width, size.height, TextureFormat::bevy_default());
    render_target_image.texture_descriptor.usage |= TextureUsages::COPY_SRC;
    let render_target_image_handle = images.add(render_target_image);

    // Spawn image copier for GPU-to-CPU transfer
    commands.spawn(ImageCopier::new(
        render_target_image_handle.clone(),
        size,
        &render_device,
    ));

    let preset = scene_camera.0;
    commands.spawn((
        Camera3d::default(),
        Camera {
            target: RenderTarget::Image(render_target_image_handle.into()),
            clear_color: ClearColorConfig::Custom(preset.clear_color),
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            fov: preset.fov_degrees.to_radians(),
            ..default()
        }),
        Tonemapping::None,
        Transform::from_translation(orbit.camera_position()).looking_at(orbit.center, Vec3::Y),
        OffscreenCamera,
        CameraController,
    ));
}

/// Reset camera, output pre-roll and product details for the scene being entered
pub fn prepare_scene(
    state: Res<State<ShowcaseScene>>,
    settings: Res<SettingsRes>,
    presentation: Option<Res<PresentationRes>>,
    mut orbit: ResMut<OrbitCameraState>,
    mut scene_camera: ResMut<SceneCamera>,
    mut pre_roll: ResMut<PreRollFrames>,
    product_color: Res<ProductColor>,
) {
    let scene = *state.get();
    info!("Entering {} scene", scene.name());

    let preset = scene.camera_preset();
    *orbit = OrbitCameraState::from_position(preset.position, preset.center);
    scene_camera.0 = preset;
    pre_roll.0 = settings.0.pre_roll_frames;

    if let Some(presentation) = presentation {
        match presentation.0 .0.lock() {
            Ok(mut guard) => {
                let mut info = scene.info();
                if !info.swatches.is_empty() {
                    info.current_color = Some(product_color.hex());
                }
                guard.info = Some(info);
                guard.overlays.clear();
            }
            Err(_) => warn!("Presentation state lock poisoned, product info not updated"),
        }
    }
}

/// Despawn everything that belongs to the scene being left
pub fn despawn_showcase_entities(
    mut commands: Commands,
    entities: Query<Entity, With<ShowcaseEntity>>,
) {
    let mut count = 0;
    for entity in &entities {
        commands.entity(entity).despawn();
        count += 1;
    }
    debug!("Despawned {count} showcase entities");
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    use crate::config::ShowcaseSettings;
    use crate::tauri_bridge::shared_state::SharedPresentation;
    use bevy::color::Srgba;

    fn world_entering(scene: ShowcaseScene, color: Color) -> (World, SharedPresentation) {
        let presentation = SharedPresentation::default();
        let preset = ShowcaseScene::Hexagon.camera_preset();

        let mut world = World::new();
        world.insert_resource(State::new(scene));
        world.insert_resource(SettingsRes(ShowcaseSettings::default()));
        world.insert_resource(PresentationRes(presentation.clone()));
        world.insert_resource(OrbitCameraState::from_position(preset.position, preset.center));
        world.insert_resource(SceneCamera(preset));
        world.insert_resource(PreRollFrames(0));
        world.insert_resource(ProductColor(color));
        (world, presentation)
    }

    #[test]
    fn test_entering_product_reports_the_kept_colour() {
        let blue = Srgba::hex("#3B82F6").unwrap();
        let (mut world, presentation) = world_entering(ShowcaseScene::Product, Color::Srgba(blue));

        world.run_system_once(prepare_scene).unwrap();

        let info = presentation.0.lock().unwrap().info.clone().unwrap();
        assert_eq!(info.scene, "product");
        assert!(info
            .current_color
            .is_some_and(|color| color.eq_ignore_ascii_case("#3B82F6")));
        assert_eq!(world.resource::<SceneCamera>().0, ShowcaseScene::Product.camera_preset());
        assert_eq!(world.resource::<PreRollFrames>().0, ShowcaseSettings::default().pre_roll_frames);
    }

    #[test]
    fn test_scenes_without_swatches_report_no_colour() {
        let (mut world, presentation) = world_entering(ShowcaseScene::Car, Color::WHITE);

        world.run_system_once(prepare_scene).unwrap();

        let info = presentation.0.lock().unwrap().info.clone().unwrap();
        assert_eq!(info.scene, "car");
        assert_eq!(info.current_color, None);
    }

    #[test]
    fn test_despawn_removes_only_showcase_entities() {
        let mut world = World::new();
        let showcase = world.spawn((Transform::default(), ShowcaseEntity)).id();
        let persistent = world.spawn((Transform::default(), OffscreenCamera)).id();

        world
            .run_system_once(despawn_showcase_entities)
            .expect("despawn system runs");

        assert!(world.get_entity(showcase).is_err());
        assert!(world.get_entity(persistent).is_ok());
    }
}
