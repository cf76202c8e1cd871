//! Frontend request handling
//!
//! Scene switches and swatch selections arrive from Tauri commands through
//! [`SharedRequests`](crate::tauri_bridge::shared_state::SharedRequests) and are
//! applied here at the start of a frame.

use bevy::prelude::*;

use crate::bevy::components::ProductBody;
use crate::bevy::resources::{PresentationRes, ProductColor, RequestsRes};
use crate::bevy::scenes::ShowcaseScene;

/// Take pending requests and apply them to the world
pub fn apply_frontend_requests(
    requests: Option<Res<RequestsRes>>,
    presentation: Option<Res<PresentationRes>>,
    state: Res<State<ShowcaseScene>>,
    mut next_state: ResMut<NextState<ShowcaseScene>>,
    mut product_color: ResMut<ProductColor>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    bodies: Query<&MeshMaterial3d<StandardMaterial>, With<ProductBody>>,
) {
    let Some(requests) = requests else {
        return;
    };

    let (scene, color) = match requests.0 .0.lock() {
        Ok(mut guard) => (guard.scene.take(), guard.product_color.take()),
        Err(_) => return,
    };

    if let Some(scene) = scene {
        if scene != *state.get() {
            info!("Switching to {} scene", scene.name());
            next_state.set(scene);
        }
    }

    if let Some(color) = color {
        debug!("Product colour set to {}", color.to_hex());
        product_color.0 = Color::Srgba(color);
        for material in bodies.iter() {
            if let Some(material) = materials.get_mut(&material.0) {
                material.base_color = product_color.0;
            }
        }

        if let Some(presentation) = presentation {
            if let Ok(mut guard) = presentation.0 .0.lock() {
                if let Some(info) = guard.info.as_mut().filter(|info| !info.swatches.is_empty()) {
                    info.current_color = Some(product_color.hex());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tauri_bridge::shared_state::{FrontendRequests, SharedPresentation, SharedRequests};
    use bevy::{color::Srgba, ecs::system::RunSystemOnce, state::app::StatesPlugin};

    fn app_with_requests(requests: FrontendRequests) -> (App, SharedRequests) {
        let shared = SharedRequests::default();
        *shared.0.lock().unwrap() = requests;

        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .init_state::<ShowcaseScene>()
            .init_resource::<ProductColor>()
            .init_resource::<Assets<StandardMaterial>>()
            .insert_resource(RequestsRes(shared.clone()));
        (app, shared)
    }

    fn next_state(app: &App) -> &NextState<ShowcaseScene> {
        app.world().resource::<NextState<ShowcaseScene>>()
    }

    #[test]
    fn test_scene_request_sets_next_state_once() {
        let (mut app, shared) = app_with_requests(FrontendRequests {
            scene: Some(ShowcaseScene::Car),
            ..Default::default()
        });

        app.world_mut()
            .run_system_once(apply_frontend_requests)
            .unwrap();

        assert!(matches!(
            next_state(&app),
            NextState::Pending(ShowcaseScene::Car)
        ));
        assert!(shared.0.lock().unwrap().scene.is_none());
    }

    #[test]
    fn test_requesting_active_scene_is_a_no_op() {
        let (mut app, _shared) = app_with_requests(FrontendRequests {
            scene: Some(ShowcaseScene::Hexagon),
            ..Default::default()
        });

        app.world_mut()
            .run_system_once(apply_frontend_requests)
            .unwrap();

        assert!(matches!(next_state(&app), NextState::Unchanged));
    }

    #[test]
    fn test_colour_request_recolours_product_body() {
        let blue = Srgba::hex("#3B82F6").unwrap();
        let (mut app, _shared) = app_with_requests(FrontendRequests {
            product_color: Some(blue),
            ..Default::default()
        });

        let handle = app
            .world_mut()
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial::default());
        app.world_mut()
            .spawn((MeshMaterial3d(handle.clone()), ProductBody));

        app.world_mut()
            .run_system_once(apply_frontend_requests)
            .unwrap();

        let materials = app.world().resource::<Assets<StandardMaterial>>();
        assert_eq!(materials.get(&handle).unwrap().base_color, Color::Srgba(blue));
        assert_eq!(app.world().resource::<ProductColor>().0, Color::Srgba(blue));
    }

    #[test]
    fn test_colour_request_updates_reported_colour() {
        let blue = Srgba::hex("#3B82F6").unwrap();
        let (mut app, _shared) = app_with_requests(FrontendRequests {
            product_color: Some(blue),
            ..Default::default()
        });
        let presentation = SharedPresentation::default();
        presentation.0.lock().unwrap().info = Some(ShowcaseScene::Product.info());
        app.insert_resource(PresentationRes(presentation.clone()));

        app.world_mut()
            .run_system_once(apply_frontend_requests)
            .unwrap();

        let info = presentation.0.lock().unwrap().info.clone().unwrap();
        assert!(info
            .current_color
            .is_some_and(|color| color.eq_ignore_ascii_case("#3B82F6")));
    }
}
