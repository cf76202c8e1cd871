//! Animation systems
//!
//! Idle rotation, tilt and hover scale of showcase objects, plus the gate that
//! holds back objects whose model is still loading.

use bevy::{asset::LoadState, prelude::*, time::Time};
use std::collections::HashSet;

use crate::bevy::components::{Animated, PendingModel, ScaleTarget};
use crate::bevy::messages::PointerEvent;

/// Tick every mounted animator and write its rotation and scale to the scene graph
///
/// Objects with a [`PendingModel`] are skipped untouched.
pub fn animate_showcase_objects(
    time: Res<Time>,
    mut roots: Query<(&mut Animated, &mut Transform, Has<PendingModel>)>,
    mut scaled_children: Query<&mut Transform, Without<Animated>>,
) {
    let delta = time.delta_secs_f64();
    let now = time.elapsed_secs_f64();

    for (mut animated, mut transform, pending) in roots.iter_mut() {
        if pending {
            continue;
        }

        let started_at = *animated.started_at.get_or_insert(now);
        animated.object.tick(delta, now - started_at);

        let object = &animated.object;
        transform.rotation = Quat::from_euler(
            EulerRot::XYZ,
            object.tilt_angle(),
            object.wrapped_orientation(),
            0.0,
        );

        let scale = Vec3::splat(object.effective_scale());
        match animated.scale_target {
            ScaleTarget::Root => transform.scale = scale,
            ScaleTarget::Child(child) => {
                if let Ok(mut child_transform) = scaled_children.get_mut(child) {
                    child_transform.scale = scale;
                }
            }
        }
    }
}

/// Apply pointer enter/exit transitions to the animators they target
pub fn apply_pointer_events(
    mut events: MessageReader<PointerEvent>,
    mut animated: Query<&mut Animated>,
) {
    for event in events.read() {
        match *event {
            PointerEvent::Enter(entity) => {
                if let Ok(mut target) = animated.get_mut(entity) {
                    target.object.on_pointer_enter();
                }
            }
            PointerEvent::Exit(entity) => {
                if let Ok(mut target) = animated.get_mut(entity) {
                    target.object.on_pointer_exit();
                }
            }
        }
    }
}

/// Where a pending model stands, from the load states of its scene and source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelStatus {
    Loading,
    Ready,
    Failed,
}

/// Combine the scene sub-asset and source file states
///
/// Loader errors land on the source file only, so its failure counts as the
/// model's failure even while the scene handle still reads `Loading`.
pub fn model_status(scene_ready: bool, scene: &LoadState, source: &LoadState) -> ModelStatus {
    if matches!(scene, LoadState::Failed(_)) || matches!(source, LoadState::Failed(_)) {
        ModelStatus::Failed
    } else if scene_ready {
        ModelStatus::Ready
    } else {
        ModelStatus::Loading
    }
}

/// Release objects whose model finished loading; report failed loads once
pub fn poll_pending_models(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    pending: Query<(Entity, &PendingModel)>,
    mut reported: Local<HashSet<Entity>>,
) {
    reported.retain(|entity| pending.contains(*entity));

    for (entity, model) in pending.iter() {
        let status = model_status(
            asset_server.is_loaded_with_dependencies(model.scene.id()),
            &asset_server.load_state(model.scene.id()),
            &asset_server.load_state(model.source.id()),
        );

        match status {
            ModelStatus::Ready => {
                info!("Model for {entity} loaded, starting animation");
                commands.entity(entity).remove::<PendingModel>();
            }
            ModelStatus::Failed if reported.insert(entity) => {
                warn!(
                    "Model for {entity} failed to load ({:?}), leaving it still",
                    model.source.path()
                );
            }
            ModelStatus::Failed | ModelStatus::Loading => {}
        }
    }
}
