//! Hover picking
//!
//! Turns the frontend pointer position into a world-space ray through the
//! offscreen camera and tests it against the bounding sphere of every
//! [`Hoverable`]. The nearest hit is the hovered object; changes are reported
//! as [`PointerEvent`] messages.

use bevy::prelude::*;

use crate::bevy::components::{Animated, Hoverable, OffscreenCamera, PendingModel};
use crate::bevy::messages::PointerEvent;
use crate::bevy::resources::{PointerRay, PointerState};

/// Distance along a ray to its first intersection with a sphere.
///
/// `direction` must be normalized. Returns `None` on a miss or when the sphere
/// lies entirely behind the origin.
pub fn ray_sphere_distance(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    // Solve |origin + t*direction - center|^2 = radius^2 with |direction| = 1
    let oc = origin - center;
    let b = oc.dot(direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;

    if discriminant < 0.0 {
        return None;
    }

    let sqrt_discriminant = discriminant.sqrt();
    let near = -b - sqrt_discriminant;
    let far = -b + sqrt_discriminant;

    if near > 0.0 {
        Some(near)
    } else if far > 0.0 {
        // Origin is inside the sphere
        Some(far)
    } else {
        None
    }
}

/// Events needed to move from the current hover flags to `hit` being the only hovered object
///
/// Exits come before enters so a consumer never sees two objects hovered at once.
pub fn hover_transitions(
    current: impl IntoIterator<Item = (Entity, bool)>,
    hit: Option<Entity>,
) -> Vec<PointerEvent> {
    let mut exits = Vec::new();
    let mut enters = Vec::new();

    for (entity, hovered) in current {
        let is_hit = hit == Some(entity);
        if hovered && !is_hit {
            exits.push(PointerEvent::Exit(entity));
        } else if !hovered && is_hit {
            enters.push(PointerEvent::Enter(entity));
        }
    }

    exits.extend(enters);
    exits
}

/// Cast the pointer position through the offscreen camera
pub fn update_pointer_ray(
    pointer: Res<PointerState>,
    cameras: Query<(&Camera, &GlobalTransform), With<OffscreenCamera>>,
    mut pointer_ray: ResMut<PointerRay>,
) {
    pointer_ray.0 = pointer.position.and_then(|position| {
        let (camera, camera_transform) = cameras.iter().next()?;
        camera.viewport_to_world(camera_transform, position).ok()
    });
}

/// Find the hovered object and emit enter/exit transitions
///
/// Objects still waiting for their model cannot be hovered.
pub fn pick_hovered_objects(
    pointer_ray: Res<PointerRay>,
    hoverables: Query<(Entity, &GlobalTransform, &Hoverable, &Animated), Without<PendingModel>>,
    mut events: MessageWriter<PointerEvent>,
) {
    let hit = pointer_ray.0.and_then(|ray| {
        hoverables
            .iter()
            .filter_map(|(entity, transform, hoverable, animated)| {
                let center = transform.translation() + hoverable.offset;
                let radius = hoverable.radius * animated.object.effective_scale();
                ray_sphere_distance(ray.origin, *ray.direction, center, radius)
                    .map(|distance| (entity, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(entity, _)| entity)
    });

    let current = hoverables
        .iter()
        .map(|(entity, _, _, animated)| (entity, animated.object.is_hovered()));

    for event in hover_transitions(current, hit) {
        debug!("Pointer {event:?}");
        events.write(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animator::AnimatorSettings;
    use crate::bevy::systems::animation::apply_pointer_events;
    use approx::assert_relative_eq;
    use bevy::ecs::{message::Messages, system::RunSystemOnce};

    fn ray_from(origin: Vec3) -> PointerRay {
        PointerRay(Some(Ray3d {
            origin,
            direction: Dir3::NEG_Z,
        }))
    }

    /// Run one picking pass, apply its transitions and return them
    fn pick(world: &mut World) -> Vec<PointerEvent> {
        world.run_system_once(pick_hovered_objects).unwrap();
        let events: Vec<PointerEvent> = world
            .resource_mut::<Messages<PointerEvent>>()
            .drain()
            .collect();

        for event in &events {
            world.write_message(*event);
        }
        world.run_system_once(apply_pointer_events).unwrap();
        world.resource_mut::<Messages<PointerEvent>>().drain().for_each(drop);
        events
    }

    #[test]
    fn test_pointer_over_object_enters_then_leaving_exits() {
        let mut world = World::new();
        world.init_resource::<Messages<PointerEvent>>();
        world.insert_resource(ray_from(Vec3::new(0.0, 0.5, 10.0)));
        let hexagon = world
            .spawn((
                GlobalTransform::default(),
                Hoverable::new(1.1),
                Animated::new(AnimatorSettings::new(0.5).with_hover_scale(1.12)),
            ))
            .id();

        assert_eq!(pick(&mut world), vec![PointerEvent::Enter(hexagon)]);
        assert!(world.get::<Animated>(hexagon).unwrap().object.is_hovered());

        // Still over it: no new transition
        assert!(pick(&mut world).is_empty());

        world.resource_mut::<PointerRay>().0 = None;
        assert_eq!(pick(&mut world), vec![PointerEvent::Exit(hexagon)]);
        assert!(!world.get::<Animated>(hexagon).unwrap().object.is_hovered());
    }

    #[test]
    fn test_nearest_object_wins_and_pending_models_are_skipped() {
        let mut world = World::new();
        world.init_resource::<Messages<PointerEvent>>();
        world.insert_resource(ray_from(Vec3::new(0.0, 0.0, 10.0)));
        let settings = AnimatorSettings::new(0.2);
        let far = world
            .spawn((
                GlobalTransform::from_translation(Vec3::new(0.0, 0.0, -3.0)),
                Hoverable::new(1.0),
                Animated::new(settings),
            ))
            .id();
        let loading = world
            .spawn((
                GlobalTransform::from_translation(Vec3::new(0.0, 0.0, 5.0)),
                Hoverable::new(1.0),
                Animated::new(settings),
                PendingModel {
                    scene: Handle::default(),
                    source: Handle::default(),
                },
            ))
            .id();
        let near = world
            .spawn((
                GlobalTransform::from_translation(Vec3::new(0.0, 0.0, 1.0)),
                Hoverable::new(1.0),
                Animated::new(settings),
            ))
            .id();

        assert_eq!(pick(&mut world), vec![PointerEvent::Enter(near)]);

        assert!(world.get::<Animated>(near).unwrap().object.is_hovered());
        assert!(!world.get::<Animated>(far).unwrap().object.is_hovered());
        assert!(!world.get::<Animated>(loading).unwrap().object.is_hovered());
    }

    #[test]
    fn test_ray_hits_sphere_front_surface() {
        let distance = ray_sphere_distance(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z, Vec3::ZERO, 1.0);
        assert_relative_eq!(distance.unwrap(), 9.0, epsilon = 1e-5);
    }

    #[test]
    fn test_ray_misses_offset_sphere() {
        let distance = ray_sphere_distance(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::NEG_Z,
            Vec3::new(0.0, 3.0, 0.0),
            1.0,
        );
        assert!(distance.is_none());
    }

    #[test]
    fn test_sphere_behind_origin_is_missed() {
        let distance = ray_sphere_distance(Vec3::new(0.0, 0.0, 10.0), Vec3::Z, Vec3::ZERO, 1.0);
        assert!(distance.is_none());
    }

    #[test]
    fn test_origin_inside_sphere_hits_far_side() {
        let distance = ray_sphere_distance(Vec3::ZERO, Vec3::X, Vec3::ZERO, 2.0);
        assert_relative_eq!(distance.unwrap(), 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_transitions_move_hover_between_objects() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();

        let events = hover_transitions([(a, true), (b, false)], Some(b));
        assert_eq!(events, vec![PointerEvent::Exit(a), PointerEvent::Enter(b)]);
    }

    #[test]
    fn test_no_transitions_when_hover_is_unchanged() {
        let a = World::new().spawn_empty().id();
        assert!(hover_transitions([(a, true)], Some(a)).is_empty());
        assert!(hover_transitions([(a, false)], None).is_empty());
    }

    #[test]
    fn test_pointer_leaving_exits_hovered_object() {
        let a = World::new().spawn_empty().id();
        assert_eq!(hover_transitions([(a, true)], None), vec![PointerEvent::Exit(a)]);
    }
}
