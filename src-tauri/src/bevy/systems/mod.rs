//! Bevy systems
//!
//! This module contains all the systems that operate on entities
//! and resources in the Bevy ECS.

pub mod animation;
pub mod camera;
pub mod frame_extraction;
pub mod overlay;
pub mod picking;
pub mod requests;
pub mod scene;

pub use animation::{animate_showcase_objects, apply_pointer_events, poll_pending_models};
pub use camera::{sync_pointer_input, update_camera_from_input};
pub use frame_extraction::extract_and_process_frame;
pub use overlay::project_overlays;
pub use picking::{pick_hovered_objects, update_pointer_ray};
pub use requests::apply_frontend_requests;
pub use scene::{despawn_showcase_entities, prepare_scene, setup_render_target};
