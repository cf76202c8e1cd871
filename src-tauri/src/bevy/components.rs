//! Bevy component definitions
//!
//! Markers and data attached to the entities of a showcase scene.

use bevy::{gltf::Gltf, prelude::*};

use crate::animator::{AnimatedObject, AnimatorSettings};

/// Marker component for the offscreen rendering camera
///
/// Entities with this component are cameras that render to an offscreen
/// texture instead of a window.
#[derive(Component)]
pub struct OffscreenCamera;

/// Marker component for cameras that follow the orbit controls
#[derive(Component)]
pub struct CameraController;

/// Belongs to the active showcase scene and is despawned when it exits
#[derive(Component)]
pub struct ShowcaseEntity;

/// Body of the product scene, recoloured by swatch selection
#[derive(Component)]
pub struct ProductBody;

/// Which node receives the hover scale of an [`Animated`] object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleTarget {
    /// The animated node itself
    #[default]
    Root,
    /// A child node; the root keeps its own scale
    Child(Entity),
}

/// Idle rotation and hover scale driven by the animation system
#[derive(Component, Debug, Clone)]
pub struct Animated {
    pub object: AnimatedObject,
    pub scale_target: ScaleTarget,
    /// Clock reading of the first tick, so tilt starts from zero when mounted
    pub started_at: Option<f64>,
}

impl Animated {
    pub fn new(settings: AnimatorSettings) -> Self {
        Self {
            object: AnimatedObject::new(settings),
            scale_target: ScaleTarget::Root,
            started_at: None,
        }
    }

    pub fn scaling_child(mut self, child: Entity) -> Self {
        self.scale_target = ScaleTarget::Child(child);
        self
    }
}

/// Bounding sphere used for hover picking
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Hoverable {
    /// Radius at base scale
    pub radius: f32,
    /// Sphere center relative to the entity's global translation
    pub offset: Vec3,
}

impl Hoverable {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            offset: Vec3::ZERO,
        }
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }
}

/// A model still being fetched by the asset server; animation is paused until it is removed
#[derive(Component, Debug, Clone)]
pub struct PendingModel {
    /// The scene sub-asset that is actually displayed
    pub scene: Handle<Scene>,
    /// The file it comes from; loader errors are reported against this handle
    pub source: Handle<Gltf>,
}

/// When an overlay label is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelVisibility {
    Always,
    /// Only while the referenced [`Animated`] entity is hovered
    WhileHovered(Entity),
}

/// HTML label anchored to a world position, drawn by the frontend
#[derive(Component, Debug, Clone)]
pub struct OverlayLabel {
    pub text: String,
    pub anchor: Vec3,
    pub visibility: LabelVisibility,
}

impl OverlayLabel {
    pub fn always(text: impl Into<String>, anchor: Vec3) -> Self {
        Self {
            text: text.into(),
            anchor,
            visibility: LabelVisibility::Always,
        }
    }

    pub fn while_hovered(text: impl Into<String>, anchor: Vec3, target: Entity) -> Self {
        Self {
            text: text.into(),
            anchor,
            visibility: LabelVisibility::WhileHovered(target),
        }
    }
}
