//! Bevy message definitions

use bevy::prelude::*;

/// Pointer transition over a hoverable object, produced by hover picking
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Enter(Entity),
    Exit(Entity),
}
