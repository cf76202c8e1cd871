//! Bridge layer between Tauri and Bevy
//!
//! This module handles all communication between the Tauri frontend and
//! the Bevy rendering backend, including command handlers, custom protocols,
//! and shared state management.

pub mod commands;
pub mod error;
pub mod protocol;
pub mod shared_state;

// Re-export commonly used types
pub use shared_state::SharedState;
