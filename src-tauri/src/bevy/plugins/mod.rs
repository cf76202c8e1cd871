//! Bevy plugins
//!
//! Render-world plumbing that copies the offscreen showcase target back to
//! the CPU each frame.

pub mod image_copy;

pub use image_copy::{ImageCopier, ImageCopyPlugin};
