//! Errors returned to the frontend by Tauri commands

use bevy::color::HexColorError;
use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("shared {0} state lock poisoned")]
    LockPoisoned(&'static str),

    #[error("no frame yet (scene still loading)")]
    NoFrame,

    #[error("unknown scene `{0}`, expected one of: hexagon, car, product")]
    UnknownScene(String),

    #[error("invalid colour `{input}`, expected a hex value such as #10B981: {source}")]
    InvalidColor {
        input: String,
        #[source]
        source: HexColorError,
    },
}

// Commands hand errors to the webview as plain messages
impl Serialize for BridgeError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
