//! Custom protocol handlers for efficient data transfer
//!
//! This module implements the `frame://` custom protocol for direct binary
//! transfer of render frames, bypassing Tauri's IPC JSON serialization.

use image::{codecs::jpeg::JpegEncoder, ImageBuffer, ImageEncoder, Rgba};
use tauri::http::{Response as HttpResponse, StatusCode};
use thiserror::Error;

use super::shared_state::SharedState;
use crate::config::{RENDER_HEIGHT, RENDER_WIDTH};

type Response = HttpResponse<Vec<u8>>;

#[derive(Debug, Error)]
enum ProtocolError {
    #[error("unknown resource `{0}`")]
    NotFound(String),

    #[error("frame not ready")]
    FrameNotReady,

    #[error("shared {0} state lock poisoned")]
    LockPoisoned(&'static str),

    #[error("frame buffer has {0} bytes, expected {RENDER_WIDTH}x{RENDER_HEIGHT} RGBA")]
    BadFrameSize(usize),

    #[error("JPEG encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response build failed: {0}")]
    Http(#[from] tauri::http::Error),
}

impl ProtocolError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::FrameNotReady => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Handle requests to the custom `frame://` protocol
///
/// Supported endpoints:
/// - `frame` or `frame.jpg`: JPEG-compressed frame (~50-100KB)
/// - `frame.raw`: Raw RGBA frame (~1.8MB)
/// - `stats`: Performance statistics as JSON
/// - `overlays`: Projected overlay labels as JSON
pub fn handle_frame_protocol(uri_path: &str, shared: &SharedState, jpeg_quality: u8) -> Response {
    let resource = uri_path.trim_start_matches('/');
    ::bevy::log::trace!("frame protocol request: {resource}");

    let result = match resource {
        "frame" | "frame.jpg" => handle_jpeg_frame(shared, jpeg_quality),
        "frame.raw" => handle_raw_frame(shared),
        "stats" => handle_stats(shared),
        "overlays" => handle_overlays(shared),
        other => Err(ProtocolError::NotFound(other.to_string())),
    };

    result.unwrap_or_else(|err| {
        if err.status().is_server_error() && !matches!(err, ProtocolError::FrameNotReady) {
            ::bevy::log::error!("frame protocol: {err}");
        }
        error_response(&err)
    })
}

fn frame_response(content_type: &str, body: Vec<u8>) -> Result<Response, ProtocolError> {
    Ok(HttpResponse::builder()
        .status(StatusCode::OK)
        .header("Content-Type", content_type)
        .header("X-Frame-Width", RENDER_WIDTH.to_string())
        .header("X-Frame-Height", RENDER_HEIGHT.to_string())
        .header("Access-Control-Allow-Origin", "*")
        .header(
            "Access-Control-Expose-Headers",
            "X-Frame-Width, X-Frame-Height",
        )
        .body(body)?)
}

fn json_response(body: Vec<u8>) -> Result<Response, ProtocolError> {
    Ok(HttpResponse::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(body)?)
}

fn error_response(err: &ProtocolError) -> Response {
    let mut response = HttpResponse::new(err.to_string().into_bytes());
    *response.status_mut() = err.status();
    response
}

fn latest_frame(shared: &SharedState) -> Result<Vec<u8>, ProtocolError> {
    let guard = shared
        .frame_buffer
        .0
        .lock()
        .map_err(|_| ProtocolError::LockPoisoned("frame buffer"))?;
    guard.clone().ok_or(ProtocolError::FrameNotReady)
}

/// Handle JPEG-compressed frame request
fn handle_jpeg_frame(shared: &SharedState, jpeg_quality: u8) -> Result<Response, ProtocolError> {
    let rgba_data = latest_frame(shared)?;
    let jpeg_data = encode_jpeg(rgba_data, jpeg_quality)?;
    frame_response("image/jpeg", jpeg_data)
}

fn encode_jpeg(rgba_data: Vec<u8>, jpeg_quality: u8) -> Result<Vec<u8>, ProtocolError> {
    let len = rgba_data.len();
    let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
        ImageBuffer::from_raw(RENDER_WIDTH, RENDER_HEIGHT, rgba_data)
            .ok_or(ProtocolError::BadFrameSize(len))?;

    // JPEG has no alpha channel
    let rgb_img = image::DynamicImage::ImageRgba8(img).to_rgb8();

    let mut jpeg_data = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg_data, jpeg_quality).write_image(
        rgb_img.as_raw(),
        RENDER_WIDTH,
        RENDER_HEIGHT,
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(jpeg_data)
}

/// Handle raw RGBA frame request
fn handle_raw_frame(shared: &SharedState) -> Result<Response, ProtocolError> {
    frame_response("application/octet-stream", latest_frame(shared)?)
}

/// Handle performance stats request
fn handle_stats(shared: &SharedState) -> Result<Response, ProtocolError> {
    let guard = shared
        .perf_stats
        .0
        .lock()
        .map_err(|_| ProtocolError::LockPoisoned("performance stats"))?;
    json_response(serde_json::to_vec(&*guard)?)
}

/// Handle overlay label request
fn handle_overlays(shared: &SharedState) -> Result<Response, ProtocolError> {
    let guard = shared
        .presentation
        .0
        .lock()
        .map_err(|_| ProtocolError::LockPoisoned("presentation"))?;
    json_response(serde_json::to_vec(&guard.overlays)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tauri_bridge::shared_state::OverlayView;

    fn with_frame(fill: u8) -> SharedState {
        let shared = SharedState::default();
        *shared.frame_buffer.0.lock().unwrap() =
            Some(vec![fill; (RENDER_WIDTH * RENDER_HEIGHT * 4) as usize]);
        shared
    }

    #[test]
    fn test_unknown_resource_is_404() {
        let response = handle_frame_protocol("/nope", &SharedState::default(), 85);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_missing_frame_is_503() {
        let shared = SharedState::default();
        for path in ["/frame", "/frame.jpg", "/frame.raw"] {
            let response = handle_frame_protocol(path, &shared, 85);
            assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE, "{path}");
        }
    }

    #[test]
    fn test_raw_frame_is_passed_through() {
        let shared = with_frame(7);
        let response = handle_frame_protocol("frame.raw", &shared, 85);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.body().len(), (RENDER_WIDTH * RENDER_HEIGHT * 4) as usize);
        assert_eq!(
            response.headers()["Content-Type"],
            "application/octet-stream"
        );
    }

    #[test]
    fn test_jpeg_frame_has_jpeg_magic() {
        let shared = with_frame(200);
        let response = handle_frame_protocol("/frame.jpg", &shared, 85);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(&response.body()[..2], &[0xFF, 0xD8]);
        assert_eq!(response.headers()["X-Frame-Width"], RENDER_WIDTH.to_string().as_str());
    }

    #[test]
    fn test_truncated_frame_is_500() {
        let shared = SharedState::default();
        *shared.frame_buffer.0.lock().unwrap() = Some(vec![0; 16]);
        let response = handle_frame_protocol("/frame", &shared, 85);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_overlays_are_json() {
        let shared = SharedState::default();
        shared.presentation.0.lock().unwrap().overlays.push(OverlayView {
            text: "Hexagon".to_string(),
            x: 400.0,
            y: 120.0,
            visible: true,
        });

        let response = handle_frame_protocol("/overlays", &shared, 85);
        assert_eq!(response.status(), StatusCode::OK);
        let overlays: Vec<OverlayView> = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(overlays.len(), 1);
        assert_eq!(overlays[0].text, "Hexagon");
    }

    #[test]
    fn test_stats_are_json() {
        let shared = SharedState::default();
        shared.perf_stats.0.lock().unwrap().frame_count = 42;
        let response = handle_frame_protocol("stats", &shared, 85);
        let stats: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(stats["frame_count"], 42);
    }
}
