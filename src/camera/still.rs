//! Still frames: single JPEG snapshots of a live stream.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;

use super::frame_utils::check_layout;
use super::types::{CameraError, Frame};

/// MIME type of every still frame.
pub const STILL_FRAME_MIME: &str = "image/jpeg";

/// An immutable JPEG-encoded snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StillFrame {
    jpeg: Vec<u8>,
    width: u32,
    height: u32,
}

impl StillFrame {
    /// Encode a raw frame at its native resolution.
    ///
    /// `quality` is clamped to 1-100.
    pub fn encode(frame: &Frame, quality: u8) -> Result<Self, CameraError> {
        check_layout(frame)?;

        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, quality.clamp(1, 100))
            .encode(&frame.data, frame.width, frame.height, ExtendedColorType::Rgb8)
            .map_err(|e| CameraError::EncodeFailed(e.to_string()))?;

        Ok(Self {
            jpeg,
            width: frame.width,
            height: frame.height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Encoded JPEG bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.jpeg
    }

    /// Self-describing `data:` URL, the form embedded in request bodies.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", STILL_FRAME_MIME, STANDARD.encode(&self.jpeg))
    }
}
