//! Camera types and data structures.

use std::fmt;
use std::time::Instant;

/// Information about an available camera device.
#[derive(Debug, Clone)]
pub struct CameraInfo {
    /// Device index for selection
    pub index: u32,
    /// Human-readable device name
    pub name: String,
    /// Device description
    pub description: String,
}

impl fmt::Display for CameraInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.index, self.name, self.description)
    }
}

/// Camera resolution settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// Low resolution (320x240)
    pub const LOW: Resolution = Resolution {
        width: 320,
        height: 240,
    };

    /// Medium resolution (640x480) - enough for face enrollment
    pub const MEDIUM: Resolution = Resolution {
        width: 640,
        height: 480,
    };

    /// High resolution (1280x720)
    pub const HIGH: Resolution = Resolution {
        width: 1280,
        height: 720,
    };

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::MEDIUM
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Pixel format of a captured frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFormat {
    /// RGB format (3 bytes per pixel)
    Rgb,
}

/// A captured camera frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Raw pixel data in RGB format
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Pixel format
    pub format: FrameFormat,
    /// Timestamp when frame was captured
    pub timestamp: Instant,
}

impl Frame {
    /// Build an RGB frame from raw pixel data.
    pub fn rgb(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            data,
            width,
            height,
            format: FrameFormat::Rgb,
            timestamp: Instant::now(),
        }
    }

    /// Get the number of bytes per pixel (3 for RGB).
    pub fn bytes_per_pixel(&self) -> usize {
        match self.format {
            FrameFormat::Rgb => 3,
        }
    }

    pub fn resolution(&self) -> Resolution {
        Resolution {
            width: self.width,
            height: self.height,
        }
    }
}

/// Default JPEG quality, matching what browsers use for `image/jpeg` snapshots.
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// Settings for camera capture.
#[derive(Debug, Clone)]
pub struct CameraSettings {
    /// Camera device index
    pub device_index: u32,
    /// Requested capture resolution (the device may pick a different one)
    pub resolution: Resolution,
    /// Target FPS (actual may vary)
    pub fps: u32,
    /// Mirror horizontally. Applies to snapshots as well as the live view.
    pub mirror: bool,
    /// JPEG quality for still frames, 1-100
    pub jpeg_quality: u8,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            device_index: 0,
            resolution: Resolution::default(),
            fps: 30,
            mirror: false,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Errors that can occur during camera operations.
#[derive(Debug)]
pub enum CameraError {
    /// No cameras found on the system
    NoDevices,
    /// Failed to query camera devices
    QueryFailed(String),
    /// Failed to open camera
    OpenFailed(String),
    /// Camera permission denied by the platform
    PermissionDenied,
    /// Camera device not found at specified index
    DeviceNotFound(u32),
    /// Failed to start video stream
    StreamFailed(String),
    /// No usable camera backend (or source) is available
    DeviceUnavailable(String),
    /// Surface has no live stream bound to it
    NotStreaming,
    /// Stream is bound but has not produced a frame yet
    NoFrame,
    /// Failed to encode a still frame
    EncodeFailed(String),
}

impl CameraError {
    /// Whether this error means the camera could not be acquired at all.
    pub fn is_device_unavailable(&self) -> bool {
        matches!(
            self,
            CameraError::NoDevices
                | CameraError::QueryFailed(_)
                | CameraError::OpenFailed(_)
                | CameraError::PermissionDenied
                | CameraError::DeviceNotFound(_)
                | CameraError::StreamFailed(_)
                | CameraError::DeviceUnavailable(_)
        )
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::NoDevices => write!(f, "No cameras found"),
            CameraError::QueryFailed(msg) => write!(f, "Failed to query cameras: {}", msg),
            CameraError::OpenFailed(msg) => write!(f, "Failed to open camera: {}", msg),
            CameraError::PermissionDenied => {
                write!(
                    f,
                    "Camera permission denied. Grant camera access to this application and try again"
                )
            }
            CameraError::DeviceNotFound(index) => {
                write!(
                    f,
                    "Camera device {} not found. Run 'facecheck list-cameras' to see available devices",
                    index
                )
            }
            CameraError::StreamFailed(msg) => write!(f, "Failed to start camera stream: {}", msg),
            CameraError::DeviceUnavailable(msg) => write!(f, "Camera unavailable: {}", msg),
            CameraError::NotStreaming => write!(f, "No camera stream is active"),
            CameraError::NoFrame => write!(f, "Camera has not produced a frame yet"),
            CameraError::EncodeFailed(msg) => write!(f, "Failed to encode still frame: {}", msg),
        }
    }
}

impl std::error::Error for CameraError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_info_display() {
        let info = CameraInfo {
            index: 0,
            name: "Test Camera".to_string(),
            description: "Built-in".to_string(),
        };
        assert_eq!(format!("{}", info), "[0] Test Camera (Built-in)");
    }

    #[test]
    fn test_resolution_default_and_display() {
        let res = Resolution::default();
        assert_eq!(res, Resolution::MEDIUM);
        assert_eq!(res.to_string(), "640x480");
        assert_eq!(res.pixel_count(), 640 * 480);
    }

    #[test]
    fn test_camera_settings_default() {
        let settings = CameraSettings::default();
        assert_eq!(settings.device_index, 0);
        assert_eq!(settings.resolution, Resolution::MEDIUM);
        assert_eq!(settings.fps, 30);
        assert!(!settings.mirror);
        assert_eq!(settings.jpeg_quality, 92);
    }

    #[test]
    fn test_camera_error_display() {
        assert_eq!(format!("{}", CameraError::NoDevices), "No cameras found");
        assert_eq!(
            format!("{}", CameraError::OpenFailed("test".to_string())),
            "Failed to open camera: test"
        );
        assert!(format!("{}", CameraError::PermissionDenied).contains("permission denied"));
        assert!(format!("{}", CameraError::DeviceNotFound(5)).contains("5"));
        assert_eq!(
            format!("{}", CameraError::NotStreaming),
            "No camera stream is active"
        );
    }

    #[test]
    fn test_device_unavailable_classification() {
        assert!(CameraError::PermissionDenied.is_device_unavailable());
        assert!(CameraError::DeviceNotFound(1).is_device_unavailable());
        assert!(CameraError::DeviceUnavailable("x".into()).is_device_unavailable());
        assert!(!CameraError::NotStreaming.is_device_unavailable());
        assert!(!CameraError::NoFrame.is_device_unavailable());
        assert!(!CameraError::EncodeFailed("x".into()).is_device_unavailable());
    }

    #[test]
    fn test_frame_rgb_constructor() {
        let frame = Frame::rgb(2, 1, vec![0; 6]);
        assert_eq!(frame.bytes_per_pixel(), 3);
        assert_eq!(frame.resolution(), Resolution { width: 2, height: 1 });
    }
}
