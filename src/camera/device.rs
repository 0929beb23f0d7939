//! Camera device enumeration.

use super::types::{CameraError, CameraInfo};

/// List all available camera devices on the system.
#[cfg(feature = "native-camera")]
pub fn list_devices() -> Result<Vec<CameraInfo>, CameraError> {
    super::native::list_devices()
}

/// List all available camera devices on the system.
///
/// Without the `native-camera` feature there is no hardware backend to ask.
#[cfg(not(feature = "native-camera"))]
pub fn list_devices() -> Result<Vec<CameraInfo>, CameraError> {
    Err(CameraError::QueryFailed(
        "built without the native-camera feature".to_string(),
    ))
}
