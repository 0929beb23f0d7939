//! Camera capture: live streams bound to display surfaces, and snapshots.
//!
//! - Stream sources implement [`MediaDevices`]: [`TestPatternDevices`],
//!   [`StillImageDevices`], [`NoCameraDevices`] and, with the
//!   `native-camera` feature, `NativeDevices`
//! - [`CaptureSessionManager`] binds streams to a [`VideoSurface`],
//!   releases them, and snapshots them into a [`StillFrame`]

mod device;
mod frame_utils;
#[cfg(feature = "native-camera")]
mod native;
mod session;
mod still;
mod stream;
mod surface;
mod types;
mod virtual_devices;

pub use device::list_devices;
#[cfg(feature = "native-camera")]
pub use native::NativeDevices;
pub use session::CaptureSessionManager;
pub use still::{StillFrame, STILL_FRAME_MIME};
pub use stream::{MediaDevices, MediaStream, MediaTrack, TrackState};
pub use surface::VideoSurface;
pub use types::{
    CameraError, CameraInfo, CameraSettings, Frame, FrameFormat, Resolution,
    DEFAULT_JPEG_QUALITY,
};
pub use virtual_devices::{NoCameraDevices, StillImageDevices, TestPatternDevices};
