//! Capture session management: binding camera streams to surfaces.

use std::fmt;
use std::sync::Arc;

use super::stream::MediaDevices;
use super::surface::VideoSurface;
use super::still::StillFrame;
use super::types::{CameraError, CameraSettings};

/// Acquires, releases and snapshots camera streams on display surfaces.
pub struct CaptureSessionManager {
    devices: Arc<dyn MediaDevices>,
    settings: CameraSettings,
}

impl fmt::Debug for CaptureSessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureSessionManager")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl CaptureSessionManager {
    pub fn new(devices: Box<dyn MediaDevices>, settings: CameraSettings) -> Self {
        Self {
            devices: Arc::from(devices),
            settings,
        }
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    /// Request a live stream from the camera and bind it to `surface`.
    ///
    /// A stream still bound from an earlier session is released first, so a
    /// surface never holds two streams. Opening the device (and any
    /// permission prompt) runs on the blocking pool; the calling task is
    /// suspended meanwhile and the runtime keeps serving other tasks.
    ///
    /// # Errors
    /// Returns the device error when the platform denies or lacks camera
    /// access. The surface is left unbound in that case.
    pub async fn acquire(&self, surface: &mut VideoSurface) -> Result<(), CameraError> {
        if surface.is_bound() {
            log::warn!(
                "Surface '{}' still has a bound stream, releasing it before reopening",
                surface.name()
            );
            self.release(surface);
        }

        let devices = Arc::clone(&self.devices);
        let settings = self.settings.clone();
        let opened = tokio::task::spawn_blocking(move || devices.get_user_media(&settings))
            .await
            .map_err(|e| CameraError::StreamFailed(format!("camera open task failed: {}", e)))?;

        match opened {
            Ok(stream) => {
                log::info!(
                    "Camera stream bound to '{}' at {}",
                    surface.name(),
                    stream.resolution()
                );
                surface.bind(stream);
                Ok(())
            }
            Err(e) => {
                log::warn!("Could not acquire camera for '{}': {}", surface.name(), e);
                Err(e)
            }
        }
    }

    /// Stop every track of the bound stream and clear the binding.
    ///
    /// Does nothing if no stream is bound.
    pub fn release(&self, surface: &mut VideoSurface) {
        if let Some(mut stream) = surface.unbind() {
            stream.stop();
            log::info!("Camera stream released from '{}'", surface.name());
        }
    }

    /// Encode the surface's current frame at the stream's native resolution.
    ///
    /// # Errors
    /// * `CameraError::NotStreaming` - no stream bound, or it has stopped
    /// * `CameraError::NoFrame` - the stream has not produced a frame yet
    /// * `CameraError::EncodeFailed` - JPEG encoding failed
    pub fn snapshot(&self, surface: &VideoSurface) -> Result<StillFrame, CameraError> {
        let stream = surface.src_object().ok_or(CameraError::NotStreaming)?;
        if !stream.is_active() {
            return Err(CameraError::NotStreaming);
        }
        let frame = stream.latest_frame().ok_or(CameraError::NoFrame)?;
        let still = StillFrame::encode(&frame, self.settings.jpeg_quality)?;
        log::debug!(
            "Captured {}x{} still from '{}' ({} bytes)",
            still.width(),
            still.height(),
            surface.name(),
            still.as_bytes().len()
        );
        Ok(still)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{NoCameraDevices, Resolution, TestPatternDevices, TrackState};

    fn manager() -> CaptureSessionManager {
        CaptureSessionManager::new(Box::new(TestPatternDevices::new()), CameraSettings::default())
    }

    #[test]
    fn test_release_unbound_surface_is_noop() {
        let sessions = manager();
        let mut surface = VideoSurface::new("registerVideo");
        sessions.release(&mut surface);
        sessions.release(&mut surface);
        assert!(!surface.is_bound());
    }

    #[tokio::test]
    async fn test_acquire_then_release_stops_all_tracks() {
        let sessions = manager();
        let mut surface = VideoSurface::new("registerVideo");
        sessions.acquire(&mut surface).await.unwrap();
        let tracks = surface.src_object().unwrap().tracks();
        assert!(!tracks.is_empty());
        assert!(tracks.iter().all(|t| t.state() == TrackState::Live));

        sessions.release(&mut surface);
        assert!(!surface.is_bound());
        assert!(tracks.iter().all(|t| t.state() == TrackState::Ended));
    }

    #[tokio::test]
    async fn test_acquire_on_bound_surface_releases_previous_stream() {
        let sessions = manager();
        let mut surface = VideoSurface::new("recognizeVideo");
        sessions.acquire(&mut surface).await.unwrap();
        let first = surface.src_object().unwrap().tracks();

        sessions.acquire(&mut surface).await.unwrap();
        assert!(first.iter().all(|t| !t.is_live()));
        assert!(surface.src_object().unwrap().is_active());
    }

    #[tokio::test]
    async fn test_acquire_failure_leaves_surface_unbound() {
        let sessions =
            CaptureSessionManager::new(Box::new(NoCameraDevices), CameraSettings::default());
        let mut surface = VideoSurface::new("registerVideo");
        let err = sessions.acquire(&mut surface).await.unwrap_err();
        assert!(err.is_device_unavailable());
        assert!(!surface.is_bound());
    }

    #[tokio::test]
    async fn test_snapshot_matches_native_resolution() {
        let settings = CameraSettings {
            resolution: Resolution::LOW,
            ..CameraSettings::default()
        };
        let sessions = CaptureSessionManager::new(Box::new(TestPatternDevices::new()), settings);
        let mut surface = VideoSurface::new("registerVideo");
        sessions.acquire(&mut surface).await.unwrap();

        let still = sessions.snapshot(&surface).unwrap();
        let native = surface.src_object().unwrap().resolution();
        assert_eq!(still.width(), native.width);
        assert_eq!(still.height(), native.height);
    }

    #[test]
    fn test_snapshot_without_stream_fails() {
        let sessions = manager();
        let surface = VideoSurface::new("registerVideo");
        assert!(matches!(
            sessions.snapshot(&surface),
            Err(CameraError::NotStreaming)
        ));
    }

    #[tokio::test]
    async fn test_dropping_surface_stops_stream() {
        let sessions = manager();
        let mut surface = VideoSurface::new("registerVideo");
        sessions.acquire(&mut surface).await.unwrap();
        let tracks = surface.src_object().unwrap().tracks();
        drop(surface);
        assert!(tracks.iter().all(|t| !t.is_live()));
    }
}
