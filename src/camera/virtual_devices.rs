//! Camera backends that do not need hardware: a synthetic test pattern,
//! a still image presented as a live stream, and an always-absent camera.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU8, Ordering};

use super::frame_utils::{from_rgb_image, gradient, mirror_horizontal};
use super::stream::{MediaDevices, MediaStream, MediaTrack};
use super::types::{CameraError, CameraSettings, Frame, Resolution};

/// Produces moving gradient frames at the requested resolution.
#[derive(Debug, Default, Clone)]
pub struct TestPatternDevices {
    resolution: Option<Resolution>,
}

impl TestPatternDevices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always stream at `resolution`, whatever the settings request.
    /// Mimics a camera that does not support the requested size.
    pub fn with_native_resolution(resolution: Resolution) -> Self {
        Self {
            resolution: Some(resolution),
        }
    }
}

impl MediaDevices for TestPatternDevices {
    fn get_user_media(
        &self,
        settings: &CameraSettings,
    ) -> Result<Box<dyn MediaStream>, CameraError> {
        let resolution = self.resolution.unwrap_or(settings.resolution);
        if resolution.width == 0 || resolution.height == 0 {
            return Err(CameraError::StreamFailed(format!(
                "unsupported resolution {}",
                resolution
            )));
        }
        Ok(Box::new(TestPatternStream {
            resolution,
            mirror: settings.mirror,
            phase: AtomicU8::new(0),
            tracks: vec![MediaTrack::new("test-pattern")],
        }))
    }
}

struct TestPatternStream {
    resolution: Resolution,
    mirror: bool,
    phase: AtomicU8,
    tracks: Vec<MediaTrack>,
}

impl MediaStream for TestPatternStream {
    fn tracks(&self) -> Vec<MediaTrack> {
        self.tracks.clone()
    }

    fn resolution(&self) -> Resolution {
        self.resolution
    }

    fn latest_frame(&self) -> Option<Frame> {
        if !self.is_active() {
            return None;
        }
        let phase = self.phase.fetch_add(1, Ordering::Relaxed);
        let mut frame = gradient(self.resolution, phase);
        if self.mirror {
            mirror_horizontal(&mut frame);
        }
        Some(frame)
    }
}

/// Presents one image file as a live camera.
#[derive(Debug, Clone)]
pub struct StillImageDevices {
    path: PathBuf,
}

impl StillImageDevices {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MediaDevices for StillImageDevices {
    fn get_user_media(
        &self,
        settings: &CameraSettings,
    ) -> Result<Box<dyn MediaStream>, CameraError> {
        let decoded = image::open(&self.path).map_err(|e| {
            CameraError::DeviceUnavailable(format!("cannot read '{}': {}", self.path.display(), e))
        })?;
        let mut frame = from_rgb_image(decoded.to_rgb8());
        if settings.mirror {
            mirror_horizontal(&mut frame);
        }
        log::debug!(
            "Serving '{}' as a {}x{} camera stream",
            self.path.display(),
            frame.width,
            frame.height
        );
        Ok(Box::new(StillImageStream {
            frame,
            tracks: vec![MediaTrack::new(self.path.display().to_string())],
        }))
    }
}

struct StillImageStream {
    frame: Frame,
    tracks: Vec<MediaTrack>,
}

impl MediaStream for StillImageStream {
    fn tracks(&self) -> Vec<MediaTrack> {
        self.tracks.clone()
    }

    fn resolution(&self) -> Resolution {
        self.frame.resolution()
    }

    fn latest_frame(&self) -> Option<Frame> {
        self.is_active().then(|| self.frame.clone())
    }
}

/// A system with no camera at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCameraDevices;

impl MediaDevices for NoCameraDevices {
    fn get_user_media(
        &self,
        _settings: &CameraSettings,
    ) -> Result<Box<dyn MediaStream>, CameraError> {
        Err(CameraError::NoDevices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_uses_requested_resolution() {
        let stream = TestPatternDevices::new()
            .get_user_media(&CameraSettings::default())
            .unwrap();
        assert_eq!(stream.resolution(), Resolution::MEDIUM);
        let frame = stream.latest_frame().unwrap();
        assert_eq!(frame.resolution(), Resolution::MEDIUM);
    }

    #[test]
    fn test_pattern_native_resolution_overrides_request() {
        let stream = TestPatternDevices::with_native_resolution(Resolution::LOW)
            .get_user_media(&CameraSettings::default())
            .unwrap();
        assert_eq!(stream.resolution(), Resolution::LOW);
    }

    #[test]
    fn test_stopped_stream_yields_no_frames() {
        let mut stream = TestPatternDevices::new()
            .get_user_media(&CameraSettings::default())
            .unwrap();
        stream.stop();
        assert!(!stream.is_active());
        assert!(stream.latest_frame().is_none());
    }

    #[test]
    fn test_still_image_stream_serves_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("face.png");
        image::RgbImage::from_pixel(12, 10, image::Rgb([200, 150, 100]))
            .save(&path)
            .unwrap();

        let stream = StillImageDevices::new(&path)
            .get_user_media(&CameraSettings::default())
            .unwrap();
        assert_eq!(stream.resolution(), Resolution { width: 12, height: 10 });
        assert_eq!(&stream.latest_frame().unwrap().data[..3], &[200, 150, 100]);
    }

    #[test]
    fn test_still_image_missing_file_is_unavailable() {
        let result = StillImageDevices::new("/nonexistent/face.jpg")
            .get_user_media(&CameraSettings::default());
        match result {
            Err(e) => assert!(e.is_device_unavailable()),
            Ok(_) => panic!("expected missing file to fail"),
        }
    }

    #[test]
    fn test_no_camera_devices() {
        let result = NoCameraDevices.get_user_media(&CameraSettings::default());
        assert!(matches!(result, Err(CameraError::NoDevices)));
    }
}
