//! Webcam backend built on nokhwa.
//!
//! Each stream owns a background thread that holds the device, decodes
//! frames to RGB and keeps the latest one in a shared buffer. Stopping the
//! stream joins the thread, which closes the device.

use nokhwa::pixel_format::RgbFormat;
use nokhwa::query;
use nokhwa::utils::{
    ApiBackend, CameraFormat, CameraIndex, FrameFormat as NokhwaFrameFormat, RequestedFormat,
    RequestedFormatType,
};
use nokhwa::Camera;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::frame_utils::mirror_horizontal;
use super::stream::{MediaDevices, MediaStream, MediaTrack};
use super::types::{CameraError, CameraInfo, CameraSettings, Frame, Resolution};

/// List all available camera devices on the system.
///
/// If no cameras are found, returns an empty vector (not an error).
pub fn list_devices() -> Result<Vec<CameraInfo>, CameraError> {
    let devices = query(ApiBackend::Auto).map_err(|e| CameraError::QueryFailed(e.to_string()))?;

    Ok(devices
        .into_iter()
        .map(|d| CameraInfo {
            index: d.index().as_index().unwrap_or(0),
            name: d.human_name(),
            description: d.description().to_string(),
        })
        .collect())
}

/// The platform's webcams.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeDevices;

impl MediaDevices for NativeDevices {
    fn get_user_media(
        &self,
        settings: &CameraSettings,
    ) -> Result<Box<dyn MediaStream>, CameraError> {
        let devices = list_devices()?;
        if devices.is_empty() {
            return Err(CameraError::NoDevices);
        }
        if !devices.iter().any(|d| d.index == settings.device_index) {
            return Err(CameraError::DeviceNotFound(settings.device_index));
        }
        Ok(Box::new(NativeStream::start(settings.clone())?))
    }
}

struct NativeStream {
    frame_buffer: Arc<Mutex<Option<Frame>>>,
    capture_thread: Option<JoinHandle<()>>,
    stop_signal: Arc<AtomicBool>,
    resolution: Resolution,
    tracks: Vec<MediaTrack>,
}

impl NativeStream {
    /// Spawn the capture thread and wait for it to report the opened format.
    fn start(settings: CameraSettings) -> Result<Self, CameraError> {
        let buffer = Arc::new(Mutex::new(None));
        let stop = Arc::new(AtomicBool::new(false));
        let (info_tx, info_rx) = mpsc::channel::<Result<Resolution, CameraError>>();

        let thread_buffer = Arc::clone(&buffer);
        let thread_stop = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            run_capture_loop(settings, thread_buffer, thread_stop, info_tx);
        });

        let resolution = match info_rx.recv() {
            Ok(Ok(res)) => res,
            Ok(Err(e)) => {
                stop.store(true, Ordering::SeqCst);
                let _ = handle.join();
                return Err(e);
            }
            Err(_) => {
                stop.store(true, Ordering::SeqCst);
                let _ = handle.join();
                return Err(CameraError::StreamFailed(
                    "Capture thread terminated unexpectedly".to_string(),
                ));
            }
        };

        Ok(Self {
            frame_buffer: buffer,
            capture_thread: Some(handle),
            stop_signal: stop,
            resolution,
            tracks: vec![MediaTrack::new("webcam")],
        })
    }
}

impl MediaStream for NativeStream {
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
        let buffer = self.frame_buffer.lock().ok()?;
        buffer.clone()
    }

    fn stop(&mut self) {
        self.stop_signal.store(true, Ordering::SeqCst);
        if let Some(handle) = self.capture_thread.take() {
            let _ = handle.join();
        }
        for track in &self.tracks {
            track.stop();
        }
    }
}

impl Drop for NativeStream {
    fn drop(&mut self) {
        MediaStream::stop(self);
    }
}

fn run_capture_loop(
    settings: CameraSettings,
    buffer: Arc<Mutex<Option<Frame>>>,
    stop: Arc<AtomicBool>,
    info_tx: Sender<Result<Resolution, CameraError>>,
) {
    let index = CameraIndex::Index(settings.device_index);

    let mut camera = match open_camera_with_fallback(&index, &settings) {
        Ok(cam) => cam,
        Err(e) => {
            let _ = info_tx.send(Err(e));
            return;
        }
    };

    if let Err(e) = camera.open_stream() {
        let _ = info_tx.send(Err(classify_open_error(&e.to_string())));
        return;
    }

    let res = camera.resolution();
    let _ = info_tx.send(Ok(Resolution {
        width: res.width(),
        height: res.height(),
    }));

    while !stop.load(Ordering::Relaxed) {
        if let Ok(raw_frame) = camera.frame() {
            // Frames that fail to decode are skipped
            if let Some(mut frame) = convert_to_rgb(&raw_frame) {
                if settings.mirror {
                    mirror_horizontal(&mut frame);
                }
                if let Ok(mut buf) = buffer.lock() {
                    *buf = Some(frame);
                }
            }
        }
        thread::sleep(Duration::from_millis(1));
    }

    let _ = camera.stop_stream();
    log::debug!("Capture thread for camera {} exited", settings.device_index);
}

fn convert_to_rgb(buffer: &nokhwa::Buffer) -> Option<Frame> {
    let decoded = buffer.decode_image::<RgbFormat>().ok()?;
    let resolution = buffer.resolution();
    Some(Frame::rgb(
        resolution.width(),
        resolution.height(),
        decoded.into_raw(),
    ))
}

/// Try MJPEG first, then let the camera pick its highest resolution.
fn open_camera_with_fallback(
    index: &CameraIndex,
    settings: &CameraSettings,
) -> Result<Camera, CameraError> {
    let requested_resolution =
        nokhwa::utils::Resolution::new(settings.resolution.width, settings.resolution.height);
    let format_attempts = [
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(CameraFormat::new(
            requested_resolution,
            NokhwaFrameFormat::MJPEG,
            settings.fps,
        ))),
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(CameraFormat::new(
            requested_resolution,
            NokhwaFrameFormat::YUYV,
            settings.fps,
        ))),
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution),
    ];

    let mut last_error = String::from("no format attempted");
    for requested in format_attempts {
        match Camera::new(index.clone(), requested) {
            Ok(cam) => return Ok(cam),
            Err(e) => last_error = e.to_string(),
        }
    }
    Err(classify_open_error(&last_error))
}

fn classify_open_error(message: &str) -> CameraError {
    let msg = message.to_lowercase();
    if msg.contains("permission")
        || msg.contains("denied")
        || msg.contains("authorization")
        || msg.contains("access")
    {
        CameraError::PermissionDenied
    } else {
        CameraError::OpenFailed(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_devices_does_not_error() {
        // Returns an empty list on machines without cameras
        assert!(list_devices().is_ok());
    }

    #[test]
    fn test_classify_open_error() {
        assert!(matches!(
            classify_open_error("Access denied by user"),
            CameraError::PermissionDenied
        ));
        assert!(matches!(
            classify_open_error("device busy"),
            CameraError::OpenFailed(_)
        ));
    }

    #[test]
    fn test_invalid_device_index_is_not_found() {
        let settings = CameraSettings {
            device_index: 999,
            ..CameraSettings::default()
        };
        match NativeDevices.get_user_media(&settings) {
            Err(e) => assert!(e.is_device_unavailable()),
            Ok(_) => panic!("device 999 should not exist"),
        }
    }
}
