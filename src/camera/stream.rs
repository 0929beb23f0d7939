//! Media streams, tracks and the device seam that hands them out.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::types::{CameraError, CameraSettings, Frame, Resolution};

/// Lifecycle state of a single media track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackState {
    /// Track is producing media
    Live,
    /// Track was stopped and will never produce media again
    Ended,
}

/// One track of a media stream.
///
/// Clones share state, so a clone taken before the stream is released
/// observes the track ending.
#[derive(Debug, Clone)]
pub struct MediaTrack {
    label: String,
    ended: Arc<AtomicBool>,
}

impl MediaTrack {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ended: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn state(&self) -> TrackState {
        if self.ended.load(Ordering::SeqCst) {
            TrackState::Ended
        } else {
            TrackState::Live
        }
    }

    pub fn is_live(&self) -> bool {
        self.state() == TrackState::Live
    }

    /// Stop the track. Stopping an ended track does nothing.
    pub fn stop(&self) {
        if !self.ended.swap(true, Ordering::SeqCst) {
            log::debug!("Stopped media track '{}'", self.label);
        }
    }
}

/// A live video stream produced by a [`MediaDevices`] implementation.
pub trait MediaStream: Send {
    /// All tracks that make up this stream.
    fn tracks(&self) -> Vec<MediaTrack>;

    /// Native frame dimensions of the stream.
    fn resolution(&self) -> Resolution;

    /// The most recent frame, or `None` if nothing has been produced yet
    /// or the stream has been stopped.
    fn latest_frame(&self) -> Option<Frame>;

    /// Stop every track and release the underlying device.
    fn stop(&mut self) {
        for track in self.tracks() {
            track.stop();
        }
    }

    /// Whether any track is still live.
    fn is_active(&self) -> bool {
        self.tracks().iter().any(MediaTrack::is_live)
    }
}

impl fmt::Debug for dyn MediaStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaStream")
            .field("resolution", &self.resolution())
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

/// Source of live camera streams.
pub trait MediaDevices: Send + Sync {
    /// Request a live video stream matching `settings` as closely as possible.
    ///
    /// May block until the device opens or the platform's permission prompt
    /// is answered; [`CaptureSessionManager::acquire`](super::CaptureSessionManager::acquire)
    /// runs it on the blocking thread pool.
    ///
    /// # Errors
    /// Returns an error for which [`CameraError::is_device_unavailable`]
    /// holds when the platform denies or lacks camera access.
    fn get_user_media(&self, settings: &CameraSettings)
        -> Result<Box<dyn MediaStream>, CameraError>;
}
