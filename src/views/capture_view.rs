//! Capture view state machine shared by registration and recognition.

use std::fmt;
use std::time::Duration;

use crate::camera::{CameraError, CaptureSessionManager, StillFrame, VideoSurface};
use crate::ui::Notifier;

/// Poll interval while waiting for the first camera frame.
const FRAME_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Visibility/camera state of a capture view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Hidden, no stream bound
    Closed,
    /// Stream requested, not yet bound
    Opening,
    /// Stream bound, capture enabled
    Open,
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewState::Closed => write!(f, "closed"),
            ViewState::Opening => write!(f, "opening"),
            ViewState::Open => write!(f, "open"),
        }
    }
}

/// A view showing a live camera on its own surface.
#[derive(Debug)]
pub struct CaptureView {
    surface: VideoSurface,
    state: ViewState,
}

impl CaptureView {
    pub fn new(surface_name: impl Into<String>) -> Self {
        Self {
            surface: VideoSurface::new(surface_name),
            state: ViewState::Closed,
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ViewState::Open
    }

    pub fn surface(&self) -> &VideoSurface {
        &self.surface
    }

    /// Show the view and bind the camera to its surface.
    ///
    /// On failure the user is told why and the view goes back to closed.
    pub async fn open(
        &mut self,
        sessions: &CaptureSessionManager,
        notifier: &mut dyn Notifier,
    ) -> Result<(), CameraError> {
        self.state = ViewState::Opening;
        match sessions.acquire(&mut self.surface).await {
            Ok(()) => {
                self.state = ViewState::Open;
                Ok(())
            }
            Err(e) => {
                self.state = ViewState::Closed;
                notifier.alert(&format!("Cannot access camera: {}", e));
                Err(e)
            }
        }
    }

    /// Hide the view, releasing the camera. Safe to call when already closed.
    pub fn close(&mut self, sessions: &CaptureSessionManager) {
        sessions.release(&mut self.surface);
        self.state = ViewState::Closed;
    }

    /// Snapshot the live stream. Only allowed while the view is open.
    pub fn capture(&self, sessions: &CaptureSessionManager) -> Result<StillFrame, CameraError> {
        if !self.is_open() {
            return Err(CameraError::NotStreaming);
        }
        sessions.snapshot(&self.surface)
    }

    /// Wait until the stream has produced a frame, up to `timeout`.
    ///
    /// Returns false on timeout or when the view is not open.
    pub async fn wait_for_frame(&self, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let ready = self.is_open()
                && self
                    .surface
                    .src_object()
                    .is_some_and(|stream| stream.latest_frame().is_some());
            if ready {
                return true;
            }
            if !self.is_open() || tokio::time::Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(FRAME_POLL_INTERVAL).await;
        }
    }
}
