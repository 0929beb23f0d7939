//! Views: capture views backed by a live camera, and the person directory.
//!
//! Each view receives the camera manager, backend client and notifier it
//! needs as arguments; [`App`] owns them all and routes open/close/submit.

mod app;
mod capture_view;
mod directory;
mod recognize;
mod register;

pub use app::{App, ViewKind};
pub use capture_view::{CaptureView, ViewState};
pub use directory::{DeleteOutcome, DeletionView, PersonTableView, DELETE_SUCCESS_MESSAGE};
pub use recognize::{
    format_similarity, render_error, render_matches, RecognitionView, NO_MATCH_MESSAGE,
    RECOGNIZE_SURFACE, RESULTS_HEADING,
};
pub use register::{RegistrationView, REGISTER_SUCCESS_MESSAGE, REGISTER_SURFACE};

use crate::backend::{BackendError, ValidationError};
use crate::camera::CameraError;

/// Why a view action failed. The user has already been told.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("{0}")]
    Camera(#[from] CameraError),

    #[error("{0}")]
    Backend(#[from] BackendError),
}

impl ViewError {
    /// Whether the failure was missing input, caught before any request.
    pub fn is_validation(&self) -> bool {
        matches!(self, ViewError::Backend(e) if e.is_validation())
    }

    /// Whether the camera could not be acquired.
    pub fn is_device_unavailable(&self) -> bool {
        matches!(self, ViewError::Camera(e) if e.is_device_unavailable())
    }
}

impl From<ValidationError> for ViewError {
    fn from(e: ValidationError) -> Self {
        ViewError::Backend(BackendError::Validation(e))
    }
}
