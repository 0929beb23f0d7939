//! Face registration/recognition backend integration.
//!
//! The backend is an external HTTP service with five JSON endpoints
//! (`/register`, `/recognize`, `/list`, `/persons`, `/delete`). Every
//! response carries a `status` discriminator; anything other than
//! `"success"` comes with a `message` meant for the user.

mod client;
mod error;
mod types;

pub use client::{validate_registration, RecognitionClient, BACKEND_URL_ENV, DEFAULT_BACKEND_URL};
pub use error::{BackendError, ValidationError};
pub use types::{PersonRow, PersonSummary, RecognitionMatch, STATUS_SUCCESS};
