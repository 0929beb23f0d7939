//! Registration view: enroll a person from a live snapshot.

use super::capture_view::CaptureView;
use super::ViewError;
use crate::backend::{validate_registration, RecognitionClient};
use crate::camera::CaptureSessionManager;
use crate::ui::{Notifier, TextInput};

pub const REGISTER_SURFACE: &str = "registerVideo";
pub const REGISTER_SUCCESS_MESSAGE: &str = "Face registered successfully!";

#[derive(Debug)]
pub struct RegistrationView {
    capture: CaptureView,
    pub id_input: TextInput,
    pub name_input: TextInput,
}

impl Default for RegistrationView {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationView {
    pub fn new() -> Self {
        Self {
            capture: CaptureView::new(REGISTER_SURFACE),
            id_input: TextInput::new(),
            name_input: TextInput::new(),
        }
    }

    pub fn capture_view(&self) -> &CaptureView {
        &self.capture
    }

    pub async fn open(
        &mut self,
        sessions: &CaptureSessionManager,
        notifier: &mut dyn Notifier,
    ) -> Result<(), ViewError> {
        Ok(self.capture.open(sessions, notifier).await?)
    }

    pub fn close(&mut self, sessions: &CaptureSessionManager) {
        self.capture.close(sessions);
    }

    /// Validate the inputs, snapshot the camera and send the registration.
    ///
    /// On success the view closes and both inputs are cleared. Every
    /// failure is shown to the user through `notifier` and returned.
    pub async fn submit(
        &mut self,
        sessions: &CaptureSessionManager,
        client: &RecognitionClient,
        notifier: &mut dyn Notifier,
    ) -> Result<(), ViewError> {
        let (id, name) = match validate_registration(self.id_input.value(), self.name_input.value())
        {
            Ok(fields) => fields,
            Err(e) => {
                notifier.alert(&e.to_string());
                return Err(ViewError::from(e));
            }
        };

        let frame = match self.capture.capture(sessions) {
            Ok(frame) => frame,
            Err(e) => {
                notifier.alert(&format!("Could not capture image: {}", e));
                return Err(e.into());
            }
        };

        match client.register(&id, &name, &frame).await {
            Ok(()) => {
                notifier.alert(REGISTER_SUCCESS_MESSAGE);
                self.capture.close(sessions);
                self.id_input.clear();
                self.name_input.clear();
                Ok(())
            }
            Err(e) => {
                notifier.alert(&e.user_message());
                Err(e.into())
            }
        }
    }
}
