//! Recognition view: match a live snapshot against enrolled persons.

use super::capture_view::CaptureView;
use super::ViewError;
use crate::backend::{BackendError, RecognitionClient, RecognitionMatch};
use crate::camera::CaptureSessionManager;
use crate::ui::{Notifier, ResultsPanel};

pub const RECOGNIZE_SURFACE: &str = "recognizeVideo";
pub const RESULTS_HEADING: &str = "Recognition results:";
pub const NO_MATCH_MESSAGE: &str = "No matching face found";

/// Format a similarity score in [0, 1] as a percentage with two decimals.
///
/// Ties round up (0.125% shows as 0.13%); `{:.2}` alone would round them
/// to even.
pub fn format_similarity(similarity: f64) -> String {
    let percent = similarity * 100.0;
    format!("{:.2}%", (percent * 100.0).round() / 100.0)
}

/// Lines shown for a successful recognition.
pub fn render_matches(matches: &[RecognitionMatch]) -> Vec<String> {
    if matches.is_empty() {
        return vec![NO_MATCH_MESSAGE.to_string()];
    }
    std::iter::once(RESULTS_HEADING.to_string())
        .chain(matches.iter().map(|m| {
            format!(
                "ID: {}, Name: {} (Similarity: {})",
                m.id,
                m.name,
                format_similarity(m.similarity)
            )
        }))
        .collect()
}

/// Lines shown for a failed recognition: backend text as-is, transport
/// failures with a connectivity prefix.
pub fn render_error(error: &BackendError) -> Vec<String> {
    vec![error.user_message()]
}

#[derive(Debug)]
pub struct RecognitionView {
    capture: CaptureView,
    pub results: ResultsPanel,
}

impl Default for RecognitionView {
    fn default() -> Self {
        Self::new()
    }
}

impl RecognitionView {
    pub fn new() -> Self {
        Self {
            capture: CaptureView::new(RECOGNIZE_SURFACE),
            results: ResultsPanel::new(),
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

    /// Snapshot the camera and send it for recognition.
    ///
    /// Results, an explicit no-match line, or the error text end up in
    /// [`RecognitionView::results`]. The view closes only on success.
    pub async fn submit(
        &mut self,
        sessions: &CaptureSessionManager,
        client: &RecognitionClient,
        notifier: &mut dyn Notifier,
    ) -> Result<Vec<RecognitionMatch>, ViewError> {
        let frame = match self.capture.capture(sessions) {
            Ok(frame) => frame,
            Err(e) => {
                notifier.alert(&format!("Could not capture image: {}", e));
                return Err(e.into());
            }
        };

        match client.recognize(&frame).await {
            Ok(matches) => {
                self.results.set_lines(render_matches(&matches));
                self.capture.close(sessions);
                Ok(matches)
            }
            Err(e) => {
                self.results.set_lines(render_error(&e));
                Err(e.into())
            }
        }
    }
}
