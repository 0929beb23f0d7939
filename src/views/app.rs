//! The application's view-state store.

use std::fmt;

use super::directory::{DeleteOutcome, DeletionView, PersonTableView};
use super::recognize::RecognitionView;
use super::register::RegistrationView;
use super::ViewError;
use crate::backend::{RecognitionClient, RecognitionMatch};
use crate::camera::CaptureSessionManager;
use crate::ui::Notifier;

/// The views a user can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Register,
    Recognize,
    Delete,
    List,
}

impl ViewKind {
    pub const ALL: [ViewKind; 4] = [
        ViewKind::Register,
        ViewKind::Recognize,
        ViewKind::Delete,
        ViewKind::List,
    ];

    /// Whether the view shows a live camera.
    pub fn uses_camera(self) -> bool {
        matches!(self, ViewKind::Register | ViewKind::Recognize)
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKind::Register => write!(f, "register"),
            ViewKind::Recognize => write!(f, "recognize"),
            ViewKind::Delete => write!(f, "delete"),
            ViewKind::List => write!(f, "list"),
        }
    }
}

/// Owns every view together with the camera, backend client and notifier
/// they share.
pub struct App<N: Notifier> {
    sessions: CaptureSessionManager,
    client: RecognitionClient,
    notifier: N,
    register: RegistrationView,
    recognize: RecognitionView,
    delete: DeletionView,
    list: PersonTableView,
    reloads: u32,
}

impl<N: Notifier> App<N> {
    pub fn new(sessions: CaptureSessionManager, client: RecognitionClient, notifier: N) -> Self {
        Self {
            sessions,
            client,
            notifier,
            register: RegistrationView::new(),
            recognize: RecognitionView::new(),
            delete: DeletionView::new(),
            list: PersonTableView::new(),
            reloads: 0,
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn register_view(&self) -> &RegistrationView {
        &self.register
    }

    pub fn register_view_mut(&mut self) -> &mut RegistrationView {
        &mut self.register
    }

    pub fn recognize_view(&self) -> &RecognitionView {
        &self.recognize
    }

    pub fn delete_view(&self) -> &DeletionView {
        &self.delete
    }

    pub fn delete_view_mut(&mut self) -> &mut DeletionView {
        &mut self.delete
    }

    pub fn list_view(&self) -> &PersonTableView {
        &self.list
    }

    /// How many times the whole state has been rebuilt.
    pub fn reload_count(&self) -> u32 {
        self.reloads
    }

    pub fn is_open(&self, kind: ViewKind) -> bool {
        match kind {
            ViewKind::Register => self.register.capture_view().is_open(),
            ViewKind::Recognize => self.recognize.capture_view().is_open(),
            ViewKind::Delete => self.delete.is_open(),
            ViewKind::List => self.list.is_open(),
        }
    }

    /// Open a view: capture views bind the camera, directory views fetch
    /// their data.
    pub async fn open(&mut self, kind: ViewKind) -> Result<(), ViewError> {
        if kind.uses_camera() {
            log::debug!("Opening {} view, requesting camera", kind);
        } else {
            log::debug!("Opening {} view, loading persons", kind);
        }
        match kind {
            ViewKind::Register => self.register.open(&self.sessions, &mut self.notifier).await,
            ViewKind::Recognize => self.recognize.open(&self.sessions, &mut self.notifier).await,
            ViewKind::Delete => self.delete.open(&self.client, &mut self.notifier).await,
            ViewKind::List => self.list.open(&self.client, &mut self.notifier).await,
        }
    }

    /// Close a view. Capture views release the camera.
    pub fn close(&mut self, kind: ViewKind) {
        log::debug!("Closing {} view", kind);
        match kind {
            ViewKind::Register => self.register.close(&self.sessions),
            ViewKind::Recognize => self.recognize.close(&self.sessions),
            ViewKind::Delete => self.delete.close(),
            ViewKind::List => self.list.close(),
        }
    }

    pub async fn submit_registration(&mut self) -> Result<(), ViewError> {
        self.register
            .submit(&self.sessions, &self.client, &mut self.notifier)
            .await
    }

    pub async fn submit_recognition(&mut self) -> Result<Vec<RecognitionMatch>, ViewError> {
        self.recognize
            .submit(&self.sessions, &self.client, &mut self.notifier)
            .await
    }

    /// Delete the person selected in the deletion view. A successful delete
    /// reloads the whole application state.
    pub async fn delete_selected(&mut self) -> Result<DeleteOutcome, ViewError> {
        let outcome = self
            .delete
            .delete_selected(&self.client, &mut self.notifier)
            .await?;
        match &outcome {
            DeleteOutcome::Reload { .. } => self.reload(),
        }
        Ok(outcome)
    }

    /// Close every view (releasing the camera) and start over from fresh views.
    pub fn reload(&mut self) {
        for kind in ViewKind::ALL {
            self.close(kind);
        }
        self.register = RegistrationView::new();
        self.recognize = RecognitionView::new();
        self.delete = DeletionView::new();
        self.list = PersonTableView::new();
        self.reloads += 1;
        log::info!("Application state reloaded");
    }
}
