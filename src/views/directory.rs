//! Person directory views: the deletion chooser and the full person table.
//!
//! Both are fetched fresh every time they open.

use super::ViewError;
use crate::backend::{RecognitionClient, ValidationError};
use crate::ui::{Notifier, PersonChooser, PersonTable, TableRow};

/// Shown after a delete when the backend sends no confirmation text.
pub const DELETE_SUCCESS_MESSAGE: &str = "Person deleted successfully";

/// What the caller should do after a deletion attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The person was deleted; every view must be rebuilt from scratch.
    Reload {
        /// Backend confirmation text
        message: String,
    },
}

/// Chooser of persons plus the delete action.
#[derive(Debug, Default)]
pub struct DeletionView {
    pub chooser: PersonChooser,
    visible: bool,
}

impl DeletionView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.visible
    }

    /// Show the view and load the selection list.
    ///
    /// The chooser is reset to the placeholder first, so a failed load
    /// leaves only the placeholder.
    pub async fn open(
        &mut self,
        client: &RecognitionClient,
        notifier: &mut dyn Notifier,
    ) -> Result<(), ViewError> {
        self.visible = true;
        self.chooser.reset();

        match client.list_persons().await {
            Ok(persons) => {
                for person in persons {
                    self.chooser.push(person.id, person.name);
                }
                Ok(())
            }
            Err(e) => {
                if !e.is_remote() {
                    log::error!("Failed to load person list: {}", e);
                }
                notifier.alert(&e.user_message());
                Err(e.into())
            }
        }
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Delete the selected person.
    ///
    /// Without a selection the user is prompted and nothing is sent.
    pub async fn delete_selected(
        &mut self,
        client: &RecognitionClient,
        notifier: &mut dyn Notifier,
    ) -> Result<DeleteOutcome, ViewError> {
        let Some(id) = self.chooser.selected_value().map(str::to_string) else {
            let error = ValidationError::NoSelection;
            notifier.alert(&error.to_string());
            return Err(error.into());
        };

        match client.delete_person(&id).await {
            Ok(message) => {
                let message = if message.trim().is_empty() {
                    DELETE_SUCCESS_MESSAGE.to_string()
                } else {
                    message
                };
                notifier.alert(&message);
                Ok(DeleteOutcome::Reload { message })
            }
            Err(e) => {
                notifier.alert(&e.user_message());
                Err(e.into())
            }
        }
    }
}

/// Read-only table of every person.
#[derive(Debug, Default)]
pub struct PersonTableView {
    pub table: PersonTable,
    visible: bool,
}

impl PersonTableView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.visible
    }

    /// Show the view and load the table. Rows are replaced only on success.
    pub async fn open(
        &mut self,
        client: &RecognitionClient,
        notifier: &mut dyn Notifier,
    ) -> Result<(), ViewError> {
        self.visible = true;
        match client.person_table().await {
            Ok(persons) => {
                self.table.set_rows(
                    persons
                        .into_iter()
                        .enumerate()
                        .map(|(i, p)| TableRow {
                            index: i + 1,
                            name: p.name,
                            image_count: p.image_count.unwrap_or(0),
                        })
                        .collect(),
                );
                Ok(())
            }
            Err(e) => {
                notifier.alert(&e.user_message());
                Err(e.into())
            }
        }
    }

    pub fn close(&mut self) {
        self.visible = false;
    }
}
