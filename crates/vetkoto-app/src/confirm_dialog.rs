//! Confirm dialog state.
//!
//! Data model for confirmation dialogs. The rendering widget
//! lives in vetkoto-tui's widgets/confirm_dialog.rs.

use vetkoto_core::{Entity, RecordId};

use crate::message::Message;

#[derive(Debug, Clone)]
pub struct ConfirmDialogState {
    pub title: String,
    pub message: String,
    /// First option confirms, second cancels.
    pub options: Vec<(String, Message)>,
}

impl ConfirmDialogState {
    /// Create a generic confirmation dialog
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        options: Vec<(&str, Message)>,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            options: options
                .into_iter()
                .map(|(label, msg)| (label.to_string(), msg))
                .collect(),
        }
    }

    pub fn quit_confirmation(unsaved_form: bool) -> Self {
        let message = if unsaved_form {
            "The open form has unsaved changes."
        } else {
            "Close the clinic dashboard?"
        };
        Self::new(
            "Quit VetKoto?",
            message,
            vec![("Quit", Message::ConfirmQuit), ("Cancel", Message::CancelQuit)],
        )
    }

    pub fn delete_confirmation(entity: Entity, id: RecordId) -> Self {
        Self::new(
            format!("Delete from {}?", entity.title()),
            format!("Delete this record (id {})?", id),
            vec![
                ("Delete", Message::ConfirmDelete { entity, id }),
                ("Cancel", Message::CancelDelete),
            ],
        )
    }

    pub fn confirm_message(&self) -> Option<Message> {
        self.options.first().map(|(_, msg)| msg.clone())
    }

    pub fn cancel_message(&self) -> Option<Message> {
        self.options.get(1).map(|(_, msg)| msg.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_confirmation_carries_target() {
        let dialog = ConfirmDialogState::delete_confirmation(Entity::Owners, RecordId::from(4));
        assert_eq!(dialog.title, "Delete from Owners?");
        assert!(matches!(
            dialog.confirm_message(),
            Some(Message::ConfirmDelete { entity: Entity::Owners, ref id }) if id.as_str() == "4"
        ));
        assert!(matches!(dialog.cancel_message(), Some(Message::CancelDelete)));
    }

    #[test]
    fn test_quit_confirmation_options() {
        let dialog = ConfirmDialogState::quit_confirmation(false);
        let labels: Vec<&str> = dialog.options.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["Quit", "Cancel"]);
        assert!(ConfirmDialogState::quit_confirmation(true)
            .message
            .contains("unsaved"));
    }
}
