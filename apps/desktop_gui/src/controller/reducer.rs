//! Applies backend events to editor state on the UI thread.

use client_core::{CompletionDisposition, Editor};

use crate::controller::events::{UiError, UiEvent};

#[derive(Debug, Default)]
pub struct ShellStatus {
    pub info: String,
    pub error: Option<UiError>,
}

pub fn apply_ui_event(editor: &mut Editor, status: &mut ShellStatus, event: UiEvent) {
    match event {
        UiEvent::Info(message) => status.info = message,
        UiEvent::Error(error) => {
            tracing::warn!(context = ?error.context(), "{}", error.message());
            status.error = Some(error);
        }
        UiEvent::ProposalCompleted(completion) => match editor.complete(completion) {
            CompletionDisposition::Applied => {
                status.info = "Proposal applied to the form".to_string();
            }
            CompletionDisposition::Rejected => {}
            CompletionDisposition::Stale => {
                status.info = "Discarded a proposal from a cancelled consultation".to_string();
            }
        },
    }
}
