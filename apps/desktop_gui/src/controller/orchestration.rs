//! Command orchestration helpers from UI actions to backend command queue.

use client_core::{Editor, ProposalCompletion};
use crossbeam_channel::{Sender, TrySendError};
use shared::ProposalFailure;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiError, UiErrorContext},
    reducer::ShellStatus,
};

/// Queues a command for the backend worker. On failure returns the message to
/// surface to the user.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), String> {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => {
            Err("UI command queue is full; please retry".to_string())
        }
        Err(TrySendError::Disconnected(_)) => Err(
            "Backend command processor disconnected (possible startup/runtime failure); restart the app"
                .to_string(),
        ),
    }
}

/// Submits the consultation draft and hands the request to the backend.
///
/// A request that cannot be queued is completed immediately as a transport
/// failure so the session leaves the loading state.
pub fn submit_consultation(
    editor: &mut Editor,
    cmd_tx: &Sender<BackendCommand>,
    status: &mut ShellStatus,
) -> bool {
    let Some(ticket) = editor.submit() else {
        return false;
    };
    let generation = ticket.generation();

    match dispatch_backend_command(cmd_tx, BackendCommand::Propose(ticket)) {
        Ok(()) => true,
        Err(message) => {
            status.error = Some(UiError::from_message(
                UiErrorContext::Consultation,
                message.clone(),
            ));
            editor.complete(ProposalCompletion::new(
                generation,
                Err(ProposalFailure::transport(message)),
            ));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;

    use super::*;
    use crate::controller::events::UiErrorCategory;

    fn editor_with_draft(text: &str) -> Editor {
        let editor = Editor::default();
        editor.consultation.open();
        editor.consultation.update_draft(text);
        editor
    }

    #[test]
    fn queues_exactly_one_request_per_submission() {
        let (cmd_tx, cmd_rx) = bounded(8);
        let mut editor = editor_with_draft("x");
        let mut status = ShellStatus::default();

        assert!(submit_consultation(&mut editor, &cmd_tx, &mut status));
        assert!(!submit_consultation(&mut editor, &cmd_tx, &mut status));

        let BackendCommand::Propose(ticket) = cmd_rx.try_recv().expect("queued command");
        assert_eq!(ticket.text(), "x");
        assert!(cmd_rx.try_recv().is_err());
        assert!(editor.consultation.snapshot().is_loading);
    }

    #[test]
    fn blank_draft_queues_nothing() {
        let (cmd_tx, cmd_rx) = bounded(8);
        let mut editor = editor_with_draft("   ");
        let mut status = ShellStatus::default();

        assert!(!submit_consultation(&mut editor, &cmd_tx, &mut status));
        assert!(cmd_rx.try_recv().is_err());
        assert!(!editor.consultation.snapshot().is_loading);
    }

    #[test]
    fn disconnected_backend_fails_the_submission() {
        let (cmd_tx, cmd_rx) = bounded(8);
        drop(cmd_rx);
        let mut editor = editor_with_draft("x");
        let mut status = ShellStatus::default();

        assert!(!submit_consultation(&mut editor, &cmd_tx, &mut status));

        let state = editor.consultation.snapshot();
        assert!(!state.is_loading);
        assert!(state.is_open);
        assert_eq!(state.draft_text, "x");
        assert!(state
            .error
            .as_deref()
            .is_some_and(|error| error.contains("disconnected")));
        let banner = status.error.expect("status banner");
        assert_eq!(banner.category(), UiErrorCategory::Transport);
    }
}
