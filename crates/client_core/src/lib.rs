use std::sync::Arc;

use anyhow::{Context, Result};
use shared::{AbsentFieldPolicy, FormState};
use tracing::info;

pub mod config;
pub mod consultation;
pub mod form;
pub mod proposal_client;

pub use config::{load_settings, ClientSettings, SettingsError};
pub use consultation::{
    CompletionDisposition, ConsultationPhase, ConsultationSession, ConsultationState,
    ProposalCompletion, ProposalTicket, SubmitBlocker,
};
pub use form::FormModel;
pub use proposal_client::{HttpProposalClient, ProposalClient};

/// Form plus consultation state for one page session.
#[derive(Debug, Default)]
pub struct Editor {
    pub form: FormModel,
    pub consultation: ConsultationSession,
}

impl Editor {
    pub fn new(absent_fields: AbsentFieldPolicy) -> Self {
        Self {
            form: FormModel::new(),
            consultation: ConsultationSession::new(absent_fields),
        }
    }

    pub fn form_state(&self) -> FormState {
        self.form.snapshot()
    }

    pub fn submit(&mut self) -> Option<ProposalTicket> {
        self.consultation.submit()
    }

    pub fn complete(&mut self, completion: ProposalCompletion) -> CompletionDisposition {
        self.consultation.complete(completion, &self.form)
    }

    /// Submits the current draft and waits for the result in place.
    ///
    /// Returns `None` when the submission guard rejected the call.
    pub async fn consult(&mut self, client: &dyn ProposalClient) -> Option<CompletionDisposition> {
        let ticket = self.submit()?;
        let completion = ticket.run(client).await;
        Some(self.complete(completion))
    }
}

/// Everything an application shell needs after startup.
pub struct EditorBootstrap {
    pub editor: Editor,
    pub client: Arc<dyn ProposalClient>,
    pub settings: ClientSettings,
}

/// Builds the form, consultation session and proposal client from settings.
pub fn initialize(settings: ClientSettings) -> Result<EditorBootstrap> {
    let endpoint = settings
        .endpoint()
        .context("failed to resolve proposal endpoint")?;
    info!(%endpoint, absent_fields = ?settings.absent_fields, "initializing editor");

    Ok(EditorBootstrap {
        editor: Editor::new(settings.absent_fields),
        client: Arc::new(HttpProposalClient::new(endpoint)),
        settings,
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
