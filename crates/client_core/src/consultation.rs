//! Consultation modal lifecycle and in-flight request tracking.
//!
//! The session is driven from a single UI thread. `submit()` hands out a
//! [`ProposalTicket`] instead of awaiting the request itself; whoever runs the
//! ticket feeds the resulting [`ProposalCompletion`] back through
//! [`ConsultationSession::complete`]. Each ticket carries a generation and only
//! the currently pending generation may mutate state.

use std::fmt;

use shared::{AbsentFieldPolicy, ProposalFailure, ProposalResult};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{form::FormModel, proposal_client::ProposalClient};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsultationState {
    pub is_open: bool,
    pub draft_text: String,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsultationPhase {
    Idle,
    Open,
    Submitting,
}

impl ConsultationState {
    pub fn phase(&self) -> ConsultationPhase {
        match (self.is_open, self.is_loading) {
            (false, _) => ConsultationPhase::Idle,
            (true, false) => ConsultationPhase::Open,
            (true, true) => ConsultationPhase::Submitting,
        }
    }
}

/// Reason a `submit()` call is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlocker {
    ModalClosed,
    RequestInFlight,
    EmptyDraft,
}

impl fmt::Display for SubmitBlocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::ModalClosed => "consultation modal is closed",
            Self::RequestInFlight => "a proposal request is already in flight",
            Self::EmptyDraft => "draft text is empty",
        };
        f.write_str(text)
    }
}

/// A submission accepted by the session and waiting to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalTicket {
    generation: u64,
    text: String,
}

impl ProposalTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Performs exactly one proposal request.
    pub async fn run(self, client: &dyn ProposalClient) -> ProposalCompletion {
        let outcome = client.submit_proposal(&self.text).await;
        ProposalCompletion::new(self.generation, outcome)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalCompletion {
    generation: u64,
    outcome: Result<ProposalResult, ProposalFailure>,
}

impl ProposalCompletion {
    pub fn new(generation: u64, outcome: Result<ProposalResult, ProposalFailure>) -> Self {
        Self {
            generation,
            outcome,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionDisposition {
    /// Suggestion merged into the form and the modal closed.
    Applied,
    /// Failure recorded in the session error; modal left open.
    Rejected,
    /// Completion belongs to a cancelled or superseded submission.
    Stale,
}

#[derive(Debug)]
pub struct ConsultationSession {
    state: watch::Sender<ConsultationState>,
    last_generation: u64,
    pending: Option<u64>,
    absent_fields: AbsentFieldPolicy,
}

impl Default for ConsultationSession {
    fn default() -> Self {
        Self::new(AbsentFieldPolicy::default())
    }
}

impl ConsultationSession {
    pub fn new(absent_fields: AbsentFieldPolicy) -> Self {
        let (state, _) = watch::channel(ConsultationState::default());
        Self {
            state,
            last_generation: 0,
            pending: None,
            absent_fields,
        }
    }

    pub fn snapshot(&self) -> ConsultationState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ConsultationState> {
        self.state.subscribe()
    }

    pub fn phase(&self) -> ConsultationPhase {
        self.state.borrow().phase()
    }

    pub fn absent_fields(&self) -> AbsentFieldPolicy {
        self.absent_fields
    }

    pub fn pending_generation(&self) -> Option<u64> {
        self.pending
    }

    pub fn open(&self) {
        self.state.send_if_modified(|state| {
            if state.is_open {
                return false;
            }
            state.is_open = true;
            true
        });
    }

    /// Hides the modal. Draft text and error survive; an in-flight request is
    /// abandoned and its completion will be discarded.
    pub fn close(&mut self) {
        if let Some(generation) = self.pending.take() {
            debug!(generation, "consultation closed with request in flight; cancelling");
        }
        self.state.send_if_modified(|state| {
            let changed = state.is_open || state.is_loading;
            state.is_open = false;
            state.is_loading = false;
            changed
        });
    }

    pub fn update_draft(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_if_modified(|state| {
            if state.draft_text == text {
                return false;
            }
            state.draft_text = text;
            true
        });
    }

    pub fn submit_blocker(&self) -> Option<SubmitBlocker> {
        let state = self.state.borrow();
        if state.is_loading {
            Some(SubmitBlocker::RequestInFlight)
        } else if !state.is_open {
            Some(SubmitBlocker::ModalClosed)
        } else if state.draft_text.trim().is_empty() {
            Some(SubmitBlocker::EmptyDraft)
        } else {
            None
        }
    }

    pub fn can_submit(&self) -> bool {
        self.submit_blocker().is_none()
    }

    /// Moves `Open` to `Submitting` and returns the request to run, or does
    /// nothing when blocked.
    pub fn submit(&mut self) -> Option<ProposalTicket> {
        if let Some(blocker) = self.submit_blocker() {
            debug!(%blocker, "submit ignored");
            return None;
        }

        self.last_generation += 1;
        let generation = self.last_generation;
        self.pending = Some(generation);

        let mut text = String::new();
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error = None;
            text = state.draft_text.clone();
        });
        debug!(generation, "proposal submission started");

        Some(ProposalTicket { generation, text })
    }

    /// Applies a finished request. Only the pending generation is honoured.
    pub fn complete(
        &mut self,
        completion: ProposalCompletion,
        form: &FormModel,
    ) -> CompletionDisposition {
        if self.pending != Some(completion.generation) {
            warn!(
                generation = completion.generation,
                pending = ?self.pending,
                "discarding stale proposal completion"
            );
            return CompletionDisposition::Stale;
        }
        self.pending = None;

        match completion.outcome {
            Ok(result) => {
                form.apply_proposal(&result, self.absent_fields);
                self.state.send_modify(|state| {
                    state.is_open = false;
                    state.draft_text.clear();
                    state.is_loading = false;
                    state.error = None;
                });
                info!(generation = completion.generation, "proposal applied to form");
                CompletionDisposition::Applied
            }
            Err(failure) => {
                warn!(
                    generation = completion.generation,
                    kind = ?failure.kind(),
                    error = %failure,
                    "proposal request failed"
                );
                self.state.send_modify(|state| {
                    state.error = Some(failure.message().to_string());
                    state.is_loading = false;
                });
                CompletionDisposition::Rejected
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/consultation_tests.rs"]
mod tests;
