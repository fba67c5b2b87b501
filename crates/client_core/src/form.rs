//! In-memory title/memo form state.

use shared::{AbsentFieldPolicy, FormState, ProposalResult};
use tokio::sync::watch;
use tracing::debug;

/// Owns the editable form for the lifetime of the session. Never fails.
#[derive(Debug)]
pub struct FormModel {
    state: watch::Sender<FormState>,
}

impl Default for FormModel {
    fn default() -> Self {
        Self::new()
    }
}

impl FormModel {
    pub fn new() -> Self {
        let (state, _) = watch::channel(FormState::default());
        Self { state }
    }

    pub fn snapshot(&self) -> FormState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.state.subscribe()
    }

    pub fn set_title(&self, value: impl Into<String>) {
        let value = value.into();
        self.state.send_if_modified(|form| replace_field(&mut form.title, value));
    }

    pub fn set_memo(&self, value: impl Into<String>) {
        let value = value.into();
        self.state.send_if_modified(|form| replace_field(&mut form.memo, value));
    }

    pub fn reset(&self) {
        self.state.send_if_modified(|form| {
            let changed = !form.title.is_empty() || !form.memo.is_empty();
            form.title.clear();
            form.memo.clear();
            changed
        });
    }

    /// Merges a suggestion into the form in one update.
    pub fn apply_proposal(&self, proposal: &ProposalResult, policy: AbsentFieldPolicy) {
        self.state.send_if_modified(|form| {
            let title = merged_field(&form.title, proposal.title.as_deref(), policy);
            let memo = merged_field(&form.memo, proposal.memo.as_deref(), policy);
            let changed = replace_field(&mut form.title, title) | replace_field(&mut form.memo, memo);
            debug!(?policy, changed, "applied proposal to form");
            changed
        });
    }
}

fn merged_field(current: &str, suggested: Option<&str>, policy: AbsentFieldPolicy) -> String {
    match (suggested, policy) {
        (Some(value), _) => value.to_string(),
        (None, AbsentFieldPolicy::Clear) => String::new(),
        (None, AbsentFieldPolicy::Preserve) => current.to_string(),
    }
}

fn replace_field(field: &mut String, value: String) -> bool {
    if *field == value {
        return false;
    }
    *field = value;
    true
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
