use serde::{Deserialize, Serialize};

/// Editable form fields. Either field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub title: String,
    pub memo: String,
}

/// Suggestion extracted from a successful proposal response.
///
/// `None` means the service suggested no value for that field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProposalResult {
    pub title: Option<String>,
    pub memo: Option<String>,
}

impl ProposalResult {
    pub fn new(title: impl Into<String>, memo: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            memo: Some(memo.into()),
        }
    }
}

/// How a proposal that omits a field is merged into the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AbsentFieldPolicy {
    /// Absent fields overwrite the form with an empty string.
    #[default]
    Clear,
    /// Absent fields leave the current form value untouched.
    Preserve,
}

impl AbsentFieldPolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "clear" => Some(Self::Clear),
            "preserve" => Some(Self::Preserve),
            _ => None,
        }
    }
}
