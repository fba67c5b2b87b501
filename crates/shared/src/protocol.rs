use serde::{Deserialize, Serialize};

use crate::domain::ProposalResult;

pub fn propose_route() -> &'static str {
    "/api/propose"
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposeRequest {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposeResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl From<ProposeResponse> for ProposalResult {
    fn from(value: ProposeResponse) -> Self {
        Self {
            title: value.title,
            memo: value.memo,
        }
    }
}

/// Body of a non-success response. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
