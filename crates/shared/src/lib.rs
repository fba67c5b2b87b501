pub mod domain;
pub mod error;
pub mod protocol;

pub use domain::{AbsentFieldPolicy, FormState, ProposalResult};
pub use error::{FailureKind, ProposalFailure, GENERIC_FAILURE_MESSAGE};
