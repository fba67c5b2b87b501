//! Backend commands queued from UI to backend worker.

use client_core::ProposalTicket;

pub enum BackendCommand {
    Propose(ProposalTicket),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Propose(_) => "propose",
        }
    }
}
