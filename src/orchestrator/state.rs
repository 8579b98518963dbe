//! Per-request pipeline state
//!
//! A request moves strictly forward: Received → Routed → EvidenceGathered →
//! Composed → Returned. No stage is retried and there is no separate error
//! state; failures are converted into a displayable response at the stage
//! where they occur.

use crate::errors::{AssistantError, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pipeline stages for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestState {
    Received,
    Routed,
    EvidenceGathered,
    Composed,
    Returned,
}

impl RequestState {
    /// The only state with no successor
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestState::Returned)
    }

    fn successor(&self) -> Option<RequestState> {
        use RequestState::*;
        match self {
            Received => Some(Routed),
            Routed => Some(EvidenceGathered),
            EvidenceGathered => Some(Composed),
            Composed => Some(Returned),
            Returned => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestState::Received => "Received",
            RequestState::Routed => "Routed",
            RequestState::EvidenceGathered => "EvidenceGathered",
            RequestState::Composed => "Composed",
            RequestState::Returned => "Returned",
        }
    }
}

/// Tracks one request through the pipeline
#[derive(Debug, Clone)]
pub struct RequestTicket {
    pub id: Uuid,
    state: RequestState,
}

impl RequestTicket {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: RequestState::Received,
        }
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    /// Advance to `to`; only the immediate successor is valid
    pub fn advance(&mut self, to: RequestState) -> Result<()> {
        if self.state.successor() == Some(to) {
            self.state = to;
            Ok(())
        } else {
            Err(AssistantError::InvalidTransition {
                from: self.state.as_str().to_string(),
                to: to.as_str().to_string(),
            })
        }
    }
}

impl Default for RequestTicket {
    fn default() -> Self {
        Self::new()
    }
}
