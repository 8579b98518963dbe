//! Domain action agents
//!
//! Each agent owns one backend tool and a keyword sub-dispatch that picks
//! the operation within its route. Agents produce structured evidence; the
//! response composer turns it into natural language. Conversation memory is
//! advisory only and never feeds back into routing or retrieval.

pub mod account;
pub mod card;
pub mod memory;
pub mod transaction;

pub use account::AccountAgent;
pub use card::CardAgent;
pub use memory::{AgentMemory, Exchange};
pub use transaction::TransactionAgent;

use crate::errors::Result;
use serde_json::Value;

/// Demonstration stand-in for entity extraction. A production deployment
/// extracts the caller's account from the authenticated session or the
/// query text; everything downstream of these constants already treats the
/// identifiers as opaque parameters.
pub const DEMO_ACCOUNT_ID: &str = "123456789";
pub const DEMO_TARGET_ACCOUNT: &str = "987654321";
pub const DEMO_TRANSFER_AMOUNT: f64 = 100.0;
pub const DEMO_CARD_LAST4: &str = "4321";

/// Structured result of one agent dispatch
#[derive(Debug, Clone)]
pub struct Evidence {
    /// Tool category that produced the payload
    pub tool: &'static str,
    /// Operation selected by the sub-dispatch
    pub operation: &'static str,
    /// Opaque tool payload, stringified into the prompt
    pub payload: Value,
}

impl Evidence {
    pub fn new(tool: &'static str, operation: &'static str, payload: Value) -> Self {
        Self {
            tool,
            operation,
            payload,
        }
    }

    /// Render the payload for prompt assembly
    pub fn to_prompt_text(&self) -> String {
        serde_json::to_string_pretty(&self.payload)
            .unwrap_or_else(|_| self.payload.to_string())
    }
}

/// Maps a query within one route to a tool call
pub trait ActionAgent: Send {
    fn name(&self) -> &'static str;

    /// Select an operation from the query and invoke the backend tool
    fn process(&mut self, query: &str) -> Result<Evidence>;

    /// Append a completed (query, response) pair to conversation memory
    fn remember(&mut self, query: &str, response: &str);

    fn memory(&self) -> &AgentMemory;
}
