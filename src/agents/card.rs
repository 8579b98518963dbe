//! Card services agent

use crate::agents::{ActionAgent, AgentMemory, Evidence, DEMO_CARD_LAST4};
use crate::errors::Result;
use crate::tools::CardTool;
use serde_json::json;

pub struct CardAgent {
    tool: CardTool,
    memory: AgentMemory,
}

impl CardAgent {
    pub fn new() -> Self {
        Self {
            tool: CardTool,
            memory: AgentMemory::new(),
        }
    }
}

impl ActionAgent for CardAgent {
    fn name(&self) -> &'static str {
        "CardAgent"
    }

    fn process(&mut self, query: &str) -> Result<Evidence> {
        let query_lower = query.to_lowercase();

        // "block" outranks "lost": a lost-card report asking for a block
        // should block first, replacement is a separate request
        let evidence = if query_lower.contains("block") {
            Evidence::new(
                "card",
                "block_card",
                self.tool.block_card(DEMO_CARD_LAST4, "lost"),
            )
        } else if query_lower.contains("replace") || query_lower.contains("lost") {
            Evidence::new(
                "card",
                "request_replacement",
                self.tool.request_replacement(DEMO_CARD_LAST4),
            )
        } else {
            Evidence::new(
                "card",
                "help",
                json!({"message": "I can help with card blocking and replacement."}),
            )
        };

        Ok(evidence)
    }

    fn remember(&mut self, query: &str, response: &str) {
        self.memory.add(query, response);
    }

    fn memory(&self) -> &AgentMemory {
        &self.memory
    }
}

impl Default for CardAgent {
    fn default() -> Self {
        Self::new()
    }
}
