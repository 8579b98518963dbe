//! Transaction inquiry and transfer agent

use crate::agents::{
    ActionAgent, AgentMemory, Evidence, DEMO_ACCOUNT_ID, DEMO_TARGET_ACCOUNT,
    DEMO_TRANSFER_AMOUNT,
};
use crate::errors::Result;
use crate::tools::TransactionTool;
use serde_json::json;

const RECENT_LIMIT: usize = 5;

pub struct TransactionAgent {
    tool: TransactionTool,
    memory: AgentMemory,
}

impl TransactionAgent {
    pub fn new() -> Self {
        Self {
            tool: TransactionTool,
            memory: AgentMemory::new(),
        }
    }
}

impl ActionAgent for TransactionAgent {
    fn name(&self) -> &'static str {
        "TransactionAgent"
    }

    fn process(&mut self, query: &str) -> Result<Evidence> {
        let query_lower = query.to_lowercase();

        let evidence = if query_lower.contains("recent") || query_lower.contains("transactions") {
            Evidence::new(
                "transaction",
                "get_recent_transactions",
                self.tool
                    .get_recent_transactions(DEMO_ACCOUNT_ID, RECENT_LIMIT),
            )
        } else if query_lower.contains("transfer") {
            Evidence::new(
                "transaction",
                "transfer_funds",
                self.tool.transfer_funds(
                    DEMO_ACCOUNT_ID,
                    DEMO_TARGET_ACCOUNT,
                    DEMO_TRANSFER_AMOUNT,
                ),
            )
        } else {
            Evidence::new(
                "transaction",
                "help",
                json!({"message": "I can help with transactions and transfers."}),
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

impl Default for TransactionAgent {
    fn default() -> Self {
        Self::new()
    }
}
