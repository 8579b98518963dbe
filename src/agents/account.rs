//! Account information agent

use crate::agents::{ActionAgent, AgentMemory, Evidence, DEMO_ACCOUNT_ID};
use crate::errors::Result;
use crate::tools::AccountTool;
use serde_json::json;

pub struct AccountAgent {
    tool: AccountTool,
    memory: AgentMemory,
}

impl AccountAgent {
    pub fn new() -> Self {
        Self {
            tool: AccountTool,
            memory: AgentMemory::new(),
        }
    }
}

impl ActionAgent for AccountAgent {
    fn name(&self) -> &'static str {
        "AccountAgent"
    }

    fn process(&mut self, query: &str) -> Result<Evidence> {
        let query_lower = query.to_lowercase();

        let evidence = if query_lower.contains("balance") {
            Evidence::new(
                "account",
                "get_balance",
                self.tool.get_balance(DEMO_ACCOUNT_ID),
            )
        } else if query_lower.contains("details") {
            Evidence::new(
                "account",
                "get_details",
                self.tool.get_details(DEMO_ACCOUNT_ID),
            )
        } else {
            Evidence::new(
                "account",
                "help",
                json!({"message": "I can help with account balance and details."}),
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

impl Default for AccountAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_dispatch() {
        let mut agent = AccountAgent::new();
        let evidence = agent.process("What is my current account balance?").unwrap();
        assert_eq!(evidence.operation, "get_balance");
        assert_eq!(evidence.payload["account_id"], DEMO_ACCOUNT_ID);
    }

    #[test]
    fn test_details_dispatch() {
        let mut agent = AccountAgent::new();
        let evidence = agent.process("Show me my account details").unwrap();
        assert_eq!(evidence.operation, "get_details");
        assert_eq!(evidence.payload["status"], "Active");
    }

    #[test]
    fn test_unrecognized_operation_gets_help_text() {
        let mut agent = AccountAgent::new();
        let evidence = agent.process("Close my account forever").unwrap();
        assert_eq!(evidence.operation, "help");
        assert!(!evidence.to_prompt_text().is_empty());
    }

    #[test]
    fn test_remember_appends_exchange() {
        let mut agent = AccountAgent::new();
        agent.remember("query", "response");
        assert_eq!(agent.memory().len(), 1);
    }
}
