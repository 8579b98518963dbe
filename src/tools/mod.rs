//! Mock backend tools
//!
//! External collaborators for the action agents: pure key/value lookups with
//! canned payloads and no state machine. The core treats the returned
//! `serde_json::Value` as opaque evidence to be stringified into a prompt.

use serde_json::{json, Value};

/// Account lookups
#[derive(Debug, Default)]
pub struct AccountTool;

impl AccountTool {
    pub fn get_balance(&self, account_id: &str) -> Value {
        json!({
            "account_id": account_id,
            "balance": 5432.10,
            "currency": "USD",
        })
    }

    pub fn get_details(&self, account_id: &str) -> Value {
        json!({
            "account_id": account_id,
            "type": "Checking",
            "status": "Active",
            "owner": "John Doe",
        })
    }
}

/// Transaction history and transfers
#[derive(Debug, Default)]
pub struct TransactionTool;

impl TransactionTool {
    pub fn get_recent_transactions(&self, _account_id: &str, limit: usize) -> Value {
        let transactions = json!([
            {"date": "2023-10-25", "description": "Grocery Store", "amount": -150.00},
            {"date": "2023-10-24", "description": "Paycheck", "amount": 2500.00},
            {"date": "2023-10-22", "description": "Electric Bill", "amount": -120.50},
        ]);
        let trimmed: Vec<Value> = transactions
            .as_array()
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .take(limit)
            .collect();
        Value::Array(trimmed)
    }

    pub fn transfer_funds(&self, _source: &str, _target: &str, _amount: f64) -> Value {
        json!({
            "status": "success",
            "transaction_id": "TXN998877",
        })
    }
}

/// Card blocking and replacement
#[derive(Debug, Default)]
pub struct CardTool;

impl CardTool {
    pub fn block_card(&self, card_last4: &str, reason: &str) -> Value {
        json!({
            "status": "success",
            "message": format!("Card *{} has been blocked. Reason: {}", card_last4, reason),
        })
    }

    pub fn request_replacement(&self, _card_last4: &str) -> Value {
        json!({
            "status": "success",
            "message": "Replacement card shipped. ETA 3-5 business days.",
        })
    }
}
