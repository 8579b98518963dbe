//! Bounded per-agent conversation memory
//!
//! Fixed-capacity FIFO of (query, response) pairs. Advisory record only:
//! routing and retrieval never read it, so losing old entries is harmless,
//! but unbounded growth in a long-running process is not.

use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// Maximum retained exchanges per agent
pub const MAX_EXCHANGES: usize = 100;

/// One completed (query, response) pair
#[derive(Debug, Clone)]
pub struct Exchange {
    pub query: String,
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

/// Bounded conversation log
#[derive(Debug, Clone)]
pub struct AgentMemory {
    exchanges: VecDeque<Exchange>,
    max_exchanges: usize,
}

impl AgentMemory {
    pub fn new() -> Self {
        Self::with_capacity(MAX_EXCHANGES)
    }

    pub fn with_capacity(max_exchanges: usize) -> Self {
        Self {
            exchanges: VecDeque::with_capacity(max_exchanges),
            max_exchanges,
        }
    }

    /// Append an exchange, evicting the oldest when at capacity
    pub fn add(&mut self, query: impl Into<String>, response: impl Into<String>) {
        if self.exchanges.len() >= self.max_exchanges {
            self.exchanges.pop_front();
        }
        self.exchanges.push_back(Exchange {
            query: query.into(),
            response: response.into(),
            timestamp: Utc::now(),
        });
    }

    pub fn last(&self) -> Option<&Exchange> {
        self.exchanges.back()
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Exchange> {
        self.exchanges.iter()
    }

    pub fn clear(&mut self) {
        self.exchanges.clear();
    }
}

impl Default for AgentMemory {
    fn default() -> Self {
        Self::new()
    }
}
