//! Top-level request orchestration
//!
//! Ties the router, retrieval engine, action agents, and response composer
//! into one synchronous-per-request control loop. A well-formed query always
//! gets some text back: stage failures become displayable responses rather
//! than propagated faults, trading strictness for availability.

pub mod state;

pub use state::{RequestState, RequestTicket};

use crate::agents::{AccountAgent, ActionAgent, CardAgent, TransactionAgent};
use crate::compose::ResponseComposer;
use crate::rag::RetrievalEngine;
use crate::routing::{IntentRouter, Route};
use crate::telemetry::{TelemetryCollector, TelemetryEvent};
use std::sync::Arc;
use std::time::Instant;

pub struct Orchestrator {
    router: IntentRouter,
    rag: Arc<RetrievalEngine>,
    composer: ResponseComposer,
    account_agent: AccountAgent,
    transaction_agent: TransactionAgent,
    card_agent: CardAgent,
    top_k: usize,
    telemetry: TelemetryCollector,
}

impl Orchestrator {
    pub fn new(
        rag: Arc<RetrievalEngine>,
        composer: ResponseComposer,
        top_k: usize,
        telemetry: TelemetryCollector,
    ) -> Self {
        Self {
            router: IntentRouter::new(),
            rag,
            composer,
            account_agent: AccountAgent::new(),
            transaction_agent: TransactionAgent::new(),
            card_agent: CardAgent::new(),
            top_k,
            telemetry,
        }
    }

    /// Answer one query end to end. Runs the request state machine
    /// Received → Routed → EvidenceGathered → Composed → Returned; any stage
    /// failure is converted into the returned text.
    pub async fn route_query(&mut self, query: &str) -> String {
        let mut ticket = RequestTicket::new();

        // Routed
        let route = self.router.classify(query);
        self.telemetry.record(TelemetryEvent::QueryRouted {
            route: route.as_str().to_string(),
            timestamp: Instant::now(),
        });
        if let Err(e) = ticket.advance(RequestState::Routed) {
            return format!("I'm sorry, something went wrong handling your request. ({})", e);
        }

        // EvidenceGathered
        let evidence = if route.uses_retrieval() {
            self.rag.retrieve(query, self.top_k)
        } else {
            let agent: &mut dyn ActionAgent = match route {
                Route::Account => &mut self.account_agent,
                Route::Transaction => &mut self.transaction_agent,
                Route::Card => &mut self.card_agent,
                Route::Policy | Route::Fallback => unreachable!("retrieval routes handled above"),
            };
            match agent.process(query) {
                Ok(evidence) => {
                    self.telemetry.record(TelemetryEvent::ToolInvoked {
                        tool: evidence.tool.to_string(),
                        operation: evidence.operation.to_string(),
                        timestamp: Instant::now(),
                    });
                    evidence.to_prompt_text()
                }
                Err(e) => {
                    return format!(
                        "I'm sorry, I couldn't complete that request. ({})",
                        e
                    );
                }
            }
        };
        if let Err(e) = ticket.advance(RequestState::EvidenceGathered) {
            return format!("I'm sorry, something went wrong handling your request. ({})", e);
        }

        // Composed
        let response = self.composer.compose(route, query, &evidence).await;
        let _ = ticket.advance(RequestState::Composed);

        // Advisory memory, appended after the full exchange exists
        match route {
            Route::Account => self.account_agent.remember(query, &response),
            Route::Transaction => self.transaction_agent.remember(query, &response),
            Route::Card => self.card_agent.remember(query, &response),
            Route::Policy | Route::Fallback => {}
        }

        let _ = ticket.advance(RequestState::Returned);
        response
    }

    /// Route classification without running the pipeline
    pub fn classify(&self, query: &str) -> Route {
        self.router.classify(query)
    }

    pub fn telemetry(&self) -> &TelemetryCollector {
        &self.telemetry
    }

    #[cfg(test)]
    fn agent_memory_len(&self, route: Route) -> usize {
        match route {
            Route::Account => self.account_agent.memory().len(),
            Route::Transaction => self.transaction_agent.memory().len(),
            Route::Card => self.card_agent.memory().len(),
            Route::Policy | Route::Fallback => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::ResponseComposer;
    use crate::config::GenerationConfig;
    use crate::embedding::HashingEmbedder;
    use crate::ingest::TextChunker;

    fn orchestrator() -> Orchestrator {
        let telemetry = TelemetryCollector::new();
        let rag = Arc::new(RetrievalEngine::new(
            Arc::new(HashingEmbedder::new()),
            TextChunker::default(),
            "banking_docs",
            telemetry.clone(),
        ));
        let composer =
            ResponseComposer::new(None, GenerationConfig::default(), telemetry.clone());
        Orchestrator::new(rag, composer, 3, telemetry)
    }

    #[tokio::test]
    async fn test_account_query_runs_tool_and_remembers() {
        let mut orch = orchestrator();
        let response = orch
            .route_query("What is my current account balance?")
            .await;

        assert!(response.contains("5432.1"));
        assert_eq!(orch.agent_memory_len(Route::Account), 1);
        assert_eq!(orch.telemetry().get_stats().tools_invoked, 1);
    }

    #[tokio::test]
    async fn test_card_query_blocks_card() {
        let mut orch = orchestrator();
        let response = orch
            .route_query("I lost my card, please block it immediately.")
            .await;

        assert!(response.contains("blocked"));
        assert_eq!(orch.agent_memory_len(Route::Card), 1);
    }

    #[tokio::test]
    async fn test_transaction_query_lists_transactions() {
        let mut orch = orchestrator();
        let response = orch.route_query("Show me my recent transactions.").await;
        assert!(response.contains("Grocery Store"));
    }

    #[tokio::test]
    async fn test_policy_query_without_corpus_still_answers() {
        let mut orch = orchestrator();
        let response = orch
            .route_query("What is the fee for an international wire transfer?")
            .await;

        assert!(!response.is_empty());
        assert!(response.contains("No relevant information"));
    }

    #[tokio::test]
    async fn test_fallback_query_still_answers() {
        let mut orch = orchestrator();
        let response = orch.route_query("Good morning!").await;
        assert!(!response.is_empty());
        // Policy/fallback responses leave agent memories untouched
        assert_eq!(orch.agent_memory_len(Route::Account), 0);
        assert_eq!(orch.agent_memory_len(Route::Card), 0);
    }
}
