//! Response composition
//!
//! Builds a role-specific prompt from the route, query, and gathered
//! evidence, and invokes the generation collaborator. This is the error
//! boundary for generation: failures become a user-safe apology carrying the
//! raw error detail, never a fault that aborts the request. With generation
//! disabled or unconfigured, evidence is returned verbatim.

use crate::config::GenerationConfig;
use crate::generation::Generator;
use crate::routing::Route;
use crate::telemetry::{TelemetryCollector, TelemetryEvent};
use std::sync::Arc;
use std::time::Instant;

/// Stand-in context when retrieval produced no evidence; keeps the prompt
/// and the raw-evidence fallback non-empty
const NO_EVIDENCE: &str = "No relevant information was found in the knowledge base.";

/// Prompt templates per specialist role
fn template(route: Route) -> &'static str {
    match route {
        Route::Account => {
            "You are a banking account specialist. Based on the tool result, provide a clear \
             and professional response to the user's query.\n\n\
             User Query: {query}\nTool Result: {evidence}\n\nResponse:"
        }
        Route::Transaction => {
            "You are a banking transaction specialist. Based on the tool result, provide a \
             clear and professional response to the user's query.\n\n\
             User Query: {query}\nTool Result: {evidence}\n\nResponse:"
        }
        Route::Card => {
            "You are a banking card services specialist. Based on the tool result, provide a \
             clear and professional response to the user's query.\n\n\
             User Query: {query}\nTool Result: {evidence}\n\nResponse:"
        }
        Route::Policy | Route::Fallback => {
            "You are a banking policy expert. Based on the knowledge base information, provide \
             a clear and professional response to the user's query.\n\n\
             User Query: {query}\nKnowledge Base: {evidence}\n\nResponse:"
        }
    }
}

/// Renders evidence plus the original query into the final answer
pub struct ResponseComposer {
    generator: Option<Arc<dyn Generator>>,
    config: GenerationConfig,
    telemetry: TelemetryCollector,
}

impl ResponseComposer {
    /// `generator` is None when generation is disabled or unconfigured;
    /// the composer then returns evidence verbatim.
    pub fn new(
        generator: Option<Arc<dyn Generator>>,
        config: GenerationConfig,
        telemetry: TelemetryCollector,
    ) -> Self {
        Self {
            generator,
            config,
            telemetry,
        }
    }

    /// Build the prompt for a route. Exposed for tests; `compose` is the
    /// operational entry point.
    pub fn build_prompt(&self, route: Route, query: &str, evidence: &str) -> String {
        let evidence = if evidence.trim().is_empty() {
            NO_EVIDENCE
        } else {
            evidence
        };
        template(route)
            .replace("{query}", query)
            .replace("{evidence}", evidence)
    }

    /// Produce the final natural-language answer. Always returns non-empty
    /// text; generation failures degrade, they do not propagate.
    pub async fn compose(&self, route: Route, query: &str, evidence: &str) -> String {
        let generator = match &self.generator {
            Some(g) => g,
            None => return self.verbatim(route, evidence),
        };

        let prompt = self.build_prompt(route, query, evidence);
        let start = Instant::now();

        match generator
            .generate(&prompt, self.config.temperature, self.config.max_tokens)
            .await
        {
            Ok(text) => {
                self.record(true, start);
                if text.trim().is_empty() {
                    self.verbatim(route, evidence)
                } else {
                    text
                }
            }
            Err(e) => {
                self.record(false, start);
                format!(
                    "I'm sorry, I couldn't generate a response right now. \
                     Please try again shortly. ({})",
                    e
                )
            }
        }
    }

    fn verbatim(&self, route: Route, evidence: &str) -> String {
        let evidence = if evidence.trim().is_empty() {
            NO_EVIDENCE
        } else {
            evidence
        };
        if route.uses_retrieval() {
            format!("Here is what I found in our knowledge base:\n\n{}", evidence)
        } else {
            format!("Here is the result of your request:\n\n{}", evidence)
        }
    }

    fn record(&self, success: bool, start: Instant) {
        self.telemetry.record(TelemetryEvent::GenerationCompleted {
            success,
            duration_ms: start.elapsed().as_millis() as u64,
            timestamp: Instant::now(),
        });
    }
}
