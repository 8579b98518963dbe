//! In-process telemetry for the assistant
//!
//! Collects per-request events (routing decisions, tool calls, generation
//! outcomes) and ingestion totals for display after a session.

use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Telemetry event types
#[derive(Debug, Clone)]
pub enum TelemetryEvent {
    /// A query was classified to a route
    QueryRouted {
        route: String,
        timestamp: Instant,
    },
    /// An ingestion run completed
    DocumentsIngested {
        documents: usize,
        chunks: usize,
        skipped: usize,
        timestamp: Instant,
    },
    /// A retrieval produced evidence (or none)
    ContextRetrieved {
        hits: usize,
        timestamp: Instant,
    },
    /// A backend tool was invoked by an action agent
    ToolInvoked {
        tool: String,
        operation: String,
        timestamp: Instant,
    },
    /// The generation collaborator returned or failed
    GenerationCompleted {
        success: bool,
        duration_ms: u64,
        timestamp: Instant,
    },
}

/// Telemetry statistics
#[derive(Debug, Clone, Default)]
pub struct TelemetryStats {
    pub queries_routed: usize,
    pub ingestion_runs: usize,
    pub chunks_ingested: usize,
    pub retrievals: usize,
    pub empty_retrievals: usize,
    pub tools_invoked: usize,
    pub generations_succeeded: usize,
    pub generations_failed: usize,
}

/// Telemetry collector shared across the pipeline
#[derive(Clone)]
pub struct TelemetryCollector {
    events: Arc<Mutex<Vec<TelemetryEvent>>>,
    stats: Arc<Mutex<TelemetryStats>>,
    start_time: Instant,
}

impl TelemetryCollector {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            stats: Arc::new(Mutex::new(TelemetryStats::default())),
            start_time: Instant::now(),
        }
    }

    /// Record an event
    pub fn record(&self, event: TelemetryEvent) {
        {
            let mut stats = self.stats.lock().unwrap();
            match &event {
                TelemetryEvent::QueryRouted { .. } => {
                    stats.queries_routed += 1;
                }
                TelemetryEvent::DocumentsIngested { chunks, .. } => {
                    stats.ingestion_runs += 1;
                    stats.chunks_ingested += chunks;
                }
                TelemetryEvent::ContextRetrieved { hits, .. } => {
                    stats.retrievals += 1;
                    if *hits == 0 {
                        stats.empty_retrievals += 1;
                    }
                }
                TelemetryEvent::ToolInvoked { .. } => {
                    stats.tools_invoked += 1;
                }
                TelemetryEvent::GenerationCompleted { success, .. } => {
                    if *success {
                        stats.generations_succeeded += 1;
                    } else {
                        stats.generations_failed += 1;
                    }
                }
            }
        }

        let mut events = self.events.lock().unwrap();
        events.push(event);
    }

    /// Get current statistics
    pub fn get_stats(&self) -> TelemetryStats {
        self.stats.lock().unwrap().clone()
    }

    /// Get elapsed time since start
    pub fn elapsed(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }

    /// Get event count
    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Get recent events (last n)
    pub fn recent_events(&self, n: usize) -> Vec<TelemetryEvent> {
        let events = self.events.lock().unwrap();
        let start = events.len().saturating_sub(n);
        events[start..].to_vec()
    }

    /// Share of generation calls that succeeded
    pub fn generation_success_rate(&self) -> f64 {
        let stats = self.stats.lock().unwrap();
        let total = stats.generations_succeeded + stats.generations_failed;
        if total == 0 {
            1.0
        } else {
            stats.generations_succeeded as f64 / total as f64
        }
    }

    /// Display summary statistics
    pub fn display_summary(&self) {
        let stats = self.get_stats();
        let elapsed = self.elapsed();

        println!("\n📊 Session Summary");
        println!("─────────────────────────────────────");
        println!("Duration:          {:?}", elapsed);
        println!("Queries routed:    {}", stats.queries_routed);
        println!("Chunks ingested:   {}", stats.chunks_ingested);
        println!(
            "Retrievals:        {} ({} empty)",
            stats.retrievals, stats.empty_retrievals
        );
        println!("Tools invoked:     {}", stats.tools_invoked);
        println!(
            "Generation:        {:.1}% ok",
            self.generation_success_rate() * 100.0
        );
        println!();
    }
}

impl Default for TelemetryCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_creation() {
        let collector = TelemetryCollector::new();
        assert_eq!(collector.event_count(), 0);
        let stats = collector.get_stats();
        assert_eq!(stats.queries_routed, 0);
    }

    #[test]
    fn test_record_routing_event() {
        let collector = TelemetryCollector::new();
        collector.record(TelemetryEvent::QueryRouted {
            route: "Policy".to_string(),
            timestamp: Instant::now(),
        });

        let stats = collector.get_stats();
        assert_eq!(stats.queries_routed, 1);
        assert_eq!(collector.event_count(), 1);
    }

    #[test]
    fn test_record_ingestion_totals() {
        let collector = TelemetryCollector::new();
        collector.record(TelemetryEvent::DocumentsIngested {
            documents: 3,
            chunks: 42,
            skipped: 1,
            timestamp: Instant::now(),
        });

        let stats = collector.get_stats();
        assert_eq!(stats.ingestion_runs, 1);
        assert_eq!(stats.chunks_ingested, 42);
    }

    #[test]
    fn test_empty_retrieval_counted() {
        let collector = TelemetryCollector::new();
        collector.record(TelemetryEvent::ContextRetrieved {
            hits: 3,
            timestamp: Instant::now(),
        });
        collector.record(TelemetryEvent::ContextRetrieved {
            hits: 0,
            timestamp: Instant::now(),
        });

        let stats = collector.get_stats();
        assert_eq!(stats.retrievals, 2);
        assert_eq!(stats.empty_retrievals, 1);
    }

    #[test]
    fn test_generation_success_rate() {
        let collector = TelemetryCollector::new();

        collector.record(TelemetryEvent::GenerationCompleted {
            success: true,
            duration_ms: 250,
            timestamp: Instant::now(),
        });
        collector.record(TelemetryEvent::GenerationCompleted {
            success: true,
            duration_ms: 300,
            timestamp: Instant::now(),
        });
        collector.record(TelemetryEvent::GenerationCompleted {
            success: false,
            duration_ms: 30_000,
            timestamp: Instant::now(),
        });

        let rate = collector.generation_success_rate();
        assert!((rate - 0.666).abs() < 0.01);
    }

    #[test]
    fn test_recent_events() {
        let collector = TelemetryCollector::new();

        for _ in 0..10 {
            collector.record(TelemetryEvent::ToolInvoked {
                tool: "account".to_string(),
                operation: "get_balance".to_string(),
                timestamp: Instant::now(),
            });
        }

        let recent = collector.recent_events(3);
        assert_eq!(recent.len(), 3);
    }
}
