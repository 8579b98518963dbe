//! Deterministic intent routing
//!
//! A query is classified by a fixed-order table of keyword rules; the first
//! matching rule wins. Rule order is load-bearing: the policy rule's
//! exclusion set only protects action queries because it is evaluated before
//! the action rules, not as a tiebreak against them. There is no ambiguous
//! outcome; an unmatched query falls back to retrieval on the theory that an
//! unclassified query is more likely informational than actionable.

use serde::{Deserialize, Serialize};

/// Classification outcome for one query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    /// Answer from the knowledge base (retrieval + generation)
    Policy,
    /// Dispatch to the account agent
    Account,
    /// Dispatch to the transaction agent
    Transaction,
    /// Dispatch to the card agent
    Card,
    /// Nothing matched; handled identically to Policy
    Fallback,
}

impl Route {
    /// Routes answered via retrieval rather than an action agent
    pub fn uses_retrieval(&self) -> bool {
        matches!(self, Route::Policy | Route::Fallback)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Policy => "Policy",
            Route::Account => "Account",
            Route::Transaction => "Transaction",
            Route::Card => "Card",
            Route::Fallback => "Fallback",
        }
    }
}

/// One row of the routing table: any keyword matches, no exclusion matches
#[derive(Debug, Clone)]
pub struct RoutingRule {
    pub route: Route,
    pub keywords: &'static [&'static str],
    pub exclusions: &'static [&'static str],
}

impl RoutingRule {
    /// Any-of match over a pre-lowercased query, none-of over the exclusions.
    ///
    /// Keywords match as plain substrings. Only exclusions get the looser
    /// word-subsequence reading: an exclusion exists to recognize an
    /// actionable request however it is phrased, while a loose keyword match
    /// would pull actionable queries into the knowledge base whenever their
    /// words happen to straddle a phrase like "how to".
    pub fn matches(&self, query_lower: &str) -> bool {
        self.keywords.iter().any(|k| query_lower.contains(k))
            && !self.exclusions.iter().any(|k| exclusion_matches(query_lower, k))
    }
}

/// Single-word exclusions match as substrings. Multi-word exclusions match
/// as an ordered word subsequence, so "my account" catches "my current
/// account balance" where a plain substring test would miss it.
fn exclusion_matches(query_lower: &str, phrase: &str) -> bool {
    if !phrase.contains(' ') {
        return query_lower.contains(phrase);
    }

    let mut words = query_lower.split_whitespace();
    phrase
        .split_whitespace()
        .all(|part| words.any(|w| w.trim_matches(|c: char| !c.is_alphanumeric()) == part))
}

/// Policy-question keywords; generic informational vocabulary
const POLICY_KEYWORDS: &[&str] = &[
    "fee",
    "cost",
    "charge",
    "requirement",
    "document",
    "id",
    "dispute",
    "policy",
    "process",
    "how to",
    "what is",
];

/// Phrases that mark a clearly personal/actionable request, so generic words
/// like "process" cannot hijack it into the knowledge base. "transfer" is
/// deliberately the two-word actionable form: a bare "transfer" would drag
/// informational questions about transfer fees away from the knowledge base.
const POLICY_EXCLUSIONS: &[&str] = &[
    "my account",
    "my card",
    "transfer money",
    "transfer funds",
    "block",
];

/// The routing table, evaluated top to bottom
const RULES: &[RoutingRule] = &[
    RoutingRule {
        route: Route::Policy,
        keywords: POLICY_KEYWORDS,
        exclusions: POLICY_EXCLUSIONS,
    },
    RoutingRule {
        route: Route::Account,
        keywords: &["account", "balance"],
        exclusions: &[],
    },
    RoutingRule {
        route: Route::Transaction,
        keywords: &["transfer", "transaction", "sent", "received"],
        exclusions: &[],
    },
    RoutingRule {
        route: Route::Card,
        keywords: &["card", "block", "lost"],
        exclusions: &[],
    },
];

/// Pure keyword classifier over the raw query string
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentRouter;

impl IntentRouter {
    pub fn new() -> Self {
        Self
    }

    /// Classify a query. First matching rule wins; no match is `Fallback`.
    pub fn classify(&self, query: &str) -> Route {
        let query_lower = query.to_lowercase();
        RULES
            .iter()
            .find(|rule| rule.matches(&query_lower))
            .map(|rule| rule.route)
            .unwrap_or(Route::Fallback)
    }

    /// The rule table, for per-rule unit testing
    pub fn rules() -> &'static [RoutingRule] {
        RULES
    }
}
