//! bankbuddy - CLI entry point

use anyhow::Result;
use bankbuddy::cli::{Args, Commands};
use bankbuddy::compose::ResponseComposer;
use bankbuddy::config::Config;
use bankbuddy::embedding::{Embedder, HashingEmbedder, MiniLmEmbedder};
use bankbuddy::generation::{Generator, OpenAiGenerator};
use bankbuddy::ingest::{TextChunker, TextFileLoader};
use bankbuddy::orchestrator::Orchestrator;
use bankbuddy::rag::RetrievalEngine;
use bankbuddy::telemetry::TelemetryCollector;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

/// Sample corpus bundled for the demo scenarios
const SAMPLE_DOCS: &[(&str, &str)] = &[
    ("fee_schedule.txt", include_str!("../data/fee_schedule.txt")),
    (
        "kyc_requirements.txt",
        include_str!("../data/kyc_requirements.txt"),
    ),
    (
        "dispute_process.txt",
        include_str!("../data/dispute_process.txt"),
    ),
];

/// Demo interactions mirroring the classic support-desk walkthrough
const DEMO_SCENARIOS: &[(&str, &str)] = &[
    (
        "Scenario 1: Policy Query (RAG)",
        "What is the fee for an international wire transfer?",
    ),
    (
        "Scenario 2: Account Action (Mock Tool)",
        "What is my current account balance?",
    ),
    (
        "Scenario 3: Complex Policy Query (RAG)",
        "How do I dispute a transaction and how long does it take?",
    ),
    (
        "Scenario 4: Sensitive Action (Mock Tool)",
        "I lost my card, please block it immediately.",
    ),
    (
        "Scenario 5: Transaction Inquiry (Mock Tool)",
        "Show me my recent transactions.",
    ),
];

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load()?;
    let telemetry = TelemetryCollector::new();

    let embedder = build_embedder(args.offline)?;
    let engine = Arc::new(RetrievalEngine::new(
        embedder,
        TextChunker::new(
            config.retrieval.chunk_size,
            config.retrieval.chunk_overlap,
        )?,
        config.retrieval.collection.clone(),
        telemetry.clone(),
    ));

    match &args.command {
        Commands::Ingest { files } => {
            ingest(&engine, files, &args.index)?;
        }
        Commands::Ask { query } => {
            if args.index.exists() {
                engine.restore(&args.index)?;
            } else {
                println!(
                    "{}",
                    "No index file found; answering without a knowledge base. Run `bankbuddy ingest` first.".yellow()
                );
            }

            let mut orchestrator = build_orchestrator(engine, &config, telemetry.clone());
            let response = orchestrator.route_query(query).await;
            println!("{response}");
        }
        Commands::Demo => {
            run_demo(engine, &config, telemetry.clone()).await?;
        }
    }

    if args.verbose {
        telemetry.display_summary();
    }

    Ok(())
}

fn build_embedder(offline: bool) -> Result<Arc<dyn Embedder>> {
    if offline {
        println!("{}", "Embedder: hashing (offline)".dimmed());
        return Ok(Arc::new(HashingEmbedder::new()));
    }

    match MiniLmEmbedder::new() {
        Ok(embedder) => {
            println!("{}", "Embedder: all-MiniLM-L6-v2".dimmed());
            Ok(Arc::new(embedder))
        }
        Err(e) => {
            println!(
                "{} {}",
                "MiniLM unavailable, falling back to hashing embedder:".yellow(),
                e
            );
            Ok(Arc::new(HashingEmbedder::new()))
        }
    }
}

fn build_orchestrator(
    engine: Arc<RetrievalEngine>,
    config: &Config,
    telemetry: TelemetryCollector,
) -> Orchestrator {
    let generator: Option<Arc<dyn Generator>> = if config.generation_ready() {
        println!("{}", "[System] AI Mode: ENABLED".green());
        let gen = config
            .generation
            .api_key
            .as_deref()
            .and_then(|key| {
                OpenAiGenerator::new(&config.generation.base_url, &config.generation.model, key)
                    .ok()
            })
            .map(|g| Arc::new(g) as Arc<dyn Generator>);
        if gen.is_none() {
            println!("{}", "[System] Generation client failed to build; returning raw evidence".yellow());
        }
        gen
    } else {
        println!(
            "{}",
            "[System] AI Mode: DISABLED (set BANKBUDDY_USE_AI=true and an API key to enable)"
                .yellow()
        );
        None
    };

    Orchestrator::new(
        engine,
        ResponseComposer::new(generator, config.generation.clone(), telemetry.clone()),
        config.retrieval.top_k,
        telemetry,
    )
}

fn ingest(engine: &RetrievalEngine, files: &[PathBuf], index_path: &PathBuf) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    spinner.set_message(format!("Ingesting {} document(s)...", files.len()));

    let report = engine.ingest(files, &TextFileLoader)?;
    spinner.finish_and_clear();

    println!(
        "{} {} chunks from {} document(s)",
        "Ingested".green(),
        report.chunks,
        report.documents
    );
    for warning in &report.skipped {
        println!("{} {}", "Skipped:".yellow(), warning);
    }

    engine.persist(index_path)?;
    println!("Index written to {}", index_path.display());
    Ok(())
}

async fn run_demo(
    engine: Arc<RetrievalEngine>,
    config: &Config,
    telemetry: TelemetryCollector,
) -> Result<()> {
    println!("{}", "=".repeat(50));
    println!("Banking Support Assistant Demo");
    println!("{}", "=".repeat(50));

    // Materialize the bundled corpus so ingestion exercises the real loader
    let dir = std::env::temp_dir().join(format!("bankbuddy-demo-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir)?;
    let mut paths = Vec::new();
    for (name, text) in SAMPLE_DOCS {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path)?;
        write!(file, "{text}")?;
        paths.push(path);
    }

    let report = engine.ingest(&paths, &TextFileLoader)?;
    let _ = std::fs::remove_dir_all(&dir);
    println!(
        "[System] Ingested {} chunks from {} sample documents.\n",
        report.chunks, report.documents
    );

    let mut orchestrator = build_orchestrator(engine, config, telemetry);

    for (description, query) in DEMO_SCENARIOS {
        println!("{}", format!("--- {description} ---").cyan());
        println!("{} {query}", "User:".bold());
        let response = orchestrator.route_query(query).await;
        println!("{}\n{response}", "Assistant:".bold());
        println!("{}", "-".repeat(30));
    }

    Ok(())
}
