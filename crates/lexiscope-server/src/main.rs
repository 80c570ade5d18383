//! Lexiscope: text analysis server and command-line tool.

use std::path::PathBuf;
use std::sync::Arc;

use lexiscope_core::LexiscopeConfig;
use lexiscope_runtime::AnalysisPipeline;
use lexiscope_server::{build_router, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn resolve_data_dir() -> PathBuf {
    std::env::var("LEXISCOPE_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

fn print_help() {
    println!("Lexiscope: text analysis server");
    println!();
    println!("Usage: lexiscope [command]");
    println!();
    println!("Commands:");
    println!("  (none) | serve           Start the HTTP server");
    println!("  analyze <text...>        Analyze text once and print the result as JSON");
    println!("  help                     Show this help message");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let data_dir = resolve_data_dir();

    match args.get(1).map(String::as_str) {
        None | Some("serve") => serve(data_dir).await,
        Some("analyze") => {
            let text = args[2..].join(" ");
            if text.trim().is_empty() {
                eprintln!("Usage: lexiscope analyze <text...>");
                std::process::exit(1);
            }
            analyze_once(data_dir, &text).await
        }
        Some("--help") | Some("-h") | Some("help") => {
            print_help();
            Ok(())
        }
        Some(other) => {
            eprintln!("Unknown command: {}. Use 'lexiscope help' for usage.", other);
            std::process::exit(1);
        }
    }
}

async fn analyze_once(data_dir: PathBuf, text: &str) -> anyhow::Result<()> {
    let config = LexiscopeConfig::from_env(&data_dir)?;
    let pipeline = AnalysisPipeline::from_config(&config);
    let report = pipeline.analyze(text).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn serve(data_dir: PathBuf) -> anyhow::Result<()> {
    info!("Data directory: {}", data_dir.display());

    let config = LexiscopeConfig::from_env(&data_dir)?;
    let port = config.port;

    let state = Arc::new(AppState::from_config(&config)?);
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Lexiscope server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
