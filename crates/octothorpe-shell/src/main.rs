// File: src/main.rs
// Purpose: Terminal front end for the Octothorpe engine

mod repl;
mod seed;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use octothorpe::{Config, MemoryEvents, MemoryHost, MemoryKv, MemorySessions, Spa};

#[derive(Parser)]
#[command(name = "octo")]
#[command(version, about = "Octothorpe shell - drive the event app from a terminal", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "octothorpe.toml")]
    config: PathBuf,

    /// Run commands from a file instead of the interactive prompt
    #[arg(short, long)]
    script: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}, using defaults", e);
        Config::default()
    });

    println!("{}", config.app.title.green().bold());
    println!();

    let vault = Arc::new(MemoryKv::new());
    let host = Arc::new(MemoryHost::new());
    let sessions =
        Arc::new(MemorySessions::open(vault, config.storage.session_key.as_str()).await);
    let events = Arc::new(MemoryEvents::new());

    if config.demo.seed {
        println!("{}", "Seeding demo data...".bold());
        seed::run(&config, &sessions, &events).await;
        println!();
    }

    let spa = Arc::new(Spa::new(config, host.clone(), sessions.clone(), events));
    spa.boot().await;

    let shell = repl::Shell {
        spa,
        host,
        sessions,
    };

    match cli.script {
        Some(path) => {
            let source = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read script file: {:?}", path))?;
            repl::run_script(&shell, &source).await
        }
        None => repl::run(&shell).await,
    }
}
