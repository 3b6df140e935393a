//! BuyLevel engine - console host entry point.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use buylevel_engine::api::{ConsoleCommand, ConsoleHost};
use buylevel_engine::infrastructure::ports::ProgressionPort;
use buylevel_engine::infrastructure::progression::{InMemoryProgression, LevelTable};
use buylevel_engine::infrastructure::settings::{HostSettings, PurchaseSettings};
use buylevel_engine::BuyLevelPlugin;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary may be run from `crates/engine`).
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "buylevel_engine=debug,chat=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting BuyLevel engine");

    let settings = PurchaseSettings::from_env()?;
    let host = HostSettings::from_env()?;

    let table = match &host.level_table_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading level table");
            LevelTable::load(path)?
        }
        None => LevelTable::default(),
    };
    tracing::info!(levels = table.len(), "Level table ready");

    let progression = Arc::new(InMemoryProgression::new(table));
    let bound: Option<Arc<dyn ProgressionPort>> = if host.progression_enabled {
        Some(progression.clone())
    } else {
        None
    };
    let plugin = BuyLevelPlugin::load(bound, settings);
    let console = ConsoleHost::new(plugin, progression);

    println!("{}", buylevel_engine::api::console::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<ConsoleCommand>() {
            Ok(ConsoleCommand::Quit) => break,
            Ok(command) => {
                for out in console.run(command) {
                    println!("{}", out);
                }
            }
            Err(e) => println!("{}", e),
        }
    }

    tracing::info!("Console closed, shutting down");
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
