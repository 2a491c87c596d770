//! folio - an AI portfolio assistant over client and transaction data.

mod cli;

use anyhow::Context;
use std::io::BufRead;

use cli::Cli;
use folio_assist::agent::Assistant;
use folio_assist::config::{self, Config};
use folio_assist::logging;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();

    if cli.log_file {
        logging::init_file_logging();
    } else {
        logging::init_stderr_logging();
    }

    tokio::runtime::Runtime::new()
        .context("Failed to start async runtime")?
        .block_on(run(cli))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(config::default_config_path);
    let mut config = Config::load_from_file(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    config.apply_env_defaults();

    if let Some(provider) = &cli.provider {
        config.llm.provider = provider.clone();
    }
    if cli.mock {
        // Fully offline: fixture data and the deterministic model.
        config.llm.provider = "mock".to_string();
        config.document.seed_path = None;
        config.relational.url = None;
    }

    let assistant = Assistant::from_config(&config)
        .await
        .context("Failed to construct assistant")?;

    if cli.health {
        println!("{}", assistant.health().summary());
        return Ok(());
    }

    match cli.question_text() {
        Some(question) => {
            let answer = assistant.answer(&question).await;
            println!("{}", answer.text);
            println!("(answered in {:.2}s)", answer.elapsed_secs());
        }
        None => {
            // Interactive: one question per line until EOF.
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = line.context("Failed to read question")?;
                if line.trim().is_empty() {
                    continue;
                }
                let answer = assistant.answer(&line).await;
                println!("{}", answer.text);
                println!("(answered in {:.2}s)", answer.elapsed_secs());
            }
        }
    }

    Ok(())
}
