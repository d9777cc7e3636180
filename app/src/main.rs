mod commands;

use anyhow::{Context, Result};
use commands::Command;
use rag_client::{render, ClientConfig, IndexClient, SelectedFile, Shell};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::init();

    let config = match load_config(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config).await {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

/// `--url <URL>` on the command line wins over `RAG_INDEX_URL`.
fn load_config(mut args: impl Iterator<Item = String>) -> Result<ClientConfig> {
    match args.next().as_deref() {
        Some("--url") => {
            let url = args.next().context("--url needs a value")?;
            ClientConfig::new(&url)
        }
        Some(arg) if arg.starts_with("--url=") => ClientConfig::new(&arg["--url=".len()..]),
        Some(other) => Err(anyhow::anyhow!("unexpected argument: {}", other)),
        None => ClientConfig::from_env(),
    }
}

async fn run(config: ClientConfig) -> Result<()> {
    log::info!("Using index service at {}", config.base_url);

    let client = Arc::new(IndexClient::new(config));
    let shell = Shell::new(client.clone());

    // Re-render whenever the view changes, including when a request
    // finishes in the background.
    let mut updates = shell.subscribe();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            println!("{}", render(&state));
        }
    });

    println!("{}", render(&shell.snapshot().await));
    println!("{}", commands::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read input")? {
        let command = match commands::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            Command::Query(text) => {
                shell.on_query_changed(text).await;
                shell.on_query_submit().await;
            }
            Command::Ask => {
                shell.on_query_submit().await;
            }
            Command::File(path) => shell.on_file_selected(SelectedFile::new(path)).await,
            Command::Upload => {
                shell.on_upload_click().await;
            }
            Command::Status => match client.ping().await {
                Ok(greeting) => println!(
                    "Index service at {} is up: {}",
                    client.config().base_url,
                    greeting.trim()
                ),
                Err(e) => {
                    log::error!("Ping failed: {:#}", e);
                    println!("Index service at {} is unreachable.", client.config().base_url);
                }
            },
            Command::Show => println!("{}", render(&shell.snapshot().await)),
            Command::Help => println!("{}", commands::HELP),
            Command::Quit => break,
        }
    }

    Ok(())
}
