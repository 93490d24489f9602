use std::sync::Arc;

use anyhow::Context;
use dungeondraw::{
    init_logging, DocumentId, DungeonController, DungeonHandle, FileDocumentStore, LogRenderer,
    SessionCommand, BUILD_DATE, VERSION,
};
use tokio::io::{AsyncBufReadExt, BufReader};

const DEFAULT_DOCUMENT: &str = "dungeon";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let mut args = std::env::args().skip(1);
    let Some(root) = args.next() else {
        anyhow::bail!("usage: dungeondraw <store-dir> [document-id]");
    };
    let document = DocumentId::new(args.next().unwrap_or_else(|| DEFAULT_DOCUMENT.to_string()));

    tracing::info!("Dungeon Draw {} (built {})", VERSION, BUILD_DATE);

    let store = FileDocumentStore::open(&root)
        .with_context(|| format!("failed to open store at {}", root))?;
    let controller = DungeonController::new(document, Arc::new(store), Arc::new(LogRenderer));
    let handle = DungeonHandle::new(controller);
    handle
        .load_from_journal_entry()
        .await
        .with_context(|| format!("failed to load {}", handle.document()))?;
    let watcher = handle.watch();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let command = match line.parse::<SessionCommand>() {
            Ok(SessionCommand::Quit) => break,
            Ok(command) => command,
            Err(e) => {
                println!("error: {}", e);
                continue;
            }
        };
        match command.apply(&handle).await {
            Ok(report) => println!("{}", report),
            Err(e) => {
                tracing::warn!("{:?} failed: {}", command, e);
                println!("error: {}", e);
            }
        }
    }

    watcher.abort();
    Ok(())
}
