use models::CATEGORIES;
use service::{InventoryStore, ServiceError};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::commands::{Command, HELP};
use crate::render;

const PROMPT: &str = "> ";

/// Read commands from `input` until `quit` or end of input, writing every
/// response to `output`.
pub async fn run_session<R, W>(store: &mut InventoryStore, input: R, mut output: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    write(&mut output, PROMPT).await?;
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            write(&mut output, PROMPT).await?;
            continue;
        }
        let command = match Command::parse(&line) {
            Ok(c) => c,
            Err(e) => {
                write(&mut output, &format!("{e}\n{PROMPT}")).await?;
                continue;
            }
        };
        debug!(?command, "console command");
        let reply = match command {
            Command::Quit => break,
            Command::Delete(id) => {
                let Some(name) = store.get(id).map(|p| p.name.clone()) else {
                    write(&mut output, &format!("{}\n{PROMPT}", describe(&ServiceError::NotFound(id)))).await?;
                    continue;
                };
                write(&mut output, &format!("Delete {name}? [y/N] ")).await?;
                let answer = lines.next_line().await?.unwrap_or_default();
                if matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
                    match store.delete(id).await {
                        Ok(p) => format!("Deleted {p}\n{}", render::summary(&store.summary())),
                        Err(e) => mutation_failed(store, &e),
                    }
                } else {
                    "Delete cancelled.\n".to_string()
                }
            }
            Command::Search(term) => {
                write(&mut output, "Searching...\n").await?;
                match store.search_in_background(&term).await {
                    Ok(found) => format!("{}Found: {}\n", render::table(&found), found.len()),
                    Err(e) => format!("Search failed: {e}\n"),
                }
            }
            other => execute(store, other).await,
        };
        write(&mut output, &format!("{reply}{PROMPT}")).await?;
    }
    output.flush().await?;
    Ok(())
}

async fn execute(store: &mut InventoryStore, command: Command) -> String {
    match command {
        Command::List => format!("{}{}", render::table(store.list()), render::summary(&store.summary())),
        Command::Get(id) => match store.get(id) {
            Some(p) => render::table(std::slice::from_ref(p)),
            None => format!("{}\n", describe(&ServiceError::NotFound(id))),
        },
        Command::Add(form) => {
            let input = match form.parse() {
                Ok(input) => input,
                Err(e) => return format!("{e}\n"),
            };
            match store.add(input).await {
                Ok(p) => format!("Added {p}\n{}", render::summary(&store.summary())),
                Err(e) => mutation_failed(store, &e),
            }
        }
        Command::Update(id, form) => {
            let input = match form.parse() {
                Ok(input) => input,
                Err(e) => return format!("{e}\n"),
            };
            match store.update(id, input).await {
                Ok(p) => format!("Updated {p}\n{}", render::summary(&store.summary())),
                Err(e) => mutation_failed(store, &e),
            }
        }
        Command::Summary => render::summary(&store.summary()),
        Command::Save => match store.save_all().await {
            Ok(()) => "Saved.\n".to_string(),
            Err(e) => format!("{}\n", describe(&e)),
        },
        Command::Categories => format!("{}\n", CATEGORIES.join(", ")),
        Command::Metrics => service::metrics::gather_text(),
        Command::Help => format!("{HELP}\n"),
        // handled by the session loop
        Command::Delete(_) | Command::Search(_) | Command::Quit => String::new(),
    }
}

/// A failed save still changed the inventory, so the summary is shown too.
fn mutation_failed(store: &InventoryStore, err: &ServiceError) -> String {
    match err {
        ServiceError::Persistence(_) => format!("{}\n{}", describe(err), render::summary(&store.summary())),
        _ => format!("{}\n", describe(err)),
    }
}

fn describe(err: &ServiceError) -> String {
    match err {
        ServiceError::DuplicateId(id) => format!("Product ID {id} already exists."),
        ServiceError::NotFound(id) => format!("Product {id} not found."),
        ServiceError::Model(e) => e.to_string(),
        ServiceError::Persistence(e) => format!("Failed to save: {e} (type `save` to retry)"),
    }
}

async fn write<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> std::io::Result<()> {
    output.write_all(text.as_bytes()).await?;
    output.flush().await
}
