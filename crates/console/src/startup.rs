use configs::AppConfig;
use service::{runtime, InventoryStore, LoadState};
use tokio::io::{AsyncWriteExt, BufReader};
use tracing::{info, warn};

use crate::render;
use crate::session::run_session;

/// Public entry: open the inventory named by `cfg` and serve stdin until quit.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let data_file = cfg.storage.data_file();
    runtime::ensure_env(&data_file).await?;

    let mut stdout = tokio::io::stdout();
    stdout.write_all(b"Loading...\n").await?;
    let mut store = InventoryStore::open_json(&data_file).await?;

    let mut banner = String::new();
    if let LoadState::Recovered { reason } = store.load_state() {
        warn!(path = %data_file.display(), %reason, "starting from an empty inventory");
        banner.push_str(&format!(
            "Warning: {} could not be read ({reason}); starting empty. The next change overwrites it.\n",
            data_file.display()
        ));
    }
    info!(path = %data_file.display(), count = store.list().len(), "inventory ready");
    banner.push_str(&render::summary(&store.summary()));
    banner.push_str("Type `help` for commands.\n");
    stdout.write_all(banner.as_bytes()).await?;

    run_session(&mut store, BufReader::new(tokio::io::stdin()), stdout).await?;
    info!("console closed");
    Ok(())
}
