use common::LogFormat;
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn main() -> std::process::ExitCode {
    // .env first so RUST_LOG / CONFIG_PATH / INVENTORY_DATA_FILE apply
    dotenv().ok();

    let cfg = configs::AppConfig::load_and_validate();
    let format = cfg
        .as_ref()
        .map(|c| LogFormat::from_config(&c.logging.format))
        .unwrap_or(LogFormat::Compact);
    common::utils::logging::init_logging(format);
    info!(service = "inventory", event = "logger_init", "tracing subscriber initialized");

    let cfg = match cfg {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "inventory", event = "config_invalid", error = %e, "invalid configuration");
            return std::process::ExitCode::FAILURE;
        }
    };

    let session_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "inventory",
            event = "panic",
            %session_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "inventory", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "inventory",
        event = "start",
        %session_id,
        pid,
        version,
        data_file = %cfg.storage.data_file().display(),
        "inventory console starting"
    );

    let exit_code = rt.block_on(async move {
        // saves go through write-then-rename; an interrupted save leaves the previous file intact
        tokio::select! {
            res = console::run(cfg) => match res {
                Ok(()) => {
                    info!(service = "inventory", event = "stop", %session_id, pid, "console closed normally");
                    std::process::ExitCode::SUCCESS
                }
                Err(e) => {
                    error!(service = "inventory", event = "run_failed", error = %e, "console::run returned error");
                    std::process::ExitCode::FAILURE
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!(service = "inventory", event = "shutdown_signal", %session_id, pid, "received Ctrl+C, shutting down");
                std::process::ExitCode::SUCCESS
            }
        }
    });

    // stdin reads sit on a blocking thread; do not wait for them
    rt.shutdown_background();
    exit_code
}
