use header_microtime::{MicrotimeModule, load_server};
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

const DEFAULT_CONF_PATH: &str = "conf/header-microtime.conf";

#[tokio::main]
async fn main() -> ExitCode {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("setting default subscriber failed: {e}");
        return ExitCode::FAILURE;
    }

    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONF_PATH.to_string());

    let server = match load_server(&path, MicrotimeModule::new()) {
        Ok(server) => server,
        Err(e) => {
            error!(cause = %e, path = %path, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    info!(path = %path, locations = server.locations().len(), "configuration loaded");

    match server.start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
