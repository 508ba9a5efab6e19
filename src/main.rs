use std::process::ExitCode;

use gorizon_api::{config::Config, logging, run_app};

#[tokio::main]
async fn main() -> ExitCode {
    let env_file = dotenvy::dotenv();
    logging::init_logger();
    match env_file {
        Ok(path) => tracing::info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => tracing::debug!("No .env file found"),
        Err(e) => tracing::warn!("Failed to load .env file: {e}"),
    }

    let result = match Config::from_env() {
        Ok(config) => run_app(config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
