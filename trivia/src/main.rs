//! Trivia Server
//!
//! Seeds the question set if needed, then serves questions and static pages.
use anyhow::Context;
use clap::{Arg, Command};

use refdata_core::core::{create_app_state, init_logging, shutdown_signal, Config, Service};
use refdata_core::log_info;
use trivia_server::{api, questions, SeedOutcome};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let matches = Command::new("trivia-server")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Trivia question service")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
        )
        .get_matches();

    let config_path = matches.get_one::<String>("config").map(|s| s.as_str());
    let config = Config::load(Service::Trivia, config_path).context("Failed to load configuration")?;

    init_logging(&config.logging);
    log_info!("Starting trivia server v{}", env!("CARGO_PKG_VERSION"));
    log_info!("{}", Config::describe_source(config_path));

    let configured_app_state = create_app_state(config)
        .await
        .context("Failed to connect to the document store")?;

    match questions::seed(&configured_app_state).await.context("Failed to seed questions")? {
        SeedOutcome::Seeded(n) => log_info!("Seeded {} questions", n),
        SeedOutcome::AlreadyPresent(_) => {}
    }

    api::start_server(configured_app_state, shutdown_signal())
        .await
        .context("HTTP server failed")?;

    log_info!("Shutdown complete");
    Ok(())
}
