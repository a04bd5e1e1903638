mod terminal;

use anyhow::Result;
use runpad_term::application::cli;
use runpad_term::application::logging;
use runpad_term::configuration::Config;
use runpad_term::configuration::ConfigKey;
use runpad_term::Outcome;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli::parse().await?;
    let guard = logging::init(&Config::get(ConfigKey::LogLevel))?;

    match cli::dispatch(&matches).await? {
        Outcome::StartUi => {
            tracing::info!(language = %Config::get(ConfigKey::Language), "starting ui");
            terminal::run().await?;
        }
        Outcome::Exit(0) => {}
        Outcome::Exit(code) => {
            drop(guard);
            std::process::exit(code);
        }
    }

    return Ok(());
}
