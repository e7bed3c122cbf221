use log::info;
use thiserror::Error;
use crate::config::{load_config, Config, ConfigError};
use crate::logging::{setup_logger, LoggerError};
use crate::manager_discord::{Discord, SendError};
use crate::manager_forecast::{FetchError, Forecast};

pub struct Mgr {
    pub forecast: Forecast,
    pub discord: Discord,
}

/// Initializes and returns configuration and a Mgr struct holding the initialized managers
///
/// Values from a `.env` file in the working directory are picked up, but variables already set
/// in the environment take precedence.
pub fn init() -> Result<(Config, Mgr), InitializationError> {
    let _ = dotenv::dotenv();

    // Load configuration
    let config = load_config()?;

    // Setup logging
    let _ = setup_logger(config.general.log_path.as_deref(), config.general.log_level)?;

    // Print version
    info!("starting rain notifier version: {}", env!("CARGO_PKG_VERSION"));

    // Instantiate structs
    let forecast = Forecast::new(&config)?;
    let discord = Discord::new(&config)?;

    let mgr = Mgr {
        forecast,
        discord,
    };

    Ok((config, mgr))
}

/// Error depicting errors that occur while initializing the notifier
///
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("ConfigurationError: {0}")]
    ConfigurationError(#[from] ConfigError),
    #[error("SetupLoggerError: {0}")]
    SetupLoggerError(#[from] LoggerError),
    #[error("ForecastSetupError: {0}")]
    ForecastSetupError(#[from] FetchError),
    #[error("DiscordSetupError: {0}")]
    DiscordSetupError(#[from] SendError),
}
