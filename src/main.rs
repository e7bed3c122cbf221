use anyhow::Result;
use log::{error, info};
use crate::initialization::init;
use crate::worker::{run, RunOutcome};

mod config;
mod evaluator;
mod initialization;
mod logging;
mod manager_discord;
mod manager_forecast;
mod models;
mod weather_code;
mod worker;

fn main() -> Result<()> {
    // Load config and set up all managers. If initialization fails, logging may not be
    // available, so the error is only returned.
    let (config, mgr) = init()?;

    // Check the forecast and notify if rain is expected
    match run(&config, &mgr, None) {
        Ok(RunOutcome::Notified(count)) => {
            info!("Run complete, notified {} rain occurrence(s)", count);
        },
        Ok(RunOutcome::NoRain) => {
            info!("Run complete, no notification needed");
        },
        Err(e) => {
            error!("Run failed: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
