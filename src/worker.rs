use chrono::{DurationRound, NaiveDateTime, TimeDelta, Utc};
use log::{info, warn};
use thiserror::Error;
use crate::config::Config;
use crate::evaluator::evaluate;
use crate::initialization::Mgr;
use crate::manager_discord::SendError;
use crate::manager_forecast::FetchError;

#[derive(Debug, PartialEq)]
pub enum RunOutcome {
    NoRain,
    Notified(usize),
}

/// Runs one fetch, evaluate and notify cycle
///
/// # Arguments
///
/// * 'config' - configuration
/// * 'mgr' - struct with configured managers
/// * 'debug_run_time' - a local run time to be used instead of now in the configured timezone
pub fn run(config: &Config, mgr: &Mgr, debug_run_time: Option<NaiveDateTime>) -> Result<RunOutcome, WorkerError> {

    // If a run time is given, use that. Otherwise, use the current time.
    let run_start = if let Some(run_start) = debug_run_time {
        run_start
    } else {
        Utc::now().with_timezone(&config.forecast.timezone).naive_local()
    };
    let from = run_start.duration_trunc(TimeDelta::hours(1))
        .map_err(|e| WorkerError::DateError(format!("run start: {}", e)))?;

    info!("checking precipitation forecast at {}, {} from {}", config.geo_ref.lat, config.geo_ref.long, from);

    let window = mgr.forecast.new_forecast(from)?;
    let events = evaluate(&window, config.rain.threshold_mm, config.rain.hours_to_check as usize);

    if events.is_empty() {
        info!("no rain expected within {} hour(s)", config.rain.hours_to_check);
        return Ok(RunOutcome::NoRain);
    }

    warn!("rain expected: {} occurrence(s)", events.len());
    for e in events.iter() {
        info!("  - {}: {}mm ({})", e.valid_time.format("%H:%M"), e.precipitation_mm, e.condition().description());
    }

    mgr.discord.send_alert(&events)?;
    info!("discord notification sent");

    Ok(RunOutcome::Notified(events.len()))
}

/// Error depicting errors that occur during a run
///
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("DateError: {0}")]
    DateError(String),
    #[error("FetchError: {0}")]
    FetchError(#[from] FetchError),
    #[error("SendError: {0}")]
    SendError(#[from] SendError),
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::{json, Value};
    use tokio::runtime::Runtime;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use crate::config::test_config;
    use crate::manager_discord::Discord;
    use crate::manager_forecast::Forecast;
    use super::*;

    fn run_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 14).unwrap().and_hms_opt(15, 12, 0).unwrap()
    }

    /// Mock server with a forecast endpoint and a webhook expecting the given number of posts
    fn server(rt: &Runtime, forecast: Value, webhook_status: u16, webhook_calls: u64) -> MockServer {
        rt.block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/v1/jma"))
                .respond_with(ResponseTemplate::new(200).set_body_json(forecast))
                .expect(1)
                .mount(&server)
                .await;
            Mock::given(method("POST"))
                .and(path("/hook"))
                .respond_with(ResponseTemplate::new(webhook_status))
                .expect(webhook_calls)
                .mount(&server)
                .await;
            server
        })
    }

    fn setup(server: &MockServer, hours_to_check: u8) -> (Config, Mgr) {
        let mut config = test_config(&format!("{}/v1/jma", server.uri()), &format!("{}/hook", server.uri()));
        config.rain.hours_to_check = hours_to_check;
        let mgr = Mgr {
            forecast: Forecast::new(&config).unwrap(),
            discord: Discord::new(&config).unwrap(),
        };
        (config, mgr)
    }

    fn rainy_forecast() -> Value {
        json!({
            "hourly": {
                "time": ["2025-06-14T15:00", "2025-06-14T16:00", "2025-06-14T17:00"],
                "precipitation": [2.5, 0.2, 3.0],
                "weather_code": [63, 3, 65]
            }
        })
    }

    #[test]
    fn rain_sends_one_notification() {
        let rt = Runtime::new().unwrap();
        let server = server(&rt, rainy_forecast(), 204, 1);
        let (config, mgr) = setup(&server, 3);

        let outcome = run(&config, &mgr, Some(run_time())).unwrap();

        assert_eq!(outcome, RunOutcome::Notified(2));
        let received = rt.block_on(server.received_requests()).unwrap();
        let post = received.iter().find(|r| r.url.path() == "/hook").unwrap();
        let body: Value = serde_json::from_slice(&post.body).unwrap();
        assert_eq!(body["embeds"][0]["fields"][0]["value"],
                   "`15:00` - 雨 (降水量: 2.5mm)\n`17:00` - 大雨 (降水量: 3mm)");
    }

    #[test]
    fn no_rain_skips_webhook() {
        let rt = Runtime::new().unwrap();
        let forecast = json!({
            "hourly": { "time": ["2025-06-14T15:00"], "precipitation": [0.1] }
        });
        let server = server(&rt, forecast, 204, 0);
        let (config, mgr) = setup(&server, 2);

        let outcome = run(&config, &mgr, Some(run_time())).unwrap();

        assert_eq!(outcome, RunOutcome::NoRain);
    }

    #[test]
    fn rain_beyond_lookahead_skips_webhook() {
        let rt = Runtime::new().unwrap();
        let forecast = json!({
            "hourly": {
                "time": ["2025-06-14T15:00", "2025-06-14T16:00", "2025-06-14T17:00",
                         "2025-06-14T18:00", "2025-06-14T19:00"],
                "precipitation": [0.0, 0.4, 5.0, 6.0, 7.0]
            }
        });
        let server = server(&rt, forecast, 204, 0);
        let (config, mgr) = setup(&server, 2);

        let outcome = run(&config, &mgr, Some(run_time())).unwrap();

        assert_eq!(outcome, RunOutcome::NoRain);
    }

    #[test]
    fn webhook_failure_is_send_error() {
        let rt = Runtime::new().unwrap();
        let server = server(&rt, rainy_forecast(), 500, 1);
        let (config, mgr) = setup(&server, 3);

        let result = run(&config, &mgr, Some(run_time()));

        assert!(matches!(result, Err(WorkerError::SendError(SendError::StatusError(500)))));
    }

    #[test]
    fn forecast_failure_is_fetch_error_and_skips_webhook() {
        let rt = Runtime::new().unwrap();
        let server = rt.block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/v1/jma"))
                .respond_with(ResponseTemplate::new(503))
                .mount(&server)
                .await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(204))
                .expect(0)
                .mount(&server)
                .await;
            server
        });
        let (config, mgr) = setup(&server, 2);

        let result = run(&config, &mgr, Some(run_time()));

        assert!(matches!(result, Err(WorkerError::FetchError(FetchError::StatusError(503)))));
    }
}
