mod models;

use std::time::Duration;
use chrono::NaiveDateTime;
use chrono_tz::Tz;
use log::debug;
use reqwest::blocking::Client;
use thiserror::Error;
use crate::config::Config;
use crate::models::{ForecastSample, ForecastWindow};
use crate::manager_forecast::models::{ForecastResponse, Hourly};

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Struct for fetching hourly precipitation forecasts from Open-Meteo
pub struct Forecast {
    client: Client,
    api_base: String,
    lat: f64,
    long: f64,
    hours: u8,
    timezone: Tz,
}

impl Forecast {
    /// Returns a forecast struct ready for fetching precipitation forecasts
    ///
    /// # Arguments
    ///
    /// * 'config' - configuration to use
    pub fn new(config: &Config) -> Result<Forecast, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Forecast {
            client,
            api_base: config.forecast.api_base.clone(),
            lat: config.geo_ref.lat,
            long: config.geo_ref.long,
            hours: config.rain.hours_to_check,
            timezone: config.forecast.timezone,
        })
    }

    /// Retrieves an hourly precipitation forecast
    ///
    /// Times in the result are local to the configured timezone, and samples before `from` are
    /// left out.
    ///
    /// # Arguments
    ///
    /// * 'from' - the current hour in local time of the configured timezone
    pub fn new_forecast(&self, from: NaiveDateTime) -> Result<ForecastWindow, FetchError> {
        let query = vec![
            ("latitude", self.lat.to_string()),
            ("longitude", self.long.to_string()),
            ("hourly", "precipitation,weather_code".to_string()),
            ("forecast_hours", self.hours.to_string()),
            ("timezone", self.timezone.name().to_string()),
        ];

        let response = self.client
            .get(&self.api_base)
            .query(&query)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::StatusError(status.as_u16()));
        }

        let json = response.text()?;

        let forecast: ForecastResponse = serde_json::from_str(&json)
            .map_err(|e| FetchError::ParseError(e.to_string()))?;

        let window = to_window(forecast.hourly, from)?;
        debug!("fetched {} forecast samples from {}", window.samples.len(), from);

        if window.samples.is_empty() {
            Err(FetchError::EmptyForecastError(format!("No forecast found from {}", from)))
        } else {
            Ok(window)
        }
    }
}

/// Transforms the parallel hourly arrays to a window of samples
///
/// # Arguments
///
/// * 'hourly' - the hourly arrays from the forecast response
/// * 'from' - samples before this time are dropped
fn to_window(hourly: Hourly, from: NaiveDateTime) -> Result<ForecastWindow, FetchError> {
    let entries = hourly.time.len();
    if hourly.precipitation.len() != entries {
        return Err(FetchError::ParseError(format!(
            "{} times but {} precipitation values", entries, hourly.precipitation.len())));
    }
    if !hourly.weather_code.is_empty() && hourly.weather_code.len() != entries {
        return Err(FetchError::ParseError(format!(
            "{} times but {} weather codes", entries, hourly.weather_code.len())));
    }

    let mut samples: Vec<ForecastSample> = Vec::new();

    for (i, time) in hourly.time.iter().enumerate() {
        let valid_time = NaiveDateTime::parse_from_str(time, TIME_FORMAT)
            .map_err(|e| FetchError::ParseError(format!("time '{}': {}", time, e)))?;

        let Some(precipitation_mm) = hourly.precipitation[i] else {
            debug!("no precipitation value for {}, skipping", valid_time);
            continue;
        };
        if !precipitation_mm.is_finite() || precipitation_mm < 0.0 {
            return Err(FetchError::ParseError(format!("precipitation {} at {}", precipitation_mm, valid_time)));
        }

        if valid_time < from {
            continue;
        }

        if let Some(last) = samples.last() {
            if valid_time < last.valid_time {
                return Err(FetchError::ParseError(format!("{} comes after {}", valid_time, last.valid_time)));
            }
        }

        samples.push(ForecastSample {
            valid_time,
            precipitation_mm,
            weather_code: hourly.weather_code.get(i).copied().flatten(),
        });
    }

    Ok(ForecastWindow { samples })
}

/// Error depicting errors that occur while fetching the forecast
///
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("ParseError: {0}")]
    ParseError(String),
    #[error("StatusError: forecast api responded with {0}")]
    StatusError(u16),
    #[error("EmptyForecastError: {0}")]
    EmptyForecastError(String),
    #[error("NetworkError: {0}")]
    NetworkError(#[from] reqwest::Error),
}
