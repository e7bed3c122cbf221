use std::env;
use std::str::FromStr;
use chrono_tz::Tz;
use log::LevelFilter;
use reqwest::Url;
use thiserror::Error;

const DEFAULT_LATITUDE: f64 = 35.6895;
const DEFAULT_LONGITUDE: f64 = 139.6917;
const DEFAULT_THRESHOLD_MM: f64 = 0.5;
const DEFAULT_HOURS_TO_CHECK: u8 = 2;
const MAX_HOURS_TO_CHECK: u8 = 96;
const DEFAULT_TIMEZONE: &str = "Asia/Tokyo";
const DEFAULT_API_BASE: &str = "https://api.open-meteo.com/v1/jma";

#[derive(Debug, Clone)]
pub struct GeoRef {
    pub lat: f64,
    pub long: f64,
    pub name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RainParameters {
    pub threshold_mm: f64,
    pub hours_to_check: u8,
}

#[derive(Debug, Clone)]
pub struct Forecast {
    pub api_base: String,
    pub timezone: Tz,
}

#[derive(Debug, Clone)]
pub struct Discord {
    pub webhook_url: String,
}

#[derive(Debug, Clone)]
pub struct General {
    pub log_path: Option<String>,
    pub log_level: LevelFilter,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub geo_ref: GeoRef,
    pub rain: RainParameters,
    pub forecast: Forecast,
    pub discord: Discord,
    pub general: General,
}

/// Loads configuration from the process environment
///
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(|key| env::var(key).ok())
}

/// Loads configuration using the given lookup for variable values
///
/// Empty values are treated the same as missing ones.
///
/// # Arguments
///
/// * 'lookup' - function returning the value for a variable name, if any
pub fn load_config_from<F>(lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let webhook_url = get("DISCORD_WEBHOOK_URL")
        .ok_or(ConfigError::Missing("DISCORD_WEBHOOK_URL"))?;
    check_url("DISCORD_WEBHOOK_URL", &webhook_url)?;

    let lat = parse_or("RAIN_LATITUDE", get("RAIN_LATITUDE"), DEFAULT_LATITUDE)?;
    if !(-90.0..=90.0).contains(&lat) {
        return Err(ConfigError::OutOfRange("RAIN_LATITUDE", lat.to_string()));
    }

    let long = parse_or("RAIN_LONGITUDE", get("RAIN_LONGITUDE"), DEFAULT_LONGITUDE)?;
    if !(-180.0..=180.0).contains(&long) {
        return Err(ConfigError::OutOfRange("RAIN_LONGITUDE", long.to_string()));
    }

    let threshold_mm = parse_or("RAIN_THRESHOLD", get("RAIN_THRESHOLD"), DEFAULT_THRESHOLD_MM)?;
    if !threshold_mm.is_finite() || threshold_mm < 0.0 {
        return Err(ConfigError::OutOfRange("RAIN_THRESHOLD", threshold_mm.to_string()));
    }

    // Parse wide so that e.g. 300 is reported as out of range rather than unparsable
    let hours: u32 = parse_or("RAIN_HOURS_TO_CHECK", get("RAIN_HOURS_TO_CHECK"), DEFAULT_HOURS_TO_CHECK as u32)?;
    if hours < 1 || hours > MAX_HOURS_TO_CHECK as u32 {
        return Err(ConfigError::OutOfRange("RAIN_HOURS_TO_CHECK", hours.to_string()));
    }

    let timezone = get("RAIN_TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
    let timezone = Tz::from_str(&timezone)
        .map_err(|_| ConfigError::Invalid("RAIN_TIMEZONE", timezone.clone()))?;

    let api_base = get("RAIN_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    check_url("RAIN_API_BASE", &api_base)?;

    let log_level = parse_or("RAIN_LOG_LEVEL", get("RAIN_LOG_LEVEL"), LevelFilter::Info)?;

    Ok(Config {
        geo_ref: GeoRef { lat, long, name: get("RAIN_LOCATION_NAME") },
        rain: RainParameters { threshold_mm, hours_to_check: hours as u8 },
        forecast: Forecast { api_base, timezone },
        discord: Discord { webhook_url },
        general: General { log_path: get("RAIN_LOG_PATH"), log_level },
    })
}

/// Parses a variable value or falls back to the default if it is not set
///
/// # Arguments
///
/// * 'key' - variable name, used in error reporting
/// * 'value' - the raw value if set
/// * 'default' - value to use when not set
fn parse_or<T: FromStr>(key: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError> {
    match value {
        Some(v) => v.parse::<T>().map_err(|_| ConfigError::Invalid(key, v)),
        None => Ok(default),
    }
}

/// Checks that the value is an absolute http or https url
///
/// # Arguments
///
/// * 'key' - variable name, used in error reporting
/// * 'value' - the url to check
fn check_url(key: &'static str, value: &str) -> Result<(), ConfigError> {
    match Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(()),
        _ => Err(ConfigError::Invalid(key, value.to_string())),
    }
}

/// Error depicting errors that occur while loading configuration
///
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("MissingError: {0} is not set")]
    Missing(&'static str),
    #[error("InvalidError: {0} has an invalid value '{1}'")]
    Invalid(&'static str, String),
    #[error("OutOfRangeError: {0} is out of range: {1}")]
    OutOfRange(&'static str, String),
}

/// Configuration with defaults pointing at the given endpoints
#[cfg(test)]
pub fn test_config(api_base: &str, webhook_url: &str) -> Config {
    Config {
        geo_ref: GeoRef { lat: DEFAULT_LATITUDE, long: DEFAULT_LONGITUDE, name: None },
        rain: RainParameters { threshold_mm: DEFAULT_THRESHOLD_MM, hours_to_check: DEFAULT_HOURS_TO_CHECK },
        forecast: Forecast { api_base: api_base.to_string(), timezone: chrono_tz::Asia::Tokyo },
        discord: Discord { webhook_url: webhook_url.to_string() },
        general: General { log_path: None, log_level: LevelFilter::Info },
    }
}
