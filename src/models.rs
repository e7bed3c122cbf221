use chrono::NaiveDateTime;
use crate::weather_code::WeatherCondition;

/// One hourly forecast value, timestamp in local wall-clock time of the configured timezone
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    pub valid_time: NaiveDateTime,
    pub precipitation_mm: f64,
    pub weather_code: Option<u8>,
}

/// Hourly samples in chronological order, starting at the current hour
#[derive(Debug, Clone, Default)]
pub struct ForecastWindow {
    pub samples: Vec<ForecastSample>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RainEvent {
    pub valid_time: NaiveDateTime,
    pub precipitation_mm: f64,
    pub weather_code: Option<u8>,
}

impl From<&ForecastSample> for RainEvent {
    fn from(sample: &ForecastSample) -> Self {
        Self {
            valid_time: sample.valid_time,
            precipitation_mm: sample.precipitation_mm,
            weather_code: sample.weather_code,
        }
    }
}

impl RainEvent {
    /// Weather condition for the hour, `Unknown` if the forecast carried no code
    pub fn condition(&self) -> WeatherCondition {
        self.weather_code
            .map(WeatherCondition::from_wmo_code)
            .unwrap_or(WeatherCondition::Unknown)
    }
}
