use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct ForecastResponse {
    pub hourly: Hourly,
}

/// Parallel hourly arrays as returned by Open-Meteo
#[derive(Deserialize, Debug)]
pub struct Hourly {
    pub time: Vec<String>,
    pub precipitation: Vec<Option<f64>>,
    #[serde(default)]
    pub weather_code: Vec<Option<u8>>,
}
