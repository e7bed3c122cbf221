mod models;

use std::time::Duration;
use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use thiserror::Error;
use crate::config::{Config, GeoRef};
use crate::models::RainEvent;
use crate::manager_discord::models::{Embed, EmbedField, EmbedFooter, WebhookPayload};

const TITLE: &str = "🌧️ 雨が降りそうです";
const DESCRIPTION: &str = "まもなく雨が予想されます。";
const FOOTER: &str = "Powered by Open-Meteo JMA API";
const COLOR: u32 = 0x5865F2;
const MAX_FIELD_CHARS: usize = 1024;

/// Struct for posting rain alerts to a Discord webhook
pub struct Discord {
    client: Client,
    webhook_url: String,
    geo_ref: GeoRef,
}

impl Discord {
    /// Returns a new instance of the Discord struct
    ///
    /// # Arguments
    ///
    /// * 'config' - configuration holding webhook url and location
    pub fn new(config: &Config) -> Result<Self, SendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(
            Self {
                client,
                webhook_url: config.discord.webhook_url.clone(),
                geo_ref: config.geo_ref.clone(),
            }
        )
    }

    /// Posts one alert listing the given rain events
    ///
    /// # Arguments
    ///
    /// * 'events' - rain events to include, in chronological order
    pub fn send_alert(&self, events: &[RainEvent]) -> Result<(), SendError> {
        let payload = build_payload(events, &self.geo_ref, Utc::now());

        let response = self.client
            .post(&self.webhook_url)
            .json(&payload)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(SendError::StatusError(status.as_u16()));
        }

        Ok(())
    }
}

/// Builds the webhook body for the given events
///
/// # Arguments
///
/// * 'events' - rain events to list
/// * 'geo_ref' - location shown in the alert
/// * 'now' - time stamp of the alert
fn build_payload(events: &[RainEvent], geo_ref: &GeoRef, now: DateTime<Utc>) -> WebhookPayload {
    let lines = events
        .iter()
        .map(|e| format!("`{}` - {} (降水量: {}mm)",
                         e.valid_time.format("%H:%M"), e.condition().description(), e.precipitation_mm))
        .collect::<Vec<String>>();

    let mut fields = forecast_fields(&lines);

    let mut location = format!("緯度: {}, 経度: {}", geo_ref.lat, geo_ref.long);
    if let Some(name) = &geo_ref.name {
        location.push_str(&format!("\n({})", name));
    }
    fields.push(EmbedField { name: "場所".into(), value: location, inline: false });

    WebhookPayload {
        embeds: vec![Embed {
            title: TITLE.into(),
            description: DESCRIPTION.into(),
            color: COLOR,
            fields,
            footer: EmbedFooter { text: FOOTER.into() },
            timestamp: now.to_rfc3339(),
        }],
    }
}

/// Packs forecast lines into as few fields as Discord's field size limit allows
///
/// # Arguments
///
/// * 'lines' - one line per rain event
fn forecast_fields(lines: &[String]) -> Vec<EmbedField> {
    let mut values: Vec<String> = Vec::new();
    let mut current = String::new();

    for line in lines {
        if !current.is_empty() && current.chars().count() + 1 + line.chars().count() > MAX_FIELD_CHARS {
            values.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
    }
    if !current.is_empty() || values.is_empty() {
        values.push(if current.is_empty() { "データなし".to_string() } else { current });
    }

    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| EmbedField {
            name: if i == 0 { "予報".into() } else { "予報 (続き)".into() },
            value,
            inline: false,
        })
        .collect()
}

/// Error depicting errors that occur while posting to the webhook
///
#[derive(Debug, Error)]
pub enum SendError {
    #[error("StatusError: webhook responded with {0}")]
    StatusError(u16),
    #[error("NetworkError: {0}")]
    NetworkError(#[from] reqwest::Error),
}
