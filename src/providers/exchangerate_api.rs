use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::core::rates::{RateTable, RateTableProvider};

/// Client for the exchangerate-api.com v6 `latest` endpoint.
pub struct ExchangeRateApiProvider {
    base_url: String,
    api_key: String,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn latest_url(&self, base: &str) -> String {
        format!("{}/{}/latest/{}", self.base_url, self.api_key, base)
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    result: String,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    base_code: Option<String>,
    time_last_update_utc: Option<String>,
    conversion_rates: Option<HashMap<String, f64>>,
}

fn parse_update_time(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc2822(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn provider_error(data: &LatestRatesResponse) -> anyhow::Error {
    anyhow!(
        "Rate provider error: {}",
        data.error_type.as_deref().unwrap_or("unknown")
    )
}

#[async_trait]
impl RateTableProvider for ExchangeRateApiProvider {
    #[instrument(name = "ExchangeRateFetch", skip(self), fields(base = %base))]
    async fn fetch_table(&self, base: &str) -> Result<RateTable> {
        let base = base.to_uppercase();
        // The key is part of the path, keep it out of the logs.
        debug!("Requesting latest rates from {}/***/latest/{}", self.base_url, base);

        let client = reqwest::Client::builder().user_agent("fxconv/1.0").build()?;
        let response = client
            .get(self.latest_url(&base))
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for base currency: {}", e.without_url(), base))?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            // The API reports bad keys and quota errors with a JSON body.
            if let Ok(data) = serde_json::from_str::<LatestRatesResponse>(&text) {
                if data.result == "error" {
                    return Err(provider_error(&data));
                }
            }
            return Err(anyhow!("HTTP error: {} for base currency: {}", status, base));
        }

        let data: LatestRatesResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", base, e))?;

        if data.result == "error" {
            return Err(provider_error(&data));
        }

        let updated_at = parse_update_time(data.time_last_update_utc.as_deref());
        let base_code = data.base_code.unwrap_or_else(|| base.clone());
        let rates = data
            .conversion_rates
            .ok_or_else(|| anyhow!("No rate data found for base currency: {}", base))?;

        let table = RateTable::new(&base_code, rates).with_updated_at(updated_at);
        debug!(currencies = table.len(), "Loaded rate table");
        Ok(table)
    }
}
