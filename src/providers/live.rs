//! Live upstream feeds.
//!
//! Weather comes from the OpenWeatherMap One Call 3.0 API, finance from the
//! Nessie banking API. NDVI has no live source and is always served by the
//! fallback. Any missing key or failed call is logged and answered from the
//! fallback dataset, so callers always get all three feeds.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{FarmDataProvider, MockFarmData};
use crate::config::ServerConfig;
use crate::error::{ProviderError, ProviderResult};
use crate::farm_data::{
    DailyForecast, FinancialSummary, NdviReading, Transaction, WeatherCondition, WeatherReport,
};

const OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/3.0/onecall";
const NESSIE_URL: &str = "http://api.nessieisreal.com";
const FORECAST_DAYS: usize = 7;
const RECENT_TRANSACTIONS: usize = 3;

pub struct LiveFarmData {
    client: Client,
    openweather_api_key: Option<String>,
    nessie_api_key: Option<String>,
    location_name: String,
    fallback: MockFarmData,
}

impl LiveFarmData {
    pub fn new(openweather_api_key: Option<String>, nessie_api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            openweather_api_key,
            nessie_api_key,
            location_name: "Austin, TX".to_string(),
            fallback: MockFarmData::new(),
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.openweather_api_key.clone(), config.nessie_api_key.clone())
    }

    pub fn with_fallback(mut self, fallback: MockFarmData) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn openweather_configured(&self) -> bool {
        self.openweather_api_key.is_some()
    }

    pub fn nessie_configured(&self) -> bool {
        self.nessie_api_key.is_some()
    }

    /// Weather straight from OpenWeatherMap, no fallback
    pub async fn try_fetch_weather(&self, lat: f64, lon: f64) -> ProviderResult<WeatherReport> {
        let key = self
            .openweather_api_key
            .as_deref()
            .ok_or(ProviderError::NotConfigured("OpenWeatherMap"))?;

        debug!("Fetching OpenWeatherMap forecast for ({}, {})", lat, lon);
        let response = self
            .client
            .get(OPENWEATHER_URL)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("exclude", "hourly,minutely".to_string()),
                ("units", "imperial".to_string()),
                ("appid", key.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status {
                service: "OpenWeatherMap",
                status: response.status().as_u16(),
            });
        }

        let body: OneCallResponse = response.json().await?;
        map_onecall(body, &self.location_name)
    }

    /// Balance and recent purchases straight from Nessie, no fallback
    pub async fn try_fetch_financial(&self, customer_id: &str) -> ProviderResult<FinancialSummary> {
        let key = self
            .nessie_api_key
            .as_deref()
            .ok_or(ProviderError::NotConfigured("Nessie"))?;

        debug!("Fetching Nessie accounts");
        let response = self
            .client
            .get(format!("{}/accounts", NESSIE_URL))
            .query(&[("key", key)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status {
                service: "Nessie",
                status: response.status().as_u16(),
            });
        }

        let accounts: Vec<NessieAccount> = response.json().await?;
        let account = accounts
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::MissingData("Nessie returned no accounts".to_string()))?;

        // Purchases are optional; a failed lookup still yields the balance
        let purchases = match self.fetch_purchases(&account.id, key).await {
            Ok(p) => p,
            Err(e) => {
                warn!("Nessie purchases lookup failed for {}: {}", account.id, e);
                Vec::new()
            }
        };

        Ok(map_nessie(customer_id, account, purchases))
    }

    async fn fetch_purchases(
        &self,
        account_id: &str,
        key: &str,
    ) -> ProviderResult<Vec<NessiePurchase>> {
        let response = self
            .client
            .get(format!("{}/accounts/{}/purchases", NESSIE_URL, account_id))
            .query(&[("key", key)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status {
                service: "Nessie",
                status: response.status().as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl FarmDataProvider for LiveFarmData {
    fn name(&self) -> &'static str {
        "live"
    }

    async fn fetch_ndvi(&self, farm_id: &str) -> ProviderResult<NdviReading> {
        Ok(self.fallback.ndvi(farm_id))
    }

    async fn fetch_weather(&self, lat: f64, lon: f64) -> ProviderResult<WeatherReport> {
        match self.try_fetch_weather(lat, lon).await {
            Ok(report) => Ok(report),
            Err(ProviderError::NotConfigured(_)) => Ok(self.fallback.weather()),
            Err(e) => {
                warn!("OpenWeatherMap API failed, using mock data: {}", e);
                Ok(self.fallback.weather())
            }
        }
    }

    async fn fetch_financial(&self, customer_id: &str) -> ProviderResult<FinancialSummary> {
        match self.try_fetch_financial(customer_id).await {
            Ok(summary) => Ok(summary),
            Err(ProviderError::NotConfigured(_)) => Ok(self.fallback.financial(customer_id)),
            Err(e) => {
                warn!("Nessie API failed, using mock data: {}", e);
                Ok(self.fallback.financial(customer_id))
            }
        }
    }
}

// ============================================================================
// OpenWeatherMap
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct OneCallResponse {
    #[serde(default)]
    pub daily: Vec<OneCallDay>,
}

#[derive(Debug, Deserialize)]
pub struct OneCallDay {
    pub dt: i64,
    pub temp: OneCallTemp,
    #[serde(default)]
    pub weather: Vec<OneCallWeather>,
    /// mm; absent on dry days
    pub rain: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct OneCallTemp {
    pub day: f64,
}

#[derive(Debug, Deserialize)]
pub struct OneCallWeather {
    pub main: String,
    pub icon: String,
}

/// First seven days, rounded temperatures, deficit against the weekly average
pub fn map_onecall(body: OneCallResponse, location: &str) -> ProviderResult<WeatherReport> {
    if body.daily.is_empty() {
        return Err(ProviderError::MissingData("forecast has no daily entries".to_string()));
    }

    let forecast = body
        .daily
        .into_iter()
        .take(FORECAST_DAYS)
        .map(|day| {
            let date = DateTime::<Utc>::from_timestamp(day.dt, 0)
                .ok_or_else(|| {
                    ProviderError::Decode(format!("invalid forecast timestamp {}", day.dt))
                })?
                .date_naive();
            let weather = day
                .weather
                .into_iter()
                .next()
                .map(|w| WeatherCondition { main: w.main, icon: w.icon })
                .unwrap_or_else(|| WeatherCondition {
                    main: "Unknown".to_string(),
                    icon: "01d".to_string(),
                });

            Ok(DailyForecast {
                date,
                temp: day.temp.day.round(),
                weather,
                rain: day.rain.unwrap_or(0.0),
            })
        })
        .collect::<ProviderResult<Vec<_>>>()?;

    Ok(WeatherReport::from_forecast(location, forecast))
}

// ============================================================================
// Nessie
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct NessieAccount {
    #[serde(rename = "_id")]
    pub id: String,
    pub nickname: Option<String>,
    pub balance: f64,
}

#[derive(Debug, Deserialize)]
pub struct NessiePurchase {
    #[serde(alias = "purchase_date", default)]
    pub transaction_date: String,
    #[serde(default)]
    pub description: String,
    pub amount: f64,
}

/// Nessie reports purchases as positive amounts; the dashboard shows them negative
pub fn map_nessie(
    customer_id: &str,
    account: NessieAccount,
    purchases: Vec<NessiePurchase>,
) -> FinancialSummary {
    let transactions = purchases
        .into_iter()
        .take(RECENT_TRANSACTIONS)
        .map(|p| Transaction {
            date: p.transaction_date,
            description: p.description,
            amount: -p.amount,
        })
        .collect();

    FinancialSummary {
        customer_id: customer_id.to_string(),
        account_id: account.id,
        nickname: account.nickname.unwrap_or_else(|| "Farm Savings Account".to_string()),
        balance: account.balance,
        transactions,
        timestamp: Utc::now(),
    }
}
