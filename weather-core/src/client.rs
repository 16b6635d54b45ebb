//! HTTP clients for the forecast proxy and the IP geolocation service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::{
    error::{Result, WeatherError},
    location::Locator,
    model::{Forecast, ForecastRequest, Geocode, GeocodeRequest},
};

pub const DEFAULT_SERVER_URI: &str = "https://geocode.jessfraz.com";
pub const DEFAULT_GEOIP_URI: &str = "https://telize.j3ss.co/geoip";

const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("weather/", env!("CARGO_PKG_VERSION"));

/// Shared reqwest client: bounded timeout, identifying user agent, no retries.
pub fn http_client() -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()
        .map_err(WeatherError::Client)
}

fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX).rev().find(|i| body.is_char_boundary(*i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}

/// Read the body and decode it. A non-success status only becomes an error
/// when the body does not decode, so that JSON error payloads still surface
/// their own message.
async fn decode<T: DeserializeOwned>(what: &'static str, url: &str, res: Response) -> Result<T> {
    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|source| WeatherError::Body { url: url.to_string(), source })?;

    match serde_json::from_str(&body) {
        Ok(parsed) => Ok(parsed),
        Err(_) if !status.is_success() => Err(WeatherError::Status {
            url: url.to_string(),
            status,
            body: truncate_body(&body),
        }),
        Err(source) => Err(WeatherError::Decode { what, source }),
    }
}

/// Fetches forecasts through the proxy server's `/forecast` endpoint.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    http: Client,
    server: String,
}

impl ForecastClient {
    pub fn new(server: impl Into<String>) -> Result<Self> {
        Ok(Self::with_client(http_client()?, server))
    }

    pub fn with_client(http: Client, server: impl Into<String>) -> Self {
        Self { http, server: server.into() }
    }

    pub async fn get(&self, request: &ForecastRequest) -> Result<Forecast> {
        let url = endpoint(&self.server, "forecast");
        tracing::debug!(%url, lat = request.latitude, lng = request.longitude, units = %request.units, "requesting forecast");

        let res = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|source| WeatherError::Request { method: "POST", url: url.clone(), source })?;

        let forecast: Forecast = decode("forecast", &url, res).await?;

        if !forecast.error.is_empty() {
            return Err(WeatherError::Api { service: "Forecast", message: forecast.error });
        }

        Ok(forecast)
    }
}

/// Geocoding through the proxy server plus IP geolocation.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    http: Client,
    server: String,
    geoip: String,
}

impl GeocodeClient {
    pub fn new(server: impl Into<String>, geoip: impl Into<String>) -> Result<Self> {
        Ok(Self::with_client(http_client()?, server, geoip))
    }

    pub fn with_client(http: Client, server: impl Into<String>, geoip: impl Into<String>) -> Self {
        Self { http, server: server.into(), geoip: geoip.into() }
    }

    async fn geoip_lookup(&self, url: String) -> Result<Geocode> {
        tracing::debug!(%url, "looking up IP location");
        let res = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| WeatherError::Request { method: "GET", url: url.clone(), source })?;

        let geo: Geocode = decode("autolocate", &url, res).await?;
        if !geo.error.is_empty() {
            return Err(WeatherError::Api { service: "Geolocation", message: geo.error });
        }
        Ok(geo)
    }
}

#[async_trait]
impl Locator for GeocodeClient {
    async fn locate(&self, address: &str) -> Result<Geocode> {
        let url = endpoint(&self.server, "geocode");
        tracing::debug!(%url, address, "geocoding location");

        let res = self
            .http
            .post(&url)
            .json(&GeocodeRequest { location: address.to_string() })
            .send()
            .await
            .map_err(|source| WeatherError::Request { method: "POST", url: url.clone(), source })?;

        let geo: Geocode = decode("geocode", &url, res).await?;

        // These messages come from our own proxy server.
        if !geo.error.is_empty() {
            return Err(WeatherError::Api { service: "Geocode", message: geo.error });
        }
        Ok(geo)
    }

    async fn ip_locate(&self, ip: &str) -> Result<Geocode> {
        self.geoip_lookup(endpoint(&self.geoip, ip)).await
    }

    async fn autolocate(&self) -> Result<Geocode> {
        self.geoip_lookup(self.geoip.clone()).await
    }
}
