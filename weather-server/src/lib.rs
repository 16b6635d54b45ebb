//! Proxy server for the weather CLI.
//!
//! Holds the forecast and geocoding API keys so clients never need them.
//! `POST /forecast` is relayed to the forecast API unchanged; `POST /geocode`
//! is answered from the Google Geocoding API, flattened into a [`Geocode`].
//!
//! [`Geocode`]: weather_core::Geocode

mod google;
mod handlers;

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::{Context, Result, bail};
use bytes::Bytes;
use warp::{Filter, Rejection, Reply};
use weather_core::{ForecastRequest, client::http_client};

pub const DEFAULT_PORT: u16 = 1234;
pub const DARKSKY_API_URI: &str = "https://api.darksky.net/forecast";
pub const GEOCODE_API_URI: &str = "https://maps.googleapis.com/maps/api/geocode/json";

const MAX_BODY_BYTES: u64 = 16 * 1024;

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub forecast_api_key: String,
    pub geocode_api_key: String,
    pub forecast_api_uri: String,
    pub geocode_api_uri: String,
}

impl ProxyConfig {
    pub fn new(forecast_api_key: impl Into<String>, geocode_api_key: impl Into<String>) -> Self {
        Self {
            forecast_api_key: forecast_api_key.into(),
            geocode_api_key: geocode_api_key.into(),
            forecast_api_uri: DARKSKY_API_URI.to_string(),
            geocode_api_uri: GEOCODE_API_URI.to_string(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.forecast_api_key.trim().is_empty() {
            bail!("please pass a darksky.net API key");
        }
        if self.geocode_api_key.trim().is_empty() {
            bail!("please pass a Google Geocode API key");
        }
        Ok(())
    }

    /// `{base}/{key}/{lat},{lng}`; the query string is added by the caller.
    fn forecast_url(&self, request: &ForecastRequest) -> String {
        format!(
            "{}/{}/{},{}",
            self.forecast_api_uri.trim_end_matches('/'),
            self.forecast_api_key,
            request.latitude,
            request.longitude
        )
    }
}

#[derive(Debug)]
pub struct ProxyState {
    config: ProxyConfig,
    http: reqwest::Client,
}

impl ProxyState {
    pub fn new(config: ProxyConfig) -> Result<Self> {
        let http = http_client().context("Failed to build upstream HTTP client")?;
        Ok(Self { config, http })
    }
}

fn body() -> impl Filter<Extract = (Bytes,), Error = Rejection> + Clone {
    warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::bytes())
}

/// All proxy routes. Unknown paths get a JSON 404.
pub fn routes(
    state: Arc<ProxyState>,
) -> impl Filter<Extract = (impl Reply,), Error = std::convert::Infallible> + Clone {
    let with_state = warp::any().map(move || state.clone());

    let forecast = warp::path!("forecast")
        .and(with_state.clone())
        .and(body())
        .and_then(handlers::forecast)
        .recover(handlers::body_rejection);

    let geocode = warp::path!("geocode")
        .and(with_state)
        .and(body())
        .and_then(handlers::geocode)
        .recover(handlers::body_rejection);

    let fallback = warp::path::full().map(handlers::not_found);

    forecast
        .or(geocode)
        .or(fallback)
        .with(warp::trace::request())
}

#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub port: u16,
    pub cert: Option<PathBuf>,
    pub key: Option<PathBuf>,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self { port: DEFAULT_PORT, cert: None, key: None }
    }
}

/// Run until SIGINT or SIGTERM. TLS is used when both a certificate and a
/// key are given.
pub async fn serve(config: ProxyConfig, options: ServeOptions) -> Result<()> {
    config.validate()?;

    let state = Arc::new(ProxyState::new(config)?);
    let routes = routes(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], options.port));

    match (options.cert, options.key) {
        (Some(cert), Some(key)) => {
            let (bound, server) = warp::serve(routes)
                .tls()
                .cert_path(cert)
                .key_path(key)
                .bind_with_graceful_shutdown(addr, shutdown_signal());
            tracing::info!(addr = %bound, "Starting server with TLS");
            server.await;
        }
        (cert, key) => {
            if cert.is_some() || key.is_some() {
                tracing::warn!("both --cert and --key are needed for TLS, serving plain HTTP");
            }
            let (bound, server) = warp::serve(routes)
                .try_bind_with_graceful_shutdown(addr, shutdown_signal())
                .with_context(|| format!("Failed to bind to {addr}"))?;
            tracing::info!(addr = %bound, "Starting server");
            server.await;
        }
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Received shutdown signal, exiting");
}
