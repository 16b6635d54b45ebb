//! Deciding where the user is.
//!
//! Resolution walks an ordered list of [`Strategy`] values and uses the first
//! one that applies: an explicit location, then the SSH client's address
//! (when asked for), then the caller's own public IP.

use std::fmt::{self, Debug};

use async_trait::async_trait;

use crate::{error::Result, model::Geocode};

pub const SSH_CONNECTION_ENV: &str = "SSH_CONNECTION";

pub const UNRESOLVED_FROM_IP: &str = "latitude and longitude could not be determined from your IP so the weather will not be accurate\n\
     Try: weather -l <your_zipcode> OR weather -l \"your city, state\"";

pub const UNRESOLVED: &str =
    "latitude and longitude could not be determined so the weather will not be accurate";

/// Geocoding collaborator.
#[async_trait]
pub trait Locator: Send + Sync + Debug {
    /// Free-text address or postal code.
    async fn locate(&self, address: &str) -> Result<Geocode>;

    /// A specific IP address.
    async fn ip_locate(&self, ip: &str) -> Result<Geocode>;

    /// Whatever public IP the request comes from.
    async fn autolocate(&self) -> Result<Geocode>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    Explicit(String),
    ClientIp(String),
    Auto,
}

impl Strategy {
    async fn run(&self, locator: &dyn Locator) -> Result<Geocode> {
        match self {
            Strategy::Explicit(address) => locator.locate(address).await,
            Strategy::ClientIp(ip) => locator.ip_locate(ip).await,
            Strategy::Auto => locator.autolocate().await,
        }
    }

    fn unresolved_warning(&self) -> &'static str {
        match self {
            Strategy::Auto => UNRESOLVED_FROM_IP,
            _ => UNRESOLVED,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Explicit(address) => write!(f, "location {address:?}"),
            Strategy::ClientIp(ip) => write!(f, "ssh client {ip}"),
            Strategy::Auto => f.write_str("auto"),
        }
    }
}

/// Inputs to location resolution.
#[derive(Debug, Clone, Default)]
pub struct LocationQuery {
    pub explicit: Option<String>,
    pub prefer_client_ip: bool,
    /// Raw `SSH_CONNECTION` value, e.g. `"10.0.0.5 52644 10.0.0.1 22"`.
    pub ssh_connection: Option<String>,
}

impl LocationQuery {
    /// Query with the SSH hint taken from the process environment.
    pub fn from_env(explicit: Option<String>, prefer_client_ip: bool) -> Self {
        Self {
            explicit,
            prefer_client_ip,
            ssh_connection: std::env::var(SSH_CONNECTION_ENV).ok(),
        }
    }

    /// Applicable strategies, most specific first. Always ends with
    /// [`Strategy::Auto`].
    pub fn strategies(&self) -> Vec<Strategy> {
        let mut list = Vec::with_capacity(3);

        if let Some(address) = self.explicit.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            list.push(Strategy::Explicit(address.to_string()));
        }

        let client_ip = self
            .ssh_connection
            .as_deref()
            .and_then(ssh_client_ip)
            .filter(|_| self.prefer_client_ip);
        if let Some(ip) = client_ip {
            list.push(Strategy::ClientIp(ip.to_string()));
        }

        list.push(Strategy::Auto);
        list
    }
}

/// Client address from an `SSH_CONNECTION` value (its first field).
pub fn ssh_client_ip(ssh_connection: &str) -> Option<&str> {
    ssh_connection.split_whitespace().next()
}

#[derive(Debug, Clone)]
pub struct Resolution {
    pub geocode: Geocode,
    pub strategy: Strategy,
    /// Set when the coordinates came back as `(0, 0)`. Not fatal.
    pub warning: Option<&'static str>,
}

/// Resolve the query with the first applicable strategy.
///
/// Collaborator failures are returned as errors; an unresolved `(0, 0)`
/// result is returned with a warning instead.
pub async fn resolve(locator: &dyn Locator, query: &LocationQuery) -> Result<Resolution> {
    let strategy = query.strategies().into_iter().next().unwrap_or(Strategy::Auto);
    tracing::debug!(%strategy, "resolving location");

    let geocode = strategy.run(locator).await?;

    let warning = if geocode.coordinate().is_resolved() {
        tracing::info!(
            city = %geocode.city,
            region = %geocode.region,
            lat = geocode.latitude,
            lng = geocode.longitude,
            "location resolved"
        );
        None
    } else {
        tracing::warn!(%strategy, "location resolved to (0, 0)");
        Some(strategy.unresolved_warning())
    };

    Ok(Resolution { geocode, strategy, warning })
}
