//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Shared domain models (forecast payload, geocode records)
//! - Unit profiles, compass bearings and condition icons
//! - Rendering a forecast into styled, terminal-agnostic lines
//! - Location resolution and the HTTP clients behind it
//! - Configuration handling
//!
//! It is used by `weather-cli` and `weather-server`.

pub mod bearing;
pub mod client;
pub mod config;
pub mod error;
pub mod icons;
pub mod location;
pub mod model;
pub mod render;
pub mod style;
pub mod timefmt;
pub mod units;

pub use client::{ForecastClient, GeocodeClient};
pub use config::{Config, ProxyKeys};
pub use error::WeatherError;
pub use location::{LocationQuery, Locator, Resolution, Strategy};
pub use model::{Coordinate, Forecast, ForecastRequest, Geocode, GeocodeRequest, WeatherSnapshot};
pub use render::RenderOptions;
pub use style::{Color, Line, Span};
pub use units::{UnitProfile, UnitSystem};
