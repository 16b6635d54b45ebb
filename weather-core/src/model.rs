use serde::{Deserialize, Serialize};

use crate::units::UnitSystem;

/// A latitude/longitude pair. `(0, 0)` is treated as "unresolved".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Both components must be non-zero for a forecast to be meaningful.
    pub fn is_resolved(&self) -> bool {
        self.latitude != 0.0 && self.longitude != 0.0
    }
}

/// Body posted to the proxy's `/forecast` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
    #[serde(default)]
    pub units: String,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl ForecastRequest {
    pub fn new(coordinate: Coordinate, units: UnitSystem) -> Self {
        Self {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            units: units.request_str().to_string(),
            exclude: vec!["minutely".to_string()],
        }
    }

    pub fn exclude(mut self, block: impl Into<String>) -> Self {
        self.exclude.push(block.into());
        self
    }
}

/// Full forecast payload as returned by the forecast API (Dark Sky format).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Forecast {
    pub alerts: Vec<Alert>,
    pub currently: WeatherSnapshot,
    pub code: i64,
    pub daily: TimeSeries,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub error: String,
    pub flags: Flags,
    pub hourly: TimeSeries,
    pub latitude: f64,
    pub longitude: f64,
    pub offset: f64,
    pub timezone: String,
}

impl Forecast {
    pub fn units(&self) -> &str {
        &self.flags.units
    }
}

/// A weather alert issued for the location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Alert {
    pub title: String,
    pub description: String,
    /// Creation time, epoch seconds.
    pub time: i64,
    /// Expiry time, epoch seconds.
    pub expires: i64,
    pub uri: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Flags {
    pub units: String,
}

/// Hourly or daily block of the forecast.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeSeries {
    pub summary: String,
    pub icon: String,
    pub data: Vec<WeatherSnapshot>,
}

/// A point-in-time or daily-aggregate reading.
///
/// Missing fields decode as zero/empty, and the renderer reads zero/empty
/// as "absent": the corresponding line is not printed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WeatherSnapshot {
    pub time: i64,
    pub summary: String,
    pub icon: String,
    pub temperature: f64,
    pub apparent_temperature: f64,
    pub temperature_max: f64,
    pub temperature_max_time: i64,
    pub temperature_min: f64,
    pub temperature_min_time: i64,
    pub apparent_temperature_max: f64,
    pub apparent_temperature_max_time: i64,
    pub apparent_temperature_min: f64,
    pub apparent_temperature_min_time: i64,
    pub humidity: f64,
    pub dew_point: f64,
    pub precip_intensity: f64,
    pub precip_intensity_max: f64,
    pub precip_intensity_max_time: i64,
    pub precip_probability: f64,
    pub precip_type: String,
    pub nearest_storm_distance: f64,
    pub nearest_storm_bearing: f64,
    pub wind_speed: f64,
    pub wind_bearing: f64,
    pub cloud_cover: f64,
    pub visibility: f64,
    pub pressure: f64,
    pub ozone: f64,
    pub sunrise_time: i64,
    pub sunset_time: i64,
}

impl WeatherSnapshot {
    /// Night when the reading falls outside the sunrise/sunset window.
    /// Without sun times nothing can be said, so it counts as day.
    pub fn is_night(&self) -> bool {
        if self.sunrise_time == 0 || self.sunset_time == 0 {
            return false;
        }
        self.time < self.sunrise_time || self.time >= self.sunset_time
    }
}

/// Body posted to the proxy's `/geocode` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeocodeRequest {
    #[serde(default)]
    pub location: String,
}

/// Normalized place record, returned by both the proxy's `/geocode` endpoint
/// and the IP geolocation service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geocode {
    pub area_code: String,
    pub asn: String,
    pub city: String,
    pub continent_code: String,
    pub country: String,
    pub country_code: String,
    pub country_code3: String,
    pub dma_code: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub error: String,
    pub ip: String,
    pub isp: String,
    pub latitude: f64,
    pub longitude: f64,
    pub postal_code: String,
    pub region: String,
    pub region_code: String,
    pub timezone: String,
}

impl Geocode {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}
