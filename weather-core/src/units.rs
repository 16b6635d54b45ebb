use std::fmt;

/// Display units for one unit system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitProfile {
    pub degrees: &'static str,
    pub speed: &'static str,
    pub length: &'static str,
    pub precipitation: &'static str,
    pub pressure: &'static str,
    /// Applied to the raw pressure reading (reported in mbar/hPa).
    pub pressure_multiple: f64,
}

impl UnitProfile {
    /// Blank labels, pressure left unscaled.
    pub const EMPTY: UnitProfile = UnitProfile {
        degrees: "",
        speed: "",
        length: "",
        precipitation: "",
        pressure: "",
        pressure_multiple: 1.0,
    };
}

impl Default for UnitProfile {
    fn default() -> Self {
        Self::EMPTY
    }
}

const US: UnitProfile = UnitProfile {
    degrees: "°F",
    speed: "mph",
    length: "miles",
    precipitation: "in/hr",
    pressure: "mbar",
    pressure_multiple: 1.0,
};

const SI: UnitProfile = UnitProfile {
    degrees: "°C",
    speed: "m/s",
    length: "kilometers",
    precipitation: "mm/h",
    pressure: "hPa",
    pressure_multiple: 1.0,
};

const CA: UnitProfile = UnitProfile { speed: "km/h", ..SI };

// "uk" is deprecated upstream in favour of "uk2".
const UK: UnitProfile = UnitProfile { speed: "mph", ..SI };

const UK2: UnitProfile = UnitProfile { length: "miles", ..UK };

const IMPERIAL: UnitProfile = UnitProfile {
    pressure: "inHg",
    pressure_multiple: 0.0295,
    ..US
};

/// Unit system selector, as accepted by the forecast API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnitSystem {
    /// Let the API pick based on location. Only meaningful in a request.
    #[default]
    Auto,
    Us,
    Si,
    Ca,
    Uk,
    Uk2,
    Metric,
    Imperial,
    Unknown,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Auto => "auto",
            UnitSystem::Us => "us",
            UnitSystem::Si => "si",
            UnitSystem::Ca => "ca",
            UnitSystem::Uk => "uk",
            UnitSystem::Uk2 => "uk2",
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
            UnitSystem::Unknown => "",
        }
    }

    /// Every named system, in the order offered to users.
    pub const fn all() -> &'static [UnitSystem] {
        &[
            UnitSystem::Auto,
            UnitSystem::Us,
            UnitSystem::Si,
            UnitSystem::Ca,
            UnitSystem::Uk,
            UnitSystem::Uk2,
            UnitSystem::Metric,
            UnitSystem::Imperial,
        ]
    }

    /// Lenient parse: anything unrecognized becomes [`UnitSystem::Unknown`].
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "auto" => UnitSystem::Auto,
            "us" => UnitSystem::Us,
            "si" => UnitSystem::Si,
            "ca" => UnitSystem::Ca,
            "uk" => UnitSystem::Uk,
            "uk2" => UnitSystem::Uk2,
            "metric" => UnitSystem::Metric,
            "imperial" => UnitSystem::Imperial,
            _ => UnitSystem::Unknown,
        }
    }

    pub fn profile(&self) -> UnitProfile {
        match self {
            UnitSystem::Us => US,
            UnitSystem::Si | UnitSystem::Metric => SI,
            UnitSystem::Ca => CA,
            UnitSystem::Uk => UK,
            UnitSystem::Uk2 => UK2,
            UnitSystem::Imperial => IMPERIAL,
            UnitSystem::Auto | UnitSystem::Unknown => UnitProfile::EMPTY,
        }
    }
}

impl UnitSystem {
    /// Value sent to the forecast API, which only knows auto, us, si, ca,
    /// uk and uk2. `metric` is asked for as `si` and `imperial` as `us`.
    pub fn request_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => UnitSystem::Si.as_str(),
            UnitSystem::Imperial => UnitSystem::Us.as_str(),
            other => other.as_str(),
        }
    }

    /// Profile to render with, given the system the forecast API reports
    /// it used. `metric` and `imperial` keep their own labels and pressure
    /// scale; every other choice follows the report.
    pub fn display_profile(&self, reported: &str) -> UnitProfile {
        match self {
            UnitSystem::Metric | UnitSystem::Imperial => self.profile(),
            _ => profile_for(reported),
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display profile for a unit-system key. Unknown keys yield blank units.
pub fn profile_for(key: &str) -> UnitProfile {
    UnitSystem::parse(key).profile()
}

/// Round to `places` decimals, halves away from zero.
///
/// The scaled value is first snapped to 9 decimals so that inputs such as
/// `2.345` (stored as `2.34499999…`) still round up.
pub fn round(x: f64, places: u32) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let pow = 10f64.powi(places as i32);
    let scaled = ((x * pow) * 1e9).round() / 1e9;
    scaled.round() / pow
}
