//! Google Geocoding API response, reduced to what the proxy reads.

use serde::Deserialize;
use weather_core::Geocode;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GeocodeResponse {
    pub results: Vec<GeocodeResult>,
    pub status: String,
    pub error_message: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GeocodeResult {
    pub address_components: Vec<AddressComponent>,
    pub formatted_address: String,
    pub geometry: Geometry,
    pub place_id: String,
    pub types: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddressComponent {
    pub long_name: String,
    pub short_name: String,
    pub types: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Geometry {
    pub location: LatLng,
    pub location_type: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl GeocodeResult {
    /// Flatten into the place record the CLI understands.
    pub fn to_geocode(&self) -> Geocode {
        let mut geo = Geocode {
            latitude: self.geometry.location.lat,
            longitude: self.geometry.location.lng,
            ..Default::default()
        };

        for component in &self.address_components {
            for kind in &component.types {
                match kind.as_str() {
                    "postal_code" => geo.postal_code = component.long_name.clone(),
                    "country" => {
                        geo.country = component.long_name.clone();
                        geo.country_code = component.short_name.clone();
                        geo.country_code3 = component.short_name.clone();
                    }
                    "locality" => geo.city = component.long_name.clone(),
                    "administrative_area_level_1" => {
                        geo.region = component.long_name.clone();
                        geo.region_code = component.short_name.clone();
                    }
                    _ => {}
                }
            }
        }

        geo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_address_components_by_type() {
        let res: GeocodeResponse = serde_json::from_value(serde_json::json!({
            "results": [{
                "address_components": [
                    {"long_name": "Manhattan Beach", "short_name": "Manhattan Beach", "types": ["locality", "political"]},
                    {"long_name": "Los Angeles County", "short_name": "Los Angeles County", "types": ["administrative_area_level_2", "political"]},
                    {"long_name": "California", "short_name": "CA", "types": ["administrative_area_level_1", "political"]},
                    {"long_name": "United States", "short_name": "US", "types": ["country", "political"]},
                    {"long_name": "90266", "short_name": "90266", "types": ["postal_code"]}
                ],
                "formatted_address": "Manhattan Beach, CA, USA",
                "geometry": {"location": {"lat": 33.8847361, "lng": -118.4109089}, "location_type": "APPROXIMATE"},
                "place_id": "ChIJL2Ow4sWzwoARIEUV9NRRAwc",
                "types": ["locality", "political"]
            }],
            "status": "OK"
        }))
        .unwrap();

        let geo = res.results[0].to_geocode();
        assert_eq!(geo.city, "Manhattan Beach");
        assert_eq!(geo.region, "California");
        assert_eq!(geo.region_code, "CA");
        assert_eq!(geo.country, "United States");
        assert_eq!(geo.country_code, "US");
        assert_eq!(geo.postal_code, "90266");
        assert_eq!(geo.latitude, 33.8847361);
        assert_eq!(geo.longitude, -118.4109089);
    }
}
