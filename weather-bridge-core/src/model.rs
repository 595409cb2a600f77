use serde::{Deserialize, Serialize};

use crate::{
    error::FetchError,
    icon::IconCategory,
    temperature::{format_celsius, kelvin_to_celsius},
};

/// A position in signed decimal degrees, as reported by the host's location service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

#[derive(Debug, Deserialize)]
pub struct OwMain {
    pub temp: f64,
}

#[derive(Debug, Deserialize)]
pub struct OwWeather {
    pub id: i64,
}

/// The subset of an OpenWeatherMap current-weather payload we read.
#[derive(Debug, Deserialize)]
pub struct WeatherResponse {
    pub main: OwMain,
    pub weather: Vec<OwWeather>,
    pub name: String,
}

/// The three-entry message the watch app understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    #[serde(rename = "WEATHER_ICON_KEY")]
    pub icon: IconCategory,
    #[serde(rename = "WEATHER_TEMPERATURE_KEY")]
    pub temperature: String,
    #[serde(rename = "WEATHER_CITY_KEY")]
    pub city: String,
}

impl OutboundMessage {
    pub fn from_response(response: &WeatherResponse) -> Result<Self, FetchError> {
        let condition = response
            .weather
            .first()
            .ok_or_else(|| FetchError::MalformedPayload("`weather` array is empty".to_string()))?;

        let celsius = kelvin_to_celsius(response.main.temp).ok_or_else(|| {
            FetchError::MalformedPayload(format!(
                "`main.temp` is not a plausible Kelvin reading: {}",
                response.main.temp
            ))
        })?;

        Ok(Self {
            icon: IconCategory::from_condition_code(condition.id),
            temperature: format_celsius(celsius),
            city: response.name.clone(),
        })
    }
}
