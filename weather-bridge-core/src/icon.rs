use serde::{Serialize, Serializer};

/// Icon shown on the watch, grouped the way OpenWeatherMap groups its condition codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IconCategory {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Atmosphere,
    Clear,
    Clouds,
    #[default]
    Unknown,
}

impl IconCategory {
    pub const ALL: [IconCategory; 8] = [
        Self::Thunderstorm,
        Self::Drizzle,
        Self::Rain,
        Self::Snow,
        Self::Atmosphere,
        Self::Clear,
        Self::Clouds,
        Self::Unknown,
    ];

    /// Classify an OpenWeatherMap condition code.
    /// See: https://openweathermap.org/weather-conditions
    pub fn from_condition_code(code: i64) -> Self {
        match code {
            200..=232 => Self::Thunderstorm,
            300..=321 => Self::Drizzle,
            500..=531 => Self::Rain,
            600..=622 => Self::Snow,
            701..=781 => Self::Atmosphere,
            800 => Self::Clear,
            801..=804 => Self::Clouds,
            _ => Self::Unknown,
        }
    }

    /// Resource index the watch app uses to pick its bitmap.
    pub fn id(&self) -> u8 {
        match self {
            Self::Thunderstorm => 0,
            Self::Drizzle => 1,
            Self::Rain => 2,
            Self::Snow => 3,
            Self::Atmosphere => 4,
            Self::Clear => 5,
            Self::Clouds => 6,
            Self::Unknown => 7,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Thunderstorm => "thunderstorm",
            Self::Drizzle => "drizzle",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Atmosphere => "atmosphere",
            Self::Clear => "clear",
            Self::Clouds => "clouds",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for IconCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// The device reads the icon as a plain integer.
impl Serialize for IconCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.id())
    }
}
