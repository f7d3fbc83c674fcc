use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::Deserialize;

/// Base URL of the icon set referenced by `Condition::icon`.
pub const DEFAULT_ICON_BASE_URL: &str = "http://openweathermap.org/img/wn";

/// Current conditions for one city, as returned by `GET /data/2.5/weather`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeatherReport {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub cod: i64,
    #[serde(default)]
    pub base: Option<String>,
    /// Shift in seconds from UTC.
    #[serde(default)]
    pub timezone: i32,
    #[serde(default)]
    pub visibility: Option<u32>,
    #[serde(default)]
    pub coord: Option<Coord>,
    /// Usually a single entry, but the API does not promise one.
    #[serde(default)]
    pub weather: Vec<Condition>,
    pub main: MainFields,
    #[serde(default)]
    pub wind: Option<Wind>,
    #[serde(default)]
    pub clouds: Option<Clouds>,
    /// Time of data calculation, unix seconds.
    #[serde(default)]
    pub dt: Option<i64>,
    #[serde(default)]
    pub sys: Option<Sys>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coord {
    pub lon: f64,
    pub lat: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub id: i64,
    /// Machine category, e.g. "Clouds" or "Rain".
    pub main: String,
    #[serde(default)]
    pub description: String,
    /// Icon identifier, e.g. "04d".
    #[serde(default)]
    pub icon: String,
}

impl Condition {
    pub fn icon_url(&self, base: &str) -> String {
        format!("{}/{}@2x.png", base.trim_end_matches('/'), self.icon)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MainFields {
    pub temp: f64,
    pub feels_like: f64,
    #[serde(default)]
    pub temp_min: Option<f64>,
    #[serde(default)]
    pub temp_max: Option<f64>,
    #[serde(default)]
    pub pressure: Option<f64>,
    pub humidity: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Wind {
    pub speed: f64,
    #[serde(default)]
    pub deg: Option<f64>,
}

impl Wind {
    /// 16-point compass label for the direction the wind blows from.
    pub fn compass(&self) -> Option<&'static str> {
        const POINTS: [&str; 16] = [
            "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW",
            "NW", "NNW",
        ];

        let deg = self.deg?;
        if !deg.is_finite() {
            return None;
        }
        let idx = ((deg.rem_euclid(360.0) / 22.5) + 0.5).floor() as usize % POINTS.len();
        Some(POINTS[idx])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Clouds {
    pub all: u8,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Sys {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub sunrise: Option<i64>,
    #[serde(default)]
    pub sunset: Option<i64>,
}

impl WeatherReport {
    /// The condition display code reads from. `None` for an empty sequence.
    pub fn primary_condition(&self) -> Option<&Condition> {
        self.weather.first()
    }

    pub fn country(&self) -> Option<&str> {
        self.sys
            .as_ref()
            .and_then(|s| s.country.as_deref())
            .filter(|c| !c.is_empty())
    }

    pub fn location_label(&self) -> String {
        match self.country() {
            Some(country) => format!("{}, {}", self.name, country),
            None => self.name.clone(),
        }
    }

    pub fn temperature_whole(&self) -> i64 {
        round_half_up(self.main.temp)
    }

    pub fn feels_like_whole(&self) -> i64 {
        round_half_up(self.main.feels_like)
    }

    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        self.dt.and_then(unix_to_utc)
    }

    pub fn sunrise(&self) -> Option<DateTime<Utc>> {
        self.sys.as_ref().and_then(|s| s.sunrise).and_then(unix_to_utc)
    }

    pub fn sunset(&self) -> Option<DateTime<Utc>> {
        self.sys.as_ref().and_then(|s| s.sunset).and_then(unix_to_utc)
    }

    /// UTC offset of the reported city.
    pub fn local_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.timezone).unwrap_or_else(|| Utc.fix())
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

/// Nearest whole number, halves toward positive infinity.
fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    let bump = if value - floor >= 0.5 { 1.0 } else { 0.0 };
    (floor + bump) as i64
}
