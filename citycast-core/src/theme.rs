use crate::model::WeatherReport;

/// Visual styling selected by the dominant weather condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    Clear,
    Clouds,
    Rain,
    Snow,
    #[default]
    Default,
}

impl Theme {
    /// Checked in order; the first substring hit wins.
    const MATCHERS: [(&'static str, Theme); 4] = [
        ("clear", Theme::Clear),
        ("cloud", Theme::Clouds),
        ("rain", Theme::Rain),
        ("snow", Theme::Snow),
    ];

    /// Match a condition category ("Clouds", "Rain", ...) case-insensitively by substring.
    pub fn from_category(category: &str) -> Self {
        let lower = category.to_lowercase();

        Self::MATCHERS
            .iter()
            .find(|(needle, _)| lower.contains(*needle))
            .map(|(_, theme)| *theme)
            .unwrap_or_default()
    }

    /// Theme of the displayed report. An empty condition sequence, or no report at all,
    /// falls back to `Default`.
    pub fn for_report(report: Option<&WeatherReport>) -> Self {
        report
            .and_then(WeatherReport::primary_condition)
            .map(|c| Self::from_category(&c.main))
            .unwrap_or_default()
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Theme::Clear => "weather-clear",
            Theme::Clouds => "weather-clouds",
            Theme::Rain => "weather-rain",
            Theme::Snow => "weather-snow",
            Theme::Default => "weather-default",
        }
    }

    pub const fn all() -> &'static [Theme] {
        &[Theme::Clear, Theme::Clouds, Theme::Rain, Theme::Snow, Theme::Default]
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}
