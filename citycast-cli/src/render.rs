//! Terminal rendering of the view state.

use chrono::{DateTime, FixedOffset};
use citycast_core::{Theme, ViewState, WeatherReport};

const RESET: &str = "\u{1b}[0m";
const BOLD: &str = "\u{1b}[1m";
const DIM: &str = "\u{1b}[2m";
const ERROR: &str = "\u{1b}[38;5;196m";

#[derive(Debug, Clone)]
pub struct RenderStyle {
    pub color: bool,
    pub icon_base_url: String,
}

impl RenderStyle {
    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// ANSI 256-colour foreground for each theme.
fn theme_color(theme: Theme) -> &'static str {
    match theme {
        Theme::Clear => "\u{1b}[38;5;226m",
        Theme::Clouds => "\u{1b}[38;5;250m",
        Theme::Rain => "\u{1b}[38;5;33m",
        Theme::Snow => "\u{1b}[38;5;255m",
        Theme::Default => "\u{1b}[38;5;111m",
    }
}

pub fn heading(style: &RenderStyle) -> String {
    style.paint(BOLD, "The Weather")
}

pub fn render(state: &ViewState, style: &RenderStyle) -> String {
    match state {
        ViewState::Idle => String::new(),
        ViewState::Loading { .. } => style.paint(DIM, "Loading..."),
        ViewState::Error(err) => style.paint(ERROR, &err.to_string()),
        ViewState::Success(report) => render_report(report, style),
    }
}

fn render_report(report: &WeatherReport, style: &RenderStyle) -> String {
    let theme = Theme::for_report(Some(report));
    let color = theme_color(theme);

    let mut lines = vec![
        format!("[{}] {}", theme.tag(), report.location_label()),
        format!("Temperature: {}°C", report.temperature_whole()),
        format!("Feels Like: {}°C", report.feels_like_whole()),
    ];

    if let Some(cond) = report.primary_condition() {
        if cond.description.is_empty() {
            lines.push(format!("Condition: {}", cond.main));
        } else {
            lines.push(format!("Condition: {} ({})", cond.main, cond.description));
        }
        lines.push(format!("Icon: {}", cond.icon_url(&style.icon_base_url)));
    }

    lines.push(format!("Humidity: {}%", report.main.humidity));

    lines.push(match report.wind {
        Some(wind) => match wind.compass() {
            Some(dir) => format!("Wind Speed: {} m/s ({dir})", wind.speed),
            None => format!("Wind Speed: {} m/s", wind.speed),
        },
        None => "Wind Speed: n/a".to_string(),
    });

    if let Some(at) = report.observed_at() {
        lines.push(format!("Observed: {}", format_local(at.with_timezone(&report.local_offset()))));
    }

    let mut out = style.paint(&format!("{BOLD}{color}"), &lines[0]);
    for line in &lines[1..] {
        out.push('\n');
        out.push_str(&style.paint(color, line));
    }
    out
}

fn format_local(at: DateTime<FixedOffset>) -> String {
    at.format("%Y-%m-%d %H:%M (UTC%:z)").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use citycast_core::SearchError;

    const PARIS: &str = r#"{
        "weather": [ { "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" } ],
        "main": { "temp": 21.5, "feels_like": 20.49, "pressure": 1020, "humidity": 40 },
        "wind": { "speed": 3.6, "deg": 90 },
        "dt": 1700000000,
        "sys": { "country": "FR" },
        "timezone": 3600,
        "name": "Paris"
    }"#;

    fn plain() -> RenderStyle {
        RenderStyle { color: false, icon_base_url: "http://openweathermap.org/img/wn".into() }
    }

    fn paris() -> WeatherReport {
        serde_json::from_str(PARIS).expect("fixture must decode")
    }

    #[test]
    fn panel_shows_rounded_values() {
        let out = render(&ViewState::Success(paris()), &plain());

        assert!(out.starts_with("[weather-clear] Paris, FR"), "{out}");
        assert!(out.contains("Temperature: 22°C"), "{out}");
        assert!(out.contains("Feels Like: 20°C"), "{out}");
        assert!(out.contains("Condition: Clear (clear sky)"), "{out}");
        assert!(out.contains("Icon: http://openweathermap.org/img/wn/01d@2x.png"), "{out}");
        assert!(out.contains("Humidity: 40%"), "{out}");
        assert!(out.contains("Wind Speed: 3.6 m/s (E)"), "{out}");
        assert!(out.contains("Observed: 2023-11-14 23:13 (UTC+01:00)"), "{out}");
    }

    #[test]
    fn empty_condition_sequence_renders_without_condition_lines() {
        let mut report = paris();
        report.weather.clear();
        report.wind = None;

        let out = render(&ViewState::Success(report), &plain());

        assert!(out.starts_with("[weather-default]"), "{out}");
        assert!(!out.contains("Condition:"));
        assert!(!out.contains("Icon:"));
        assert!(out.contains("Wind Speed: n/a"));
    }

    #[test]
    fn error_state_shows_only_the_message() {
        let err = SearchError::NotFound { city: "Atlantis".into() };
        let out = render(&ViewState::Error(err), &plain());

        assert_eq!(out, "Could not find weather data for \"Atlantis\". Please check spelling.");
        assert!(!out.contains("Temperature"));
    }

    #[test]
    fn loading_and_idle() {
        assert_eq!(render(&ViewState::Loading { city: "Oslo".into() }, &plain()), "Loading...");
        assert_eq!(render(&ViewState::Idle, &plain()), "");
    }

    #[test]
    fn colour_follows_theme() {
        let style = RenderStyle { color: true, ..plain() };
        let mut report = paris();
        report.weather[0].main = "Rain".into();

        let out = render(&ViewState::Success(report), &style);
        assert!(out.contains("\u{1b}[38;5;33m"));
        assert!(out.ends_with(RESET));

        let out = render(&ViewState::Success(paris()), &plain());
        assert!(!out.contains('\u{1b}'));
    }
}
