//! Core library for the `citycast` weather lookup client.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - The OpenWeatherMap provider and its failure classification
//! - The weather report model and the theme derived from it
//! - The view state of a search (idle / loading / success / error)
//!
//! It is used by `citycast-cli`, but can also be driven by other front ends.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod session;
pub mod theme;

pub use config::Config;
pub use error::{ErrorCategory, FetchFailure, SearchError};
pub use model::WeatherReport;
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
pub use session::{PendingSearch, Session, ViewState};
pub use theme::Theme;
