//! View state of the search-and-display flow.
//!
//! A session holds exactly one of idle / loading / success / error at a time, so a
//! result can never be shown alongside a loading indicator or an error message.

use crate::{
    Config, SearchError, Theme, WeatherReport,
    provider::{WeatherProvider, provider_from_config},
};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading {
        city: String,
    },
    Success(WeatherReport),
    Error(SearchError),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading { .. })
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        match self {
            ViewState::Success(report) => Some(report),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&SearchError> {
        match self {
            ViewState::Error(err) => Some(err),
            _ => None,
        }
    }
}

/// A search that passed validation and is waiting for the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    city: String,
}

impl PendingSearch {
    pub fn city(&self) -> &str {
        &self.city
    }
}

#[derive(Debug, Default)]
pub struct Session {
    provider: Option<Box<dyn WeatherProvider>>,
    state: ViewState,
}

impl Session {
    /// `None` means no credential is configured; every search then fails up front.
    pub fn new(provider: Option<Box<dyn WeatherProvider>>) -> Self {
        Self { provider, state: ViewState::Idle }
    }

    pub fn from_config(config: &Config) -> Self {
        match provider_from_config(config) {
            Ok(provider) => Self::new(Some(provider)),
            Err(err) => {
                tracing::warn!(%err, "no weather provider available");
                Self::new(None)
            }
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Submission is disabled while a search is outstanding.
    pub fn can_submit(&self) -> bool {
        !self.state.is_loading()
    }

    pub fn theme(&self) -> Theme {
        Theme::for_report(self.state.report())
    }

    /// Validate `city` and move to `Loading`.
    ///
    /// Returns `None` when nothing should be fetched: either a search is already
    /// pending (state untouched), or validation failed (state is now `Error`).
    pub fn begin_search(&mut self, city: &str) -> Option<PendingSearch> {
        if !self.can_submit() {
            tracing::debug!(city, "search ignored, another one is pending");
            return None;
        }

        let city = city.trim();
        if city.is_empty() {
            self.state = ViewState::Error(SearchError::EmptyCity);
            return None;
        }
        if self.provider.is_none() {
            self.state = ViewState::Error(SearchError::MissingCredential);
            return None;
        }

        self.state = ViewState::Loading { city: city.to_string() };
        Some(PendingSearch { city: city.to_string() })
    }

    /// Replace the loading state with the outcome of `pending`.
    pub fn finish_search(
        &mut self,
        pending: PendingSearch,
        outcome: Result<WeatherReport, SearchError>,
    ) {
        match &self.state {
            ViewState::Loading { city } if *city == pending.city => {}
            other => {
                tracing::warn!(city = %pending.city, state = ?other, "finishing a search that is not pending");
            }
        }

        self.state = match outcome {
            Ok(report) => ViewState::Success(report),
            Err(err) => ViewState::Error(err),
        };
    }

    /// The single outbound call for `pending`. Does not touch the view state.
    pub async fn fetch(&self, pending: &PendingSearch) -> Result<WeatherReport, SearchError> {
        match &self.provider {
            Some(provider) => provider.current_weather(pending.city()).await,
            None => Err(SearchError::MissingCredential),
        }
    }

    /// Run one full search: validate, fetch once, and settle the view state.
    pub async fn search(&mut self, city: &str) -> &ViewState {
        let Some(pending) = self.begin_search(city) else {
            return &self.state;
        };

        let outcome = self.fetch(&pending).await;
        self.finish_search(pending, outcome);
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Condition, MainFields};
    use async_trait::async_trait;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    #[derive(Debug, Clone)]
    struct FakeProvider {
        calls: Arc<AtomicUsize>,
        outcome: Result<WeatherReport, SearchError>,
    }

    impl FakeProvider {
        fn new(outcome: Result<WeatherReport, SearchError>) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (Self { calls: calls.clone(), outcome }, calls)
        }
    }

    #[async_trait]
    impl WeatherProvider for FakeProvider {
        async fn current_weather(&self, city: &str) -> Result<WeatherReport, SearchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone().map(|mut r| {
                r.name = city.to_string();
                r
            })
        }
    }

    fn rainy_report() -> WeatherReport {
        WeatherReport {
            id: 7,
            name: String::new(),
            cod: 200,
            base: None,
            timezone: 0,
            visibility: None,
            coord: None,
            weather: vec![Condition {
                id: 500,
                main: "Rain".into(),
                description: "light rain".into(),
                icon: "10d".into(),
            }],
            main: MainFields {
                temp: 8.4,
                feels_like: 6.5,
                temp_min: None,
                temp_max: None,
                pressure: None,
                humidity: 90,
            },
            wind: None,
            clouds: None,
            dt: None,
            sys: None,
        }
    }

    fn session_with(outcome: Result<WeatherReport, SearchError>) -> (Session, Arc<AtomicUsize>) {
        let (provider, calls) = FakeProvider::new(outcome);
        (Session::new(Some(Box::new(provider))), calls)
    }

    #[tokio::test]
    async fn empty_city_never_calls_provider() {
        let (mut session, calls) = session_with(Ok(rainy_report()));

        for input in ["", "   ", "\t\n"] {
            let state = session.search(input).await;
            assert_eq!(state, &ViewState::Error(SearchError::EmptyCity));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_credential_fails_before_fetching() {
        let mut session = Session::new(None);

        let state = session.search("London").await;
        assert_eq!(state, &ViewState::Error(SearchError::MissingCredential));
        assert!(session.can_submit());
    }

    #[test]
    fn from_config_without_key_reports_missing_credential() {
        let mut session = Session::from_config(&Config::default());

        assert!(session.begin_search("London").is_none());
        assert_eq!(session.state(), &ViewState::Error(SearchError::MissingCredential));
    }

    #[tokio::test]
    async fn success_replaces_state_with_report() {
        let (mut session, calls) = session_with(Ok(rainy_report()));

        let state = session.search("  Bergen ").await;
        let report = state.report().expect("report shown");
        assert_eq!(report.name, "Bergen");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(session.theme(), Theme::Rain);
    }

    #[tokio::test]
    async fn failure_clears_previous_result() {
        let (mut session, _) = session_with(Ok(rainy_report()));
        session.search("Bergen").await;
        assert!(session.state().report().is_some());

        let (provider, _) = FakeProvider::new(Err(SearchError::NotFound { city: "Atlantis".into() }));
        session.provider = Some(Box::new(provider));

        let state = session.search("Atlantis").await;
        assert!(state.report().is_none());
        assert!(state.error().expect("error shown").to_string().contains("Atlantis"));
        assert_eq!(session.theme(), Theme::Default);
    }

    #[test]
    fn submit_is_disabled_while_pending() {
        let (mut session, calls) = session_with(Ok(rainy_report()));

        let pending = session.begin_search("Oslo").expect("first search starts");
        assert!(!session.can_submit());
        assert!(session.state().is_loading());

        assert!(session.begin_search("Paris").is_none());
        assert_eq!(session.state(), &ViewState::Loading { city: "Oslo".into() });

        session.finish_search(pending, Err(SearchError::InvalidCredential));
        assert!(session.can_submit());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn new_search_clears_result_and_error_before_loading() {
        let (mut session, _) = session_with(Ok(rainy_report()));

        let pending = session.begin_search("Oslo").expect("starts");
        session.finish_search(pending, Ok(rainy_report()));
        assert!(session.state().report().is_some());

        let pending = session.begin_search("Paris").expect("starts");
        assert!(session.state().report().is_none());
        assert!(session.state().error().is_none());

        session.finish_search(pending, Err(SearchError::Server { status: 503 }));
        let pending = session.begin_search("Rome").expect("starts after an error");
        assert!(session.state().error().is_none());
        assert_eq!(pending.city(), "Rome");
    }

    #[test]
    fn no_state_combines_result_with_loading_or_error() {
        let states = [
            ViewState::Idle,
            ViewState::Loading { city: "Oslo".into() },
            ViewState::Success(rainy_report()),
            ViewState::Error(SearchError::InvalidCredential),
        ];

        for state in &states {
            let shown = [state.is_loading(), state.report().is_some(), state.error().is_some()];
            assert!(shown.iter().filter(|s| **s).count() <= 1, "{state:?}");
        }
    }
}
