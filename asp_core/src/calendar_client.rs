//! This client fetches the calendar and extracts the items matching a predicate.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, SecondsFormat};
use reqwest::{
    header::{HeaderValue, CACHE_CONTROL},
    Method, Request, StatusCode,
};
use tokio_util::sync::CancellationToken;
use tracing::error;
use url::Url;

use crate::{
    calendar::{filter_items, Item, Response},
    error::FetchError,
    COMPONENT,
};

static GET_CALENDAR_ENDPOINT: &str = "api/GetCalendar";
static APIM_SUBSCRIPTION_KEY: &str = "ocp-apim-subscription-key";
static NO_CACHE: &str = "no-cache";

/// The API may not have data for the current day yet, so the window starts earlier.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 2;
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Performs a single HTTP request.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: Request) -> reqwest::Result<reqwest::Response>;
}

#[async_trait]
impl HttpTransport for reqwest::Client {
    async fn execute(&self, request: Request) -> reqwest::Result<reqwest::Response> {
        reqwest::Client::execute(self, request).await
    }
}

/// Build the client used in production.
pub fn http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().timeout(timeout).build()
}

#[derive(Debug, Clone)]
pub struct CalendarConfig {
    pub api_key: String,
    pub base_api_host: String,
    pub lookback_days: u32,
}

impl CalendarConfig {
    pub fn new(api_key: impl Into<String>, base_api_host: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_api_host: base_api_host.into(),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }

    pub fn with_lookback_days(mut self, lookback_days: u32) -> Self {
        self.lookback_days = lookback_days;
        self
    }

    /// `fromDate` is `now` minus the lookback, `toDate` is `now`.
    ///
    /// `None` when the lookback reaches past the representable dates.
    pub fn date_range(&self, now: DateTime<Local>) -> Option<(DateTime<Local>, DateTime<Local>)> {
        let lookback = chrono::Duration::try_days(i64::from(self.lookback_days))?;
        let from = now.checked_sub_signed(lookback)?;
        Some((from, now))
    }
}

pub struct CalendarClient<T> {
    config: CalendarConfig,
    transport: T,
}

impl<T: HttpTransport> CalendarClient<T> {
    pub fn new(config: CalendarConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    /// Build the calendar request for the window ending at `now`.
    pub fn build_request(&self, now: DateTime<Local>) -> Result<Request, FetchError> {
        let (from, to) = self.config.date_range(now).ok_or_else(|| {
            FetchError::RequestBuild(
                format!("lookback of {} days is out of range", self.config.lookback_days).into(),
            )
        })?;
        let endpoint = format!(
            "{}/{}",
            self.config.base_api_host.trim_end_matches('/'),
            GET_CALENDAR_ENDPOINT
        );
        let url = Url::parse_with_params(
            &endpoint,
            &[
                ("fromDate", from.to_rfc3339_opts(SecondsFormat::Secs, true)),
                ("toDate", to.to_rfc3339_opts(SecondsFormat::Secs, true)),
            ],
        )
        .map_err(|err| FetchError::RequestBuild(err.into()))?;
        let api_key = HeaderValue::from_str(&self.config.api_key)
            .map_err(|err| FetchError::RequestBuild(err.into()))?;

        let mut request = Request::new(Method::GET, url);
        let headers = request.headers_mut();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static(NO_CACHE));
        headers.insert(APIM_SUBSCRIPTION_KEY, api_key);
        Ok(request)
    }

    /// Get the items of the current window matching the predicate.
    pub async fn get_items<F>(
        &self,
        cancel: &CancellationToken,
        predicate: F,
    ) -> Result<Vec<Item>, FetchError>
    where
        F: Fn(&Item) -> bool,
    {
        let response = self.get_response(cancel).await?;
        Ok(filter_items(&response, predicate))
    }

    /// Get and decode the calendar response.
    async fn get_response(&self, cancel: &CancellationToken) -> Result<Response, FetchError> {
        let request = self.build_request(Local::now())?;
        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(FetchError::Cancelled),
            response = self.transport.execute(request) => response.map_err(FetchError::Transport)?,
        };

        let status = response.status();
        if status != StatusCode::OK {
            error!(
                component = COMPONENT,
                status = status.as_u16(),
                "unexpected calendar response status"
            );
            return Err(FetchError::UnexpectedStatus(status));
        }

        let body = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(FetchError::Cancelled),
            body = response.bytes() => body.map_err(FetchError::BodyRead)?,
        };
        serde_json::from_slice(&body).map_err(FetchError::Decode)
    }
}
