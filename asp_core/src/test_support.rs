//! Deterministic substitutes for the HTTP transport and the publisher.

use std::{sync::Mutex, time::Duration};

use async_trait::async_trait;
use reqwest::{Request, StatusCode};

use crate::{calendar_client::HttpTransport, error::BoxError, notifier::Publisher};

/// Answers every request with the response built by `respond`.
pub struct MockTransport<F> {
    respond: F,
}

impl<F> MockTransport<F>
where
    F: Fn(&Request) -> reqwest::Result<reqwest::Response> + Send + Sync,
{
    pub fn new(respond: F) -> Self {
        Self { respond }
    }
}

#[async_trait]
impl<F> HttpTransport for MockTransport<F>
where
    F: Fn(&Request) -> reqwest::Result<reqwest::Response> + Send + Sync,
{
    async fn execute(&self, request: Request) -> reqwest::Result<reqwest::Response> {
        (self.respond)(&request)
    }
}

pub fn json_response(body: &'static str) -> reqwest::Response {
    http::Response::builder()
        .status(200)
        .header("content-type", "application/json")
        .body(body)
        .unwrap()
        .into()
}

pub fn status_response(status: StatusCode) -> reqwest::Response {
    http::Response::builder()
        .status(status.as_u16())
        .body("")
        .unwrap()
        .into()
}

/// Records every published message, failing when `error` is set.
#[derive(Default)]
pub struct RecordingPublisher {
    pub published: Mutex<Vec<(String, String)>>,
    pub error: Option<String>,
}

impl RecordingPublisher {
    pub fn failing(error: &str) -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            error: Some(error.to_string()),
        }
    }

    pub fn published(&self) -> Vec<(String, String)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn publish(&self, topic_arn: &str, message: &str) -> Result<String, BoxError> {
        self.published
            .lock()
            .unwrap()
            .push((topic_arn.to_string(), message.to_string()));
        match &self.error {
            Some(error) => Err(error.clone().into()),
            None => Ok("message-id-1".to_string()),
        }
    }
}

/// Takes the given time to publish.
pub struct SlowPublisher(pub Duration);

#[async_trait]
impl Publisher for SlowPublisher {
    async fn publish(&self, _topic_arn: &str, _message: &str) -> Result<String, BoxError> {
        tokio::time::sleep(self.0).await;
        Ok("message-id-slow".to_string())
    }
}
