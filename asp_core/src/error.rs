//! Errors of the fetch and the publish stage.
//!
//! None of them is retried; each one ends the current invocation.

use reqwest::StatusCode;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure to get the calendar items.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The endpoint or a header could not be built from the configuration.
    #[error("error creating http request")]
    RequestBuild(#[source] BoxError),

    #[error("error performing http request")]
    Transport(#[source] reqwest::Error),

    #[error("error status code is not 200 OK, got {0}")]
    UnexpectedStatus(StatusCode),

    #[error("error reading response body")]
    BodyRead(#[source] reqwest::Error),

    #[error("error unmarshalling response body")]
    Decode(#[source] serde_json::Error),

    #[error("calendar request cancelled")]
    Cancelled,
}

/// Failure to publish the notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("error publishing to SNS topic {topic_arn}")]
    Publish {
        topic_arn: String,
        #[source]
        source: BoxError,
    },

    #[error("publishing to SNS topic {topic_arn} cancelled")]
    Cancelled { topic_arn: String },
}

/// Failure of the whole request/filter/publish pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Notify(#[from] NotifyError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
