//! Decide whether a notification is due and publish it.

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::{
    calendar::Item,
    error::{BoxError, NotifyError},
    COMPONENT,
};

pub static NO_ASP_MESSAGE: &str = "No ASP to publish";
pub static PUBLISHED_MESSAGE: &str = "ASP published to SNS";

/// Time zone the notification date is rendered in.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::New_York;

/// E.g. `Friday, Nov 10 2023`.
static DATE_FORMAT: &str = "%A, %b %d %Y";

/// Publishes a plain-text message to a topic and returns the message id.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, topic_arn: &str, message: &str) -> Result<String, BoxError>;
}

/// Outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationResult {
    pub message: String,
    pub items: Vec<Item>,
}

impl NotificationResult {
    fn nothing_to_publish() -> Self {
        Self {
            message: NO_ASP_MESSAGE.to_string(),
            items: Vec::new(),
        }
    }

    fn published(items: Vec<Item>) -> Self {
        Self {
            message: PUBLISHED_MESSAGE.to_string(),
            items,
        }
    }
}

pub struct Notifier<P> {
    publisher: P,
    topic_arn: String,
    timezone: Tz,
}

impl<P: Publisher> Notifier<P> {
    pub fn new(publisher: P, topic_arn: impl Into<String>) -> Self {
        Self {
            publisher,
            topic_arn: topic_arn.into(),
            timezone: DEFAULT_TIMEZONE,
        }
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Publish the first item, if there is one.
    ///
    /// Only the first item is summarized in the message; the result carries all of them.
    pub async fn notify(
        &self,
        cancel: &CancellationToken,
        items: Vec<Item>,
    ) -> Result<NotificationResult, NotifyError> {
        let Some(first) = items.first() else {
            info!(
                component = COMPONENT,
                local_time = %Local::now().to_rfc3339(),
                "no ASP to publish"
            );
            return Ok(NotificationResult::nothing_to_publish());
        };

        let now = Utc::now().with_timezone(&self.timezone);
        let message = format_message(&now, first);

        let published = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return Err(NotifyError::Cancelled {
                    topic_arn: self.topic_arn.clone(),
                })
            }
            published = self.publisher.publish(&self.topic_arn, &message) => published,
        };
        let message_id = published.map_err(|source| {
            error!(
                component = COMPONENT,
                topic_arn = %self.topic_arn,
                error = %source,
                "publish failed"
            );
            NotifyError::Publish {
                topic_arn: self.topic_arn.clone(),
                source,
            }
        })?;

        info!(component = COMPONENT, message_id = %message_id, "ASP published to SNS");
        Ok(NotificationResult::published(items))
    }
}

/// Format the notification for an item on the given date.
pub fn format_message<Z>(date: &DateTime<Z>, item: &Item) -> String
where
    Z: TimeZone,
    Z::Offset: std::fmt::Display,
{
    format!(
        "Date: {}\nASP: {}\nDetails: {}",
        date.format(DATE_FORMAT),
        item.status,
        item.details
    )
}
