//! Amazon SNS as the notification publisher.

use async_trait::async_trait;
use aws_sdk_sns::error::DisplayErrorContext;

use crate::{error::BoxError, notifier::Publisher};

pub use aws_sdk_sns::Client;

pub struct SnsPublisher {
    client: Client,
}

impl SnsPublisher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Publisher for SnsPublisher {
    async fn publish(&self, topic_arn: &str, message: &str) -> Result<String, BoxError> {
        let output = self
            .client
            .publish()
            .topic_arn(topic_arn)
            .message(message)
            .send()
            .await
            .map_err(|err| DisplayErrorContext(err).to_string())?;
        Ok(output.message_id().unwrap_or_default().to_string())
    }
}
