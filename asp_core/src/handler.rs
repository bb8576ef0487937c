//! The request/filter/publish pipeline run once per invocation.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::{
    calendar::{Item, ItemFilter},
    calendar_client::{CalendarClient, HttpTransport},
    error::Result,
    notifier::{NotificationResult, Notifier, Publisher},
    COMPONENT,
};

/// Wall-clock bound of one invocation, covering the fetch and the publish.
pub const DEFAULT_INVOCATION_DEADLINE: Duration = Duration::from_secs(10);

/// Cancel `cancel` once `deadline` has passed, unless it is cancelled before.
pub fn cancel_after(cancel: &CancellationToken, deadline: Duration) -> JoinHandle<()> {
    let cancel = cancel.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = cancel.cancelled() => {}
            _ = tokio::time::sleep(deadline) => {
                warn!(
                    component = COMPONENT,
                    deadline_ms = deadline.as_millis() as u64,
                    "invocation deadline passed"
                );
                cancel.cancel();
            }
        }
    })
}

/// Fetch the matching items and publish a notification for them.
///
/// Nothing is published when the fetch fails.
pub async fn handle_request<T, P>(
    cancel: &CancellationToken,
    calendar_client: &CalendarClient<T>,
    filter: &ItemFilter,
    notifier: &Notifier<P>,
) -> Result<NotificationResult>
where
    T: HttpTransport,
    P: Publisher,
{
    let items = fetch_items(cancel, calendar_client, filter).await?;
    let result = notifier.notify(cancel, items).await?;
    Ok(result)
}

/// Fetch the matching items without publishing anything.
pub async fn fetch_items<T: HttpTransport>(
    cancel: &CancellationToken,
    calendar_client: &CalendarClient<T>,
    filter: &ItemFilter,
) -> Result<Vec<Item>> {
    let items = calendar_client
        .get_items(cancel, |item| filter.matches(item))
        .await?;
    Ok(items)
}
