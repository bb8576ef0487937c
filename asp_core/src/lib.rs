//! This crate checks New York City's calendar API for Alternate Side Parking suspensions
//! and publishes a notification to an SNS topic when parking rules are suspended.
//!
//! The dates are read from the `api/GetCalendar` endpoint of the NYC 311 public API.

pub use chrono_tz;
pub use reqwest;
pub use tokio_util::sync::CancellationToken;

pub mod calendar;
pub mod calendar_client;
pub mod error;
pub mod handler;
pub mod notifier;
pub mod sns;

#[cfg(test)]
mod test_support;

/// Value of the `component` field attached to every log record.
pub static COMPONENT: &str = "nyc-asp";
