//! This module implements the command line and environment configuration.

use std::time::Duration;

use asp_core::{
    calendar::{ItemFilter, STATUS_SUSPENDED, TYPE_ALTERNATE_SIDE_PARKING},
    calendar_client::{CalendarConfig, DEFAULT_HTTP_TIMEOUT, DEFAULT_LOOKBACK_DAYS},
    chrono_tz::Tz,
    handler::DEFAULT_INVOCATION_DEADLINE,
    notifier::DEFAULT_TIMEZONE,
};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(about = "Notify about suspended Alternate Side Parking in New York City")]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// fetch the calendar and publish a notification for a suspension
    Notify {
        #[command(flatten)]
        invocation_args: InvocationArgs,
        #[command(flatten)]
        calendar_args: CalendarArgs,
        #[command(flatten)]
        notify_args: NotifyArgs,
    },
    /// fetch the calendar and print the matching items without publishing
    Fetch {
        #[command(flatten)]
        invocation_args: InvocationArgs,
        #[command(flatten)]
        calendar_args: CalendarArgs,
    },
}

impl Command {
    pub fn invocation_args(&self) -> &InvocationArgs {
        match self {
            Command::Notify {
                invocation_args, ..
            }
            | Command::Fetch {
                invocation_args, ..
            } => invocation_args,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct InvocationArgs {
    /// seconds after which the fetch and the publish are cancelled
    #[arg(long, env = "ASP_DEADLINE_SECS", default_value_t = DEFAULT_INVOCATION_DEADLINE.as_secs())]
    pub deadline_secs: u64,
}

impl InvocationArgs {
    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.deadline_secs)
    }
}

#[derive(Debug, Clone, Args)]
pub struct CalendarArgs {
    /// the calendar API subscription key
    #[arg(long, env = "OCP_APIM_SUBSCRIPTION_KEY", hide_env_values = true)]
    pub api_key: String,
    /// the calendar API base URL, e.g. https://api.nyc.gov/public
    #[arg(long, env = "BASE_API_HOST")]
    pub base_api_host: String,
    /// number of days before today the queried window starts
    #[arg(long, env = "ASP_LOOKBACK_DAYS", default_value_t = DEFAULT_LOOKBACK_DAYS)]
    pub lookback_days: u32,
    /// timeout of the calendar request in seconds
    #[arg(long, env = "ASP_HTTP_TIMEOUT_SECS", default_value_t = DEFAULT_HTTP_TIMEOUT.as_secs())]
    pub http_timeout_secs: u64,
    /// the calendar item type to report
    #[arg(long, env = "ASP_ITEM_TYPE", default_value = TYPE_ALTERNATE_SIDE_PARKING)]
    pub item_type: String,
    /// the calendar item status to report
    #[arg(long, env = "ASP_STATUS", default_value = STATUS_SUSPENDED)]
    pub status: String,
}

impl CalendarArgs {
    pub fn calendar_config(&self) -> CalendarConfig {
        CalendarConfig::new(&self.api_key, &self.base_api_host)
            .with_lookback_days(self.lookback_days)
    }

    pub fn item_filter(&self) -> ItemFilter {
        ItemFilter::new(&self.item_type, &self.status)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

#[derive(Debug, Clone, Args)]
pub struct NotifyArgs {
    /// the SNS topic the notification is published to
    #[arg(long, env = "TOPIC_ARN")]
    pub topic_arn: String,
    /// the time zone the notification date is rendered in
    #[arg(long, env = "ASP_TIMEZONE", default_value_t = DEFAULT_TIMEZONE, value_parser = parse_timezone)]
    pub timezone: Tz,
}

fn parse_timezone(name: &str) -> Result<Tz, String> {
    name.parse::<Tz>()
        .map_err(|err| format!("unknown time zone {name:?}: {err}"))
}
