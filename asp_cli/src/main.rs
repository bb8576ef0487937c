mod cli;

use anyhow::{Context, Result};
use asp_core::{
    calendar_client::{http_client, CalendarClient},
    handler::{self, cancel_after},
    notifier::Notifier,
    reqwest,
    sns::{Client, SnsPublisher},
    CancellationToken, COMPONENT,
};
use clap::Parser;
use serde_json::to_string_pretty;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Arguments, CalendarArgs, Command, NotifyArgs};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Arguments::parse();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "asp_core=info,nyc_asp=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();

    info!(component = COMPONENT, "starting up");

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    let deadline = cancel_after(&cancel, args.command.invocation_args().deadline());

    let result = run(args.command, &cancel).await;
    deadline.abort();
    if let Err(err) = &result {
        error!(component = COMPONENT, error = %format!("{err:#}"), "invocation failed");
    }
    info!(component = COMPONENT, "shutting down");
    result
}

async fn run(command: Command, cancel: &CancellationToken) -> Result<()> {
    match command {
        Command::Notify {
            calendar_args,
            notify_args,
            ..
        } => run_notify(calendar_args, notify_args, cancel).await?,
        Command::Fetch { calendar_args, .. } => run_fetch(calendar_args, cancel).await?,
    };
    Ok(())
}

fn calendar_client(args: &CalendarArgs) -> Result<CalendarClient<reqwest::Client>> {
    let transport = http_client(args.http_timeout()).context("error building http client")?;
    Ok(CalendarClient::new(args.calendar_config(), transport))
}

async fn run_notify(
    calendar_args: CalendarArgs,
    notify_args: NotifyArgs,
    cancel: &CancellationToken,
) -> Result<()> {
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let notifier = Notifier::new(
        SnsPublisher::new(Client::new(&aws_config)),
        notify_args.topic_arn,
    )
    .with_timezone(notify_args.timezone);

    let result = handler::handle_request(
        cancel,
        &calendar_client(&calendar_args)?,
        &calendar_args.item_filter(),
        &notifier,
    )
    .await?;
    println!("{}", to_string_pretty(&result)?);
    Ok(())
}

async fn run_fetch(calendar_args: CalendarArgs, cancel: &CancellationToken) -> Result<()> {
    let items = handler::fetch_items(
        cancel,
        &calendar_client(&calendar_args)?,
        &calendar_args.item_filter(),
    )
    .await?;
    println!("{}", to_string_pretty(&items)?);
    Ok(())
}
