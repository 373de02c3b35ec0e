use std::{sync::Arc, time::Duration};

use clap::Parser;
use records::HttpRecordClient;
use repository::{ChannelNotifier, Notifier, Toast, ToastLevel};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::error::Result;

mod cli;
mod commands;
mod error;
mod settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let settings = settings::load(&cli)?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(&settings.level))
        .init();

    let client = HttpRecordClient::builder()
        .base_url(&settings.base_url)
        .credentials(&settings.project_id, &settings.public_key)
        .timeout(Duration::from_secs(settings.request_timeout_secs))
        .build()?;
    tracing::debug!(base_url = %settings.base_url, "record client ready");

    let (notifier, toasts) = ChannelNotifier::new();
    let notifier: Arc<dyn Notifier> = Arc::new(notifier);
    let output = commands::execute(cli.command, Arc::new(client), notifier, &settings.tables).await;
    print_toasts(toasts);

    println!("{}", serde_json::to_string_pretty(&output?)?);
    Ok(())
}

/// Our crates at `level`, plus the `toast` target the default notifier
/// writes to.
fn log_filter(level: &str) -> String {
    format!("fintrack={level},records={level},repository={level},toast={level}")
}

fn print_toasts(mut toasts: UnboundedReceiver<Toast>) {
    while let Ok(toast) = toasts.try_recv() {
        match toast.level {
            ToastLevel::Success => eprintln!("ok: {}", toast.message),
            ToastLevel::Error => eprintln!("error: {}", toast.message),
        }
    }
}
