use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Parser;
use shared::protocol::ContactPayload;
use site_core::{
    form::SUCCESS_BANNER, ContactForm, FormEvent, FormStatus, HttpContactTransport, SiteConfig,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Sends one contact message the way the page's form does and prints every
/// status change.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = site_core::config::DEFAULT_PUBLIC_URL)]
    server_url: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long, default_value = "Other")]
    service: String,
    #[arg(long)]
    message: String,
    /// Keep running until the success banner clears.
    #[arg(long)]
    wait_reset: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
    let args = Args::parse();

    let site = SiteConfig::from_public_url(&args.server_url)?;
    info!(endpoint = %site.contact_endpoint, "submitting contact form");
    let form = ContactForm::new(Arc::new(HttpContactTransport::new(
        site.contact_endpoint.clone(),
    )));
    let mut events = form.subscribe();

    form.fill(ContactPayload {
        name: args.name,
        email: args.email,
        service: args.service,
        message: args.message,
    })
    .await?;
    let status = form.submit().await?;
    while let Ok(event) = events.try_recv() {
        print_event(&event);
    }

    if status == FormStatus::Success && args.wait_reset {
        loop {
            let event = events.recv().await?;
            print_event(&event);
            if matches!(
                event,
                FormEvent::StatusChanged {
                    status: FormStatus::Idle,
                    ..
                }
            ) {
                break;
            }
        }
    }

    let snapshot = form.snapshot().await;
    form.teardown().await;
    if status == FormStatus::Error {
        bail!(
            "{}",
            snapshot
                .error_message
                .unwrap_or_else(|| "submission failed".to_string())
        );
    }
    Ok(())
}

fn print_event(event: &FormEvent) {
    match event {
        FormEvent::StatusChanged {
            status,
            error_message,
            generation,
        } => {
            println!("[{generation}] {}", status.as_str());
            match status {
                FormStatus::Success => println!("    {SUCCESS_BANNER}"),
                FormStatus::Error => {
                    if let Some(message) = error_message {
                        println!("    {message}");
                    }
                }
                FormStatus::Idle | FormStatus::Loading => {}
            }
        }
        FormEvent::FieldsCleared => println!("    fields cleared"),
    }
}
