//! End-to-end walkthrough: provision an inbox, wait for a verification code.
//!
//! ```bash
//! cargo run --example demo
//! ```
//!
//! Optionally override the deployment:
//!
//! ```bash
//! export MAILFLY_BASE_URL="https://mail.example.com"
//! export MAILFLY_DOMAIN="example.com"
//! export MAILFLY_ADMIN_SECRET="..."
//! ```

use std::env;
use std::time::Duration;

use mailfly_client::{Client, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mailfly_client=debug".into()),
        )
        .init();

    let mut builder = Client::builder();
    if let Ok(base_url) = env::var("MAILFLY_BASE_URL") {
        builder = builder.base_url(base_url);
    }
    if let Ok(domain) = env::var("MAILFLY_DOMAIN") {
        builder = builder.domain(domain);
    }
    if let Ok(secret) = env::var("MAILFLY_ADMIN_SECRET") {
        builder = builder.admin_secret(secret);
    }
    let mut client = builder.build()?;

    let address = client.create_inbox(None, None).await?;
    println!("Inbox ready: {address}");
    println!("Send a verification email to that address, then wait...");

    match client
        .wait_for_code_within(Duration::from_secs(120), Duration::from_secs(3))
        .await
    {
        Ok(code) => println!("Verification code: {code}"),
        Err(Error::Timeout(t)) => println!("No code within {}s", t.as_secs()),
        Err(e) => return Err(e),
    }

    // No delete endpoint; the inbox expires on its own.
    client.delete_inbox().await;
    Ok(())
}
