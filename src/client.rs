//! MailFly async client implementation.

use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, warn};

use crate::models::{MailListResponse, NewAddressResponse};
use crate::{Error, MailboxIdentity, Message, Result, extract_code};

/// Async client for a MailFly-style disposable email service.
///
/// Use [`Client::new`] for the built-in service defaults or
/// [`Client::builder`] to point it at another deployment.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    domain: String,
    admin_secret: String,
    identity: Option<MailboxIdentity>,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new client with default settings.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailfly_client::Client;
    /// # fn main() -> Result<(), mailfly_client::Error> {
    /// let client = Client::new()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    /// Get the provisioned inbox identity, if any.
    ///
    /// Returns `None` until [`create_inbox`](Self::create_inbox) succeeds.
    pub fn identity(&self) -> Option<&MailboxIdentity> {
        self.identity.as_ref()
    }

    /// Provision a new disposable inbox.
    ///
    /// Issues one authenticated creation request. The resulting identity is
    /// stored on the client for use by [`list_messages`](Self::list_messages)
    /// and [`wait_for_code`](Self::wait_for_code).
    ///
    /// # Arguments
    /// * `prefix` - Local part of the address; a random one is generated when
    ///   absent
    /// * `domain` - Overrides the client's configured domain for this inbox
    ///
    /// # Returns
    /// The full email address assigned by the service
    ///
    /// # Errors
    /// [`Error::Provision`] on a non-success response. There is no retry at
    /// this layer; a failed call is terminal for the attempt.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailfly_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailfly_client::Error> {
    /// let mut client = Client::new()?;
    /// let address = client.create_inbox(None, None).await?;
    /// println!("{address}");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_inbox(
        &mut self,
        prefix: Option<&str>,
        domain: Option<&str>,
    ) -> Result<String> {
        let name = match prefix {
            Some(prefix) => prefix.to_string(),
            None => generate_prefix(DEFAULT_PREFIX_LEN),
        };
        let domain = domain.unwrap_or(&self.domain);

        let response = self
            .http
            .post(format!("{}/admin/new_address", self.base_url))
            .header("x-admin-auth", &self.admin_secret)
            .json(&serde_json::json!({
                "enablePrefix": true,
                "name": name,
                "domain": domain,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Best-effort body for diagnostics; a failed read is not escalated.
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Provision { status, body });
        }

        let created: NewAddressResponse = response.json().await?;
        debug!(address = %created.address, "inbox provisioned");

        let address = created.address.clone();
        self.identity = Some(MailboxIdentity {
            address: created.address,
            jwt: created.jwt,
        });
        Ok(address)
    }

    /// Fetch the most recent messages in the provisioned inbox.
    ///
    /// At most the 10 newest messages are returned, as reported by the
    /// service; ordering beyond "most recent first" is not guaranteed. An
    /// empty inbox yields an empty vec, never an error.
    ///
    /// # Errors
    /// [`Error::NotProvisioned`] when called before
    /// [`create_inbox`](Self::create_inbox); [`Error::FetchFailed`] on a
    /// non-success response.
    pub async fn list_messages(&self) -> Result<Vec<Message>> {
        let identity = self.identity.as_ref().ok_or(Error::NotProvisioned)?;

        let response = self
            .http
            .get(format!("{}/api/mails", self.base_url))
            .query(&[("limit", "10"), ("offset", "0")])
            .bearer_auth(&identity.jwt)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::FetchFailed(status));
        }

        let list: MailListResponse = response.json().await?;
        debug!(count = list.results.len(), "fetched message list");
        Ok(list.results.into_iter().map(Message::from).collect())
    }

    /// Poll the inbox until a verification code arrives, with default pacing
    /// (120 s timeout, 3 s between ticks).
    ///
    /// See [`wait_for_code_within`](Self::wait_for_code_within).
    pub async fn wait_for_code(&self) -> Result<String> {
        self.wait_for_code_within(DEFAULT_TIMEOUT, DEFAULT_POLL_INTERVAL)
            .await
    }

    /// Poll the inbox until a verification code arrives or `timeout` elapses.
    ///
    /// Each tick fetches the message list and scans it in two passes: first
    /// only messages from a trusted sender (one whose sender string contains
    /// `amazon` or `aws`, case-insensitive), then all messages as a fallback
    /// for absent or mismatched sender metadata. The first extracted code is
    /// returned immediately.
    ///
    /// A failed fetch is logged and swallowed; the loop retries on the next
    /// tick, so a transient service error cannot abort an otherwise
    /// successful wait. The deadline is checked *before* each fetch: a zero
    /// `timeout` times out without a single request.
    ///
    /// # Errors
    /// [`Error::NotProvisioned`] when called before
    /// [`create_inbox`](Self::create_inbox); [`Error::Timeout`] when the
    /// deadline passes without a code.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailfly_client::Client;
    /// # use std::time::Duration;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailfly_client::Error> {
    /// let mut client = Client::new()?;
    /// client.create_inbox(None, None).await?;
    /// let code = client
    ///     .wait_for_code_within(Duration::from_secs(60), Duration::from_secs(2))
    ///     .await?;
    /// println!("code: {code}");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn wait_for_code_within(
        &self,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Result<String> {
        if self.identity.is_none() {
            return Err(Error::NotProvisioned);
        }

        let start = Instant::now();
        while start.elapsed() < timeout {
            match self.list_messages().await {
                Ok(messages) => {
                    if let Some(code) = Self::scan_for_code(&messages) {
                        debug!(%code, "extracted verification code");
                        return Ok(code);
                    }
                }
                // Transient; the next tick retries.
                Err(e) => warn!(error = %e, "poll tick failed"),
            }

            tokio::time::sleep(poll_interval).await;
        }

        Err(Error::Timeout(timeout))
    }

    /// Delete the inbox. Documented no-op.
    ///
    /// The service exposes no deletion endpoint; inboxes expire server-side.
    /// This method exists to satisfy the usual inbox lifecycle and never
    /// fails.
    pub async fn delete_inbox(&self) {
        debug!("no delete endpoint; inbox expires server-side");
    }

    /// Two-pass scan over one fetched message list.
    fn scan_for_code(messages: &[Message]) -> Option<String> {
        let trusted = messages.iter().filter(|m| {
            let sender = m.sender.to_lowercase();
            TRUSTED_SENDERS.iter().any(|t| sender.contains(t))
        });
        for message in trusted {
            if let Some(code) = extract_code(&message.body) {
                return Some(code);
            }
        }

        // No trusted-sender hit; fall back to every message.
        for message in messages {
            if let Some(code) = extract_code(&message.body) {
                return Some(code);
            }
        }
        None
    }
}

/// Generate a random local-part prefix of the given length.
///
/// Lowercase alphanumeric; the first character is always a letter, since
/// some backing systems reject local parts that start with a digit.
///
/// # Examples
/// ```
/// let prefix = mailfly_client::generate_prefix(10);
/// assert_eq!(prefix.len(), 10);
/// assert!(prefix.chars().next().unwrap().is_ascii_lowercase());
/// ```
pub fn generate_prefix(length: usize) -> String {
    const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
    const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

    let mut rng = rand::rng();
    let mut prefix = String::with_capacity(length);
    if length == 0 {
        return prefix;
    }
    prefix.push(LETTERS[rng.random_range(0..LETTERS.len())] as char);
    for _ in 1..length {
        prefix.push(ALPHANUMERIC[rng.random_range(0..ALPHANUMERIC.len())] as char);
    }
    prefix
}

const BASE_URL: &str = "https://apimail.ynxx.buzz";
const DEFAULT_DOMAIN: &str = "ynxx.buzz";
const ADMIN_SECRET: &str = "xingxin";
const DEFAULT_PREFIX_LEN: usize = 10;
const DEFAULT_TIMEOUT: Duration = Duration::from_millis(120_000);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(3_000);
const TRUSTED_SENDERS: &[&str] = &["amazon", "aws"];

/// Builder for configuring a MailFly client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    domain: String,
    admin_secret: String,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - Built-in service base URL and mail domain
    /// - Built-in admin secret
    pub fn new() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            domain: DEFAULT_DOMAIN.to_string(),
            admin_secret: ADMIN_SECRET.to_string(),
        }
    }

    /// Override the service base URL (no trailing slash).
    ///
    /// Useful for testing or self-hosted deployments.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the default mail domain for new inboxes.
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Override the admin secret used for provisioning.
    pub fn admin_secret(mut self, admin_secret: impl Into<String>) -> Self {
        self.admin_secret = admin_secret.into();
        self
    }

    /// Build the client.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailfly_client::Client;
    /// # fn main() -> Result<(), mailfly_client::Error> {
    /// let client = Client::builder()
    ///     .base_url("https://mail.example.com")
    ///     .domain("example.com")
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<Client> {
        let http = reqwest::Client::builder().build()?;

        Ok(Client {
            http,
            base_url: self.base_url,
            domain: self.domain,
            admin_secret: self.admin_secret,
            identity: None,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
