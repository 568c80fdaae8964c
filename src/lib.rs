//! # MailFly Client
//! Asynchronous wrapper around a MailFly-style disposable email HTTP API, providing simple methods to provision a temporary inbox, poll it for messages, and extract a 6-digit verification code from Rust using [`Client`] and [`ClientBuilder`].
//!
//! ## Audience and uses
//! For Rust developers automating account-verification flows that deliver an email OTP: provision an address with [`Client::create_inbox`], hand it to the signup form under test, then block on [`Client::wait_for_code`] until the code arrives or the deadline passes. Message listing ([`Message`]) and code extraction ([`extract_code`]) are also usable on their own.
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest`, so ensure the chosen Tokio features (`rt-multi-thread` or `current_thread`) are available in your application. The crate logs through `tracing`; install a subscriber to see poll-loop diagnostics.
//!
//! ## Out of scope
//! Not a general-purpose mail client and not the mail service itself. It only proxies one MailFly deployment and inherits its availability and retention limits; inboxes cannot be deleted, they expire server-side.
//!
//! ## Errors
//! Transport failures surface as [`Error::Request`]; a rejected provisioning call is [`Error::Provision`], a rejected list call [`Error::FetchFailed`], and an expired wait [`Error::Timeout`]. Calling inbox operations before provisioning is a precondition violation, [`Error::NotProvisioned`]. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Example
//! ```no_run
//! use mailfly_client::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mailfly_client::Error> {
//!     let mut client = Client::new()?;
//!     let address = client.create_inbox(None, None).await?;
//!     println!("Inbox: {}", address);
//!
//!     // ... trigger the verification email to `address` ...
//!
//!     let code = client.wait_for_code().await?;
//!     println!("Code: {}", code);
//!
//!     client.delete_inbox().await;
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod extract;
mod models;

pub use client::{Client, ClientBuilder, generate_prefix};
pub use error::Error;
pub use extract::extract_code;
pub use models::{MailboxIdentity, Message};

/// Result type alias for MailFly operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
