//! Error types for MailFly operations.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by the MailFly client.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure: connection, TLS, or response body decoding.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provisioning endpoint answered with a non-success status.
    ///
    /// `body` is read best-effort and may be empty if the response body
    /// could not be retrieved.
    #[error("inbox provisioning failed: {status} {body}")]
    Provision {
        /// HTTP status returned by `/admin/new_address`.
        status: StatusCode,
        /// Response body, best-effort.
        body: String,
    },

    /// An inbox operation was attempted before [`create_inbox`] succeeded.
    ///
    /// This is a precondition violation on the caller's side, not a
    /// retryable runtime condition.
    ///
    /// [`create_inbox`]: crate::Client::create_inbox
    #[error("no inbox provisioned; call create_inbox first")]
    NotProvisioned,

    /// The message-list endpoint answered with a non-success status.
    #[error("message list request failed with status {0}")]
    FetchFailed(StatusCode),

    /// [`wait_for_code`] reached its deadline without finding a code.
    ///
    /// [`wait_for_code`]: crate::Client::wait_for_code
    #[error("timed out waiting for verification code after {}s", .0.as_secs())]
    Timeout(Duration),
}
