//! Wire types and the canonical message model.

use serde::Deserialize;

/// Address and access token of one provisioned inbox.
///
/// Created by [`Client::create_inbox`](crate::Client::create_inbox) and held
/// by the client for the lifetime of one verification attempt. The `jwt` is
/// an opaque bearer token; it is never inspected locally.
#[derive(Debug, Clone)]
pub struct MailboxIdentity {
    /// Full email address, e.g. `k3x9q2m7ab@ynxx.buzz`.
    pub address: String,
    /// Bearer token for the mailbox API.
    pub jwt: String,
}

/// Successful `/admin/new_address` response.
#[derive(Debug, Deserialize)]
pub(crate) struct NewAddressResponse {
    pub address: String,
    pub jwt: String,
}

/// `/api/mails` response envelope. A missing `results` field means an empty
/// inbox, not an error.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct MailListResponse {
    #[serde(default)]
    pub results: Vec<RawMessage>,
}

/// One mailbox entry as the service returns it. The service is inconsistent
/// about field names, so sender and body each come from a fallback chain.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawMessage {
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    raw: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    html: Option<String>,
}

/// A received message, normalized to one sender and one body.
///
/// Sender is taken from `source` then `from`; body from `raw` then `text`
/// then `html`. In both chains the first non-empty value wins, and a message
/// with none of them yields empty strings rather than an absent message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Sender string as reported by the service; may be empty.
    pub sender: String,
    /// Message body; may be empty.
    pub body: String,
}

impl From<RawMessage> for Message {
    fn from(raw: RawMessage) -> Self {
        Message {
            sender: first_non_empty([raw.source, raw.from]),
            body: first_non_empty([raw.raw, raw.text, raw.html]),
        }
    }
}

fn first_non_empty<const N: usize>(fields: [Option<String>; N]) -> String {
    fields
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(
        source: Option<&str>,
        from: Option<&str>,
        body: [Option<&str>; 3],
    ) -> RawMessage {
        let own = |v: Option<&str>| v.map(str::to_string);
        RawMessage {
            source: own(source),
            from: own(from),
            raw: own(body[0]),
            text: own(body[1]),
            html: own(body[2]),
        }
    }

    #[test]
    fn source_wins_over_from() {
        let msg = Message::from(raw(Some("a@x.com"), Some("b@y.com"), [None; 3]));
        assert_eq!(msg.sender, "a@x.com");
    }

    #[test]
    fn empty_source_falls_back_to_from() {
        let msg = Message::from(raw(Some(""), Some("b@y.com"), [None; 3]));
        assert_eq!(msg.sender, "b@y.com");
    }

    #[test]
    fn body_fallback_order_is_raw_text_html() {
        let msg = Message::from(raw(None, None, [None, Some("plain"), Some("<p>html</p>")]));
        assert_eq!(msg.body, "plain");

        let msg = Message::from(raw(None, None, [None, None, Some("<p>html</p>")]));
        assert_eq!(msg.body, "<p>html</p>");
    }

    #[test]
    fn missing_everything_yields_empty_strings() {
        let msg = Message::from(RawMessage::default());
        assert_eq!(msg.sender, "");
        assert_eq!(msg.body, "");
    }
}
