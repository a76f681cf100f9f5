//! Mailbox access: the capability trait the session consumes, and its IMAP
//! implementation.

use std::net::TcpStream;

use native_tls::TlsStream;
use tracing::{info, warn};

use crate::config::MailboxConfig;
use crate::error::{FaxError, Result};

/// A message as fetched from the mailbox, before MIME parsing.
#[derive(Debug, Clone)]
pub struct RawMessage {
    /// UID within the selected mailbox. Absent if the server omitted it;
    /// such messages are processed but never flagged.
    pub uid: Option<u32>,

    /// Full raw RFC 822 body.
    pub body: Vec<u8>,
}

/// The mailbox operations the session needs.
pub trait MailboxClient {
    /// UIDs of messages without the `\Seen` flag, in ascending order.
    fn search_unseen(&mut self) -> Result<Vec<u32>>;

    /// Fetch full bodies for `uids` without setting `\Seen`.
    fn fetch(&mut self, uids: &[u32]) -> Result<Vec<RawMessage>>;

    /// Set `\Seen` on one message.
    fn mark_seen(&mut self, uid: u32) -> Result<()>;

    /// Close the connection. Best effort; failures are logged, not returned.
    fn logout(&mut self);
}

/// [`MailboxClient`] over an IMAP session secured with TLS.
pub struct ImapMailbox {
    session: imap::Session<TlsStream<TcpStream>>,
}

impl ImapMailbox {
    /// Connect, authenticate, and select the configured mailbox.
    ///
    /// The mailbox is selected read-write because flagging needs STORE, but
    /// all fetches use `BODY.PEEK[]`, so reading a message never marks it
    /// seen — only a successful save does, via [`MailboxClient::mark_seen`].
    pub fn connect(config: &MailboxConfig) -> Result<Self> {
        let tls = native_tls::TlsConnector::builder()
            .build()
            .map_err(|e| FaxError::Connect(format!("TLS setup failed: {e}")))?;

        info!(host = %config.host, port = config.port, "connecting to mailbox");
        let client = imap::connect((config.host.as_str(), config.port), &config.host, &tls)
            .map_err(|e| FaxError::Connect(format!("{}:{}: {e}", config.host, config.port)))?;

        let mut session = client.login(&config.username, &config.password).map_err(
            |(e, _)| FaxError::Connect(format!("login as '{}' failed: {e}", config.username)),
        )?;

        session
            .select(&config.mailbox)
            .map_err(|e| FaxError::Connect(format!("select '{}' failed: {e}", config.mailbox)))?;

        info!(mailbox = %config.mailbox, "mailbox selected");
        Ok(Self { session })
    }
}

impl MailboxClient for ImapMailbox {
    fn search_unseen(&mut self) -> Result<Vec<u32>> {
        let uids = self
            .session
            .uid_search("UNSEEN")
            .map_err(|e| FaxError::Search(e.to_string()))?;

        let mut uids: Vec<u32> = uids.into_iter().collect();
        uids.sort_unstable();
        Ok(uids)
    }

    fn fetch(&mut self, uids: &[u32]) -> Result<Vec<RawMessage>> {
        let uid_set = uids
            .iter()
            .map(|u| u.to_string())
            .collect::<Vec<_>>()
            .join(",");

        // BODY.PEEK[] — never let the fetch itself set \Seen.
        let fetches = self
            .session
            .uid_fetch(&uid_set, "(UID BODY.PEEK[])")
            .map_err(|e| FaxError::Fetch(e.to_string()))?;

        let mut messages = Vec::new();
        for fetch in fetches.iter() {
            if let Some(body) = fetch.body() {
                messages.push(RawMessage {
                    uid: fetch.uid,
                    body: body.to_vec(),
                });
            } else {
                warn!(uid = ?fetch.uid, "fetch returned no body, skipping");
            }
        }
        Ok(messages)
    }

    fn mark_seen(&mut self, uid: u32) -> Result<()> {
        self.session
            .uid_store(uid.to_string(), "+FLAGS (\\Seen)")
            .map_err(|e| FaxError::Flag {
                uid,
                reason: e.to_string(),
            })?;
        Ok(())
    }

    fn logout(&mut self) {
        if let Err(e) = self.session.logout() {
            warn!(error = %e, "logout failed");
        }
    }
}
