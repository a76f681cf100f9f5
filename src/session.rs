//! One poll cycle: search unseen messages, fetch, process, flag, and always
//! log out.
//!
//! Messages are processed sequentially inside the loop, so session
//! completion strictly follows completion of every per-message save —
//! nothing is left in flight when the summary is returned.

use serde::Serialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::mailbox::MailboxClient;
use crate::model::FaxMessage;
use crate::naming;
use crate::pipeline;
use crate::store::ShareConnector;

/// Counters for one completed run.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct SessionSummary {
    /// Unread messages matched by the search.
    pub unseen: usize,
    /// Messages skipped because they failed MIME parsing.
    pub parse_failures: usize,
    /// Attachments written to the share (on a dry run: would be written).
    pub saved: usize,
    /// Attachments abandoned after a store error.
    pub failed: usize,
    /// Messages flagged `\Seen`.
    pub flagged: usize,
}

/// Run one poll cycle over an already-connected mailbox.
///
/// The connection is closed before returning, on success and on failure.
/// Connect, search, and fetch errors are fatal; per-message parse and flag
/// errors are contained and logged.
pub fn run<M, S>(mut mailbox: M, share: &S, dir: &str) -> Result<SessionSummary>
where
    M: MailboxClient,
    S: ShareConnector,
{
    let outcome = poll(&mut mailbox, share, dir);
    mailbox.logout();
    outcome
}

/// Inspect without writing or flagging: parse each unread message and log
/// the names a real run would save.
pub fn dry_run<M: MailboxClient>(mut mailbox: M) -> Result<SessionSummary> {
    let outcome = preview(&mut mailbox);
    mailbox.logout();
    outcome
}

fn poll<M, S>(mailbox: &mut M, share: &S, dir: &str) -> Result<SessionSummary>
where
    M: MailboxClient,
    S: ShareConnector,
{
    let mut summary = SessionSummary::default();

    let uids = mailbox.search_unseen()?;
    summary.unseen = uids.len();
    if uids.is_empty() {
        info!("no new messages");
        return Ok(summary);
    }
    info!(count = uids.len(), "found unread messages");

    let messages = mailbox.fetch(&uids)?;

    for raw in &messages {
        let parsed = match FaxMessage::parse(&raw.body) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(uid = ?raw.uid, error = %e, "skipping unparseable message");
                summary.parse_failures += 1;
                continue;
            }
        };

        let outcome = pipeline::process_message(&parsed, share, dir);
        summary.saved += outcome.saved;
        summary.failed += outcome.failed;

        // Flag only when content is durably on the share and the server
        // gave us a UID to flag.
        if outcome.persisted() {
            match raw.uid {
                Some(uid) => match mailbox.mark_seen(uid) {
                    Ok(()) => {
                        info!(uid, "marked as read");
                        summary.flagged += 1;
                    }
                    Err(e) => warn!(uid, error = %e, "failed to mark message as read"),
                },
                None => warn!("message saved but has no UID, leaving unread"),
            }
        }
    }

    Ok(summary)
}

fn preview<M: MailboxClient>(mailbox: &mut M) -> Result<SessionSummary> {
    let mut summary = SessionSummary::default();

    let uids = mailbox.search_unseen()?;
    summary.unseen = uids.len();
    if uids.is_empty() {
        info!("no new messages");
        return Ok(summary);
    }

    let messages = mailbox.fetch(&uids)?;
    for raw in &messages {
        match FaxMessage::parse(&raw.body) {
            Ok(parsed) => {
                for attachment in parsed.pdf_attachments() {
                    let file_name = naming::candidate_filename(parsed.date);
                    info!(
                        uid = ?raw.uid,
                        file_name = %file_name,
                        bytes = attachment.content.len(),
                        "would save"
                    );
                    summary.saved += 1;
                }
            }
            Err(e) => {
                warn!(uid = ?raw.uid, error = %e, "skipping unparseable message");
                summary.parse_failures += 1;
            }
        }
    }

    Ok(summary)
}
