//! Per-message processing: select PDF attachments, derive names, save.

use tracing::{error, info};

use crate::model::FaxMessage;
use crate::naming;
use crate::store::{save_pdf, ShareConnector};

/// What happened to one message's attachments.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MessageOutcome {
    /// Attachments durably written to the share.
    pub saved: usize,
    /// Attachments abandoned after a store error.
    pub failed: usize,
}

impl MessageOutcome {
    /// A message counts as handled once at least one attachment made it to
    /// the share; only then may it be flagged as read.
    pub fn persisted(&self) -> bool {
        self.saved > 0
    }
}

/// Save every PDF attachment of `message` under `dir` on the share.
///
/// Attachments are persisted independently: one failure is logged and does
/// not block siblings. Non-PDF attachments are ignored.
pub fn process_message<S: ShareConnector>(
    message: &FaxMessage,
    share: &S,
    dir: &str,
) -> MessageOutcome {
    let mut outcome = MessageOutcome::default();

    for attachment in message.pdf_attachments() {
        let file_name = naming::candidate_filename(message.date);
        match save_pdf(share, dir, &file_name, &attachment.content) {
            Ok(path) => {
                info!(path = %path, bytes = attachment.content.len(), "saved");
                outcome.saved += 1;
            }
            Err(e) => {
                error!(file_name = %file_name, error = %e, "failed to save attachment");
                outcome.failed += 1;
            }
        }
    }

    outcome
}
