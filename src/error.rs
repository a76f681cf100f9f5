//! Centralized error types for faxfetch.
//!
//! Session-fatal failures ([`FaxError::Connect`], [`FaxError::Search`],
//! [`FaxError::Fetch`]) abort the run; everything else is contained at
//! message or attachment scope by the callers.

use thiserror::Error;

/// All errors produced by the faxfetch library.
///
/// Store-side failures have their own taxonomy ([`crate::store::StoreError`])
/// and are contained inside the per-message processor; they never propagate
/// through this enum.
#[derive(Error, Debug)]
pub enum FaxError {
    /// Connecting, authenticating, or selecting the inbox failed.
    #[error("mailbox connect failed: {0}")]
    Connect(String),

    /// The search for unread messages failed after a successful connect.
    #[error("unseen search failed: {0}")]
    Search(String),

    /// Fetching message bodies failed.
    #[error("message fetch failed: {0}")]
    Fetch(String),

    /// A single message could not be parsed as MIME.
    #[error("message parse failed: {0}")]
    Parse(String),

    /// Flagging a message as read failed. Logged by the session, never
    /// escalated — the saved attachments stay saved.
    #[error("flagging message {uid} as read failed: {reason}")]
    Flag { uid: u32, reason: String },
}

/// Convenience alias for `Result<T, FaxError>`.
pub type Result<T> = std::result::Result<T, FaxError>;
