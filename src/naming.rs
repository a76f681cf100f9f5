//! Filename derivation for saved faxes.
//!
//! The name is derived purely from the message's send date. Messages sent
//! within the same second collide by construction; disambiguation happens
//! at save time, not here.

use chrono::{DateTime, Utc};

/// Render the candidate filename for a fax sent at `date`.
///
/// The format is the UTC send time with `:` replaced by `-` so the name is
/// valid on SMB/Windows shares: `Fax - 2024-03-05 14-22-01.pdf`. A missing
/// or unparseable Date header yields a fixed sentinel name instead of an
/// error; such saves still go through and land on `_1`, `_2`, … suffixes.
pub fn candidate_filename(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(d) => format!("Fax - {}.pdf", d.format("%Y-%m-%d %H-%M-%S")),
        None => "Fax - invalid-date.pdf".to_string(),
    }
}
