//! `faxfetch` — poll an IMAP mailbox for unread faxes and archive their PDF
//! attachments to a file share.
//!
//! The library half holds the pipeline: MIME parsing ([`model`]), filename
//! derivation ([`naming`]), collision-safe persistence ([`store`]), the
//! per-message processor ([`pipeline`]) and the session driver ([`session`]).
//! The binary wires it to an IMAP server and a mounted share.

pub mod config;
pub mod error;
pub mod mailbox;
pub mod model;
pub mod naming;
pub mod pipeline;
pub mod session;
pub mod store;
