//! Parsed message model: the fields of a mailbox message this tool consumes.

pub mod attachment;
pub mod message;

pub use attachment::Attachment;
pub use message::FaxMessage;
