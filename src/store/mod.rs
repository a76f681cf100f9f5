//! Remote share access: capability traits, the store error taxonomy, and
//! the collision-safe save operation.
//!
//! The session and pipeline only ever see the [`ShareConnector`] /
//! [`ShareClient`] traits; [`mounted::MountedShare`] is the shipped
//! implementation for a share mounted into the local filesystem.

pub mod mounted;
pub mod save;

pub use mounted::MountedShare;
pub use save::save_pdf;

use thiserror::Error;

/// Errors produced while persisting to the share.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The target path already exists. This is the retry signal for the
    /// save loop, which answers it with the next suffixed candidate; it
    /// never surfaces from a completed save operation.
    #[error("'{0}' already exists on the share")]
    Collision(String),

    /// Every suffixed candidate up to the cap was occupied.
    #[error("no free name for '{base}' after {attempts} suffix attempts")]
    CollisionLimit { base: String, attempts: u32 },

    /// The share itself is missing or unreachable.
    #[error("share unavailable: {0}")]
    Unavailable(String),

    /// Any other write failure.
    #[error("write to '{path}' failed: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// One connection to the share, scoped to a single save operation.
pub trait ShareClient {
    /// Create a new object at `path` containing exactly `bytes`.
    ///
    /// `path` is `/`-separated and relative to the share root. Must fail
    /// with [`StoreError::Collision`] if `path` is already occupied —
    /// never overwrite. Existence is detected by the create itself, not by
    /// a prior check, so concurrent writers cannot race past it.
    fn write_exclusive(&mut self, path: &str, bytes: &[u8]) -> Result<(), StoreError>;

    /// Release the connection.
    fn disconnect(&mut self) -> std::io::Result<()>;
}

/// Factory for per-save share connections.
pub trait ShareConnector {
    type Client: ShareClient;

    /// Open a fresh connection for one save operation.
    fn connect(&self) -> Result<Self::Client, StoreError>;
}
