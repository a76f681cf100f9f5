//! Share access through a locally mounted path (e.g. a CIFS mount).

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{ShareClient, ShareConnector, StoreError};

/// Connector for a share mounted into the local filesystem.
#[derive(Debug, Clone)]
pub struct MountedShare {
    root: PathBuf,
}

impl MountedShare {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ShareConnector for MountedShare {
    type Client = MountedShareClient;

    fn connect(&self) -> Result<MountedShareClient, StoreError> {
        // An unmounted share shows up as a missing root directory.
        if !self.root.is_dir() {
            return Err(StoreError::Unavailable(format!(
                "mount point '{}' is not a directory",
                self.root.display()
            )));
        }
        Ok(MountedShareClient {
            root: self.root.clone(),
        })
    }
}

/// One "connection" to the mounted share.
#[derive(Debug)]
pub struct MountedShareClient {
    root: PathBuf,
}

impl ShareClient for MountedShareClient {
    fn write_exclusive(&mut self, path: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let full = join_share_path(&self.root, path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: path.to_string(),
                source,
            })?;
        }

        // create_new gives O_EXCL semantics: an occupied name fails the
        // create itself, so there is no exists-then-write race window.
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&full) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(StoreError::Collision(path.to_string()));
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.to_string(),
                    source,
                });
            }
        };

        let written = file.write_all(bytes).and_then(|()| file.sync_all());
        if let Err(source) = written {
            // Don't leave a half-written object claiming the name.
            drop(file);
            let _ = std::fs::remove_file(&full);
            return Err(StoreError::Io {
                path: path.to_string(),
                source,
            });
        }
        Ok(())
    }

    fn disconnect(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Map a `/`-separated share path onto the mount point.
fn join_share_path(root: &Path, path: &str) -> PathBuf {
    let mut full = root.to_path_buf();
    for part in path.split('/').filter(|p| !p.is_empty()) {
        full.push(part);
    }
    full
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_object_with_exact_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let mut client = MountedShare::new(dir.path()).connect().unwrap();

        client
            .write_exclusive("fax/Fax - 2024-03-05 14-22-01.pdf", b"%PDF-1.4...")
            .unwrap();

        let on_disk =
            std::fs::read(dir.path().join("fax").join("Fax - 2024-03-05 14-22-01.pdf")).unwrap();
        assert_eq!(on_disk, b"%PDF-1.4...");
    }

    #[test]
    fn test_occupied_path_is_a_collision_and_is_never_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let mut client = MountedShare::new(dir.path()).connect().unwrap();

        client.write_exclusive("fax/a.pdf", b"original").unwrap();
        let err = client.write_exclusive("fax/a.pdf", b"intruder").unwrap_err();
        assert!(matches!(err, StoreError::Collision(_)));

        let on_disk = std::fs::read(dir.path().join("fax").join("a.pdf")).unwrap();
        assert_eq!(on_disk, b"original");
    }

    #[test]
    fn test_missing_mount_is_unavailable() {
        let share = MountedShare::new("/nonexistent/faxshare");
        let err = share.connect().unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[test]
    fn test_directory_is_created_on_first_write() {
        let dir = tempfile::tempdir().unwrap();
        let mut client = MountedShare::new(dir.path()).connect().unwrap();

        client.write_exclusive("fax/first.pdf", b"x").unwrap();
        assert!(dir.path().join("fax").is_dir());
    }
}
