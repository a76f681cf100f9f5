//! Collision-safe persistence: write a buffer under its desired name,
//! probing `_1`, `_2`, … suffixes until the share accepts an exclusive
//! create.

use tracing::{debug, warn};

use super::{ShareClient, ShareConnector, StoreError};

/// Upper bound on suffix probing. Past this the store state is pathological
/// and the attachment is abandoned with a distinct error.
const MAX_SUFFIX: u32 = 9999;

/// Save `bytes` under `dir/file_name`, opening a fresh share connection
/// scoped to this one save.
///
/// The connection is released whatever the outcome; a release failure is
/// logged and never masks the write result. Returns the share path
/// actually written.
pub fn save_pdf<S: ShareConnector>(
    share: &S,
    dir: &str,
    file_name: &str,
    bytes: &[u8],
) -> Result<String, StoreError> {
    let mut client = share.connect()?;
    let outcome = write_with_unique_name(&mut client, dir, file_name, bytes);
    if let Err(e) = client.disconnect() {
        warn!(error = %e, "share disconnect failed");
    }
    outcome
}

/// The collision-retry loop: attempt the desired path, then suffixed
/// variants, retrying only on the distinguished collision error.
///
/// Other writers (including concurrent runs of this tool) may be filling
/// names at the same time, so every candidate goes through the exclusive
/// create — there is no existence pre-check to race against.
pub fn write_with_unique_name<C: ShareClient>(
    client: &mut C,
    dir: &str,
    file_name: &str,
    bytes: &[u8],
) -> Result<String, StoreError> {
    let (stem, ext) = split_name(file_name);

    for counter in 0..=MAX_SUFFIX {
        let candidate = if counter == 0 {
            format!("{dir}/{file_name}")
        } else {
            format!("{dir}/{stem}_{counter}{ext}")
        };

        match client.write_exclusive(&candidate, bytes) {
            Ok(()) => return Ok(candidate),
            Err(StoreError::Collision(_)) => {
                debug!(path = %candidate, "name taken, trying next suffix");
            }
            Err(e) => return Err(e),
        }
    }

    Err(StoreError::CollisionLimit {
        base: format!("{dir}/{file_name}"),
        attempts: MAX_SUFFIX,
    })
}

/// Split `"name.pdf"` into `("name", ".pdf")`. A name without a dot (or
/// with only a leading dot) keeps an empty extension.
fn split_name(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => file_name.split_at(idx),
        _ => (file_name, ""),
    }
}
