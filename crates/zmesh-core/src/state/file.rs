// # State File I/O
//
// Reads and writes the registry snapshot as a JSON file. Writes go to a
// temporary file first and are renamed over the target, so a crash
// mid-write never leaves a truncated state file behind.
//
// There is no backup or corruption fallback: an unreadable or
// undecodable state file is a fatal error and the caller decides what to
// do with it.

use crate::error::{Error, Result};
use crate::state::snapshot::NetworkSnapshot;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Load a snapshot from `path`.
///
/// # Returns
///
/// - `Ok(Some(snapshot))`: the file existed and decoded cleanly
/// - `Ok(None)`: the file does not exist
/// - `Err(Error)`: read or decode failure
pub async fn load(path: &Path) -> Result<Option<NetworkSnapshot>> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("no network state at {}", path.display());
            return Ok(None);
        }
        Err(source) => {
            return Err(Error::ReadState {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let snapshot = NetworkSnapshot::decode(&bytes).map_err(|source| Error::DecodeState {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        devices = snapshot.devices.len(),
        groups = snapshot.groups.len(),
        "decoded network state from {}",
        path.display()
    );
    Ok(Some(snapshot))
}

/// Write `snapshot` to `path`, replacing any prior content.
///
/// The file ends up with mode 0644 on unix.
pub async fn save(path: &Path, snapshot: &NetworkSnapshot) -> Result<()> {
    let bytes = snapshot.encode()?;

    let temp = temp_path(path);
    {
        let mut file = fs::File::create(&temp).await.map_err(|source| Error::WriteState {
            path: temp.clone(),
            source,
        })?;

        file.write_all(&bytes).await.map_err(|source| Error::WriteState {
            path: temp.clone(),
            source,
        })?;

        file.flush().await.map_err(|source| Error::WriteState {
            path: temp.clone(),
            source,
        })?;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&temp, std::fs::Permissions::from_mode(0o644))
            .await
            .map_err(|source| Error::WriteState {
                path: temp.clone(),
                source,
            })?;
    }

    // Atomic rename (temp -> actual)
    fs::rename(&temp, path).await.map_err(|source| Error::WriteState {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::trace!("network state written to {}", path.display());
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut temp = path.to_path_buf();
    temp.set_extension("tmp");
    temp
}
