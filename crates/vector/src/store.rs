use funcsearch_common::{FuncSearchError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

use crate::collection::VectorCollection;
use crate::types::HasEmbedding;

/// Collection read from disk, with the payload checksum
#[derive(Debug)]
pub struct LoadedCollection<T> {
    pub collection: VectorCollection<T>,

    /// Hex SHA-256 of the raw payload
    pub checksum: String,

    /// Payload size in bytes
    pub size_bytes: usize,
}

/// Hex SHA-256 of a payload
pub fn checksum(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Read a persisted collection
pub async fn load_collection<T>(path: &Path, dimension: usize) -> Result<LoadedCollection<T>>
where
    T: HasEmbedding + DeserializeOwned,
{
    let start = Instant::now();

    let bytes = tokio::fs::read(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            FuncSearchError::not_found(format!("Collection file {}", path.display()))
        } else {
            FuncSearchError::Io(e)
        }
    })?;

    let collection = VectorCollection::<T>::load_from_bytes(&bytes, dimension)?;
    let checksum = checksum(&bytes);

    let missing = collection.missing_vector_count();
    if missing > 0 {
        warn!("{} of {} records in {} have no embedding", missing, collection.len(), path.display());
    }

    info!(
        "Loaded {} records from {} in {:.3} ms (sha256={})",
        collection.len(),
        path.display(),
        start.elapsed().as_secs_f64() * 1000.0,
        &checksum[..12]
    );

    Ok(LoadedCollection {
        collection,
        checksum,
        size_bytes: bytes.len(),
    })
}

/// Write a collection, replacing `path` atomically.
///
/// Each call writes its own temp file next to `path` and renames it into place,
/// so concurrent saves never share an intermediate file.
pub async fn save_collection<T>(collection: &VectorCollection<T>, path: &Path) -> Result<String>
where
    T: HasEmbedding + Serialize,
{
    let bytes = collection.save_to_bytes()?;
    let checksum = checksum(&bytes);

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    tokio::fs::create_dir_all(&dir).await?;

    let target = path.to_path_buf();
    tokio::task::spawn_blocking(move || -> Result<()> {
        let mut temp = tempfile::NamedTempFile::new_in(&dir)?;
        temp.write_all(&bytes)?;
        temp.as_file().sync_all()?;
        temp.persist(&target).map_err(|e| FuncSearchError::Io(e.error))?;
        Ok(())
    })
    .await
    .map_err(|e| FuncSearchError::internal(format!("Save task failed: {}", e)))??;

    info!("Saved {} records to {} (sha256={})", collection.len(), path.display(), &checksum[..12]);
    Ok(checksum)
}
