//! Durable persistence of the most recent token record
//!
//! A single JSON file holds the last refresh-token-bearing record: no
//! history, no multi-user keying. The file is read once at startup and
//! overwritten after every grant that produced a refresh token.

use std::path::PathBuf;

use tracing::debug;

use crate::auth::token::TokenRecord;
use crate::error::{OstinatoError, Result};

/// File-backed store for the single current [`TokenRecord`].
///
/// A missing file is an empty cache, not an error. Writes go to a
/// temporary file in the same directory followed by a rename, so a crash
/// mid-write can never leave a truncated token file behind.
///
/// # Examples
///
/// ```no_run
/// use ostinato::auth::TokenStore;
///
/// # fn example() -> ostinato::Result<()> {
/// let store = TokenStore::new("/tmp/tokens.json");
/// match store.load()? {
///     Some(record) => println!("cached token expires at {}", record.expires_at),
///     None => println!("no token persisted yet"),
/// }
/// # Ok(())
/// # }
/// ```
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Creates a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Loads the persisted record.
    ///
    /// Returns `Ok(None)` when the file does not exist, so callers can
    /// distinguish "never authorized" from a genuine IO failure.
    ///
    /// # Errors
    ///
    /// Returns [`OstinatoError::Io`] on read failures other than absence,
    /// or [`OstinatoError::Serialization`] when the stored JSON is
    /// malformed.
    pub fn load(&self) -> Result<Option<TokenRecord>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(OstinatoError::Io(e).into()),
        };
        let record: TokenRecord =
            serde_json::from_str(&contents).map_err(OstinatoError::Serialization)?;
        Ok(Some(record))
    }

    /// Persists `record`, replacing any previous snapshot.
    ///
    /// The write is atomic: the record is serialized to `<path>.tmp` in
    /// the same directory (created with 0600 permissions on Unix), synced,
    /// and renamed over the destination.
    ///
    /// # Errors
    ///
    /// Returns [`OstinatoError::Io`] when the directory cannot be created
    /// or the write/rename fails.
    pub fn save(&self, record: &TokenRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(OstinatoError::Io)?;
            }
        }

        let contents = serde_json::to_string_pretty(record).map_err(OstinatoError::Serialization)?;
        let tmp_path = self.path.with_extension("tmp");

        #[cfg(unix)]
        {
            use std::io::Write;
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = std::fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&tmp_path)
                .map_err(OstinatoError::Io)?;
            file.write_all(contents.as_bytes()).map_err(OstinatoError::Io)?;
            file.sync_all().map_err(OstinatoError::Io)?;
        }

        #[cfg(not(unix))]
        {
            std::fs::write(&tmp_path, &contents).map_err(OstinatoError::Io)?;
        }

        std::fs::rename(&tmp_path, &self.path).map_err(OstinatoError::Io)?;
        debug!(path = %self.path.display(), "token record persisted");
        Ok(())
    }
}
