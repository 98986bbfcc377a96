use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::{
    error::{AppError, AppResult},
    models::{FeedbackMap, ListingId, Rating},
};

/// JSON-file backed store of user ratings
///
/// Holds the full mapping in memory and rewrites the whole document after
/// every successful `record`. Writes go to a temporary file in the target's
/// directory which is then renamed over the target, so a crash mid-write
/// leaves the previously committed document intact.
#[derive(Debug)]
pub struct FeedbackStore {
    path: PathBuf,
    entries: FeedbackMap,
}

impl FeedbackStore {
    /// Opens the store at `path`, loading any persisted feedback
    pub fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let entries = Self::read_from(&path)?;

        tracing::info!(
            path = %path.display(),
            entries = entries.len(),
            "Feedback store loaded"
        );

        Ok(Self { path, entries })
    }

    /// Re-reads persisted state; an absent file is an empty mapping
    pub fn load(&self) -> AppResult<FeedbackMap> {
        Self::read_from(&self.path)
    }

    fn read_from(path: &Path) -> AppResult<FeedbackMap> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No persisted feedback, starting empty");
                Ok(FeedbackMap::new())
            }
            Err(source) => Err(AppError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Validates and stores a rating, overwriting any previous one for the listing
    ///
    /// Nothing is written when the rating is invalid. If persisting fails the
    /// in-memory entry is restored so the event counts as not recorded.
    pub fn record(&mut self, listing_id: ListingId, rating: f64) -> AppResult<Rating> {
        let rating = Rating::new(rating)?;
        let previous = self.entries.insert(listing_id, rating);

        if let Err(e) = self.persist() {
            tracing::error!(
                error = %e,
                listing_id = %listing_id,
                path = %self.path.display(),
                "Failed to persist feedback"
            );
            match previous {
                Some(old) => self.entries.insert(listing_id, old),
                None => self.entries.remove(&listing_id),
            };
            return Err(e);
        }

        tracing::info!(
            listing_id = %listing_id,
            rating = rating.value(),
            "Feedback recorded"
        );

        Ok(rating)
    }

    fn persist(&self) -> AppResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let document = serde_json::to_vec(&self.entries)?;

        let write = || -> std::io::Result<()> {
            let mut file = NamedTempFile::new_in(dir)?;
            file.write_all(&document)?;
            file.as_file().sync_all()?;
            file.persist(&self.path).map_err(|e| e.error)?;
            Ok(())
        };

        write().map_err(AppError::Persistence)
    }

    /// Point-in-time copy of the mapping for one recommendation request
    pub fn snapshot(&self) -> FeedbackMap {
        self.entries.clone()
    }

    pub fn get(&self, listing_id: ListingId) -> Option<Rating> {
        self.entries.get(&listing_id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
