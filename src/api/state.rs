use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{FeedbackMap, ListingId, Rating},
    services::{Catalog, FeedbackStore, ForestParams, LogNotifier, Notifier},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<AppStateInner>,
}

/// Per-process collaborators of the recommendation pipeline
///
/// The catalog is read-only. Feedback writes are serialized by the write lock
/// and run on the blocking pool; recommendation requests snapshot the mapping
/// under the read lock.
pub struct AppStateInner {
    pub catalog: Arc<Catalog>,
    pub feedback: Arc<RwLock<FeedbackStore>>,
    pub notifier: Arc<dyn Notifier>,
    pub forest_params: ForestParams,
    pub training_timeout: Duration,
    pub notification_recipient: String,
}

impl AppState {
    /// Creates state with default model parameters and a logging notifier
    pub fn new(catalog: Catalog, feedback: FeedbackStore) -> Self {
        Self::with_notifier(catalog, feedback, Arc::new(LogNotifier))
    }

    pub fn with_notifier(
        catalog: Catalog,
        feedback: FeedbackStore,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                catalog: Arc::new(catalog),
                feedback: Arc::new(RwLock::new(feedback)),
                notifier,
                forest_params: ForestParams::default(),
                training_timeout: Duration::from_millis(5_000),
                notification_recipient: "user@email.com".to_string(),
            }),
        }
    }

    /// Builds state from loaded configuration
    pub fn from_config(
        config: &Config,
        catalog: Catalog,
        feedback: FeedbackStore,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                catalog: Arc::new(catalog),
                feedback: Arc::new(RwLock::new(feedback)),
                notifier,
                forest_params: config.forest_params(),
                training_timeout: Duration::from_millis(config.training_timeout_ms),
                notification_recipient: config.notification_recipient.clone(),
            }),
        }
    }
}

impl AppState {
    /// Point-in-time copy of recorded feedback
    pub fn feedback_snapshot(&self) -> AppResult<FeedbackMap> {
        let store = self.inner.feedback.read().map_err(|_| lock_poisoned())?;
        Ok(store.snapshot())
    }

    /// Records a rating on the blocking pool, holding the write lock for the
    /// duration of the file replace
    pub async fn record_feedback(&self, listing_id: ListingId, rating: f64) -> AppResult<Rating> {
        let feedback = self.inner.feedback.clone();
        tokio::task::spawn_blocking(move || {
            let mut store = feedback.write().map_err(|_| lock_poisoned())?;
            store.record(listing_id, rating)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}

fn lock_poisoned() -> AppError {
    AppError::Internal("Feedback store lock poisoned".to_string())
}
