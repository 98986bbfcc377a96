use crate::{
    error::{AppError, AppResult},
    models::{FeatureVector, FeedbackMap, Listing},
    services::{
        catalog::Catalog,
        forest::{ForestParams, RandomForest},
    },
};

/// Regression model estimating a user's rating from raw listing features
#[derive(Debug, Clone)]
pub struct PredictiveScorer {
    forest: RandomForest,
    training_size: usize,
}

impl PredictiveScorer {
    /// Trains on every catalog listing that has feedback
    ///
    /// Listings without a rating are left out rather than imputed, and ratings
    /// for ids missing from the catalog are ignored. An empty training set is
    /// reported as `InsufficientTrainingData`.
    pub fn train(
        catalog: &Catalog,
        feedback: &FeedbackMap,
        params: &ForestParams,
    ) -> AppResult<Self> {
        let (x, y): (Vec<FeatureVector>, Vec<f64>) = catalog
            .listings()
            .iter()
            .filter_map(|listing| {
                feedback
                    .get(&listing.id)
                    .map(|rating| (listing.features(), rating.value()))
            })
            .unzip();

        if x.is_empty() {
            tracing::warn!(
                catalog_size = catalog.len(),
                feedback_entries = feedback.len(),
                "No catalog listing has feedback, cannot train"
            );
            return Err(AppError::InsufficientTrainingData);
        }

        let forest = RandomForest::fit(&x, &y, params).ok_or_else(|| {
            AppError::InvalidInput("Random forest needs at least one estimator".to_string())
        })?;

        tracing::debug!(
            training_size = x.len(),
            n_estimators = params.n_estimators,
            seed = params.random_seed,
            "Predictive model trained"
        );

        Ok(Self {
            forest,
            training_size: x.len(),
        })
    }

    /// Predicts from raw, non-normalized features
    pub fn predict(&self, listing: &Listing) -> f64 {
        self.forest.predict(&listing.features())
    }

    pub fn predict_all(&self, listings: &[Listing]) -> Vec<f64> {
        listings.iter().map(|listing| self.predict(listing)).collect()
    }

    pub fn training_size(&self) -> usize {
        self.training_size
    }
}
