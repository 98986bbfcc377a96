use serde::{Deserialize, Serialize};

use super::{FeatureVector, Listing};

/// A filtered listing annotated with its scores
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoredListing {
    pub listing: Listing,
    /// Min-max normalized features, fitted over the filtered set
    pub normalized: FeatureVector,
    /// Cosine similarity to the user's normalized query vector
    pub similarity_score: f64,
    /// Estimated rating; absent when ranked without a trained model
    pub predictive_score: Option<f64>,
}

/// Which score ordered a recommendation list
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RankingPolicy {
    /// Predictive score descending
    Predictive,
    /// Similarity score descending, used when there is no feedback to train on
    SimilarityOnly,
}

/// Ordered recommendations for one request
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecommendationList {
    pub policy: RankingPolicy,
    pub listings: Vec<ScoredListing>,
}

impl RecommendationList {
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }
}
