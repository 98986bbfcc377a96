use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ListingId;
use crate::error::{AppError, AppResult};

/// Persisted feedback, keyed by listing
pub type FeedbackMap = BTreeMap<ListingId, Rating>;

/// A user rating on the 0-5 scale
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Rating(f64);

impl Rating {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 5.0;

    /// Validates a raw rating; NaN and out-of-scale values are rejected
    pub fn new(value: f64) -> AppResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(AppError::InvalidRating {
                rating: value,
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Rating {
    type Error = AppError;

    fn try_from(value: f64) -> AppResult<Self> {
        Self::new(value)
    }
}

impl From<Rating> for f64 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// Feedback event forwarded by the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackSubmission {
    pub listing_id: ListingId,
    pub rating: f64,
}
