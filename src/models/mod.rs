use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod feedback;
pub mod listing;
pub mod recommendation;
pub mod user_profile;

pub use feedback::{FeedbackMap, FeedbackSubmission, Rating};
pub use listing::Listing;
pub use recommendation::{RankingPolicy, RecommendationList, ScoredListing};
pub use user_profile::UserProfile;

/// Number of features used for normalization, similarity and prediction
pub const FEATURE_COUNT: usize = 4;

/// Fixed-order vector of {price, bedrooms, garage, pool}
pub type FeatureVector = [f64; FEATURE_COUNT];

/// Identifier for a catalog listing
///
/// Serialized as a bare integer; as a JSON object key it becomes a string
/// (e.g., `{"3": 5.0}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(pub u64);

impl Display for ListingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_listing_id_display() {
        assert_eq!(format!("{}", ListingId(42)), "42");
    }

    #[test]
    fn test_listing_id_as_map_key() {
        let mut map = BTreeMap::new();
        map.insert(ListingId(1), 4.0);
        map.insert(ListingId(3), 5.0);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"1":4.0,"3":5.0}"#);

        let parsed: BTreeMap<ListingId, f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, map);
    }
}
