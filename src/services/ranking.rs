use std::cmp::Ordering;

use crate::models::{RankingPolicy, RecommendationList, ScoredListing};

/// Orders scored listings under the given policy
///
/// The sort is stable, so equal scores keep the incoming (catalog) order.
/// Under `Predictive`, a listing without a predictive score sorts last.
pub fn rank(mut listings: Vec<ScoredListing>, policy: RankingPolicy) -> RecommendationList {
    match policy {
        RankingPolicy::Predictive => listings.sort_by(|a, b| {
            descending(
                a.predictive_score.unwrap_or(f64::NEG_INFINITY),
                b.predictive_score.unwrap_or(f64::NEG_INFINITY),
            )
        }),
        RankingPolicy::SimilarityOnly => {
            listings.sort_by(|a, b| descending(a.similarity_score, b.similarity_score))
        }
    }

    RecommendationList { policy, listings }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Listing, ListingId};

    fn scored(id: u64, similarity: f64, predictive: Option<f64>) -> ScoredListing {
        ScoredListing {
            listing: Listing {
                id: ListingId(id),
                location: "Lisboa".to_string(),
                price: 100_000.0,
                bedrooms: 2,
                garage: false,
                pool: false,
            },
            normalized: [0.0; 4],
            similarity_score: similarity,
            predictive_score: predictive,
        }
    }

    fn ids(list: &RecommendationList) -> Vec<u64> {
        list.listings.iter().map(|s| s.listing.id.0).collect()
    }

    #[test]
    fn test_predictive_descending() {
        let list = rank(
            vec![
                scored(1, 0.9, Some(3.0)),
                scored(2, 0.1, Some(4.5)),
                scored(3, 0.5, Some(4.0)),
            ],
            RankingPolicy::Predictive,
        );
        assert_eq!(ids(&list), vec![2, 3, 1]);
        assert_eq!(list.policy, RankingPolicy::Predictive);

        for pair in list.listings.windows(2) {
            assert!(pair[0].predictive_score >= pair[1].predictive_score);
        }
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let list = rank(
            vec![
                scored(5, 0.2, Some(4.0)),
                scored(1, 0.9, Some(4.0)),
                scored(3, 0.5, Some(4.5)),
                scored(2, 0.7, Some(4.0)),
            ],
            RankingPolicy::Predictive,
        );
        assert_eq!(ids(&list), vec![3, 5, 1, 2]);
    }

    #[test]
    fn test_similarity_ignored_under_predictive_policy() {
        let list = rank(
            vec![scored(1, 1.0, Some(1.0)), scored(2, 0.0, Some(2.0))],
            RankingPolicy::Predictive,
        );
        assert_eq!(ids(&list), vec![2, 1]);
    }

    #[test]
    fn test_similarity_only() {
        let list = rank(
            vec![
                scored(1, 0.3, None),
                scored(2, 0.8, None),
                scored(3, 0.3, None),
            ],
            RankingPolicy::SimilarityOnly,
        );
        assert_eq!(ids(&list), vec![2, 1, 3]);
    }

    #[test]
    fn test_empty_is_valid() {
        let list = rank(Vec::new(), RankingPolicy::Predictive);
        assert!(list.is_empty());
    }
}
