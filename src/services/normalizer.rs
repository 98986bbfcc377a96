//! Min-max feature scaling fitted over the filtered listing set

use crate::models::{FeatureVector, FEATURE_COUNT};

/// Per-feature min/max fitted once per request
///
/// The same fitted bounds must be applied to the listings and the user query;
/// refitting per call site makes the vectors incomparable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMaxNormalizer {
    min: FeatureVector,
    max: FeatureVector,
}

impl MinMaxNormalizer {
    /// Computes per-feature bounds; an empty set yields all-zero bounds
    pub fn fit(vectors: &[FeatureVector]) -> Self {
        let Some(first) = vectors.first() else {
            return Self {
                min: [0.0; FEATURE_COUNT],
                max: [0.0; FEATURE_COUNT],
            };
        };

        let mut min = *first;
        let mut max = *first;
        for vector in &vectors[1..] {
            for i in 0..FEATURE_COUNT {
                min[i] = min[i].min(vector[i]);
                max[i] = max[i].max(vector[i]);
            }
        }

        Self { min, max }
    }

    /// Rescales to the fitted range; degenerate features (max == min) map to 0
    ///
    /// Values outside the fitted range are not clipped.
    pub fn transform(&self, vector: &FeatureVector) -> FeatureVector {
        let mut out = [0.0; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            let span = self.max[i] - self.min[i];
            out[i] = if span == 0.0 {
                0.0
            } else {
                (vector[i] - self.min[i]) / span
            };
        }
        out
    }

    pub fn transform_all(&self, vectors: &[FeatureVector]) -> Vec<FeatureVector> {
        vectors.iter().map(|v| self.transform(v)).collect()
    }

    pub fn min(&self) -> &FeatureVector {
        &self.min
    }

    pub fn max(&self) -> &FeatureVector {
        &self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lisboa_listings() -> Vec<FeatureVector> {
        vec![[300_000.0, 3.0, 1.0, 0.0], [400_000.0, 4.0, 1.0, 1.0]]
    }

    #[test]
    fn test_fit_transform() {
        let normalizer = MinMaxNormalizer::fit(&lisboa_listings());
        assert_eq!(normalizer.min(), &[300_000.0, 3.0, 1.0, 0.0]);
        assert_eq!(normalizer.max(), &[400_000.0, 4.0, 1.0, 1.0]);

        let normalized = normalizer.transform_all(&lisboa_listings());
        assert_eq!(normalized[0], [0.0, 0.0, 0.0, 0.0]);
        assert_eq!(normalized[1], [1.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_query_uses_listing_bounds() {
        let normalizer = MinMaxNormalizer::fit(&lisboa_listings());
        let query = normalizer.transform(&[350_000.0, 3.0, 1.0, 0.0]);
        assert_eq!(query, [0.5, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_out_of_range_not_clipped() {
        let normalizer = MinMaxNormalizer::fit(&lisboa_listings());
        let query = normalizer.transform(&[500_000.0, 2.0, 0.0, 0.0]);
        assert_eq!(query[0], 2.0);
        assert_eq!(query[1], -1.0);
    }

    #[test]
    fn test_degenerate_features_are_zero() {
        let single = vec![[300_000.0, 3.0, 1.0, 0.0]];
        let normalizer = MinMaxNormalizer::fit(&single);

        assert_eq!(normalizer.transform(&single[0]), [0.0; FEATURE_COUNT]);
        // The query maps to 0 on degenerate features too, even when its raw value differs
        assert_eq!(
            normalizer.transform(&[350_000.0, 5.0, 0.0, 1.0]),
            [0.0; FEATURE_COUNT]
        );
    }

    #[test]
    fn test_empty_fit() {
        let normalizer = MinMaxNormalizer::fit(&[]);
        assert_eq!(
            normalizer.transform(&[1.0, 2.0, 3.0, 4.0]),
            [0.0; FEATURE_COUNT]
        );
    }

    #[test]
    fn test_refit_is_replayable() {
        let first = MinMaxNormalizer::fit(&lisboa_listings());
        let second = MinMaxNormalizer::fit(&lisboa_listings());
        assert_eq!(first, second);
        assert_eq!(
            first.transform_all(&lisboa_listings()),
            second.transform_all(&lisboa_listings())
        );
    }
}
