use crate::models::FeatureVector;

/// Cosine similarity, 0 when either vector has zero norm
pub fn cosine_similarity(a: &FeatureVector, b: &FeatureVector) -> f64 {
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Scores every listing vector against the query, preserving input order
pub fn score_all(query: &FeatureVector, listings: &[FeatureVector]) -> Vec<f64> {
    listings
        .iter()
        .map(|listing| cosine_similarity(query, listing))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_identical_vectors() {
        let v = [0.5, 1.0, 0.0, 1.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_orthogonal_vectors() {
        assert_eq!(
            cosine_similarity(&[1.0, 0.0, 0.0, 0.0], &[0.0, 1.0, 0.0, 0.0]),
            0.0
        );
    }

    #[test]
    fn test_zero_norm_is_zero() {
        let zero = [0.0; 4];
        assert_eq!(cosine_similarity(&zero, &[1.0, 1.0, 0.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 1.0, 0.0, 0.0], &zero), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
    }

    #[test]
    fn test_non_negative_inputs_in_unit_range() {
        let query = [0.5, 0.0, 0.0, 0.0];
        let scores = score_all(
            &query,
            &[[0.0, 0.0, 0.0, 0.0], [1.0, 1.0, 0.0, 1.0], [0.2, 0.9, 1.0, 0.3]],
        );
        assert_eq!(scores.len(), 3);
        assert_eq!(scores[0], 0.0);
        for score in scores {
            assert!((0.0..=1.0 + EPS).contains(&score));
        }
    }

    #[test]
    fn test_scale_invariant() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [2.0, 4.0, 6.0, 8.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < EPS);
    }
}
