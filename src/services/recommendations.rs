use std::time::Instant;

use crate::{
    error::{AppError, AppResult},
    models::{
        FeatureVector, FeedbackMap, RankingPolicy, RecommendationList, ScoredListing, UserProfile,
    },
    services::{
        catalog::Catalog, forest::ForestParams, normalizer::MinMaxNormalizer,
        predictive::PredictiveScorer, ranking, similarity,
    },
};

/// Generates ranked property recommendations for a profile
///
/// Pipeline: filter by location and price, normalize the filtered set and
/// the query with one fitted scaler, score cosine similarity, train the
/// forest on rated catalog listings, predict on the filtered set and rank by
/// predictive score.
///
/// Every result is a pure function of the arguments; nothing is cached
/// between calls. Fails with `InsufficientTrainingData` when no catalog
/// listing has feedback, even if the filtered set is empty.
pub fn get_recommendations(
    catalog: &Catalog,
    profile: &UserProfile,
    feedback: &FeedbackMap,
    params: &ForestParams,
) -> AppResult<RecommendationList> {
    let start = Instant::now();
    let candidates = score_similarity(catalog, profile);
    let scorer = PredictiveScorer::train(catalog, feedback, params)?;

    Ok(rank_predictive(candidates, &scorer, profile, start))
}

/// Like `get_recommendations`, degrading to similarity-only ranking when
/// there is no feedback to train on
pub fn get_recommendations_or_fallback(
    catalog: &Catalog,
    profile: &UserProfile,
    feedback: &FeedbackMap,
    params: &ForestParams,
) -> AppResult<RecommendationList> {
    let start = Instant::now();
    let candidates = score_similarity(catalog, profile);

    match PredictiveScorer::train(catalog, feedback, params) {
        Ok(scorer) => Ok(rank_predictive(candidates, &scorer, profile, start)),
        Err(AppError::InsufficientTrainingData) => {
            tracing::info!(
                location = %profile.location,
                "Falling back to similarity-only ranking"
            );
            Ok(ranking::rank(candidates, RankingPolicy::SimilarityOnly))
        }
        Err(e) => Err(e),
    }
}

fn rank_predictive(
    mut candidates: Vec<ScoredListing>,
    scorer: &PredictiveScorer,
    profile: &UserProfile,
    start: Instant,
) -> RecommendationList {
    for candidate in &mut candidates {
        candidate.predictive_score = Some(scorer.predict(&candidate.listing));
    }

    let list = ranking::rank(candidates, RankingPolicy::Predictive);

    tracing::info!(
        location = %profile.location,
        recommended = list.len(),
        training_size = scorer.training_size(),
        processing_time_ms = start.elapsed().as_millis(),
        "Recommendations computed"
    );

    list
}

/// Filtered listings with normalized features and similarity, in catalog order
fn score_similarity(catalog: &Catalog, profile: &UserProfile) -> Vec<ScoredListing> {
    let filtered = catalog.filter(profile);

    tracing::debug!(
        catalog_size = catalog.len(),
        filtered = filtered.len(),
        "Applied location and price filter"
    );

    if filtered.is_empty() {
        return Vec::new();
    }

    let raw: Vec<FeatureVector> = filtered.iter().map(|listing| listing.features()).collect();
    let normalizer = MinMaxNormalizer::fit(&raw);
    let normalized = normalizer.transform_all(&raw);
    let query = normalizer.transform(&profile.query_vector());
    let scores = similarity::score_all(&query, &normalized);

    filtered
        .into_iter()
        .zip(normalized)
        .zip(scores)
        .map(|((listing, normalized), similarity_score)| ScoredListing {
            listing,
            normalized,
            similarity_score,
            predictive_score: None,
        })
        .collect()
}
