use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::models::{
    FeedbackMap, FeedbackSubmission, Listing, ListingId, RankingPolicy, ScoredListing, UserProfile,
};
use crate::services::{recommendations, NotificationEvent};

use super::AppState;

// Request/Response types

/// What the presentation layer renders for one recommended listing
#[derive(Debug, Serialize)]
pub struct ListingView {
    pub id: ListingId,
    pub location: String,
    pub price: f64,
    pub bedrooms: u32,
    pub garage: bool,
    pub pool: bool,
    pub similarity_score: f64,
    pub predictive_score: Option<f64>,
}

impl From<ScoredListing> for ListingView {
    fn from(scored: ScoredListing) -> Self {
        let listing = scored.listing;
        Self {
            id: listing.id,
            location: listing.location,
            price: listing.price,
            bedrooms: listing.bedrooms,
            garage: listing.garage,
            pool: listing.pool,
            similarity_score: scored.similarity_score,
            predictive_score: scored.predictive_score,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub policy: RankingPolicy,
    pub listings: Vec<ListingView>,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub listing_id: ListingId,
    pub rating: f64,
    pub message: String,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Get the listing catalog
pub async fn get_listings(State(state): State<AppState>) -> Json<Vec<Listing>> {
    Json(state.inner.catalog.listings().to_vec())
}

/// Rank catalog listings for a user profile
///
/// Degrades to similarity-only ranking while no feedback exists. The
/// computation runs on the blocking pool and is abandoned after the
/// configured training timeout.
pub async fn recommend(
    State(state): State<AppState>,
    Json(profile): Json<UserProfile>,
) -> AppResult<Json<RecommendationResponse>> {
    if profile.max_price.is_nan() || profile.max_price < 0.0 {
        return Err(AppError::InvalidInput(
            "max_price must be a non-negative number".to_string(),
        ));
    }

    let feedback = state.feedback_snapshot()?;
    let catalog = state.inner.catalog.clone();
    let params = state.inner.forest_params;
    let timeout = state.inner.training_timeout;

    let task = tokio::task::spawn_blocking(move || {
        recommendations::get_recommendations_or_fallback(&catalog, &profile, &feedback, &params)
    });

    let list = match tokio::time::timeout(timeout, task).await {
        Ok(Ok(result)) => result?,
        Ok(Err(e)) => return Err(AppError::Internal(e.to_string())),
        Err(_) => {
            tracing::warn!(
                timeout_ms = timeout.as_millis(),
                "Recommendation computation timed out"
            );
            return Err(AppError::TrainingTimeout(timeout.as_millis() as u64));
        }
    };

    Ok(Json(RecommendationResponse {
        policy: list.policy,
        listings: list.listings.into_iter().map(ListingView::from).collect(),
    }))
}

/// Get all recorded feedback
pub async fn get_feedback(State(state): State<AppState>) -> AppResult<Json<FeedbackMap>> {
    Ok(Json(state.feedback_snapshot()?))
}

/// Record a rating and notify the user
///
/// Notification failures are logged; the rating stays recorded.
pub async fn submit_feedback(
    State(state): State<AppState>,
    Json(submission): Json<FeedbackSubmission>,
) -> AppResult<(StatusCode, Json<FeedbackResponse>)> {
    if state.inner.catalog.get(submission.listing_id).is_none() {
        return Err(AppError::ListingNotFound(submission.listing_id));
    }

    let rating = state
        .record_feedback(submission.listing_id, submission.rating)
        .await?;

    let event = NotificationEvent::feedback_recorded(
        &state.inner.notification_recipient,
        submission.listing_id,
        rating,
    );
    if let Err(e) = state.inner.notifier.notify(&event).await {
        tracing::warn!(
            error = %e,
            listing_id = %submission.listing_id,
            "Notification delivery failed"
        );
    }

    Ok((
        StatusCode::CREATED,
        Json(FeedbackResponse {
            listing_id: submission.listing_id,
            rating: rating.value(),
            message: event.message,
        }),
    ))
}
