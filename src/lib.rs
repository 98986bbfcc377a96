//! Property recommender
//!
//! Ranks real-estate listings for a user profile by combining a location and
//! price filter, cosine similarity over min-max normalized features, and a
//! random forest trained on the user's past ratings.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
