use std::collections::HashSet;
use std::path::Path;

use crate::{
    error::{AppError, AppResult},
    models::{Listing, ListingId, UserProfile},
};

/// In-memory listing catalog, static for the lifetime of the process
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    listings: Vec<Listing>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate ids and negative prices
    pub fn new(listings: Vec<Listing>) -> AppResult<Self> {
        let mut seen = HashSet::new();
        for listing in &listings {
            if !seen.insert(listing.id) {
                return Err(AppError::InvalidInput(format!(
                    "Duplicate listing id {}",
                    listing.id
                )));
            }
            if listing.price.is_nan() || listing.price < 0.0 {
                return Err(AppError::InvalidInput(format!(
                    "Listing {} has invalid price {}",
                    listing.id, listing.price
                )));
            }
        }

        Ok(Self { listings })
    }

    /// The five simulated listings used when no catalog source is configured
    pub fn demo() -> Self {
        let rows = [
            (1, "Lisboa", 300_000.0, 3, true, false),
            (2, "Porto", 250_000.0, 2, false, false),
            (3, "Lisboa", 400_000.0, 4, true, true),
            (4, "Algarve", 200_000.0, 2, true, true),
            (5, "Porto", 270_000.0, 3, false, false),
        ];

        let listings = rows
            .into_iter()
            .map(|(id, location, price, bedrooms, garage, pool)| Listing {
                id: ListingId(id),
                location: location.to_string(),
                price,
                bedrooms,
                garage,
                pool,
            })
            .collect();

        Self { listings }
    }

    /// Loads a JSON array of listings
    pub fn from_json_file(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| AppError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let listings: Vec<Listing> = serde_json::from_str(&raw)?;
        tracing::info!(path = %path.display(), count = listings.len(), "Loaded listing catalog");
        Self::new(listings)
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn get(&self, id: ListingId) -> Option<&Listing> {
        self.listings.iter().find(|listing| listing.id == id)
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Listings matching the profile's location and price, in catalog order
    pub fn filter(&self, profile: &UserProfile) -> Vec<Listing> {
        self.listings
            .iter()
            .filter(|listing| profile.accepts(listing))
            .cloned()
            .collect()
    }
}
