use serde::{Deserialize, Serialize};

use super::{listing::flag, FeatureVector, Listing};

/// What the user is looking for in a property
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    /// Must match a listing's location exactly
    pub location: String,
    /// Inclusive upper bound on price
    pub max_price: f64,
    pub bedrooms: u32,
    pub garage: bool,
    pub pool: bool,
}

impl UserProfile {
    /// Checks the hard location and price constraints
    pub fn accepts(&self, listing: &Listing) -> bool {
        listing.location == self.location && listing.price <= self.max_price
    }

    /// Query vector compared against listings, with the price budget standing in for price
    pub fn query_vector(&self) -> FeatureVector {
        [
            self.max_price,
            f64::from(self.bedrooms),
            flag(self.garage),
            flag(self.pool),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ListingId;

    fn profile() -> UserProfile {
        UserProfile {
            location: "Lisboa".to_string(),
            max_price: 350_000.0,
            bedrooms: 3,
            garage: true,
            pool: false,
        }
    }

    fn listing(location: &str, price: f64) -> Listing {
        Listing {
            id: ListingId(1),
            location: location.to_string(),
            price,
            bedrooms: 3,
            garage: true,
            pool: false,
        }
    }

    #[test]
    fn test_accepts_price_bound_inclusive() {
        assert!(profile().accepts(&listing("Lisboa", 350_000.0)));
        assert!(!profile().accepts(&listing("Lisboa", 350_000.01)));
    }

    #[test]
    fn test_rejects_other_location() {
        assert!(!profile().accepts(&listing("Porto", 100_000.0)));
        // Matching is exact, not case-insensitive
        assert!(!profile().accepts(&listing("lisboa", 100_000.0)));
    }

    #[test]
    fn test_query_vector() {
        assert_eq!(profile().query_vector(), [350_000.0, 3.0, 1.0, 0.0]);
    }
}
