use serde::{Deserialize, Serialize};

use super::{FeatureVector, ListingId};

/// A real-estate listing from the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    /// Stable catalog identifier
    pub id: ListingId,
    /// City or region (e.g., "Lisboa")
    pub location: String,
    /// Asking price in euros
    pub price: f64,
    pub bedrooms: u32,
    pub garage: bool,
    pub pool: bool,
}

impl Listing {
    /// Raw feature vector: price, bedrooms, garage, pool
    pub fn features(&self) -> FeatureVector {
        [
            self.price,
            f64::from(self.bedrooms),
            flag(self.garage),
            flag(self.pool),
        ]
    }
}

pub(crate) fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}
