//! # Tour Types
//!
//! Tour catalog types. Tours are read-only collaborators during a booking
//! attempt; the catalog is loaded from `config/tours.toml`.

use crate::money::Price;
use serde::{Deserialize, Serialize};

/// A bookable tour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tour {
    /// Catalog id
    pub id: u64,

    /// Display title (e.g. "Tirana [Terminal] → Koman")
    pub title: String,

    /// Short description
    #[serde(default)]
    pub description: String,

    /// Starting location
    #[serde(default)]
    pub location: String,

    /// Departure time as shown to customers (e.g. "06:00")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,

    /// Price per person
    pub price: Price,

    /// Customer rating
    #[serde(default)]
    pub rating: f64,

    /// Seat capacity per departure
    pub max_guests: u32,
}

/// In-memory tour catalog, deserializable from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TourCatalog {
    #[serde(default)]
    pub tours: Vec<Tour>,
}

impl TourCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self { tours: Vec::new() }
    }

    /// Look up a tour by id
    pub fn get(&self, id: u64) -> Option<&Tour> {
        self.tours.iter().find(|t| t.id == id)
    }

    /// Number of tours in the catalog
    pub fn len(&self) -> usize {
        self.tours.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn koman_tour() -> Tour {
        Tour {
            id: 1,
            title: "Tirana [Terminal] → Koman".to_string(),
            description: "Bus trip from Tirana through the Albanian Alps".to_string(),
            location: "Tirana".to_string(),
            departure_time: Some("06:00".to_string()),
            price: Price::new(10.0, Currency::EUR),
            rating: 5.0,
            max_guests: 50,
        }
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = TourCatalog {
            tours: vec![koman_tour()],
        };

        assert_eq!(catalog.get(1).map(|t| t.max_guests), Some(50));
        assert!(catalog.get(99).is_none());
    }

    #[test]
    fn test_catalog_from_toml() {
        let toml = r#"
            [[tours]]
            id = 1
            title = "Fierza → Valbonë"
            location = "Fierza"
            price = { amount = 700, currency = "eur" }
            max_guests = 50
        "#;

        let catalog: TourCatalog = toml::from_str(toml).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(1).unwrap().price.as_decimal(), 7.0);
    }
}
