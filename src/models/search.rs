//! Property search criteria

use serde::Deserialize;

/// Sparse filter set for a property search.
///
/// Every field is optional and a present field activates its predicate.
/// Search forms submit blank strings for untouched inputs, so a blank
/// city counts as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchCriteria {
    pub owner_id: Option<i64>,
    pub city: Option<String>,
    /// Lower price bound in currency units (the store keeps cents).
    pub minimum_price_per_night: Option<i64>,
    /// Upper price bound in currency units (the store keeps cents).
    pub maximum_price_per_night: Option<i64>,
    pub minimum_rating: Option<f64>,
}

impl SearchCriteria {
    /// The city filter, with blank input normalized away.
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref().filter(|c| !c.is_empty())
    }

    /// True when no criterion is active.
    pub fn is_empty(&self) -> bool {
        self.owner_id.is_none()
            && self.city().is_none()
            && self.minimum_price_per_night.is_none()
            && self.maximum_price_per_night.is_none()
            && self.minimum_rating.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        assert!(SearchCriteria::default().is_empty());
    }

    #[test]
    fn blank_city_counts_as_absent() {
        let criteria = SearchCriteria {
            city: Some(String::new()),
            ..Default::default()
        };

        assert!(criteria.is_empty());
        assert_eq!(criteria.city(), None);
    }

    #[test]
    fn any_present_field_activates() {
        let criteria = SearchCriteria {
            minimum_rating: Some(4.0),
            ..Default::default()
        };

        assert!(!criteria.is_empty());
    }
}
