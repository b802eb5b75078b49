//! Client-side filtering of map locations

use crate::models::{FilterCriteria, Location};

/// Return the locations matching `criteria`, in input order.
///
/// An empty criteria set returns every location unchanged.
pub fn apply_filters(locations: &[Location], criteria: &FilterCriteria) -> Vec<Location> {
    if criteria.is_empty() {
        return locations.to_vec();
    }

    locations.iter().filter(|location| criteria.matches(location)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, CrowdLevel};
    use proptest::prelude::*;

    fn location(id: &str, level: CrowdLevel, category: &str) -> Location {
        Location::new(id, id, Coordinate::new(40.0, -77.0), level, category)
    }

    #[test]
    fn test_filter_by_crowd_level() {
        let locations = vec![
            location("A", CrowdLevel::NotCrowded, "gym"),
            location("B", CrowdLevel::VeryCrowded, "study"),
        ];
        let criteria = FilterCriteria::new().with_crowd_level(CrowdLevel::VeryCrowded);

        let result = apply_filters(&locations, &criteria);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id.as_str(), "B");
    }

    #[test]
    fn test_filter_by_category() {
        let locations = vec![
            location("A", CrowdLevel::NotCrowded, "gym"),
            location("B", CrowdLevel::VeryCrowded, "study"),
            location("C", CrowdLevel::VeryCrowded, "gym"),
        ];
        let criteria = FilterCriteria::new().with_category("gym");

        let ids: Vec<_> =
            apply_filters(&locations, &criteria).into_iter().map(|l| l.id.0).collect();
        assert_eq!(ids, vec!["A", "C"]);
    }

    #[test]
    fn test_both_predicates_apply() {
        let locations = vec![
            location("A", CrowdLevel::VeryCrowded, "gym"),
            location("B", CrowdLevel::VeryCrowded, "study"),
            location("C", CrowdLevel::NotCrowded, "gym"),
        ];
        let criteria =
            FilterCriteria::new().with_crowd_level(CrowdLevel::VeryCrowded).with_category("gym");

        let result = apply_filters(&locations, &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id.as_str(), "A");
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        let locations = vec![
            location("B", CrowdLevel::VeryCrowded, "study"),
            location("A", CrowdLevel::NotCrowded, "gym"),
        ];
        assert_eq!(apply_filters(&locations, &FilterCriteria::default()), locations);
    }

    fn arb_location() -> impl Strategy<Value = Location> {
        (0i64..4, prop::sample::select(vec!["gym", "study", "dining"]), "[a-z]{1,6}").prop_map(
            |(level, category, id)| location(&id, CrowdLevel::from_level(level), category),
        )
    }

    fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
        (
            prop::option::of((0i64..4).prop_map(CrowdLevel::from_level)),
            prop::option::of(prop::sample::select(vec!["gym", "study", "dining"])),
        )
            .prop_map(|(crowd_level, category)| FilterCriteria {
                crowd_level,
                category: category.map(String::from),
            })
    }

    proptest! {
        #[test]
        fn prop_identity_law(locations in prop::collection::vec(arb_location(), 0..20)) {
            prop_assert_eq!(apply_filters(&locations, &FilterCriteria::default()), locations);
        }

        #[test]
        fn prop_idempotent(
            locations in prop::collection::vec(arb_location(), 0..20),
            criteria in arb_criteria(),
        ) {
            let once = apply_filters(&locations, &criteria);
            let twice = apply_filters(&once, &criteria);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_result_is_ordered_subsequence(
            locations in prop::collection::vec(arb_location(), 0..20),
            criteria in arb_criteria(),
        ) {
            let result = apply_filters(&locations, &criteria);
            let mut remaining = locations.iter();
            for kept in &result {
                prop_assert!(criteria.matches(kept));
                prop_assert!(remaining.any(|l| l == kept));
            }
        }
    }
}
