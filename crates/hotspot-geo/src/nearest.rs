use hotspot_core::models::{Coordinate, Location};

use crate::distance::haversine_distance;

/// The closest candidate and how far away it is
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest<'a> {
    pub location: &'a Location,
    pub distance_meters: f64,
}

/// Find the location closest to `user`.
///
/// Candidates without coordinates are skipped. On equal distances the
/// earlier candidate wins. Returns `None` when no candidate has coordinates.
///
/// `user` and candidate coordinates are not range-checked; callers validate
/// device positions with [`Coordinate::validate`] first.
pub fn find_nearest(user: Coordinate, candidates: &[Location]) -> Option<Nearest<'_>> {
    let mut best: Option<Nearest<'_>> = None;

    for location in candidates {
        let Some(coordinates) = location.coordinates else {
            continue;
        };

        let distance_meters = haversine_distance(user, coordinates);
        match best {
            Some(ref current) if distance_meters >= current.distance_meters => {}
            _ => best = Some(Nearest { location, distance_meters }),
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotspot_core::models::{CrowdLevel, LocationId};
    use proptest::prelude::*;

    fn location(id: &str, lat: f64, lon: f64) -> Location {
        Location::new(id, id, Coordinate::new(lat, lon), CrowdLevel::NotCrowded, "study")
    }

    #[test]
    fn test_picks_nearest() {
        let user = Coordinate::new(40.7982, -77.8599);
        let candidates = vec![location("far", 41.0, -78.0), location("near", 40.7983, -77.8600)];

        let nearest = find_nearest(user, &candidates).unwrap();
        assert_eq!(nearest.location.id.as_str(), "near");
        assert!(nearest.distance_meters < 20.0);
    }

    #[test]
    fn test_empty_candidates() {
        assert!(find_nearest(Coordinate::new(0.0, 0.0), &[]).is_none());
    }

    #[test]
    fn test_skips_missing_coordinates() {
        let mut unplaced = location("unplaced", 0.0, 0.0);
        unplaced.coordinates = None;
        let user = Coordinate::new(0.0, 0.0);

        assert!(find_nearest(user, std::slice::from_ref(&unplaced)).is_none());

        let candidates = vec![unplaced, location("placed", 10.0, 10.0)];
        assert_eq!(find_nearest(user, &candidates).unwrap().location.id, LocationId::new("placed"));
    }

    #[test]
    fn test_ties_keep_first_candidate() {
        let user = Coordinate::new(0.0, 0.0);
        let candidates = vec![location("east", 0.0, 1.0), location("west", 0.0, -1.0)];
        assert_eq!(find_nearest(user, &candidates).unwrap().location.id.as_str(), "east");

        let duplicates = vec![location("first", 5.0, 5.0), location("second", 5.0, 5.0)];
        assert_eq!(find_nearest(user, &duplicates).unwrap().location.id.as_str(), "first");
    }

    fn arb_coordinate() -> impl Strategy<Value = Coordinate> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lon)| Coordinate::new(lat, lon))
    }

    proptest! {
        #[test]
        fn prop_single_candidate_at_user_is_zero(c in arb_coordinate()) {
            let candidates = vec![location("self", c.latitude, c.longitude)];
            let nearest = find_nearest(c, &candidates).unwrap();
            prop_assert_eq!(&nearest.location.id.0, "self");
            prop_assert!(nearest.distance_meters < 1e-6);
        }

        #[test]
        fn prop_result_is_a_member_and_minimal(
            user in arb_coordinate(),
            points in prop::collection::vec(arb_coordinate(), 1..15),
        ) {
            let candidates: Vec<Location> = points
                .iter()
                .enumerate()
                .map(|(i, c)| location(&i.to_string(), c.latitude, c.longitude))
                .collect();

            let nearest = find_nearest(user, &candidates).unwrap();
            prop_assert!(candidates.iter().any(|l| std::ptr::eq(l, nearest.location)));
            for candidate in &candidates {
                let d = haversine_distance(user, candidate.coordinates.unwrap());
                prop_assert!(nearest.distance_meters <= d);
            }
        }
    }
}
