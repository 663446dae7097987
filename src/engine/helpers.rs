use crate::entities::{RouteCandidate, Waypoint};

/// Linear scan keeping the first candidate unless a strictly shorter one
/// turns up, so ties go to the earliest.
pub fn shortest_candidate(candidates: Vec<RouteCandidate>) -> Option<RouteCandidate> {
    let mut candidates = candidates.into_iter();
    let mut shortest = candidates.next()?;

    for candidate in candidates {
        if candidate.distance < shortest.distance {
            shortest = candidate;
        }
    }

    Some(shortest)
}

/// `(i, waypoints[i], waypoints[i + 1])` for every adjacent pair.
pub fn consecutive_pairs(
    waypoints: &[Waypoint],
) -> impl Iterator<Item = (usize, &Waypoint, &Waypoint)> {
    waypoints
        .windows(2)
        .enumerate()
        .map(|(index, pair)| (index, &pair[0], &pair[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Coordinates;
    use geo_types::LineString;

    fn candidate(distance: f64, tag: f64) -> RouteCandidate {
        RouteCandidate::new(distance, LineString::from(vec![(tag, tag)]))
    }

    #[test]
    fn picks_minimum_distance() {
        let shortest =
            shortest_candidate(vec![candidate(5.0, 0.0), candidate(2.0, 1.0), candidate(8.0, 2.0)])
                .unwrap();

        assert_eq!(shortest.distance, 2.0);
    }

    #[test]
    fn ties_keep_first_seen() {
        let shortest =
            shortest_candidate(vec![candidate(3.0, 0.0), candidate(2.0, 1.0), candidate(2.0, 2.0)])
                .unwrap();

        assert_eq!(shortest, candidate(2.0, 1.0));
    }

    #[test]
    fn no_candidates() {
        assert!(shortest_candidate(vec![]).is_none());
    }

    #[test]
    fn pairs_are_adjacent_and_ordered() {
        let waypoints: Vec<Waypoint> = ["A", "B", "C", "D"]
            .iter()
            .map(|label| Waypoint::new(label.to_string(), Coordinates::new(0.0, 0.0)))
            .collect();

        let pairs: Vec<(usize, &str, &str)> = consecutive_pairs(&waypoints)
            .map(|(i, a, b)| (i, a.label.as_str(), b.label.as_str()))
            .collect();

        assert_eq!(pairs, vec![(0, "A", "B"), (1, "B", "C"), (2, "C", "D")]);
    }

    #[test]
    fn single_waypoint_has_no_pairs() {
        let waypoints = vec![Waypoint::new("A".into(), Coordinates::new(0.0, 0.0))];
        assert_eq!(consecutive_pairs(&waypoints).count(), 0);
        assert_eq!(consecutive_pairs(&[]).count(), 0);
    }
}
