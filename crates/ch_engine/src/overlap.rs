//! Redundancy test between two arcs connecting the same pair of vertices.
use crate::edge_data::EdgeData;

/// Returns true if the existence of `candidate` makes `incumbent` useless,
/// i.e. `incumbent` can never be part of a shortest path.
///
/// Both arcs must be seen from the same source vertex.
pub fn overlaps(candidate: &EdgeData, incumbent: &EdgeData) -> bool {
    // An arc to a higher vertex serves a different search than one to a lower vertex
    if candidate.is_to_higher() != incumbent.is_to_higher() {
        return false;
    }
    if incumbent.backward() && !candidate.backward() {
        return false;
    }
    if incumbent.forward() && !candidate.forward() {
        return false;
    }
    // Equal weights are kept, both may be needed as witnesses
    candidate.weight < incumbent.weight
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lighter_arc_with_same_capabilities_overlaps() {
        let direct = EdgeData::new(1.5, true, true);
        let shortcut = EdgeData::shortcut(2.0, true, true, 2);

        assert!(overlaps(&direct, &shortcut));
        assert!(!overlaps(&shortcut, &direct));
    }

    #[test]
    fn equal_weight_never_overlaps() {
        let a = EdgeData::new(2.0, true, true);
        let b = EdgeData::new(2.0, true, false);

        assert!(!overlaps(&a, &a));
        assert!(!overlaps(&a, &b));
        assert!(!overlaps(&b, &a));
    }

    #[test]
    fn missing_direction_never_overlaps() {
        let forward = EdgeData::new(1.0, true, false);
        let backward = EdgeData::new(1.0, false, true);
        let both = EdgeData::new(5.0, true, true);
        let neither = EdgeData::new(5.0, false, false);

        assert!(!overlaps(&forward, &both));
        assert!(!overlaps(&backward, &both));
        assert!(!overlaps(&forward, &EdgeData::new(5.0, false, true)));
        assert!(overlaps(&forward, &EdgeData::new(5.0, true, false)));
        assert!(overlaps(&forward, &neither));
        assert!(overlaps(&backward, &neither));
    }

    #[test]
    fn different_bands_never_overlap() {
        let up = EdgeData::with_rank(1.0, true, true, true);
        let down = EdgeData::with_rank(5.0, true, true, false);

        assert!(!overlaps(&up, &down));
        assert!(overlaps(&up, &EdgeData::with_rank(5.0, true, true, true)));
        // Lower and unknown bands both count as "not to higher"
        assert!(overlaps(&EdgeData::new(1.0, true, true), &down));
    }

    #[test]
    fn overlaps_is_irreflexive() {
        let mut runner = proptest::test_runner::TestRunner::default();

        runner
            .run(
                &(0.0f32..1000.0, proptest::bool::ANY, proptest::bool::ANY),
                |(weight, forward, backward)| {
                    let edge = EdgeData::new(weight, forward, backward);
                    assert!(!overlaps(&edge, &edge));
                    Ok(())
                },
            )
            .unwrap();
    }
}
