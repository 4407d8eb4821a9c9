//! Tests for `ColourSet` operations including set operations and conversions

#[cfg(test)]
mod tests {
    use eternity_solver::algorithm::bitset::ColourSet;
    use eternity_solver::spatial::tiles::{GREY, WILDCARD};

    // Verifies new ColourSet is empty with count 0
    // Verified by initializing the set with all bits set to 1
    #[test]
    fn test_new_set() {
        let set = ColourSet::new(10);
        assert_eq!(set.count(), 0);
        assert!(set.is_empty());
        assert_eq!(ColourSet::all(5).count(), 5);
    }

    // Tests insertion and containment checking
    // Verified by removing the bit-setting logic from insert method
    #[test]
    fn test_insert_and_contains() {
        let mut set = ColourSet::new(10);
        set.insert(5);
        assert!(set.contains(5));
        assert!(!set.contains(3));
        assert_eq!(set.count(), 1);
    }

    // Tests reserved colours beyond the capacity are never members
    // Verified by growing the set on out-of-range inserts
    #[test]
    fn test_reserved_colours_ignored() {
        let mut set = ColourSet::new(17);
        set.insert(GREY);
        set.insert(WILDCARD);
        assert!(set.is_empty());
        assert!(!set.contains(GREY));
    }

    // Tests intersection of two sets returns correct elements
    // Verified by changing intersection operation to union operation
    #[test]
    fn test_intersection() {
        let first = ColourSet::from_colours([1, 3, 5], 10);
        let second = ColourSet::from_colours([3, 5, 7], 10);

        let intersection = first.intersection(&second);
        assert_eq!(intersection.to_vec(), vec![3, 5]);

        let mut in_place = first.clone();
        in_place.intersect_with(&ColourSet::from_colours([2, 4], 10));
        assert!(in_place.is_empty());
        assert_eq!(first.count(), 3);
    }

    // Tests display lists the members
    // Verified by printing the capacity instead of the count
    #[test]
    fn test_display() {
        let set = ColourSet::from_colours([4, 2, 2], 8);
        assert_eq!(set.to_string(), "ColourSet(2 colours: [2, 4])");
    }
}
