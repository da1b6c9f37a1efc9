//! Slot arithmetic shared by the ordering and stacking engines

use std::collections::HashSet;

/// Smallest integer `>= floor` that is not in `occupied` (the minimum excludant).
pub fn first_free_slot<I>(occupied: I, floor: u32) -> u32
where
    I: IntoIterator<Item = u32>,
{
    let occupied: HashSet<u32> = occupied.into_iter().collect();
    let mut slot = floor;
    while occupied.contains(&slot) {
        slot += 1;
    }
    slot
}

/// Whether any value appears twice
pub(crate) fn has_duplicates<I>(values: I) -> bool
where
    I: IntoIterator<Item = u32>,
{
    let mut seen = HashSet::new();
    values.into_iter().any(|v| !seen.insert(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_free_slot_with_floor() {
        assert_eq!(first_free_slot([5, 6, 8], 5), 7);
        assert_eq!(first_free_slot([1, 2, 3], 5), 5);
        assert_eq!(first_free_slot([], 5), 5);
    }

    #[test]
    fn test_has_duplicates() {
        assert!(!has_duplicates([1, 2, 3]));
        assert!(has_duplicates([1, 2, 1]));
        assert!(!has_duplicates([]));
    }
}
