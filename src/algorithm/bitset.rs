use bitvec::prelude::*;
use std::fmt;

/// Fixed-width candidate set for one board cell
///
/// Bit index corresponds directly to tile id. The set is sized once to the
/// tile count and never resized; a `true` bit means the tile id is still a
/// candidate for the cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateSet {
    bits: BitVec,
}

impl CandidateSet {
    /// Create a set with every tile id still possible
    pub fn all(num_tiles: usize) -> Self {
        Self {
            bits: bitvec![1; num_tiles],
        }
    }

    /// Create a set containing only the given tile ids
    ///
    /// Ids outside `0..num_tiles` are ignored
    pub fn from_ids(tile_ids: &[usize], num_tiles: usize) -> Self {
        let mut bits = bitvec![0; num_tiles];
        for &tile_id in tile_ids {
            if tile_id < num_tiles {
                bits.set(tile_id, true);
            }
        }
        Self { bits }
    }

    /// Test whether a tile id remains a candidate
    pub fn contains(&self, tile_id: usize) -> bool {
        self.bits.get(tile_id).as_deref() == Some(&true)
    }

    /// Count remaining candidates
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Test if no candidates remain
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Test whether exactly one candidate remains
    pub fn is_singleton(&self) -> bool {
        self.count() == 1
    }

    /// The single remaining candidate, if the set is a singleton
    pub fn sole_candidate(&self) -> Option<usize> {
        if self.count() == 1 {
            self.bits.first_one()
        } else {
            None
        }
    }

    /// Clear every candidate except the given tile id
    pub fn retain_only(&mut self, tile_id: usize) {
        self.bits.fill(false);
        if tile_id < self.bits.len() {
            self.bits.set(tile_id, true);
        }
    }

    /// Extract all remaining candidate tile ids in ascending order
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }

    /// Number of tile ids the set was sized for
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }
}

impl fmt::Display for CandidateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CandidateSet({} of {}: {:?})",
            self.count(),
            self.capacity(),
            self.to_vec()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::CandidateSet;

    // Verifies a full set reports every id as a candidate
    #[test]
    fn test_all_candidates_present() {
        let set = CandidateSet::all(5);
        for tile_id in 0..5 {
            assert!(set.contains(tile_id));
        }
        assert_eq!(set.count(), 5);
        assert!(!set.is_singleton());
        assert_eq!(set.sole_candidate(), None);
    }

    // Verifies retain_only leaves exactly the winning bit set
    #[test]
    fn test_retain_only() {
        let mut set = CandidateSet::all(4);
        set.retain_only(2);
        assert_eq!(set.count(), 1);
        assert!(set.is_singleton());
        assert_eq!(set.sole_candidate(), Some(2));
        assert!(set.contains(2));
        assert!(!set.contains(0));
        assert_eq!(set.to_vec(), vec![2]);
    }

    // Verifies construction from an explicit id list
    #[test]
    fn test_from_ids() {
        let set = CandidateSet::from_ids(&[0, 3], 4);
        assert!(set.contains(0));
        assert!(!set.contains(1));
        assert!(!set.contains(2));
        assert!(set.contains(3));
        assert_eq!(set.count(), 2);
    }

    // Out-of-range ids are ignored rather than growing the set
    #[test]
    fn test_from_ids_ignores_out_of_range() {
        let set = CandidateSet::from_ids(&[1, 9], 3);
        assert_eq!(set.to_vec(), vec![1]);
        assert_eq!(set.capacity(), 3);
    }

    #[test]
    fn test_empty_set() {
        let set = CandidateSet::from_ids(&[], 3);
        assert!(set.is_empty());
        assert_eq!(set.count(), 0);
        assert_eq!(set.sole_candidate(), None);
    }
}
