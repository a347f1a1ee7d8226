//! Per-bin sort counters

use super::MaterialType;

/// Number of items sorted into each bin
///
/// Invalid items are sorted into the home slot but never counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SortCounts {
    pub aluminum: u16,
    pub steel: u16,
    pub white: u16,
    pub black: u16,
}

impl SortCounts {
    pub const fn new() -> Self {
        Self {
            aluminum: 0,
            steel: 0,
            white: 0,
            black: 0,
        }
    }

    /// Count one sorted item, returning false if the material is not counted
    pub fn record(&mut self, material: MaterialType) -> bool {
        let counter = match material {
            MaterialType::Aluminum => &mut self.aluminum,
            MaterialType::Steel => &mut self.steel,
            MaterialType::White => &mut self.white,
            MaterialType::Black => &mut self.black,
            MaterialType::Invalid => return false,
        };
        *counter = counter.saturating_add(1);
        true
    }

    pub fn get(&self, material: MaterialType) -> u16 {
        match material {
            MaterialType::Aluminum => self.aluminum,
            MaterialType::Steel => self.steel,
            MaterialType::White => self.white,
            MaterialType::Black => self.black,
            MaterialType::Invalid => 0,
        }
    }

    /// Items counted across all bins
    pub fn total(&self) -> u32 {
        MaterialType::SORTABLE
            .iter()
            .map(|&m| u32::from(self.get(m)))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record() {
        let mut counts = SortCounts::new();
        assert!(counts.record(MaterialType::Steel));
        assert!(counts.record(MaterialType::Steel));
        assert!(counts.record(MaterialType::Black));

        assert_eq!(counts.get(MaterialType::Steel), 2);
        assert_eq!(counts.get(MaterialType::Black), 1);
        assert_eq!(counts.get(MaterialType::Aluminum), 0);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_invalid_not_counted() {
        let mut counts = SortCounts::new();
        assert!(!counts.record(MaterialType::Invalid));
        assert_eq!(counts, SortCounts::default());
        assert_eq!(counts.total(), 0);
    }
}
