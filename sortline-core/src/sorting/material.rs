//! Material categories

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Material of an object on the belt
///
/// The discriminants are the codes shown on the display while the tray
/// rotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum MaterialType {
    Aluminum = 0,
    Steel = 1,
    White = 2,
    Black = 3,
    /// Reflectivity below every calibrated band
    Invalid = 4,
}

impl MaterialType {
    /// All materials that have a bin
    pub const SORTABLE: [MaterialType; 4] = [
        MaterialType::Aluminum,
        MaterialType::Steel,
        MaterialType::White,
        MaterialType::Black,
    ];

    /// Numeric code for display and signalling
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decode a material code; unknown codes are Invalid
    pub const fn from_code(code: u8) -> Self {
        match code {
            0 => MaterialType::Aluminum,
            1 => MaterialType::Steel,
            2 => MaterialType::White,
            3 => MaterialType::Black,
            _ => MaterialType::Invalid,
        }
    }

    /// Name shown on the display when the item is classified
    pub const fn name(self) -> &'static str {
        match self {
            MaterialType::Aluminum => "ALUMINUM",
            MaterialType::Steel => "STEEL",
            MaterialType::White => "WHITE",
            MaterialType::Black => "BLACK",
            MaterialType::Invalid => "INVALID ITEM",
        }
    }

    /// Check if this material has its own bin
    pub const fn is_valid(self) -> bool {
        !matches!(self, MaterialType::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for material in MaterialType::SORTABLE {
            assert_eq!(MaterialType::from_code(material.code()), material);
        }
        assert_eq!(MaterialType::from_code(4), MaterialType::Invalid);
        assert_eq!(MaterialType::from_code(200), MaterialType::Invalid);
    }

    #[test]
    fn test_names() {
        assert_eq!(MaterialType::Aluminum.name(), "ALUMINUM");
        assert_eq!(MaterialType::Invalid.name(), "INVALID ITEM");
    }

    #[test]
    fn test_validity() {
        assert!(MaterialType::SORTABLE.iter().all(|m| m.is_valid()));
        assert!(!MaterialType::Invalid.is_valid());
    }
}
