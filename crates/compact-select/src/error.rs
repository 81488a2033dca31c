//! Error types for the select controller.

use crate::model::Key;

/// Result type alias for select operations.
pub type Result<T> = std::result::Result<T, SelectError>;

/// Errors that can occur when driving the select controller.
///
/// None of these are runtime failures in the I/O sense; they report calls
/// addressed at something that does not exist, or operations the region's
/// selection mode does not support.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    /// A region index outside the composite's region list.
    #[error("region {index} is out of bounds (composite has {count} regions)")]
    RegionOutOfBounds { index: usize, count: usize },

    /// An option key that is not part of the region's collection.
    #[error("unknown option key '{0}'")]
    UnknownKey(Key),

    /// A section key that is not part of the region's collection.
    #[error("unknown section key '{0}'")]
    UnknownSection(Key),

    /// An operation that only exists in multiple-selection mode.
    #[error("'{operation}' requires multiple selection mode")]
    RequiresMultiple { operation: &'static str },
}

impl SelectError {
    /// Create a region bounds error.
    pub fn region_out_of_bounds(index: usize, count: usize) -> Self {
        Self::RegionOutOfBounds { index, count }
    }

    /// Create a selection mode error for the named operation.
    pub fn requires_multiple(operation: &'static str) -> Self {
        Self::RequiresMultiple { operation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SelectError::region_out_of_bounds(3, 2).to_string(),
            "region 3 is out of bounds (composite has 2 regions)"
        );
        assert_eq!(
            SelectError::UnknownKey(Key::from("kiwi")).to_string(),
            "unknown option key 'kiwi'"
        );
        assert_eq!(
            SelectError::requires_multiple("select_all").to_string(),
            "'select_all' requires multiple selection mode"
        );
    }
}
