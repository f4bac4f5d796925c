//! Error types for Trellis.

use thiserror::Error;

use crate::id::WidgetId;

/// Errors reported by sizer operations.
///
/// Every error is local to the call that produced it; the sizer is left
/// exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// An item index was outside the sizer's item list.
    #[error("index {index} out of range for sizer with {count} items")]
    IndexOutOfRange { index: usize, count: usize },

    /// The widget handle does not resolve to a widget in storage.
    #[error("widget {0:?} does not exist in widget storage")]
    UnknownWidget(WidgetId),

    /// The widget is already positioned by a sizer.
    #[error("widget {0:?} is already managed by a sizer")]
    WidgetAlreadyManaged(WidgetId),

    /// A grid with both dimensions fixed cannot hold another item.
    #[error("grid sizer with {rows} rows and {cols} columns cannot hold {count} items")]
    GridCapacityExceeded { rows: usize, cols: usize, count: usize },

    /// A grid sizer needs at least one non-zero dimension.
    #[error("grid sizer needs at least one non-zero dimension")]
    InvalidGridDimensions,

    /// A grid-bag placement overlaps an item already in the sizer.
    #[error("cell at ({row}, {col}) spanning {row_span}x{col_span} overlaps an existing item")]
    CellOverlap {
        row: usize,
        col: usize,
        row_span: usize,
        col_span: usize,
    },

    /// A grid-bag placement reaches past the last row or column a grid-bag
    /// sizer can hold.
    #[error("cell at ({row}, {col}) spanning {row_span}x{col_span} exceeds the {limit} track limit")]
    CellOutOfRange {
        row: usize,
        col: usize,
        row_span: usize,
        col_span: usize,
        limit: usize,
    },

    /// Grid-bag sizers only accept items carrying a cell placement.
    #[error("grid bag sizer items require a cell position")]
    PositionRequired,

    /// A grid-bag-only operation was called on another kind of sizer.
    #[error("operation requires a grid bag sizer")]
    NotAGridBagSizer,
}

/// Result type for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LayoutError::IndexOutOfRange { index: 4, count: 2 };
        assert_eq!(err.to_string(), "index 4 out of range for sizer with 2 items");

        let err = LayoutError::GridCapacityExceeded {
            rows: 2,
            cols: 2,
            count: 5,
        };
        assert!(err.to_string().contains("2 rows and 2 columns"));
    }
}
