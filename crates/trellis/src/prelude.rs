//! Prelude module for Trellis.
//!
//! ```ignore
//! use trellis::prelude::*;
//! ```
//!
//! This provides the sizer kinds, item flags, the widget contract and the
//! geometry types.

// ============================================================================
// Sizers
// ============================================================================

pub use crate::sizer::{
    BoxSizer, FlexDirection, FlexGridSizer, GridBagCell, GridBagSizer, GridSizer, NonFlexibleGrowMode,
    Orientation, Sizer, SizerFactory, SizerItem, WrapFlags, WrapSizer,
};

// ============================================================================
// Item Flags
// ============================================================================

pub use crate::sizer::{SizerFlag, SizerFlags};

// ============================================================================
// Widget Contract
// ============================================================================

pub use crate::widget::{Widget, WidgetAccess, WidgetStore};

// ============================================================================
// Core Types
// ============================================================================

pub use trellis_core::{LayoutError, Point, Rect, Result, Size, WidgetId};
