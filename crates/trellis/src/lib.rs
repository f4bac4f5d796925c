//! Trellis - a sizer-based box layout engine for widget toolkits.
//!
//! Trellis computes positions and sizes for a tree of widgets, nested
//! layouts and blank spacers. It honours minimum and maximum sizes,
//! proportional growth, aspect ratios, borders and visibility, and knows
//! nothing about drawing or events: the host toolkit exposes its widgets
//! through the [`Widget`] and [`WidgetAccess`] traits and calls
//! [`Sizer::set_dimension`] whenever a window's client area changes.
//!
//! # Example
//!
//! ```ignore
//! use trellis::prelude::*;
//!
//! let mut store = WidgetStore::new();
//! let list = store.insert(MyWidget::new(Size::new(200, 100)));
//! let ok = store.insert(MyWidget::new(Size::new(80, 24)));
//!
//! let mut root = Sizer::vertical();
//! root.add_widget(&mut store, list, SizerFlags::new(1).expand().border_all())?;
//! root.add_widget(&mut store, ok, SizerFlags::new(0).right().border_all())?;
//! root.fit(&mut store, window)?;
//! ```
//!
//! # Crates
//!
//! - `trellis-core`: geometry, identifiers, errors and logging helpers
//! - `trellis`: the sizers themselves (this crate)

pub mod prelude;
pub mod sizer;
pub mod widget;

pub use trellis_core::{LayoutError, PerfSpan, Point, Rect, Result, SizerId, Size, WidgetId, logging};

pub use sizer::{
    BoxSizer, FlexDirection, FlexGridSizer, GridBagCell, GridBagSizer, GridSizer, ItemKind,
    LayoutSuspension, NonFlexibleGrowMode, Orientation, Sizer, SizerFactory, SizerFlag, SizerFlags,
    SizerItem, SizerKind, WrapFlags, WrapSizer,
};
pub use widget::{Widget, WidgetAccess, WidgetStore};
