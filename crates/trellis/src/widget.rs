//! The widget contract consumed by sizers.
//!
//! Sizers never own widgets. They refer to them by [`WidgetId`] and reach
//! them through a [`WidgetAccess`] storage that the host toolkit provides
//! for the duration of each call.
//!
//! # Related Types
//!
//! - [`crate::Sizer`] - Positions widgets through this contract
//! - [`WidgetStore`] - A ready-made slotmap-backed storage

use slotmap::SlotMap;
use trellis_core::{Rect, SizerId, Size, WidgetId};

/// What a sizer needs from a widget.
///
/// Only the first group of methods is required. The fitting helpers
/// ([`crate::Sizer::fit`] and friends) use the defaulted ones; a toolkit
/// without window decorations or display bounds can ignore them.
pub trait Widget {
    /// The smallest size at which the widget can still show its content.
    fn natural_min_size(&self) -> Size;

    /// Upper bound on the widget's size, if constrained.
    fn max_size(&self) -> Option<Size> {
        None
    }

    /// Current geometry in the parent's coordinate space.
    fn geometry(&self) -> Rect;

    /// Move and resize the widget.
    ///
    /// Called by sizers only; a widget managed by a sizer must not change
    /// its own geometry.
    fn set_geometry(&mut self, rect: Rect);

    /// Whether the widget is visible.
    fn is_visible(&self) -> bool;

    /// Show or hide the widget.
    fn set_visible(&mut self, visible: bool);

    /// The sizer currently positioning this widget.
    fn containing_sizer(&self) -> Option<SizerId>;

    /// Record which sizer positions this widget.
    fn set_containing_sizer(&mut self, sizer: Option<SizerId>);

    // =========================================================================
    // Fitting
    // =========================================================================

    /// Difference between the widget's outer size and its client area
    /// (title bar, frame, scrollbars).
    fn decoration_size(&self) -> Size {
        Size::ZERO
    }

    /// Usable area of the display the widget lives on.
    fn display_area(&self) -> Option<Size> {
        None
    }

    /// Store a minimum size hint for the widget's outer size.
    fn set_min_size_hint(&mut self, _size: Size) {}

    /// Set the scrollable virtual size of the widget's client area.
    fn set_virtual_size(&mut self, _size: Size) {}
}

/// Trait for accessing widgets by id.
///
/// Sizers receive an implementation of this on every call that needs to
/// read or write widget state.
pub trait WidgetAccess {
    /// Get an immutable reference to a widget by its ID.
    fn get_widget(&self, id: WidgetId) -> Option<&dyn Widget>;

    /// Get a mutable reference to a widget by its ID.
    fn get_widget_mut(&mut self, id: WidgetId) -> Option<&mut dyn Widget>;
}

/// A slotmap-backed widget storage.
///
/// Hosts with their own widget tree implement [`WidgetAccess`] directly;
/// this type covers the common case of a flat arena of one widget type.
#[derive(Debug)]
pub struct WidgetStore<W> {
    widgets: SlotMap<WidgetId, W>,
}

impl<W: Widget> WidgetStore<W> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            widgets: SlotMap::with_key(),
        }
    }

    /// Insert a widget and return its handle.
    pub fn insert(&mut self, widget: W) -> WidgetId {
        self.widgets.insert(widget)
    }

    /// Remove a widget.
    ///
    /// Sizers still referring to the id skip it from then on.
    pub fn remove(&mut self, id: WidgetId) -> Option<W> {
        self.widgets.remove(id)
    }

    /// Get a widget by id.
    pub fn get(&self, id: WidgetId) -> Option<&W> {
        self.widgets.get(id)
    }

    /// Get a widget mutably by id.
    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut W> {
        self.widgets.get_mut(id)
    }

    /// Check whether the store holds a widget with this id.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(id)
    }

    /// Number of widgets in the store.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Iterate over all widgets.
    pub fn iter(&self) -> impl Iterator<Item = (WidgetId, &W)> {
        self.widgets.iter()
    }
}

impl<W: Widget> Default for WidgetStore<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Widget> WidgetAccess for WidgetStore<W> {
    fn get_widget(&self, id: WidgetId) -> Option<&dyn Widget> {
        self.widgets.get(id).map(|w| w as &dyn Widget)
    }

    fn get_widget_mut(&mut self, id: WidgetId) -> Option<&mut dyn Widget> {
        self.widgets.get_mut(id).map(|w| w as &mut dyn Widget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sizer::test_support::MockWidget;

    #[test]
    fn test_store_insert_remove() {
        let mut store = WidgetStore::new();
        let id = store.insert(MockWidget::new(Size::new(10, 10)));
        assert!(store.contains(id));
        assert_eq!(store.len(), 1);

        assert!(store.get_widget(id).is_some());
        store.remove(id);
        assert!(store.get_widget(id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_access_through_trait() {
        let mut store = WidgetStore::new();
        let id = store.insert(MockWidget::new(Size::new(10, 10)));

        let access: &mut dyn WidgetAccess = &mut store;
        let widget = access.get_widget_mut(id).expect("widget exists");
        widget.set_geometry(Rect::new(1, 2, 3, 4));

        assert_eq!(store.get(id).map(|w| w.geometry()), Some(Rect::new(1, 2, 3, 4)));
    }
}
