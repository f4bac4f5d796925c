//! Sizer-based layout.
//!
//! A [`Sizer`] owns an ordered list of [`SizerItem`]s and computes geometry
//! for them in two passes:
//!
//! 1. **`calc_min`** (bottom-up): every shown item reports its minimum
//!    (widget natural minimum, nested sizer minimum or spacer size, combined
//!    with the item's override and border), and the sizer kind aggregates
//!    them.
//! 2. **`recalc_sizes`** (top-down): the sizer kind splits the sizer's
//!    rectangle into one slot per shown item; widgets are moved into their
//!    slots and nested sizers recurse.
//!
//! [`Sizer::layout`] runs both passes on the current rectangle and
//! [`Sizer::set_dimension`] assigns a new rectangle first.
//!
//! # Sizer kinds
//!
//! - [`BoxSizer`]: single-axis stacking with proportional growth
//! - [`GridSizer`]: row-major table with per-column widths and per-row heights
//! - [`FlexGridSizer`]: grid with individually growable rows and columns
//! - [`GridBagSizer`]: explicit cell placement with row and column spans
//! - [`WrapSizer`]: box that wraps onto new lines when out of room
//!
//! # Ownership
//!
//! A sizer owns its nested sizers and spacers. It never owns widgets: they
//! are addressed by [`WidgetId`] through a [`WidgetAccess`] storage passed to
//! each call, and a widget records which sizer positions it so it cannot be
//! added to two sizers at once.
//!
//! # Example
//!
//! ```ignore
//! use trellis::prelude::*;
//!
//! let mut buttons = Sizer::horizontal();
//! buttons.add_stretch_spacer(1)?;
//! buttons.add_widget(&mut store, ok, SizerFlags::new(0).border_all())?;
//! buttons.add_widget(&mut store, cancel, SizerFlags::new(0).border_all())?;
//!
//! let mut root = Sizer::vertical();
//! root.add_widget(&mut store, editor, SizerFlags::new(1).expand())?;
//! root.add_sizer(buttons, SizerFlags::new(0).expand())?;
//! root.set_dimension(Rect::new(0, 0, 640, 480), &mut store);
//! ```

mod base;
mod box_sizer;
mod debug;
mod factory;
mod fitting;
mod flags;
mod flex_grid_sizer;
mod grid_bag_sizer;
mod grid_sizer;
mod invalidation;
mod item;
mod wrap_sizer;

#[cfg(test)]
pub(crate) mod test_support;

pub use box_sizer::{BoxSizer, Orientation};
pub use debug::{SizerTreeDebug, TreeFormatOptions, TreeStyle};
pub use factory::SizerFactory;
pub use flags::{DEFAULT_BORDER, SizerFlag, SizerFlags};
pub use flex_grid_sizer::{FlexDirection, FlexGridSizer, GrowableTracks, NonFlexibleGrowMode};
pub use grid_bag_sizer::{DEFAULT_EMPTY_CELL_SIZE, GridBagSizer, MAX_GRID_BAG_TRACKS};
pub use grid_sizer::GridSizer;
pub use invalidation::LayoutSuspension;
pub use item::{GridBagCell, ID_NONE, ItemKind, SizerItem, Spacer};
pub use wrap_sizer::{WrapFlags, WrapSizer};

use trellis_core::logging::span_names;
use trellis_core::{
    LayoutError, PerfSpan, Point, Rect, Result, SizerId, Size, WidgetId, trellis_debug,
    trellis_trace, trellis_warn,
};

use crate::widget::WidgetAccess;
use base::SizerBase;

/// The per-kind part of a sizer: aggregating minimums and splitting space.
///
/// Both passes work on the items' cached minimums, which [`Sizer`] refreshes
/// before calling `calc_min`.
pub(crate) trait Arrange {
    /// Aggregate the shown items' minimums into the sizer's minimum.
    fn calc_min(&mut self, items: &[SizerItem]) -> Size;

    /// Compute one slot per item inside `rect`; `None` leaves an item alone.
    fn arrange(&mut self, items: &[SizerItem], rect: Rect) -> Vec<Option<Rect>>;

    /// Validate adding `item` (or replacing the item at `replacing`).
    fn check_insert(&self, _items: &[SizerItem], _item: &SizerItem, _replacing: Option<usize>) -> Result<()> {
        Ok(())
    }

    /// Accept the owner's available extent along `orientation`.
    fn inform_first_direction(&mut self, _orientation: Orientation, _size: i32) -> bool {
        false
    }
}

/// The layout algorithm of a sizer.
#[derive(Debug, Clone)]
pub enum SizerKind {
    Box(BoxSizer),
    Grid(GridSizer),
    FlexGrid(FlexGridSizer),
    GridBag(GridBagSizer),
    Wrap(WrapSizer),
}

impl SizerKind {
    /// Short type name, used in logs and debug output.
    pub fn name(&self) -> &'static str {
        match self {
            SizerKind::Box(_) => "BoxSizer",
            SizerKind::Grid(_) => "GridSizer",
            SizerKind::FlexGrid(_) => "FlexGridSizer",
            SizerKind::GridBag(_) => "GridBagSizer",
            SizerKind::Wrap(_) => "WrapSizer",
        }
    }

    fn arranger(&mut self) -> &mut dyn Arrange {
        match self {
            SizerKind::Box(s) => s,
            SizerKind::Grid(s) => s,
            SizerKind::FlexGrid(s) => s,
            SizerKind::GridBag(s) => s,
            SizerKind::Wrap(s) => s,
        }
    }

    fn arranger_ref(&self) -> &dyn Arrange {
        match self {
            SizerKind::Box(s) => s,
            SizerKind::Grid(s) => s,
            SizerKind::FlexGrid(s) => s,
            SizerKind::GridBag(s) => s,
            SizerKind::Wrap(s) => s,
        }
    }
}

/// A layout container computing geometry for its items.
#[derive(Debug)]
pub struct Sizer {
    id: SizerId,
    base: SizerBase,
    kind: SizerKind,
}

impl Sizer {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Create an empty sizer of the given kind.
    pub fn new(kind: SizerKind) -> Self {
        Self {
            id: SizerId::next(),
            base: SizerBase::new(),
            kind,
        }
    }

    /// Create a box sizer.
    pub fn box_sizer(orientation: Orientation) -> Self {
        Self::new(SizerKind::Box(BoxSizer::new(orientation)))
    }

    /// Create a horizontal box sizer.
    pub fn horizontal() -> Self {
        Self::box_sizer(Orientation::Horizontal)
    }

    /// Create a vertical box sizer.
    pub fn vertical() -> Self {
        Self::box_sizer(Orientation::Vertical)
    }

    /// Create a grid sizer. At least one of `rows` and `cols` must be non-zero.
    pub fn grid(rows: usize, cols: usize, vgap: i32, hgap: i32) -> Result<Self> {
        Ok(Self::new(SizerKind::Grid(GridSizer::new(rows, cols, vgap, hgap)?)))
    }

    /// Create a flexible grid sizer. At least one of `rows` and `cols` must be non-zero.
    pub fn flex_grid(rows: usize, cols: usize, vgap: i32, hgap: i32) -> Result<Self> {
        Ok(Self::new(SizerKind::FlexGrid(FlexGridSizer::new(
            rows, cols, vgap, hgap,
        )?)))
    }

    /// Create a grid-bag sizer.
    pub fn grid_bag(vgap: i32, hgap: i32) -> Self {
        Self::new(SizerKind::GridBag(GridBagSizer::new(vgap, hgap)))
    }

    /// Create a wrap sizer.
    pub fn wrap(orientation: Orientation, flags: WrapFlags) -> Self {
        Self::new(SizerKind::Wrap(WrapSizer::new(orientation, flags)))
    }

    // =========================================================================
    // Identity & Kind
    // =========================================================================

    /// Process-unique identity of this sizer.
    #[inline]
    pub fn id(&self) -> SizerId {
        self.id
    }

    /// The layout algorithm.
    #[inline]
    pub fn kind(&self) -> &SizerKind {
        &self.kind
    }

    /// Main axis of a box or wrap sizer.
    pub fn orientation(&self) -> Option<Orientation> {
        match &self.kind {
            SizerKind::Box(s) => Some(s.orientation()),
            SizerKind::Wrap(s) => Some(s.orientation()),
            _ => None,
        }
    }

    pub fn as_box(&self) -> Option<&BoxSizer> {
        match &self.kind {
            SizerKind::Box(s) => Some(s),
            _ => None,
        }
    }

    /// Box settings, mutably. Marks the sizer as changed.
    pub fn as_box_mut(&mut self) -> Option<&mut BoxSizer> {
        let target = match &mut self.kind {
            SizerKind::Box(s) => s,
            _ => return None,
        };
        self.base.invalidate();
        Some(target)
    }

    /// Grid settings of a grid or flexible grid sizer.
    pub fn as_grid(&self) -> Option<&GridSizer> {
        match &self.kind {
            SizerKind::Grid(s) => Some(s),
            SizerKind::FlexGrid(s) => Some(s.grid()),
            _ => None,
        }
    }

    /// Grid settings, mutably. Marks the sizer as changed.
    pub fn as_grid_mut(&mut self) -> Option<&mut GridSizer> {
        let target = match &mut self.kind {
            SizerKind::Grid(s) => s,
            SizerKind::FlexGrid(s) => s.grid_mut(),
            _ => return None,
        };
        self.base.invalidate();
        Some(target)
    }

    pub fn as_flex_grid(&self) -> Option<&FlexGridSizer> {
        match &self.kind {
            SizerKind::FlexGrid(s) => Some(s),
            _ => None,
        }
    }

    /// Flexible grid settings, mutably. Marks the sizer as changed.
    pub fn as_flex_grid_mut(&mut self) -> Option<&mut FlexGridSizer> {
        let target = match &mut self.kind {
            SizerKind::FlexGrid(s) => s,
            _ => return None,
        };
        self.base.invalidate();
        Some(target)
    }

    pub fn as_grid_bag(&self) -> Option<&GridBagSizer> {
        match &self.kind {
            SizerKind::GridBag(s) => Some(s),
            _ => None,
        }
    }

    /// Grid-bag settings, mutably. Marks the sizer as changed.
    pub fn as_grid_bag_mut(&mut self) -> Option<&mut GridBagSizer> {
        let target = match &mut self.kind {
            SizerKind::GridBag(s) => s,
            _ => return None,
        };
        self.base.invalidate();
        Some(target)
    }

    pub fn as_wrap(&self) -> Option<&WrapSizer> {
        match &self.kind {
            SizerKind::Wrap(s) => Some(s),
            _ => None,
        }
    }

    /// Wrap settings, mutably. Marks the sizer as changed.
    pub fn as_wrap_mut(&mut self) -> Option<&mut WrapSizer> {
        let target = match &mut self.kind {
            SizerKind::Wrap(s) => s,
            _ => return None,
        };
        self.base.invalidate();
        Some(target)
    }

    /// Change a grid's row and column counts.
    ///
    /// Fails if both are 0, if the new shape cannot hold the current items,
    /// or if this is not a grid or flexible grid sizer.
    pub fn set_grid_dimensions(&mut self, rows: usize, cols: usize) -> Result<()> {
        let count = self.base.item_count();
        let id = self.id;
        let grid = match &mut self.kind {
            SizerKind::Grid(s) => s,
            SizerKind::FlexGrid(s) => s.grid_mut(),
            _ => return Err(LayoutError::InvalidGridDimensions),
        };
        if let Err(err) = grid.set_dimensions(rows, cols, count) {
            trellis_warn!(sizer = %id, rows, cols, count, %err, "grid resize rejected");
            return Err(err);
        }
        self.base.invalidate();
        Ok(())
    }

    /// Rows and columns in effect for a grid or flexible grid sizer.
    pub fn effective_grid_dims(&self) -> Option<(usize, usize)> {
        self.as_grid().map(|grid| grid.effective_dims(self.base.item_count()))
    }

    // =========================================================================
    // Adding Items
    // =========================================================================

    /// Insert a prepared item at `index`.
    ///
    /// Fails without changing anything if `index` is past the end, if the
    /// sizer kind rejects the item, or if a wrapped widget is unknown or
    /// already managed by a sizer.
    pub fn insert_item<S: WidgetAccess + ?Sized>(
        &mut self,
        storage: &mut S,
        index: usize,
        item: SizerItem,
    ) -> Result<&mut SizerItem> {
        self.check_insert(index, &item, None)?;
        if let Some(widget) = item.widget_id() {
            self.check_claimable(&*storage, widget)?;
            claim(storage, widget, self.id);
        }
        trellis_trace!(sizer = %self.id, index, "item inserted");
        self.base.insert(index, item)
    }

    /// Append a prepared item.
    pub fn add_item<S: WidgetAccess + ?Sized>(&mut self, storage: &mut S, item: SizerItem) -> Result<&mut SizerItem> {
        self.insert_item(storage, self.base.item_count(), item)
    }

    /// Prepend a prepared item.
    pub fn prepend_item<S: WidgetAccess + ?Sized>(&mut self, storage: &mut S, item: SizerItem) -> Result<&mut SizerItem> {
        self.insert_item(storage, 0, item)
    }

    /// Insert a widget at `index`.
    pub fn insert_widget<S: WidgetAccess + ?Sized>(
        &mut self,
        storage: &mut S,
        index: usize,
        widget: WidgetId,
        flags: SizerFlags,
    ) -> Result<&mut SizerItem> {
        self.insert_item(storage, index, SizerItem::widget(widget, flags))
    }

    /// Append a widget.
    pub fn add_widget<S: WidgetAccess + ?Sized>(
        &mut self,
        storage: &mut S,
        widget: WidgetId,
        flags: SizerFlags,
    ) -> Result<&mut SizerItem> {
        self.insert_widget(storage, self.base.item_count(), widget, flags)
    }

    /// Prepend a widget.
    pub fn prepend_widget<S: WidgetAccess + ?Sized>(
        &mut self,
        storage: &mut S,
        widget: WidgetId,
        flags: SizerFlags,
    ) -> Result<&mut SizerItem> {
        self.insert_widget(storage, 0, widget, flags)
    }

    /// Insert a nested sizer at `index`. The sizer is dropped on failure.
    pub fn insert_sizer(&mut self, index: usize, sizer: Sizer, flags: SizerFlags) -> Result<&mut SizerItem> {
        self.insert_owned(index, SizerItem::sizer(sizer, flags))
    }

    /// Append a nested sizer.
    pub fn add_sizer(&mut self, sizer: Sizer, flags: SizerFlags) -> Result<&mut SizerItem> {
        self.insert_sizer(self.base.item_count(), sizer, flags)
    }

    /// Prepend a nested sizer.
    pub fn prepend_sizer(&mut self, sizer: Sizer, flags: SizerFlags) -> Result<&mut SizerItem> {
        self.insert_sizer(0, sizer, flags)
    }

    /// Insert a `width x height` spacer at `index`.
    pub fn insert_space(&mut self, index: usize, width: i32, height: i32, flags: SizerFlags) -> Result<&mut SizerItem> {
        self.insert_owned(index, SizerItem::spacer(width, height, flags))
    }

    /// Append a `width x height` spacer.
    pub fn add_space(&mut self, width: i32, height: i32, flags: SizerFlags) -> Result<&mut SizerItem> {
        self.insert_space(self.base.item_count(), width, height, flags)
    }

    /// Prepend a `width x height` spacer.
    pub fn prepend_space(&mut self, width: i32, height: i32, flags: SizerFlags) -> Result<&mut SizerItem> {
        self.insert_space(0, width, height, flags)
    }

    /// Insert a fixed spacer of `size` along the main axis.
    ///
    /// Sizers without a main axis get a square spacer.
    pub fn insert_spacer(&mut self, index: usize, size: i32) -> Result<&mut SizerItem> {
        let (width, height) = match self.orientation() {
            Some(Orientation::Horizontal) => (size, 0),
            Some(Orientation::Vertical) => (0, size),
            None => (size, size),
        };
        self.insert_space(index, width, height, SizerFlags::new(0))
    }

    /// Append a fixed spacer of `size` along the main axis.
    pub fn add_spacer(&mut self, size: i32) -> Result<&mut SizerItem> {
        self.insert_spacer(self.base.item_count(), size)
    }

    /// Prepend a fixed spacer of `size` along the main axis.
    pub fn prepend_spacer(&mut self, size: i32) -> Result<&mut SizerItem> {
        self.insert_spacer(0, size)
    }

    /// Insert an empty spacer that only takes a share of extra space.
    pub fn insert_stretch_spacer(&mut self, index: usize, proportion: u32) -> Result<&mut SizerItem> {
        self.insert_space(index, 0, 0, SizerFlags::new(proportion))
    }

    /// Append a stretch spacer.
    pub fn add_stretch_spacer(&mut self, proportion: u32) -> Result<&mut SizerItem> {
        self.insert_stretch_spacer(self.base.item_count(), proportion)
    }

    /// Prepend a stretch spacer.
    pub fn prepend_stretch_spacer(&mut self, proportion: u32) -> Result<&mut SizerItem> {
        self.insert_stretch_spacer(0, proportion)
    }

    fn insert_owned(&mut self, index: usize, item: SizerItem) -> Result<&mut SizerItem> {
        self.check_insert(index, &item, None)?;
        self.base.insert(index, item)
    }

    fn push_owned(&mut self, item: SizerItem) -> Result<&mut SizerItem> {
        self.insert_owned(self.base.item_count(), item)
    }

    fn check_insert(&self, index: usize, item: &SizerItem, replacing: Option<usize>) -> Result<()> {
        match replacing {
            Some(replaced) => self.base.check_index(replaced)?,
            None => self.base.check_insert_index(index)?,
        }
        self.kind
            .arranger_ref()
            .check_insert(self.base.items(), item, replacing)
            .inspect_err(|err| {
                trellis_warn!(sizer = %self.id, kind = self.kind.name(), %err, "item rejected");
            })
    }

    fn check_claimable<S: WidgetAccess + ?Sized>(&self, storage: &S, widget: WidgetId) -> Result<()> {
        let Some(target) = storage.get_widget(widget) else {
            return Err(LayoutError::UnknownWidget(widget));
        };
        if let Some(owner) = target.containing_sizer() {
            trellis_warn!(sizer = %self.id, %owner, ?widget, "widget already managed by a sizer");
            return Err(LayoutError::WidgetAlreadyManaged(widget));
        }
        Ok(())
    }

    // =========================================================================
    // Removing & Replacing Items
    // =========================================================================

    /// Remove the item at `index`, destroying nested sizers and spacers.
    ///
    /// Widgets are never destroyed; they are only released.
    pub fn remove<S: WidgetAccess + ?Sized>(&mut self, storage: &mut S, index: usize) -> Result<()> {
        let item = self.base.remove(index)?;
        release_item(storage, item);
        Ok(())
    }

    /// Remove and destroy a directly nested sizer. Returns `false` if not found.
    pub fn remove_sizer<S: WidgetAccess + ?Sized>(&mut self, storage: &mut S, sizer: SizerId) -> bool {
        match self.index_of_sizer(sizer) {
            Some(index) => self.remove(storage, index).is_ok(),
            None => false,
        }
    }

    /// Remove the item at `index` and hand it back.
    ///
    /// A wrapped widget is released; a nested sizer is returned intact.
    pub fn detach<S: WidgetAccess + ?Sized>(&mut self, storage: &mut S, index: usize) -> Result<SizerItem> {
        let mut item = self.base.remove(index)?;
        if let Some(widget) = item.widget_id() {
            release(storage, widget);
        }
        item.set_held(false);
        Ok(item)
    }

    /// Stop managing a widget, searching nested sizers too.
    ///
    /// Returns `false` if the widget is not managed by this sizer tree.
    pub fn detach_widget<S: WidgetAccess + ?Sized>(&mut self, storage: &mut S, widget: WidgetId) -> bool {
        if let Some(index) = self.index_of_widget(widget) {
            return self.detach(storage, index).is_ok();
        }
        let Some(child) = self.child_with_widget(widget) else {
            return false;
        };
        let detached = child.detach_widget(storage, widget);
        self.base.invalidate();
        detached
    }

    /// Take a directly nested sizer out of this one.
    pub fn detach_sizer(&mut self, sizer: SizerId) -> Option<Sizer> {
        let index = self.index_of_sizer(sizer)?;
        match self.base.remove(index).ok()?.into_kind() {
            ItemKind::Sizer(mut sizer) => {
                sizer.hold_items(false);
                Some(*sizer)
            }
            _ => None,
        }
    }

    /// Put widget `new` in the slot of widget `old`.
    ///
    /// Returns `Ok(false)` if `old` is not found. Fails if `new` is unknown
    /// or already managed.
    pub fn replace_widget<S: WidgetAccess + ?Sized>(
        &mut self,
        storage: &mut S,
        old: WidgetId,
        new: WidgetId,
        recursive: bool,
    ) -> Result<bool> {
        if old == new {
            return Ok(self.find_widget(old, recursive).is_some());
        }
        if let Some(index) = self.index_of_widget(old) {
            self.check_claimable(&*storage, new)?;
            release(storage, old);
            claim(storage, new, self.id);
            if let ItemKind::Widget(slot) = self.base.items_mut()[index].kind_mut() {
                *slot = new;
            }
            self.base.invalidate();
            return Ok(true);
        }
        if !recursive {
            return Ok(false);
        }
        let Some(child) = self.child_with_widget(old) else {
            return Ok(false);
        };
        let replaced = child.replace_widget(storage, old, new, true)?;
        self.base.invalidate();
        Ok(replaced)
    }

    /// Put sizer `new` in the slot of the nested sizer `old`.
    ///
    /// Returns the replaced sizer, or hands `new` back in `Err` if `old` is
    /// not found. Widgets in the replaced sizer stay marked as managed until
    /// it is destroyed.
    pub fn replace_sizer(&mut self, old: SizerId, new: Sizer, recursive: bool) -> std::result::Result<Sizer, Sizer> {
        if let Some(index) = self.index_of_sizer(old) {
            let replaced = match self.base.items_mut()[index].kind_mut() {
                ItemKind::Sizer(slot) => std::mem::replace(slot.as_mut(), new),
                _ => return Err(new),
            };
            self.base.invalidate();
            return Ok(replaced);
        }
        if !recursive {
            return Err(new);
        }
        let Some(child) = self.child_with_sizer(old) else {
            return Err(new);
        };
        let replaced = child.replace_sizer(old, new, true);
        self.base.invalidate();
        replaced
    }

    /// Replace the item at `index`, returning the old item.
    pub fn replace_item<S: WidgetAccess + ?Sized>(
        &mut self,
        storage: &mut S,
        index: usize,
        item: SizerItem,
    ) -> Result<SizerItem> {
        self.check_insert(index, &item, Some(index))?;
        let old_widget = self.base.items()[index].widget_id();
        let new_widget = item.widget_id();
        if let Some(widget) = new_widget.filter(|&w| Some(w) != old_widget) {
            self.check_claimable(&*storage, widget)?;
        }
        let old = self.base.replace(index, item)?;
        if let Some(widget) = old_widget.filter(|&w| Some(w) != new_widget) {
            release(storage, widget);
        }
        if let Some(widget) = new_widget {
            claim(storage, widget, self.id);
        }
        Ok(old)
    }

    /// Remove every item, destroying nested sizers and spacers and
    /// releasing widgets.
    pub fn clear<S: WidgetAccess + ?Sized>(&mut self, storage: &mut S) {
        let items = self.base.take_all();
        trellis_debug!(sizer = %self.id, count = items.len(), "sizer cleared");
        for item in items {
            release_item(storage, item);
        }
    }

    /// Destroy the sizer, releasing every widget in its tree.
    ///
    /// Dropping a sizer without calling this leaves its widgets marked as
    /// managed.
    pub fn destroy<S: WidgetAccess + ?Sized>(mut self, storage: &mut S) {
        self.clear(storage);
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Get the number of items.
    #[inline]
    pub fn item_count(&self) -> usize {
        self.base.item_count()
    }

    /// Check if the sizer has no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.base.item_count() == 0
    }

    /// Get all items.
    #[inline]
    pub fn items(&self) -> &[SizerItem] {
        self.base.items()
    }

    /// Get the item at `index`.
    pub fn item(&self, index: usize) -> Result<&SizerItem> {
        self.base.check_index(index)?;
        Ok(&self.base.items()[index])
    }

    /// Get the item at `index` mutably. Marks the sizer as changed.
    pub fn item_mut(&mut self, index: usize) -> Result<&mut SizerItem> {
        self.base.check_index(index)?;
        self.base.invalidate();
        Ok(&mut self.base.items_mut()[index])
    }

    /// Index of the item wrapping `widget`, among direct items.
    pub fn index_of_widget(&self, widget: WidgetId) -> Option<usize> {
        self.base.items().iter().position(|item| item.widget_id() == Some(widget))
    }

    /// Index of the item wrapping the sizer `sizer`, among direct items.
    pub fn index_of_sizer(&self, sizer: SizerId) -> Option<usize> {
        self.base
            .items()
            .iter()
            .position(|item| item.as_sizer().is_some_and(|s| s.id == sizer))
    }

    /// The item wrapping `widget`.
    pub fn find_widget(&self, widget: WidgetId, recursive: bool) -> Option<&SizerItem> {
        self.find_item(&|item| item.widget_id() == Some(widget), recursive)
    }

    /// The item wrapping `widget`, mutably. Marks the sizer as changed.
    pub fn find_widget_mut(&mut self, widget: WidgetId, recursive: bool) -> Option<&mut SizerItem> {
        self.find_item_mut(&|item| item.widget_id() == Some(widget), recursive)
    }

    /// The item wrapping the sizer `sizer`.
    pub fn find_sizer(&self, sizer: SizerId, recursive: bool) -> Option<&SizerItem> {
        self.find_item(&|item| item.as_sizer().is_some_and(|s| s.id == sizer), recursive)
    }

    /// The item wrapping the sizer `sizer`, mutably. Marks the sizer as changed.
    pub fn find_sizer_mut(&mut self, sizer: SizerId, recursive: bool) -> Option<&mut SizerItem> {
        self.find_item_mut(&|item| item.as_sizer().is_some_and(|s| s.id == sizer), recursive)
    }

    /// The first item with user id `id`.
    pub fn item_by_id(&self, id: i32, recursive: bool) -> Option<&SizerItem> {
        self.find_item(&|item| item.id() == Some(id), recursive)
    }

    /// The first item with user id `id`, mutably. Marks the sizer as changed.
    pub fn item_by_id_mut(&mut self, id: i32, recursive: bool) -> Option<&mut SizerItem> {
        self.find_item_mut(&|item| item.id() == Some(id), recursive)
    }

    fn find_item(&self, matches: &dyn Fn(&SizerItem) -> bool, recursive: bool) -> Option<&SizerItem> {
        let items = self.base.items();
        if let Some(found) = items.iter().find(|item| matches(item)) {
            return Some(found);
        }
        if !recursive {
            return None;
        }
        items
            .iter()
            .filter_map(SizerItem::as_sizer)
            .find_map(|child| child.find_item(matches, true))
    }

    fn find_item_mut(&mut self, matches: &dyn Fn(&SizerItem) -> bool, recursive: bool) -> Option<&mut SizerItem> {
        self.base.invalidate();
        if let Some(index) = self.base.items().iter().position(|item| matches(item)) {
            return self.base.items_mut().get_mut(index);
        }
        if !recursive {
            return None;
        }
        self.base
            .items_mut()
            .iter_mut()
            .filter_map(SizerItem::as_sizer_mut)
            .find_map(|child| child.find_item_mut(matches, true))
    }

    /// The nested sizer whose tree manages `widget`.
    fn child_with_widget(&mut self, widget: WidgetId) -> Option<&mut Sizer> {
        self.base
            .items_mut()
            .iter_mut()
            .filter_map(SizerItem::as_sizer_mut)
            .find(|child| child.find_widget(widget, true).is_some())
    }

    /// The nested sizer whose tree holds the sizer `sizer`.
    fn child_with_sizer(&mut self, sizer: SizerId) -> Option<&mut Sizer> {
        self.base
            .items_mut()
            .iter_mut()
            .filter_map(SizerItem::as_sizer_mut)
            .find(|child| child.find_sizer(sizer, true).is_some())
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// Show or hide the item wrapping `widget`.
    ///
    /// Returns `false` if the widget is not found.
    pub fn show_widget<S: WidgetAccess + ?Sized>(
        &mut self,
        storage: &mut S,
        widget: WidgetId,
        show: bool,
        recursive: bool,
    ) -> bool {
        if let Some(index) = self.index_of_widget(widget) {
            self.base.items_mut()[index].show(storage, show);
            self.base.invalidate();
            return true;
        }
        if !recursive {
            return false;
        }
        let Some(child) = self.child_with_widget(widget) else {
            return false;
        };
        let found = child.show_widget(storage, widget, show, true);
        self.base.invalidate();
        found
    }

    /// Hide the item wrapping `widget`.
    pub fn hide_widget<S: WidgetAccess + ?Sized>(&mut self, storage: &mut S, widget: WidgetId, recursive: bool) -> bool {
        self.show_widget(storage, widget, false, recursive)
    }

    /// Show or hide the item wrapping the nested sizer `sizer`.
    pub fn show_sizer<S: WidgetAccess + ?Sized>(
        &mut self,
        storage: &mut S,
        sizer: SizerId,
        show: bool,
        recursive: bool,
    ) -> bool {
        if let Some(index) = self.index_of_sizer(sizer) {
            self.base.items_mut()[index].show(storage, show);
            self.base.invalidate();
            return true;
        }
        if !recursive {
            return false;
        }
        let Some(child) = self.child_with_sizer(sizer) else {
            return false;
        };
        let found = child.show_sizer(storage, sizer, show, true);
        self.base.invalidate();
        found
    }

    /// Hide the item wrapping the nested sizer `sizer`.
    pub fn hide_sizer<S: WidgetAccess + ?Sized>(&mut self, storage: &mut S, sizer: SizerId, recursive: bool) -> bool {
        self.show_sizer(storage, sizer, false, recursive)
    }

    /// Show or hide the item at `index`.
    pub fn show_index<S: WidgetAccess + ?Sized>(&mut self, storage: &mut S, index: usize, show: bool) -> Result<()> {
        self.base.check_index(index)?;
        self.base.items_mut()[index].show(storage, show);
        self.base.invalidate();
        Ok(())
    }

    /// Hide the item at `index`.
    pub fn hide_index<S: WidgetAccess + ?Sized>(&mut self, storage: &mut S, index: usize) -> Result<()> {
        self.show_index(storage, index, false)
    }

    /// Whether the item wrapping `widget` is shown, searching nested sizers.
    pub fn is_widget_shown(&self, widget: WidgetId) -> Option<bool> {
        self.find_widget(widget, true).map(SizerItem::is_shown)
    }

    /// Whether the item wrapping the sizer `sizer` is shown, searching nested sizers.
    pub fn is_sizer_shown(&self, sizer: SizerId) -> Option<bool> {
        self.find_sizer(sizer, true).map(SizerItem::is_shown)
    }

    /// Whether the item at `index` is shown.
    pub fn is_shown_index(&self, index: usize) -> Result<bool> {
        self.item(index).map(SizerItem::is_shown)
    }

    /// Show or hide every item.
    pub fn show_items<S: WidgetAccess + ?Sized>(&mut self, storage: &mut S, show: bool) {
        for item in self.base.items_mut() {
            item.show(storage, show);
        }
        self.base.invalidate();
    }

    /// Keep hidden items in layout while an enclosing reserved item is hidden.
    pub(crate) fn hold_items(&mut self, held: bool) {
        for item in self.base.items_mut() {
            item.set_held(held);
        }
        self.base.invalidate();
    }

    /// Whether at least one item is shown. False for an empty sizer.
    pub fn are_any_items_shown(&self) -> bool {
        self.base.items().iter().any(SizerItem::is_shown)
    }

    // =========================================================================
    // Sizing
    // =========================================================================

    /// Compute the minimum size from the items, ignoring the explicit floor.
    pub fn calc_min<S: WidgetAccess + ?Sized>(&mut self, storage: &S) -> Size {
        for item in self.base.items_mut() {
            if item.occupies_slot() {
                item.calc_min(storage);
            }
        }
        let min = self.kind.arranger().calc_min(self.base.items());
        self.base.set_calc_min(min);
        min
    }

    /// The minimum size: computed minimum combined with the explicit floor.
    pub fn min_size<S: WidgetAccess + ?Sized>(&mut self, storage: &S) -> Size {
        self.calc_min(storage).max(self.base.min_size())
    }

    /// The minimum size from the last computation, without recomputing.
    pub fn last_min_size(&self) -> Size {
        self.base.calc_min().max(self.base.min_size())
    }

    /// The explicit minimum size floor.
    #[inline]
    pub fn explicit_min_size(&self) -> Size {
        self.base.min_size()
    }

    /// Set the explicit minimum size floor.
    pub fn set_min_size(&mut self, size: Size) {
        self.base.set_min_size(size);
    }

    /// Set the minimum size override of the item at `index`.
    pub fn set_item_min_size_at(&mut self, index: usize, size: Size) -> Result<()> {
        self.item_mut(index)?.set_min_size(size);
        Ok(())
    }

    /// Set the minimum size override of the item wrapping `widget`,
    /// searching nested sizers. Returns `false` if not found.
    pub fn set_widget_min_size(&mut self, widget: WidgetId, size: Size) -> bool {
        self.find_widget_mut(widget, true)
            .map(|item| item.set_min_size(size))
            .is_some()
    }

    /// Set the explicit minimum of the nested sizer `sizer`, searching
    /// nested sizers. Returns `false` if not found.
    pub fn set_sizer_min_size(&mut self, sizer: SizerId, size: Size) -> bool {
        self.find_sizer_mut(sizer, true)
            .map(|item| item.set_min_size(size))
            .is_some()
    }

    /// Geometry from the last layout.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.base.rect()
    }

    /// Size from the last layout.
    #[inline]
    pub fn size(&self) -> Size {
        self.base.rect().size
    }

    /// Position from the last layout.
    #[inline]
    pub fn position(&self) -> Point {
        self.base.rect().origin
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Recompute the minimum and lay out the items in the current rectangle.
    ///
    /// While layout is suspended this only records that a layout is due.
    pub fn layout<S: WidgetAccess + ?Sized>(&mut self, storage: &mut S) {
        if self.base.is_suspended() {
            self.base.defer_layout();
            tracing::debug!(
                target: trellis_core::logging::targets::SUSPEND,
                sizer = %self.id,
                depth = self.base.suspend_depth(),
                "layout deferred"
            );
            return;
        }

        let _span = PerfSpan::new(span_names::LAYOUT);
        let min = self.min_size(&*storage);
        trellis_debug!(
            sizer = %self.id,
            kind = self.kind.name(),
            rect = ?self.base.rect(),
            ?min,
            items = self.base.item_count(),
            "layout"
        );
        self.recalc_sizes(storage);
        self.base.mark_valid();
    }

    /// Distribute the current rectangle among the items using their cached
    /// minimums.
    pub fn recalc_sizes<S: WidgetAccess + ?Sized>(&mut self, storage: &mut S) {
        let rect = self.base.rect();
        let slots = self.kind.arranger().arrange(self.base.items(), rect);
        for (item, slot) in self.base.items_mut().iter_mut().zip(slots) {
            if let Some(slot) = slot {
                item.set_dimension(slot, storage);
            }
        }
    }

    /// Assign the sizer's rectangle and lay out.
    pub fn set_dimension<S: WidgetAccess + ?Sized>(&mut self, rect: Rect, storage: &mut S) {
        self.base
            .set_rect(Rect::from_origin_size(rect.origin, rect.size.non_negative()));
        self.layout(storage);
    }

    /// Position a nested sizer within its parent's pass.
    pub(crate) fn place<S: WidgetAccess + ?Sized>(&mut self, rect: Rect, storage: &mut S) {
        self.base.set_rect(rect);
        self.recalc_sizes(storage);
        self.base.mark_valid();
    }

    /// Tell the sizer how much room it has along `orientation` before the
    /// next `calc_min`.
    ///
    /// Only wrap sizers use this; they return `true` when they accept it.
    pub fn inform_first_direction(&mut self, orientation: Orientation, size: i32) -> bool {
        let accepted = self.kind.arranger().inform_first_direction(orientation, size);
        if accepted {
            self.base.invalidate();
        }
        accepted
    }

    /// Whether the sizer changed since its last layout.
    #[inline]
    pub fn needs_layout(&self) -> bool {
        self.base.is_dirty()
    }
}

fn claim<S: WidgetAccess + ?Sized>(storage: &mut S, widget: WidgetId, owner: SizerId) {
    if let Some(target) = storage.get_widget_mut(widget) {
        target.set_containing_sizer(Some(owner));
    }
}

fn release<S: WidgetAccess + ?Sized>(storage: &mut S, widget: WidgetId) {
    if let Some(target) = storage.get_widget_mut(widget) {
        target.set_containing_sizer(None);
    }
}

/// Dispose of a removed item: release widgets, destroy owned content.
fn release_item<S: WidgetAccess + ?Sized>(storage: &mut S, item: SizerItem) {
    match item.into_kind() {
        ItemKind::Widget(widget) => release(storage, widget),
        ItemKind::Sizer(sizer) => sizer.destroy(storage),
        ItemKind::Spacer(_) => {}
    }
}

static_assertions::assert_impl_all!(Sizer: Send, Sync);
static_assertions::assert_impl_all!(SizerItem: Send, Sync);
static_assertions::assert_impl_all!(SizerFlags: Send, Sync, Copy);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sizer::test_support::{MockWidget, geometry_of, store_with};
    use crate::widget::WidgetStore;

    fn owner(store: &WidgetStore<MockWidget>, id: WidgetId) -> Option<SizerId> {
        store.get(id).and_then(|w| w.sizer)
    }

    #[test]
    fn test_add_marks_widget_managed() {
        let (mut store, ids) = store_with(&[Size::new(10, 10)]);
        let mut sizer = Sizer::vertical();
        sizer.add_widget(&mut store, ids[0], SizerFlags::new(0)).unwrap();
        assert_eq!(owner(&store, ids[0]), Some(sizer.id()));

        let mut other = Sizer::vertical();
        let err = other.add_widget(&mut store, ids[0], SizerFlags::new(0)).unwrap_err();
        assert_eq!(err, LayoutError::WidgetAlreadyManaged(ids[0]));
        assert!(other.is_empty());
    }

    #[test]
    fn test_unknown_widget_rejected() {
        let (mut store, ids) = store_with(&[Size::new(10, 10)]);
        store.remove(ids[0]);
        let mut sizer = Sizer::vertical();
        let err = sizer.add_widget(&mut store, ids[0], SizerFlags::new(0)).unwrap_err();
        assert_eq!(err, LayoutError::UnknownWidget(ids[0]));
    }

    #[test]
    fn test_insert_out_of_range_is_atomic() {
        let (mut store, ids) = store_with(&[Size::new(10, 10)]);
        let mut sizer = Sizer::vertical();
        let err = sizer.insert_widget(&mut store, 1, ids[0], SizerFlags::new(0)).unwrap_err();
        assert_eq!(err, LayoutError::IndexOutOfRange { index: 1, count: 0 });
        assert_eq!(owner(&store, ids[0]), None);
        assert!(sizer.item(0).is_err());
        assert!(sizer.remove(&mut store, 0).is_err());
    }

    #[test]
    fn test_insert_and_prepend_order() {
        let (mut store, ids) = store_with(&[Size::new(10, 10); 3]);
        let mut sizer = Sizer::horizontal();
        sizer.add_widget(&mut store, ids[1], SizerFlags::new(0)).unwrap();
        sizer.prepend_widget(&mut store, ids[0], SizerFlags::new(0)).unwrap();
        sizer.insert_widget(&mut store, 2, ids[2], SizerFlags::new(0)).unwrap();

        let order: Vec<_> = sizer.items().iter().filter_map(SizerItem::widget_id).collect();
        assert_eq!(order, ids);
    }

    #[test]
    fn test_detach_releases_without_destroying() {
        let (mut store, ids) = store_with(&[Size::new(10, 10)]);
        let mut sizer = Sizer::vertical();
        sizer.add_widget(&mut store, ids[0], SizerFlags::new(0)).unwrap();

        assert!(sizer.detach_widget(&mut store, ids[0]));
        assert!(!sizer.detach_widget(&mut store, ids[0]));
        assert!(store.contains(ids[0]));
        assert_eq!(owner(&store, ids[0]), None);
    }

    #[test]
    fn test_detach_widget_searches_nested() {
        let (mut store, ids) = store_with(&[Size::new(10, 10)]);
        let mut inner = Sizer::horizontal();
        inner.add_widget(&mut store, ids[0], SizerFlags::new(0)).unwrap();
        let mut outer = Sizer::vertical();
        outer.add_sizer(inner, SizerFlags::new(0)).unwrap();

        assert!(outer.detach_widget(&mut store, ids[0]));
        assert!(outer.find_widget(ids[0], true).is_none());
    }

    #[test]
    fn test_detach_and_remove_sizer() {
        let (mut store, ids) = store_with(&[Size::new(10, 10)]);
        let mut inner = Sizer::horizontal();
        inner.add_widget(&mut store, ids[0], SizerFlags::new(0)).unwrap();
        let inner_id = inner.id();

        let mut outer = Sizer::vertical();
        outer.add_sizer(inner, SizerFlags::new(0)).unwrap();
        let detached = outer.detach_sizer(inner_id).expect("nested sizer");
        assert_eq!(detached.item_count(), 1);
        assert_eq!(owner(&store, ids[0]), Some(inner_id));

        outer.add_sizer(detached, SizerFlags::new(0)).unwrap();
        assert!(outer.remove_sizer(&mut store, inner_id));
        assert!(outer.is_empty());
        assert_eq!(owner(&store, ids[0]), None);
        assert!(!outer.remove_sizer(&mut store, inner_id));
    }

    #[test]
    fn test_replace_widget() {
        let (mut store, ids) = store_with(&[Size::new(10, 10), Size::new(20, 20), Size::new(5, 5)]);
        let mut inner = Sizer::horizontal();
        inner.add_widget(&mut store, ids[0], SizerFlags::new(0)).unwrap();
        let inner_id = inner.id();
        let mut outer = Sizer::vertical();
        outer.add_sizer(inner, SizerFlags::new(0)).unwrap();

        assert_eq!(outer.replace_widget(&mut store, ids[0], ids[1], false), Ok(false));
        assert_eq!(outer.replace_widget(&mut store, ids[0], ids[1], true), Ok(true));
        assert_eq!(owner(&store, ids[0]), None);
        assert_eq!(owner(&store, ids[1]), Some(inner_id));

        outer.add_widget(&mut store, ids[2], SizerFlags::new(0)).unwrap();
        let err = outer.replace_widget(&mut store, ids[1], ids[2], true).unwrap_err();
        assert_eq!(err, LayoutError::WidgetAlreadyManaged(ids[2]));
    }

    #[test]
    fn test_replace_sizer() {
        let inner = Sizer::horizontal();
        let inner_id = inner.id();
        let mut middle = Sizer::vertical();
        middle.add_sizer(inner, SizerFlags::new(0)).unwrap();
        let mut outer = Sizer::vertical();
        outer.add_sizer(middle, SizerFlags::new(0)).unwrap();

        let replacement = Sizer::grid_bag(0, 0);
        let replacement_id = replacement.id();
        let back = outer.replace_sizer(inner_id, replacement, false).unwrap_err();
        assert_eq!(back.id(), replacement_id);

        let old = outer.replace_sizer(inner_id, back, true).expect("found nested");
        assert_eq!(old.id(), inner_id);
        assert!(outer.find_sizer(replacement_id, true).is_some());
        assert!(outer.find_sizer(inner_id, true).is_none());
    }

    #[test]
    fn test_replace_item() {
        let (mut store, ids) = store_with(&[Size::new(10, 10), Size::new(20, 20)]);
        let mut sizer = Sizer::vertical();
        sizer.add_widget(&mut store, ids[0], SizerFlags::new(0)).unwrap();

        let old = sizer
            .replace_item(&mut store, 0, SizerItem::widget(ids[1], SizerFlags::new(1)))
            .unwrap();
        assert_eq!(old.widget_id(), Some(ids[0]));
        assert_eq!(owner(&store, ids[0]), None);
        assert_eq!(owner(&store, ids[1]), Some(sizer.id()));
        assert!(sizer.replace_item(&mut store, 3, SizerItem::spacer(1, 1, SizerFlags::new(0))).is_err());
    }

    #[test]
    fn test_item_by_id_recursive() {
        let mut inner = Sizer::horizontal();
        inner.add_spacer(5).unwrap().set_id(7);
        let mut outer = Sizer::vertical();
        outer.add_sizer(inner, SizerFlags::new(0)).unwrap();

        assert!(outer.item_by_id(7, false).is_none());
        let found = outer.item_by_id(7, true).and_then(SizerItem::spacer_size);
        assert_eq!(found, Some(Size::new(5, 0)));
    }

    #[test]
    fn test_hide_and_show_widget() {
        let (mut store, ids) = store_with(&[Size::new(10, 10), Size::new(20, 20)]);
        let mut sizer = Sizer::vertical();
        sizer.add_widget(&mut store, ids[0], SizerFlags::new(0)).unwrap();
        sizer.add_widget(&mut store, ids[1], SizerFlags::new(0)).unwrap();
        let before = sizer.calc_min(&store);

        assert!(sizer.hide_widget(&mut store, ids[1], false));
        assert_eq!(sizer.is_widget_shown(ids[1]), Some(false));
        assert_eq!(store.get(ids[1]).map(|w| w.visible), Some(false));
        assert_eq!(sizer.calc_min(&store), Size::new(10, 10));

        assert!(sizer.show_widget(&mut store, ids[1], true, false));
        assert_eq!(sizer.calc_min(&store), before);
    }

    #[test]
    fn test_nested_sizer_shown_while_any_item_shown() {
        let (mut store, ids) = store_with(&[Size::new(10, 10), Size::new(10, 10)]);
        let mut inner = Sizer::horizontal();
        inner.add_widget(&mut store, ids[0], SizerFlags::new(0)).unwrap();
        inner.add_widget(&mut store, ids[1], SizerFlags::new(0)).unwrap();
        let inner_id = inner.id();
        let mut outer = Sizer::vertical();
        outer.add_sizer(inner, SizerFlags::new(0)).unwrap();
        outer.add_sizer(Sizer::horizontal(), SizerFlags::new(0)).unwrap();

        outer.hide_widget(&mut store, ids[0], true);
        assert_eq!(outer.is_sizer_shown(inner_id), Some(true));
        outer.hide_widget(&mut store, ids[1], true);
        assert_eq!(outer.is_sizer_shown(inner_id), Some(false));
        assert_eq!(outer.is_shown_index(1), Ok(false));
        assert!(!outer.are_any_items_shown());

        assert!(outer.show_sizer(&mut store, inner_id, true, false));
        assert_eq!(store.get(ids[0]).map(|w| w.visible), Some(true));
        assert_eq!(store.get(ids[1]).map(|w| w.visible), Some(true));
    }

    #[test]
    fn test_show_index() {
        let (mut store, ids) = store_with(&[Size::new(10, 10)]);
        let mut sizer = Sizer::vertical();
        sizer.add_widget(&mut store, ids[0], SizerFlags::new(0)).unwrap();
        sizer.hide_index(&mut store, 0).unwrap();
        assert_eq!(sizer.is_shown_index(0), Ok(false));
        assert!(sizer.show_index(&mut store, 4, true).is_err());
    }

    #[test]
    fn test_min_size_floor() {
        let (mut store, ids) = store_with(&[Size::new(10, 10)]);
        let mut sizer = Sizer::vertical();
        sizer.add_widget(&mut store, ids[0], SizerFlags::new(0)).unwrap();
        sizer.set_min_size(Size::new(50, 5));

        assert_eq!(sizer.calc_min(&store), Size::new(10, 10));
        assert_eq!(sizer.min_size(&store), Size::new(50, 10));
        assert_eq!(sizer.last_min_size(), Size::new(50, 10));
    }

    #[test]
    fn test_set_item_min_size_targets() {
        let (mut store, ids) = store_with(&[Size::new(10, 10), Size::new(10, 10)]);
        let mut inner = Sizer::horizontal();
        inner.add_widget(&mut store, ids[1], SizerFlags::new(0)).unwrap();
        let inner_id = inner.id();
        let mut outer = Sizer::vertical();
        outer.add_widget(&mut store, ids[0], SizerFlags::new(0)).unwrap();
        outer.add_sizer(inner, SizerFlags::new(0)).unwrap();

        outer.set_item_min_size_at(0, Size::new(30, 10)).unwrap();
        assert!(outer.set_widget_min_size(ids[1], Size::new(10, 25)));
        assert_eq!(outer.calc_min(&store), Size::new(30, 35));

        assert!(outer.set_sizer_min_size(inner_id, Size::new(40, 0)));
        assert_eq!(outer.calc_min(&store), Size::new(40, 35));
        assert!(outer.set_item_min_size_at(5, Size::ZERO).is_err());
    }

    #[test]
    fn test_layout_uses_current_rect() {
        let (mut store, ids) = store_with(&[Size::new(10, 10)]);
        let mut sizer = Sizer::vertical();
        sizer.add_widget(&mut store, ids[0], SizerFlags::new(1).expand()).unwrap();
        sizer.set_dimension(Rect::new(5, 5, 50, 50), &mut store);
        assert_eq!(sizer.position(), Point::new(5, 5));
        assert_eq!(sizer.size(), Size::new(50, 50));
        assert!(!sizer.needs_layout());

        sizer.set_widget_min_size(ids[0], Size::new(20, 20));
        assert!(sizer.needs_layout());
        sizer.layout(&mut store);
        assert_eq!(geometry_of(&store, ids[0]), Rect::new(5, 5, 50, 50));
    }

    #[test]
    fn test_settings_access_marks_only_matching_kind() {
        let mut store: WidgetStore<MockWidget> = WidgetStore::new();
        let mut sizer = Sizer::vertical();
        sizer.set_dimension(Rect::new(0, 0, 10, 10), &mut store);
        assert!(!sizer.needs_layout());

        assert!(sizer.as_grid_mut().is_none());
        assert!(sizer.as_flex_grid_mut().is_none());
        assert!(sizer.as_grid_bag_mut().is_none());
        assert!(sizer.as_wrap_mut().is_none());
        assert!(!sizer.needs_layout());

        assert!(sizer.as_box_mut().is_some());
        assert!(sizer.needs_layout());
    }

    #[test]
    fn test_clear_destroys_owned_items() {
        let (mut store, ids) = store_with(&[Size::new(10, 10), Size::new(10, 10)]);
        let mut inner = Sizer::horizontal();
        inner.add_widget(&mut store, ids[1], SizerFlags::new(0)).unwrap();
        let mut sizer = Sizer::vertical();
        sizer.add_widget(&mut store, ids[0], SizerFlags::new(0)).unwrap();
        sizer.add_sizer(inner, SizerFlags::new(0)).unwrap();
        sizer.add_spacer(4).unwrap();

        sizer.clear(&mut store);
        assert!(sizer.is_empty());
        assert_eq!(owner(&store, ids[0]), None);
        assert_eq!(owner(&store, ids[1]), None);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_spacer_orientation() {
        let mut row = Sizer::horizontal();
        assert_eq!(row.add_spacer(8).unwrap().spacer_size(), Some(Size::new(8, 0)));
        let mut column = Sizer::vertical();
        assert_eq!(column.add_spacer(8).unwrap().spacer_size(), Some(Size::new(0, 8)));
        let mut grid = Sizer::grid(0, 2, 0, 0).unwrap();
        assert_eq!(grid.add_spacer(8).unwrap().spacer_size(), Some(Size::new(8, 8)));
    }

    #[test]
    fn test_layout_under_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter("trellis=trace")
            .with_test_writer()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let (mut store, ids) = store_with(&[Size::new(10, 10)]);
            let mut grid = Sizer::grid(1, 1, 0, 0).unwrap();
            grid.add_widget(&mut store, ids[0], SizerFlags::new(0)).unwrap();
            let err = grid.add_spacer(3).unwrap_err();
            assert_eq!(err, LayoutError::GridCapacityExceeded { rows: 1, cols: 1, count: 2 });
            grid.set_dimension(Rect::new(0, 0, 20, 20), &mut store);
            assert_eq!(geometry_of(&store, ids[0]), Rect::new(0, 0, 10, 10));
        });
    }

    #[test]
    fn test_sizer_ids_are_unique() {
        let a = Sizer::vertical();
        let b = Sizer::vertical();
        assert_ne!(a.id(), b.id());
        assert_eq!(a.kind().name(), "BoxSizer");
    }
}
