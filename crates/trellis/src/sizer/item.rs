//! Sizer items.
//!
//! A [`SizerItem`] wraps exactly one of a widget reference, a nested sizer
//! or a spacer, together with its placement parameters.

use trellis_core::{Point, Rect, Size, WidgetId};

use super::Sizer;
use super::base::align_span;
use super::flags::{SizerFlag, SizerFlags};
use crate::widget::WidgetAccess;

/// Sentinel for an item without a user id.
pub const ID_NONE: i32 = -3;

/// An empty rectangle reserving space in a sizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spacer {
    /// Size the spacer asks for.
    pub size: Size,
}

impl Spacer {
    /// Create a spacer of the given size.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            size: Size::new(width, height).non_negative(),
        }
    }
}

/// Cell placement of an item in a grid-bag sizer.
///
/// Spans are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridBagCell {
    pub row: usize,
    pub col: usize,
    pub row_span: usize,
    pub col_span: usize,
}

impl GridBagCell {
    /// A single cell at `(row, col)`.
    pub fn new(row: usize, col: usize) -> Self {
        Self::spanning(row, col, 1, 1)
    }

    /// A block of cells starting at `(row, col)`.
    pub fn spanning(row: usize, col: usize, row_span: usize, col_span: usize) -> Self {
        Self {
            row,
            col,
            row_span: row_span.max(1),
            col_span: col_span.max(1),
        }
    }

    /// Row one past the last occupied row.
    #[inline]
    pub fn row_end(&self) -> usize {
        self.row.saturating_add(self.row_span)
    }

    /// Column one past the last occupied column.
    #[inline]
    pub fn col_end(&self) -> usize {
        self.col.saturating_add(self.col_span)
    }

    /// Check whether the block covers `(row, col)`.
    pub fn covers(&self, row: usize, col: usize) -> bool {
        (self.row..self.row_end()).contains(&row) && (self.col..self.col_end()).contains(&col)
    }

    /// Check whether two blocks share a cell.
    pub fn intersects(&self, other: &GridBagCell) -> bool {
        self.row < other.row_end()
            && other.row < self.row_end()
            && self.col < other.col_end()
            && other.col < self.col_end()
    }
}

/// What an item wraps.
#[derive(Debug)]
pub enum ItemKind {
    /// A widget, referenced by id.
    Widget(WidgetId),
    /// A nested sizer, owned by the item.
    Sizer(Box<Sizer>),
    /// Empty space.
    Spacer(Spacer),
}

/// One entry in a sizer.
#[derive(Debug)]
pub struct SizerItem {
    kind: ItemKind,
    proportion: u32,
    flags: SizerFlag,
    border: i32,

    /// User-set minimum size, combined with the content's natural minimum.
    min_size: Option<Size>,

    /// User-set maximum size.
    max_size: Option<Size>,

    /// Width / height ratio kept when `SHAPED` is set.
    ratio: Option<f32>,

    id: i32,
    shown: bool,

    /// Set while an enclosing sizer is hidden but keeps its space.
    held: bool,
    cell: Option<GridBagCell>,

    /// Minimum from the last `calc_min`, border excluded.
    calc_min: Size,

    /// Slot assigned by the last layout, border included.
    rect: Rect,
}

impl SizerItem {
    /// Create an item wrapping `kind`.
    pub fn new(kind: ItemKind, flags: SizerFlags) -> Self {
        Self {
            kind,
            proportion: flags.get_proportion(),
            flags: flags.get_flags(),
            border: flags.get_border(),
            min_size: None,
            max_size: None,
            ratio: None,
            id: ID_NONE,
            shown: true,
            held: false,
            cell: None,
            calc_min: Size::ZERO,
            rect: Rect::ZERO,
        }
    }

    /// Create a widget item.
    pub fn widget(widget: WidgetId, flags: SizerFlags) -> Self {
        Self::new(ItemKind::Widget(widget), flags)
    }

    /// Create a nested sizer item.
    pub fn sizer(sizer: Sizer, flags: SizerFlags) -> Self {
        Self::new(ItemKind::Sizer(Box::new(sizer)), flags)
    }

    /// Create a spacer item.
    pub fn spacer(width: i32, height: i32, flags: SizerFlags) -> Self {
        Self::new(ItemKind::Spacer(Spacer::new(width, height)), flags)
    }

    /// Attach a grid-bag cell to the item.
    pub fn with_cell(mut self, cell: GridBagCell) -> Self {
        self.cell = Some(cell);
        self
    }

    // =========================================================================
    // Content
    // =========================================================================

    #[inline]
    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut ItemKind {
        &mut self.kind
    }

    /// Consume the item and return what it wrapped.
    pub fn into_kind(self) -> ItemKind {
        self.kind
    }

    #[inline]
    pub fn is_widget(&self) -> bool {
        matches!(self.kind, ItemKind::Widget(_))
    }

    #[inline]
    pub fn is_sizer(&self) -> bool {
        matches!(self.kind, ItemKind::Sizer(_))
    }

    #[inline]
    pub fn is_spacer(&self) -> bool {
        matches!(self.kind, ItemKind::Spacer(_))
    }

    /// The wrapped widget, if any.
    pub fn widget_id(&self) -> Option<WidgetId> {
        match self.kind {
            ItemKind::Widget(id) => Some(id),
            _ => None,
        }
    }

    /// The wrapped sizer, if any.
    pub fn as_sizer(&self) -> Option<&Sizer> {
        match &self.kind {
            ItemKind::Sizer(sizer) => Some(sizer),
            _ => None,
        }
    }

    /// The wrapped sizer, mutably.
    pub fn as_sizer_mut(&mut self) -> Option<&mut Sizer> {
        match &mut self.kind {
            ItemKind::Sizer(sizer) => Some(sizer),
            _ => None,
        }
    }

    /// The spacer size, if this is a spacer.
    pub fn spacer_size(&self) -> Option<Size> {
        match self.kind {
            ItemKind::Spacer(spacer) => Some(spacer.size),
            _ => None,
        }
    }

    /// Resize a spacer item. No-op for other kinds.
    pub fn set_spacer_size(&mut self, size: Size) {
        if let ItemKind::Spacer(spacer) = &mut self.kind {
            spacer.size = size.non_negative();
        }
    }

    // =========================================================================
    // Placement parameters
    // =========================================================================

    #[inline]
    pub fn proportion(&self) -> u32 {
        self.proportion
    }

    pub fn set_proportion(&mut self, proportion: u32) {
        self.proportion = proportion;
    }

    #[inline]
    pub fn flags(&self) -> SizerFlag {
        self.flags
    }

    pub fn set_flags(&mut self, flags: SizerFlag) {
        self.flags = flags;
    }

    #[inline]
    pub fn border(&self) -> i32 {
        self.border
    }

    pub fn set_border(&mut self, border: i32) {
        self.border = border.max(0);
    }

    /// Border added to each dimension: `(left + right, top + bottom)`.
    pub fn border_size(&self) -> Size {
        let sides = |a: SizerFlag, b: SizerFlag| {
            (i32::from(self.flags.contains(a)) + i32::from(self.flags.contains(b))) * self.border
        };
        Size::new(
            sides(SizerFlag::BORDER_LEFT, SizerFlag::BORDER_RIGHT),
            sides(SizerFlag::BORDER_TOP, SizerFlag::BORDER_BOTTOM),
        )
    }

    /// User-set minimum size.
    #[inline]
    pub fn min_size_override(&self) -> Option<Size> {
        self.min_size
    }

    /// Set the user minimum size.
    ///
    /// For nested sizers this sets the child's own explicit minimum instead.
    pub fn set_min_size(&mut self, size: Size) {
        match &mut self.kind {
            ItemKind::Sizer(sizer) => sizer.set_min_size(size),
            _ => self.min_size = Some(size.non_negative()),
        }
    }

    /// Drop the user minimum size.
    pub fn clear_min_size(&mut self) {
        self.min_size = None;
    }

    /// User-set maximum size.
    #[inline]
    pub fn max_size_override(&self) -> Option<Size> {
        self.max_size
    }

    pub fn set_max_size(&mut self, size: Option<Size>) {
        self.max_size = size.map(Size::non_negative);
    }

    /// The kept width / height ratio, if any.
    #[inline]
    pub fn ratio(&self) -> Option<f32> {
        self.ratio
    }

    /// Set the ratio from a width and height.
    ///
    /// A zero component counts as 1, so the ratio is always usable.
    pub fn set_ratio(&mut self, width: i32, height: i32) {
        let width = if width == 0 { 1 } else { width };
        let height = if height == 0 { 1 } else { height };
        self.set_ratio_value(width as f32 / height as f32);
    }

    /// Set the ratio directly. Non-positive values clear it.
    pub fn set_ratio_value(&mut self, ratio: f32) {
        self.ratio = (ratio.is_finite() && ratio > 0.0).then_some(ratio);
    }

    /// User id, or `None` if unset.
    pub fn id(&self) -> Option<i32> {
        (self.id != ID_NONE).then_some(self.id)
    }

    pub fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    /// Grid-bag cell, if placed in a grid-bag sizer.
    #[inline]
    pub fn cell(&self) -> Option<GridBagCell> {
        self.cell
    }

    pub(crate) fn set_cell(&mut self, cell: GridBagCell) {
        self.cell = Some(cell);
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// Whether the item takes part in layout.
    ///
    /// Nested sizers are shown while any of their items is. The reserve flag
    /// forces `true` even while the wrapped content is hidden.
    pub fn is_shown(&self) -> bool {
        if self.flags.contains(SizerFlag::RESERVE_SPACE_EVEN_IF_HIDDEN) {
            return true;
        }
        match &self.kind {
            ItemKind::Sizer(sizer) => sizer.are_any_items_shown(),
            _ => self.shown,
        }
    }

    /// Show or hide the item, and the widget or sizer contents it wraps.
    pub fn show<S: WidgetAccess + ?Sized>(&mut self, storage: &mut S, show: bool) {
        self.shown = show;
        match &mut self.kind {
            ItemKind::Widget(id) => {
                if let Some(widget) = storage.get_widget_mut(*id) {
                    widget.set_visible(show);
                }
            }
            ItemKind::Sizer(sizer) => {
                sizer.show_items(storage, show);
                if self.flags.contains(SizerFlag::RESERVE_SPACE_EVEN_IF_HIDDEN) {
                    sizer.hold_items(!show);
                }
            }
            ItemKind::Spacer(_) => {}
        }
    }

    /// Whether the item takes up room in layout.
    ///
    /// True for shown items and for hidden items inside a hidden sizer whose
    /// own item reserves its space.
    pub(crate) fn occupies_slot(&self) -> bool {
        self.held || self.is_shown()
    }

    pub(crate) fn set_held(&mut self, held: bool) {
        self.held = held;
        if let ItemKind::Sizer(sizer) = &mut self.kind {
            sizer.hold_items(held);
        }
    }

    // =========================================================================
    // Sizing
    // =========================================================================

    /// Compute and cache the item's minimum, border excluded.
    ///
    /// The first computation on a `SHAPED` item without a ratio captures the
    /// ratio from the result.
    pub(crate) fn calc_min<S: WidgetAccess + ?Sized>(&mut self, storage: &S) -> Size {
        let natural = match &mut self.kind {
            ItemKind::Widget(id) => storage
                .get_widget(*id)
                .map(|w| w.natural_min_size())
                .unwrap_or(Size::ZERO),
            ItemKind::Sizer(sizer) => sizer.min_size(storage),
            ItemKind::Spacer(spacer) => spacer.size,
        };
        let min = match self.min_size {
            Some(own) if self.flags.contains(SizerFlag::FIXED_MINSIZE) => own,
            Some(own) => own.max(natural),
            None => natural,
        }
        .non_negative();

        if self.flags.contains(SizerFlag::SHAPED) && self.ratio.is_none() && !min.is_empty() {
            self.set_ratio(min.width, min.height);
        }
        self.calc_min = min;
        min
    }

    /// Minimum from the last `calc_min`, border excluded.
    #[inline]
    pub fn last_min_size(&self) -> Size {
        self.calc_min
    }

    /// Minimum from the last `calc_min`, border included.
    pub fn min_size_with_border(&self) -> Size {
        self.calc_min + self.border_size()
    }

    /// Effective maximum of the content, border excluded.
    pub fn max_size<S: WidgetAccess + ?Sized>(&self, storage: &S) -> Option<Size> {
        match self.kind {
            ItemKind::Widget(id) => self
                .max_size
                .or_else(|| storage.get_widget(id).and_then(|w| w.max_size())),
            _ => self.max_size,
        }
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Slot assigned by the last layout, border included.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.rect.origin
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.rect.size
    }

    /// Assign the item's slot and position its content inside it.
    pub(crate) fn set_dimension<S: WidgetAccess + ?Sized>(&mut self, slot: Rect, storage: &mut S) {
        let slot = Rect::from_origin_size(slot.origin, slot.size.non_negative());
        self.rect = slot;

        let mut inner = self.deflate_border(slot);
        if self.flags.contains(SizerFlag::SHAPED) {
            if let Some(ratio) = self.ratio {
                inner = fit_ratio(inner, ratio, self.flags);
            }
        }

        match &mut self.kind {
            ItemKind::Widget(id) => {
                if let Some(widget) = storage.get_widget_mut(*id) {
                    let max = self.max_size.or_else(|| widget.max_size());
                    widget.set_geometry(clamp_to_max(inner, max, self.flags));
                }
            }
            ItemKind::Sizer(sizer) => {
                sizer.place(clamp_to_max(inner, self.max_size, self.flags), storage);
            }
            ItemKind::Spacer(_) => {}
        }
    }

    fn deflate_border(&self, rect: Rect) -> Rect {
        let side = |flag: SizerFlag| if self.flags.contains(flag) { self.border } else { 0 };
        let left = side(SizerFlag::BORDER_LEFT);
        let top = side(SizerFlag::BORDER_TOP);
        let border = self.border_size();
        Rect::new(
            rect.left() + left,
            rect.top() + top,
            (rect.width() - border.width).max(0),
            (rect.height() - border.height).max(0),
        )
    }
}

/// Shrink `rect` along one axis so it has the given width / height ratio.
fn fit_ratio(rect: Rect, ratio: f32, flags: SizerFlag) -> Rect {
    let width = rect.width();
    let height = rect.height();
    if width <= 0 || height <= 0 {
        return rect;
    }
    let height_for_width = (width as f32 / ratio) as i32;
    if height_for_width <= height {
        let (y, h) = align_span(
            rect.top(),
            height,
            height_for_width,
            flags.contains(SizerFlag::ALIGN_CENTER_VERTICAL),
            flags.contains(SizerFlag::ALIGN_BOTTOM),
        );
        Rect::new(rect.left(), y, width, h)
    } else {
        let width_for_height = (height as f32 * ratio) as i32;
        let (x, w) = align_span(
            rect.left(),
            width,
            width_for_height,
            flags.contains(SizerFlag::ALIGN_CENTER_HORIZONTAL),
            flags.contains(SizerFlag::ALIGN_RIGHT),
        );
        Rect::new(x, rect.top(), w, height)
    }
}

/// Shrink `rect` to `max`, aligning the result inside the original.
fn clamp_to_max(rect: Rect, max: Option<Size>, flags: SizerFlag) -> Rect {
    let Some(max) = max else {
        return rect;
    };
    let (x, width) = align_span(
        rect.left(),
        rect.width(),
        rect.width().min(max.width),
        flags.contains(SizerFlag::ALIGN_CENTER_HORIZONTAL),
        flags.contains(SizerFlag::ALIGN_RIGHT),
    );
    let (y, height) = align_span(
        rect.top(),
        rect.height(),
        rect.height().min(max.height),
        flags.contains(SizerFlag::ALIGN_CENTER_VERTICAL),
        flags.contains(SizerFlag::ALIGN_BOTTOM),
    );
    Rect::new(x, y, width, height)
}
