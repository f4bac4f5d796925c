//! Grid-bag sizer implementation.
//!
//! GridBagSizer places each item at an explicit [`GridBagCell`] which may
//! span several rows and columns. Two items never share a cell: overlapping
//! placements are rejected when the item is added or moved.
//!
//! # Track sizing
//!
//! 1. Items spanning a single column size that column (widest wins).
//! 2. Columns no item touches get the empty cell width.
//! 3. Items spanning several columns then enlarge their columns if needed,
//!    in proportion to the columns' current widths (equally if all are 0).
//!
//! Rows are sized the same way. Leftover space goes to growable rows and
//! columns by weight, exactly as in [`super::FlexGridSizer`].

use trellis_core::{LayoutError, Rect, Result, Size, WidgetId, trellis_warn};

use super::base::{grow_tracks, place_in_slot, track_offsets, track_total};
use super::flags::{SizerFlag, SizerFlags};
use super::flex_grid_sizer::GrowableTracks;
use super::item::{GridBagCell, SizerItem};
use super::{Arrange, Sizer, SizerKind};
use crate::widget::WidgetAccess;

/// Size of a row or column that holds no item.
pub const DEFAULT_EMPTY_CELL_SIZE: Size = Size::new(10, 20);

/// Highest row or column count a grid-bag sizer accepts.
pub const MAX_GRID_BAG_TRACKS: usize = 4096;

/// A sizer placing items at explicit cells.
#[derive(Debug, Clone)]
pub struct GridBagSizer {
    vgap: i32,
    hgap: i32,
    empty_cell_size: Size,
    growable: GrowableTracks,
}

impl GridBagSizer {
    /// Create a grid-bag sizer with the given gaps.
    pub fn new(vgap: i32, hgap: i32) -> Self {
        Self {
            vgap: vgap.max(0),
            hgap: hgap.max(0),
            empty_cell_size: DEFAULT_EMPTY_CELL_SIZE,
            growable: GrowableTracks::default(),
        }
    }

    #[inline]
    pub fn vgap(&self) -> i32 {
        self.vgap
    }

    #[inline]
    pub fn hgap(&self) -> i32 {
        self.hgap
    }

    pub fn set_vgap(&mut self, gap: i32) {
        self.vgap = gap.max(0);
    }

    pub fn set_hgap(&mut self, gap: i32) {
        self.hgap = gap.max(0);
    }

    /// Size used for rows and columns without items.
    #[inline]
    pub fn empty_cell_size(&self) -> Size {
        self.empty_cell_size
    }

    pub fn set_empty_cell_size(&mut self, size: Size) {
        self.empty_cell_size = size.non_negative();
    }

    /// The growable rows and columns.
    #[inline]
    pub fn growable(&self) -> &GrowableTracks {
        &self.growable
    }

    pub fn add_growable_row(&mut self, row: usize, weight: u32) {
        self.growable.add_row(row, weight);
    }

    pub fn add_growable_col(&mut self, col: usize, weight: u32) {
        self.growable.add_col(col, weight);
    }

    pub fn remove_growable_row(&mut self, row: usize) -> bool {
        self.growable.remove_row(row)
    }

    pub fn remove_growable_col(&mut self, col: usize) -> bool {
        self.growable.remove_col(col)
    }

    /// Row and column counts covered by `items`.
    pub fn dims(items: &[SizerItem]) -> (usize, usize) {
        items
            .iter()
            .filter_map(SizerItem::cell)
            .fold((0, 0), |(rows, cols), cell| {
                (rows.max(cell.row_end()), cols.max(cell.col_end()))
            })
    }

    fn tracks(&self, items: &[SizerItem]) -> (Vec<i32>, Vec<i32>) {
        let (rows, cols) = Self::dims(items);
        let mut widths = vec![0; cols];
        let mut heights = vec![0; rows];
        let mut col_used = vec![false; cols];
        let mut row_used = vec![false; rows];

        for cell in items.iter().filter_map(SizerItem::cell) {
            col_used[cell.col..cell.col_end()].fill(true);
            row_used[cell.row..cell.row_end()].fill(true);
        }

        let placed: Vec<(GridBagCell, Size)> = items
            .iter()
            .filter(|item| item.occupies_slot())
            .filter_map(|item| item.cell().map(|cell| (cell, item.min_size_with_border())))
            .collect();

        for &(cell, min) in &placed {
            if cell.col_span == 1 {
                widths[cell.col] = widths[cell.col].max(min.width);
            }
            if cell.row_span == 1 {
                heights[cell.row] = heights[cell.row].max(min.height);
            }
        }

        for (width, _) in widths.iter_mut().zip(&col_used).filter(|(_, used)| !**used) {
            *width = self.empty_cell_size.width;
        }
        for (height, _) in heights.iter_mut().zip(&row_used).filter(|(_, used)| !**used) {
            *height = self.empty_cell_size.height;
        }

        let mut spanning_cols: Vec<&(GridBagCell, Size)> =
            placed.iter().filter(|(cell, _)| cell.col_span > 1).collect();
        spanning_cols.sort_by_key(|(cell, _)| cell.col_span);
        for (cell, min) in spanning_cols {
            enlarge(&mut widths[cell.col..cell.col_end()], min.width, self.hgap);
        }

        let mut spanning_rows: Vec<&(GridBagCell, Size)> =
            placed.iter().filter(|(cell, _)| cell.row_span > 1).collect();
        spanning_rows.sort_by_key(|(cell, _)| cell.row_span);
        for (cell, min) in spanning_rows {
            enlarge(&mut heights[cell.row..cell.row_end()], min.height, self.vgap);
        }

        (widths, heights)
    }
}

/// Grow `tracks` so that together with their gaps they are at least `needed`.
fn enlarge(tracks: &mut [i32], needed: i32, gap: i32) {
    let deficit = needed - track_total(tracks, gap);
    if deficit <= 0 {
        return;
    }
    let mut weights: Vec<u32> = tracks.iter().map(|&t| t.max(0) as u32).collect();
    if weights.iter().all(|&w| w == 0) {
        weights.fill(1);
    }
    grow_tracks(tracks, deficit, &weights);
}

/// First item other than `exclude` whose cell intersects `cell`.
fn find_overlap(items: &[SizerItem], cell: &GridBagCell, exclude: Option<usize>) -> Option<usize> {
    items.iter().enumerate().position(|(index, item)| {
        Some(index) != exclude && item.cell().is_some_and(|other| other.intersects(cell))
    })
}

/// Reject cells whose end row or column is past [`MAX_GRID_BAG_TRACKS`].
fn check_range(cell: &GridBagCell) -> Result<()> {
    let row_end = cell.row.checked_add(cell.row_span);
    let col_end = cell.col.checked_add(cell.col_span);
    match (row_end, col_end) {
        (Some(rows), Some(cols)) if rows <= MAX_GRID_BAG_TRACKS && cols <= MAX_GRID_BAG_TRACKS => Ok(()),
        _ => Err(LayoutError::CellOutOfRange {
            row: cell.row,
            col: cell.col,
            row_span: cell.row_span,
            col_span: cell.col_span,
            limit: MAX_GRID_BAG_TRACKS,
        }),
    }
}

fn overlap_error(cell: GridBagCell) -> LayoutError {
    LayoutError::CellOverlap {
        row: cell.row,
        col: cell.col,
        row_span: cell.row_span,
        col_span: cell.col_span,
    }
}

impl Arrange for GridBagSizer {
    fn calc_min(&mut self, items: &[SizerItem]) -> Size {
        let (widths, heights) = self.tracks(items);
        Size::new(track_total(&widths, self.hgap), track_total(&heights, self.vgap))
    }

    fn arrange(&mut self, items: &[SizerItem], rect: Rect) -> Vec<Option<Rect>> {
        let (mut widths, mut heights) = self.tracks(items);
        let col_weights = self.growable.col_weights(widths.len());
        let extra_width = rect.width() - track_total(&widths, self.hgap);
        grow_tracks(&mut widths, extra_width, &col_weights);
        let row_weights = self.growable.row_weights(heights.len());
        let extra_height = rect.height() - track_total(&heights, self.vgap);
        grow_tracks(&mut heights, extra_height, &row_weights);

        let xs = track_offsets(rect.left(), &widths, self.hgap);
        let ys = track_offsets(rect.top(), &heights, self.vgap);
        let span_end = |offsets: &[i32], tracks: &[i32], last: usize| offsets[last] + tracks[last];

        items
            .iter()
            .map(|item| {
                let cell = item.cell().filter(|_| item.occupies_slot())?;
                let x = xs[cell.col];
                let y = ys[cell.row];
                let slot = Rect::new(
                    x,
                    y,
                    span_end(&xs, &widths, cell.col_end() - 1) - x,
                    span_end(&ys, &heights, cell.row_end() - 1) - y,
                );
                let expand = item.flags().contains(SizerFlag::EXPAND);
                Some(place_in_slot(slot, item.min_size_with_border(), item.flags(), expand, expand))
            })
            .collect()
    }

    fn check_insert(&self, items: &[SizerItem], item: &SizerItem, replacing: Option<usize>) -> Result<()> {
        let cell = item.cell().ok_or(LayoutError::PositionRequired)?;
        check_range(&cell)?;
        match find_overlap(items, &cell, replacing) {
            Some(_) => Err(overlap_error(cell)),
            None => Ok(()),
        }
    }
}

// =============================================================================
// Cell-addressed operations
// =============================================================================

impl Sizer {
    fn require_grid_bag(&self) -> Result<()> {
        match self.kind {
            SizerKind::GridBag(_) => Ok(()),
            _ => Err(LayoutError::NotAGridBagSizer),
        }
    }

    /// Add a widget at `cell`.
    pub fn add_widget_at<S: WidgetAccess + ?Sized>(
        &mut self,
        storage: &mut S,
        widget: WidgetId,
        cell: GridBagCell,
        flags: SizerFlags,
    ) -> Result<&mut SizerItem> {
        self.require_grid_bag()?;
        self.add_item(storage, SizerItem::widget(widget, flags).with_cell(cell))
    }

    /// Add a nested sizer at `cell`.
    ///
    /// On failure the sizer is dropped; use [`Sizer::add_item`] with a
    /// prepared item to keep ownership decisions with the caller.
    pub fn add_sizer_at(&mut self, sizer: Sizer, cell: GridBagCell, flags: SizerFlags) -> Result<&mut SizerItem> {
        self.require_grid_bag()?;
        self.push_owned(SizerItem::sizer(sizer, flags).with_cell(cell))
    }

    /// Add a spacer at `cell`.
    pub fn add_space_at(&mut self, width: i32, height: i32, cell: GridBagCell, flags: SizerFlags) -> Result<&mut SizerItem> {
        self.require_grid_bag()?;
        self.push_owned(SizerItem::spacer(width, height, flags).with_cell(cell))
    }

    /// Cell of the item at `index`.
    pub fn item_cell(&self, index: usize) -> Result<GridBagCell> {
        self.require_grid_bag()?;
        self.item(index)?.cell().ok_or(LayoutError::PositionRequired)
    }

    /// `(row, col)` of the item at `index`.
    pub fn item_position(&self, index: usize) -> Result<(usize, usize)> {
        self.item_cell(index).map(|cell| (cell.row, cell.col))
    }

    /// `(row_span, col_span)` of the item at `index`.
    pub fn item_span(&self, index: usize) -> Result<(usize, usize)> {
        self.item_cell(index).map(|cell| (cell.row_span, cell.col_span))
    }

    /// Cell of a directly managed widget.
    pub fn widget_cell(&self, widget: WidgetId) -> Option<GridBagCell> {
        self.find_widget(widget, false).and_then(SizerItem::cell)
    }

    /// Move the item at `index` to start at `(row, col)`, keeping its span.
    pub fn set_item_position(&mut self, index: usize, row: usize, col: usize) -> Result<()> {
        let cell = self.item_cell(index)?;
        self.move_item(index, GridBagCell::spanning(row, col, cell.row_span, cell.col_span))
    }

    /// Change the span of the item at `index`, keeping its position.
    pub fn set_item_span(&mut self, index: usize, row_span: usize, col_span: usize) -> Result<()> {
        let cell = self.item_cell(index)?;
        self.move_item(index, GridBagCell::spanning(cell.row, cell.col, row_span, col_span))
    }

    /// Move a directly managed widget. Returns `Ok(false)` if not found.
    pub fn set_widget_position(&mut self, widget: WidgetId, row: usize, col: usize) -> Result<bool> {
        match self.index_of_widget(widget) {
            Some(index) => self.set_item_position(index, row, col).map(|()| true),
            None => Ok(false),
        }
    }

    /// Change a directly managed widget's span. Returns `Ok(false)` if not found.
    pub fn set_widget_span(&mut self, widget: WidgetId, row_span: usize, col_span: usize) -> Result<bool> {
        match self.index_of_widget(widget) {
            Some(index) => self.set_item_span(index, row_span, col_span).map(|()| true),
            None => Ok(false),
        }
    }

    /// The item covering `(row, col)`, if any.
    pub fn find_item_at_position(&self, row: usize, col: usize) -> Option<&SizerItem> {
        self.base
            .items()
            .iter()
            .find(|item| item.cell().is_some_and(|cell| cell.covers(row, col)))
    }

    /// Check whether `cell` overlaps any item other than the one at `exclude`.
    pub fn check_for_intersection(&self, cell: &GridBagCell, exclude: Option<usize>) -> bool {
        find_overlap(self.base.items(), cell, exclude).is_some()
    }

    fn move_item(&mut self, index: usize, cell: GridBagCell) -> Result<()> {
        if let Err(err) = check_range(&cell) {
            trellis_warn!(sizer = %self.id, ?cell, "grid bag move rejected: cell out of range");
            return Err(err);
        }
        if self.check_for_intersection(&cell, Some(index)) {
            trellis_warn!(sizer = %self.id, ?cell, "grid bag move rejected: cell overlap");
            return Err(overlap_error(cell));
        }
        self.base.items_mut()[index].set_cell(cell);
        self.base.invalidate();
        Ok(())
    }
}
