//! Grid sizer implementation.
//!
//! GridSizer places items row-major into a `rows x cols` table. Either
//! dimension may be 0, in which case it is derived from the item count.
//! Each column is as wide as its widest item and each row as tall as its
//! tallest; extra space is shared equally between all columns and rows.

use trellis_core::{LayoutError, Rect, Result, Size};

use super::Arrange;
use super::base::{grow_tracks, place_in_slot, track_offsets, track_total};
use super::flags::SizerFlag;
use super::item::SizerItem;

/// A uniform grid sizer.
#[derive(Debug, Clone)]
pub struct GridSizer {
    rows: usize,
    cols: usize,
    vgap: i32,
    hgap: i32,
}

impl GridSizer {
    /// Create a grid with the given dimensions and gaps.
    ///
    /// Fails with [`LayoutError::InvalidGridDimensions`] if both dimensions
    /// are 0.
    pub fn new(rows: usize, cols: usize, vgap: i32, hgap: i32) -> Result<Self> {
        if rows == 0 && cols == 0 {
            return Err(LayoutError::InvalidGridDimensions);
        }
        Ok(Self {
            rows,
            cols,
            vgap: vgap.max(0),
            hgap: hgap.max(0),
        })
    }

    /// Configured row count (0 = derived).
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Configured column count (0 = derived).
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Vertical gap between rows.
    #[inline]
    pub fn vgap(&self) -> i32 {
        self.vgap
    }

    /// Horizontal gap between columns.
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

    /// Row and column counts in effect for `count` items.
    ///
    /// A zero dimension is `ceil(count / other)`.
    pub fn effective_dims(&self, count: usize) -> (usize, usize) {
        match (self.rows, self.cols) {
            (0, 0) => (0, 0),
            (0, cols) => (count.div_ceil(cols), cols),
            (rows, 0) => (rows, count.div_ceil(rows)),
            (rows, cols) => (rows, cols),
        }
    }

    /// Change the dimensions, checking they can hold `count` items.
    pub(crate) fn set_dimensions(&mut self, rows: usize, cols: usize, count: usize) -> Result<()> {
        let candidate = Self::new(rows, cols, self.vgap, self.hgap)?;
        candidate.check_capacity(count)?;
        self.rows = rows;
        self.cols = cols;
        Ok(())
    }

    /// Fail if both dimensions are fixed and cannot hold `count` items.
    pub(crate) fn check_capacity(&self, count: usize) -> Result<()> {
        if self.rows > 0 && self.cols > 0 && count > self.rows * self.cols {
            return Err(LayoutError::GridCapacityExceeded {
                rows: self.rows,
                cols: self.cols,
                count,
            });
        }
        Ok(())
    }
}

impl Arrange for GridSizer {
    fn calc_min(&mut self, items: &[SizerItem]) -> Size {
        let (rows, cols) = self.effective_dims(items.len());
        let (widths, heights) = natural_tracks(items, rows, cols);
        Size::new(track_total(&widths, self.hgap), track_total(&heights, self.vgap))
    }

    fn arrange(&mut self, items: &[SizerItem], rect: Rect) -> Vec<Option<Rect>> {
        let (rows, cols) = self.effective_dims(items.len());
        let (mut widths, mut heights) = natural_tracks(items, rows, cols);

        let extra_width = rect.width() - track_total(&widths, self.hgap);
        grow_tracks(&mut widths, extra_width, &vec![1; cols]);
        let extra_height = rect.height() - track_total(&heights, self.vgap);
        grow_tracks(&mut heights, extra_height, &vec![1; rows]);

        place_cells(items, rect, cols, &widths, &heights, self.hgap, self.vgap)
    }

    fn check_insert(&self, items: &[SizerItem], _item: &SizerItem, replacing: Option<usize>) -> Result<()> {
        if replacing.is_some() {
            return Ok(());
        }
        self.check_capacity(items.len() + 1)
    }
}

/// Natural column widths and row heights of a row-major grid.
///
/// Hidden items keep their slot but contribute nothing.
pub(crate) fn natural_tracks(items: &[SizerItem], rows: usize, cols: usize) -> (Vec<i32>, Vec<i32>) {
    let mut widths = vec![0; cols];
    let mut heights = vec![0; rows];
    if cols == 0 {
        return (widths, heights);
    }
    for (index, item) in items.iter().enumerate() {
        let (row, col) = (index / cols, index % cols);
        if row >= rows || !item.occupies_slot() {
            continue;
        }
        let min = item.min_size_with_border();
        widths[col] = widths[col].max(min.width);
        heights[row] = heights[row].max(min.height);
    }
    (widths, heights)
}

/// Place row-major items into the cells described by `widths` and `heights`.
pub(crate) fn place_cells(
    items: &[SizerItem],
    rect: Rect,
    cols: usize,
    widths: &[i32],
    heights: &[i32],
    hgap: i32,
    vgap: i32,
) -> Vec<Option<Rect>> {
    let mut slots = vec![None; items.len()];
    if cols == 0 {
        return slots;
    }
    let xs = track_offsets(rect.left(), widths, hgap);
    let ys = track_offsets(rect.top(), heights, vgap);
    for (index, item) in items.iter().enumerate() {
        let (row, col) = (index / cols, index % cols);
        if row >= heights.len() || !item.occupies_slot() {
            continue;
        }
        let cell = Rect::new(xs[col], ys[row], widths[col], heights[row]);
        let expand = item.flags().contains(SizerFlag::EXPAND);
        slots[index] = Some(place_in_slot(
            cell,
            item.min_size_with_border(),
            item.flags(),
            expand,
            expand,
        ));
    }
    slots
}
