//! Flexible grid sizer implementation.
//!
//! FlexGridSizer sizes each row and column to its own content, like
//! [`GridSizer`], but only rows and columns marked growable receive
//! leftover space. Growable tracks share the leftover by weight; if every
//! growable weight is 0 they share it equally. A negative leftover shrinks
//! the growable tracks, never below zero.
//!
//! # Flexible direction
//!
//! [`FlexDirection`] selects which axes are sized per track. On an axis that
//! is not flexible every track takes the size of the largest one, and
//! [`NonFlexibleGrowMode`] decides how that axis grows.

use trellis_core::{Rect, Result, Size};

use super::Arrange;
use super::base::{grow_tracks, track_total};
use super::grid_sizer::{GridSizer, natural_tracks, place_cells};
use super::item::SizerItem;

/// Axes on which rows or columns are sized individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FlexDirection {
    /// Columns are individually sized; all rows share one height.
    Horizontal,
    /// Rows are individually sized; all columns share one width.
    Vertical,
    /// Both rows and columns are individually sized.
    #[default]
    Both,
}

impl FlexDirection {
    fn columns_flexible(self) -> bool {
        matches!(self, FlexDirection::Horizontal | FlexDirection::Both)
    }

    fn rows_flexible(self) -> bool {
        matches!(self, FlexDirection::Vertical | FlexDirection::Both)
    }
}

/// How tracks on a non-flexible axis grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NonFlexibleGrowMode {
    /// The axis never grows.
    None,
    /// Only growable tracks grow, by weight.
    #[default]
    Specified,
    /// Every track grows equally.
    All,
}

/// Growable rows and columns with their weights.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrowableTracks {
    rows: Vec<(usize, u32)>,
    cols: Vec<(usize, u32)>,
}

impl GrowableTracks {
    /// Mark `row` growable with `weight`, replacing any earlier weight.
    pub fn add_row(&mut self, row: usize, weight: u32) {
        set_weight(&mut self.rows, row, weight);
    }

    /// Mark `col` growable with `weight`, replacing any earlier weight.
    pub fn add_col(&mut self, col: usize, weight: u32) {
        set_weight(&mut self.cols, col, weight);
    }

    /// Unmark `row`. Returns `false` if it was not growable.
    pub fn remove_row(&mut self, row: usize) -> bool {
        remove_weight(&mut self.rows, row)
    }

    /// Unmark `col`. Returns `false` if it was not growable.
    pub fn remove_col(&mut self, col: usize) -> bool {
        remove_weight(&mut self.cols, col)
    }

    pub fn is_row_growable(&self, row: usize) -> bool {
        self.rows.iter().any(|&(r, _)| r == row)
    }

    pub fn is_col_growable(&self, col: usize) -> bool {
        self.cols.iter().any(|&(c, _)| c == col)
    }

    /// Per-row weights for a grid with `count` rows.
    pub(crate) fn row_weights(&self, count: usize) -> Vec<u32> {
        weights_for(&self.rows, count)
    }

    /// Per-column weights for a grid with `count` columns.
    pub(crate) fn col_weights(&self, count: usize) -> Vec<u32> {
        weights_for(&self.cols, count)
    }
}

fn set_weight(list: &mut Vec<(usize, u32)>, index: usize, weight: u32) {
    match list.iter_mut().find(|(i, _)| *i == index) {
        Some(entry) => entry.1 = weight,
        None => list.push((index, weight)),
    }
}

fn remove_weight(list: &mut Vec<(usize, u32)>, index: usize) -> bool {
    let before = list.len();
    list.retain(|&(i, _)| i != index);
    list.len() != before
}

/// Expand a sparse weight list; growable tracks with all-zero weights
/// count as weight 1 each. Entries past `count` are ignored.
fn weights_for(list: &[(usize, u32)], count: usize) -> Vec<u32> {
    let mut weights = vec![0; count];
    let in_range: Vec<(usize, u32)> = list.iter().copied().filter(|&(i, _)| i < count).collect();
    let all_zero = in_range.iter().all(|&(_, w)| w == 0);
    for (index, weight) in in_range {
        weights[index] = if all_zero { 1 } else { weight };
    }
    weights
}

/// A grid sizer with individually growable rows and columns.
#[derive(Debug, Clone)]
pub struct FlexGridSizer {
    grid: GridSizer,
    growable: GrowableTracks,
    direction: FlexDirection,
    grow_mode: NonFlexibleGrowMode,
}

impl FlexGridSizer {
    /// Create a flexible grid with the given dimensions and gaps.
    pub fn new(rows: usize, cols: usize, vgap: i32, hgap: i32) -> Result<Self> {
        Ok(Self {
            grid: GridSizer::new(rows, cols, vgap, hgap)?,
            growable: GrowableTracks::default(),
            direction: FlexDirection::default(),
            grow_mode: NonFlexibleGrowMode::default(),
        })
    }

    /// The underlying grid settings.
    #[inline]
    pub fn grid(&self) -> &GridSizer {
        &self.grid
    }

    /// The underlying grid settings, mutably.
    #[inline]
    pub fn grid_mut(&mut self) -> &mut GridSizer {
        &mut self.grid
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

    pub fn is_row_growable(&self, row: usize) -> bool {
        self.growable.is_row_growable(row)
    }

    pub fn is_col_growable(&self, col: usize) -> bool {
        self.growable.is_col_growable(col)
    }

    #[inline]
    pub fn flexible_direction(&self) -> FlexDirection {
        self.direction
    }

    pub fn set_flexible_direction(&mut self, direction: FlexDirection) {
        self.direction = direction;
    }

    #[inline]
    pub fn non_flexible_grow_mode(&self) -> NonFlexibleGrowMode {
        self.grow_mode
    }

    pub fn set_non_flexible_grow_mode(&mut self, mode: NonFlexibleGrowMode) {
        self.grow_mode = mode;
    }

    /// Natural track sizes with non-flexible axes made uniform.
    fn tracks(&self, items: &[SizerItem]) -> (Vec<i32>, Vec<i32>) {
        let (rows, cols) = self.grid.effective_dims(items.len());
        let (mut widths, mut heights) = natural_tracks(items, rows, cols);
        if !self.direction.columns_flexible() {
            uniform(&mut widths);
        }
        if !self.direction.rows_flexible() {
            uniform(&mut heights);
        }
        (widths, heights)
    }

    fn grow_weights(&self, flexible: bool, growable: Vec<u32>) -> Vec<u32> {
        if flexible {
            return growable;
        }
        match self.grow_mode {
            NonFlexibleGrowMode::None => vec![0; growable.len()],
            NonFlexibleGrowMode::Specified => growable,
            NonFlexibleGrowMode::All => vec![1; growable.len()],
        }
    }
}

fn uniform(tracks: &mut [i32]) {
    let largest = tracks.iter().copied().max().unwrap_or(0);
    tracks.fill(largest);
}

impl Arrange for FlexGridSizer {
    fn calc_min(&mut self, items: &[SizerItem]) -> Size {
        let (widths, heights) = self.tracks(items);
        Size::new(
            track_total(&widths, self.grid.hgap()),
            track_total(&heights, self.grid.vgap()),
        )
    }

    fn arrange(&mut self, items: &[SizerItem], rect: Rect) -> Vec<Option<Rect>> {
        let (mut widths, mut heights) = self.tracks(items);
        let (hgap, vgap) = (self.grid.hgap(), self.grid.vgap());

        let col_weights = self.grow_weights(
            self.direction.columns_flexible(),
            self.growable.col_weights(widths.len()),
        );
        let extra_width = rect.width() - track_total(&widths, hgap);
        grow_tracks(&mut widths, extra_width, &col_weights);

        let row_weights = self.grow_weights(
            self.direction.rows_flexible(),
            self.growable.row_weights(heights.len()),
        );
        let extra_height = rect.height() - track_total(&heights, vgap);
        grow_tracks(&mut heights, extra_height, &row_weights);

        place_cells(items, rect, widths.len(), &widths, &heights, hgap, vgap)
    }

    fn check_insert(&self, items: &[SizerItem], item: &SizerItem, replacing: Option<usize>) -> Result<()> {
        self.grid.check_insert(items, item, replacing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sizer::Sizer;
    use crate::sizer::flags::SizerFlags;
    use crate::sizer::test_support::{MockWidget, geometry_of, store_with};
    use crate::widget::WidgetStore;
    use trellis_core::WidgetId;

    fn two_by_two() -> (Sizer, WidgetStore<MockWidget>, Vec<WidgetId>) {
        let (mut store, ids) = store_with(&[
            Size::new(10, 10),
            Size::new(20, 10),
            Size::new(10, 30),
            Size::new(20, 30),
        ]);
        let mut sizer = Sizer::flex_grid(2, 2, 0, 0).unwrap();
        for &id in &ids {
            sizer.add_widget(&mut store, id, SizerFlags::new(0).expand()).unwrap();
        }
        (sizer, store, ids)
    }

    #[test]
    fn test_weights_for() {
        assert_eq!(weights_for(&[(1, 2), (5, 1)], 3), vec![0, 2, 0]);
        assert_eq!(weights_for(&[(0, 0), (2, 0)], 3), vec![1, 0, 1]);
        assert_eq!(weights_for(&[], 2), vec![0, 0]);
    }

    #[test]
    fn test_growable_replace_and_remove() {
        let mut tracks = GrowableTracks::default();
        tracks.add_col(1, 1);
        tracks.add_col(1, 3);
        assert_eq!(tracks.col_weights(2), vec![0, 3]);
        assert!(tracks.remove_col(1));
        assert!(!tracks.remove_col(1));
        assert!(!tracks.is_col_growable(1));
    }

    #[test]
    fn test_non_growable_tracks_keep_natural_size() {
        let (mut sizer, mut store, ids) = two_by_two();
        assert_eq!(sizer.calc_min(&store), Size::new(30, 40));

        sizer.set_dimension(Rect::new(0, 0, 100, 100), &mut store);
        assert_eq!(geometry_of(&store, ids[0]), Rect::new(0, 0, 10, 10));
        assert_eq!(geometry_of(&store, ids[3]), Rect::new(10, 10, 20, 30));
    }

    #[test]
    fn test_growable_tracks_share_by_weight() {
        let (mut sizer, mut store, ids) = two_by_two();
        if let Some(flex) = sizer.as_flex_grid_mut() {
            flex.add_growable_col(0, 1);
            flex.add_growable_col(1, 3);
            flex.add_growable_row(1, 0);
        }
        sizer.set_dimension(Rect::new(0, 0, 110, 100), &mut store);

        // 80 px of leftover width split 1:3, 60 px of height to row 1.
        assert_eq!(geometry_of(&store, ids[0]), Rect::new(0, 0, 30, 10));
        assert_eq!(geometry_of(&store, ids[1]), Rect::new(30, 0, 80, 10));
        assert_eq!(geometry_of(&store, ids[3]), Rect::new(30, 10, 80, 90));
    }

    #[test]
    fn test_growable_tracks_shrink_to_zero() {
        let (mut sizer, mut store, ids) = two_by_two();
        if let Some(flex) = sizer.as_flex_grid_mut() {
            flex.add_growable_col(1, 1);
        }
        sizer.set_dimension(Rect::new(0, 0, 5, 40), &mut store);

        assert_eq!(geometry_of(&store, ids[0]).width(), 10);
        assert_eq!(geometry_of(&store, ids[1]).width(), 0);
    }

    #[test]
    fn test_non_flexible_axis_is_uniform() {
        let (mut sizer, mut store, ids) = two_by_two();
        if let Some(flex) = sizer.as_flex_grid_mut() {
            flex.set_flexible_direction(FlexDirection::Horizontal);
            flex.set_non_flexible_grow_mode(NonFlexibleGrowMode::All);
        }
        assert_eq!(sizer.calc_min(&store), Size::new(30, 60));

        sizer.set_dimension(Rect::new(0, 0, 30, 80), &mut store);
        assert_eq!(geometry_of(&store, ids[0]), Rect::new(0, 0, 10, 40));
        assert_eq!(geometry_of(&store, ids[2]), Rect::new(0, 40, 10, 40));
    }
}
