//! Common sizer state.
//!
//! SizerBase holds the item list, geometry and invalidation state shared by
//! every sizer kind. The free functions at the bottom are the arithmetic
//! helpers the kinds use to hand out space.

use trellis_core::{LayoutError, Rect, Result, Size};

use super::flags::SizerFlag;
use super::item::SizerItem;

/// Common base for sizer implementations.
///
/// Holds:
/// - Item storage
/// - The sizer's geometry and explicit minimum size
/// - Dirty and suspension tracking
#[derive(Debug, Default)]
pub(crate) struct SizerBase {
    /// Items managed by the sizer, in insertion order.
    items: Vec<SizerItem>,

    /// The sizer's geometry (position and size) from the last layout.
    rect: Rect,

    /// Explicit floor for the minimum size.
    min_size: Size,

    /// Minimum size from the last `calc_min`, before applying the floor.
    calc_min: Size,

    /// Whether the sizer changed since the last layout.
    dirty: bool,

    /// Nesting depth of active layout suspensions.
    suspend_depth: u32,

    /// Whether a layout was requested while suspended.
    pending_layout: bool,
}

impl SizerBase {
    /// Create a new, empty base.
    pub fn new() -> Self {
        Self {
            dirty: true,
            ..Self::default()
        }
    }

    // =========================================================================
    // Item Management
    // =========================================================================

    /// Insert an item at `index`, which may equal the item count.
    pub fn insert(&mut self, index: usize, item: SizerItem) -> Result<&mut SizerItem> {
        self.check_insert_index(index)?;
        self.items.insert(index, item);
        self.invalidate();
        Ok(&mut self.items[index])
    }

    /// Remove and return the item at `index`.
    pub fn remove(&mut self, index: usize) -> Result<SizerItem> {
        self.check_index(index)?;
        let item = self.items.remove(index);
        self.invalidate();
        Ok(item)
    }

    /// Swap the item at `index` for `item`, returning the old one.
    pub fn replace(&mut self, index: usize, item: SizerItem) -> Result<SizerItem> {
        self.check_index(index)?;
        let old = std::mem::replace(&mut self.items[index], item);
        self.invalidate();
        Ok(old)
    }

    /// Remove every item.
    pub fn take_all(&mut self) -> Vec<SizerItem> {
        self.invalidate();
        std::mem::take(&mut self.items)
    }

    /// Fail unless `index` names an existing item.
    pub fn check_index(&self, index: usize) -> Result<()> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(LayoutError::IndexOutOfRange {
                index,
                count: self.items.len(),
            })
        }
    }

    /// Fail unless `index` is a valid insertion point.
    pub fn check_insert_index(&self, index: usize) -> Result<()> {
        if index <= self.items.len() {
            Ok(())
        } else {
            Err(LayoutError::IndexOutOfRange {
                index,
                count: self.items.len(),
            })
        }
    }

    /// Get the number of items.
    #[inline]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Get all items.
    #[inline]
    pub fn items(&self) -> &[SizerItem] {
        &self.items
    }

    /// Get all items mutably, without invalidating.
    #[inline]
    pub fn items_mut(&mut self) -> &mut [SizerItem] {
        &mut self.items
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    #[inline]
    pub fn min_size(&self) -> Size {
        self.min_size
    }

    /// Set the explicit minimum size.
    pub fn set_min_size(&mut self, size: Size) {
        let size = size.non_negative();
        if self.min_size != size {
            self.min_size = size;
            self.invalidate();
        }
    }

    #[inline]
    pub fn calc_min(&self) -> Size {
        self.calc_min
    }

    #[inline]
    pub fn set_calc_min(&mut self, size: Size) {
        self.calc_min = size;
    }

    // =========================================================================
    // Invalidation
    // =========================================================================

    /// Mark the sizer as changed.
    pub fn invalidate(&mut self) {
        self.dirty = true;
        if self.suspend_depth > 0 {
            self.pending_layout = true;
        }
    }

    /// Check if the sizer changed since the last layout.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the sizer as laid out.
    pub fn mark_valid(&mut self) {
        self.dirty = false;
    }

    /// Enter one level of layout suspension.
    pub fn suspend(&mut self) {
        self.suspend_depth += 1;
    }

    /// Leave one level of suspension.
    ///
    /// Returns `true` when the outermost level was left with work pending.
    pub fn resume(&mut self) -> bool {
        self.suspend_depth = self.suspend_depth.saturating_sub(1);
        if self.suspend_depth == 0 && self.pending_layout {
            self.pending_layout = false;
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn is_suspended(&self) -> bool {
        self.suspend_depth > 0
    }

    #[inline]
    pub fn suspend_depth(&self) -> u32 {
        self.suspend_depth
    }

    /// Record a layout request that arrived while suspended.
    pub fn defer_layout(&mut self) {
        self.pending_layout = true;
    }
}

// =============================================================================
// Space distribution helpers
// =============================================================================

/// Split `total` among slots in proportion to `weights`.
///
/// Shares are floored; the rounding remainder goes to the last slot with a
/// non-zero weight, so the shares always sum to `total`. All-zero weights
/// yield all-zero shares.
pub(crate) fn distribute_space(total: i32, weights: &[u32]) -> Vec<i32> {
    let mut shares = vec![0; weights.len()];
    let weight_sum: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let Some(last) = weights.iter().rposition(|&w| w > 0) else {
        return shares;
    };

    let mut given: i64 = 0;
    for (i, &weight) in weights.iter().enumerate() {
        if i == last || weight == 0 {
            continue;
        }
        let share = i64::from(total) * i64::from(weight) / weight_sum;
        shares[i] = share as i32;
        given += share;
    }
    shares[last] = (i64::from(total) - given) as i32;
    shares
}

/// Add `extra` to `tracks` in proportion to `weights`, never going below zero.
pub(crate) fn grow_tracks(tracks: &mut [i32], extra: i32, weights: &[u32]) {
    if extra == 0 {
        return;
    }
    for (track, share) in tracks.iter_mut().zip(distribute_space(extra, weights)) {
        *track = (*track + share).max(0);
    }
}

/// Total extent of `tracks` separated by `gap`.
pub(crate) fn track_total(tracks: &[i32], gap: i32) -> i32 {
    let gaps = gap * (tracks.len().saturating_sub(1) as i32);
    tracks.iter().sum::<i32>() + gaps
}

/// Start offsets of `tracks` beginning at `origin`, separated by `gap`.
pub(crate) fn track_offsets(origin: i32, tracks: &[i32], gap: i32) -> Vec<i32> {
    let mut offsets = Vec::with_capacity(tracks.len());
    let mut pos = origin;
    for &track in tracks {
        offsets.push(pos);
        pos += track + gap;
    }
    offsets
}

/// Position a span of `len` inside `[start, start + avail)`.
///
/// Returns the clamped `(start, len)` pair.
pub(crate) fn align_span(start: i32, avail: i32, len: i32, center: bool, end: bool) -> (i32, i32) {
    let len = len.clamp(0, avail.max(0));
    let free = avail - len;
    let offset = if center {
        free / 2
    } else if end {
        free
    } else {
        0
    };
    (start + offset, len)
}

/// Place content of size `min` inside `slot`.
///
/// Axes flagged with `fill_*` take the slot's full extent; the others keep
/// `min` and are aligned by the item's alignment flags.
pub(crate) fn place_in_slot(
    slot: Rect,
    min: Size,
    flags: SizerFlag,
    fill_horizontal: bool,
    fill_vertical: bool,
) -> Rect {
    let (x, width) = if fill_horizontal {
        (slot.left(), slot.width())
    } else {
        align_span(
            slot.left(),
            slot.width(),
            min.width,
            flags.contains(SizerFlag::ALIGN_CENTER_HORIZONTAL),
            flags.contains(SizerFlag::ALIGN_RIGHT),
        )
    };
    let (y, height) = if fill_vertical {
        (slot.top(), slot.height())
    } else {
        align_span(
            slot.top(),
            slot.height(),
            min.height,
            flags.contains(SizerFlag::ALIGN_CENTER_VERTICAL),
            flags.contains(SizerFlag::ALIGN_BOTTOM),
        )
    };
    Rect::new(x, y, width, height)
}
