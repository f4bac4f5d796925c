//! Wrap sizer implementation.
//!
//! WrapSizer behaves like a [`super::BoxSizer`] until the next item would
//! not fit in the available main-axis extent; it then starts a new line
//! across the main axis. Each line is as thick as its thickest item and is
//! laid out with the box rules using only that line's slack.
//!
//! The available extent is taken from [`Sizer::inform_first_direction`]
//! when the owner provides it, otherwise from the previous layout. Before
//! either is known everything sits on one line.
//!
//! [`Sizer::inform_first_direction`]: super::Sizer::inform_first_direction

use bitflags::bitflags;
use trellis_core::{Rect, Size};

use super::Arrange;
use super::box_sizer::{Orientation, stack_line};
use super::item::SizerItem;

bitflags! {
    /// Behaviour switches of a wrap sizer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WrapFlags: u32 {
        /// Give a line's unused space to its last item when no item on the
        /// line has a proportion.
        const EXTEND_LAST_ON_EACH_LINE = 0x0001;
        /// Drop spacers that would start a wrapped line.
        const REMOVE_LEADING_SPACES = 0x0002;
    }
}

impl Default for WrapFlags {
    fn default() -> Self {
        WrapFlags::EXTEND_LAST_ON_EACH_LINE | WrapFlags::REMOVE_LEADING_SPACES
    }
}

/// A box sizer that wraps onto new lines.
#[derive(Debug, Clone)]
pub struct WrapSizer {
    orientation: Orientation,
    flags: WrapFlags,
    item_gap: i32,
    line_gap: i32,
    /// Extent announced by the owner for the next pass.
    informed_extent: Option<i32>,
    /// Extent of the last layout.
    last_extent: Option<i32>,
    line_count: usize,
}

impl WrapSizer {
    /// Create a wrap sizer filling lines along `orientation`.
    pub fn new(orientation: Orientation, flags: WrapFlags) -> Self {
        Self {
            orientation,
            flags,
            item_gap: 0,
            line_gap: 0,
            informed_extent: None,
            last_extent: None,
            line_count: 0,
        }
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    #[inline]
    pub fn flags(&self) -> WrapFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: WrapFlags) {
        self.flags = flags;
    }

    /// Gap between items on a line.
    #[inline]
    pub fn item_gap(&self) -> i32 {
        self.item_gap
    }

    pub fn set_item_gap(&mut self, gap: i32) {
        self.item_gap = gap.max(0);
    }

    /// Gap between lines.
    #[inline]
    pub fn line_gap(&self) -> i32 {
        self.line_gap
    }

    pub fn set_line_gap(&mut self, gap: i32) {
        self.line_gap = gap.max(0);
    }

    /// Number of lines from the last `calc_min` or layout.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Split the shown items into lines no longer than `extent`.
    fn break_lines(&self, items: &[SizerItem], extent: Option<i32>) -> Vec<Vec<usize>> {
        let o = self.orientation;
        let mut lines: Vec<Vec<usize>> = Vec::new();
        let mut current: Vec<usize> = Vec::new();
        let mut used = 0;

        for (index, item) in items.iter().enumerate().filter(|(_, item)| item.occupies_slot()) {
            let main = o.main(item.min_size_with_border());
            if let Some(extent) = extent {
                if !current.is_empty() && used + self.item_gap + main > extent {
                    lines.push(std::mem::take(&mut current));
                    used = 0;
                }
            }
            if current.is_empty()
                && !lines.is_empty()
                && item.is_spacer()
                && self.flags.contains(WrapFlags::REMOVE_LEADING_SPACES)
            {
                continue;
            }
            if !current.is_empty() {
                used += self.item_gap;
            }
            used += main;
            current.push(index);
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    fn line_extents(&self, items: &[SizerItem], line: &[usize]) -> (i32, i32) {
        let o = self.orientation;
        let gaps = self.item_gap * (line.len().saturating_sub(1) as i32);
        line.iter()
            .map(|&i| items[i].min_size_with_border())
            .fold((gaps, 0), |(main, cross), min| {
                (main + o.main(min), cross.max(o.cross(min)))
            })
    }
}

impl Arrange for WrapSizer {
    fn calc_min(&mut self, items: &[SizerItem]) -> Size {
        let extent = self.informed_extent.or(self.last_extent);
        let lines = self.break_lines(items, extent);
        self.line_count = lines.len();

        let (main, cross) = lines
            .iter()
            .map(|line| self.line_extents(items, line))
            .fold((0, 0), |(main, cross), (line_main, line_cross)| {
                (main.max(line_main), cross + line_cross)
            });
        let line_gaps = self.line_gap * (lines.len().saturating_sub(1) as i32);
        self.orientation.make_size(main, cross + line_gaps)
    }

    fn arrange(&mut self, items: &[SizerItem], rect: Rect) -> Vec<Option<Rect>> {
        let o = self.orientation;
        let extent = o.main(rect.size);
        let lines = self.break_lines(items, Some(extent));
        self.line_count = lines.len();
        self.last_extent = Some(extent);
        self.informed_extent = None;

        let extend_last = self.flags.contains(WrapFlags::EXTEND_LAST_ON_EACH_LINE);
        let mut slots = vec![None; items.len()];
        let mut cross_pos = o.cross_start(rect);
        for line in &lines {
            let (_, line_cross) = self.line_extents(items, line);
            let line_rect = o.make_rect(o.main_start(rect), cross_pos, extent, line_cross);
            let placed = stack_line(o, items, line, line_rect, self.item_gap, extend_last);
            for (&index, slot) in line.iter().zip(placed) {
                slots[index] = Some(slot);
            }
            cross_pos += line_cross + self.line_gap;
        }
        slots
    }

    fn inform_first_direction(&mut self, orientation: Orientation, size: i32) -> bool {
        if orientation != self.orientation || size <= 0 {
            return false;
        }
        self.informed_extent = Some(size);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sizer::Sizer;
    use crate::sizer::flags::SizerFlags;
    use crate::sizer::test_support::{geometry_of, store_with};

    #[test]
    fn test_single_line_without_extent() {
        let (mut store, ids) = store_with(&[Size::new(40, 10); 3]);
        let mut sizer = Sizer::wrap(Orientation::Horizontal, WrapFlags::default());
        for &id in &ids {
            sizer.add_widget(&mut store, id, SizerFlags::new(0)).unwrap();
        }
        assert_eq!(sizer.calc_min(&store), Size::new(120, 10));
        assert_eq!(sizer.as_wrap().map(WrapSizer::line_count), Some(1));
    }

    #[test]
    fn test_wraps_at_informed_extent() {
        let (mut store, ids) = store_with(&[Size::new(40, 10), Size::new(40, 20), Size::new(40, 15)]);
        let mut sizer = Sizer::wrap(Orientation::Horizontal, WrapFlags::empty());
        for &id in &ids {
            sizer.add_widget(&mut store, id, SizerFlags::new(0)).unwrap();
        }
        assert!(sizer.inform_first_direction(Orientation::Horizontal, 100));
        assert_eq!(sizer.calc_min(&store), Size::new(80, 35));
        assert_eq!(sizer.as_wrap().map(WrapSizer::line_count), Some(2));

        sizer.set_dimension(Rect::new(0, 0, 100, 35), &mut store);
        assert_eq!(geometry_of(&store, ids[1]), Rect::new(40, 0, 40, 20));
        assert_eq!(geometry_of(&store, ids[2]), Rect::new(0, 20, 40, 15));
    }

    #[test]
    fn test_extend_last_on_each_line() {
        let (mut store, ids) = store_with(&[Size::new(40, 10); 3]);
        let mut sizer = Sizer::wrap(Orientation::Horizontal, WrapFlags::EXTEND_LAST_ON_EACH_LINE);
        for &id in &ids {
            sizer.add_widget(&mut store, id, SizerFlags::new(0)).unwrap();
        }
        sizer.set_dimension(Rect::new(0, 0, 100, 20), &mut store);

        assert_eq!(geometry_of(&store, ids[1]), Rect::new(40, 0, 60, 10));
        assert_eq!(geometry_of(&store, ids[2]), Rect::new(0, 10, 100, 10));
    }

    #[test]
    fn test_leading_spacer_removed_on_wrapped_line() {
        let (mut store, ids) = store_with(&[Size::new(60, 10), Size::new(30, 10)]);
        let mut sizer = Sizer::wrap(Orientation::Horizontal, WrapFlags::REMOVE_LEADING_SPACES);
        sizer.add_widget(&mut store, ids[0], SizerFlags::new(0)).unwrap();
        sizer.add_space(50, 5, SizerFlags::new(0)).unwrap();
        sizer.add_widget(&mut store, ids[1], SizerFlags::new(0)).unwrap();
        sizer.set_dimension(Rect::new(0, 0, 100, 20), &mut store);

        assert_eq!(sizer.as_wrap().map(WrapSizer::line_count), Some(2));
        assert_eq!(geometry_of(&store, ids[1]), Rect::new(0, 10, 30, 10));
    }

    #[test]
    fn test_gaps() {
        let (mut store, ids) = store_with(&[Size::new(40, 10); 3]);
        let mut sizer = Sizer::wrap(Orientation::Horizontal, WrapFlags::empty());
        if let Some(wrap) = sizer.as_wrap_mut() {
            wrap.set_item_gap(10);
            wrap.set_line_gap(5);
        }
        for &id in &ids {
            sizer.add_widget(&mut store, id, SizerFlags::new(0)).unwrap();
        }
        sizer.inform_first_direction(Orientation::Horizontal, 100);
        assert_eq!(sizer.calc_min(&store), Size::new(90, 25));
    }

    #[test]
    fn test_proportions_use_line_slack() {
        let (mut store, ids) = store_with(&[
            Size::new(30, 10),
            Size::new(30, 10),
            Size::new(50, 10),
            Size::new(20, 10),
        ]);
        let mut sizer = Sizer::wrap(Orientation::Horizontal, WrapFlags::empty());
        for (&id, proportion) in ids.iter().zip([1, 1, 1, 0]) {
            sizer.add_widget(&mut store, id, SizerFlags::new(proportion)).unwrap();
        }
        sizer.set_dimension(Rect::new(0, 0, 100, 20), &mut store);

        // First line has 40 px of slack shared by two items, the second
        // line 30 px given to its single proportional item.
        assert_eq!(sizer.as_wrap().map(WrapSizer::line_count), Some(2));
        assert_eq!(geometry_of(&store, ids[0]), Rect::new(0, 0, 50, 10));
        assert_eq!(geometry_of(&store, ids[1]), Rect::new(50, 0, 50, 10));
        assert_eq!(geometry_of(&store, ids[2]), Rect::new(0, 10, 80, 10));
        assert_eq!(geometry_of(&store, ids[3]), Rect::new(80, 10, 20, 10));
    }

    #[test]
    fn test_reserved_hidden_sizer_keeps_place_on_line() {
        let (mut store, ids) = store_with(&[Size::new(40, 10); 3]);
        let mut inner = Sizer::horizontal();
        inner.add_widget(&mut store, ids[0], SizerFlags::new(0)).unwrap();
        let mut sizer = Sizer::wrap(Orientation::Horizontal, WrapFlags::empty());
        sizer.add_sizer(inner, SizerFlags::new(0).reserve_space_even_if_hidden()).unwrap();
        sizer.add_widget(&mut store, ids[1], SizerFlags::new(0)).unwrap();
        sizer.add_widget(&mut store, ids[2], SizerFlags::new(0)).unwrap();
        sizer.hide_index(&mut store, 0).unwrap();

        sizer.inform_first_direction(Orientation::Horizontal, 100);
        assert_eq!(sizer.calc_min(&store), Size::new(80, 20));

        sizer.set_dimension(Rect::new(0, 0, 100, 20), &mut store);
        assert_eq!(geometry_of(&store, ids[1]), Rect::new(40, 0, 40, 10));
        assert_eq!(geometry_of(&store, ids[2]), Rect::new(0, 10, 40, 10));
        assert_eq!(store.get(ids[0]).map(|w| w.visible), Some(false));
    }

    #[test]
    fn test_inform_other_direction_ignored() {
        let mut sizer = Sizer::wrap(Orientation::Horizontal, WrapFlags::default());
        assert!(!sizer.inform_first_direction(Orientation::Vertical, 100));
    }
}
