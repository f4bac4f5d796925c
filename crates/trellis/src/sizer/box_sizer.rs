//! Box sizer implementation.
//!
//! BoxSizer stacks items along a single axis. Extra main-axis space is
//! shared among items with a non-zero proportion; on the cross axis each
//! item either fills the sizer (`EXPAND`) or keeps its minimum and is
//! aligned by its flags.
//!
//! # Example
//!
//! ```ignore
//! use trellis::prelude::*;
//!
//! let mut row = Sizer::horizontal();
//! row.add_widget(&mut store, label, SizerFlags::new(0).center_vertical())?;
//! row.add_widget(&mut store, field, SizerFlags::new(1).expand())?;
//! row.set_dimension(Rect::new(0, 0, 400, 30), &mut store);
//! ```

use trellis_core::{Rect, Size};

use super::Arrange;
use super::base::{distribute_space, place_in_slot};
use super::flags::SizerFlag;
use super::item::SizerItem;

/// Direction of a box or wrap sizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Items are placed left to right.
    #[default]
    Horizontal,
    /// Items are placed top to bottom.
    Vertical,
}

impl Orientation {
    /// The perpendicular orientation.
    pub fn opposite(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Extent of `size` along this axis.
    #[inline]
    pub fn main(self, size: Size) -> i32 {
        match self {
            Orientation::Horizontal => size.width,
            Orientation::Vertical => size.height,
        }
    }

    /// Extent of `size` across this axis.
    #[inline]
    pub fn cross(self, size: Size) -> i32 {
        self.opposite().main(size)
    }

    /// Build a size from main and cross extents.
    pub fn make_size(self, main: i32, cross: i32) -> Size {
        match self {
            Orientation::Horizontal => Size::new(main, cross),
            Orientation::Vertical => Size::new(cross, main),
        }
    }

    /// Start coordinate of `rect` along this axis.
    #[inline]
    pub fn main_start(self, rect: Rect) -> i32 {
        match self {
            Orientation::Horizontal => rect.left(),
            Orientation::Vertical => rect.top(),
        }
    }

    /// Start coordinate of `rect` across this axis.
    #[inline]
    pub fn cross_start(self, rect: Rect) -> i32 {
        self.opposite().main_start(rect)
    }

    /// Build a rectangle from main/cross positions and extents.
    pub fn make_rect(self, main_pos: i32, cross_pos: i32, main_len: i32, cross_len: i32) -> Rect {
        match self {
            Orientation::Horizontal => Rect::new(main_pos, cross_pos, main_len, cross_len),
            Orientation::Vertical => Rect::new(cross_pos, main_pos, cross_len, main_len),
        }
    }
}

/// A single-axis stacking sizer.
#[derive(Debug, Clone)]
pub struct BoxSizer {
    orientation: Orientation,
}

impl BoxSizer {
    /// Create a box sizer stacking along `orientation`.
    pub fn new(orientation: Orientation) -> Self {
        Self { orientation }
    }

    /// Get the stacking direction.
    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Set the stacking direction.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }
}

impl Arrange for BoxSizer {
    fn calc_min(&mut self, items: &[SizerItem]) -> Size {
        let o = self.orientation;
        let (main, cross) = items
            .iter()
            .filter(|item| item.occupies_slot())
            .map(SizerItem::min_size_with_border)
            .fold((0, 0), |(main, cross), min| {
                (main + o.main(min), cross.max(o.cross(min)))
            });
        o.make_size(main, cross)
    }

    fn arrange(&mut self, items: &[SizerItem], rect: Rect) -> Vec<Option<Rect>> {
        let mut slots = vec![None; items.len()];
        let shown: Vec<usize> = (0..items.len()).filter(|&i| items[i].occupies_slot()).collect();
        let placed = stack_line(self.orientation, items, &shown, rect, 0, false);
        for (index, slot) in shown.into_iter().zip(placed) {
            slots[index] = Some(slot);
        }
        slots
    }
}

/// Lay out `members` of `items` along one line filling `rect`, `gap` apart.
///
/// With `extend_last`, a line without proportional items gives its slack to
/// the last member instead of leaving it unused.
pub(crate) fn stack_line(
    o: Orientation,
    items: &[SizerItem],
    members: &[usize],
    rect: Rect,
    gap: i32,
    extend_last: bool,
) -> Vec<Rect> {
    let mins: Vec<Size> = members.iter().map(|&i| items[i].min_size_with_border()).collect();
    let gaps = gap * (members.len().saturating_sub(1) as i32);
    let available = o.main(rect.size) - gaps;
    let total_min: i32 = mins.iter().map(|&m| o.main(m)).sum();

    let main_sizes: Vec<i32> = if available >= total_min {
        let mut weights: Vec<u32> = members.iter().map(|&i| items[i].proportion()).collect();
        if extend_last && weights.iter().all(|&w| w == 0) {
            if let Some(last) = weights.last_mut() {
                *last = 1;
            }
        }
        let extras = distribute_space(available - total_min, &weights);
        mins.iter().zip(extras).map(|(&m, extra)| o.main(m) + extra).collect()
    } else {
        // Too small: shrink every member in proportion to its minimum.
        let weights: Vec<u32> = mins.iter().map(|&m| o.main(m).max(0) as u32).collect();
        distribute_space(available.max(0), &weights)
    };

    let cross_pos = o.cross_start(rect);
    let cross_len = o.cross(rect.size);
    let mut pos = o.main_start(rect);
    let mut placed = Vec::with_capacity(members.len());
    for ((&index, min), len) in members.iter().zip(mins).zip(main_sizes) {
        let item = &items[index];
        let slot = o.make_rect(pos, cross_pos, len, cross_len);
        let expand = item.flags().contains(SizerFlag::EXPAND);
        let rect = match o {
            Orientation::Horizontal => place_in_slot(slot, min, item.flags(), true, expand),
            Orientation::Vertical => place_in_slot(slot, min, item.flags(), expand, true),
        };
        placed.push(rect);
        pos += len + gap;
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sizer::Sizer;
    use crate::sizer::flags::SizerFlags;
    use crate::sizer::test_support::{geometry_of, store_with};

    #[test]
    fn test_orientation_helpers() {
        let size = Size::new(10, 20);
        assert_eq!(Orientation::Horizontal.main(size), 10);
        assert_eq!(Orientation::Vertical.main(size), 20);
        assert_eq!(Orientation::Vertical.make_size(5, 7), Size::new(7, 5));
        assert_eq!(
            Orientation::Vertical.make_rect(1, 2, 3, 4),
            Rect::new(2, 1, 4, 3)
        );
    }

    #[test]
    fn test_box_min_size() {
        let (mut store, ids) = store_with(&[Size::new(10, 5), Size::new(20, 15), Size::new(30, 10)]);
        let mut sizer = Sizer::horizontal();
        for &id in &ids {
            sizer.add_widget(&mut store, id, SizerFlags::new(0)).unwrap();
        }
        assert_eq!(sizer.calc_min(&store), Size::new(60, 15));

        let mut column = Sizer::vertical();
        let (mut store, ids) = store_with(&[Size::new(10, 5), Size::new(20, 15)]);
        for &id in &ids {
            column.add_widget(&mut store, id, SizerFlags::new(0).border_all()).unwrap();
        }
        assert_eq!(column.calc_min(&store), Size::new(30, 40));
    }

    #[test]
    fn test_box_proportional_distribution() {
        let (mut store, ids) = store_with(&[Size::new(10, 10), Size::new(20, 10), Size::new(30, 10)]);
        let mut sizer = Sizer::horizontal();
        for (&id, prop) in ids.iter().zip([1, 1, 2]) {
            sizer.add_widget(&mut store, id, SizerFlags::new(prop)).unwrap();
        }
        sizer.set_dimension(Rect::new(0, 0, 100, 10), &mut store);

        assert_eq!(geometry_of(&store, ids[0]), Rect::new(0, 0, 20, 10));
        assert_eq!(geometry_of(&store, ids[1]), Rect::new(20, 0, 30, 10));
        assert_eq!(geometry_of(&store, ids[2]), Rect::new(50, 0, 50, 10));
    }

    #[test]
    fn test_box_cross_axis_alignment() {
        let (mut store, ids) = store_with(&[Size::new(10, 10), Size::new(10, 10), Size::new(10, 10)]);
        let mut sizer = Sizer::horizontal();
        sizer.add_widget(&mut store, ids[0], SizerFlags::new(0).expand()).unwrap();
        sizer.add_widget(&mut store, ids[1], SizerFlags::new(0).center_vertical()).unwrap();
        sizer.add_widget(&mut store, ids[2], SizerFlags::new(0).bottom()).unwrap();
        sizer.set_dimension(Rect::new(0, 0, 100, 50), &mut store);

        assert_eq!(geometry_of(&store, ids[0]), Rect::new(0, 0, 10, 50));
        assert_eq!(geometry_of(&store, ids[1]), Rect::new(10, 20, 10, 10));
        assert_eq!(geometry_of(&store, ids[2]), Rect::new(20, 40, 10, 10));
    }

    #[test]
    fn test_box_shrinks_below_minimum() {
        let (mut store, ids) = store_with(&[Size::new(30, 10), Size::new(60, 10)]);
        let mut sizer = Sizer::horizontal();
        for &id in &ids {
            sizer.add_widget(&mut store, id, SizerFlags::new(1)).unwrap();
        }
        sizer.set_dimension(Rect::new(0, 0, 45, 10), &mut store);

        assert_eq!(geometry_of(&store, ids[0]), Rect::new(0, 0, 15, 10));
        assert_eq!(geometry_of(&store, ids[1]), Rect::new(15, 0, 30, 10));
    }

    #[test]
    fn test_nested_box_sizers() {
        let (mut store, ids) = store_with(&[Size::new(10, 10), Size::new(10, 20), Size::new(40, 5)]);
        let mut inner = Sizer::horizontal();
        inner.add_widget(&mut store, ids[0], SizerFlags::new(1)).unwrap();
        inner.add_widget(&mut store, ids[1], SizerFlags::new(0)).unwrap();

        let mut outer = Sizer::vertical();
        outer.add_sizer(inner, SizerFlags::new(1).expand()).unwrap();
        outer.add_widget(&mut store, ids[2], SizerFlags::new(0)).unwrap();

        assert_eq!(outer.calc_min(&store), Size::new(40, 25));
        outer.set_dimension(Rect::new(0, 0, 100, 100), &mut store);

        assert_eq!(geometry_of(&store, ids[0]), Rect::new(0, 0, 90, 10));
        assert_eq!(geometry_of(&store, ids[1]), Rect::new(90, 0, 10, 20));
        assert_eq!(geometry_of(&store, ids[2]), Rect::new(0, 95, 40, 5));
    }

    #[test]
    fn test_spacers_take_space() {
        let (mut store, ids) = store_with(&[Size::new(10, 10), Size::new(10, 10)]);
        let mut sizer = Sizer::horizontal();
        sizer.add_widget(&mut store, ids[0], SizerFlags::new(0)).unwrap();
        sizer.add_stretch_spacer(1).unwrap();
        sizer.add_widget(&mut store, ids[1], SizerFlags::new(0)).unwrap();
        sizer.set_dimension(Rect::new(0, 0, 100, 10), &mut store);

        assert_eq!(geometry_of(&store, ids[1]), Rect::new(90, 0, 10, 10));
    }
}
