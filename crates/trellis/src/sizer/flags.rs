//! Per-item placement flags.
//!
//! [`SizerFlag`] is the raw bit set stored on each item. [`SizerFlags`] is a
//! builder bundling flags with a proportion and a border width, so call sites
//! read as a sentence:
//!
//! ```ignore
//! sizer.add_widget(&mut store, ok_button, SizerFlags::new(0).border_all().right())?;
//! ```

use bitflags::bitflags;

/// Default border width in pixels, used by [`SizerFlags::border_all`].
pub const DEFAULT_BORDER: i32 = 5;

bitflags! {
    /// Placement flags of a sizer item.
    ///
    /// Alignment defaults to left/top; there are no bits for those.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SizerFlag: u32 {
        /// Keep the item's slot even when it is hidden.
        const RESERVE_SPACE_EVEN_IF_HIDDEN = 0x0002;

        /// Apply the border to the left side.
        const BORDER_LEFT = 0x0010;
        /// Apply the border to the right side.
        const BORDER_RIGHT = 0x0020;
        /// Apply the border to the top side.
        const BORDER_TOP = 0x0040;
        /// Apply the border to the bottom side.
        const BORDER_BOTTOM = 0x0080;
        /// Apply the border to all sides.
        const BORDER_ALL = Self::BORDER_LEFT.bits()
            | Self::BORDER_RIGHT.bits()
            | Self::BORDER_TOP.bits()
            | Self::BORDER_BOTTOM.bits();

        /// Center horizontally within the slot.
        const ALIGN_CENTER_HORIZONTAL = 0x0100;
        /// Align to the right edge of the slot.
        const ALIGN_RIGHT = 0x0200;
        /// Align to the bottom edge of the slot.
        const ALIGN_BOTTOM = 0x0400;
        /// Center vertically within the slot.
        const ALIGN_CENTER_VERTICAL = 0x0800;
        /// Center in both directions.
        const ALIGN_CENTER = Self::ALIGN_CENTER_HORIZONTAL.bits()
            | Self::ALIGN_CENTER_VERTICAL.bits();

        /// Fill the slot on the axis where alignment would otherwise apply.
        const EXPAND = 0x2000;
        /// Keep the item's aspect ratio when resizing it.
        const SHAPED = 0x4000;
        /// Use the item's min size override as-is, ignoring the widget's own.
        const FIXED_MINSIZE = 0x8000;
    }
}

impl SizerFlag {
    /// All horizontal alignment bits.
    pub const HORIZONTAL_ALIGN_MASK: SizerFlag =
        SizerFlag::ALIGN_CENTER_HORIZONTAL.union(SizerFlag::ALIGN_RIGHT);

    /// All vertical alignment bits.
    pub const VERTICAL_ALIGN_MASK: SizerFlag =
        SizerFlag::ALIGN_CENTER_VERTICAL.union(SizerFlag::ALIGN_BOTTOM);
}

/// Builder for the placement of an item: proportion, flags and border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizerFlags {
    proportion: u32,
    flags: SizerFlag,
    border: i32,
}

impl SizerFlags {
    /// Start from a proportion with no flags and no border.
    pub fn new(proportion: u32) -> Self {
        Self {
            proportion,
            flags: SizerFlag::empty(),
            border: 0,
        }
    }

    /// Build from the classic `(proportion, flag, border)` triple.
    pub fn from_parts(proportion: u32, flags: SizerFlag, border: i32) -> Self {
        Self {
            proportion,
            flags,
            border: border.max(0),
        }
    }

    /// Set the proportion.
    pub fn proportion(mut self, proportion: u32) -> Self {
        self.proportion = proportion;
        self
    }

    /// Fill the slot.
    pub fn expand(mut self) -> Self {
        self.flags |= SizerFlag::EXPAND;
        self
    }

    /// Replace the alignment bits with `alignment`.
    pub fn align(mut self, alignment: SizerFlag) -> Self {
        self.flags.remove(SizerFlag::HORIZONTAL_ALIGN_MASK | SizerFlag::VERTICAL_ALIGN_MASK);
        self.flags |= alignment & (SizerFlag::HORIZONTAL_ALIGN_MASK | SizerFlag::VERTICAL_ALIGN_MASK);
        self
    }

    /// Align to the left edge.
    pub fn left(mut self) -> Self {
        self.flags.remove(SizerFlag::HORIZONTAL_ALIGN_MASK);
        self
    }

    /// Align to the right edge.
    pub fn right(mut self) -> Self {
        self.flags.remove(SizerFlag::HORIZONTAL_ALIGN_MASK);
        self.flags |= SizerFlag::ALIGN_RIGHT;
        self
    }

    /// Align to the top edge.
    pub fn top(mut self) -> Self {
        self.flags.remove(SizerFlag::VERTICAL_ALIGN_MASK);
        self
    }

    /// Align to the bottom edge.
    pub fn bottom(mut self) -> Self {
        self.flags.remove(SizerFlag::VERTICAL_ALIGN_MASK);
        self.flags |= SizerFlag::ALIGN_BOTTOM;
        self
    }

    /// Center in both directions.
    pub fn center(self) -> Self {
        self.align(SizerFlag::ALIGN_CENTER)
    }

    /// Center horizontally, keeping the vertical alignment.
    pub fn center_horizontal(mut self) -> Self {
        self.flags.remove(SizerFlag::HORIZONTAL_ALIGN_MASK);
        self.flags |= SizerFlag::ALIGN_CENTER_HORIZONTAL;
        self
    }

    /// Center vertically, keeping the horizontal alignment.
    pub fn center_vertical(mut self) -> Self {
        self.flags.remove(SizerFlag::VERTICAL_ALIGN_MASK);
        self.flags |= SizerFlag::ALIGN_CENTER_VERTICAL;
        self
    }

    /// Set a border of `width` pixels on the sides in `sides`.
    pub fn border(mut self, sides: SizerFlag, width: i32) -> Self {
        self.flags.remove(SizerFlag::BORDER_ALL);
        self.flags |= sides & SizerFlag::BORDER_ALL;
        self.border = width.max(0);
        self
    }

    /// Default border on all sides.
    pub fn border_all(self) -> Self {
        self.border(SizerFlag::BORDER_ALL, DEFAULT_BORDER)
    }

    /// Twice the default border on all sides.
    pub fn double_border(self) -> Self {
        self.border(SizerFlag::BORDER_ALL, DEFAULT_BORDER * 2)
    }

    /// Three times the default border on all sides.
    pub fn triple_border(self) -> Self {
        self.border(SizerFlag::BORDER_ALL, DEFAULT_BORDER * 3)
    }

    /// Twice the default border on the left and right only.
    pub fn horz_border(self) -> Self {
        self.border(
            SizerFlag::BORDER_LEFT | SizerFlag::BORDER_RIGHT,
            DEFAULT_BORDER * 2,
        )
    }

    /// Keep the item's aspect ratio.
    pub fn shaped(mut self) -> Self {
        self.flags |= SizerFlag::SHAPED;
        self
    }

    /// Use the item's min size override as its only minimum.
    pub fn fixed_min_size(mut self) -> Self {
        self.flags |= SizerFlag::FIXED_MINSIZE;
        self
    }

    /// Keep the slot when the item is hidden.
    pub fn reserve_space_even_if_hidden(mut self) -> Self {
        self.flags |= SizerFlag::RESERVE_SPACE_EVEN_IF_HIDDEN;
        self
    }

    /// The configured proportion.
    #[inline]
    pub fn get_proportion(&self) -> u32 {
        self.proportion
    }

    /// The configured flag bits.
    #[inline]
    pub fn get_flags(&self) -> SizerFlag {
        self.flags
    }

    /// The configured border width.
    #[inline]
    pub fn get_border(&self) -> i32 {
        self.border
    }
}
