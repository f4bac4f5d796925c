//! Stateless constructor surface for sizers and flags.
//!
//! Hosts that create layouts from a description (a resource file, a script
//! binding) get one object to hand around instead of the individual
//! constructors on [`Sizer`].

use trellis_core::Result;

use super::box_sizer::Orientation;
use super::flags::SizerFlags;
use super::wrap_sizer::WrapFlags;
use super::Sizer;

/// Creates sizers and flag builders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizerFactory;

impl SizerFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn create_box_sizer(&self, orientation: Orientation) -> Sizer {
        Sizer::box_sizer(orientation)
    }

    /// See [`Sizer::grid`].
    pub fn create_grid_sizer(&self, rows: usize, cols: usize, vgap: i32, hgap: i32) -> Result<Sizer> {
        Sizer::grid(rows, cols, vgap, hgap)
    }

    /// See [`Sizer::flex_grid`].
    pub fn create_flex_grid_sizer(&self, rows: usize, cols: usize, vgap: i32, hgap: i32) -> Result<Sizer> {
        Sizer::flex_grid(rows, cols, vgap, hgap)
    }

    pub fn create_grid_bag_sizer(&self, vgap: i32, hgap: i32) -> Sizer {
        Sizer::grid_bag(vgap, hgap)
    }

    pub fn create_wrap_sizer(&self, orientation: Orientation, flags: WrapFlags) -> Sizer {
        Sizer::wrap(orientation, flags)
    }

    /// A flags builder starting from `proportion`.
    pub fn create_flags(&self, proportion: u32) -> SizerFlags {
        SizerFlags::new(proportion)
    }
}
