//! Core types for Trellis.
//!
//! This crate holds the pieces of the layout engine that do not depend on any
//! sizer logic:
//!
//! - **Geometry**: integer [`Point`], [`Size`] and [`Rect`]
//! - **Identifiers**: [`WidgetId`] (non-owning widget handle) and [`SizerId`]
//! - **Errors**: [`LayoutError`] and the [`Result`] alias
//! - **Logging**: tracing targets, span names and [`PerfSpan`]

mod error;
pub mod geometry;
mod id;
pub mod logging;

pub use error::{LayoutError, Result};
pub use geometry::{Point, Rect, Size};
pub use id::{SizerId, WidgetId};
pub use logging::PerfSpan;

static_assertions::assert_impl_all!(Rect: Send, Sync, Copy);
static_assertions::assert_impl_all!(LayoutError: Send, Sync, std::error::Error);
