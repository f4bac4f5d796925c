//! Layout suspension.
//!
//! Many mutations in a row would each make the owner lay out again. A
//! [`LayoutSuspension`] guard turns every [`Sizer::layout`] call made while
//! it is alive into a pending flag; when the outermost guard drops, a single
//! layout runs if anything asked for one.
//!
//! ```ignore
//! {
//!     let mut batch = root.suspend_layout(&mut store);
//!     let (sizer, store) = batch.parts();
//!     for id in ids {
//!         sizer.add_widget(store, id, SizerFlags::new(0))?;
//!         sizer.layout(store); // deferred
//!     }
//! } // one layout here
//! ```

use std::ops::{Deref, DerefMut};

use trellis_core::logging::targets;

use super::Sizer;
use crate::widget::WidgetAccess;

/// RAII guard deferring layout of a sizer until dropped.
///
/// Guards nest; only the outermost one runs the deferred layout.
pub struct LayoutSuspension<'a, S: WidgetAccess + ?Sized> {
    sizer: &'a mut Sizer,
    storage: &'a mut S,
}

impl<'a, S: WidgetAccess + ?Sized> LayoutSuspension<'a, S> {
    fn new(sizer: &'a mut Sizer, storage: &'a mut S) -> Self {
        sizer.base.suspend();
        tracing::trace!(
            target: targets::SUSPEND,
            sizer = %sizer.id,
            depth = sizer.base.suspend_depth(),
            "layout suspended"
        );
        Self { sizer, storage }
    }

    /// The suspended sizer.
    pub fn sizer(&mut self) -> &mut Sizer {
        self.sizer
    }

    /// The widget storage the deferred layout will use.
    pub fn storage(&mut self) -> &mut S {
        self.storage
    }

    /// Both halves at once, for calls that take a storage argument.
    pub fn parts(&mut self) -> (&mut Sizer, &mut S) {
        (&mut *self.sizer, &mut *self.storage)
    }

    /// Open an inner suspension level.
    pub fn nested(&mut self) -> LayoutSuspension<'_, S> {
        LayoutSuspension::new(&mut *self.sizer, &mut *self.storage)
    }

    /// Current suspension depth.
    pub fn depth(&self) -> u32 {
        self.sizer.base.suspend_depth()
    }
}

impl<S: WidgetAccess + ?Sized> Deref for LayoutSuspension<'_, S> {
    type Target = Sizer;

    fn deref(&self) -> &Sizer {
        self.sizer
    }
}

impl<S: WidgetAccess + ?Sized> DerefMut for LayoutSuspension<'_, S> {
    fn deref_mut(&mut self) -> &mut Sizer {
        self.sizer
    }
}

impl<S: WidgetAccess + ?Sized> Drop for LayoutSuspension<'_, S> {
    fn drop(&mut self) {
        if self.sizer.base.resume() {
            tracing::debug!(target: targets::SUSPEND, sizer = %self.sizer.id, "running deferred layout");
            self.sizer.layout(self.storage);
        }
    }
}

impl Sizer {
    /// Defer layouts of this sizer until the returned guard is dropped.
    pub fn suspend_layout<'a, S: WidgetAccess + ?Sized>(&'a mut self, storage: &'a mut S) -> LayoutSuspension<'a, S> {
        LayoutSuspension::new(self, storage)
    }

    /// Whether a [`LayoutSuspension`] is alive for this sizer.
    #[inline]
    pub fn is_layout_suspended(&self) -> bool {
        self.base.is_suspended()
    }
}
