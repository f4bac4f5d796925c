//! Identifiers for widgets and sizers.
//!
//! - [`WidgetId`] is a non-owning handle to a widget living in the host
//!   toolkit's storage. Sizers only ever hold widgets through this handle.
//! - [`SizerId`] identifies a sizer instance for lookups such as
//!   "detach this child sizer" or "which sizer manages this widget".

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use slotmap::new_key_type;

new_key_type! {
    /// A stable handle to a widget stored outside the layout engine.
    ///
    /// Handles stay valid while the widget exists in its storage; a sizer
    /// referencing a removed widget simply skips it.
    pub struct WidgetId;
}

impl WidgetId {
    /// Convert the WidgetId to a raw u64 value.
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }

    /// Create a WidgetId from a raw u64 value.
    ///
    /// This does not check that a widget with this id exists.
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self::from(slotmap::KeyData::from_ffi(raw))
    }
}

static NEXT_SIZER_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a sizer.
///
/// Allocated once per sizer from a process-wide counter and never reused,
/// so a stale id can never alias a newer sizer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SizerId(u64);

impl SizerId {
    /// Allocate a fresh sizer id.
    pub fn next() -> Self {
        Self(NEXT_SIZER_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric value.
    #[inline]
    pub fn as_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for SizerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SizerId({})", self.0)
    }
}

impl fmt::Display for SizerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sizer#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn test_sizer_ids_are_unique() {
        let a = SizerId::next();
        let b = SizerId::next();
        assert_ne!(a, b);
        assert!(b.as_raw() > a.as_raw());
    }

    #[test]
    fn test_widget_id_raw_roundtrip() {
        let mut map: SlotMap<WidgetId, ()> = SlotMap::with_key();
        let id = map.insert(());
        assert_eq!(WidgetId::from_raw(id.as_raw()), id);
    }
}
