//! Shared fixtures for sizer unit tests.

use trellis_core::{Rect, SizerId, Size, WidgetId};

use crate::widget::{Widget, WidgetStore};

/// Minimal widget recording what sizers do to it.
#[derive(Debug, Clone)]
pub(crate) struct MockWidget {
    pub min: Size,
    pub max: Option<Size>,
    pub geometry: Rect,
    pub visible: bool,
    pub sizer: Option<SizerId>,
    pub decoration: Size,
    pub display: Option<Size>,
    pub min_hint: Option<Size>,
    pub virtual_size: Option<Size>,
}

impl MockWidget {
    pub fn new(min: Size) -> Self {
        Self {
            min,
            max: None,
            geometry: Rect::ZERO,
            visible: true,
            sizer: None,
            decoration: Size::ZERO,
            display: None,
            min_hint: None,
            virtual_size: None,
        }
    }

    pub fn with_max(mut self, max: Size) -> Self {
        self.max = Some(max);
        self
    }
}

impl Widget for MockWidget {
    fn natural_min_size(&self) -> Size {
        self.min
    }

    fn max_size(&self) -> Option<Size> {
        self.max
    }

    fn geometry(&self) -> Rect {
        self.geometry
    }

    fn set_geometry(&mut self, rect: Rect) {
        self.geometry = rect;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn containing_sizer(&self) -> Option<SizerId> {
        self.sizer
    }

    fn set_containing_sizer(&mut self, sizer: Option<SizerId>) {
        self.sizer = sizer;
    }

    fn decoration_size(&self) -> Size {
        self.decoration
    }

    fn display_area(&self) -> Option<Size> {
        self.display
    }

    fn set_min_size_hint(&mut self, size: Size) {
        self.min_hint = Some(size);
    }

    fn set_virtual_size(&mut self, size: Size) {
        self.virtual_size = Some(size);
    }
}

/// A store holding one mock widget per entry of `mins`.
pub(crate) fn store_with(mins: &[Size]) -> (WidgetStore<MockWidget>, Vec<WidgetId>) {
    let mut store = WidgetStore::new();
    let ids = mins.iter().map(|&min| store.insert(MockWidget::new(min))).collect();
    (store, ids)
}

/// Geometry of a widget in the store.
pub(crate) fn geometry_of(store: &WidgetStore<MockWidget>, id: WidgetId) -> Rect {
    store.get(id).map(|w| w.geometry).unwrap_or(Rect::ZERO)
}
