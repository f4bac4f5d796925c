//! Fitting a window to its sizer.
//!
//! The helpers here size the *owner* of a sizer (the widget whose client
//! area the sizer fills) from the sizer's minimum. The owner is addressed by
//! id like any other widget but is not an item of the sizer.
//!
//! The fitted size never exceeds the display's usable area or the owner's
//! own maximum size.

use trellis_core::logging::{span_names, targets};
use trellis_core::{LayoutError, PerfSpan, Point, Rect, Result, Size, WidgetId};

use super::Sizer;
use crate::widget::{Widget, WidgetAccess};

impl Sizer {
    /// Client size the owner needs to show the sizer's minimum, within the
    /// owner's bounds.
    pub fn compute_fitting_client_size<S: WidgetAccess + ?Sized>(
        &mut self,
        storage: &S,
        owner: WidgetId,
    ) -> Result<Size> {
        let min = self.min_size(storage);
        let widget = storage
            .get_widget(owner)
            .ok_or(LayoutError::UnknownWidget(owner))?;
        Ok(clamp_client(widget, min))
    }

    /// Outer size the owner needs: the fitting client size plus decorations.
    pub fn compute_fitting_window_size<S: WidgetAccess + ?Sized>(
        &mut self,
        storage: &S,
        owner: WidgetId,
    ) -> Result<Size> {
        let client = self.compute_fitting_client_size(storage, owner)?;
        let decoration = storage
            .get_widget(owner)
            .map(|w| w.decoration_size())
            .unwrap_or(Size::ZERO);
        Ok(client + decoration)
    }

    /// Resize the owner to its fitting window size, keeping its position,
    /// and lay the sizer out in the new client area.
    ///
    /// Returns the new outer size.
    pub fn fit<S: WidgetAccess + ?Sized>(&mut self, storage: &mut S, owner: WidgetId) -> Result<Size> {
        let _span = PerfSpan::new(span_names::FIT);
        let client = self.compute_fitting_client_size(&*storage, owner)?;
        let widget = storage
            .get_widget_mut(owner)
            .ok_or(LayoutError::UnknownWidget(owner))?;
        let outer = client + widget.decoration_size();
        let origin = widget.geometry().origin;
        widget.set_geometry(Rect::from_origin_size(origin, outer));

        tracing::debug!(target: targets::FIT, sizer = %self.id, ?owner, ?outer, "owner fitted");
        self.set_dimension(Rect::from_origin_size(Point::ZERO, client), storage);
        Ok(outer)
    }

    /// Make the owner's virtual (scrollable) area at least the sizer's
    /// minimum, leaving its real size alone.
    pub fn fit_inside<S: WidgetAccess + ?Sized>(&mut self, storage: &mut S, owner: WidgetId) -> Result<Size> {
        let min = self.min_size(&*storage);
        let widget = storage
            .get_widget_mut(owner)
            .ok_or(LayoutError::UnknownWidget(owner))?;
        widget.set_virtual_size(min);
        tracing::debug!(target: targets::FIT, sizer = %self.id, ?owner, virtual_size = ?min, "virtual size set");
        Ok(min)
    }

    /// Record the sizer's minimum as the owner's minimum outer size, then
    /// fit the owner.
    pub fn set_size_hints<S: WidgetAccess + ?Sized>(&mut self, storage: &mut S, owner: WidgetId) -> Result<Size> {
        let hint = self.compute_fitting_window_size(&*storage, owner)?;
        if let Some(widget) = storage.get_widget_mut(owner) {
            widget.set_min_size_hint(hint);
        }
        tracing::debug!(target: targets::FIT, sizer = %self.id, ?owner, ?hint, "size hints set");
        self.fit(storage, owner)
    }
}

/// Clamp a client size to what the owner's display and maximum allow.
fn clamp_client(widget: &dyn Widget, client: Size) -> Size {
    let decoration = widget.decoration_size();
    let mut size = client;
    if let Some(display) = widget.display_area() {
        size = size.min(display - decoration);
    }
    if let Some(max) = widget.max_size() {
        size = size.min(max - decoration);
    }
    size.non_negative()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sizer::flags::SizerFlags;
    use crate::sizer::test_support::{MockWidget, geometry_of, store_with};

    fn window(store: &mut crate::WidgetStore<MockWidget>, decoration: Size) -> WidgetId {
        let mut owner = MockWidget::new(Size::ZERO);
        owner.geometry = Rect::new(30, 40, 1, 1);
        owner.decoration = decoration;
        store.insert(owner)
    }

    #[test]
    fn test_fit_resizes_owner_and_lays_out() {
        let (mut store, ids) = store_with(&[Size::new(100, 20), Size::new(80, 30)]);
        let owner = window(&mut store, Size::new(4, 24));
        let mut sizer = Sizer::vertical();
        for &id in &ids {
            sizer.add_widget(&mut store, id, SizerFlags::new(0)).unwrap();
        }

        assert_eq!(sizer.compute_fitting_client_size(&store, owner), Ok(Size::new(100, 50)));
        assert_eq!(sizer.compute_fitting_window_size(&store, owner), Ok(Size::new(104, 74)));
        assert_eq!(sizer.fit(&mut store, owner), Ok(Size::new(104, 74)));
        assert_eq!(geometry_of(&store, owner), Rect::new(30, 40, 104, 74));
        assert_eq!(geometry_of(&store, ids[1]), Rect::new(0, 20, 80, 30));
    }

    #[test]
    fn test_fit_respects_display_and_max() {
        let (mut store, ids) = store_with(&[Size::new(500, 400)]);
        let owner = window(&mut store, Size::new(10, 10));
        if let Some(w) = store.get_mut(owner) {
            w.display = Some(Size::new(300, 1000));
            w.max = Some(Size::new(1000, 210));
        }
        let mut sizer = Sizer::vertical();
        sizer.add_widget(&mut store, ids[0], SizerFlags::new(0)).unwrap();

        assert_eq!(sizer.compute_fitting_client_size(&store, owner), Ok(Size::new(290, 200)));
        assert_eq!(sizer.fit(&mut store, owner), Ok(Size::new(300, 210)));
    }

    #[test]
    fn test_fit_inside_sets_virtual_size() {
        let (mut store, ids) = store_with(&[Size::new(60, 70)]);
        let owner = window(&mut store, Size::ZERO);
        let mut sizer = Sizer::vertical();
        sizer.add_widget(&mut store, ids[0], SizerFlags::new(0)).unwrap();

        assert_eq!(sizer.fit_inside(&mut store, owner), Ok(Size::new(60, 70)));
        let owner_widget = store.get(owner).expect("owner");
        assert_eq!(owner_widget.virtual_size, Some(Size::new(60, 70)));
        assert_eq!(owner_widget.geometry, Rect::new(30, 40, 1, 1));
    }

    #[test]
    fn test_set_size_hints() {
        let (mut store, ids) = store_with(&[Size::new(60, 70)]);
        let owner = window(&mut store, Size::new(2, 2));
        let mut sizer = Sizer::vertical();
        sizer.add_widget(&mut store, ids[0], SizerFlags::new(0)).unwrap();

        assert_eq!(sizer.set_size_hints(&mut store, owner), Ok(Size::new(62, 72)));
        assert_eq!(store.get(owner).and_then(|w| w.min_hint), Some(Size::new(62, 72)));
    }

    #[test]
    fn test_unknown_owner() {
        let (mut store, ids) = store_with(&[Size::new(10, 10)]);
        store.remove(ids[0]);
        let mut sizer = Sizer::vertical();
        assert_eq!(sizer.fit(&mut store, ids[0]), Err(LayoutError::UnknownWidget(ids[0])));
    }
}
