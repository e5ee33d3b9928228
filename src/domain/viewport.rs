// Synchronized zoom window shared by every chart
use std::cell::RefCell;
use std::rc::Rc;

/// Index window stored by a zoom/pan gesture. Not yet clamped to the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
}

/// Inclusive index range currently on screen. `start <= end < len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize,
}

impl VisibleRange {
    pub fn count(&self) -> usize {
        self.end - self.start + 1
    }

    /// Sub-slice of `series` covered by this range.
    pub fn slice<'a, T>(&self, series: &'a [T]) -> &'a [T] {
        &series[self.start..=self.end]
    }
}

/// One logical zoom window over the current series.
///
/// The stored window is not validated when it is set. It is clamped against
/// the current series length every time it is read, so a window recorded
/// against an older, longer series still yields an in-bounds range.
#[derive(Debug, Clone, Default)]
pub struct SyncedViewport {
    window: Option<TimeWindow>,
    len: usize,
}

impl SyncedViewport {
    pub fn new(len: usize) -> Self {
        Self { window: None, len }
    }

    /// Rebase onto a new series. The stored window is kept as-is.
    pub fn set_series_len(&mut self, len: usize) {
        self.len = len;
    }

    /// Range every chart should display, or `None` for an empty series.
    pub fn visible_range(&self) -> Option<VisibleRange> {
        let last = self.len.checked_sub(1)?;
        let Some(window) = self.window else {
            return Some(VisibleRange { start: 0, end: last });
        };

        let clamp = |idx: i64| -> usize {
            if idx <= 0 {
                0
            } else {
                usize::try_from(idx).map_or(last, |idx| idx.min(last))
            }
        };
        Some(VisibleRange {
            start: clamp(window.start),
            end: clamp(window.end),
        })
    }

    /// Record a gesture. A reversed pair is stored in ascending order.
    pub fn set_range(&mut self, start: i64, end: i64) {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        self.window = Some(TimeWindow { start, end });
    }

    pub fn reset_zoom(&mut self) {
        self.window = None;
    }

    pub fn is_zoomed(&self) -> bool {
        self.window.is_some()
    }

    pub fn window(&self) -> Option<TimeWindow> {
        self.window
    }
}

/// Cloneable handle so independent chart views share one viewport.
///
/// All access happens on the UI task; the last `set_range` wins and is seen
/// by every holder on its next `visible_range` call.
#[derive(Debug, Clone, Default)]
pub struct ViewportHandle(Rc<RefCell<SyncedViewport>>);

impl ViewportHandle {
    pub fn new(viewport: SyncedViewport) -> Self {
        Self(Rc::new(RefCell::new(viewport)))
    }

    pub fn visible_range(&self) -> Option<VisibleRange> {
        self.0.borrow().visible_range()
    }

    pub fn set_range(&self, start: i64, end: i64) {
        self.0.borrow_mut().set_range(start, end);
    }

    pub fn reset_zoom(&self) {
        self.0.borrow_mut().reset_zoom();
    }

    pub fn is_zoomed(&self) -> bool {
        self.0.borrow().is_zoomed()
    }

    pub fn set_series_len(&self, len: usize) {
        self.0.borrow_mut().set_series_len(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: usize, end: usize) -> Option<VisibleRange> {
        Some(VisibleRange { start, end })
    }

    #[test]
    fn test_unset_window_is_full_range() {
        let viewport = SyncedViewport::new(10);
        assert_eq!(viewport.visible_range(), range(0, 9));
        assert!(!viewport.is_zoomed());
    }

    #[test]
    fn test_zoom_then_shrink_then_reset() {
        let mut viewport = SyncedViewport::new(10);
        viewport.set_range(3, 7);
        assert_eq!(viewport.visible_range(), range(3, 7));

        viewport.set_series_len(5);
        assert_eq!(viewport.visible_range(), range(3, 4));

        viewport.reset_zoom();
        assert_eq!(viewport.visible_range(), range(0, 4));
        assert!(!viewport.is_zoomed());
    }

    #[test]
    fn test_zoomed_even_when_window_is_full_range() {
        let mut viewport = SyncedViewport::new(10);
        viewport.set_range(0, 9);
        assert!(viewport.is_zoomed());
        assert_eq!(viewport.visible_range(), range(0, 9));
    }

    #[test]
    fn test_empty_series() {
        let mut viewport = SyncedViewport::new(0);
        assert_eq!(viewport.visible_range(), None);
        viewport.set_range(2, 4);
        assert_eq!(viewport.visible_range(), None);
        assert!(viewport.is_zoomed());
    }

    #[test]
    fn test_tolerates_wild_input() {
        let mut viewport = SyncedViewport::new(10);

        viewport.set_range(-5, 3);
        assert_eq!(viewport.visible_range(), range(0, 3));

        viewport.set_range(4, 1_000);
        assert_eq!(viewport.visible_range(), range(4, 9));

        viewport.set_range(-20, -10);
        assert_eq!(viewport.visible_range(), range(0, 0));

        viewport.set_range(50, 60);
        assert_eq!(viewport.visible_range(), range(9, 9));

        viewport.set_range(i64::MIN, i64::MAX);
        assert_eq!(viewport.visible_range(), range(0, 9));
    }

    #[test]
    fn test_reversed_pair_is_ordered() {
        let mut viewport = SyncedViewport::new(10);
        viewport.set_range(7, 2);
        assert_eq!(viewport.window(), Some(TimeWindow { start: 2, end: 7 }));
        assert_eq!(viewport.visible_range(), range(2, 7));
    }

    #[test]
    fn test_handles_share_one_window() {
        let temperature = ViewportHandle::new(SyncedViewport::new(10));
        let co2 = temperature.clone();
        let fans = temperature.clone();

        co2.set_range(2, 5);
        assert_eq!(temperature.visible_range(), range(2, 5));
        assert_eq!(fans.visible_range(), range(2, 5));

        fans.set_range(6, 8);
        assert_eq!(co2.visible_range(), range(6, 8));

        temperature.reset_zoom();
        assert!(!co2.is_zoomed());
        assert_eq!(fans.visible_range(), range(0, 9));
    }

    #[test]
    fn test_visible_slice() {
        let series: Vec<u32> = (0..10).collect();
        let visible = VisibleRange { start: 3, end: 5 };
        assert_eq!(visible.slice(&series), &[3, 4, 5]);
        assert_eq!(visible.count(), 3);
    }
}
