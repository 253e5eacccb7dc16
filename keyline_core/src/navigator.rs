// Copyright 2026 the Keyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal pinning of the navigator panel.
//!
//! The navigator (the label tree on the left) scrolls vertically with the
//! curves but stays at the left edge of the viewport horizontally. The pin is
//! the horizontal distance the navigator must be shifted right to stay put.

use kurbo::{Rect, Size, Vec2};

use crate::backend::Viewport;

/// Horizontal navigator offset for one scroll state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NavigatorPin {
    /// Distance to shift navigator labels along x.
    pub offset_x: f64,
}

impl NavigatorPin {
    /// No shift.
    pub const NONE: Self = Self { offset_x: 0.0 };

    /// Computes the pin from a scroll offset.
    ///
    /// `view` is the full scrollable extent of the timeline, as returned by
    /// [`Layout::view_size`](crate::timeline::Layout::view_size). The scroll
    /// position is clamped to the scrollable range first, so overscroll
    /// (rubber banding) does not detach the navigator from the curves.
    #[must_use]
    pub fn compute(scroll: Vec2, viewport: Size, view: Size) -> Self {
        let max_scroll = (view.width - viewport.width).max(0.0);
        Self {
            offset_x: scroll.x.clamp(0.0, max_scroll),
        }
    }

    /// Computes the pin by querying a host [`Viewport`].
    #[must_use]
    pub fn from_viewport(viewport: &dyn Viewport, view: Size) -> Self {
        Self::compute(viewport.scroll_offset(), viewport.viewport_size(), view)
    }

    /// Translates a navigator label rect by the pin.
    #[inline]
    #[must_use]
    pub fn apply(self, label: Rect) -> Rect {
        label + Vec2::new(self.offset_x, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::TimePoint;
    use crate::timeline::{LayoutParams, Timeline};

    struct FixedViewport {
        scroll: Vec2,
        size: Size,
    }

    impl Viewport for FixedViewport {
        fn scroll_offset(&self) -> Vec2 {
            self.scroll
        }

        fn viewport_size(&self) -> Size {
            self.size
        }
    }

    #[test]
    fn follows_scroll_within_range() {
        let pin = NavigatorPin::compute(
            Vec2::new(120.0, 40.0),
            Size::new(400.0, 300.0),
            Size::new(1080.0, 1000.0),
        );
        assert_eq!(pin.offset_x, 120.0);
    }

    #[test]
    fn clamps_overscroll() {
        let view = Size::new(680.0, 100.0);
        let viewport = Size::new(400.0, 300.0);
        let left = NavigatorPin::compute(Vec2::new(-30.0, 0.0), viewport, view);
        assert_eq!(left.offset_x, 0.0);
        let right = NavigatorPin::compute(Vec2::new(1000.0, 0.0), viewport, view);
        assert_eq!(right.offset_x, 280.0);
    }

    #[test]
    fn view_narrower_than_viewport_never_moves() {
        let pin = NavigatorPin::compute(
            Vec2::new(50.0, 0.0),
            Size::new(800.0, 300.0),
            Size::new(280.0, 100.0),
        );
        assert_eq!(pin, NavigatorPin::NONE);
    }

    #[test]
    fn scroll_reaches_end_of_long_curves() {
        let mut tl = Timeline::new();
        let root = tl.create_collection(None, "Root");
        let group = tl.create_group(root, "Position");
        let x = tl.create_axis(group, "x");
        tl.add_point(x, TimePoint::new(0.0, 0.0));
        tl.add_point(x, TimePoint::new(20.0, 1.0));
        tl.update_layout(&LayoutParams::DEFAULT, false);

        // The last keyframe sits at 180 + 8 + 20 * 90 = 1988.
        let view = tl.layout().view_size();
        let viewport = Size::new(400.0, 300.0);
        let pin = NavigatorPin::compute(Vec2::new(5000.0, 0.0), viewport, view);
        assert_eq!(pin.offset_x, 1988.0 - 400.0);
    }

    #[test]
    fn queries_host_viewport() {
        let host = FixedViewport {
            scroll: Vec2::new(10.0, 0.0),
            size: Size::new(200.0, 200.0),
        };
        let pin = NavigatorPin::from_viewport(&host, Size::new(580.0, 50.0));
        assert_eq!(pin.offset_x, 10.0);
        assert_eq!(
            pin.apply(Rect::new(8.0, 8.0, 100.0, 28.0)),
            Rect::new(18.0, 8.0, 110.0, 28.0)
        );
    }
}
