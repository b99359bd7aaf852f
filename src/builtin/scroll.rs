//! `<scroll>`: the scrolling viewport.

use super::ratio::require_single_child;
use crate::core::driver::{run_passes, LayoutError};
use crate::core::element::{composite, Common, Element, ElementBox, Layout};
use crate::core::geometry::{Axis, Bounds, Point};
use crate::core::size::{AncestorEntry, ResolveCx};
use crate::core::xml::{common_from_attrs, Attrs, ParseCx, RawNode};
use crate::Error;
use std::any::Any;

pub const DEFAULT_SCROLL_RATE: f64 = 10.0;

/// Shows a window onto a single, potentially larger child. Scroll input
/// translates a virtual content rectangle; the child is re-resolved
/// against it whenever it actually moves.
pub struct Scroll {
    common: Common,
    scroll_rate: f64,
    child: ElementBox,
    /// The on-screen window, captured on first resolution.
    frame: Option<Bounds>,
    /// Where the child currently hangs, same size as the frame.
    content: Option<Bounds>,
    // environment captured for event-path re-resolution
    chain: Vec<AncestorEntry>,
    window: Option<Point>,
}

impl Scroll {
    pub fn new(common: Common, scroll_rate: f64, child: ElementBox) -> Self {
        Self {
            common,
            scroll_rate,
            child,
            frame: None,
            content: None,
            chain: Vec::new(),
            window: None,
        }
    }

    pub(crate) fn build(cx: &mut ParseCx<'_>, raw: RawNode) -> Result<ElementBox, Error> {
        let RawNode { line, attrs, children, .. } = raw;
        let mut attrs = Attrs::new("scroll", line, attrs);
        let common = common_from_attrs(&mut attrs)?;
        let scroll_rate = attrs.parse("scroll-rate")?.unwrap_or(DEFAULT_SCROLL_RATE);
        attrs.finish()?;
        let child = require_single_child(cx, "scroll", line, children)?;
        Ok(Box::new(Scroll::new(common, scroll_rate, child)))
    }

    /// The rectangle the child is currently resolved against.
    pub fn content_bounds(&self) -> Option<Bounds> {
        self.content
    }

    /// Handles one scroll input. Returns `Ok(true)` when the content
    /// moved and a redraw is due. The content only moves on axes where
    /// the child exceeds the frame, and never past the child's extent.
    pub fn scroll(&mut self, delta: Point) -> Result<bool, LayoutError> {
        let (Some(frame), Some(previous), Some(window)) = (self.frame, self.content, self.window)
        else {
            return Ok(false);
        };
        let (Some(child_width), Some(child_height)) =
            (self.child.common().width(), self.child.common().height())
        else {
            return Ok(false);
        };

        let mut content = previous;
        if child_width > frame.extent(Axis::Horizontal) {
            let width = frame.extent(Axis::Horizontal);
            content.min.x += delta.x * self.scroll_rate;
            // the content's left edge trails the frame's by at most the
            // child's overhang
            let overhang = child_width - width;
            let offset = (frame.min.x - content.min.x).clamp(0.0, overhang);
            content.min.x = frame.min.x - offset;
            content.max.x = content.min.x + width;
        }
        if child_height > frame.extent(Axis::Vertical) {
            let height = frame.extent(Axis::Vertical);
            content.max.y -= delta.y * self.scroll_rate;
            let overhang = child_height - height;
            let offset = (content.max.y - frame.max.y).clamp(0.0, overhang);
            content.max.y = frame.max.y + offset;
            content.min.y = content.max.y - height;
        }

        if content == previous {
            return Ok(false);
        }
        log::debug!(
            "'{}' scrolled to {:?}",
            self.common.display_name(),
            content.min
        );
        self.content = Some(content);
        self.child.reset_position();
        let chain = self.chain.clone();
        run_passes(&mut *self.child, &content, || {
            ResolveCx::with_chain(window, chain.clone())
        })?;
        Ok(true)
    }
}

impl Element for Scroll {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }

    fn reset(&mut self) {
        self.common.reset();
        self.child.reset();
        self.frame = None;
        self.content = None;
        self.chain.clear();
        self.window = None;
    }

    fn reset_position(&mut self) {
        self.common.reset_position();
        self.child.reset_position();
    }

    fn resolve(&mut self, cx: &mut ResolveCx, bounds: Option<&Bounds>) -> Result<(), Error> {
        self.common.resolve_base(cx, bounds);

        if self.frame.is_none() {
            if let Some(bounds) = bounds {
                self.frame = Some(*bounds);
                self.content = Some(*bounds);
            }
        }

        self.window = Some(cx.viewport());
        self.chain.clear();
        self.chain.extend_from_slice(cx.chain());
        self.chain.push(self.common.chain_entry());

        cx.descend(self.common.chain_entry());
        let content = self.content;
        let result = self.child.resolve(cx, content.as_ref());
        cx.ascend();
        result?;

        for axis in [Axis::Horizontal, Axis::Vertical] {
            if self.common.extent(axis).is_none() && self.common.spec(axis).is_content() {
                if let Some(extent) = self.child.common().extent(axis) {
                    self.common.set_extent(axis, extent);
                }
            }
        }
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.common.is_initialized() && self.child.is_initialized()
    }

    fn draw(&mut self) {
        self.common.paint_background();
        self.child.draw();
        if let Some(rect) = self.common.bounds() {
            if let Some(surface) = self.common.surface_mut() {
                composite(&rect, surface, &*self.child);
            }
        }
    }

    fn as_layout(&self) -> Option<&dyn Layout> {
        Some(self)
    }

    fn as_layout_mut(&mut self) -> Option<&mut dyn Layout> {
        Some(self)
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Layout for Scroll {
    fn child_count(&self) -> usize {
        1
    }

    fn child(&self, _index: usize) -> &dyn Element {
        &*self.child
    }

    fn child_mut(&mut self, _index: usize) -> &mut dyn Element {
        &mut *self.child
    }
}
