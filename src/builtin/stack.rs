//! `<stack>`: the linear container.

use crate::core::element::{composite, Common, Element, ElementBox, Layout};
use crate::core::geometry::{Axis, Bounds, Point};
use crate::core::size::ResolveCx;
use crate::core::xml::{common_from_attrs, Attrs, ParseCx, RawNode};
use crate::Error;
use std::any::Any;

/// Lays children out in a row or a column, in order.
pub struct Stack {
    common: Common,
    axis: Axis,
    children: Vec<ElementBox>,
}

impl Stack {
    pub fn new(common: Common, axis: Axis, children: Vec<ElementBox>) -> Self {
        Self {
            common,
            axis,
            children,
        }
    }

    pub(crate) fn build(cx: &mut ParseCx<'_>, raw: RawNode) -> Result<ElementBox, Error> {
        let RawNode { line, attrs, children, .. } = raw;
        let mut attrs = Attrs::new("stack", line, attrs);
        let common = common_from_attrs(&mut attrs)?;
        let axis = attrs.parse("orientation")?.unwrap_or(Axis::Vertical);
        attrs.finish()?;
        let children = cx.build_children(children)?;
        Ok(Box::new(Stack::new(common, axis, children)))
    }

    /// Content extent on `axis`: the sum of children along the stacking
    /// axis (plus the padding on both ends), the maximum across it.
    /// `None` until every child reports that extent; partial sums would
    /// not be monotonic.
    fn content_extent(&self, axis: Axis) -> Option<f64> {
        let mut total = self.common.padding * 2.0;
        for child in &self.children {
            let extent = child.common().extent(axis)?;
            if axis == self.axis {
                total += extent;
            } else {
                total = total.max(extent);
            }
        }
        Some(total)
    }

    fn place_children(
        children: &mut [ElementBox],
        cx: &mut ResolveCx,
        axis: Axis,
        mut cursor: Option<Point>,
    ) -> Result<(), Error> {
        for child in children.iter_mut() {
            let size = {
                let common = child.common();
                match (common.width(), common.height()) {
                    (Some(width), Some(height)) => Some(Point::new(width, height)),
                    _ => None,
                }
            };
            let child_bounds = match (cursor.as_mut(), size) {
                (Some(at), Some(size)) => {
                    let rect = Bounds::new(
                        Point::new(at.x, at.y - size.y),
                        Point::new(at.x + size.x, at.y),
                    );
                    match axis {
                        Axis::Horizontal => at.x += size.x,
                        Axis::Vertical => at.y -= size.y,
                    }
                    Some(rect)
                }
                _ => {
                    // a child without a size stalls placement for the
                    // rest of this pass
                    cursor = None;
                    None
                }
            };
            if !child.is_initialized() {
                child.resolve(cx, child_bounds.as_ref())?;
            }
        }
        Ok(())
    }
}

impl Element for Stack {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }

    fn reset(&mut self) {
        self.common.reset();
        for child in &mut self.children {
            child.reset();
        }
    }

    fn reset_position(&mut self) {
        self.common.reset_position();
        for child in &mut self.children {
            child.reset_position();
        }
    }

    fn resolve(&mut self, cx: &mut ResolveCx, bounds: Option<&Bounds>) -> Result<(), Error> {
        for axis in [Axis::Horizontal, Axis::Vertical] {
            if self.common.extent(axis).is_none() && self.common.spec(axis).is_content() {
                if let Some(extent) = self.content_extent(axis) {
                    self.common.set_extent(axis, extent);
                }
            }
        }
        self.common.resolve_base(cx, bounds);

        let cursor = self.common.bounds().map(|rect| {
            Point::new(
                rect.min.x + self.common.padding,
                rect.max.y - self.common.padding,
            )
        });
        cx.descend(self.common.chain_entry());
        let result = Self::place_children(&mut self.children, cx, self.axis, cursor);
        cx.ascend();
        result
    }

    fn is_initialized(&self) -> bool {
        self.common.is_initialized() && self.children.iter().all(|child| child.is_initialized())
    }

    fn draw(&mut self) {
        self.common.paint_background();
        for child in &mut self.children {
            child.draw();
        }
        if let Some(rect) = self.common.bounds() {
            if let Some(surface) = self.common.surface_mut() {
                for child in &self.children {
                    composite(&rect, surface, &**child);
                }
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

impl Layout for Stack {
    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn child(&self, index: usize) -> &dyn Element {
        &*self.children[index]
    }

    fn child_mut(&mut self, index: usize) -> &mut dyn Element {
        &mut *self.children[index]
    }
}
