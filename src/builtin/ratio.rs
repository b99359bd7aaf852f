//! `<ratio>`: the fixed-aspect-ratio wrapper.

use crate::core::element::{composite, Common, Element, ElementBox, Layout};
use crate::core::geometry::{AspectRatio, Axis, Bounds};
use crate::core::size::ResolveCx;
use crate::core::xml::{common_from_attrs, Attrs, ParseCx, RawNode};
use crate::{error, Error};
use std::any::Any;

/// Forces its single child into the largest rectangle of a given aspect
/// ratio that fits the offered bounds, placed by the wrapper's gravity.
pub struct FixedRatio {
    common: Common,
    ratio: AspectRatio,
    child: ElementBox,
}

impl FixedRatio {
    pub fn new(common: Common, ratio: AspectRatio, child: ElementBox) -> Self {
        Self {
            common,
            ratio,
            child,
        }
    }

    pub(crate) fn build(cx: &mut ParseCx<'_>, raw: RawNode) -> Result<ElementBox, Error> {
        let RawNode { line, attrs, children, .. } = raw;
        let mut attrs = Attrs::new("ratio", line, attrs);
        let common = common_from_attrs(&mut attrs)?;
        let ratio = attrs.require("ratio")?;
        attrs.finish()?;
        let child = single_child(cx, "ratio", line, children)?;
        Ok(Box::new(FixedRatio::new(common, ratio, child)))
    }

    /// The child's rectangle within `bounds`. When the bounds are
    /// integral the chosen extents are nudged integral too, by shrinking
    /// the offered rectangle one unit at a time on the fitted axis;
    /// fractional extents would land the child on half pixels and leave
    /// seams. The loop strictly shrinks, so it terminates.
    fn child_rect(&self, bounds: &Bounds) -> Bounds {
        let size = bounds.size();
        let mut fitted = self.ratio.fit(size);
        if size.x.fract() == 0.0 && size.y.fract() == 0.0 {
            let mut limit = size;
            while (fitted.x.fract() != 0.0 || fitted.y.fract() != 0.0)
                && limit.x > 0.0
                && limit.y > 0.0
            {
                if fitted.x == limit.x {
                    limit.x -= 1.0;
                } else {
                    limit.y -= 1.0;
                }
                fitted = self.ratio.fit(limit);
            }
        }
        let min = self.common.gravity.place(bounds, fitted);
        Bounds::new(min, min + fitted)
    }
}

pub(crate) fn single_child(
    cx: &mut ParseCx<'_>,
    tag: &str,
    line: usize,
    children: Vec<RawNode>,
) -> Result<ElementBox, Error> {
    let mut children = cx.build_children(children)?;
    match children.len() {
        0 => Err(error!("no children on <{}> (line {})", tag, line)),
        1 => Ok(children.remove(0)),
        _ => Err(error!("multiple children on <{}> (line {})", tag, line)),
    }
}

pub(crate) use single_child as require_single_child;

impl Element for FixedRatio {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }

    fn reset(&mut self) {
        self.common.reset();
        self.child.reset();
    }

    fn reset_position(&mut self) {
        self.common.reset_position();
        self.child.reset_position();
    }

    fn resolve(&mut self, cx: &mut ResolveCx, bounds: Option<&Bounds>) -> Result<(), Error> {
        self.common.resolve_base(cx, bounds);

        let child_bounds = bounds.map(|bounds| self.child_rect(bounds));
        cx.descend(self.common.chain_entry());
        let result = self.child.resolve(cx, child_bounds.as_ref());
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

impl Layout for FixedRatio {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Point as P;

    fn wrapper(ratio: &str) -> FixedRatio {
        use crate::core::content::FixedMeasure;
        use crate::core::size::SizeSpec;
        let child = Box::new(crate::builtin::text::Text::new(
            Common::new("text", SizeSpec::MatchBounds, SizeSpec::MatchBounds),
            "x",
            Box::new(FixedMeasure(P::new(1.0, 1.0))),
        ));
        FixedRatio::new(
            Common::new("ratio", SizeSpec::MatchParent, SizeSpec::MatchParent),
            ratio.parse().unwrap(),
            child,
        )
    }

    #[test]
    fn integral_bounds_stay_integral() {
        let bounds = Bounds::new(P::new(0.0, 0.0), P::new(101.0, 101.0));
        for ratio in ["1:1", "3:2", "16:9", "2:3"] {
            let rect = wrapper(ratio).child_rect(&bounds);
            let size = rect.size();
            assert_eq!(size.x.fract(), 0.0, "ratio {}", ratio);
            assert_eq!(size.y.fract(), 0.0, "ratio {}", ratio);
            assert!(size.x <= 101.0 && size.y <= 101.0, "ratio {}", ratio);
        }
    }

    #[test]
    fn square_fills_square() {
        let bounds = Bounds::new(P::new(0.0, 0.0), P::new(101.0, 101.0));
        let rect = wrapper("1:1").child_rect(&bounds);
        assert_eq!(rect.size(), P::new(101.0, 101.0));
    }

    #[test]
    fn fractional_bounds_skip_nudging() {
        let bounds = Bounds::new(P::new(0.0, 0.0), P::new(100.5, 100.5));
        let rect = wrapper("1:1").child_rect(&bounds);
        assert_eq!(rect.size(), P::new(100.5, 100.5));
    }
}
