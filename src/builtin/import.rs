//! `<import>`: embeds another markup document.

use crate::core::element::{composite, Common, Element, ElementBox, Layout};
use crate::core::geometry::{Axis, Bounds};
use crate::core::size::ResolveCx;
use crate::core::xml::{common_from_attrs, Attrs, ParseCx, RawNode};
use crate::{error, Error};
use std::any::Any;

/// Holds the root of an externally-defined subtree as its single child.
/// The child resolves against the import's own bounds, so a document can
/// be dropped anywhere a regular element could appear.
pub struct Import {
    common: Common,
    path: String,
    child: ElementBox,
}

impl Import {
    pub fn new(common: Common, path: impl Into<String>, child: ElementBox) -> Self {
        Self {
            common,
            path: path.into(),
            child,
        }
    }

    pub(crate) fn build(cx: &mut ParseCx<'_>, raw: RawNode) -> Result<ElementBox, Error> {
        let RawNode { line, attrs, children, .. } = raw;
        let mut attrs = Attrs::new("import", line, attrs);
        let common = common_from_attrs(&mut attrs)?;
        let path = attrs.require_raw("file")?;
        attrs.finish()?;
        if !children.is_empty() {
            return Err(error!("<import> cannot have children (line {})", line));
        }
        let child = cx.import(&path)?;
        Ok(Box::new(Import::new(common, path, child)))
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Element for Import {
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

        cx.descend(self.common.chain_entry());
        let result = self.child.resolve(cx, bounds);
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

impl Layout for Import {
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
