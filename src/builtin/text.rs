//! `<text>`: a text leaf.

use crate::core::content::ContentSource;
use crate::core::element::{Common, Element, ElementBox};
use crate::core::geometry::{Axis, Bounds};
use crate::core::size::ResolveCx;
use crate::core::xml::{common_from_attrs, Attrs, ParseCx, RawNode};
use crate::{error, Error};
use std::any::Any;

/// A run of text. Shaping and rasterization live behind the content
/// source; the element only needs the natural extents it reports.
pub struct Text {
    common: Common,
    text: String,
    source: Box<dyn ContentSource>,
}

impl Text {
    pub fn new(common: Common, text: impl Into<String>, source: Box<dyn ContentSource>) -> Self {
        Self {
            common,
            text: text.into(),
            source,
        }
    }

    pub(crate) fn build(cx: &mut ParseCx<'_>, raw: RawNode) -> Result<ElementBox, Error> {
        let RawNode { line, attrs, children, .. } = raw;
        let mut attrs = Attrs::new("text", line, attrs);
        let common = common_from_attrs(&mut attrs)?;
        let text = attrs.require_raw("text")?;
        attrs.finish()?;
        if !children.is_empty() {
            return Err(error!("<text> cannot have children (line {})", line));
        }
        let source = cx.content.text(&text);
        Ok(Box::new(Text::new(common, text, source)))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Adopts the natural size on content-sized axes, once known.
    fn adopt_natural_size(&mut self) {
        let Some(natural) = self.source.natural_size() else {
            return;
        };
        if self.common.width().is_none() && self.common.width_spec.is_content() {
            self.common.set_extent(Axis::Horizontal, natural.x);
        }
        if self.common.height().is_none() && self.common.height_spec.is_content() {
            self.common.set_extent(Axis::Vertical, natural.y);
        }
    }
}

impl Element for Text {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }

    fn reset(&mut self) {
        self.common.reset();
    }

    fn reset_position(&mut self) {
        self.common.reset_position();
    }

    fn resolve(&mut self, cx: &mut ResolveCx, bounds: Option<&Bounds>) -> Result<(), Error> {
        self.adopt_natural_size();
        self.common.resolve_base(cx, bounds);
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.common.is_initialized()
    }

    fn draw(&mut self) {
        self.common.paint_background();
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
