//! `<button>`: a labelled, clickable leaf.

use crate::core::content::ContentSource;
use crate::core::element::{Common, Element, ElementBox};
use crate::core::geometry::{Axis, Bounds};
use crate::core::registry::Registry;
use crate::core::size::ResolveCx;
use crate::core::xml::{common_from_attrs, Attrs, ParseCx, RawNode};
use crate::{error, Error};
use std::any::Any;

/// A button with a text label and an optional `on-click` callback name.
/// Input polling is the embedder's job; route a click here through
/// [`Button::activate`].
pub struct Button {
    common: Common,
    label: String,
    source: Box<dyn ContentSource>,
    on_click: Option<String>,
}

impl Button {
    pub fn new(
        common: Common,
        label: impl Into<String>,
        source: Box<dyn ContentSource>,
        on_click: Option<String>,
    ) -> Self {
        Self {
            common,
            label: label.into(),
            source,
            on_click,
        }
    }

    pub(crate) fn build(cx: &mut ParseCx<'_>, raw: RawNode) -> Result<ElementBox, Error> {
        let RawNode { line, attrs, children, .. } = raw;
        let mut attrs = Attrs::new("button", line, attrs);
        let common = common_from_attrs(&mut attrs)?;
        let label = attrs.require_raw("text")?;
        let on_click = attrs.take("on-click");
        attrs.finish()?;
        if !children.is_empty() {
            return Err(error!("<button> cannot have children (line {})", line));
        }
        let source = cx.content.text(&label);
        Ok(Box::new(Button::new(common, label, source, on_click)))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Dispatches the button's callback, if it names one.
    pub fn activate(&mut self, registry: &Registry) -> Result<(), Error> {
        match self.on_click.clone() {
            Some(name) => registry.invoke(&name, self),
            None => Ok(()),
        }
    }

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

impl Element for Button {
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
