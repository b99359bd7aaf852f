//! `<grid>`: the row-major grid container.

use crate::core::element::{composite, Common, Element, ElementBox, Layout};
use crate::core::geometry::{Axis, Bounds, Point};
use crate::core::size::{resolve_extent, ResolveCx, SizeSpec};
use crate::core::xml::{common_from_attrs, Attrs, ParseCx, RawNode};
use crate::Error;
use std::any::Any;

/// Places children into equally-sized cells, row-major. Cell extents
/// default to percentages of the grid so that the cells exactly fill it.
pub struct Grid {
    common: Common,
    columns: usize,
    rows: usize,
    cell_width: SizeSpec,
    cell_height: SizeSpec,
    children: Vec<ElementBox>,
}

impl Grid {
    /// `columns` falls back to the child count for horizontal grids and
    /// to a single column for vertical ones.
    pub fn new(
        common: Common,
        axis: Axis,
        columns: Option<usize>,
        cell_width: Option<SizeSpec>,
        cell_height: Option<SizeSpec>,
        children: Vec<ElementBox>,
    ) -> Self {
        let columns = match columns {
            Some(columns) if columns > 0 => columns,
            _ => match axis {
                Axis::Horizontal => children.len().max(1),
                Axis::Vertical => 1,
            },
        };
        let rows = ((children.len() + columns - 1) / columns).max(1);
        Self {
            common,
            columns,
            rows,
            cell_width: cell_width.unwrap_or(SizeSpec::Percent(100.0 / columns as f64)),
            cell_height: cell_height.unwrap_or(SizeSpec::Percent(100.0 / rows as f64)),
            children,
        }
    }

    pub(crate) fn build(cx: &mut ParseCx<'_>, raw: RawNode) -> Result<ElementBox, Error> {
        let RawNode { line, attrs, children, .. } = raw;
        let mut attrs = Attrs::new("grid", line, attrs);
        let common = common_from_attrs(&mut attrs)?;
        let axis = attrs.parse("orientation")?.unwrap_or(Axis::Vertical);
        let columns = attrs.parse("columns")?;
        let cell_width = attrs.parse("cell-width")?;
        let cell_height = attrs.parse("cell-height")?;
        attrs.finish()?;
        let children = cx.build_children(children)?;
        Ok(Box::new(Grid::new(
            common,
            axis,
            columns,
            cell_width,
            cell_height,
            children,
        )))
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// One cell's extent on `axis`. Concrete cell specs resolve with the
    /// grid itself as nearest ancestor. Content-sized cells take the
    /// largest child extent, and stay unknown until every child reports
    /// one, since a partial maximum could still grow.
    fn cell_extent(&self, cx: &ResolveCx, axis: Axis) -> Option<f64> {
        let spec = match axis {
            Axis::Horizontal => self.cell_width,
            Axis::Vertical => self.cell_height,
        };
        if !spec.is_content() {
            return resolve_extent(spec, axis, cx.chain(), None, cx.viewport());
        }
        let mut extent: f64 = 0.0;
        for child in &self.children {
            extent = extent.max(child.common().extent(axis)?);
        }
        Some(extent)
    }

    fn place_children(
        &mut self,
        cx: &mut ResolveCx,
        cell_width: Option<f64>,
        cell_height: Option<f64>,
    ) -> Result<(), Error> {
        let cell = match (self.common.bounds(), cell_width, cell_height) {
            (Some(rect), Some(width), Some(height)) => Some((rect, width, height)),
            _ => None,
        };
        let padding = self.common.padding;
        let columns = self.columns;
        for (index, child) in self.children.iter_mut().enumerate() {
            if child.is_initialized() {
                continue;
            }
            let child_bounds = cell.map(|(rect, width, height)| {
                let row = index / columns;
                let column = index % columns;
                let min = Point::new(
                    rect.min.x + padding + column as f64 * width,
                    rect.max.y - padding - (row as f64 + 1.0) * height,
                );
                Bounds::new(min, min + Point::new(width, height))
            });
            child.resolve(cx, child_bounds.as_ref())?;
        }
        Ok(())
    }
}

impl Element for Grid {
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
        self.common.resolve_base(cx, bounds);
        cx.descend(self.common.chain_entry());

        let cell_width = self.cell_extent(cx, Axis::Horizontal);
        let cell_height = self.cell_extent(cx, Axis::Vertical);

        // a content-sized grid is cell × count on that axis
        if self.common.width().is_none() && self.common.width_spec.is_content() {
            if let Some(width) = cell_width {
                self.common
                    .set_extent(Axis::Horizontal, width * self.columns as f64);
            }
        }
        if self.common.height().is_none() && self.common.height_spec.is_content() {
            if let Some(height) = cell_height {
                self.common
                    .set_extent(Axis::Vertical, height * self.rows as f64);
            }
        }

        let result = self.place_children(cx, cell_width, cell_height);
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

impl Layout for Grid {
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
