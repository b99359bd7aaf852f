//! The element and layout capability traits and their shared geometry
//! state.
//!
//! Every element embeds a [`Common`] by composition: the size specs from
//! markup, the resolved geometry (all `Option` until known) and the
//! drawing surface. Resolution is monotonic: once an extent or position
//! is known it stays known until an explicit reset, which is what lets
//! the driver call [`Element::resolve`] repeatedly until the whole tree
//! reports initialized.

use super::geometry::{Axis, Bounds, Gravity, Point};
use super::size::{resolve_extent, AncestorEntry, ResolveCx, SizeSpec};
use super::surface::{Surface, TRANSPARENT};
use crate::Error;
use rgb::RGBA8;
use std::any::Any;

pub type ElementBox = Box<dyn Element>;

impl std::fmt::Debug for dyn Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.common().display_name())
    }
}

/// A node of the UI tree.
pub trait Element: 'static {
    fn common(&self) -> &Common;
    fn common_mut(&mut self) -> &mut Common;

    /// Clears all resolved geometry and surfaces, recursively.
    fn reset(&mut self);

    /// Clears only positions, recursively; sizes stay resolved.
    fn reset_position(&mut self);

    /// Attempts to compute not-yet-known geometry from what is currently
    /// available. May partially succeed; repeated calls are safe.
    fn resolve(&mut self, cx: &mut ResolveCx, bounds: Option<&Bounds>) -> Result<(), Error>;

    /// True once the rectangle and surface exist, and every child (for
    /// layouts) is initialized too.
    fn is_initialized(&self) -> bool;

    /// Paints the element's surface and composites children onto it.
    /// Meaningful once the element is initialized; a no-op before that.
    fn draw(&mut self);

    fn as_layout(&self) -> Option<&dyn Layout> {
        None
    }

    fn as_layout_mut(&mut self) -> Option<&mut dyn Layout> {
        None
    }

    /// Escape hatch for embedders routing input events to concrete
    /// element types.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Capability of elements that own an ordered collection of children.
pub trait Layout: Element {
    fn child_count(&self) -> usize;
    fn child(&self, index: usize) -> &dyn Element;
    fn child_mut(&mut self, index: usize) -> &mut dyn Element;

    fn child_by_id(&self, id: &str) -> Option<&dyn Element> {
        (0..self.child_count())
            .map(|index| self.child(index))
            .find(|child| child.common().id.as_deref() == Some(id))
    }
}

/// Geometry and configuration shared by every element.
pub struct Common {
    /// Tag name, used in diagnostics.
    pub name: &'static str,
    pub id: Option<String>,
    pub width_spec: SizeSpec,
    pub height_spec: SizeSpec,
    pub gravity: Gravity,
    pub padding: f64,
    pub background: Option<RGBA8>,

    width: Option<f64>,
    height: Option<f64>,
    min: Option<Point>,
    max: Option<Point>,
    surface: Option<Surface>,
}

impl Common {
    pub fn new(name: &'static str, width_spec: SizeSpec, height_spec: SizeSpec) -> Self {
        Self {
            name,
            id: None,
            width_spec,
            height_spec,
            gravity: Gravity::default(),
            padding: 0.0,
            background: None,
            width: None,
            height: None,
            min: None,
            max: None,
            surface: None,
        }
    }

    #[inline]
    pub fn width(&self) -> Option<f64> {
        self.width
    }

    #[inline]
    pub fn height(&self) -> Option<f64> {
        self.height
    }

    #[inline]
    pub fn extent(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    #[inline]
    pub fn spec(&self, axis: Axis) -> SizeSpec {
        match axis {
            Axis::Horizontal => self.width_spec,
            Axis::Vertical => self.height_spec,
        }
    }

    /// Adopts a content-derived extent. Owning elements call this once
    /// their content or children report a size.
    pub fn set_extent(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::Horizontal => self.width = Some(value),
            Axis::Vertical => self.height = Some(value),
        }
    }

    #[inline]
    pub fn min(&self) -> Option<Point> {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Option<Point> {
        self.max
    }

    /// The placed rectangle, once both corners are known.
    pub fn bounds(&self) -> Option<Bounds> {
        match (self.min, self.max) {
            (Some(min), Some(max)) => Some(Bounds::new(min, max)),
            _ => None,
        }
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut Surface> {
        self.surface.as_mut()
    }

    pub fn reset(&mut self) {
        self.width = None;
        self.height = None;
        self.min = None;
        self.max = None;
        self.surface = None;
    }

    pub fn reset_position(&mut self) {
        self.min = None;
        self.max = None;
    }

    /// The shared part of a resolution step: derive unresolved extents
    /// through the size resolver, place the rectangle by gravity once both
    /// extents and bounds are known, and keep the surface sized to the
    /// rectangle.
    pub fn resolve_base(&mut self, cx: &ResolveCx, bounds: Option<&Bounds>) {
        if self.width.is_none() {
            self.width = resolve_extent(
                self.width_spec,
                Axis::Horizontal,
                cx.chain(),
                bounds,
                cx.viewport(),
            );
        }
        if self.height.is_none() {
            self.height = resolve_extent(
                self.height_spec,
                Axis::Vertical,
                cx.chain(),
                bounds,
                cx.viewport(),
            );
        }

        if self.min.is_none() || self.max.is_none() {
            if let (Some(width), Some(height), Some(bounds)) = (self.width, self.height, bounds) {
                let size = Point::new(width, height);
                let min = self.gravity.place(bounds, size);
                self.min = Some(min);
                self.max = Some(min + size);
            }
        }

        if self.min.is_some() {
            if let (Some(width), Some(height)) = (self.width, self.height) {
                let wanted = (surface_extent(width), surface_extent(height));
                let stale = self
                    .surface
                    .as_ref()
                    .map(|surface| surface.size() != wanted)
                    .unwrap_or(true);
                if stale {
                    self.surface = Some(Surface::new(wanted.0, wanted.1));
                }
            }
        }
    }

    pub fn is_initialized(&self) -> bool {
        let surface_ready = match (&self.surface, self.width, self.height) {
            (Some(surface), Some(width), Some(height)) => {
                surface.size() == (surface_extent(width), surface_extent(height))
            }
            _ => false,
        };
        self.min.is_some() && self.max.is_some() && surface_ready
    }

    /// The frame a container pushes onto the ancestor chain before
    /// resolving its children.
    pub fn chain_entry(&self) -> AncestorEntry {
        AncestorEntry {
            width_spec: self.width_spec,
            height_spec: self.height_spec,
            width: self.width,
            height: self.height,
        }
    }

    /// Tag name plus id, as shown in divergence diagnostics.
    pub fn display_name(&self) -> String {
        match &self.id {
            Some(id) => format!("{}(id={})", self.name, id),
            None => self.name.to_string(),
        }
    }

    pub fn paint_background(&mut self) {
        let color = self.background.unwrap_or(TRANSPARENT);
        if let Some(surface) = self.surface.as_mut() {
            surface.clear(color);
        }
    }
}

#[inline]
fn surface_extent(value: f64) -> usize {
    value.round().max(0.0) as usize
}

/// Blends a child's surface onto its parent's at the right offset. The
/// vertical flip converts Y-up geometry to top-down surface rows.
pub fn composite(parent_bounds: &Bounds, parent_surface: &mut Surface, child: &dyn Element) {
    let (Some(child_bounds), Some(child_surface)) =
        (child.common().bounds(), child.common().surface())
    else {
        return;
    };
    let dx = (child_bounds.min.x - parent_bounds.min.x).round() as isize;
    let dy = (parent_bounds.max.y - child_bounds.max.y).round() as isize;
    parent_surface.blit(child_surface, dx, dy);
}
