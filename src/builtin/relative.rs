//! `<relative>`: the anchored container.
//!
//! Children position themselves against the parent's edges, a fixed or
//! percentage offset from them, or a sibling's rectangle. A child whose
//! target has not resolved yet is deferred to a later pass; anchor cycles
//! therefore never settle and are reported by the driver's pass cap.

use crate::core::element::{composite, Common, Element, ElementBox, Layout};
use crate::core::geometry::Bounds;
use crate::core::size::{ResolveCx, SizeSpec};
use crate::core::xml::{common_from_attrs, Attrs, ParseCx, RawNode};
use crate::{error, Error};
use std::any::Any;

/// What an anchor attaches to.
#[derive(Debug, Clone, PartialEq)]
pub enum AnchorTarget {
    /// The parent's own edge.
    Parent,
    /// A signed offset from the parent's edge, in pixels or percent of
    /// the parent's extent on that axis.
    Offset { amount: f64, percent: bool },
    /// A sibling, by id.
    Sibling(String),
}

fn parse_target(raw: &str) -> AnchorTarget {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("parent") {
        return AnchorTarget::Parent;
    }
    let (number, percent) = match trimmed.strip_suffix('%') {
        Some(number) => (number, true),
        None => (trimmed.strip_suffix("px").unwrap_or(trimmed), false),
    };
    match number.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() => AnchorTarget::Offset { amount, percent },
        // anything that is not a quantity is a sibling id
        _ => AnchorTarget::Sibling(trimmed.to_string()),
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VerticalEdge {
    /// `top-of`: above a sibling, or flush with the target's top.
    TopOf,
    /// `bottom-of`: below a sibling, or flush with the target's bottom.
    BottomOf,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HorizontalEdge {
    /// `left-of`: left of a sibling, or flush with the target's left.
    LeftOf,
    /// `right-of`: right of a sibling, or flush with the target's right.
    RightOf,
}

/// A child of a relative container together with its anchors.
pub struct AnchoredChild {
    element: ElementBox,
    vertical: Option<(VerticalEdge, AnchorTarget)>,
    horizontal: Option<(HorizontalEdge, AnchorTarget)>,
    // sibling targets resolved to indices by Relative::new
    vertical_sibling: Option<usize>,
    horizontal_sibling: Option<usize>,
}

impl AnchoredChild {
    pub fn new(
        element: ElementBox,
        vertical: Option<(VerticalEdge, AnchorTarget)>,
        horizontal: Option<(HorizontalEdge, AnchorTarget)>,
    ) -> Result<Self, Error> {
        if vertical.is_none() && horizontal.is_none() {
            return Err(error!(
                "'{}' needs at least one anchor ('top-of', 'bottom-of', 'left-of' or 'right-of')",
                element.common().display_name()
            ));
        }
        Ok(Self {
            element,
            vertical,
            horizontal,
            vertical_sibling: None,
            horizontal_sibling: None,
        })
    }
}

pub struct Relative {
    common: Common,
    children: Vec<AnchoredChild>,
}

impl Relative {
    /// Validates anchors and resolves sibling ids to indices. The
    /// container itself may not be content sized: unanchored axes span
    /// the parent, which leaves "content extent" without a meaning here.
    pub fn new(common: Common, mut children: Vec<AnchoredChild>) -> Result<Self, Error> {
        if common.width_spec.is_content() || common.height_spec.is_content() {
            return Err(error!(
                "'{}' cannot use match_content",
                common.display_name()
            ));
        }
        let ids: Vec<Option<String>> = children
            .iter()
            .map(|child| child.element.common().id.clone())
            .collect();
        for index in 0..children.len() {
            let owner = children[index].element.common().display_name();
            let vertical = match &children[index].vertical {
                Some((VerticalEdge::TopOf, AnchorTarget::Sibling(id))) => {
                    Some(("top-of", id.clone()))
                }
                Some((VerticalEdge::BottomOf, AnchorTarget::Sibling(id))) => {
                    Some(("bottom-of", id.clone()))
                }
                _ => None,
            };
            let horizontal = match &children[index].horizontal {
                Some((HorizontalEdge::LeftOf, AnchorTarget::Sibling(id))) => {
                    Some(("left-of", id.clone()))
                }
                Some((HorizontalEdge::RightOf, AnchorTarget::Sibling(id))) => {
                    Some(("right-of", id.clone()))
                }
                _ => None,
            };
            let lookup = |id: &str, attr: &str| -> Result<usize, Error> {
                ids.iter()
                    .position(|candidate| candidate.as_deref() == Some(id))
                    .ok_or_else(|| {
                        error!(
                            "no sibling with id '{}' (referenced by '{}' on '{}')",
                            id, attr, owner
                        )
                    })
            };
            if let Some((attr, id)) = vertical {
                children[index].vertical_sibling = Some(lookup(&id, attr)?);
            }
            if let Some((attr, id)) = horizontal {
                children[index].horizontal_sibling = Some(lookup(&id, attr)?);
            }
        }
        Ok(Self { common, children })
    }

    pub(crate) fn build(cx: &mut ParseCx<'_>, raw: RawNode) -> Result<ElementBox, Error> {
        let RawNode { line, attrs, children, .. } = raw;
        let mut attrs = Attrs::new("relative", line, attrs);
        let common = common_from_attrs(&mut attrs)?;
        attrs.finish()?;

        let mut anchored = Vec::with_capacity(children.len());
        for mut raw_child in children {
            let child_line = raw_child.line;
            let mut take = |name: &str| -> Option<String> {
                let index = raw_child.attrs.iter().position(|(key, _)| key == name)?;
                Some(raw_child.attrs.remove(index).1)
            };
            let top = take("top-of");
            let bottom = take("bottom-of");
            let left = take("left-of");
            let right = take("right-of");

            let vertical = match (top, bottom) {
                (Some(_), Some(_)) => {
                    return Err(error!(
                        "both 'top-of' and 'bottom-of' set (line {})",
                        child_line
                    ))
                }
                (Some(raw), None) => Some((VerticalEdge::TopOf, parse_target(&raw))),
                (None, Some(raw)) => Some((VerticalEdge::BottomOf, parse_target(&raw))),
                (None, None) => None,
            };
            let horizontal = match (left, right) {
                (Some(_), Some(_)) => {
                    return Err(error!(
                        "both 'left-of' and 'right-of' set (line {})",
                        child_line
                    ))
                }
                (Some(raw), None) => Some((HorizontalEdge::LeftOf, parse_target(&raw))),
                (None, Some(raw)) => Some((HorizontalEdge::RightOf, parse_target(&raw))),
                (None, None) => None,
            };
            if vertical.is_none() && horizontal.is_none() {
                return Err(error!(
                    "element in <relative> needs at least one anchor attribute (line {})",
                    child_line
                ));
            }

            let element = cx.build(raw_child)?;
            anchored.push(AnchoredChild::new(element, vertical, horizontal)?);
        }

        Relative::new(common, anchored).map(|relative| Box::new(relative) as ElementBox)
    }

    fn place_children(&mut self, cx: &mut ResolveCx, bounds: Option<&Bounds>) -> Result<(), Error> {
        for index in 0..self.children.len() {
            let vertical_rect = self.children[index]
                .vertical_sibling
                .and_then(|sibling| self.children[sibling].element.common().bounds());
            let horizontal_rect = self.children[index]
                .horizontal_sibling
                .and_then(|sibling| self.children[sibling].element.common().bounds());

            let child = &mut self.children[index];
            let mut rect = bounds.copied();
            if let (Some(parent), Some((edge, target))) = (bounds, &child.vertical) {
                let match_bounds =
                    matches!(child.element.common().height_spec, SizeSpec::MatchBounds);
                let extent = child.element.common().height();
                rect = rect.and_then(|rect| {
                    apply_vertical(
                        *edge,
                        target,
                        vertical_rect,
                        child.horizontal.is_none(),
                        parent,
                        rect,
                        match_bounds,
                        extent,
                    )
                });
            }
            if let (Some(parent), Some((edge, target))) = (bounds, &child.horizontal) {
                let match_bounds =
                    matches!(child.element.common().width_spec, SizeSpec::MatchBounds);
                let extent = child.element.common().width();
                rect = rect.and_then(|rect| {
                    apply_horizontal(
                        *edge,
                        target,
                        horizontal_rect,
                        child.vertical.is_none(),
                        parent,
                        rect,
                        match_bounds,
                        extent,
                    )
                });
            }
            child.element.resolve(cx, rect.as_ref())?;
        }
        Ok(())
    }
}

/// Applies a vertical anchor to the child's candidate rectangle. `None`
/// defers the child to a later pass (unresolved sibling or extent).
#[allow(clippy::too_many_arguments)]
fn apply_vertical(
    edge: VerticalEdge,
    target: &AnchorTarget,
    sibling: Option<Bounds>,
    copy_cross: bool,
    parent: &Bounds,
    mut rect: Bounds,
    match_bounds: bool,
    extent: Option<f64>,
) -> Option<Bounds> {
    match (edge, target) {
        (VerticalEdge::TopOf, AnchorTarget::Parent) => {
            if !match_bounds {
                rect.min.y = rect.max.y - extent?;
            }
        }
        (VerticalEdge::BottomOf, AnchorTarget::Parent) => {
            if !match_bounds {
                rect.max.y = rect.min.y + extent?;
            }
        }
        (edge, AnchorTarget::Offset { amount, percent }) => {
            let offset = match percent {
                true => parent.size().y * amount / 100.0,
                false => *amount,
            };
            match edge {
                // measured down from the parent's top
                VerticalEdge::TopOf => {
                    rect.max.y = parent.max.y - offset;
                    match match_bounds {
                        false => rect.min.y = rect.max.y - extent?,
                        true => rect.min.y = parent.min.y,
                    }
                }
                // measured up from the parent's bottom
                VerticalEdge::BottomOf => {
                    rect.min.y = parent.min.y + offset;
                    match match_bounds {
                        false => rect.max.y = rect.min.y + extent?,
                        true => rect.max.y = parent.max.y,
                    }
                }
            }
        }
        (edge, AnchorTarget::Sibling(_)) => {
            let sibling = sibling?;
            match edge {
                // sits on top of the sibling
                VerticalEdge::TopOf => {
                    rect.min.y = sibling.max.y;
                    match match_bounds {
                        false => rect.max.y = rect.min.y + extent?,
                        true => rect.max.y = parent.max.y,
                    }
                }
                // hangs below the sibling
                VerticalEdge::BottomOf => {
                    rect.max.y = sibling.min.y;
                    match match_bounds {
                        false => rect.min.y = rect.max.y - extent?,
                        true => rect.min.y = parent.min.y,
                    }
                }
            }
            if copy_cross {
                rect.min.x = sibling.min.x;
                rect.max.x = sibling.max.x;
            }
        }
    }
    Some(rect)
}

#[allow(clippy::too_many_arguments)]
fn apply_horizontal(
    edge: HorizontalEdge,
    target: &AnchorTarget,
    sibling: Option<Bounds>,
    copy_cross: bool,
    parent: &Bounds,
    mut rect: Bounds,
    match_bounds: bool,
    extent: Option<f64>,
) -> Option<Bounds> {
    match (edge, target) {
        (HorizontalEdge::LeftOf, AnchorTarget::Parent) => {
            if !match_bounds {
                rect.max.x = rect.min.x + extent?;
            }
        }
        (HorizontalEdge::RightOf, AnchorTarget::Parent) => {
            if !match_bounds {
                rect.min.x = rect.max.x - extent?;
            }
        }
        (edge, AnchorTarget::Offset { amount, percent }) => {
            let offset = match percent {
                true => parent.size().x * amount / 100.0,
                false => *amount,
            };
            match edge {
                // the child ends at an offset from the parent's left edge
                HorizontalEdge::LeftOf => {
                    rect.max.x = parent.min.x + offset;
                    match match_bounds {
                        false => rect.min.x = rect.max.x - extent?,
                        true => rect.min.x = parent.min.x,
                    }
                }
                // the child starts at an offset from the parent's left edge
                HorizontalEdge::RightOf => {
                    rect.min.x = parent.min.x + offset;
                    match match_bounds {
                        false => rect.max.x = rect.min.x + extent?,
                        true => rect.max.x = parent.max.x,
                    }
                }
            }
        }
        (edge, AnchorTarget::Sibling(_)) => {
            let sibling = sibling?;
            match edge {
                // sits to the left of the sibling
                HorizontalEdge::LeftOf => {
                    rect.max.x = sibling.min.x;
                    match match_bounds {
                        false => rect.min.x = rect.max.x - extent?,
                        true => rect.min.x = parent.min.x,
                    }
                }
                // sits to the right of the sibling
                HorizontalEdge::RightOf => {
                    rect.min.x = sibling.max.x;
                    match match_bounds {
                        false => rect.max.x = rect.min.x + extent?,
                        true => rect.max.x = parent.max.x,
                    }
                }
            }
            if copy_cross {
                rect.min.y = sibling.min.y;
                rect.max.y = sibling.max.y;
            }
        }
    }
    Some(rect)
}

impl Element for Relative {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }

    fn reset(&mut self) {
        self.common.reset();
        for child in &mut self.children {
            child.element.reset();
        }
    }

    fn reset_position(&mut self) {
        self.common.reset_position();
        for child in &mut self.children {
            child.element.reset_position();
        }
    }

    fn resolve(&mut self, cx: &mut ResolveCx, bounds: Option<&Bounds>) -> Result<(), Error> {
        self.common.resolve_base(cx, bounds);
        cx.descend(self.common.chain_entry());
        let result = self.place_children(cx, bounds);
        cx.ascend();
        result
    }

    fn is_initialized(&self) -> bool {
        self.common.is_initialized()
            && self
                .children
                .iter()
                .all(|child| child.element.is_initialized())
    }

    fn draw(&mut self) {
        self.common.paint_background();
        for child in &mut self.children {
            child.element.draw();
        }
        if let Some(rect) = self.common.bounds() {
            if let Some(surface) = self.common.surface_mut() {
                for child in &self.children {
                    composite(&rect, surface, &*child.element);
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

impl Layout for Relative {
    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn child(&self, index: usize) -> &dyn Element {
        &*self.children[index].element
    }

    fn child_mut(&mut self, index: usize) -> &mut dyn Element {
        &mut *self.children[index].element
    }
}
