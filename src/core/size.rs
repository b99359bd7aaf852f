//! Size specifications and the pure extent resolver.

use super::geometry::{Axis, Bounds, Point};
use crate::{error, Error};
use std::str::FromStr;

/// How an element's extent on one axis is specified. At most one kind is
/// active per axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SizeSpec {
    /// A fixed number of pixels.
    Pixels(f64),
    /// A percentage of the nearest ancestor that can supply an extent.
    Percent(f64),
    /// The extent of the nearest ancestor that can supply one.
    MatchParent,
    /// The natural extent of the element's content or children; resolved
    /// upward by the owning element, never by the resolver itself.
    MatchContent,
    /// The extent of the rectangle handed down by the container. Only
    /// meaningful when a container actually hands one down.
    MatchBounds,
}

impl SizeSpec {
    #[inline]
    pub fn is_content(&self) -> bool {
        matches!(self, SizeSpec::MatchContent)
    }
}

impl FromStr for SizeSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let lowered = s.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "match_parent" => return Ok(SizeSpec::MatchParent),
            "match_content" => return Ok(SizeSpec::MatchContent),
            "match_bounds" => return Ok(SizeSpec::MatchBounds),
            _ => {}
        }
        let invalid = || error!("invalid size '{}'", s);
        let (number, percent) = match lowered.strip_suffix('%') {
            Some(number) => (number, true),
            None => (lowered.strip_suffix("px").unwrap_or(&lowered), false),
        };
        let value: f64 = number.trim().parse().map_err(|_| invalid())?;
        if value < 0.0 || !value.is_finite() {
            return Err(invalid());
        }
        Ok(match percent {
            true => SizeSpec::Percent(value),
            false => SizeSpec::Pixels(value),
        })
    }
}

/// One frame of the ancestor chain: the size specs of an enclosing
/// container together with its currently-resolved extents. Containers push
/// a frame before resolving their children.
#[derive(Debug, Clone, PartialEq)]
pub struct AncestorEntry {
    pub width_spec: SizeSpec,
    pub height_spec: SizeSpec,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl AncestorEntry {
    #[inline]
    pub fn spec(&self, axis: Axis) -> SizeSpec {
        match axis {
            Axis::Horizontal => self.width_spec,
            Axis::Vertical => self.height_spec,
        }
    }

    #[inline]
    pub fn extent(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// Per-pass resolution context: the viewport extents (the ultimate
/// fallback for the root) and the chain of enclosing containers, nearest
/// last.
pub struct ResolveCx {
    viewport: Point,
    chain: Vec<AncestorEntry>,
}

impl ResolveCx {
    pub fn new(viewport: Point) -> Self {
        Self {
            viewport,
            chain: Vec::new(),
        }
    }

    /// Resumes resolution somewhere below the root, with a previously
    /// captured chain.
    pub fn with_chain(viewport: Point, chain: Vec<AncestorEntry>) -> Self {
        Self { viewport, chain }
    }

    #[inline]
    pub fn viewport(&self) -> Point {
        self.viewport
    }

    #[inline]
    pub fn chain(&self) -> &[AncestorEntry] {
        &self.chain
    }

    pub fn descend(&mut self, entry: AncestorEntry) {
        self.chain.push(entry);
    }

    pub fn ascend(&mut self) {
        debug_assert!(!self.chain.is_empty());
        self.chain.pop();
    }
}

/// Resolves one extent of one element, given its spec, the ancestor chain
/// (nearest ancestor last), the bounds handed down by its container (if
/// any) and the viewport extents.
///
/// Pure: `None` means "not resolvable yet", never an error. The walk for
/// `MatchParent`/`Percent` skips ancestors that are themselves content
/// sized; if every ancestor is, the extent stays unresolved, as adopting the
/// viewport there would mask a parent/child size cycle. Only a true root
/// (no ancestors at all) falls back to the viewport.
pub fn resolve_extent(
    spec: SizeSpec,
    axis: Axis,
    chain: &[AncestorEntry],
    bounds: Option<&Bounds>,
    viewport: Point,
) -> Option<f64> {
    match spec {
        SizeSpec::Pixels(value) => Some(value),
        SizeSpec::MatchContent => None,
        SizeSpec::MatchBounds => bounds.map(|b| b.extent(axis)),
        SizeSpec::MatchParent | SizeSpec::Percent(_) => {
            let scale = match spec {
                SizeSpec::Percent(value) => value / 100.0,
                _ => 1.0,
            };
            let anchor = chain.iter().rev().find(|entry| !entry.spec(axis).is_content());
            match anchor {
                Some(entry) => entry.extent(axis).map(|extent| extent * scale),
                None if chain.is_empty() => {
                    let extent = match axis {
                        Axis::Horizontal => viewport.x,
                        Axis::Vertical => viewport.y,
                    };
                    Some(extent * scale)
                }
                None => None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(spec: SizeSpec, width: Option<f64>) -> AncestorEntry {
        AncestorEntry {
            width_spec: spec,
            height_spec: spec,
            width,
            height: width,
        }
    }

    #[test]
    fn parses_all_kinds() {
        assert_eq!("match_parent".parse::<SizeSpec>().unwrap(), SizeSpec::MatchParent);
        assert_eq!("Match_Content".parse::<SizeSpec>().unwrap(), SizeSpec::MatchContent);
        assert_eq!("match_bounds".parse::<SizeSpec>().unwrap(), SizeSpec::MatchBounds);
        assert_eq!("50%".parse::<SizeSpec>().unwrap(), SizeSpec::Percent(50.0));
        assert_eq!("120px".parse::<SizeSpec>().unwrap(), SizeSpec::Pixels(120.0));
        assert_eq!("120".parse::<SizeSpec>().unwrap(), SizeSpec::Pixels(120.0));
        assert!("-3px".parse::<SizeSpec>().is_err());
        assert!("wide".parse::<SizeSpec>().is_err());
    }

    #[test]
    fn percent_skips_content_sized_ancestors() {
        let viewport = Point::new(800.0, 600.0);
        let chain = [
            entry(SizeSpec::Pixels(200.0), Some(200.0)),
            entry(SizeSpec::MatchContent, None),
        ];
        let got = resolve_extent(SizeSpec::Percent(50.0), Axis::Horizontal, &chain, None, viewport);
        assert_eq!(got, Some(100.0));
    }

    #[test]
    fn root_falls_back_to_viewport() {
        let viewport = Point::new(800.0, 600.0);
        let got = resolve_extent(SizeSpec::MatchParent, Axis::Horizontal, &[], None, viewport);
        assert_eq!(got, Some(800.0));
        let got = resolve_extent(SizeSpec::Percent(25.0), Axis::Vertical, &[], None, viewport);
        assert_eq!(got, Some(150.0));
    }

    #[test]
    fn content_sized_chain_stays_unresolved() {
        let viewport = Point::new(800.0, 600.0);
        let chain = [entry(SizeSpec::MatchContent, None)];
        let got = resolve_extent(SizeSpec::MatchParent, Axis::Horizontal, &chain, None, viewport);
        assert_eq!(got, None);
    }

    #[test]
    fn match_bounds_needs_bounds() {
        let bounds = Bounds::new(Point::new(0.0, 0.0), Point::new(40.0, 30.0));
        let viewport = Point::new(800.0, 600.0);
        let got = resolve_extent(SizeSpec::MatchBounds, Axis::Vertical, &[], Some(&bounds), viewport);
        assert_eq!(got, Some(30.0));
        let got = resolve_extent(SizeSpec::MatchBounds, Axis::Vertical, &[], None, viewport);
        assert_eq!(got, None);
    }
}
