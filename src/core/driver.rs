//! The fixed-point layout driver.
//!
//! One resolution pass typically advances geometry by one level of the
//! dependency chain, so a tree of depth `d` settles in at least `d`
//! passes. The pass cap is a pragmatic stand-in for cycle detection: a
//! specification that can never settle (content-sized parent of a
//! parent-sized child, sibling anchor cycles) runs into it and is
//! reported with a [`Diagnostic`] naming every unresolved node.

use super::element::Element;
use super::geometry::Bounds;
use super::size::ResolveCx;
use crate::Error;
use std::fmt;

/// Upper bound on resolution passes per convergence attempt.
pub const MAX_PASSES: usize = 1000;

/// Why a convergence attempt failed.
#[derive(Debug)]
pub enum LayoutError {
    /// The pass cap was exhausted; the diagnostic lists every element
    /// that never initialized, layouts expanded down to the culprits.
    Divergent(Diagnostic),
    /// An element reported an error mid-pass.
    Element(Error),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::Divergent(diagnostic) => write!(
                f,
                "layout did not settle after {} passes; unresolved elements:\n{}",
                MAX_PASSES, diagnostic
            ),
            LayoutError::Element(error) => write!(f, "{}", error),
        }
    }
}

impl std::error::Error for LayoutError {}

impl From<Error> for LayoutError {
    fn from(error: Error) -> Self {
        LayoutError::Element(error)
    }
}

/// A tree of still-uninitialized elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub name: String,
    pub children: Vec<Diagnostic>,
}

impl Diagnostic {
    /// Collects the uninitialized part of a tree; `None` when the element
    /// settled.
    pub fn of(element: &dyn Element) -> Option<Self> {
        if element.is_initialized() {
            return None;
        }
        let children = match element.as_layout() {
            Some(layout) => (0..layout.child_count())
                .filter_map(|index| Diagnostic::of(layout.child(index)))
                .collect(),
            None => Vec::new(),
        };
        Some(Diagnostic {
            name: element.common().display_name(),
            children,
        })
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, prefix: &str) -> fmt::Result {
        let mut children = self.children.iter().peekable();
        while let Some(child) = children.next() {
            let last = children.peek().is_none();
            let (tee, bar) = match last {
                false => ("├── ", "│   "),
                true => ("└── ", "    "),
            };
            writeln!(f, "{}{}{}", prefix, tee, child.name)?;
            child.render(f, &format!("{}{}", prefix, bar))?;
        }
        Ok(())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        self.render(f, "")
    }
}

/// Runs bounded resolution passes against fixed bounds until the element
/// settles. Shared by [`init_ui`] and the scroll viewport's local
/// re-resolution.
pub(crate) fn run_passes(
    element: &mut dyn Element,
    bounds: &Bounds,
    mut make_cx: impl FnMut() -> ResolveCx,
) -> Result<(), LayoutError> {
    for pass in 0..MAX_PASSES {
        if element.is_initialized() {
            log::debug!(
                "'{}' settled after {} passes",
                element.common().display_name(),
                pass
            );
            return Ok(());
        }
        let mut cx = make_cx();
        element.resolve(&mut cx, Some(bounds))?;
    }
    if element.is_initialized() {
        return Ok(());
    }
    let diagnostic = Diagnostic::of(element).unwrap_or_else(|| Diagnostic {
        name: element.common().display_name(),
        children: Vec::new(),
    });
    log::warn!("layout diverged:\n{}", diagnostic);
    Err(LayoutError::Divergent(diagnostic))
}

/// Resets a tree, then resolves it against `bounds` until every element
/// is initialized. The bounds double as the viewport extents that
/// `match_parent`/percent specs fall back to at the root.
pub fn init_ui(root: &mut dyn Element, bounds: &Bounds) -> Result<(), LayoutError> {
    root.reset();
    let viewport = bounds.size();
    run_passes(root, bounds, || ResolveCx::new(viewport))
}
