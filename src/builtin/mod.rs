//! Built-in tags.
//!
//! # Attributes common to every tag
//!
//! - `width`, `height`: a size spec: `match_parent`, `match_content`,
//!   `match_bounds`, a percentage (`50%`), or pixels (`120`, `120px`).
//!   Both are mandatory.
//! - `id`: identifier for sibling anchors and lookups
//! - `gravity`: `center`, `top`, `bottom`, `left`, `right`, `top-left`,
//!   `top-right`, `bottom-left`, `bottom-right` (default `top-left`)
//! - `padding`: inner inset in pixels
//! - `background`: `#rgb`, `#rrggbb` or `#rrggbbaa`
//!
//! # Containers
//!
//! - `<stack orientation="vertical|horizontal">`: children in a column or
//!   row, in document order
//! - `<grid orientation=... columns=... cell-width=... cell-height=...>`:
//!   children in equally-sized cells, row-major. `columns` defaults to
//!   the child count when horizontal, 1 when vertical; cell extents
//!   default to the exact fraction of the grid.
//! - `<relative>`: children carry `top-of` / `bottom-of` / `left-of` /
//!   `right-of` anchors targeting `parent`, an offset (`40`, `25%`) from
//!   the parent's edge, or a sibling id. At least one anchor per child;
//!   at most one per axis.
//! - `<ratio ratio="16:9">`: single child forced to an aspect ratio
//! - `<scroll scroll-rate="10">`: single child behind a scrolling window
//! - `<import file="other.xml">`: embeds another document
//!
//! # Leaves
//!
//! - `<text text="...">`
//! - `<image src="...">`
//! - `<button text="..." on-click="callback-name">`

pub mod stack;
pub mod grid;
pub mod relative;
pub mod ratio;
pub mod scroll;
pub mod import;
pub mod text;
pub mod image;
pub mod button;

pub use button::Button;
pub use grid::Grid;
pub use image::Image;
pub use import::Import;
pub use ratio::FixedRatio;
pub use relative::{AnchorTarget, AnchoredChild, HorizontalEdge, Relative, VerticalEdge};
pub use scroll::Scroll;
pub use stack::Stack;
pub use text::Text;

use crate::core::registry::Registry;

/// Registers every built-in tag.
pub fn register(registry: &mut Registry) {
    registry.register_tag("stack", stack::Stack::build);
    registry.register_tag("grid", grid::Grid::build);
    registry.register_tag("relative", relative::Relative::build);
    registry.register_tag("ratio", ratio::FixedRatio::build);
    registry.register_tag("scroll", scroll::Scroll::build);
    registry.register_tag("import", import::Import::build);
    registry.register_tag("text", text::Text::build);
    registry.register_tag("image", image::Image::build);
    registry.register_tag("button", button::Button::build);
}
