//! Engine internals: geometry, size resolution, the element tree, the
//! fixed-point driver, markup parsing and the session.

pub mod geometry;
pub mod size;
pub mod surface;
pub mod element;
pub mod content;
pub mod registry;
pub mod xml;
pub mod driver;
pub mod app;
