//! Small, markup-driven UI toolkit with a convergent layout engine.
//!
//! A layout is a tree of elements, each declaring its width and height as
//! one of five size specifications (pixels, percent, `match_parent`,
//! `match_content`, `match_bounds`). Because a container's size can depend
//! on its children while a child's size depends on the container, geometry
//! is solved by repeated resolution passes until the tree reaches a fixed
//! point; see [`core::driver::init_ui`].
//!
//! Built-in tags are documented in [`builtin`]. Internal processes are
//! documented in [`core`].

pub mod core;
pub mod builtin;

pub use crate::core::geometry::{AspectRatio, Axis, Bounds, Gravity, Point, Pull};
pub use crate::core::size::{AncestorEntry, ResolveCx, SizeSpec};
pub use crate::core::element::{Common, Element, ElementBox, Layout};
pub use crate::core::surface::Surface;
pub use crate::core::driver::{init_ui, Diagnostic, LayoutError, MAX_PASSES};
pub use crate::core::content::{
    ContentProvider, ContentSource, DirSource, DocumentSource, FixedMeasure, Monospace,
};
pub use crate::core::registry::{Callback, Constructor, Registry};
pub use crate::core::xml::{parse_document, scan, Attrs, ParseCx, RawNode};
pub use crate::core::app::Session;

use std::fmt;

/// The crate-wide error value, carrying the source location it was raised
/// from and an optional message. Construct it with the [`error!`] macro.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    pub file: &'static str,
    pub line: u32,
    pub msg: Option<String>,
}

impl Error {
    pub fn new(file: &'static str, line: u32, msg: Option<String>) -> Self {
        Self { file, line, msg }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.msg {
            Some(msg) => write!(f, "{} ({}:{})", msg, self.file, self.line),
            None => write!(f, "unknown error ({}:{})", self.file, self.line),
        }
    }
}

impl std::error::Error for Error {}

/// Creates an [`Error`] at the current source location, with an optional
/// formatted message.
///
/// ```ignore
/// Err(error!())?;
/// Err(error!("unknown element tag '{}'", tag))?;
/// ```
#[macro_export]
macro_rules! error {
    () => { $crate::Error::new(::core::file!(), ::core::line!(), None) };
    ($($arg:tt)*) => {
        $crate::Error::new(::core::file!(), ::core::line!(), Some(::std::format!($($arg)*)))
    };
}
