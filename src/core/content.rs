//! Collaborator seams: document loading and content sizing.
//!
//! The engine never decodes assets or shapes text itself. Leaves hold a
//! [`ContentSource`] that answers "is the natural size known yet, and what
//! is it"; how that size is produced (font metrics, image headers) is the
//! embedder's business.

use super::geometry::Point;
use crate::{error, Error};
use std::collections::HashMap;
use std::path::PathBuf;

/// Loads markup documents by path, for the session and `<import>`.
pub trait DocumentSource {
    fn load(&self, path: &str) -> Result<Vec<u8>, Error>;
}

/// Reports a leaf's natural content size once its backing asset is ready.
pub trait ContentSource {
    fn natural_size(&self) -> Option<Point>;
}

/// Hands out content sources for the leaf kinds the markup can name.
pub trait ContentProvider {
    fn text(&self, text: &str) -> Box<dyn ContentSource>;
    fn image(&self, path: &str) -> Result<Box<dyn ContentSource>, Error>;
}

/// A content source with a known, fixed natural size.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FixedMeasure(pub Point);

impl ContentSource for FixedMeasure {
    fn natural_size(&self) -> Option<Point> {
        Some(self.0)
    }
}

/// Sizes text as a single line of fixed-advance glyphs. Good enough for
/// prototypes and tests; real embedders plug a shaping engine in instead.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Monospace {
    pub advance: f64,
    pub line_height: f64,
}

impl ContentProvider for Monospace {
    fn text(&self, text: &str) -> Box<dyn ContentSource> {
        let width = text.chars().count() as f64 * self.advance;
        Box::new(FixedMeasure(Point::new(width, self.line_height)))
    }

    fn image(&self, path: &str) -> Result<Box<dyn ContentSource>, Error> {
        Err(error!("no image decoder installed, cannot size '{}'", path))
    }
}

/// Serves documents from a directory on disk.
pub struct DirSource(pub PathBuf);

impl DocumentSource for DirSource {
    fn load(&self, path: &str) -> Result<Vec<u8>, Error> {
        std::fs::read(self.0.join(path)).map_err(|e| error!("failed to read '{}': {}", path, e))
    }
}

/// In-memory documents, keyed by path.
impl DocumentSource for HashMap<String, String> {
    fn load(&self, path: &str) -> Result<Vec<u8>, Error> {
        self.get(path)
            .map(|document| document.clone().into_bytes())
            .ok_or_else(|| error!("no such document: '{}'", path))
    }
}
