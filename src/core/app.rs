//! The session: root ownership, relayout and hot reload.

use super::content::{ContentProvider, DocumentSource};
use super::driver::{init_ui, LayoutError};
use super::element::{Element, ElementBox};
use super::geometry::Bounds;
use super::registry::Registry;
use super::xml::{parse_document, ParseCx};
use crate::Error;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// One loaded layout document and everything it needs to stay alive: the
/// registry, the collaborator handles, the viewport, and the root element
/// behind a mutex.
///
/// All layout work is single-threaded; the mutex only disciplines the
/// root swap between the event loop and whoever waits on the session
/// (hot reload replaces the whole tree under the lock).
pub struct Session {
    registry: Registry,
    documents: Box<dyn DocumentSource>,
    content: Box<dyn ContentProvider>,
    path: String,
    viewport: Bounds,
    root: Mutex<ElementBox>,
}

impl Session {
    /// Parses `path` into a fresh element tree. No layout is performed
    /// yet; call [`Session::layout`] once content sources are ready.
    pub fn new(
        registry: Registry,
        documents: Box<dyn DocumentSource>,
        content: Box<dyn ContentProvider>,
        path: impl Into<String>,
        viewport: Bounds,
    ) -> Result<Self, Error> {
        let path = path.into();
        log::info!("loading layout document '{}'", path);
        let bytes = documents.load(&path)?;
        let root = {
            let mut cx = ParseCx::new(&registry, &*documents, &*content);
            parse_document(&mut cx, &bytes)?
        };
        Ok(Self {
            registry,
            documents,
            content,
            path,
            viewport,
            root: Mutex::new(root),
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn viewport(&self) -> Bounds {
        self.viewport
    }

    /// Resolves the whole tree against the current viewport.
    pub fn layout(&self) -> Result<(), LayoutError> {
        let mut root = self.lock();
        init_ui(&mut **root, &self.viewport)
    }

    /// Adopts new window bounds and relayouts if they changed.
    pub fn set_viewport(&mut self, viewport: Bounds) -> Result<(), LayoutError> {
        if self.viewport == viewport {
            return Ok(());
        }
        log::debug!("viewport changed to {:?}", viewport.size());
        self.viewport = viewport;
        self.layout()
    }

    /// Re-parses the document and swaps the root in, keeping the old tree
    /// when parsing or layout fails.
    pub fn reload(&self) -> Result<(), LayoutError> {
        log::info!("reloading layout document '{}'", self.path);
        let bytes = self.documents.load(&self.path)?;
        let mut fresh = {
            let mut cx = ParseCx::new(&self.registry, &*self.documents, &*self.content);
            parse_document(&mut cx, &bytes)?
        };
        init_ui(&mut *fresh, &self.viewport)?;
        *self.lock() = fresh;
        Ok(())
    }

    /// Runs a closure against the root element, under the lock. This is
    /// how embedders route input events.
    pub fn with_root<R>(&self, f: impl FnOnce(&mut dyn Element) -> R) -> R {
        let mut root = self.lock();
        f(&mut **root)
    }

    /// Repaints the whole tree. Geometry must have settled first.
    pub fn draw(&self) {
        self.with_root(|root| root.draw());
    }

    fn lock(&self) -> MutexGuard<'_, ElementBox> {
        self.root.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
