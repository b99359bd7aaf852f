//! Tag constructors and named callbacks.
//!
//! The registry is a plain value owned by the session and passed to the
//! parser and to event dispatch explicitly; there is no global table to
//! mutate at startup.

use super::element::{Element, ElementBox};
use super::xml::{ParseCx, RawNode};
use crate::{error, Error};
use std::collections::HashMap;

/// Builds an element from a scanned markup node.
pub type Constructor = fn(&mut ParseCx<'_>, RawNode) -> Result<ElementBox, Error>;

/// A named handler that interactive elements dispatch to.
pub type Callback = Box<dyn Fn(&mut dyn Element) -> Result<(), Error>>;

pub struct Registry {
    tags: HashMap<String, Constructor>,
    callbacks: HashMap<String, Callback>,
}

impl Registry {
    /// A registry with no tags at all. Most embedders want
    /// [`Registry::with_builtins`].
    pub fn empty() -> Self {
        Self {
            tags: HashMap::new(),
            callbacks: HashMap::new(),
        }
    }

    /// A registry pre-populated with the built-in tags.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        crate::builtin::register(&mut registry);
        registry
    }

    pub fn register_tag(&mut self, name: impl Into<String>, constructor: Constructor) {
        self.tags.insert(name.into(), constructor);
    }

    pub fn constructor(&self, name: &str) -> Option<Constructor> {
        self.tags.get(name).copied()
    }

    pub fn register_callback(
        &mut self,
        name: impl Into<String>,
        callback: impl Fn(&mut dyn Element) -> Result<(), Error> + 'static,
    ) {
        self.callbacks.insert(name.into(), Box::new(callback));
    }

    /// Invokes a named callback against the element that triggered it.
    pub fn invoke(&self, name: &str, target: &mut dyn Element) -> Result<(), Error> {
        match self.callbacks.get(name) {
            Some(callback) => callback(target),
            None => Err(error!("unknown callback '{}'", name)),
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
