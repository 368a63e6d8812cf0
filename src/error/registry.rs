//! Process-wide catalog of [`ErrorClass`]es.
//!
//! Classes are registered into a [`RegistryBuilder`] during startup. The builder is then
//! frozen into an immutable [`Registry`], optionally installed as the process-wide one, and
//! read concurrently from then on.

use super::{common::BUILTIN_CLASSES, ErrorClass, RegistryError};
use crate::StaticState;
use std::collections::{btree_map::Entry, BTreeMap};
use std::sync::OnceLock;

//===========================
// region:      --- RegistryBuilder

#[derive(Debug)]
pub struct RegistryBuilder {
    classes: BTreeMap<&'static str, &'static ErrorClass>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    /// Builder pre-loaded with the classes in [`common`](super::common).
    pub fn new() -> Self {
        let mut builder = Self::empty();
        for class in BUILTIN_CLASSES {
            builder.register(class);
        }
        builder
    }

    pub fn empty() -> Self {
        Self {
            classes: BTreeMap::new(),
        }
    }

    pub fn try_register(&mut self, class: &'static ErrorClass) -> Result<(), RegistryError> {
        match self.classes.entry(class.name()) {
            Entry::Occupied(_) => Err(RegistryError::Duplicate { name: class.name() }),
            Entry::Vacant(entry) => {
                log::debug!("registered error class {}", class.name());
                entry.insert(class);
                Ok(())
            }
        }
    }

    /// Registers `class`.
    ///
    /// # Panics
    /// If a class with the same name is already registered. Class definitions are fixed at
    /// compile time, so a duplicate is a programming error that must stop startup.
    pub fn register(&mut self, class: &'static ErrorClass) -> &mut Self {
        if let Err(err) = self.try_register(class) {
            panic!("{err}");
        }
        self
    }

    pub fn freeze(self) -> Registry {
        Registry {
            classes: self.classes,
        }
    }

    /// Freezes the builder and installs the result as the process-wide registry.
    pub fn install(self) -> Result<&'static Registry, RegistryError> {
        let registry = GlobalRegistry::set_state(self.freeze())
            .map_err(|_| RegistryError::AlreadyInstalled)?;
        log::debug!("installed error class registry with {} classes", registry.len());
        Ok(registry)
    }
}

// endregion:   --- RegistryBuilder

//===========================
// region:      --- Registry

#[derive(Debug)]
pub struct Registry {
    classes: BTreeMap<&'static str, &'static ErrorClass>,
}

impl Registry {
    pub fn lookup(&self, name: &str) -> Option<&'static ErrorClass> {
        self.classes.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// All classes, ordered by name.
    pub fn error_classes(&self) -> Vec<&'static ErrorClass> {
        self.classes.values().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

// endregion:   --- Registry

//===========================
// region:      --- Process-wide registry

struct GlobalRegistry;

impl StaticState<Registry> for GlobalRegistry {
    fn get_static() -> &'static OnceLock<Registry> {
        static REGISTRY: OnceLock<Registry> = OnceLock::new();
        &REGISTRY
    }
}

/// The installed registry, if [`RegistryBuilder::install`] has been called.
pub fn installed() -> Option<&'static Registry> {
    GlobalRegistry::try_state()
}

pub fn lookup(name: &str) -> Option<&'static ErrorClass> {
    installed()?.lookup(name)
}

/// Classes of the installed registry ordered by name; empty if none is installed.
pub fn error_classes() -> Vec<&'static ErrorClass> {
    installed()
        .map(Registry::error_classes)
        .unwrap_or_default()
}

// endregion:   --- Process-wide registry
