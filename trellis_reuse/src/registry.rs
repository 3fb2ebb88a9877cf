// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-engine mapping from renderer-type tokens to view factories.

use alloc::boxed::Box;
use core::fmt;

use hashbrown::HashMap;

use trellis_model::RendererType;

use crate::view::{ItemView, Placeholder};

/// Creates a fresh view instance for one renderer type.
pub type ViewFactory<C> = Box<dyn Fn() -> Box<dyn ItemView<C>>>;

/// A renderer type was not registered before a cell model referenced it.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No factory was registered for the renderer type.
    #[error("no view factory registered for renderer type `{renderer}`")]
    Unregistered {
        /// Diagnostic name of the missing renderer type.
        renderer: &'static str,
    },
}

/// Registry of view factories, owned by one engine instance.
///
/// Lookup is keyed by [`RendererType`] (the view's concrete type identity),
/// never by model identity. The registry is per-instance state, not a
/// process-wide table, so two controllers never share or leak factories.
///
/// A cell model referencing an unregistered renderer type is a configuration
/// error: [`ViewRegistry::create`] surfaces it as [`RegistryError`], while
/// the binder's degrade path substitutes the registered fallback factory (or
/// the built-in [`Placeholder`]) so one malformed item cannot crash the list.
pub struct ViewRegistry<C: 'static> {
    factories: HashMap<RendererType, ViewFactory<C>>,
    fallback: Option<ViewFactory<C>>,
}

impl<C> ViewRegistry<C> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
            fallback: None,
        }
    }

    /// Registers (or replaces) the factory for `renderer`.
    pub fn register<F>(&mut self, renderer: RendererType, factory: F)
    where
        F: Fn() -> Box<dyn ItemView<C>> + 'static,
    {
        self.factories.insert(renderer, Box::new(factory));
    }

    /// Installs a fallback factory used when a renderer type is missing.
    pub fn set_fallback<F>(&mut self, factory: F)
    where
        F: Fn() -> Box<dyn ItemView<C>> + 'static,
    {
        self.fallback = Some(Box::new(factory));
    }

    /// Returns `true` if `renderer` has a registered factory.
    #[must_use]
    pub fn is_registered(&self, renderer: RendererType) -> bool {
        self.factories.contains_key(&renderer)
    }

    /// Creates a fresh view for `renderer`.
    pub fn create(&self, renderer: RendererType) -> Result<Box<dyn ItemView<C>>, RegistryError> {
        match self.factories.get(&renderer) {
            Some(factory) => Ok(factory()),
            None => Err(RegistryError::Unregistered {
                renderer: renderer.name(),
            }),
        }
    }

    /// Creates a view for `renderer`, degrading instead of failing.
    ///
    /// Missing factory with a fallback installed: the fallback view, with a
    /// diagnostic. Missing factory and no fallback: a development-build
    /// assertion, then an inert [`Placeholder`].
    #[must_use]
    pub fn create_or_fallback(&self, renderer: RendererType) -> Box<dyn ItemView<C>> {
        match self.create(renderer) {
            Ok(view) => view,
            Err(_) => match &self.fallback {
                Some(factory) => {
                    twarn!(
                        renderer = renderer.name(),
                        "unregistered renderer type; using fallback factory"
                    );
                    factory()
                }
                None => {
                    twarn!(
                        renderer = renderer.name(),
                        "unregistered renderer type and no fallback; using placeholder"
                    );
                    debug_assert!(
                        false,
                        "no view factory registered for renderer type `{}`",
                        renderer.name()
                    );
                    Box::new(Placeholder)
                }
            },
        }
    }
}

impl<C> Default for ViewRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for ViewRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewRegistry")
            .field("factories", &self.factories.len())
            .field("has_fallback", &self.fallback.is_some())
            .finish_non_exhaustive()
    }
}
