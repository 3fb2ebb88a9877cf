// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Reuse: view registry, reuse pool, and model binding.
//!
//! This crate manages the live edge of the engine — the mapping between cell
//! models and the host's reusable views:
//!
//! - [`ItemView`]: the seam hosts implement per concrete view type
//!   (bind/unbind/self-measure).
//! - [`ViewRegistry`]: per-engine map from [`RendererType`] tokens to view
//!   factories, with a degrade path ([`Placeholder`], optional fallback
//!   factory) for unregistered renderer types.
//! - [`ReusePool`]: idle views keyed by renderer type, bounded per type, so
//!   scrolling and updates dequeue instead of allocating.
//! - [`Binder`]: dequeues-or-creates, runs the pre-bind hook, binds, rebinds
//!   after recycling, and enforces that at most one live view is bound to a
//!   given [`BindingKey`] at any instant.
//!
//! Pool lookup is keyed by the view's concrete type (derived from the
//! model's declared renderer type), never by model identity: any pooled
//! `PhotoCell` view can serve any photo model.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[macro_use]
mod macros;

mod binder;
mod pool;
mod registry;
mod view;

pub use binder::{Binder, BindingKey, BoundView, PrepareHook, Slot};
pub use pool::{DEFAULT_IDLE_CAP, ReusePool};
pub use registry::{RegistryError, ViewFactory, ViewRegistry};
pub use view::{ItemView, Placeholder};
