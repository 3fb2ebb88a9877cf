// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stable identifiers: cell ids, section ids, and renderer-type tokens.

use alloc::string::String;
use core::any::{TypeId, type_name};
use core::fmt;

/// Stable identifier of a cell model within its section.
///
/// Used as the diff key, so it must stay stable across updates and be unique
/// within its owning [`Section`](crate::Section) (including the header/footer
/// ids).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(String);

impl CellId {
    /// Creates a cell id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CellId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CellId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stable identifier of a section, diffed before the cells within it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(String);

impl SectionId {
    /// Creates a section id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Token identifying the concrete view type that renders a cell model.
///
/// The reuse pool and the view registry are keyed by this token, never by
/// model identity. Create one with [`RendererType::of`], using the host's view
/// type (or any marker type that stands for it):
///
/// ```rust
/// use trellis_model::RendererType;
///
/// struct PhotoCell;
/// struct TextCell;
///
/// assert_eq!(RendererType::of::<PhotoCell>(), RendererType::of::<PhotoCell>());
/// assert_ne!(RendererType::of::<PhotoCell>(), RendererType::of::<TextCell>());
/// ```
///
/// Equality and hashing use the [`TypeId`] only; the captured type name is
/// diagnostic-facing and has no identity semantics.
#[derive(Clone, Copy)]
pub struct RendererType {
    id: TypeId,
    name: &'static str,
}

impl RendererType {
    /// Returns the token for the view type `V`.
    #[must_use]
    pub fn of<V: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<V>(),
            name: type_name::<V>(),
        }
    }

    /// Returns the type name, for diagnostics only.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.name
    }
}

impl PartialEq for RendererType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RendererType {}

impl core::hash::Hash for RendererType {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for RendererType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RendererType").field(&self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{CellId, RendererType, SectionId};

    #[test]
    fn ids_compare_by_content() {
        assert_eq!(CellId::new("a"), CellId::from("a"));
        assert_ne!(CellId::new("a"), CellId::new("b"));
        assert_eq!(SectionId::new("s").as_str(), "s");
    }

    #[test]
    fn renderer_tokens_compare_by_type() {
        struct A;
        struct B;
        assert_eq!(RendererType::of::<A>(), RendererType::of::<A>());
        assert_ne!(RendererType::of::<A>(), RendererType::of::<B>());
        assert!(RendererType::of::<A>().name().contains('A'));
    }
}
