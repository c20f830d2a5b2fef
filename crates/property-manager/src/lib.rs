//! # Property Manager
//!
//! Computed properties with per-field policies. A type declares fields whose
//! values are produced by a function rather than stored directly, and each
//! field independently chooses whether it can be assigned, whether an
//! assigned or cached value can be reset, whether the computed value is
//! cached, and whether a value is mandatory at construction time.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  PropertyManager (manager.rs)                               │
//! │  - Keyword construction + required validation               │
//! │  - Enumeration, cache clearing, identity, representation    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Property (property.rs)                                     │
//! │  - name + compute function + kind                           │
//! │  - get / set / reset against the owner's store              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  PropertyKind / Policy (kind.rs, policy.rs)                 │
//! │  - Standard variants and on-the-fly customization           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  PropertyStore (store.rs)                                   │
//! │  - Per-instance assigned and cached values                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Property Variants
//!
//! | Variant | Assignment | Reset | Caching | Required |
//! |---------|------------|-------|---------|----------|
//! | [`CUSTOM`] | No | No | No | No |
//! | [`WRITABLE`] | Yes | No | No | No |
//! | [`REQUIRED`] | Yes | No | No | Yes |
//! | [`MUTABLE`] | Yes | Yes | No | No |
//! | [`KEY`] | Once | No | No | Yes |
//! | [`LAZY`] | No | No | Yes | No |
//! | [`CACHED`] | No | Yes | Yes | No |
//!
//! Other combinations come from [`PropertyKind::customize`].
//!
//! ## Threading
//!
//! Owner objects are meant to be used from one thread at a time and the
//! store is `!Sync`. Nothing guards the read-compute-cache sequence, so
//! callers that share an owner across threads must serialize access
//! themselves, and compute functions should be free of side effects.
//!
//! ## Module Overview
//!
//! - [`manager`]: The [`PropertyManager`] trait and owner-level helpers
//! - [`property`]: [`Property`] and the [`property!`] macro
//! - [`kind`]: [`PropertyKind`], [`Overrides`] and the standard variants
//! - [`policy`]: Capability flags
//! - [`filter`]: Policy predicates used for enumeration
//! - [`store`]: Per-instance override store
//! - [`value`]: Dynamically typed property values
//! - [`notes`]: Usage notes for documentation
//! - [`config`]: Settings
//! - [`error`]: Error types

pub mod config;
pub mod error;
pub mod filter;
pub mod kind;
pub mod manager;
pub mod notes;
pub mod policy;
pub mod property;
pub mod store;
pub mod value;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use error::{BoxError, PropertyError, Result};
pub use filter::PolicyFilter;
pub use kind::{
    Overrides, PropertyKind, CACHED, CUSTOM, KEY, LAZY, MUTABLE, REQUIRED, STANDARD_KINDS,
    WRITABLE,
};
pub use manager::{
    clear_property, format_property, set_property, PropertyKey, PropertyManager, Repr,
};
pub use policy::Policy;
pub use property::{no_default, ComputeFn, Property};
pub use store::PropertyStore;
pub use value::Value;
