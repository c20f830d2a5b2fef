//! Property kinds and the standard variants.
//!
//! A [`PropertyKind`] is a named, reusable [`Policy`]. The same value serves
//! two purposes:
//!
//! - **Deriving a new kind**: [`PropertyKind::customize`] takes a set of
//!   [`Overrides`] and returns a new kind with those flags baked in. Kinds
//!   built this way are marked [`Policy::dynamic`].
//! - **Declaring a field**: [`PropertyKind::declare`] binds a compute
//!   function to a name and returns a [`Property`] of this kind.
//!
//! ## Standard Variants
//!
//! | Kind | writable | resettable | cached | required | key |
//! |------|----------|------------|--------|----------|-----|
//! | [`CUSTOM`] | N | N | N | N | N |
//! | [`WRITABLE`] | Y | N | N | N | N |
//! | [`REQUIRED`] | Y | N | N | Y | N |
//! | [`MUTABLE`] | Y | Y | N | N | N |
//! | [`KEY`] | N | N | N | Y | Y |
//! | [`LAZY`] | N | N | Y | N | N |
//! | [`CACHED`] | N | Y | Y | N | N |
//!
//! Any other combination is one `customize` call away:
//!
//! ```
//! use property_manager::{Overrides, CACHED};
//!
//! const WRITABLE_CACHED: property_manager::PropertyKind =
//!     CACHED.customize(Overrides::new().writable(true));
//!
//! assert!(WRITABLE_CACHED.policy().writable);
//! assert!(WRITABLE_CACHED.policy().cached);
//! assert!(WRITABLE_CACHED.policy().dynamic);
//! ```

use crate::policy::Policy;
use crate::property::{ComputeFn, Property};

/// Name given to derived kinds when none is supplied.
pub const DEFAULT_KIND_NAME: &str = "customized";

/// A named policy that properties can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyKind {
    name: &'static str,
    policy: Policy,
}

impl PropertyKind {
    pub const fn new(name: &'static str, policy: Policy) -> Self {
        Self { name, policy }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn policy(&self) -> Policy {
        self.policy
    }

    /// Derive a new kind from this one with some flags replaced.
    pub const fn customize(self, overrides: Overrides) -> Self {
        self.customize_named(DEFAULT_KIND_NAME, overrides)
    }

    /// Derive a new, named kind from this one with some flags replaced.
    pub const fn customize_named(self, name: &'static str, overrides: Overrides) -> Self {
        Self {
            name,
            policy: overrides.apply(self.policy).dynamic(true),
        }
    }

    /// Declare a property of this kind.
    ///
    /// See also the [`property!`](crate::property!) macro, which takes the
    /// property name from the compute function.
    pub const fn declare<O>(self, name: &'static str, compute: ComputeFn<O>) -> Property<O> {
        Property::new(name, compute, self)
    }
}

/// Flag replacements applied by [`PropertyKind::customize`].
///
/// Unset fields keep the base kind's value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    pub writable: Option<bool>,
    pub resettable: Option<bool>,
    pub cached: Option<bool>,
    pub required: Option<bool>,
    pub key: Option<bool>,
    pub repr: Option<bool>,
    pub usage_notes: Option<bool>,
    pub environment_variable: Option<&'static str>,
}

impl Overrides {
    pub const fn new() -> Self {
        Self {
            writable: None,
            resettable: None,
            cached: None,
            required: None,
            key: None,
            repr: None,
            usage_notes: None,
            environment_variable: None,
        }
    }

    pub const fn writable(mut self, value: bool) -> Self {
        self.writable = Some(value);
        self
    }

    pub const fn resettable(mut self, value: bool) -> Self {
        self.resettable = Some(value);
        self
    }

    pub const fn cached(mut self, value: bool) -> Self {
        self.cached = Some(value);
        self
    }

    pub const fn required(mut self, value: bool) -> Self {
        self.required = Some(value);
        self
    }

    pub const fn key(mut self, value: bool) -> Self {
        self.key = Some(value);
        self
    }

    pub const fn repr(mut self, value: bool) -> Self {
        self.repr = Some(value);
        self
    }

    pub const fn usage_notes(mut self, value: bool) -> Self {
        self.usage_notes = Some(value);
        self
    }

    pub const fn environment_variable(mut self, name: &'static str) -> Self {
        self.environment_variable = Some(name);
        self
    }

    /// Apply the overrides on top of a base policy.
    pub const fn apply(&self, mut policy: Policy) -> Policy {
        if let Some(value) = self.writable {
            policy.writable = value;
        }
        if let Some(value) = self.resettable {
            policy.resettable = value;
        }
        if let Some(value) = self.cached {
            policy.cached = value;
        }
        if let Some(value) = self.required {
            policy.required = value;
        }
        if let Some(value) = self.key {
            policy.key = value;
        }
        if let Some(value) = self.repr {
            policy.repr = value;
        }
        if let Some(value) = self.usage_notes {
            policy.usage_notes = value;
        }
        if let Some(name) = self.environment_variable {
            policy.environment_variable = Some(name);
        }
        policy
    }
}

/// Computed on every read, never assigned or reset.
pub const CUSTOM: PropertyKind = PropertyKind::new("custom", Policy::new());

/// Assignable; the assigned value replaces the computed one for good.
pub const WRITABLE: PropertyKind = PropertyKind::new("writable", CUSTOM.policy.writable(true));

/// Writable and must hold a non-null value once construction finishes.
pub const REQUIRED: PropertyKind = PropertyKind::new("required", WRITABLE.policy.required(true));

/// Writable, and an assigned value can be reset to the computed default.
pub const MUTABLE: PropertyKind = PropertyKind::new("mutable", WRITABLE.policy.resettable(true));

/// Required, assignable exactly once, and part of the owner's identity.
pub const KEY: PropertyKind = PropertyKind::new("key", CUSTOM.policy.key(true).required(true));

/// Computed once and cached for the owner's lifetime.
pub const LAZY: PropertyKind = PropertyKind::new("lazy", CUSTOM.policy.cached(true));

/// Computed once and cached until reset.
pub const CACHED: PropertyKind = PropertyKind::new("cached", LAZY.policy.resettable(true));

/// The standard variants, in declaration order.
pub const STANDARD_KINDS: &[PropertyKind] = &[CUSTOM, WRITABLE, REQUIRED, MUTABLE, KEY, LAZY, CACHED];
