//! Property policies.
//!
//! A [`Policy`] is the set of capability flags that governs one computed
//! property: whether it can be assigned, reset, cached, whether a value is
//! mandatory at construction time, and so on. Policies are plain `Copy`
//! data built in `const` context and never mutated once a kind is defined.

/// Capability flags of a computed property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    /// Values can be assigned with `set`, overriding the computed value.
    pub writable: bool,

    /// Assigned or cached values can be cleared with `reset`.
    pub resettable: bool,

    /// The computed value is stored after the first read.
    pub cached: bool,

    /// A non-null value must be present once construction finishes.
    pub required: bool,

    /// The value is part of the owner's identity (comparison, sorting,
    /// hashing). Key properties can be assigned exactly once.
    pub key: bool,

    /// The property is rendered in the owner's representation.
    pub repr: bool,

    /// The kind carrying this policy was derived on the fly by
    /// [`PropertyKind::customize`](crate::PropertyKind::customize) rather
    /// than being one of the standard variants.
    pub dynamic: bool,

    /// Usage notes are appended to the property's documentation.
    pub usage_notes: bool,

    /// When set, the named environment variable overrides the computed
    /// value (but not an assigned or cached one).
    pub environment_variable: Option<&'static str>,
}

impl Policy {
    /// The primitive policy every variant derives from: nothing enabled
    /// except representation and usage notes.
    pub const fn new() -> Self {
        Self {
            writable: false,
            resettable: false,
            cached: false,
            required: false,
            key: false,
            repr: true,
            dynamic: false,
            usage_notes: true,
            environment_variable: None,
        }
    }

    pub const fn writable(mut self, value: bool) -> Self {
        self.writable = value;
        self
    }

    pub const fn resettable(mut self, value: bool) -> Self {
        self.resettable = value;
        self
    }

    pub const fn cached(mut self, value: bool) -> Self {
        self.cached = value;
        self
    }

    pub const fn required(mut self, value: bool) -> Self {
        self.required = value;
        self
    }

    pub const fn key(mut self, value: bool) -> Self {
        self.key = value;
        self
    }

    pub const fn repr(mut self, value: bool) -> Self {
        self.repr = value;
        self
    }

    pub const fn dynamic(mut self, value: bool) -> Self {
        self.dynamic = value;
        self
    }

    pub const fn usage_notes(mut self, value: bool) -> Self {
        self.usage_notes = value;
        self
    }

    pub const fn environment_variable(mut self, name: &'static str) -> Self {
        self.environment_variable = Some(name);
        self
    }

    /// Whether reads consult the override store before computing.
    pub const fn uses_store(&self) -> bool {
        self.key || self.writable || self.cached
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::new()
    }
}
