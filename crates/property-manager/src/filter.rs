//! Policy filtering.
//!
//! [`PolicyFilter`] expresses "properties whose flags look like this" and is
//! what drives enumeration on owner objects: required properties, cached
//! properties to clear, properties to render, and so on. A flag left
//! unspecified is not filtered on.

use crate::policy::Policy;

/// A conjunction of expected flag values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolicyFilter {
    pub writable: Option<bool>,
    pub resettable: Option<bool>,
    pub cached: Option<bool>,
    pub required: Option<bool>,
    pub key: Option<bool>,
    pub repr: Option<bool>,
    pub dynamic: Option<bool>,
}

impl PolicyFilter {
    /// A filter that matches every policy.
    pub const fn any() -> Self {
        Self {
            writable: None,
            resettable: None,
            cached: None,
            required: None,
            key: None,
            repr: None,
            dynamic: None,
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

    /// Filter on representation visibility.
    ///
    /// `repr(true)` matches every property that hasn't explicitly opted out
    /// of the representation; since [`Policy::repr`] defaults to `true` an
    /// untouched policy matches.
    pub const fn repr(mut self, value: bool) -> Self {
        self.repr = Some(value);
        self
    }

    pub const fn dynamic(mut self, value: bool) -> Self {
        self.dynamic = Some(value);
        self
    }

    /// Whether no flag is constrained.
    pub fn is_empty(&self) -> bool {
        *self == Self::any()
    }

    /// Check whether a policy satisfies every constrained flag.
    pub fn matches(&self, policy: &Policy) -> bool {
        flag_matches(self.writable, policy.writable)
            && flag_matches(self.resettable, policy.resettable)
            && flag_matches(self.cached, policy.cached)
            && flag_matches(self.required, policy.required)
            && flag_matches(self.key, policy.key)
            && flag_matches(self.repr, policy.repr)
            && flag_matches(self.dynamic, policy.dynamic)
    }
}

fn flag_matches(expected: Option<bool>, actual: bool) -> bool {
    expected.map_or(true, |expected| expected == actual)
}
