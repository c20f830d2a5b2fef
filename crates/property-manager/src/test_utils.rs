//! Fixtures for probing how a property kind behaves.
//!
//! [`Inspector`] declares a single property of the inspected kind on a
//! throwaway [`Probe`] owner and exercises it the way user code would, so
//! tests can assert on observable behavior rather than on policy flags.

use std::cell::Cell;
use std::marker::PhantomData;

use crate::error::Result;
use crate::kind::{self, PropertyKind};
use crate::manager::PropertyManager;
use crate::property::Property;
use crate::store::PropertyStore;
use crate::value::Value;

/// Name of the property declared on every probe.
pub const PROBE_PROPERTY: &str = "value";

/// Selects the kind a [`Probe`] declares its property with.
pub trait ProbeKind: 'static {
    const KIND: PropertyKind;
}

macro_rules! probe_kinds {
    ($($marker:ident => $kind:path),* $(,)?) => {
        $(
            pub struct $marker;

            impl ProbeKind for $marker {
                const KIND: PropertyKind = $kind;
            }
        )*
    };
}

probe_kinds! {
    Custom => kind::CUSTOM,
    Writable => kind::WRITABLE,
    Required => kind::REQUIRED,
    Mutable => kind::MUTABLE,
    Key => kind::KEY,
    Lazy => kind::LAZY,
    Cached => kind::CACHED,
}

/// Owner with one property whose computed value changes on every call.
pub struct Probe<K> {
    calls: Cell<i64>,
    store: PropertyStore,
    _kind: PhantomData<K>,
}

impl<K> Default for Probe<K> {
    fn default() -> Self {
        Self {
            calls: Cell::new(0),
            store: PropertyStore::default(),
            _kind: PhantomData,
        }
    }
}

impl<K> Probe<K> {
    fn value(&self) -> Result<Value> {
        self.calls.set(self.calls.get() + 1);
        Ok(Value::Int(self.calls.get()))
    }

    /// How many times the compute function ran.
    pub fn calls(&self) -> i64 {
        self.calls.get()
    }
}

impl<K: ProbeKind> PropertyManager for Probe<K> {
    const PROPERTIES: &'static [Property<Self>] = &[K::KIND.declare(PROBE_PROPERTY, Self::value)];

    fn store(&self) -> &PropertyStore {
        &self.store
    }
}

/// Observes the behavior of kind `K`.
pub struct Inspector<K> {
    _kind: PhantomData<K>,
}

impl<K: ProbeKind> Default for Inspector<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ProbeKind> Inspector<K> {
    pub fn new() -> Self {
        Self { _kind: PhantomData }
    }

    fn probe(&self) -> Probe<K> {
        Probe::default()
    }

    /// Two reads return the same value and compute only once.
    pub fn is_cached(&self) -> bool {
        let probe = self.probe();
        let first = probe.get(PROBE_PROPERTY).ok();
        let second = probe.get(PROBE_PROPERTY).ok();
        first.is_some() && first == second && probe.calls() == 1
    }

    pub fn is_recomputed(&self) -> bool {
        !self.is_cached()
    }

    /// A value assigned after construction is read back.
    pub fn is_writable(&self) -> bool {
        let mut probe = self.probe();
        // First assignment always succeeds for keys, so take it up front.
        let _ = probe.set(PROBE_PROPERTY, "initial");
        let marker = Value::from("assigned");
        probe.set(PROBE_PROPERTY, marker.clone()).is_ok()
            && probe.get(PROBE_PROPERTY).ok() == Some(marker)
    }

    pub fn is_resettable(&self) -> bool {
        self.probe().reset(PROBE_PROPERTY).is_ok()
    }

    pub fn is_read_only(&self) -> bool {
        !self.is_writable() && !self.is_resettable()
    }

    /// The property can be set through keyword construction, and a clean
    /// construction leaves a computed value in place.
    pub fn is_injectable(&self) -> bool {
        let marker = Value::from("injected");
        let Ok(clean) = Probe::<K>::new_with(Vec::<(&str, Value)>::new()) else {
            return false;
        };
        let Ok(injected) = Probe::<K>::new_with([(PROBE_PROPERTY, marker.clone())]) else {
            return false;
        };
        matches!(clean.get(PROBE_PROPERTY), Ok(Value::Int(_)))
            && injected.get(PROBE_PROPERTY).ok() == Some(marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_behaves_like_a_plain_getter() {
        let p = Inspector::<Custom>::new();
        assert!(p.is_recomputed());
        assert!(p.is_read_only());
        assert!(!p.is_injectable());
    }

    #[test]
    fn writable_supports_assignment() {
        let p = Inspector::<Writable>::new();
        assert!(p.is_recomputed());
        assert!(p.is_writable());
        assert!(!p.is_resettable());
        assert!(p.is_injectable());
    }

    #[test]
    fn required_supports_assignment_and_injection() {
        let p = Inspector::<Required>::new();
        assert!(p.is_writable());
        assert!(!p.is_resettable());
        assert!(p.is_injectable());
    }

    #[test]
    fn mutable_supports_assignment_and_reset() {
        let p = Inspector::<Mutable>::new();
        assert!(p.is_recomputed());
        assert!(p.is_writable());
        assert!(p.is_resettable());
        assert!(p.is_injectable());
    }

    #[test]
    fn key_accepts_only_the_first_assignment() {
        let p = Inspector::<Key>::new();
        assert!(!p.is_writable());
        assert!(!p.is_resettable());
        assert!(p.is_injectable());
    }

    #[test]
    fn lazy_caches_for_good() {
        let p = Inspector::<Lazy>::new();
        assert!(p.is_cached());
        assert!(p.is_read_only());
    }

    #[test]
    fn cached_caches_until_reset() {
        let p = Inspector::<Cached>::new();
        assert!(p.is_cached());
        assert!(!p.is_writable());
        assert!(p.is_resettable());
    }

    #[test]
    fn probe_reports_its_type_name() {
        assert_eq!(Probe::<Lazy>::type_name(), "Probe");
    }
}
