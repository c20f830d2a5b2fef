//! The property manager trait.
//!
//! Types that declare computed properties implement [`PropertyManager`] by
//! listing their properties in [`PropertyManager::PROPERTIES`] and handing
//! out their [`PropertyStore`]. Everything else is provided:
//!
//! - keyword construction with required-property validation
//!   ([`PropertyManager::initialize`], [`PropertyManager::new_with`])
//! - enumeration by policy ([`PropertyManager::find_properties`])
//! - bulk cache invalidation ([`PropertyManager::clear_cached_properties`])
//! - identity through key properties ([`PropertyManager::key`])
//! - a generated representation ([`PropertyManager::repr`])
//!
//! ```
//! use property_manager::{
//!     no_default, property, Property, PropertyManager, PropertyStore, Result, Value, MUTABLE,
//!     REQUIRED,
//! };
//!
//! #[derive(Debug, Default)]
//! struct Example {
//!     store: PropertyStore,
//! }
//!
//! impl Example {
//!     fn optional(&self) -> Result<Value> {
//!         Ok(Value::Int(13))
//!     }
//! }
//!
//! impl PropertyManager for Example {
//!     const PROPERTIES: &'static [Property<Self>] = &[
//!         REQUIRED.declare("important", no_default),
//!         property!(MUTABLE, Self::optional),
//!     ];
//!
//!     fn store(&self) -> &PropertyStore {
//!         &self.store
//!     }
//! }
//!
//! let err = Example::new_with(Vec::<(&str, Value)>::new()).unwrap_err();
//! assert_eq!(err.to_string(), "missing 1 required argument (important)");
//!
//! let example = Example::new_with([("important", 42)]).unwrap();
//! assert_eq!(example.repr().unwrap(), "Example(important=42, optional=13)");
//! ```

use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, trace};

use crate::error::{PropertyError, Result};
use crate::filter::PolicyFilter;
use crate::property::{DottedName, Property};
use crate::store::PropertyStore;
use crate::value::Value;

/// Superclass-style behavior for types with computed properties.
pub trait PropertyManager: Sized + 'static {
    /// Every computed property of the type. Names must be unique.
    const PROPERTIES: &'static [Property<Self>];

    /// The per-instance override store.
    fn store(&self) -> &PropertyStore;

    /// The type name used in error messages and the representation.
    fn type_name() -> &'static str {
        short_type_name::<Self>()
    }

    /// Look up a declared property by name.
    fn property(name: &str) -> Option<&'static Property<Self>> {
        Self::PROPERTIES.iter().find(|p| p.name() == name)
    }

    /// Check every declaration: names must be identifiers and unique.
    fn validate_declarations() -> Result<()> {
        let mut seen = BTreeSet::new();
        for property in Self::PROPERTIES {
            property.validate()?;
            if !seen.insert(property.name()) {
                return Err(PropertyError::InvalidDeclaration(format!(
                    "Duplicate property '{}' declared on '{}'",
                    property.name(),
                    Self::type_name()
                )));
            }
        }
        Ok(())
    }

    /// Construct a default instance and initialize it from keyword arguments.
    fn new_with<I, K, V>(kwargs: I) -> Result<Self>
    where
        Self: Default,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        Self::default().initialize(kwargs)
    }

    /// Apply keyword arguments, then check that required and key properties
    /// resolved to non-null values.
    ///
    /// An unexpected keyword aborts immediately; keywords applied before it
    /// stay applied. Missing properties are reported together in one error.
    fn initialize<I, K, V>(mut self, kwargs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        Self::validate_declarations()?;
        self.set_properties(kwargs)?;

        let missing = self.missing_properties()?;
        if !missing.is_empty() {
            return Err(PropertyError::MissingRequiredArguments(
                missing.into_iter().map(String::from).collect(),
            ));
        }

        debug!(type_name = Self::type_name(), "Initialized property manager");
        Ok(self)
    }

    /// Assign properties from keyword arguments, in order.
    fn set_properties<I, K, V>(&mut self, kwargs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        for (name, value) in kwargs {
            let name = name.as_ref();
            let Some(property) = Self::property(name) else {
                return Err(PropertyError::UnexpectedArgument(name.to_string()));
            };
            property.set(self, value.into())?;
        }
        Ok(())
    }

    /// Read a property by name.
    fn get(&self, name: &str) -> Result<Value> {
        lookup::<Self>(name)?.get(self)
    }

    /// Assign a property by name.
    fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        lookup::<Self>(name)?.set(self, value.into())
    }

    /// Reset a property by name.
    fn reset(&mut self, name: &str) -> Result<()> {
        lookup::<Self>(name)?.reset(self)
    }

    /// Sorted names of the properties whose policies match `filter`.
    fn find_properties(&self, filter: &PolicyFilter) -> Vec<&'static str> {
        let mut names: Vec<_> = Self::PROPERTIES
            .iter()
            .filter(|p| filter.matches(&p.policy()))
            .map(|p| p.name())
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Whether a property exists and its policy matches `filter`.
    fn have_property(&self, name: &str, filter: &PolicyFilter) -> bool {
        Self::property(name).is_some_and(|p| filter.matches(&p.policy()))
    }

    fn required_properties(&self) -> Vec<&'static str> {
        self.find_properties(&PolicyFilter::any().required(true))
    }

    fn key_properties(&self) -> Vec<&'static str> {
        self.find_properties(&PolicyFilter::any().key(true))
    }

    /// `(name, value)` pairs of the key properties, sorted by name.
    fn key_values(&self) -> Result<Vec<(&'static str, Value)>> {
        let mut values = Vec::new();
        for name in self.key_properties() {
            values.push((name, self.get(name)?));
        }
        Ok(values)
    }

    /// The identity of the object, or `None` when it has no key properties.
    fn key(&self) -> Result<Option<PropertyKey>> {
        let values = self.key_values()?;
        if values.is_empty() {
            return Ok(None);
        }
        Ok(Some(PropertyKey(values)))
    }

    /// Required and key properties whose current value is null.
    fn missing_properties(&self) -> Result<Vec<&'static str>> {
        let names: BTreeSet<_> = self
            .required_properties()
            .into_iter()
            .chain(self.key_properties())
            .collect();

        let mut missing = Vec::new();
        for name in names {
            if self.get(name)?.is_null() {
                missing.push(name);
            }
        }
        Ok(missing)
    }

    /// Reset every cached property that allows it. Cached properties that
    /// aren't resettable keep their values.
    fn clear_cached_properties(&mut self) -> Result<()> {
        for name in self.find_properties(&PolicyFilter::any().cached(true).resettable(true)) {
            trace!(property = %DottedName::new::<Self>(name), "Clearing cached property");
            self.reset(name)?;
        }
        Ok(())
    }

    /// Names rendered by [`repr`](PropertyManager::repr): the key properties
    /// when there are any, otherwise every property visible in the
    /// representation.
    fn repr_properties(&self) -> Vec<&'static str> {
        let keys = self.key_properties();
        if !keys.is_empty() {
            return keys;
        }
        self.find_properties(&PolicyFilter::any().repr(true))
    }

    /// Render `TypeName(name=value, ...)` for the given property names.
    ///
    /// Null values are left out unless the property is a key property.
    fn render_properties(&self, names: &[&str]) -> Result<String> {
        let keys = self.key_properties();
        let mut fields = Vec::with_capacity(names.len());
        for name in names {
            let value = self.get(name)?;
            if !value.is_null() || keys.iter().any(|key| key == name) {
                fields.push(format!("{}={}", name, value));
            }
        }
        Ok(format!("{}({})", Self::type_name(), fields.join(", ")))
    }

    /// The generated representation. Fails if any rendered property fails
    /// to read.
    fn repr(&self) -> Result<String> {
        self.render_properties(&self.repr_properties())
    }

    /// Adapter for `{}` formatting of the representation. Never fails; use
    /// [`repr`](PropertyManager::repr) to handle read errors.
    fn display(&self) -> Repr<'_, Self> {
        Repr(self)
    }
}

/// Identity of an owner object built from its key properties.
///
/// Keys compare, order and hash by their `(name, value)` pairs, so owners
/// can be sorted and deduplicated by key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropertyKey(Vec<(&'static str, Value)>);

impl PropertyKey {
    pub fn values(&self) -> &[(&'static str, Value)] {
        &self.0
    }
}

/// Displays an owner's representation. See [`PropertyManager::display`].
///
/// When a property fails to read, the error takes the place of the fields:
/// `TypeName(<unreadable: error>)`.
pub struct Repr<'a, O>(&'a O);

impl<O: PropertyManager> fmt::Display for Repr<'_, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.repr() {
            Ok(rendered) => f.write_str(&rendered),
            Err(err) => write!(f, "{}(<unreadable: {}>)", O::type_name(), err),
        }
    }
}

/// Set or override the stored value of a property, bypassing its policy.
///
/// Meant for custom setters and extensions.
pub fn set_property<O: PropertyManager>(owner: &mut O, name: &'static str, value: Value) {
    trace!(property = %DottedName::new::<O>(name), value = %value, "Setting stored value");
    owner.store().insert(name, value);
}

/// Clear the stored value of a property, bypassing its policy.
pub fn clear_property<O: PropertyManager>(owner: &mut O, name: &'static str) {
    trace!(property = %DottedName::new::<O>(name), "Clearing stored value");
    owner.store().remove(name);
}

/// Format a property's dotted name, e.g. `Example.important`.
pub fn format_property<O: PropertyManager>(name: &'static str) -> String {
    DottedName::new::<O>(name).to_string()
}

fn lookup<O: PropertyManager>(name: &str) -> Result<&'static Property<O>> {
    O::property(name).ok_or_else(|| PropertyError::UnknownProperty {
        type_name: O::type_name(),
        name: name.to_string(),
    })
}

/// Last path segment of a type name, without generic parameters.
fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::{Overrides, CACHED, CUSTOM, KEY, LAZY, MUTABLE, REQUIRED, WRITABLE};
    use crate::property::no_default;

    #[derive(Debug, Default)]
    struct Example {
        store: PropertyStore,
    }

    impl Example {
        fn optional(&self) -> Result<Value> {
            Ok(Value::Int(13))
        }
    }

    impl PropertyManager for Example {
        const PROPERTIES: &'static [Property<Self>] = &[
            crate::property!(MUTABLE, Self::optional),
            REQUIRED.declare("important", no_default),
        ];

        fn store(&self) -> &PropertyStore {
            &self.store
        }
    }

    #[derive(Debug, Default)]
    struct Letters {
        store: PropertyStore,
    }

    fn letter(_: &Letters) -> Result<Value> {
        Ok(Value::from("x"))
    }

    impl PropertyManager for Letters {
        const PROPERTIES: &'static [Property<Self>] = &[
            WRITABLE.declare("b", letter),
            CACHED.declare("a", letter),
            CUSTOM
                .customize(Overrides::new().repr(false))
                .declare("c", letter),
        ];

        fn store(&self) -> &PropertyStore {
            &self.store
        }
    }

    #[test]
    fn construction_without_required_argument_fails() {
        let err = Example::new_with(Vec::<(&str, Value)>::new()).unwrap_err();
        match err {
            PropertyError::MissingRequiredArguments(names) => assert_eq!(names, vec!["important"]),
            other => panic!("Expected MissingRequiredArguments, got {:?}", other),
        }
    }

    #[test]
    fn construction_with_required_argument_succeeds() {
        let example = Example::new_with([("important", 42)]).unwrap();
        assert_eq!(example.repr().unwrap(), "Example(important=42, optional=13)");
        assert_eq!(example.display().to_string(), "Example(important=42, optional=13)");
    }

    #[test]
    fn explicit_null_does_not_satisfy_required() {
        let err = Example::new_with([("important", Value::Null)]).unwrap_err();
        assert!(matches!(err, PropertyError::MissingRequiredArguments(_)));
    }

    #[test]
    fn unexpected_keyword_is_reported_before_missing_arguments() {
        let err = Example::new_with([("bogus", 1)]).unwrap_err();
        assert_eq!(err.to_string(), "got an unexpected keyword argument 'bogus'");
    }

    #[test]
    fn keywords_before_an_unexpected_one_stay_applied() {
        let mut example = Example::default();
        let err = example
            .set_properties([("optional", 1), ("bogus", 2)])
            .unwrap_err();
        assert!(matches!(err, PropertyError::UnexpectedArgument(_)));
        assert_eq!(example.get("optional").unwrap(), Value::Int(1));
    }

    #[test]
    fn find_properties_is_sorted() {
        let letters = Letters::default();
        assert_eq!(letters.find_properties(&PolicyFilter::any()), vec!["a", "b", "c"]);
    }

    #[test]
    fn find_properties_filters_by_flags() {
        let letters = Letters::default();
        assert_eq!(
            letters.find_properties(&PolicyFilter::any().writable(true)),
            vec!["b"]
        );
        assert_eq!(
            letters.find_properties(&PolicyFilter::any().repr(true)),
            vec!["a", "b"]
        );
        assert_eq!(
            letters.find_properties(&PolicyFilter::any().dynamic(true)),
            vec!["c"]
        );
    }

    #[test]
    fn have_property_checks_name_and_flags() {
        let letters = Letters::default();
        assert!(letters.have_property("a", &PolicyFilter::any()));
        assert!(letters.have_property("a", &PolicyFilter::any().cached(true)));
        assert!(!letters.have_property("a", &PolicyFilter::any().writable(true)));
        assert!(!letters.have_property("z", &PolicyFilter::any()));
    }

    #[test]
    fn required_and_missing_properties() {
        let mut example = Example::default();
        assert_eq!(example.required_properties(), vec!["important"]);
        assert_eq!(example.missing_properties().unwrap(), vec!["important"]);

        example.set("important", "yes").unwrap();
        assert!(example.missing_properties().unwrap().is_empty());
    }

    #[test]
    fn repr_omits_hidden_properties() {
        let letters = Letters::default();
        assert_eq!(letters.repr().unwrap(), "Letters(a='x', b='x')");
    }

    #[derive(Debug, Default)]
    struct Broken {
        store: PropertyStore,
    }

    fn failing(_: &Broken) -> Result<Value> {
        Err(PropertyError::compute(std::io::Error::other("sensor offline")))
    }

    impl PropertyManager for Broken {
        const PROPERTIES: &'static [Property<Self>] = &[LAZY.declare("reading", failing)];

        fn store(&self) -> &PropertyStore {
            &self.store
        }
    }

    #[test]
    fn display_reports_read_errors_instead_of_failing() {
        let broken = Broken::default();
        assert!(broken.repr().is_err());
        assert_eq!(
            broken.display().to_string(),
            "Broken(<unreadable: sensor offline>)"
        );
        assert_eq!(format!("{}", broken.display()), "Broken(<unreadable: sensor offline>)");
    }

    #[test]
    fn unknown_names_are_reported() {
        let mut example = Example::default();
        let err = example.reset("nope").unwrap_err();
        assert_eq!(err.to_string(), "'Example' object has no attribute 'nope'");
        assert!(example.get("nope").is_err());
    }

    #[test]
    fn raw_helpers_bypass_policy() {
        let mut letters = Letters::default();
        set_property(&mut letters, "c", Value::Int(9));
        assert_eq!(letters.store().lookup("c"), Some(Value::Int(9)));
        // `c` is a custom property, so reads still recompute
        assert_eq!(letters.get("c").unwrap(), Value::from("x"));

        clear_property(&mut letters, "c");
        assert!(letters.store().is_empty());
    }

    #[test]
    fn format_property_is_dotted() {
        assert_eq!(format_property::<Example>("important"), "Example.important");
    }

    #[test]
    fn duplicate_declarations_are_rejected() {
        #[derive(Debug, Default)]
        struct Twice {
            store: PropertyStore,
        }

        impl PropertyManager for Twice {
            const PROPERTIES: &'static [Property<Self>] = &[
                LAZY.declare("same", no_default),
                WRITABLE.declare("same", no_default),
            ];

            fn store(&self) -> &PropertyStore {
                &self.store
            }
        }

        let err = Twice::new_with(Vec::<(&str, Value)>::new()).unwrap_err();
        assert!(matches!(err, PropertyError::InvalidDeclaration(_)));
        assert_eq!(err.to_string(), "Duplicate property 'same' declared on 'Twice'");
    }

    #[derive(Debug, Default)]
    struct Account {
        store: PropertyStore,
    }

    fn balance(_: &Account) -> Result<Value> {
        Ok(Value::Int(0))
    }

    impl PropertyManager for Account {
        const PROPERTIES: &'static [Property<Self>] = &[
            KEY.declare("number", no_default),
            KEY.declare("bank", no_default),
            WRITABLE.declare("balance", balance),
        ];

        fn store(&self) -> &PropertyStore {
            &self.store
        }
    }

    #[test]
    fn key_properties_are_required() {
        let err = Account::new_with([("number", 1)]).unwrap_err();
        assert_eq!(err.to_string(), "missing 1 required argument (bank)");
    }

    #[test]
    fn key_properties_drive_repr_and_identity() {
        let a = Account::new_with([("number", Value::Int(1)), ("bank", "x".into())]).unwrap();
        let b = Account::new_with([
            ("bank", Value::from("x")),
            ("number", Value::Int(1)),
            ("balance", Value::Int(100)),
        ])
        .unwrap();

        assert_eq!(a.repr().unwrap(), "Account(bank='x', number=1)");
        assert_eq!(a.key().unwrap(), b.key().unwrap());
        assert_eq!(
            a.key_values().unwrap(),
            vec![("bank", Value::from("x")), ("number", Value::Int(1))]
        );
    }

    #[test]
    fn objects_without_keys_have_no_identity() {
        let example = Example::new_with([("important", 1)]).unwrap();
        assert_eq!(example.key().unwrap(), None);
    }

    #[test]
    fn type_name_drops_module_path() {
        assert_eq!(Example::type_name(), "Example");
        assert_eq!(short_type_name::<Vec<String>>(), "Vec");
    }
}
