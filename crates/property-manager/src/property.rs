//! Computed properties.
//!
//! A [`Property`] binds a compute function to a name and a
//! [`PropertyKind`]. It is declared once per owning type (in
//! [`PropertyManager::PROPERTIES`]) and shared by every instance; all
//! per-instance state lives in the owner's [`PropertyStore`].
//!
//! [`PropertyStore`]: crate::store::PropertyStore
//!
//! ## Read / Write / Reset
//!
//! - **get**: when the policy is writable, cached or key, an assigned or
//!   cached value is returned as-is. Otherwise an environment variable
//!   override is consulted (if configured, and returned lossily converted
//!   to UTF-8 when set), then the compute function runs.
//!   Cached properties store the computed result.
//! - **set**: writable properties store the value unconditionally. Key
//!   properties accept a value only while they have none. Everything else
//!   fails with [`PropertyError::ReadOnly`].
//! - **reset**: resettable properties drop their stored value so the next
//!   read recomputes. Everything else fails with [`PropertyError::ReadOnly`].

use std::fmt;

use tracing::trace;

use crate::error::{PropertyError, Result};
use crate::kind::PropertyKind;
use crate::manager::PropertyManager;
use crate::notes;
use crate::policy::Policy;
use crate::value::Value;

/// The function that computes a property's value from its owner.
pub type ComputeFn<O> = fn(&O) -> Result<Value>;

/// Compute function for properties without a meaningful default, such as
/// required properties that are always supplied at construction.
pub fn no_default<O>(_owner: &O) -> Result<Value> {
    Ok(Value::Null)
}

/// Declare a property of the given kind, named after its compute function.
///
/// ```
/// use property_manager::{property, PropertyManager, PropertyStore, Property, Result, Value, LAZY};
///
/// #[derive(Debug, Default)]
/// struct Circle {
///     store: PropertyStore,
/// }
///
/// impl Circle {
///     fn area(&self) -> Result<Value> {
///         Ok(Value::Float(3.0))
///     }
/// }
///
/// impl PropertyManager for Circle {
///     const PROPERTIES: &'static [Property<Self>] = &[property!(LAZY, Self::area)];
///
///     fn store(&self) -> &PropertyStore {
///         &self.store
///     }
/// }
///
/// assert_eq!(Circle::PROPERTIES[0].name(), "area");
/// ```
#[macro_export]
macro_rules! property {
    ($kind:expr, $owner:ident :: $compute:ident) => {
        $kind.declare(stringify!($compute), $owner::$compute)
    };
    ($kind:expr, $owner:ident :: $compute:ident, doc = $doc:expr) => {
        $kind
            .declare(stringify!($compute), $owner::$compute)
            .with_doc($doc)
    };
}

/// A computed property declared on owner type `O`.
pub struct Property<O> {
    name: &'static str,
    compute: ComputeFn<O>,
    kind: PropertyKind,
    doc: Option<&'static str>,
}

impl<O> Property<O> {
    pub const fn new(name: &'static str, compute: ComputeFn<O>, kind: PropertyKind) -> Self {
        Self {
            name,
            compute,
            kind,
            doc: None,
        }
    }

    /// Declare a property from parts that may be missing.
    ///
    /// Fails with [`PropertyError::InvalidDeclaration`] when there is no
    /// compute function or the name isn't a valid identifier.
    pub fn try_new(
        name: &'static str,
        compute: Option<ComputeFn<O>>,
        kind: PropertyKind,
    ) -> Result<Self> {
        let Some(compute) = compute else {
            return Err(PropertyError::InvalidDeclaration(format!(
                "Invalid compute value for property '{}'! (expected a function, got None instead)",
                name
            )));
        };
        let property = Self::new(name, compute, kind);
        property.validate()?;
        Ok(property)
    }

    /// Attach documentation text.
    pub const fn with_doc(mut self, doc: &'static str) -> Self {
        self.doc = Some(doc);
        self
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn kind(&self) -> PropertyKind {
        self.kind
    }

    pub const fn policy(&self) -> Policy {
        self.kind.policy()
    }

    /// The documentation text as written, without usage notes.
    pub const fn doc(&self) -> Option<&'static str> {
        self.doc
    }

    /// The documentation text, with usage notes appended when they are
    /// enabled in the [settings](crate::config::settings).
    pub fn documentation(&self) -> Option<String> {
        self.documentation_with(crate::config::settings().usage_notes)
    }

    /// The documentation text, with usage notes appended when
    /// `usage_notes` is set and the policy doesn't opt out.
    ///
    /// Properties without documentation don't get notes either.
    pub fn documentation_with(&self, usage_notes: bool) -> Option<String> {
        let doc = self.doc?;
        if !usage_notes || !self.policy().usage_notes || doc.trim().is_empty() {
            return Some(doc.to_string());
        }
        Some(notes::inject_usage_notes(
            doc,
            &notes::compose_usage_notes(self.name, &self.kind),
        ))
    }

    /// Check that the property can be bound on an owner type.
    pub fn validate(&self) -> Result<()> {
        if !is_identifier(self.name) {
            return Err(PropertyError::InvalidDeclaration(format!(
                "Invalid property name '{}'! (expected an identifier)",
                self.name
            )));
        }
        Ok(())
    }
}

impl<O: PropertyManager> Property<O> {
    /// Get the assigned, cached, environment or computed value.
    pub fn get(&self, owner: &O) -> Result<Value> {
        let dotted = DottedName::new::<O>(self.name);
        let policy = self.policy();

        if policy.uses_store() {
            if let Some(value) = owner.store().lookup(self.name) {
                trace!(property = %dotted, value = %value, "Reporting assigned or cached value");
                return Ok(value);
            }
        }

        if let Some(variable) = policy.environment_variable {
            if let Some(raw) = std::env::var_os(variable) {
                // Non-UTF-8 bytes are replaced rather than treated as unset.
                let raw = raw.to_string_lossy().into_owned();
                trace!(property = %dotted, variable, value = %raw, "Reporting value from environment");
                return Ok(Value::Str(raw));
            }
        }

        let value = (self.compute)(owner)?;
        trace!(property = %dotted, value = %value, "Reporting computed value");

        if policy.cached {
            trace!(property = %dotted, "Caching computed value");
            owner.store().insert(self.name, value.clone());
        }

        Ok(value)
    }

    /// Override the computed value.
    pub fn set(&self, owner: &mut O, value: Value) -> Result<()> {
        let dotted = DottedName::new::<O>(self.name);
        let policy = self.policy();

        if policy.writable {
            trace!(property = %dotted, value = %value, "Overriding computed value");
            owner.store().insert(self.name, value);
            return Ok(());
        }

        let unset = owner
            .store()
            .lookup(self.name)
            .map_or(true, |current| current.is_null());
        if policy.key && unset {
            trace!(property = %dotted, value = %value, "Setting initial value");
            owner.store().insert(self.name, value);
            return Ok(());
        }

        Err(self.read_only())
    }

    /// Clear an assigned or cached value so the next read recomputes.
    pub fn reset(&self, owner: &mut O) -> Result<()> {
        if !self.policy().resettable {
            return Err(self.read_only());
        }
        trace!(
            property = %DottedName::new::<O>(self.name),
            "Clearing assigned or cached value"
        );
        owner.store().remove(self.name);
        Ok(())
    }

    fn read_only(&self) -> PropertyError {
        PropertyError::ReadOnly {
            type_name: O::type_name(),
            name: self.name.to_string(),
        }
    }
}

impl<O> Clone for Property<O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O> Copy for Property<O> {}

impl<O> fmt::Debug for Property<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("kind", &self.kind.name())
            .field("policy", &self.kind.policy())
            .finish_non_exhaustive()
    }
}

/// `Type.name` of a property, formatted only when actually displayed.
pub(crate) struct DottedName {
    type_name: &'static str,
    name: &'static str,
}

impl DottedName {
    pub(crate) fn new<O: PropertyManager>(name: &'static str) -> Self {
        Self {
            type_name: O::type_name(),
            name,
        }
    }
}

impl fmt::Display for DottedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.type_name, self.name)
    }
}

pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
