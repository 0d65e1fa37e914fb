//! Field resolution for record types.
//!
//! Each record type exposes a [`Schema`]: an ordered table from the field's
//! internal identifier (its Rust name) to a getter and the field's external
//! (serialization) name. The table is built once per type, usually by
//! `#[derive(Record)]`, and the engine only performs lookups in it.
//!
//! # Examples
//!
//! A hand-written schema, equivalent to what the derive produces:
//!
//! ```rust
//! use std::sync::LazyLock;
//! use fieldrules::record::{Record, Schema, to_field_value};
//!
//! struct User {
//!     user_name: String,
//!     nickname: String,
//! }
//!
//! impl Record for User {
//!     fn schema() -> &'static Schema<Self> {
//!         static SCHEMA: LazyLock<Schema<User>> = LazyLock::new(|| {
//!             Schema::builder()
//!                 .tagged("user_name", "name,omitempty", |u: &User| to_field_value(&u.user_name))
//!                 .field("nickname", |u: &User| to_field_value(&u.nickname))
//!                 .build()
//!         });
//!         &SCHEMA
//!     }
//! }
//!
//! let schema = User::schema();
//! assert_eq!(schema.external_name("user_name"), Some("name"));
//! assert_eq!(schema.error_name("nickname"), "nickname");
//! assert_eq!(schema.external_name("missing"), None);
//! ```

use std::any::type_name;
use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// A type whose fields can be looked up by internal identifier.
///
/// Derive it with `#[derive(Record)]` or implement it by hand with a
/// [`SchemaBuilder`].
pub trait Record: Sized + 'static {
    /// The field table for this type.
    fn schema() -> &'static Schema<Self>;
}

/// Reads one field of `T` as an opaque value.
pub type Getter<T> = fn(&T) -> Value;

/// Converts a field into the value handed to predicates.
///
/// Values `serde_json` cannot represent (maps with non-string keys, for
/// instance) become `Value::Null`, with a `debug` event naming the failure.
pub fn to_field_value<V>(value: &V) -> Value
where
    V: Serialize + ?Sized,
{
    serde_json::to_value(value).unwrap_or_else(|error| {
        debug!(
            %error,
            value_type = type_name::<V>(),
            "field value is not representable, using null"
        );
        Value::Null
    })
}

/// Extracts the external name from a serialization tag.
///
/// Only the part before the first `,` counts, so modifiers such as
/// `omitempty` are dropped. An empty name or `-` (the "ignore" marker) has no
/// external name.
///
/// ```rust
/// use fieldrules::record::external_name_from_tag;
///
/// assert_eq!(external_name_from_tag("email,omitempty"), Some("email"));
/// assert_eq!(external_name_from_tag("-"), None);
/// assert_eq!(external_name_from_tag(",omitempty"), None);
/// ```
pub fn external_name_from_tag(tag: &str) -> Option<&str> {
    let name = tag.split_once(',').map_or(tag, |(head, _)| head).trim();
    if name.is_empty() || name == "-" {
        None
    } else {
        Some(name)
    }
}

// ============================================================================
// FIELD ACCESSOR
// ============================================================================

/// Getter plus external-name metadata for one field.
pub struct FieldAccessor<T> {
    getter: Getter<T>,
    external_name: Option<String>,
}

impl<T> FieldAccessor<T> {
    /// Reads the field from `record`.
    pub fn value(&self, record: &T) -> Value {
        (self.getter)(record)
    }

    /// The declared external name, if any.
    pub fn external_name(&self) -> Option<&str> {
        self.external_name.as_deref()
    }
}

impl<T> fmt::Debug for FieldAccessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldAccessor")
            .field("getter", &"<function>")
            .field("external_name", &self.external_name)
            .finish()
    }
}

// ============================================================================
// SCHEMA
// ============================================================================

/// Ordered field table of a record type.
pub struct Schema<T> {
    fields: IndexMap<String, FieldAccessor<T>>,
}

impl<T> Schema<T> {
    /// Starts an empty schema.
    pub fn builder() -> SchemaBuilder<T> {
        SchemaBuilder::new()
    }

    /// Reads the field named `ident` from `record`.
    ///
    /// Returns `None` when the type has no such field.
    pub fn resolve_value(&self, record: &T, ident: &str) -> Option<Value> {
        self.fields.get(ident).map(|accessor| accessor.value(record))
    }

    /// The external name declared for `ident`, if the field exists and has one.
    pub fn external_name(&self, ident: &str) -> Option<&str> {
        self.fields
            .get(ident)
            .and_then(FieldAccessor::external_name)
    }

    /// The name to report for `ident`: its external name, else `ident` itself.
    pub fn error_name<'a>(&'a self, ident: &'a str) -> &'a str {
        self.external_name(ident).unwrap_or(ident)
    }

    /// Accessor for `ident`.
    pub fn field(&self, ident: &str) -> Option<&FieldAccessor<T>> {
        self.fields.get(ident)
    }

    /// Returns `true` if the type has a field named `ident`.
    pub fn contains(&self, ident: &str) -> bool {
        self.fields.contains_key(ident)
    }

    /// Internal identifiers in declaration order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.fields
                    .iter()
                    .map(|(ident, accessor)| (ident, accessor.external_name())),
            )
            .finish()
    }
}

/// Builds a [`Schema`] field by field.
pub struct SchemaBuilder<T> {
    fields: IndexMap<String, FieldAccessor<T>>,
}

impl<T> SchemaBuilder<T> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
        }
    }

    /// Adds a field without an external name.
    ///
    /// Adding an identifier twice keeps the last definition.
    pub fn field(mut self, ident: impl Into<String>, getter: Getter<T>) -> Self {
        self.fields.insert(
            ident.into(),
            FieldAccessor {
                getter,
                external_name: None,
            },
        );
        self
    }

    /// Adds a field whose external name comes from a serialization tag.
    ///
    /// See [`external_name_from_tag`] for how the tag is read.
    pub fn tagged(mut self, ident: impl Into<String>, tag: &str, getter: Getter<T>) -> Self {
        self.fields.insert(
            ident.into(),
            FieldAccessor {
                getter,
                external_name: external_name_from_tag(tag).map(str::to_owned),
            },
        );
        self
    }

    /// Finishes the schema.
    pub fn build(self) -> Schema<T> {
        Schema {
            fields: self.fields,
        }
    }
}

impl<T> Default for SchemaBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
