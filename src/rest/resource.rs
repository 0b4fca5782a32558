//! The resource base shared by every typed panel entity.
//!
//! Every resource wraps a [`ResourceCore`] holding the shared transport, the
//! API surface it was parsed under, the full hydrated field mapping and the
//! optional `meta` side channel. On top of that each type carries a typed
//! attribute record generated by `panel_resource!`, which the resource
//! dereferences to.
//!
//! # Implementing a Resource
//!
//! ```rust,ignore
//! panel_resource! {
//!     /// A panel location.
//!     Location => LocationAttributes {
//!         /// Location ID.
//!         id: u64,
//!         /// Short code.
//!         short: String,
//!     }
//! }
//!
//! let location = Location::from_payload(&transport, surface, &payload)?;
//! assert_eq!(location.id, Some(1));               // typed attribute via Deref
//! assert!(location.fields().contains_key("id")); // full mapping
//! ```
//!
//! # Re-hydration
//!
//! Mutating actions receive the updated resource from the panel and call
//! [`PanelResource::rehydrate`], which rebuilds the whole instance and swaps
//! it in only once the new payload has hydrated without error.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::clients::{HttpRequest, SharedTransport};
use crate::config::ApiSurface;
use crate::rest::resources::{Resource, ResourceKind};
use crate::rest::response::{fields_to_json, parse, parse_fields, Fields, ParsedValue};
use crate::rest::validation::{self, FieldRules};
use crate::rest::ResourceError;

/// State common to every resource.
#[derive(Clone)]
pub struct ResourceCore {
    transport: SharedTransport,
    surface: ApiSurface,
    fields: Fields,
    meta: Option<ParsedValue>,
}

impl fmt::Debug for ResourceCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceCore")
            .field("surface", &self.surface)
            .field("fields", &self.fields)
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

impl ResourceCore {
    /// Hydrates a core from a resource payload.
    ///
    /// Every key of `attributes` is parsed and stored; `meta` is parsed and
    /// stored separately. A payload without `attributes` hydrates to an
    /// empty mapping.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidPayload`] if the payload or its
    /// `attributes` is not an object, or any error raised while parsing
    /// nested values.
    pub fn hydrate(
        transport: &SharedTransport,
        surface: ApiSurface,
        payload: &Value,
    ) -> Result<Self, ResourceError> {
        let map = payload
            .as_object()
            .ok_or_else(|| ResourceError::invalid_payload("resource payload is not an object"))?;

        let fields = match map.get("attributes") {
            None => Fields::new(),
            Some(Value::Object(attributes)) => parse_fields(transport, surface, attributes)?,
            Some(_) => {
                return Err(ResourceError::invalid_payload(
                    "resource 'attributes' is not an object",
                ))
            }
        };

        let meta = map
            .get("meta")
            .map(|meta| parse(transport, surface, meta))
            .transpose()?;

        Ok(Self {
            transport: Arc::clone(transport),
            surface,
            fields,
            meta,
        })
    }

    /// Returns the transport this resource sends requests through.
    #[must_use]
    pub const fn transport(&self) -> &SharedTransport {
        &self.transport
    }

    /// Returns the API surface this resource is bound to.
    #[must_use]
    pub const fn surface(&self) -> ApiSurface {
        self.surface
    }

    /// Returns the full hydrated field mapping.
    #[must_use]
    pub const fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Returns the hydrated field `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&ParsedValue> {
        self.fields.get(name)
    }

    /// Returns the parsed `meta` object, if the payload carried one.
    #[must_use]
    pub const fn meta(&self) -> Option<&ParsedValue> {
        self.meta.as_ref()
    }

    /// Returns the included relation `name` from `relationships`.
    #[must_use]
    pub fn relationship(&self, name: &str) -> Option<&ParsedValue> {
        self.field("relationships").and_then(|r| r.get(name))
    }

    /// Fails unless this resource is bound to `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::IncorrectSurface`] on mismatch.
    pub fn require_surface(&self, expected: ApiSurface) -> Result<(), ResourceError> {
        if self.surface == expected {
            Ok(())
        } else {
            Err(ResourceError::IncorrectSurface {
                expected,
                actual: self.surface,
            })
        }
    }

    /// Checks `input` against `rules`; see [`validation::validate_fields`].
    ///
    /// # Errors
    ///
    /// Returns the first field error found.
    #[allow(clippy::unused_self)]
    pub fn validate_fields(&self, input: &Value, rules: &[FieldRules]) -> Result<(), ResourceError> {
        validation::validate_fields(input, rules)
    }

    /// Sends `request` through this resource's transport.
    pub(crate) async fn send(&self, request: HttpRequest) -> Result<Value, ResourceError> {
        Ok(self.transport.request(request).await?)
    }

    fn to_json(&self, kind: ResourceKind) -> Value {
        let mut map = serde_json::Map::new();
        map.insert("object".to_string(), Value::String(kind.as_str().to_string()));
        map.insert("attributes".to_string(), fields_to_json(&self.fields));
        if let Some(meta) = &self.meta {
            map.insert("meta".to_string(), meta.to_json());
        }
        Value::Object(map)
    }
}

/// Conversion from a hydrated field into a typed attribute.
///
/// `null` never reaches [`FieldValue::from_parsed`]; it reads as an absent
/// attribute.
pub trait FieldValue: Sized {
    /// Type name reported in [`ResourceError::FieldTypeMismatch`].
    const EXPECTED: &'static str;

    /// Converts `value`, or returns `None` if it has the wrong type.
    fn from_parsed(value: &ParsedValue) -> Option<Self>;
}

/// Reads attribute `name` from `fields` as a `T`.
///
/// # Errors
///
/// Returns [`ResourceError::FieldTypeMismatch`] if the field is present,
/// non-null and not convertible.
pub fn extract<T: FieldValue>(fields: &Fields, name: &str) -> Result<Option<T>, ResourceError> {
    match fields.get(name) {
        None | Some(ParsedValue::Null) => Ok(None),
        Some(value) => T::from_parsed(value)
            .map(Some)
            .ok_or_else(|| ResourceError::FieldTypeMismatch {
                field: name.to_string(),
                expected: T::EXPECTED,
            }),
    }
}

impl FieldValue for u64 {
    const EXPECTED: &'static str = "number";

    fn from_parsed(value: &ParsedValue) -> Option<Self> {
        value.as_u64()
    }
}

impl FieldValue for i64 {
    const EXPECTED: &'static str = "number";

    fn from_parsed(value: &ParsedValue) -> Option<Self> {
        value.as_i64()
    }
}

impl FieldValue for f64 {
    const EXPECTED: &'static str = "number";

    fn from_parsed(value: &ParsedValue) -> Option<Self> {
        value.as_f64()
    }
}

// Older panels serialise some flags as 0/1.
impl FieldValue for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_parsed(value: &ParsedValue) -> Option<Self> {
        match value {
            ParsedValue::Bool(b) => Some(*b),
            ParsedValue::Number(n) => match n.as_u64() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            },
            _ => None,
        }
    }
}

impl FieldValue for String {
    const EXPECTED: &'static str = "string";

    fn from_parsed(value: &ParsedValue) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FieldValue for DateTime<Utc> {
    const EXPECTED: &'static str = "datetime";

    fn from_parsed(value: &ParsedValue) -> Option<Self> {
        DateTime::parse_from_rfc3339(value.as_str()?)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

impl FieldValue for Fields {
    const EXPECTED: &'static str = "object";

    fn from_parsed(value: &ParsedValue) -> Option<Self> {
        value.as_object().cloned()
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    const EXPECTED: &'static str = "array";

    fn from_parsed(value: &ParsedValue) -> Option<Self> {
        value.as_array()?.iter().map(T::from_parsed).collect()
    }
}

impl FieldValue for ParsedValue {
    const EXPECTED: &'static str = "any";

    fn from_parsed(value: &ParsedValue) -> Option<Self> {
        Some(value.clone())
    }
}

/// Behaviour shared by every typed resource.
pub trait PanelResource: Clone + fmt::Debug + Send + Sync + Sized + 'static {
    /// The typed attribute record.
    type Attributes;

    /// The discriminator this type is registered under.
    const KIND: ResourceKind;

    /// Builds the resource from a hydrated core.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::FieldTypeMismatch`] if a typed attribute
    /// holds a value of the wrong type.
    fn from_core(core: ResourceCore) -> Result<Self, ResourceError>;

    /// Returns the shared resource state.
    fn core(&self) -> &ResourceCore;

    /// Returns the typed attribute record.
    fn attributes(&self) -> &Self::Attributes;

    /// Borrows `resource` as this type, if it is one.
    fn from_resource_ref(resource: &Resource) -> Option<&Self>;

    /// Unwraps `resource` as this type, giving it back on mismatch.
    ///
    /// # Errors
    ///
    /// Returns the original resource if it is of another type.
    fn from_resource(resource: Resource) -> Result<Self, Resource>;

    /// Wraps this resource in the registry enum.
    fn into_resource(self) -> Resource;

    /// Builds the resource from a raw payload.
    ///
    /// An `object` tag, when present, must name this type.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidPayload`] on a tag mismatch, or any
    /// hydration error.
    fn from_payload(
        transport: &SharedTransport,
        surface: ApiSurface,
        payload: &Value,
    ) -> Result<Self, ResourceError> {
        match payload.get("object") {
            None => {}
            Some(Value::String(tag)) if tag == Self::KIND.as_str() => {}
            Some(other) => {
                return Err(ResourceError::invalid_payload(format!(
                    "expected object '{}', got {other}",
                    Self::KIND.as_str()
                )))
            }
        }
        Self::from_core(ResourceCore::hydrate(transport, surface, payload)?)
    }

    /// Returns the API surface this resource is bound to.
    fn surface(&self) -> ApiSurface {
        self.core().surface()
    }

    /// Returns the full hydrated field mapping.
    fn fields(&self) -> &Fields {
        self.core().fields()
    }

    /// Returns the parsed `meta` object, if any.
    fn meta(&self) -> Option<&ParsedValue> {
        self.core().meta()
    }

    /// Converts the resource back into the panel's wire shape.
    fn to_json(&self) -> Value {
        self.core().to_json(Self::KIND)
    }

    /// Replaces this instance with the resource in `payload`.
    ///
    /// Returns `false` and leaves `self` untouched when `payload` carries no
    /// `attributes` object. Fields, typed attributes and `meta` are replaced
    /// together; on error the previous state is kept.
    ///
    /// # Errors
    ///
    /// Returns any error raised by [`PanelResource::from_payload`].
    fn rehydrate(&mut self, payload: &Value) -> Result<bool, ResourceError> {
        if !payload.get("attributes").is_some_and(Value::is_object) {
            return Ok(false);
        }
        let fresh = Self::from_payload(self.core().transport(), self.surface(), payload)?;
        tracing::debug!(object = Self::KIND.as_str(), "Re-hydrated resource from response");
        *self = fresh;
        Ok(true)
    }
}

/// Declares a resource type, its typed attribute record and its registry
/// glue.
///
/// Attribute keys default to the field name; `name as "key"` maps a field
/// to a wire key that is not a valid identifier.
macro_rules! panel_resource {
    (@key $field:ident) => {
        stringify!($field)
    };
    (@key $field:ident $key:literal) => {
        $key
    };
    (
        $(#[$meta:meta])*
        $name:ident => $attrs:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident $(as $key:literal)? : $ty:ty,
            )*
        }
    ) => {
        #[doc = concat!("Typed attributes of [`", stringify!($name), "`].")]
        #[derive(Debug, Clone, Default)]
        #[non_exhaustive]
        pub struct $attrs {
            $(
                $(#[$field_meta])*
                pub $field: Option<$ty>,
            )*
        }

        impl $attrs {
            /// Wire keys covered by this record.
            pub const KNOWN_FIELDS: &'static [&'static str] =
                &[$(panel_resource!(@key $field $($key)?)),*];

            fn from_fields(
                fields: &$crate::rest::Fields,
            ) -> Result<Self, $crate::rest::ResourceError> {
                Ok(Self {
                    $(
                        $field: $crate::rest::resource::extract(
                            fields,
                            panel_resource!(@key $field $($key)?),
                        )?,
                    )*
                })
            }
        }

        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            core: $crate::rest::ResourceCore,
            attributes: $attrs,
        }

        impl $name {
            /// Returns hydrated fields not covered by the typed record.
            #[must_use]
            pub fn extra_fields(&self) -> $crate::rest::Fields {
                self.core
                    .fields()
                    .iter()
                    .filter(|(key, _)| !$attrs::KNOWN_FIELDS.contains(&key.as_str()))
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect()
            }
        }

        impl $crate::rest::PanelResource for $name {
            type Attributes = $attrs;

            const KIND: $crate::rest::resources::ResourceKind =
                $crate::rest::resources::ResourceKind::$name;

            fn from_core(
                core: $crate::rest::ResourceCore,
            ) -> Result<Self, $crate::rest::ResourceError> {
                let attributes = $attrs::from_fields(core.fields())?;
                Ok(Self { core, attributes })
            }

            fn core(&self) -> &$crate::rest::ResourceCore {
                &self.core
            }

            fn attributes(&self) -> &$attrs {
                &self.attributes
            }

            fn from_resource_ref(
                resource: &$crate::rest::resources::Resource,
            ) -> Option<&Self> {
                match resource {
                    $crate::rest::resources::Resource::$name(inner) => Some(inner),
                    _ => None,
                }
            }

            fn from_resource(
                resource: $crate::rest::resources::Resource,
            ) -> Result<Self, $crate::rest::resources::Resource> {
                match resource {
                    $crate::rest::resources::Resource::$name(inner) => Ok(inner),
                    other => Err(other),
                }
            }

            fn into_resource(self) -> $crate::rest::resources::Resource {
                $crate::rest::resources::Resource::$name(self)
            }
        }

        impl ::std::ops::Deref for $name {
            type Target = $attrs;

            fn deref(&self) -> &Self::Target {
                &self.attributes
            }
        }

        impl From<$name> for $crate::rest::resources::Resource {
            fn from(resource: $name) -> Self {
                $crate::rest::resources::Resource::$name(resource)
            }
        }
    };
}

pub(crate) use panel_resource;
