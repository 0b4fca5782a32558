//! Response parsing for panel payloads.
//!
//! The panel wraps every response in a generic envelope. [`parse`] walks a
//! decoded JSON value and rebuilds it as a [`ParsedValue`] tree:
//!
//! - primitives and `null` pass through unchanged
//! - arrays become [`ParsedValue::Array`], every element parsed
//! - objects without an `object` key become [`ParsedValue::Object`]
//! - `{"object": "list", "data": [...]}` becomes a [`ResourceList`], with
//!   every other top-level key kept as a named extra
//! - `{"object": "<tag>", "attributes": {...}}` becomes a typed [`Resource`]
//!
//! # Deref Pattern
//!
//! [`ResourceList`] implements `Deref<Target = [ParsedValue]>`, so it reads
//! like the slice of its items:
//!
//! ```rust,ignore
//! let servers = api.servers(&ListQuery::new()).await?;
//!
//! println!("Count: {}", servers.len());
//! for server in servers.resources::<Server>() {
//!     println!("{}", server.name.as_deref().unwrap_or("-"));
//! }
//!
//! if let Some(pagination) = servers.pagination() {
//!     println!("page {} of {}", pagination.current_page, pagination.total_pages);
//! }
//! ```

use std::collections::BTreeMap;
use std::ops::Deref;

use serde_json::{Map, Number, Value};

use crate::clients::{HttpRequest, SharedTransport};
use crate::config::ApiSurface;
use crate::rest::resources::{materialize, Resource, ResourceKind};
use crate::rest::{PanelResource, ResourceError};

/// Discriminator value marking a paginated list envelope.
pub const LIST_OBJECT: &str = "list";

/// A mapping of names to parsed values.
pub type Fields = BTreeMap<String, ParsedValue>;

/// A decoded panel value after resource materialization.
#[derive(Debug, Clone)]
pub enum ParsedValue {
    /// JSON `null`.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number, kept with its original precision.
    Number(Number),
    /// A string.
    String(String),
    /// A plain array without a list envelope.
    Array(Vec<ParsedValue>),
    /// A plain object without an `object` discriminator.
    Object(Fields),
    /// A `list` envelope.
    List(ResourceList),
    /// A typed resource.
    Resource(Box<Resource>),
}

impl ParsedValue {
    /// Returns `true` for [`ParsedValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the boolean, if this is one.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the string slice, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number as `u64`, if it is a non-negative integer.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    /// Returns the number as `i64`, if it is an integer in range.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// Returns the number as `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Returns the elements of a plain array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries of a plain object.
    #[must_use]
    pub const fn as_object(&self) -> Option<&Fields> {
        match self {
            Self::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Returns the list, if this is a `list` envelope.
    #[must_use]
    pub const fn as_list(&self) -> Option<&ResourceList> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Returns the resource, if this is one.
    #[must_use]
    pub fn as_resource(&self) -> Option<&Resource> {
        match self {
            Self::Resource(resource) => Some(resource),
            _ => None,
        }
    }

    /// Returns the resource as the concrete type `T`, if it is one.
    #[must_use]
    pub fn downcast_ref<T: PanelResource>(&self) -> Option<&T> {
        self.as_resource().and_then(Resource::downcast_ref)
    }

    /// Looks up `key` in a plain object.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_object().and_then(|fields| fields.get(key))
    }

    /// Consumes the value and returns the list, if it is one.
    #[must_use]
    pub fn into_list(self) -> Option<ResourceList> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Consumes the value and returns the resource, if it is one.
    #[must_use]
    pub fn into_resource(self) -> Option<Resource> {
        match self {
            Self::Resource(resource) => Some(*resource),
            _ => None,
        }
    }

    /// Converts the value back into the panel's wire shape.
    ///
    /// Resources become `{"object", "attributes"[, "meta"]}` and lists
    /// become `{"object": "list", "data", ...extras}`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::String(s) => Value::String(s.clone()),
            Self::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Object(fields) => fields_to_json(fields),
            Self::List(list) => list.to_json(),
            Self::Resource(resource) => resource.to_json(),
        }
    }
}

impl From<Resource> for ParsedValue {
    fn from(resource: Resource) -> Self {
        Self::Resource(Box::new(resource))
    }
}

pub(crate) fn fields_to_json(fields: &Fields) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect::<Map<String, Value>>(),
    )
}

/// The items of a `list` envelope plus its sibling keys.
///
/// Items keep the order of the payload's `data` array. Every other
/// top-level key except `object` and `data` is parsed and kept as a named
/// extra, which is where the panel puts `meta.pagination`.
#[derive(Debug, Clone, Default)]
pub struct ResourceList {
    items: Vec<ParsedValue>,
    extras: Fields,
}

impl ResourceList {
    /// Creates a list from already parsed items and extras.
    #[must_use]
    pub const fn new(items: Vec<ParsedValue>, extras: Fields) -> Self {
        Self { items, extras }
    }

    /// Returns the items.
    #[must_use]
    pub fn items(&self) -> &[ParsedValue] {
        &self.items
    }

    /// Consumes the list and returns its items.
    #[must_use]
    pub fn into_items(self) -> Vec<ParsedValue> {
        self.items
    }

    /// Returns the extra named `name`.
    #[must_use]
    pub fn extra(&self, name: &str) -> Option<&ParsedValue> {
        self.extras.get(name)
    }

    /// Returns every extra.
    #[must_use]
    pub const fn extras(&self) -> &Fields {
        &self.extras
    }

    /// Returns the `meta` extra.
    #[must_use]
    pub fn meta(&self) -> Option<&ParsedValue> {
        self.extra("meta")
    }

    /// Returns a typed view of `meta.pagination`, if the panel sent one.
    #[must_use]
    pub fn pagination(&self) -> Option<Pagination> {
        self.meta()
            .and_then(|meta| meta.get("pagination"))
            .and_then(ParsedValue::as_object)
            .map(Pagination::from_fields)
    }

    /// Iterates over the items that are resources of type `T`.
    pub fn resources<T: PanelResource>(&self) -> impl Iterator<Item = &T> {
        self.items.iter().filter_map(ParsedValue::downcast_ref::<T>)
    }

    fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("object".to_string(), Value::String(LIST_OBJECT.to_string()));
        map.insert(
            "data".to_string(),
            Value::Array(self.items.iter().map(ParsedValue::to_json).collect()),
        );
        for (key, value) in &self.extras {
            map.insert(key.clone(), value.to_json());
        }
        Value::Object(map)
    }
}

impl Deref for ResourceList {
    type Target = [ParsedValue];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl IntoIterator for ResourceList {
    type Item = ParsedValue;
    type IntoIter = std::vec::IntoIter<ParsedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResourceList {
    type Item = &'a ParsedValue;
    type IntoIter = std::slice::Iter<'a, ParsedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Pagination counters from a list's `meta.pagination`.
///
/// Missing counters read as zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pagination {
    /// Total number of items across all pages.
    pub total: u64,
    /// Number of items on this page.
    pub count: u64,
    /// Page size.
    pub per_page: u64,
    /// One-based index of this page.
    pub current_page: u64,
    /// Number of pages.
    pub total_pages: u64,
}

impl Pagination {
    fn from_fields(fields: &Fields) -> Self {
        let counter = |name: &str| fields.get(name).and_then(ParsedValue::as_u64).unwrap_or(0);
        Self {
            total: counter("total"),
            count: counter("count"),
            per_page: counter("per_page"),
            current_page: counter("current_page"),
            total_pages: counter("total_pages"),
        }
    }

    /// Returns `true` if there is a page after this one.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Returns `true` if there is a page before this one.
    #[must_use]
    pub const fn has_prev_page(&self) -> bool {
        self.current_page > 1
    }
}

/// Parses a decoded payload into a [`ParsedValue`] tree.
///
/// Every resource created along the way is bound to `transport` and
/// `surface`. The payload is only read.
///
/// # Errors
///
/// Returns [`ResourceError::UnknownResource`] when an `object` tag has no
/// registered type, and [`ResourceError::InvalidPayload`] when a list's
/// `data` is not an array or a resource's `attributes` is not an object.
pub fn parse(
    transport: &SharedTransport,
    surface: ApiSurface,
    payload: &Value,
) -> Result<ParsedValue, ResourceError> {
    let map = match payload {
        Value::Null => return Ok(ParsedValue::Null),
        Value::Bool(b) => return Ok(ParsedValue::Bool(*b)),
        Value::Number(n) => return Ok(ParsedValue::Number(n.clone())),
        Value::String(s) => return Ok(ParsedValue::String(s.clone())),
        Value::Array(items) => {
            return items
                .iter()
                .map(|item| parse(transport, surface, item))
                .collect::<Result<Vec<_>, _>>()
                .map(ParsedValue::Array);
        }
        Value::Object(map) => map,
    };

    let Some(tag) = map.get("object") else {
        return parse_fields(transport, surface, map).map(ParsedValue::Object);
    };

    if tag.as_str() == Some(LIST_OBJECT) {
        return parse_list(transport, surface, map).map(ParsedValue::List);
    }

    let tag = tag.as_str().map_or_else(|| tag.to_string(), str::to_string);
    let kind = ResourceKind::from_tag(&tag).ok_or(ResourceError::UnknownResource { object: tag })?;

    tracing::trace!(object = kind.as_str(), %surface, "Materializing resource");
    materialize(kind, transport, surface, payload).map(ParsedValue::from)
}

/// Parses every value of a plain object, keeping every key.
pub(crate) fn parse_fields(
    transport: &SharedTransport,
    surface: ApiSurface,
    map: &Map<String, Value>,
) -> Result<Fields, ResourceError> {
    map.iter()
        .map(|(key, value)| Ok((key.clone(), parse(transport, surface, value)?)))
        .collect()
}

fn parse_list(
    transport: &SharedTransport,
    surface: ApiSurface,
    map: &Map<String, Value>,
) -> Result<ResourceList, ResourceError> {
    let items = match map.get("data") {
        None => Vec::new(),
        Some(Value::Array(data)) => data
            .iter()
            .map(|item| parse(transport, surface, item))
            .collect::<Result<_, _>>()?,
        Some(_) => {
            return Err(ResourceError::invalid_payload(
                "list envelope 'data' is not an array",
            ))
        }
    };

    let extras = map
        .iter()
        .filter(|(key, _)| key.as_str() != "object" && key.as_str() != "data")
        .map(|(key, value)| Ok((key.clone(), parse(transport, surface, value)?)))
        .collect::<Result<Fields, ResourceError>>()?;

    Ok(ResourceList::new(items, extras))
}

/// Sends `request` and parses the response as a `list` envelope.
pub(crate) async fn request_list(
    transport: &SharedTransport,
    surface: ApiSurface,
    request: HttpRequest,
) -> Result<ResourceList, ResourceError> {
    let body = transport.request(request).await?;
    parse(transport, surface, &body)?
        .into_list()
        .ok_or_else(|| ResourceError::invalid_payload("expected a list envelope"))
}

/// Sends `request` and builds a `T` from the response.
pub(crate) async fn request_resource<T: PanelResource>(
    transport: &SharedTransport,
    surface: ApiSurface,
    request: HttpRequest,
) -> Result<T, ResourceError> {
    let body = transport.request(request).await?;
    T::from_payload(transport, surface, &body)
}
