//! Query parameters for list and fetch operations.

use std::collections::{BTreeMap, HashMap};

/// Pagination, filtering, sorting and include expansion for list calls.
///
/// Sent as `page=<n>`, `filter[<field>]=<value>`, `sort=<key>` and
/// `include=<a>,<b>`. An absent sort and an empty include list are left out
/// of the query. Include names are passed through unchecked.
///
/// # Example
///
/// ```rust
/// use pterodactyl_api::ListQuery;
///
/// let query = ListQuery::new()
///     .page(2)
///     .filter("name", "lobby")
///     .sort("-id")
///     .include("allocations")
///     .include("user");
///
/// let params = query.to_params();
/// assert_eq!(params["page"], "2");
/// assert_eq!(params["filter[name]"], "lobby");
/// assert_eq!(params["include"], "allocations,user");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    page: u32,
    filters: BTreeMap<String, String>,
    sort: Option<String>,
    includes: Vec<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            filters: BTreeMap::new(),
            sort: None,
            includes: Vec::new(),
        }
    }
}

impl ListQuery {
    /// Creates a query for the first page with no filters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the one-based page number; zero is raised to one.
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Adds a `filter[<field>]` parameter, replacing any earlier one.
    #[must_use]
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(field.into(), value.into());
        self
    }

    /// Sets the sort key (prefix with `-` for descending).
    #[must_use]
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Adds a relation to embed; duplicates are ignored.
    #[must_use]
    pub fn include(mut self, relation: impl Into<String>) -> Self {
        let relation = relation.into();
        if !relation.is_empty() && !self.includes.contains(&relation) {
            self.includes.push(relation);
        }
        self
    }

    /// Returns the page number.
    #[must_use]
    pub const fn page_number(&self) -> u32 {
        self.page
    }

    /// Returns the filters.
    #[must_use]
    pub const fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    /// Returns the included relations, in insertion order.
    #[must_use]
    pub fn includes(&self) -> &[String] {
        &self.includes
    }

    /// Builds the query parameter map.
    #[must_use]
    pub fn to_params(&self) -> HashMap<String, String> {
        let mut params = HashMap::new();
        params.insert("page".to_string(), self.page.to_string());
        for (field, value) in &self.filters {
            params.insert(format!("filter[{field}]"), value.clone());
        }
        if let Some(sort) = self.sort.as_ref().filter(|s| !s.is_empty()) {
            params.insert("sort".to_string(), sort.clone());
        }
        params.extend(include_params(&self.includes));
        params
    }
}

/// Builds the `include` parameter for a single fetch.
pub(crate) fn include_params<S: AsRef<str>>(includes: &[S]) -> HashMap<String, String> {
    let mut seen: Vec<&str> = Vec::new();
    for relation in includes {
        let relation: &str = relation.as_ref();
        if !relation.is_empty() && !seen.contains(&relation) {
            seen.push(relation);
        }
    }

    let mut params = HashMap::new();
    if !seen.is_empty() {
        params.insert("include".to_string(), seen.join(","));
    }
    params
}
