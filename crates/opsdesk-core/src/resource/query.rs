//! Query state: page, page size, and filters.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, InvalidInputError};

use super::descriptor::ResourceDescriptor;

/// Value kind a filter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Free text.
    Text,
    /// Integer.
    Number,
    /// One of a fixed set of tokens.
    Choice(&'static [&'static str]),
    Bool,
}

/// Where a filter is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterScope {
    /// Sent to the server as a query parameter.
    Server,
    /// Evaluated in memory against the listed record fields.
    ///
    /// Only correct when the fetched page holds every candidate record.
    Local(&'static [&'static str]),
}

/// A recognized filter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec {
    pub key: &'static str,
    pub kind: FilterKind,
    pub scope: FilterScope,
}

impl FilterSpec {
    pub const fn server(key: &'static str, kind: FilterKind) -> Self {
        Self {
            key,
            kind,
            scope: FilterScope::Server,
        }
    }

    pub const fn local(
        key: &'static str,
        kind: FilterKind,
        fields: &'static [&'static str],
    ) -> Self {
        Self {
            key,
            kind,
            scope: FilterScope::Local(fields),
        }
    }
}

/// A filter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Number(i64),
    Bool(bool),
}

impl FilterValue {
    /// Parse raw input according to `kind`.
    pub fn parse(spec: &FilterSpec, raw: &str) -> Result<Self, Error> {
        let raw = raw.trim();
        let invalid = |expected: String| InvalidInputError::FilterValue {
            key: spec.key.to_string(),
            value: raw.to_string(),
            expected,
        };

        match spec.kind {
            FilterKind::Text => Ok(FilterValue::Text(raw.to_string())),
            FilterKind::Choice(_) => Ok(FilterValue::Text(raw.to_string())),
            FilterKind::Number => raw
                .parse::<i64>()
                .map(FilterValue::Number)
                .map_err(|_| invalid("an integer".to_string()).into()),
            FilterKind::Bool => match raw.to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(FilterValue::Bool(true)),
                "false" | "0" => Ok(FilterValue::Bool(false)),
                _ => Err(invalid("true or false".to_string()).into()),
            },
        }
    }

    /// The value as it appears in a query string.
    pub fn to_query_value(&self) -> String {
        match self {
            FilterValue::Text(s) => s.clone(),
            FilterValue::Number(n) => n.to_string(),
            FilterValue::Bool(b) => b.to_string(),
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, FilterValue::Text(s) if s.trim().is_empty())
    }

    fn check(&self, spec: &FilterSpec) -> Result<(), Error> {
        let ok = match (spec.kind, self) {
            (FilterKind::Text, FilterValue::Text(_)) => true,
            (FilterKind::Number, FilterValue::Number(_)) => true,
            (FilterKind::Bool, FilterValue::Bool(_)) => true,
            (FilterKind::Choice(tokens), value) => {
                let s = value.to_query_value();
                tokens.contains(&s.as_str())
            }
            _ => false,
        };

        if ok {
            Ok(())
        } else {
            let expected = match spec.kind {
                FilterKind::Text => "text".to_string(),
                FilterKind::Number => "an integer".to_string(),
                FilterKind::Bool => "true or false".to_string(),
                FilterKind::Choice(tokens) => format!("one of {}", tokens.join(", ")),
            };
            Err(InvalidInputError::FilterValue {
                key: spec.key.to_string(),
                value: self.to_query_value(),
                expected,
            }
            .into())
        }
    }

    /// Whether a record field satisfies this filter.
    ///
    /// Text matches case-insensitively by substring; everything else
    /// matches exactly on the field's string form.
    fn matches(&self, kind: FilterKind, field: &Value) -> bool {
        let field = match field {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return false,
        };

        match kind {
            FilterKind::Text => field
                .to_lowercase()
                .contains(&self.to_query_value().to_lowercase()),
            _ => field == self.to_query_value(),
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_value())
    }
}

/// Current page, page size, and filters of one list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    page: u32,
    page_size: u32,
    filters: BTreeMap<&'static str, FilterValue>,
}

impl QueryState {
    /// The default query for a resource: page 1, default size, no filters.
    pub fn new(descriptor: &ResourceDescriptor) -> Self {
        Self {
            page: 1,
            page_size: descriptor.default_page_size.max(1),
            filters: BTreeMap::new(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn filter(&self, key: &str) -> Option<&FilterValue> {
        self.filters.get(key)
    }

    pub fn filters(&self) -> impl Iterator<Item = (&'static str, &FilterValue)> {
        self.filters.iter().map(|(k, v)| (*k, v))
    }

    /// Merge a filter value into the query.
    ///
    /// Unknown keys and values of the wrong kind are rejected. An empty text
    /// value removes the filter. A change moves the query back to page 1.
    /// Returns whether the query changed.
    pub fn set_filter(
        &mut self,
        descriptor: &ResourceDescriptor,
        key: &str,
        value: FilterValue,
    ) -> Result<bool, Error> {
        let spec = descriptor
            .filter(key)
            .ok_or_else(|| InvalidInputError::UnknownFilter {
                resource: descriptor.name,
                key: key.to_string(),
            })?;

        if value.is_empty() {
            return Ok(self.remove_filter(spec.key));
        }

        value.check(spec)?;

        if self.filters.get(spec.key) == Some(&value) {
            return Ok(false);
        }

        self.filters.insert(spec.key, value);
        self.page = 1;
        Ok(true)
    }

    /// Drop one filter. Returns whether it was set.
    pub fn remove_filter(&mut self, key: &str) -> bool {
        let removed = self.filters.remove(key).is_some();
        if removed {
            self.page = 1;
        }
        removed
    }

    /// Reset to the resource's defaults.
    pub fn clear(&mut self, descriptor: &ResourceDescriptor) {
        *self = Self::new(descriptor);
    }

    /// Move to `page` with `page_size`. Both are clamped to at least 1.
    pub fn set_page(&mut self, page: u32, page_size: u32) {
        self.page = page.max(1);
        self.page_size = page_size.max(1);
    }

    /// Query parameters for the list request: paging plus server-side filters.
    pub fn server_params(&self, descriptor: &ResourceDescriptor) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            (
                descriptor.page_size_param.to_string(),
                self.page_size.to_string(),
            ),
        ];

        for (key, value) in &self.filters {
            if let Some(spec) = descriptor.filter(key)
                && spec.scope == FilterScope::Server
            {
                params.push((key.to_string(), value.to_query_value()));
            }
        }

        params
    }

    pub fn has_local_filters(&self, descriptor: &ResourceDescriptor) -> bool {
        self.filters.keys().any(|k| {
            descriptor
                .filter(k)
                .is_some_and(|s| matches!(s.scope, FilterScope::Local(_)))
        })
    }

    /// Whether `record` passes every client-side filter.
    ///
    /// A record that cannot be serialized never matches.
    pub fn matches_local<T: Serialize>(
        &self,
        descriptor: &ResourceDescriptor,
        record: &T,
    ) -> bool {
        if !self.has_local_filters(descriptor) {
            return true;
        }
        let Ok(json) = serde_json::to_value(record) else {
            return false;
        };

        self.filters.iter().all(|(key, value)| {
            let Some(spec) = descriptor.filter(key) else {
                return true;
            };
            let FilterScope::Local(fields) = spec.scope else {
                return true;
            };
            fields
                .iter()
                .any(|f| json.get(*f).is_some_and(|v| value.matches(spec.kind, v)))
        })
    }
}
