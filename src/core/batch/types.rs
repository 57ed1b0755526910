//! Batch fetch types

use super::schema::ObjectKind;
use crate::utils::error::{FetchError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One sub-request of a grouped call: an edge (or the object itself) of a parent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRequest {
    /// Parent object id, e.g. a campaign id or `act_<id>`
    pub parent_id: String,
    /// Edge below the parent; empty means the parent object itself
    pub resource_path: String,
    /// Requested fields; empty leaves the choice to the provider
    pub fields: Vec<String>,
    /// Extra query parameters; non-string values are sent JSON-encoded
    pub params: BTreeMap<String, Value>,
}

impl GroupRequest {
    /// Request for the parent object itself
    pub fn object<S: Into<String>>(parent_id: S) -> Self {
        Self::edge(parent_id, "")
    }

    /// Request for an edge below the parent
    pub fn edge<S: Into<String>, P: Into<String>>(parent_id: S, resource_path: P) -> Self {
        Self {
            parent_id: parent_id.into(),
            resource_path: resource_path.into(),
            fields: Vec::new(),
            params: BTreeMap::new(),
        }
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_param<S: Into<String>, V: Into<Value>>(mut self, name: S, value: V) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// `parent_id` or `parent_id/resource_path`
    pub fn relative_path(&self) -> String {
        let path = self.resource_path.trim_matches('/');
        if path.is_empty() {
            self.parent_id.clone()
        } else {
            format!("{}/{}", self.parent_id, path)
        }
    }

    /// Query parameters in wire form: `fields` first, then params by name
    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut query = Vec::with_capacity(self.params.len() + 1);
        if !self.fields.is_empty() {
            query.push(("fields".to_string(), self.fields.join(",")));
        }
        for (name, value) in &self.params {
            let encoded = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            query.push((name.clone(), encoded));
        }
        query
    }

    /// Query parameters resent with every follow-up page; `fields` rides in the cursor
    pub fn follow_up_params(&self) -> Vec<(String, String)> {
        self.query_params()
            .into_iter()
            .filter(|(name, _)| name != "fields")
            .collect()
    }

    /// Relative URL with encoded query string, as used inside a batch body
    pub fn relative_url(&self) -> String {
        let query = self.query_params();
        if query.is_empty() {
            return self.relative_path();
        }
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(query.iter())
            .finish();
        format!("{}?{}", self.relative_path(), encoded)
    }
}

/// One raw page and the link to the next one
#[derive(Debug, Clone, PartialEq)]
pub struct PageCursor {
    pub page: Value,
    /// Present iff more pages exist
    pub next_url: Option<String>,
}

impl PageCursor {
    /// Validate a raw page and extract its `paging.next` link
    pub fn from_page(page: Value) -> Result<Self> {
        let mut next_url = None;

        if let Value::Object(map) = &page {
            if let Some(data) = map.get("data") {
                if !data.is_array() {
                    return Err(FetchError::parse("page `data` is not an array"));
                }
            }

            match map.get("paging") {
                None | Some(Value::Null) => {}
                Some(Value::Object(paging)) => match paging.get("next") {
                    None | Some(Value::Null) => {}
                    Some(Value::String(next)) => next_url = Some(next.clone()),
                    Some(other) => {
                        return Err(FetchError::parse(format!(
                            "`paging.next` is not a string: {}",
                            other
                        )));
                    }
                },
                Some(other) => {
                    return Err(FetchError::parse(format!(
                        "`paging` is not an object: {}",
                        other
                    )));
                }
            }
        }

        Ok(Self { page, next_url })
    }

    pub fn has_next(&self) -> bool {
        self.next_url.is_some()
    }
}

/// Domain object: provider fields coerced to the object's schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedObject {
    pub kind: ObjectKind,
    pub fields: Map<String, Value>,
}

impl ParsedObject {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn id(&self) -> Option<&str> {
        self.fields.get("id").and_then(Value::as_str)
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}

/// Outcome of one sub-request, keyed by its submitted index
#[derive(Debug)]
pub struct BatchEntry {
    /// Position of the request in the submitted slice
    pub index: usize,
    pub request: GroupRequest,
    pub outcome: Result<PageCursor>,
}

/// Entries of one grouped call, in any order
pub type BatchResult = Vec<BatchEntry>;

/// A request that failed after the retry policy
#[derive(Debug)]
pub struct RequestFailure {
    pub request: GroupRequest,
    pub error: FetchError,
    /// Objects parsed from pages fetched before the failure
    pub recovered: Vec<ParsedObject>,
}

/// Call counters for one grouped fetch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FetchStats {
    pub requests: usize,
    pub batches_submitted: usize,
    /// Follow-up pages fetched after the first
    pub pages_fetched: usize,
    pub pages_parsed: usize,
}

/// Objects of a grouped fetch plus the requests that failed
#[derive(Debug, Default)]
pub struct GroupedFetch {
    pub objects: Vec<ParsedObject>,
    pub failures: Vec<RequestFailure>,
    pub stats: FetchStats,
}

impl GroupedFetch {
    /// True when no request failed
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The objects, or the first failure's error
    pub fn into_result(self) -> Result<Vec<ParsedObject>> {
        match self.failures.into_iter().next() {
            Some(failure) => Err(failure.error),
            None => Ok(self.objects),
        }
    }
}
