//! Object schemas and field coercion

use super::types::ParsedObject;
use crate::utils::error::{FetchError, Result};
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Target schema of a parsed object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Account,
    Campaign,
    AdSet,
    Ad,
    AdCreative,
    Activity,
    Insights,
    /// No declared fields; only the naming rules apply
    Generic,
}

struct Schema {
    integers: &'static [&'static str],
    decimals: &'static [&'static str],
    timestamps: &'static [&'static str],
}

const EMPTY: Schema = Schema {
    integers: &[],
    decimals: &[],
    timestamps: &[],
};

impl ObjectKind {
    fn schema(self) -> &'static Schema {
        match self {
            ObjectKind::Account => &Schema {
                integers: &["account_status", "amount_spent", "balance", "spend_cap"],
                decimals: &[],
                timestamps: &[],
            },
            ObjectKind::Campaign => &Schema {
                integers: &[
                    "budget_remaining",
                    "daily_budget",
                    "lifetime_budget",
                    "spend_cap",
                ],
                decimals: &[],
                timestamps: &[],
            },
            ObjectKind::AdSet => &Schema {
                integers: &[
                    "bid_amount",
                    "budget_remaining",
                    "daily_budget",
                    "lifetime_budget",
                ],
                decimals: &[],
                timestamps: &[],
            },
            ObjectKind::Ad => &Schema {
                integers: &["bid_amount"],
                decimals: &[],
                timestamps: &[],
            },
            ObjectKind::Activity => &Schema {
                integers: &[],
                decimals: &[],
                timestamps: &["date_time_in_timezone"],
            },
            ObjectKind::Insights => &Schema {
                integers: &[
                    "clicks",
                    "impressions",
                    "inline_link_clicks",
                    "reach",
                    "unique_clicks",
                ],
                decimals: &["cpc", "cpm", "cpp", "ctr", "frequency", "spend", "unique_ctr"],
                timestamps: &[],
            },
            ObjectKind::AdCreative | ObjectKind::Generic => &EMPTY,
        }
    }

    /// Coerce raw provider fields to this schema
    pub fn coerce(self, raw: Map<String, Value>) -> ParsedObject {
        let schema = self.schema();
        let fields = raw
            .into_iter()
            .map(|(name, value)| {
                let value = coerce_field(schema, &name, value);
                (name, value)
            })
            .collect();
        ParsedObject { kind: self, fields }
    }

    /// Parse a page body into objects: an array is the object list, an object
    /// with a `data` array yields its elements, any other object is one object.
    pub fn parse_page(self, page: &Value) -> Result<Vec<ParsedObject>> {
        let items = match page {
            Value::Array(items) => items.as_slice(),
            Value::Object(map) => match map.get("data") {
                Some(Value::Array(items)) => items.as_slice(),
                Some(_) => return Err(FetchError::parse("page `data` is not an array")),
                None => return Ok(vec![self.coerce(map.clone())]),
            },
            other => {
                return Err(FetchError::parse(format!(
                    "expected an object or array page, got {}",
                    json_type(other)
                )));
            }
        };

        items
            .iter()
            .map(|item| match item {
                Value::Object(map) => Ok(self.coerce(map.clone())),
                other => Err(FetchError::parse(format!(
                    "expected an object in page data, got {}",
                    json_type(other)
                ))),
            })
            .collect()
    }
}

fn coerce_field(schema: &Schema, name: &str, value: Value) -> Value {
    if name == "id" || name.ends_with("_id") {
        return match value {
            Value::Number(n) => Value::String(n.to_string()),
            other => other,
        };
    }

    if name.ends_with("_time") || schema.timestamps.contains(&name) {
        return to_timestamp(value);
    }

    if schema.integers.contains(&name) {
        if let Value::String(s) = &value {
            if let Ok(n) = s.trim().parse::<i64>() {
                return Value::Number(n.into());
            }
        }
        return value;
    }

    if schema.decimals.contains(&name) {
        if let Value::String(s) = &value {
            if let Some(n) = s.trim().parse::<f64>().ok().and_then(Number::from_f64) {
                return Value::Number(n);
            }
        }
        return value;
    }

    value
}

/// Provider timestamps (`2019-05-01T10:00:00+0000`, RFC 3339 or unix seconds) to RFC 3339 UTC
fn to_timestamp(value: Value) -> Value {
    let parsed = match &value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .or_else(|_| DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%z"))
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n
            .as_i64()
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single()),
        _ => None,
    };

    match parsed {
        Some(dt) => Value::String(dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
        None => value,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
