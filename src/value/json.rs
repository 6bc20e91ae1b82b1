//! JSON interchange
//!
//! Categories map 1:1 onto JSON types. Datetimes serialize as RFC 3339 UTC
//! (`...Z`) and durations as `PT<seconds>S`; strings in exactly those forms
//! parse back into `DateTime`/`Duration`. Integers that fit in 32 bits parse
//! as `Integer`, other integers as `Long`, fractional numbers as `Double`.
//! Records serialize through their field enumeration.
//!
//! Some categories do not survive a round trip: `Enum` comes back as
//! `String`, `Float` as `Double`, a `Long` within 32 bits as `Integer`, and
//! a record as a `Map`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map as JsonMap, Number, Value as Json};

use super::convert::{format_duration, parse_duration};
use super::errors::ValueResult;
use super::types::{Value, ValueMap};

fn parse_json_string(s: String) -> Value {
    // Only full RFC 3339 timestamps are promoted; plain dates stay strings
    if s.len() >= 20 && s.as_bytes().get(10) == Some(&b'T') {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
            return Value::DateTime(dt.with_timezone(&Utc));
        }
    }
    if s.starts_with("PT") || s.starts_with("-PT") {
        if let Some(d) = parse_duration(&s) {
            return Value::Duration(d);
        }
    }
    Value::String(s)
}

fn number_to_json(n: f64) -> Json {
    Number::from_f64(n).map(Json::Number).unwrap_or(Json::Null)
}

impl Value {
    /// Converts a parsed JSON document.
    pub fn from_json(json: Json) -> Value {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Boolean(b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    match i32::try_from(i) {
                        Ok(small) => Value::Integer(small),
                        Err(_) => Value::Long(i),
                    }
                } else {
                    Value::Double(n.as_f64().unwrap_or(0.0))
                }
            }
            Json::String(s) => parse_json_string(s),
            Json::Array(items) => Value::Array(items.into_iter().map(Value::from_json).collect()),
            Json::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from_json(v)))
                    .collect::<ValueMap>(),
            ),
        }
    }

    /// Converts to a JSON document. Non-finite floats become `null`.
    pub fn to_json(&self) -> Json {
        match self {
            Value::Null => Json::Null,
            Value::Boolean(b) => Json::Bool(*b),
            Value::Integer(n) => Json::from(*n),
            Value::Long(n) => Json::from(*n),
            Value::Float(n) => number_to_json(*n as f64),
            Value::Double(n) => number_to_json(*n),
            Value::String(s) | Value::Enum(s) => Json::String(s.clone()),
            Value::DateTime(dt) => Json::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Value::Duration(d) => Json::String(format_duration(d)),
            Value::Array(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            Value::Map(map) => Json::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect::<JsonMap<String, Json>>(),
            ),
            Value::Record(record) => Json::Object(
                record
                    .field_names()
                    .into_iter()
                    .map(|name| {
                        let field = record.get_field(&name).unwrap_or_default();
                        (name, field.to_json())
                    })
                    .collect::<JsonMap<String, Json>>(),
            ),
        }
    }

    /// Parses JSON text.
    ///
    /// # Errors
    ///
    /// `InvalidJson` if the text is not well-formed JSON.
    pub fn parse_json(text: &str) -> ValueResult<Value> {
        let json: Json = serde_json::from_str(text)?;
        Ok(Value::from_json(json))
    }

    /// Serializes to compact JSON text.
    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }
}

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        Value::from_json(json)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Json::deserialize(deserializer).map(Value::from_json)
    }
}
