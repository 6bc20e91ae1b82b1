//! Coercing conversions on `Value`
//!
//! Conversions never fail. `to_nullable_*` returns `None` for input that
//! cannot be converted; `to_*` falls back to the category default
//! (false, 0, 0.0, "", Unix epoch, zero duration).

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

use super::types::{Value, ValueMap};

const TRUE_WORDS: [&str; 6] = ["true", "1", "yes", "y", "t", "on"];
const FALSE_WORDS: [&str; 6] = ["false", "0", "no", "n", "f", "off"];

/// Formats a duration as `PT<seconds>S`, with up to millisecond precision.
pub fn format_duration(duration: &Duration) -> String {
    let millis = duration.num_milliseconds();
    let sign = if millis < 0 { "-" } else { "" };
    let millis = millis.unsigned_abs();
    let (secs, frac) = (millis / 1000, millis % 1000);
    if frac == 0 {
        format!("{}PT{}S", sign, secs)
    } else {
        let frac = format!("{:03}", frac);
        format!("{}PT{}.{}S", sign, secs, frac.trim_end_matches('0'))
    }
}

/// Parses the `PT<seconds>S` form produced by [`format_duration`].
pub fn parse_duration(text: &str) -> Option<Duration> {
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let body = rest.strip_prefix("PT")?.strip_suffix('S')?;
    let (secs, frac) = match body.split_once('.') {
        Some((secs, frac)) => (secs, frac),
        None => (body, ""),
    };
    if secs.is_empty()
        || !secs.bytes().all(|b| b.is_ascii_digit())
        || frac.len() > 3
        || !frac.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    let secs: i64 = secs.parse().ok()?;
    let frac_millis: i64 = if frac.is_empty() {
        0
    } else {
        format!("{:0<3}", frac).parse().ok()?
    };
    let millis = secs.checked_mul(1000)?.checked_add(frac_millis)?;
    Duration::try_milliseconds(if negative { -millis } else { millis })
}

/// Parses RFC 3339 timestamps, plain `YYYY-MM-DD` dates and offset-less
/// `YYYY-MM-DDTHH:MM:SS` timestamps (taken as UTC).
pub fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn float_to_long(n: f64) -> Option<i64> {
    if n.is_finite() && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        Some(n.trunc() as i64)
    } else {
        None
    }
}

impl Value {
    pub fn to_nullable_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            Value::Integer(n) => Some(*n != 0),
            Value::Long(n) => Some(*n != 0),
            Value::Float(n) => Some(*n != 0.0),
            Value::Double(n) => Some(*n != 0.0),
            Value::String(s) => {
                let s = s.trim().to_ascii_lowercase();
                if TRUE_WORDS.contains(&s.as_str()) {
                    Some(true)
                } else if FALSE_WORDS.contains(&s.as_str()) {
                    Some(false)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    pub fn to_boolean(&self) -> bool {
        self.to_nullable_boolean().unwrap_or(false)
    }

    pub fn to_nullable_long(&self) -> Option<i64> {
        match self {
            Value::Boolean(b) => Some(*b as i64),
            Value::Integer(n) => Some(*n as i64),
            Value::Long(n) => Some(*n),
            Value::Float(n) => float_to_long(*n as f64),
            Value::Double(n) => float_to_long(*n),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(float_to_long))
            }
            Value::DateTime(dt) => Some(dt.timestamp_millis()),
            Value::Duration(d) => Some(d.num_milliseconds()),
            _ => None,
        }
    }

    pub fn to_long(&self) -> i64 {
        self.to_nullable_long().unwrap_or(0)
    }

    pub fn to_nullable_integer(&self) -> Option<i32> {
        self.to_nullable_long().and_then(|n| i32::try_from(n).ok())
    }

    pub fn to_integer(&self) -> i32 {
        self.to_nullable_integer().unwrap_or(0)
    }

    pub fn to_nullable_double(&self) -> Option<f64> {
        match self {
            Value::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Integer(n) => Some(*n as f64),
            Value::Long(n) => Some(*n as f64),
            Value::Float(n) => Some(*n as f64),
            Value::Double(n) => Some(*n),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::DateTime(dt) => Some(dt.timestamp_millis() as f64),
            Value::Duration(d) => Some(d.num_milliseconds() as f64),
            _ => None,
        }
    }

    pub fn to_double(&self) -> f64 {
        self.to_nullable_double().unwrap_or(0.0)
    }

    pub fn to_nullable_float(&self) -> Option<f32> {
        self.to_nullable_double().map(|n| n as f32)
    }

    pub fn to_float(&self) -> f32 {
        self.to_nullable_float().unwrap_or(0.0)
    }

    /// Stringified value; `None` only for null.
    pub fn to_nullable_string(&self) -> Option<String> {
        match self {
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    pub fn to_nullable_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            Value::Integer(_) | Value::Long(_) | Value::Float(_) | Value::Double(_) => self
                .to_nullable_long()
                .and_then(DateTime::<Utc>::from_timestamp_millis),
            Value::String(s) => parse_datetime(s),
            _ => None,
        }
    }

    /// Defaults to the Unix epoch.
    pub fn to_datetime(&self) -> DateTime<Utc> {
        self.to_nullable_datetime().unwrap_or_default()
    }

    pub fn to_nullable_duration(&self) -> Option<Duration> {
        match self {
            Value::Duration(d) => Some(*d),
            Value::Integer(_) | Value::Long(_) | Value::Float(_) | Value::Double(_) => self
                .to_nullable_long()
                .and_then(Duration::try_milliseconds),
            Value::String(s) => parse_duration(s.trim()).or_else(|| {
                s.trim()
                    .parse::<i64>()
                    .ok()
                    .and_then(Duration::try_milliseconds)
            }),
            _ => None,
        }
    }

    pub fn to_duration(&self) -> Duration {
        self.to_nullable_duration().unwrap_or_else(Duration::zero)
    }

    /// Sequence view: arrays as-is, null as empty, anything else as a
    /// one-element sequence.
    pub fn to_array(&self) -> Vec<Value> {
        match self {
            Value::Array(items) => items.clone(),
            Value::Null => Vec::new(),
            other => vec![other.clone()],
        }
    }

    /// Map view: maps as-is, records by field, anything else empty.
    pub fn to_map(&self) -> ValueMap {
        match self {
            Value::Map(map) => map.clone(),
            Value::Record(record) => record
                .field_names()
                .into_iter()
                .map(|name| {
                    let field = record.get_field(&name).unwrap_or_default();
                    (name, field)
                })
                .collect(),
            _ => ValueMap::new(),
        }
    }
}
