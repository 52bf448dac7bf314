// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The module for key-value pairs in a log record.

use std::fmt;

use serde::Serialize;

/// Represents a value in a key-value pair.
///
/// Values are displayed through their natural representation, e.g. `150ms`, `42`, `true`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A string value.
    Str(String),
    /// A signed integer value.
    I64(i64),
    /// An unsigned integer value.
    U64(u64),
    /// A floating point value.
    F64(f64),
    /// A boolean value.
    Bool(bool),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(v) => f.write_str(v),
            Value::I64(v) => fmt::Display::fmt(v, f),
            Value::U64(v) => fmt::Display::fmt(v, f),
            Value::F64(v) => fmt::Display::fmt(v, f),
            Value::Bool(v) => fmt::Display::fmt(v, f),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::F64(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::F64(v)
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::I64(v as i64)
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::U64(v as u64)
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl Value {
    /// Convert a value captured by the `log` crate.
    ///
    /// Primitive values keep their type; anything else is captured through its `Display` impl.
    pub fn from_log_value(value: &log::kv::Value) -> Self {
        if let Some(v) = value.to_bool() {
            Value::Bool(v)
        } else if let Some(v) = value.to_u64() {
            Value::U64(v)
        } else if let Some(v) = value.to_i64() {
            Value::I64(v)
        } else if let Some(v) = value.to_f64() {
            Value::F64(v)
        } else if let Some(v) = value.to_borrowed_str() {
            Value::Str(v.to_owned())
        } else {
            Value::Str(value.to_string())
        }
    }
}

/// Insert a key-value pair, replacing the value of an existing key.
pub(crate) fn upsert(kvs: &mut Vec<(String, Value)>, key: String, value: Value) {
    match kvs.iter_mut().find(|(k, _)| *k == key) {
        Some((_, v)) => *v = value,
        None => kvs.push((key, value)),
    }
}

/// Return the key-value pairs ordered by key.
pub(crate) fn sorted(kvs: &[(String, Value)]) -> Vec<(&str, &Value)> {
    let mut sorted = kvs.iter().map(|(k, v)| (k.as_str(), v)).collect::<Vec<_>>();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_display() {
        assert_eq!(Value::from("150ms").to_string(), "150ms");
        assert_eq!(Value::from(42i32).to_string(), "42");
        assert_eq!(Value::from(-7i64).to_string(), "-7");
        assert_eq!(Value::from(1.5f64).to_string(), "1.5");
        assert_eq!(Value::from(true).to_string(), "true");
    }

    #[test]
    fn test_upsert_replaces_existing_key() {
        let mut kvs = vec![];
        upsert(&mut kvs, "user".to_string(), "alice".into());
        upsert(&mut kvs, "id".to_string(), 1u32.into());
        upsert(&mut kvs, "user".to_string(), "bob".into());
        assert_eq!(kvs.len(), 2);
        assert_eq!(kvs[0], ("user".to_string(), Value::from("bob")));
    }

    #[test]
    fn test_sorted_by_key() {
        let kvs = vec![
            ("user".to_string(), Value::from("alice")),
            ("duration".to_string(), Value::from("150ms")),
            ("attempt".to_string(), Value::from(2u8)),
        ];
        let keys = sorted(&kvs).into_iter().map(|(k, _)| k).collect::<Vec<_>>();
        assert_eq!(keys, vec!["attempt", "duration", "user"]);
    }

    #[test]
    fn test_from_log_value() {
        assert_eq!(
            Value::from_log_value(&log::kv::Value::from(7u64)),
            Value::U64(7)
        );
        assert_eq!(
            Value::from_log_value(&log::kv::Value::from(true)),
            Value::Bool(true)
        );
        assert_eq!(
            Value::from_log_value(&log::kv::Value::from("abc")),
            Value::Str("abc".to_string())
        );
    }
}
