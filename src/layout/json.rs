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

use jiff::tz::TimeZone;
use serde_json::Map;

use crate::Error;
use crate::layout::Layout;
use crate::record::Record;

/// A JSON layout for formatting log records.
///
/// Fields are flattened into the top-level object. A field whose key clashes with one of `time`,
/// `level`, `msg` or `file` is renamed `fields.<key>`.
///
/// Output format:
///
/// ```json
/// {"level":"info","msg":"Server started","port":8080,"time":"2024-08-11T22:44:57+08:00"}
/// {"file":"src/disk.rs:31","level":"warning","msg":"Disk almost full","time":"2024-08-11T22:44:58+08:00"}
/// ```
///
/// # Examples
///
/// ```
/// use logforth_pretty::layout::JsonLayout;
///
/// let json_layout = JsonLayout::default();
/// ```
#[derive(Default, Debug, Clone)]
pub struct JsonLayout {
    tz: Option<TimeZone>,
    show_caller: bool,
}

impl JsonLayout {
    /// Set the timezone for timestamps.
    ///
    /// # Examples
    ///
    /// ```
    /// use jiff::tz::TimeZone;
    /// use logforth_pretty::layout::JsonLayout;
    ///
    /// let layout = JsonLayout::default().timezone(TimeZone::UTC);
    /// ```
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.tz = Some(tz);
        self
    }

    /// Add a `file` entry for records carrying a caller location. Default to `false`.
    pub fn with_caller(mut self, enabled: bool) -> Self {
        self.show_caller = enabled;
        self
    }
}

impl Layout for JsonLayout {
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error> {
        let tz = self.tz.clone().unwrap_or_else(TimeZone::system);
        let time = record.time().to_zoned(tz).strftime("%Y-%m-%dT%H:%M:%S%:z");

        let mut object = Map::new();
        for (key, value) in record.key_values() {
            let value = serde_json::to_value(value)
                .map_err(|err| Error::new("failed to serialize field").with_source(err))?;
            object.insert(key.clone(), value);
        }

        for reserved in ["time", "level", "msg", "file"] {
            if let Some(value) = object.remove(reserved) {
                object.insert(format!("fields.{reserved}"), value);
            }
        }

        object.insert("time".to_string(), time.to_string().into());
        object.insert("level".to_string(), record.level().as_str().into());
        object.insert("msg".to_string(), record.message().into());
        if self.show_caller {
            if let Some(caller) = record.caller() {
                let file = format!("{}:{}", caller.file(), caller.line());
                object.insert("file".to_string(), file.into());
            }
        }

        let mut bytes = serde_json::to_vec(&object)
            .map_err(|err| Error::new("failed to serialize record").with_source(err))?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use serde_json::Value;
    use serde_json::json;

    use super::*;
    use crate::record::Caller;
    use crate::record::Level;

    fn parse(layout: &JsonLayout, record: &Record) -> Value {
        let bytes = layout.format(record).unwrap();
        assert_eq!(bytes.last(), Some(&b'\n'));
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_flattened_fields() {
        let time: Timestamp = "2024-08-10T17:12:52Z".parse().unwrap();
        let record = Record::builder()
            .time(time)
            .level(Level::Info)
            .message("Server started")
            .key_value("port", 8080u16)
            .key_value("tls", true)
            .key_value("host", "localhost")
            .build();

        let layout = JsonLayout::default().timezone(TimeZone::UTC);
        assert_eq!(
            parse(&layout, &record),
            json!({
                "time": "2024-08-10T17:12:52+00:00",
                "level": "info",
                "msg": "Server started",
                "port": 8080,
                "tls": true,
                "host": "localhost",
            })
        );
    }

    #[test]
    fn test_keys_are_sorted() {
        let record = Record::builder()
            .message("m")
            .key_value("zeta", 1)
            .key_value("alpha", 2)
            .build();
        let bytes = JsonLayout::default().format(&record).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let alpha = text.find("\"alpha\"").unwrap();
        let zeta = text.find("\"zeta\"").unwrap();
        assert!(alpha < zeta);
    }

    #[test]
    fn test_reserved_keys_are_renamed() {
        let record = Record::builder()
            .message("real")
            .key_value("msg", "shadowed")
            .key_value("level", 3)
            .build();
        let value = parse(&JsonLayout::default(), &record);
        assert_eq!(value["msg"], "real");
        assert_eq!(value["fields.msg"], "shadowed");
        assert_eq!(value["fields.level"], 3);
    }

    #[test]
    fn test_caller() {
        let record = Record::builder()
            .level(Level::Error)
            .message("boom")
            .caller(Some(Caller::new("src/lib.rs", 12)))
            .build();

        let value = parse(&JsonLayout::default(), &record);
        assert!(value.get("file").is_none());

        let value = parse(&JsonLayout::default().with_caller(true), &record);
        assert_eq!(value["file"], "src/lib.rs:12");
        assert_eq!(value["level"], "error");
    }
}
