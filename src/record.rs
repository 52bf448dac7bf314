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

//! Log record and severity level.

use std::fmt;
use std::str::FromStr;

use jiff::Timestamp;

use crate::kv;
use crate::kv::Value;

/// The payload of a log message.
#[derive(Clone, Debug)]
pub struct Record {
    // the observed time
    time: Timestamp,

    // the metadata
    level: Level,
    target: String,
    caller: Option<Caller>,

    // the payload
    message: String,

    // structural logging
    kvs: Vec<(String, Value)>,
}

impl Record {
    /// Create a new [`RecordBuilder`].
    pub fn builder() -> RecordBuilder {
        RecordBuilder::default()
    }

    /// The observed time.
    pub fn time(&self) -> Timestamp {
        self.time
    }

    /// The severity level of the message.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The name of the target of the directive.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The source location that emitted the message, if captured.
    pub fn caller(&self) -> Option<&Caller> {
        self.caller.as_ref()
    }

    /// The message body.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The key-values, in insertion order. Keys are unique.
    pub fn key_values(&self) -> &[(String, Value)] {
        &self.kvs
    }
}

/// The source location of a log call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Caller {
    file: String,
    line: u32,
}

impl Caller {
    /// Create a caller location.
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// The source file.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// The line within the source file.
    pub fn line(&self) -> u32 {
        self.line
    }
}

impl From<&std::panic::Location<'_>> for Caller {
    fn from(location: &std::panic::Location<'_>) -> Self {
        Caller::new(location.file(), location.line())
    }
}

/// Builder for [`Record`].
#[derive(Debug)]
pub struct RecordBuilder {
    record: Record,
}

impl Default for RecordBuilder {
    fn default() -> Self {
        RecordBuilder {
            record: Record {
                time: Timestamp::now(),
                level: Level::Info,
                target: String::new(),
                caller: None,
                message: String::new(),
                kvs: vec![],
            },
        }
    }
}

impl RecordBuilder {
    /// Set [`time`](Record::time).
    pub fn time(mut self, time: Timestamp) -> Self {
        self.record.time = time;
        self
    }

    /// Set [`level`](Record::level).
    pub fn level(mut self, level: Level) -> Self {
        self.record.level = level;
        self
    }

    /// Set [`target`](Record::target).
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.record.target = target.into();
        self
    }

    /// Set [`caller`](Record::caller).
    pub fn caller(mut self, caller: Option<Caller>) -> Self {
        self.record.caller = caller;
        self
    }

    /// Set [`message`](Record::message).
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.record.message = message.into();
        self
    }

    /// Add a key-value pair. A later value for the same key replaces the earlier one.
    pub fn key_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        kv::upsert(&mut self.record.kvs, key.into(), value.into());
        self
    }

    /// Add many key-value pairs.
    pub fn key_values<K, V>(mut self, kvs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        for (k, v) in kvs {
            kv::upsert(&mut self.record.kvs, k.into(), v.into());
        }
        self
    }

    /// Invoke the builder and return a `Record`.
    pub fn build(self) -> Record {
        self.record
    }
}

/// An enum representing the available severity levels, from the most severe to the most
/// verbose.
///
/// `Ord` follows that order: `Level::Panic < Level::Error < Level::Trace`. A level is "at or
/// more severe than" a threshold when `level <= threshold`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum Level {
    /// Designates errors after which the program panics.
    Panic,
    /// Designates errors after which the program exits.
    Fatal,
    /// Designates very serious errors.
    Error,
    /// Designates hazardous situations.
    Warn,
    /// Designates useful information.
    Info,
    /// Designates lower priority information.
    Debug,
    /// Designates very low priority, often extremely verbose, information.
    Trace,
}

impl Level {
    /// All levels from the most severe to the most verbose.
    pub const ALL: [Level; 7] = [
        Level::Panic,
        Level::Fatal,
        Level::Error,
        Level::Warn,
        Level::Info,
        Level::Debug,
        Level::Trace,
    ];

    /// Return the lower-case name of the `Level`.
    ///
    /// This returns the same string as the `fmt::Display` implementation. Note that
    /// [`Level::Warn`] is named `warning`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Panic => "panic",
            Level::Fatal => "fatal",
            Level::Error => "error",
            Level::Warn => "warning",
            Level::Info => "info",
            Level::Debug => "debug",
            Level::Trace => "trace",
        }
    }

    /// The most verbose `log` crate level that passes this threshold.
    pub fn to_log_level_filter(self) -> log::LevelFilter {
        match self {
            Level::Panic | Level::Fatal | Level::Error => log::LevelFilter::Error,
            Level::Warn => log::LevelFilter::Warn,
            Level::Info => log::LevelFilter::Info,
            Level::Debug => log::LevelFilter::Debug,
            Level::Trace => log::LevelFilter::Trace,
        }
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Self::Error,
            log::Level::Warn => Self::Warn,
            log::Level::Info => Self::Info,
            log::Level::Debug => Self::Debug,
            log::Level::Trace => Self::Trace,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// The type returned by `from_str` when the string doesn't match any of the log levels.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct ParseLevelError {}

impl fmt::Display for ParseLevelError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str("malformed log level")
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;
    fn from_str(s: &str) -> Result<Level, Self::Err> {
        let s = s.trim();
        for (name, level) in [
            ("panic", Level::Panic),
            ("fatal", Level::Fatal),
            ("error", Level::Error),
            ("warn", Level::Warn),
            ("warning", Level::Warn),
            ("info", Level::Info),
            ("debug", Level::Debug),
            ("trace", Level::Trace),
        ] {
            if s.eq_ignore_ascii_case(name) {
                return Ok(level);
            }
        }

        Err(ParseLevelError {})
    }
}
