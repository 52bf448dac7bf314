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

use std::io::Write;
use std::panic::Location;

use crate::Append;
use crate::Error;
use crate::kv;
use crate::kv::Value;
use crate::record::Caller;
use crate::record::Level;
use crate::record::Record;

/// A logger that filters records by severity and hands them to its output.
///
/// This struct implements [`log::Log`] to bridge the [`log`] crate macros, and offers its own
/// emitters for the two severities the `log` crate lacks, [`fatal`](Logger::fatal) and
/// [`panic`](Logger::panic).
///
/// # Examples
///
/// ```
/// use logforth_pretty::config::OutputKind;
/// use logforth_pretty::record::Level;
///
/// let logger = logforth_pretty::builder()
///     .level(Level::Debug)
///     .output(OutputKind::Console)
///     .build()
///     .unwrap();
/// logger.with_field("port", 8080).info("[Server] Starting");
/// ```
#[derive(Debug)]
pub struct Logger {
    level: Level,
    namespace: String,
    append: Box<dyn Append>,
}

impl Logger {
    /// Create a logger that passes records at `level` or more severe to `append`.
    pub fn new(
        level: Level,
        namespace: impl Into<String>,
        append: impl Into<Box<dyn Append>>,
    ) -> Self {
        Self {
            level,
            namespace: namespace.into(),
            append: append.into(),
        }
    }

    /// The severity threshold.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The namespace, used as the target of records emitted through this logger.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Whether records of `level` pass the threshold.
    pub fn enabled(&self, level: Level) -> bool {
        level <= self.level
    }

    /// Hand `record` to the output if it passes the threshold.
    ///
    /// Output failures are reported on stderr.
    pub fn log(&self, record: &Record) {
        if !self.enabled(record.level()) {
            return;
        }

        if let Err(err) = self.append.append(record) {
            handle_record_error(record, err);
        }
    }

    /// Flush the output.
    pub fn flush(&self) {
        if let Err(err) = self.append.flush() {
            handle_flush_error(err);
        }
    }

    /// Start an entry carrying the field `key=value`.
    pub fn with_field(&self, key: impl Into<String>, value: impl Into<Value>) -> Entry<'_> {
        Entry::new(self).with_field(key, value)
    }

    /// Log `message` at trace level.
    #[track_caller]
    pub fn trace(&self, message: impl Into<String>) {
        Entry::new(self).trace(message)
    }

    /// Log `message` at debug level.
    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) {
        Entry::new(self).debug(message)
    }

    /// Log `message` at info level.
    #[track_caller]
    pub fn info(&self, message: impl Into<String>) {
        Entry::new(self).info(message)
    }

    /// Log `message` at warn level.
    #[track_caller]
    pub fn warn(&self, message: impl Into<String>) {
        Entry::new(self).warn(message)
    }

    /// Log `message` at error level.
    #[track_caller]
    pub fn error(&self, message: impl Into<String>) {
        Entry::new(self).error(message)
    }

    /// Log `message` at fatal level, flush, then exit the process with status 1.
    #[track_caller]
    pub fn fatal(&self, message: impl Into<String>) -> ! {
        Entry::new(self).fatal(message)
    }

    /// Log `message` at panic level, then panic with it.
    #[track_caller]
    pub fn panic(&self, message: impl Into<String>) -> ! {
        Entry::new(self).panic(message)
    }
}

/// A record under construction: structured fields waiting for a message and a level.
///
/// # Examples
///
/// ```
/// let logger = logforth_pretty::builder().build().unwrap();
/// logger
///     .with_field("user", "alice")
///     .with_field("duration", "150ms")
///     .info("[Auth] Login succeeded");
/// ```
#[derive(Debug)]
#[must_use = "an entry is only logged by one of its emitters"]
pub struct Entry<'a> {
    logger: &'a Logger,
    kvs: Vec<(String, Value)>,
}

impl<'a> Entry<'a> {
    fn new(logger: &'a Logger) -> Self {
        Self {
            logger,
            kvs: vec![],
        }
    }

    /// Add the field `key=value`. A later value for the same key replaces the earlier one.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        kv::upsert(&mut self.kvs, key.into(), value.into());
        self
    }

    /// Log `message` at trace level.
    #[track_caller]
    pub fn trace(self, message: impl Into<String>) {
        self.emit(Level::Trace, message.into(), Location::caller())
    }

    /// Log `message` at debug level.
    #[track_caller]
    pub fn debug(self, message: impl Into<String>) {
        self.emit(Level::Debug, message.into(), Location::caller())
    }

    /// Log `message` at info level.
    #[track_caller]
    pub fn info(self, message: impl Into<String>) {
        self.emit(Level::Info, message.into(), Location::caller())
    }

    /// Log `message` at warn level.
    #[track_caller]
    pub fn warn(self, message: impl Into<String>) {
        self.emit(Level::Warn, message.into(), Location::caller())
    }

    /// Log `message` at error level.
    #[track_caller]
    pub fn error(self, message: impl Into<String>) {
        self.emit(Level::Error, message.into(), Location::caller())
    }

    /// Log `message` at fatal level, flush, then exit the process with status 1.
    #[track_caller]
    pub fn fatal(self, message: impl Into<String>) -> ! {
        let logger = self.logger;
        self.emit(Level::Fatal, message.into(), Location::caller());
        logger.flush();
        std::process::exit(1)
    }

    /// Log `message` at panic level, then panic with it.
    #[track_caller]
    pub fn panic(self, message: impl Into<String>) -> ! {
        let message = message.into();
        self.emit(Level::Panic, message.clone(), Location::caller());
        panic!("{message}")
    }

    fn emit(self, level: Level, message: String, location: &Location<'_>) {
        if !self.logger.enabled(level) {
            return;
        }

        let record = Record::builder()
            .level(level)
            .target(self.logger.namespace())
            .caller(Some(Caller::from(location)))
            .message(message)
            .key_values(self.kvs)
            .build();
        self.logger.log(&record);
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        Logger::enabled(self, metadata.level().into())
    }

    fn log(&self, record: &log::Record) {
        if !Logger::enabled(self, record.level().into()) {
            return;
        }

        struct KvCollector {
            kvs: Vec<(String, Value)>,
        }

        impl<'kvs> log::kv::VisitSource<'kvs> for KvCollector {
            fn visit_pair(
                &mut self,
                key: log::kv::Key<'kvs>,
                value: log::kv::Value<'kvs>,
            ) -> Result<(), log::kv::Error> {
                kv::upsert(
                    &mut self.kvs,
                    key.as_str().to_string(),
                    Value::from_log_value(&value),
                );
                Ok(())
            }
        }

        let mut visitor = KvCollector { kvs: vec![] };
        if let Err(err) = record.key_values().visit(&mut visitor) {
            let err = Error::new("failed to collect key-values").with_source(err);
            crate::logger::handle_log_error(&err);
        }

        let caller = match (record.file(), record.line()) {
            (Some(file), Some(line)) => Some(Caller::new(file, line)),
            _ => None,
        };

        let record = Record::builder()
            .level(record.level().into())
            .target(record.target())
            .caller(caller)
            .message(record.args().to_string())
            .key_values(visitor.kvs)
            .build();
        Logger::log(self, &record);
    }

    fn flush(&self) {
        Logger::flush(self);
    }
}

fn handle_record_error(record: &Record, error: Error) {
    let _ = write!(
        std::io::stderr(),
        r###"
Error perform logging.
    Attempted to log: {message}
    Record: {record:?}
    Error: {error:?}
"###,
        message = record.message(),
    );
}

fn handle_flush_error(error: Error) {
    let _ = write!(
        std::io::stderr(),
        r###"
Error perform flush.
    Error: {error:?}
"###,
    );
}
