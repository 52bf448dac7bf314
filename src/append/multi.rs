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

use crate::Error;
use crate::Layout;
use crate::append::Append;
use crate::append::Destination;
use crate::append::Sink;
use crate::config::FormatKind;
use crate::layout::JsonLayout;
use crate::layout::PrettyLayout;
use crate::layout::TextLayout;
use crate::logger::handle_log_error;
use crate::record::Level;
use crate::record::Record;

/// The shared base from which each destination of a [`MultiWriter`] derives its layout.
#[derive(Debug, Clone)]
pub struct MultiWriterConfig {
    format: FormatKind,
    show_caller: bool,
    custom: Option<PrettyLayout>,
}

impl Default for MultiWriterConfig {
    fn default() -> Self {
        Self {
            format: FormatKind::Plain,
            show_caller: true,
            custom: None,
        }
    }
}

impl MultiWriterConfig {
    /// Create a base of the given format kind.
    pub fn new(format: FormatKind) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// Enable or disable caller reporting of the built-in layouts. Default to `true`.
    pub fn with_caller(mut self, enabled: bool) -> Self {
        self.show_caller = enabled;
        self
    }

    /// Use a copy of `layout` for every destination instead of the format kind.
    pub fn with_custom_layout(mut self, layout: PrettyLayout) -> Self {
        self.custom = Some(layout);
        self
    }

    /// Derive a layout, overriding only the color and timestamp settings of the base.
    ///
    /// The JSON layout carries its own timestamp and no colors, so both overrides are ignored
    /// for it, and the raw layout always carries a timestamp.
    pub fn layout(&self, use_colors: bool, show_timestamp: bool) -> Box<dyn Layout> {
        if let Some(custom) = &self.custom {
            return custom
                .clone()
                .with_colors(use_colors)
                .with_timestamp(show_timestamp)
                .into();
        }

        match self.format {
            FormatKind::Json => JsonLayout::default().with_caller(self.show_caller).into(),
            FormatKind::Plain => PrettyLayout::default()
                .with_colors(use_colors)
                .with_timestamp(show_timestamp)
                .with_caller(self.show_caller, Level::Warn)
                .into(),
            FormatKind::Raw => TextLayout::default()
                .with_colors(use_colors)
                .with_caller(self.show_caller)
                .into(),
        }
    }
}

/// An appender that replicates each record to several destinations, each formatted on its own.
///
/// A failure on one destination is reported to stderr and does not affect the others.
///
/// # Examples
///
/// ```
/// use logforth_pretty::append::MultiWriter;
/// use logforth_pretty::append::MultiWriterConfig;
/// use logforth_pretty::append::Stderr;
/// use logforth_pretty::append::Stdout;
/// use logforth_pretty::config::FormatKind;
///
/// let writer = MultiWriter::new(MultiWriterConfig::new(FormatKind::Plain))
///     .add_writer(Stdout::default(), true, false)
///     .add_writer(Stderr::default(), false, true);
/// assert_eq!(writer.len(), 2);
/// ```
#[derive(Debug)]
pub struct MultiWriter {
    config: MultiWriterConfig,
    destinations: Vec<Destination>,
}

impl MultiWriter {
    /// Create a writer without destinations.
    pub fn new(config: MultiWriterConfig) -> Self {
        Self {
            config,
            destinations: vec![],
        }
    }

    /// Bind `sink` with a layout derived from the shared base.
    pub fn add_writer(
        mut self,
        sink: impl Into<Box<dyn Sink>>,
        use_colors: bool,
        show_timestamp: bool,
    ) -> Self {
        let layout = self.config.layout(use_colors, show_timestamp);
        self.destinations.push(Destination::new(sink, layout));
        self
    }

    /// Add a destination with its own layout.
    pub fn add(mut self, destination: Destination) -> Self {
        self.destinations.push(destination);
        self
    }

    /// The number of destinations.
    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    /// Whether no destination is bound.
    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    /// Write `record` to every destination in order.
    pub fn write_entry(&self, record: &Record) {
        for destination in &self.destinations {
            if let Err(err) = destination.append(record) {
                let err = Error::new("failed to write log entry").with_source(err);
                handle_log_error(&err);
            }
        }
    }
}

impl Append for MultiWriter {
    fn append(&self, record: &Record) -> Result<(), Error> {
        self.write_entry(record);
        Ok(())
    }

    fn flush(&self) -> Result<(), Error> {
        for destination in &self.destinations {
            if let Err(err) = destination.flush() {
                let err = Error::new("failed to flush log destination").with_source(err);
                handle_log_error(&err);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::io::Write;
    use std::sync::Arc;
    use std::sync::Mutex;

    use super::*;
    use crate::append::Writer;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[derive(Debug)]
    struct BrokenSink;

    impl Sink for BrokenSink {
        fn write_all(&self, _: &[u8]) -> Result<(), Error> {
            Err(Error::new("disk full"))
        }
    }

    fn record() -> Record {
        Record::builder()
            .level(Level::Info)
            .message("[Server] Starting")
            .key_value("port", 8080)
            .build()
    }

    #[test]
    fn test_console_and_file_formatted_independently() {
        let console = SharedBuf::default();
        let file = SharedBuf::default();
        let writer = MultiWriter::new(MultiWriterConfig::new(FormatKind::Plain))
            .add_writer(Writer::new(console.clone()), true, false)
            .add_writer(Writer::new(file.clone()), false, true);

        writer.write_entry(&record());

        let console = console.contents();
        assert!(console.contains('\x1b'));
        assert!(!console.starts_with('['));
        assert!(console.contains("Starting"));

        let file = file.contents();
        assert!(file.starts_with('['));
        assert!(!file.contains('\x1b'));
        assert!(file.contains("[Server]"));
    }

    #[test]
    fn test_failing_destination_does_not_stop_others() {
        let output = SharedBuf::default();
        let writer = MultiWriter::new(MultiWriterConfig::new(FormatKind::Plain))
            .add_writer(BrokenSink, false, false)
            .add_writer(Writer::new(output.clone()), false, false);

        assert!(writer.append(&record()).is_ok());
        assert!(output.contents().contains("Starting port=8080"));
    }

    #[test]
    fn test_custom_layout_overrides_colors_and_timestamp_only() {
        let custom = PrettyLayout::default()
            .with_tag_style(crate::layout::TagStyle::Center, "=")
            .with_colors(true)
            .with_timestamp(true);
        let config = MultiWriterConfig::new(FormatKind::Json).with_custom_layout(custom);

        let output = SharedBuf::default();
        let writer =
            MultiWriter::new(config).add_writer(Writer::new(output.clone()), false, false);
        writer.write_entry(&record());

        let output = output.contents();
        assert!(output.starts_with("INFO"));
        assert!(output.contains("[== Server ===]"));
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn test_format_kinds() {
        let json = SharedBuf::default();
        let raw = SharedBuf::default();
        MultiWriter::new(MultiWriterConfig::new(FormatKind::Json))
            .add_writer(Writer::new(json.clone()), true, true)
            .write_entry(&record());
        MultiWriter::new(MultiWriterConfig::new(FormatKind::Raw))
            .add_writer(Writer::new(raw.clone()), false, false)
            .write_entry(&record());

        let value: serde_json::Value = serde_json::from_str(&json.contents()).unwrap();
        assert_eq!(value["msg"], "[Server] Starting");
        assert!(raw.contents().starts_with("time="));
    }
}
