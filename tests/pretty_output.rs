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

use std::io;
use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;

use logforth_pretty::Logger;
use logforth_pretty::Record;
use logforth_pretty::append::Destination;
use logforth_pretty::append::MultiWriter;
use logforth_pretty::append::MultiWriterConfig;
use logforth_pretty::append::Writer;
use logforth_pretty::config::FormatKind;
use logforth_pretty::layout::Layout;
use logforth_pretty::layout::PrettyLayout;
use logforth_pretty::layout::TagStyle;
use logforth_pretty::record::Level;

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

fn render(layout: &PrettyLayout, record: &Record) -> String {
    String::from_utf8(layout.format(record).unwrap()).unwrap()
}

#[test]
fn test_tag_gutter_without_colors() {
    let layout = PrettyLayout::default().with_colors(false).with_tag_width(15);
    let record = Record::builder().message("[Server] Starting").build();
    let output = render(&layout, &record);
    assert!(output.contains(&format!("[Server]{}Starting", " ".repeat(8))));
}

#[test]
fn test_centered_tag_with_custom_fill() {
    let layout = PrettyLayout::default()
        .with_colors(false)
        .with_tag_style(TagStyle::Center, "=");
    let record = Record::builder()
        .message("[Init] Starting application")
        .build();
    assert!(render(&layout, &record).contains("[=== Init ====]"));
}

#[test]
fn test_fields_sorted_at_end_of_line() {
    let layout = PrettyLayout::default().with_colors(false);
    let record = Record::builder()
        .message("Request handled")
        .key_value("user", "alice")
        .key_value("duration", "150ms")
        .build();
    assert!(render(&layout, &record).trim_end().ends_with("duration=150ms user=alice"));
}

#[test]
fn test_console_and_file_destinations() {
    let console = SharedBuf::default();
    let file = SharedBuf::default();
    let writer = MultiWriter::new(MultiWriterConfig::new(FormatKind::Plain))
        .add_writer(Writer::new(console.clone()), true, false)
        .add_writer(Writer::new(file.clone()), false, true);
    let logger = Logger::new(Level::Info, "Main", writer);

    logger.with_field("port", 8080).info("[Server] Starting");

    let console = console.contents();
    assert!(console.contains("\x1b["));
    assert!(!console.starts_with("[20"));

    let file = file.contents();
    assert!(file.starts_with("[20"));
    assert!(!file.contains('\x1b'));
    assert!(file.contains("Starting port=8080"));
}

#[test]
fn test_destination_with_own_layout() {
    let json = SharedBuf::default();
    let plain = SharedBuf::default();
    let writer = MultiWriter::new(MultiWriterConfig::new(FormatKind::Json))
        .add_writer(Writer::new(json.clone()), false, false)
        .add(Destination::new(
            Writer::new(plain.clone()),
            PrettyLayout::default().with_colors(false),
        ));
    let logger = Logger::new(Level::Info, "Main", writer);

    logger.warn("[Disk] Almost full");

    let value: serde_json::Value = serde_json::from_str(json.contents().trim()).unwrap();
    assert_eq!(value["level"], "warning");
    assert!(value["file"].as_str().unwrap().contains("pretty_output.rs:"));

    let plain = plain.contents();
    assert!(plain.starts_with("WARN   [Disk]"));
    assert!(plain.contains("└─ at ("));
}
