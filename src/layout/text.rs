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

use std::fmt::Write;

use jiff::tz::TimeZone;

use crate::Error;
use crate::kv;
use crate::layout::Layout;
use crate::layout::color::LevelColor;
use crate::layout::color::paint;
use crate::record::Record;

// keys written by the layout itself; fields using them are renamed `fields.<key>`
const RESERVED_KEYS: [&str; 4] = ["time", "level", "msg", "file"];

/// A layout that formats log records as logfmt-style `key=value` text.
///
/// Output format:
///
/// ```text
/// time="2024-08-11T22:44:57+08:00" level=info msg="Server started" port=8080
/// time="2024-08-11T22:44:57+08:00" level=warning msg="Disk almost full" file="src/disk.rs:31" usage=0.93
/// ```
///
/// By default, the level value is colored. Call [`no_color`](TextLayout::no_color) to disable
/// coloring.
///
/// # Examples
///
/// ```
/// use logforth_pretty::layout::TextLayout;
///
/// let layout = TextLayout::default().no_color();
/// ```
#[derive(Debug, Clone)]
pub struct TextLayout {
    colors: LevelColor,
    no_color: bool,
    show_caller: bool,
    timezone: TimeZone,
}

impl Default for TextLayout {
    fn default() -> Self {
        Self {
            colors: LevelColor::default(),
            no_color: false,
            show_caller: false,
            timezone: TimeZone::system(),
        }
    }
}

impl TextLayout {
    /// Disable colored output.
    pub fn no_color(mut self) -> Self {
        self.no_color = true;
        self
    }

    /// Enable or disable colored output. Default to `true`.
    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.no_color = !enabled;
        self
    }

    /// Add a `file=path:line` pair for records carrying a caller location. Default to `false`.
    pub fn with_caller(mut self, enabled: bool) -> Self {
        self.show_caller = enabled;
        self
    }

    /// Customize the color of each level.
    pub fn with_level_colors(mut self, colors: LevelColor) -> Self {
        self.colors = colors;
        self
    }

    /// Set the timezone for timestamps.
    ///
    /// Defaults to the system timezone if not set.
    ///
    /// # Examples
    ///
    /// ```
    /// use jiff::tz::TimeZone;
    /// use logforth_pretty::layout::TextLayout;
    ///
    /// let layout = TextLayout::default().timezone(TimeZone::UTC);
    /// ```
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.timezone = tz;
        self
    }
}

// bare tokens are limited to `[A-Za-z0-9-._/@^+]`; anything else is quoted
fn needs_quoting(text: &str) -> bool {
    let bare = |c: char| {
        c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '/' | '@' | '^' | '+')
    };
    text.is_empty() || !text.chars().all(bare)
}

fn write_token(result: &mut String, text: &str) -> Result<(), Error> {
    if needs_quoting(text) {
        write!(result, "\"{}\"", text.escape_debug()).map_err(Error::from_fmt_error)
    } else {
        result.push_str(text);
        Ok(())
    }
}

fn encode_key_value(result: &mut String, key: &str, value: &str) -> Result<(), Error> {
    result.push(' ');
    write_token(result, key)?;
    result.push('=');
    write_token(result, value)
}

impl Layout for TextLayout {
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error> {
        let time = record
            .time()
            .to_zoned(self.timezone.clone())
            .strftime("%Y-%m-%dT%H:%M:%S%:z")
            .to_string();

        let mut text = String::new();
        encode_key_value(&mut text, "time", &time)?;

        let level = record.level().as_str();
        if self.no_color {
            encode_key_value(&mut text, "level", level)?;
        } else {
            let color = self.colors.color_of(record.level());
            write!(text, " level={}", paint(color, level)).map_err(Error::from_fmt_error)?;
        }

        encode_key_value(&mut text, "msg", record.message())?;

        if self.show_caller {
            if let Some(caller) = record.caller() {
                let file = format!("{}:{}", caller.file(), caller.line());
                encode_key_value(&mut text, "file", &file)?;
            }
        }

        for (key, value) in kv::sorted(record.key_values()) {
            let value = value.to_string();
            if RESERVED_KEYS.contains(&key) {
                encode_key_value(&mut text, &format!("fields.{key}"), &value)?;
            } else {
                encode_key_value(&mut text, key, &value)?;
            }
        }

        // drop the leading separator
        text.remove(0);
        text.push('\n');
        Ok(text.into_bytes())
    }
}
