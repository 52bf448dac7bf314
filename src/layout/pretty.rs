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

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use jiff::tz::TimeZone;
use regex::Regex;

use crate::Error;
use crate::kv;
use crate::layout::Layout;
use crate::layout::TagStyle;
use crate::layout::TagStyler;
use crate::layout::color::DIM_COLOR;
use crate::layout::color::LevelColor;
use crate::layout::color::RESET;
use crate::layout::color::VALUE_COLOR;
use crate::layout::color::escape;
use crate::layout::tag::DEFAULT_FILL;
use crate::record::Level;
use crate::record::Record;

/// The tag column width used when none, or zero, is configured.
pub const DEFAULT_TAG_WIDTH: usize = 15;

// "[2006-01-02 15:04:05] "
const TIMESTAMP_WIDTH: usize = 22;
// the level name padded to 6, plus one space
const LEVEL_WIDTH: usize = 7;

/// How caller file paths are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathMode {
    /// Relative to the current working directory, e.g. `src/main.rs`.
    #[default]
    Relative,
    /// Absolute, e.g. `/home/user/project/src/main.rs`.
    Absolute,
}

/// A layout that formats log records as aligned, bracket-tagged text.
///
/// The first bracketed part of a message becomes its tag and is moved into a fixed-width column,
/// so message texts line up whether they carry a tag or not. Key-values follow the message,
/// sorted by key. The caller location goes to an indented second line for severe records.
///
/// Output format:
///
/// ```text
/// INFO   [Server]        Starting port=8080
/// WARN   [=== Init ====] Config file missing
///                        └─ at (src/main.rs:42)
/// ERROR                  Connection refused attempt=3 host=db
///                        └─ at (src/db.rs:17)
/// ```
///
/// # Examples
///
/// ```
/// use logforth_pretty::layout::PrettyLayout;
/// use logforth_pretty::layout::TagStyle;
///
/// let layout = PrettyLayout::default()
///     .with_timestamp(true)
///     .with_tag_style(TagStyle::Center, "=");
/// ```
#[derive(Debug, Clone)]
pub struct PrettyLayout {
    use_colors: bool,
    show_timestamp: bool,
    show_caller: bool,
    caller_level: Level,
    path_mode: PathMode,
    tag_width: usize,
    color_brackets: bool,
    tag_style: TagStyle,
    fill: String,
    colors: LevelColor,
    timezone: TimeZone,
    bracket: Regex,
    ansi: Regex,
}

impl Default for PrettyLayout {
    fn default() -> Self {
        Self {
            use_colors: true,
            show_timestamp: false,
            show_caller: true,
            caller_level: Level::Warn,
            path_mode: PathMode::Relative,
            tag_width: DEFAULT_TAG_WIDTH,
            color_brackets: true,
            tag_style: TagStyle::Plain,
            fill: DEFAULT_FILL.to_string(),
            colors: LevelColor::default(),
            timezone: TimeZone::system(),
            bracket: Regex::new(r"\[(.*?)\]")
                .expect("invalid tag pattern; this is a bug in logforth-pretty"),
            ansi: Regex::new(r"\x1b\[[0-9;]*[a-zA-Z]")
                .expect("invalid escape pattern; this is a bug in logforth-pretty"),
        }
    }
}

impl PrettyLayout {
    /// Enable or disable colored output. Default to `true`.
    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.use_colors = enabled;
        self
    }

    /// Enable or disable the leading `[YYYY-MM-DD HH:MM:SS]` timestamp. Default to `false`.
    pub fn with_timestamp(mut self, enabled: bool) -> Self {
        self.show_timestamp = enabled;
        self
    }

    /// Enable or disable the caller line, shown for records at `level` or more severe.
    ///
    /// Default to enabled for [`Level::Warn`] and above.
    pub fn with_caller(mut self, enabled: bool, level: Level) -> Self {
        self.show_caller = enabled;
        self.caller_level = level;
        self
    }

    /// Display caller paths relative to the working directory, or absolute. Default to relative.
    pub fn with_relative_path(mut self, enabled: bool) -> Self {
        self.path_mode = if enabled {
            PathMode::Relative
        } else {
            PathMode::Absolute
        };
        self
    }

    /// Set the width of the tag column. Zero selects [`DEFAULT_TAG_WIDTH`].
    pub fn with_tag_width(mut self, width: usize) -> Self {
        self.tag_width = width;
        self
    }

    /// Enable or disable coloring of the tag. Only effective when colors are enabled.
    pub fn with_color_brackets(mut self, enabled: bool) -> Self {
        self.color_brackets = enabled;
        self
    }

    /// Set the tag style and its fill glyph. An empty fill selects the default `•`.
    pub fn with_tag_style(mut self, style: TagStyle, fill: &str) -> Self {
        self.tag_style = style;
        self.fill = if fill.is_empty() {
            DEFAULT_FILL.to_string()
        } else {
            fill.to_string()
        };
        self
    }

    /// Customize the color of each level.
    pub fn with_level_colors(mut self, colors: LevelColor) -> Self {
        self.colors = colors;
        self
    }

    /// Set the timezone of the timestamp. Default to the system timezone.
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.timezone = tz;
        self
    }

    /// Whether colors are enabled.
    pub fn use_colors(&self) -> bool {
        self.use_colors
    }

    /// Whether the timestamp is shown.
    pub fn show_timestamp(&self) -> bool {
        self.show_timestamp
    }

    /// Whether the caller line is enabled.
    pub fn show_caller(&self) -> bool {
        self.show_caller
    }

    /// The least severe level that still shows the caller line.
    pub fn caller_level(&self) -> Level {
        self.caller_level
    }

    /// How caller paths are displayed.
    pub fn path_mode(&self) -> PathMode {
        self.path_mode
    }

    /// The effective width of the tag column.
    pub fn tag_width(&self) -> usize {
        if self.tag_width == 0 {
            DEFAULT_TAG_WIDTH
        } else {
            self.tag_width
        }
    }

    /// Whether the tag is colored when colors are enabled.
    pub fn color_brackets(&self) -> bool {
        self.color_brackets
    }

    /// The tag style.
    pub fn tag_style(&self) -> TagStyle {
        self.tag_style
    }

    /// The fill glyph of decorated tags.
    pub fn fill(&self) -> &str {
        &self.fill
    }

    fn level_name(level: Level) -> String {
        let name = level.as_str().to_uppercase();
        if name == "WARNING" {
            "WARN".to_string()
        } else {
            name
        }
    }

    fn tag_styler(&self) -> TagStyler {
        TagStyler::new(self.tag_style)
            .fill(self.fill.as_str())
            .colored(self.use_colors && self.color_brackets)
    }

    /// Split the first bracketed part off `message`, returning the tag text and the rest.
    fn split_tag<'a>(&self, message: &'a str) -> Option<(&'a str, String)> {
        let caps = self.bracket.captures(message)?;
        let m = caps.get(0)?;
        let inner = caps.get(1).map_or("", |inner| inner.as_str());
        let before = message[..m.start()].trim_end();
        let after = message[m.end()..].trim_start();
        let rest = match (before.is_empty(), after.is_empty()) {
            (true, _) => after.to_string(),
            (false, true) => before.to_string(),
            (false, false) => format!("{before} {after}"),
        };
        Some((inner, rest.trim().to_string()))
    }

    fn visible_len(&self, text: &str) -> usize {
        self.ansi.replace_all(text, "").chars().count()
    }

    fn display_path(&self, file: &str) -> String {
        let path = Path::new(file);
        let resolved = match self.path_mode {
            PathMode::Absolute => std::path::absolute(path).ok(),
            PathMode::Relative => std::env::current_dir()
                .ok()
                .and_then(|cwd| relative_to(path, &cwd)),
        };
        match resolved {
            Some(path) => path.display().to_string(),
            None => file.to_string(),
        }
    }

    fn write_fields(&self, text: &mut String, record: &Record) {
        let fields = kv::sorted(record.key_values())
            .into_iter()
            .map(|(k, v)| {
                if self.use_colors {
                    format!(
                        "{}{k}={}{v}{RESET}",
                        escape(DIM_COLOR),
                        escape(VALUE_COLOR)
                    )
                } else {
                    format!("{k}={v}")
                }
            })
            .collect::<Vec<_>>();
        text.push(' ');
        text.push_str(&fields.join(" "));
    }

    fn write_caller(&self, text: &mut String, file: &str, line: u32) {
        let mut indent = LEVEL_WIDTH + self.tag_width() + 1;
        if self.show_timestamp {
            indent += TIMESTAMP_WIDTH;
        }

        let location = format!("({}:{line})", self.display_path(file));
        text.push('\n');
        text.push_str(&" ".repeat(indent));
        text.push_str("└─ at ");
        if self.use_colors {
            text.push_str(&escape(DIM_COLOR));
            text.push_str(&location);
            text.push_str(RESET);
        } else {
            text.push_str(&location);
        }
    }
}

impl Layout for PrettyLayout {
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error> {
        let mut text = String::new();

        if self.show_timestamp {
            let time = record
                .time()
                .to_zoned(self.timezone.clone())
                .strftime("%Y-%m-%d %H:%M:%S");
            text.push_str(&format!("[{time}] "));
        }

        let level = Self::level_name(record.level());
        if self.use_colors {
            let color = escape(self.colors.color_of(record.level()));
            text.push_str(&format!("{color}{level:<6}{RESET} "));
        } else {
            text.push_str(&format!("{level:<6} "));
        }

        let width = self.tag_width();
        let (tag, message) = match self.split_tag(record.message()) {
            Some((inner, rest)) => (self.tag_styler().render(inner, width), rest),
            None => (String::new(), record.message().to_string()),
        };
        text.push_str(&tag);
        let visible = self.visible_len(&tag);
        if visible < width {
            text.push_str(&" ".repeat(width - visible));
        }
        text.push(' ');

        text.push_str(&message);
        if !record.key_values().is_empty() {
            self.write_fields(&mut text, record);
        }

        if self.show_caller && record.level() <= self.caller_level {
            if let Some(caller) = record.caller() {
                self.write_caller(&mut text, caller.file(), caller.line());
            }
        }

        text.push('\n');
        Ok(text.into_bytes())
    }
}

// lexically drop `.` and resolve `..` against the preceding component
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Express the absolute `path` relative to the absolute `base`, walking up with `..` where
/// needed. Returns `None` for relative input or when the two share no root.
fn relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    if !path.is_absolute() || !base.is_absolute() {
        return None;
    }

    let path = normalize(path);
    let base = normalize(base);
    let path = path.components().collect::<Vec<_>>();
    let base = base.components().collect::<Vec<_>>();

    let common = path
        .iter()
        .zip(base.iter())
        .take_while(|(a, b)| a == b)
        .count();
    if common == 0 {
        return None;
    }

    let mut relative = PathBuf::new();
    for _ in common..base.len() {
        relative.push("..");
    }
    for component in &path[common..] {
        relative.push(component);
    }
    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    Some(relative)
}
