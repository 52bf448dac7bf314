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

//! Color utilities.
//!
//! Escape sequences are written unconditionally once a layout enables colors. Whether a
//! destination is a terminal is decided when the destination is bound, not per line.

use colored::Color;

use crate::record::Level;

/// Resets all attributes.
pub const RESET: &str = "\x1b[0m";

/// Color of bracketed tags.
pub const TAG_COLOR: Color = Color::Yellow;

/// Color of decorations: tag fill, field keys and caller locations.
pub const DIM_COLOR: Color = Color::AnsiColor(242);

/// Color of field values.
pub const VALUE_COLOR: Color = Color::BrightBlack;

/// Return the foreground escape sequence of `color`.
pub fn escape(color: Color) -> String {
    format!("\x1b[{}m", color.to_fg_str())
}

/// Wrap `text` in the foreground `color`, followed by a reset.
pub fn paint(color: Color, text: &str) -> String {
    format!("{}{text}{RESET}", escape(color))
}

/// Colors for different log levels.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelColor {
    /// Color for panic level logs.
    pub panic: Color,
    /// Color for fatal level logs.
    pub fatal: Color,
    /// Color for error level logs.
    pub error: Color,
    /// Color for warning level logs.
    pub warn: Color,
    /// Color for info level logs.
    pub info: Color,
    /// Color for debug level logs.
    pub debug: Color,
    /// Color for trace level logs.
    pub trace: Color,
}

impl Default for LevelColor {
    fn default() -> Self {
        Self {
            panic: Color::Magenta,
            fatal: Color::Magenta,
            error: Color::Red,
            warn: Color::Yellow,
            info: Color::Green,
            debug: Color::Cyan,
            trace: Color::Cyan,
        }
    }
}

impl LevelColor {
    /// The color of the given level.
    pub fn color_of(&self, level: Level) -> Color {
        match level {
            Level::Panic => self.panic,
            Level::Fatal => self.fatal,
            Level::Error => self.error,
            Level::Warn => self.warn,
            Level::Info => self.info,
            Level::Debug => self.debug,
            Level::Trace => self.trace,
        }
    }
}
