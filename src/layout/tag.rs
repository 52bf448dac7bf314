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

//! Bracketed tag decoration.

use crate::layout::color::DIM_COLOR;
use crate::layout::color::RESET;
use crate::layout::color::TAG_COLOR;
use crate::layout::color::escape;

/// The default glyph used to fill decorated tags.
pub const DEFAULT_FILL: &str = "•";

/// How a bracketed tag is laid out within the tag column.
///
/// ```text
/// Plain:  [Auth]
/// Center: [••• Auth ••••]
/// Right:  [Auth]•••••••
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagStyle {
    /// The tag as is.
    #[default]
    Plain,
    /// The tag centered between two runs of fill, one space on each side of the text.
    Center,
    /// The tag followed by a run of fill and one space.
    Right,
}

/// Renders the inner text of a tag into its decorated, bracketed form.
///
/// # Examples
///
/// ```
/// use logforth_pretty::layout::TagStyle;
/// use logforth_pretty::layout::TagStyler;
///
/// let styler = TagStyler::new(TagStyle::Center).fill("=");
/// assert_eq!(styler.render("Init", 15), "[=== Init ====]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagStyler {
    style: TagStyle,
    fill: String,
    colored: bool,
}

impl Default for TagStyler {
    fn default() -> Self {
        Self::new(TagStyle::Plain)
    }
}

impl TagStyler {
    /// Create a styler of the given style with the default fill and no colors.
    pub fn new(style: TagStyle) -> Self {
        Self {
            style,
            fill: DEFAULT_FILL.to_string(),
            colored: false,
        }
    }

    /// Set the fill glyph. An empty string selects [`DEFAULT_FILL`].
    pub fn fill(mut self, fill: impl Into<String>) -> Self {
        let fill = fill.into();
        self.fill = if fill.is_empty() {
            DEFAULT_FILL.to_string()
        } else {
            fill
        };
        self
    }

    /// Wrap the tag in the accent color and the fill in the dim color.
    pub fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// The tag style.
    pub fn style(&self) -> TagStyle {
        self.style
    }

    /// Render `inner` within a column of `width` characters, brackets included.
    ///
    /// Falls back to the plain form when the column has no room left for the decoration.
    pub fn render(&self, inner: &str, width: usize) -> String {
        let len = inner.chars().count();
        let available = width.saturating_sub(2);

        match self.style {
            TagStyle::Center if len + 2 < available => {
                let fill = available - len - 2;
                let left = fill / 2;
                let right = fill - left;
                self.center(inner, left, right)
            }
            TagStyle::Right if len + 1 < available => {
                let fill = available - len - 1;
                self.right(inner, fill)
            }
            _ => self.plain(inner),
        }
    }

    fn plain(&self, inner: &str) -> String {
        if self.colored {
            format!("{}[{inner}]{RESET}", escape(TAG_COLOR))
        } else {
            format!("[{inner}]")
        }
    }

    fn center(&self, inner: &str, left: usize, right: usize) -> String {
        let left = self.fill.repeat(left);
        let right = self.fill.repeat(right);
        if self.colored {
            let tag = escape(TAG_COLOR);
            let dim = escape(DIM_COLOR);
            format!("{tag}[{dim}{left}{tag} {inner} {dim}{right}{tag}]{RESET}")
        } else {
            format!("[{left} {inner} {right}]")
        }
    }

    fn right(&self, inner: &str, fill: usize) -> String {
        let fill = self.fill.repeat(fill);
        if self.colored {
            let tag = escape(TAG_COLOR);
            let dim = escape(DIM_COLOR);
            format!("{tag}[{inner}]{dim}{fill}{tag} {RESET}")
        } else {
            format!("[{inner}]{fill} ")
        }
    }
}
