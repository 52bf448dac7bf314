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

//! Resolve the runtime configuration of a logger.
//!
//! Each axis is resolved once, with strict precedence: an explicit value set on the builder, then
//! the environment variable named for that axis, then the built-in default.

use std::path::PathBuf;

use crate::append::FileConfig;
use crate::layout::PrettyLayout;
use crate::record::Level;

/// The default namespace of a logger.
pub const DEFAULT_NAMESPACE: &str = "Main";

/// The default path of the log file.
pub const DEFAULT_FILE: &str = "logs/app.log";

/// Where log lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputKind {
    /// Standard output.
    #[default]
    Console,
    /// A size-rotated log file.
    File,
    /// Both standard output, with colors, and the log file, with timestamps.
    Both,
}

/// How log lines are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatKind {
    /// Logfmt-style `key=value` text.
    #[default]
    Raw,
    /// Aligned, bracket-tagged text.
    Plain,
    /// One JSON object per line.
    Json,
}

/// Parse an output kind from an environment value.
///
/// `file` and `multi` select [`OutputKind::File`] and [`OutputKind::Both`]; anything else,
/// `console` included, selects [`OutputKind::Console`].
pub fn parse_output_kind(value: &str) -> OutputKind {
    match value.trim().to_ascii_lowercase().as_str() {
        "file" => OutputKind::File,
        "multi" => OutputKind::Both,
        _ => OutputKind::Console,
    }
}

/// Parse a format kind from an environment value.
///
/// `multi` selects [`FormatKind::Json`] and `console` selects [`FormatKind::Plain`]; anything
/// else selects [`FormatKind::Raw`].
pub fn parse_format_kind(value: &str) -> FormatKind {
    match value.trim().to_ascii_lowercase().as_str() {
        "multi" => FormatKind::Json,
        "console" => FormatKind::Plain,
        _ => FormatKind::Raw,
    }
}

/// The names of the environment variables consulted for each axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvNames {
    /// Variable of the severity threshold. Default to `LOG_LEVEL`.
    pub level: String,
    /// Variable of the output kind. Default to `LOG_OUTPUT`.
    pub output: String,
    /// Variable of the format kind. Default to `LOG_FORMAT`.
    pub format: String,
}

impl Default for EnvNames {
    fn default() -> Self {
        Self {
            level: "LOG_LEVEL".to_string(),
            output: "LOG_OUTPUT".to_string(),
            format: "LOG_FORMAT".to_string(),
        }
    }
}

/// The options set on a logger builder. Unset axes are resolved from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) level: Option<Level>,
    pub(crate) output: Option<OutputKind>,
    pub(crate) format: Option<FormatKind>,
    pub(crate) custom_layout: Option<PrettyLayout>,
    pub(crate) show_caller: bool,
    pub(crate) namespace: String,
    pub(crate) file: PathBuf,
    pub(crate) file_config: FileConfig,
    pub(crate) env_names: EnvNames,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: None,
            output: None,
            format: None,
            custom_layout: None,
            show_caller: true,
            namespace: DEFAULT_NAMESPACE.to_string(),
            file: PathBuf::from(DEFAULT_FILE),
            file_config: FileConfig::default(),
            env_names: EnvNames::default(),
        }
    }
}

impl Config {
    /// Resolve against the process environment.
    pub fn resolve(&self) -> ResolvedConfig {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolve against the environment served by `lookup`.
    ///
    /// Empty values count as unset. A malformed level is ignored.
    pub fn resolve_with<F>(&self, lookup: F) -> ResolvedConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let level = self
            .level
            .or_else(|| env(&self.env_names.level).and_then(|value| value.parse().ok()))
            .unwrap_or(Level::Info);
        let output = self
            .output
            .or_else(|| env(&self.env_names.output).map(|value| parse_output_kind(&value)))
            .unwrap_or_default();
        let format = self
            .format
            .or_else(|| env(&self.env_names.format).map(|value| parse_format_kind(&value)))
            .unwrap_or_default();

        ResolvedConfig {
            level,
            output,
            format,
            file: self.file.clone(),
            file_config: self.file_config,
            namespace: self.namespace.clone(),
            show_caller: self.show_caller,
            custom_layout: self.custom_layout.clone(),
        }
    }
}

/// The configuration a logger is built from. Never re-resolved.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The severity threshold.
    pub level: Level,
    /// Where log lines are written.
    pub output: OutputKind,
    /// How log lines are laid out. Ignored when a custom layout is set.
    pub format: FormatKind,
    /// The path of the log file.
    pub file: PathBuf,
    /// Rotation settings of the log file.
    pub file_config: FileConfig,
    /// The namespace of the logger.
    pub namespace: String,
    /// Whether the built-in layouts report the caller location.
    pub show_caller: bool,
    /// A layout used in place of the format kind.
    pub custom_layout: Option<PrettyLayout>,
}
