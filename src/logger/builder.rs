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

use std::path::PathBuf;

use crate::Append;
use crate::Error;
use crate::Layout;
use crate::Logger;
use crate::append::Destination;
use crate::append::FileConfig;
use crate::append::MultiWriter;
use crate::append::MultiWriterConfig;
use crate::append::RollingFile;
use crate::append::Stdout;
use crate::config::Config;
use crate::config::EnvNames;
use crate::config::FormatKind;
use crate::config::OutputKind;
use crate::config::ResolvedConfig;
use crate::layout::PrettyLayout;
use crate::record::Level;

/// Create a new [`LoggerBuilder`] with every axis left to the environment.
///
/// # Examples
///
/// ```
/// let logger = logforth_pretty::builder().namespace("Api").build().unwrap();
/// logger.info("[Server] Starting");
/// ```
pub fn builder() -> LoggerBuilder {
    LoggerBuilder {
        config: Config::default(),
    }
}

/// A builder for configuring a [`Logger`] and optionally installing it as the global logger.
///
/// Level, output and format not set on the builder are read from the environment variables named
/// by [`EnvNames`], falling back to `info`, console and raw.
///
/// # Examples
///
/// ```
/// use logforth_pretty::config::FormatKind;
/// use logforth_pretty::record::Level;
///
/// let logger = logforth_pretty::builder()
///     .level(Level::Debug)
///     .format(FormatKind::Plain)
///     .without_caller()
///     .build()
///     .unwrap();
/// ```
#[must_use = "call `apply` to set the global logger or `build` to construct a logger instance"]
#[derive(Debug)]
pub struct LoggerBuilder {
    config: Config,
}

impl LoggerBuilder {
    /// Set the severity threshold.
    pub fn level(mut self, level: Level) -> Self {
        self.config.level = Some(level);
        self
    }

    /// Set where log lines are written.
    pub fn output(mut self, output: OutputKind) -> Self {
        self.config.output = Some(output);
        self
    }

    /// Set how log lines are laid out.
    pub fn format(mut self, format: FormatKind) -> Self {
        self.config.format = Some(format);
        self
    }

    /// Lay out log lines with `layout`, bypassing the format kind.
    ///
    /// Caller reporting then follows the layout's own settings.
    pub fn custom_layout(mut self, layout: PrettyLayout) -> Self {
        self.config.custom_layout = Some(layout);
        self
    }

    /// Set the namespace. Default to `Main`.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.namespace = namespace.into();
        self
    }

    /// Set the path of the log file. Default to `logs/app.log`.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.file = path.into();
        self
    }

    /// Set the rotation settings of the log file.
    pub fn file_config(mut self, config: FileConfig) -> Self {
        self.config.file_config = config;
        self
    }

    /// Disable caller reporting of the built-in layouts.
    pub fn without_caller(mut self) -> Self {
        self.config.show_caller = false;
        self
    }

    /// Set the names of the environment variables consulted for unset axes.
    pub fn env_names(mut self, names: EnvNames) -> Self {
        self.config.env_names = names;
        self
    }

    /// Build the [`Logger`], reading unset axes from the process environment.
    ///
    /// # Errors
    ///
    /// Return an error if the output includes the log file and it cannot be opened.
    pub fn build(self) -> Result<Logger, Error> {
        self.build_with(|name| std::env::var(name).ok())
    }

    /// Build the [`Logger`], reading unset axes from the environment served by `lookup`.
    ///
    /// # Errors
    ///
    /// Return an error if the output includes the log file and it cannot be opened.
    pub fn build_with<F>(self, lookup: F) -> Result<Logger, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let resolved = self.config.resolve_with(lookup);
        let append = make_append(&resolved)?;
        let logger = Logger::new(resolved.level, resolved.namespace.as_str(), append);

        logger.debug(format!(
            "[Logger] {namespace} initialized - Level: {level}, Namespace: {namespace}",
            namespace = logger.namespace(),
            level = logger.level(),
        ));
        Ok(logger)
    }

    /// Set up the global logger of the [`log`] crate.
    ///
    /// This should be called early in the execution of a Rust program. Any log events that occur
    /// before initialization will be ignored.
    ///
    /// # Errors
    ///
    /// Return an error if the logger cannot be built or a global logger has already been set.
    ///
    /// # Examples
    ///
    /// ```
    /// if logforth_pretty::builder().try_apply().is_err() {
    ///     eprintln!("failed to set logger");
    /// }
    /// ```
    pub fn try_apply(self) -> Result<&'static Logger, Error> {
        let logger: &'static Logger = Box::leak(Box::new(self.build()?));
        log::set_logger(logger)
            .map_err(|err| Error::new("failed to set global logger").with_source(err))?;
        log::set_max_level(logger.level().to_log_level_filter());
        Ok(logger)
    }

    /// Set up the global logger of the [`log`] crate.
    ///
    /// This should be called early in the execution of a Rust program. Any log events that occur
    /// before initialization will be ignored.
    ///
    /// # Panics
    ///
    /// Panic if the logger cannot be built or the global logger has already been set.
    ///
    /// # Examples
    ///
    /// ```
    /// let logger = logforth_pretty::builder().apply();
    /// log::info!("[Server] Starting");
    /// logger.warn("[Server] No TLS certificate configured");
    /// ```
    pub fn apply(self) -> &'static Logger {
        self.try_apply()
            .expect("LoggerBuilder::apply must be called before the global logger initialized")
    }
}

fn make_append(resolved: &ResolvedConfig) -> Result<Box<dyn Append>, Error> {
    let mut base = MultiWriterConfig::new(resolved.format).with_caller(resolved.show_caller);
    if let Some(custom) = &resolved.custom_layout {
        base = base.with_custom_layout(custom.clone());
    }

    // a custom layout is used as configured unless the output is fanned out
    let layout = |use_colors: bool, show_timestamp: bool| -> Box<dyn Layout> {
        match &resolved.custom_layout {
            Some(custom) => custom.clone().into(),
            None => base.layout(use_colors, show_timestamp),
        }
    };

    let append: Box<dyn Append> = match resolved.output {
        OutputKind::Console => Destination::new(Stdout::default(), layout(true, false)).into(),
        OutputKind::File => {
            let file = RollingFile::new(&resolved.file, resolved.file_config)?;
            Destination::new(file, layout(false, true)).into()
        }
        OutputKind::Both => {
            let file = RollingFile::new(&resolved.file, resolved.file_config)?;
            MultiWriter::new(base.clone())
                .add_writer(Stdout::default(), true, false)
                .add_writer(file, false, true)
                .into()
        }
    };
    Ok(append)
}
