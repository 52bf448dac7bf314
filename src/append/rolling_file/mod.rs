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

//! A sink that writes log lines to a size-rotated file.
//!
//! # Example
//!
//! ```
//! use logforth_pretty::append::rolling_file::FileConfig;
//! use logforth_pretty::append::rolling_file::RollingFile;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let config = FileConfig::new(10, 5, 31, true);
//! let sink = RollingFile::new(dir.path().join("app.log"), config).unwrap();
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::MutexGuard;

pub use self::rolling::RollingFileWriter;
use crate::Error;
use crate::append::Sink;

mod clock;
mod rolling;

/// Rotation settings of a log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileConfig {
    /// Maximum size in megabytes before the file is rotated. Zero disables rotation.
    pub max_size_mb: u64,
    /// Maximum number of backups to retain. Zero retains all.
    pub max_backups: u32,
    /// Maximum age in days of a backup. Zero disables expiry.
    pub max_age_days: u32,
    /// Whether rotated backups are gzip-compressed.
    pub compress: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            max_size_mb: 10,
            max_backups: 5,
            max_age_days: 31,
            compress: true,
        }
    }
}

impl FileConfig {
    /// Create a rotation config.
    pub fn new(max_size_mb: u64, max_backups: u32, max_age_days: u32, compress: bool) -> Self {
        Self {
            max_size_mb,
            max_backups,
            max_age_days,
            compress,
        }
    }
}

/// A sink that writes log lines to a size-rotated file.
#[derive(Debug)]
pub struct RollingFile {
    writer: Mutex<RollingFileWriter>,
}

impl RollingFile {
    /// Open the log file at `path`.
    ///
    /// # Errors
    ///
    /// Return an error if either:
    ///
    /// * The parent directory cannot be created.
    /// * The file cannot be opened for appending.
    pub fn new(path: impl Into<PathBuf>, config: FileConfig) -> Result<Self, Error> {
        let writer = RollingFileWriter::new(path, config)?;
        Ok(Self {
            writer: Mutex::new(writer),
        })
    }

    fn writer(&self) -> MutexGuard<'_, RollingFileWriter> {
        self.writer.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Sink for RollingFile {
    fn write_all(&self, bytes: &[u8]) -> Result<(), Error> {
        let mut writer = self.writer();
        writer.write_all(bytes).map_err(Error::from_io_error)
    }

    fn flush(&self) -> Result<(), Error> {
        let mut writer = self.writer();
        writer.flush().map_err(Error::from_io_error)
    }
}

impl Drop for RollingFile {
    fn drop(&mut self) {
        let writer = self.writer.get_mut().unwrap_or_else(|e| e.into_inner());
        let _ = writer.flush();
    }
}
