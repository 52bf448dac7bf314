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

use std::fmt;
use std::io::Write;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::Error;
use crate::append::Sink;

/// A sink over any [`Write`] implementation, serialized through a mutex.
///
/// # Examples
///
/// ```
/// use logforth_pretty::append::Writer;
///
/// let sink = Writer::new(Vec::<u8>::new());
/// ```
pub struct Writer<W> {
    writer: Mutex<W>,
}

impl<W> fmt::Debug for Writer<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Writer").finish_non_exhaustive()
    }
}

impl<W: Write + Send + 'static> Writer<W> {
    /// Wrap `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consume the sink, returning the inner writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn writer(&self) -> MutexGuard<'_, W> {
        self.writer.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write + Send + 'static> Sink for Writer<W> {
    fn write_all(&self, bytes: &[u8]) -> Result<(), Error> {
        self.writer().write_all(bytes).map_err(Error::from_io_error)
    }

    fn flush(&self) -> Result<(), Error> {
        self.writer().flush().map_err(Error::from_io_error)
    }
}
