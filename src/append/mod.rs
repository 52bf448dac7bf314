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

//! Dispatch log records to various targets.

use std::fmt;

use crate::Error;
use crate::Layout;
use crate::record::Record;

mod multi;
pub mod rolling_file;
mod stdio;
mod writer;

pub use self::multi::MultiWriter;
pub use self::multi::MultiWriterConfig;
pub use self::rolling_file::FileConfig;
pub use self::rolling_file::RollingFile;
pub use self::stdio::Stderr;
pub use self::stdio::Stdout;
pub use self::writer::Writer;

/// An appender that can process log records.
pub trait Append: fmt::Debug + Send + Sync + 'static {
    /// Dispatch a log record to the append target.
    fn append(&self, record: &Record) -> Result<(), Error>;

    /// Flush any buffered records.
    ///
    /// Default to a no-op.
    fn flush(&self) -> Result<(), Error> {
        Ok(())
    }
}

impl<T: Append> From<T> for Box<dyn Append> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

/// A byte-oriented output that formatted log lines are written to.
pub trait Sink: fmt::Debug + Send + Sync + 'static {
    /// Write one formatted record.
    fn write_all(&self, bytes: &[u8]) -> Result<(), Error>;

    /// Flush any buffered bytes.
    ///
    /// Default to a no-op.
    fn flush(&self) -> Result<(), Error> {
        Ok(())
    }
}

impl<T: Sink> From<T> for Box<dyn Sink> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

/// A sink bound to the layout that formats records for it.
///
/// # Examples
///
/// ```
/// use logforth_pretty::append::Destination;
/// use logforth_pretty::append::Stdout;
/// use logforth_pretty::layout::PrettyLayout;
///
/// let destination = Destination::new(Stdout::default(), PrettyLayout::default());
/// ```
#[derive(Debug)]
pub struct Destination {
    sink: Box<dyn Sink>,
    layout: Box<dyn Layout>,
}

impl Destination {
    /// Bind `sink` to `layout`.
    pub fn new(sink: impl Into<Box<dyn Sink>>, layout: impl Into<Box<dyn Layout>>) -> Self {
        Self {
            sink: sink.into(),
            layout: layout.into(),
        }
    }
}

impl Append for Destination {
    fn append(&self, record: &Record) -> Result<(), Error> {
        let bytes = self.layout.format(record)?;
        self.sink.write_all(&bytes)
    }

    fn flush(&self) -> Result<(), Error> {
        self.sink.flush()
    }
}
