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

//! A pretty-printing logging backend for the [`log`] crate.
//!
//! # Overview
//!
//! Log lines are rewritten into an aligned layout: the first bracketed part of a message becomes
//! a tag in a fixed-width column, key-values follow the message in sorted order, and the caller
//! location of severe records is printed on an indented second line. Output goes to the console,
//! a size-rotated file, or both, each destination formatted on its own.
//!
//! ```text
//! INFO   [Server]        Starting port=8080
//! WARN   [Cache]         Eviction rate high ratio=0.4
//!                        └─ at (src/cache.rs:88)
//! ```
//!
//! Level, output and format can be set on the builder or through the `LOG_LEVEL`, `LOG_OUTPUT`
//! and `LOG_FORMAT` environment variables.
//!
//! # Examples
//!
//! Simple setup reading the environment:
//!
//! ```
//! logforth_pretty::builder().apply();
//!
//! log::info!("[Server] This is an info message.");
//! ```
//!
//! Explicit setup with a decorated tag column:
//!
//! ```
//! use logforth_pretty::config::FormatKind;
//! use logforth_pretty::config::OutputKind;
//! use logforth_pretty::layout::PrettyLayout;
//! use logforth_pretty::layout::TagStyle;
//! use logforth_pretty::record::Level;
//!
//! let logger = logforth_pretty::builder()
//!     .level(Level::Debug)
//!     .output(OutputKind::Console)
//!     .format(FormatKind::Plain)
//!     .custom_layout(PrettyLayout::default().with_tag_style(TagStyle::Center, "="))
//!     .build()
//!     .unwrap();
//!
//! logger.with_field("user", "alice").info("[Auth] Login succeeded");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
pub mod config;
pub mod kv;
pub mod layout;
pub mod record;

mod error;
pub use error::Error;

mod logger;
pub use logger::Entry;
pub use logger::Logger;
pub use logger::LoggerBuilder;
pub use logger::builder;

pub use append::Append;
pub use layout::Layout;
pub use record::Level;
pub use record::Record;
