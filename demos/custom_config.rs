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

use logforth_pretty::Level;
use logforth_pretty::config::FormatKind;
use logforth_pretty::config::OutputKind;

fn main() {
    let logger = logforth_pretty::builder()
        .level(Level::Debug)
        .output(OutputKind::Console)
        .format(FormatKind::Plain)
        .build()
        .unwrap();

    logger.debug("[Init] Initializing application");
    logger.info("[Config] Configuration loaded");
    logger.info("[Database] Connected to database");
    logger.warn("[Cache] Cache miss for key: user:123");
    logger.error("[API] Failed to connect to external service");

    let dir = tempfile::tempdir().unwrap();
    let orders = logforth_pretty::builder()
        .level(Level::Debug)
        .output(OutputKind::Both)
        .format(FormatKind::Plain)
        .namespace("Orders")
        .file(dir.path().join("orders.log"))
        .build()
        .unwrap();

    orders
        .with_field("id", "123")
        .with_field("userId", "12345")
        .info("[Order] New order!");
    orders.flush();
}
