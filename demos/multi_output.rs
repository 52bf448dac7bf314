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
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("service.log");

    let logger = logforth_pretty::builder()
        .level(Level::Debug)
        .output(OutputKind::Both)
        .format(FormatKind::Plain)
        .namespace("App")
        .file(&path)
        .build()
        .unwrap();

    logger.debug("[Init] Starting application with multi-output logging");
    logger.info("[Server] Server initialized");
    logger.info("[Database] Connected to PostgreSQL");
    logger.warn("[Cache] Redis connection slow");
    logger.error("[API] External API timeout");

    logger
        .with_field("user_id", 456)
        .with_field("endpoint", "/api/data")
        .with_field("method", "POST")
        .with_field("duration", "250ms")
        .info("[Request] API request completed");
    logger.flush();

    println!("\n--- {} ---", path.display());
    print!("{}", std::fs::read_to_string(&path).unwrap());
}
