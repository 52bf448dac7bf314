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
        .level(Level::Info)
        .output(OutputKind::Console)
        .format(FormatKind::Json)
        .build()
        .unwrap();

    logger.info("Application started");
    logger.with_field("version", "1.0.0").info("Build information");
    logger
        .with_field("user_id", 123)
        .with_field("action", "login")
        .with_field("ip", "192.168.1.1")
        .info("User activity");

    logger
        .with_field("error", "connection timeout")
        .error("Database connection failed");
}
