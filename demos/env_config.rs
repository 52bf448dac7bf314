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

use std::collections::HashMap;

fn main() {
    // values from the process environment win over these
    let defaults = HashMap::from([
        ("LOG_LEVEL", "debug"),
        ("LOG_OUTPUT", "console"),
        ("LOG_FORMAT", "console"),
    ]);
    let lookup = |name: &str| {
        std::env::var(name)
            .ok()
            .or_else(|| defaults.get(name).map(|value| value.to_string()))
    };

    let logger = logforth_pretty::builder().build_with(&lookup).unwrap();

    logger.debug("[Env] Logger configured via environment variables");
    for name in ["LOG_LEVEL", "LOG_OUTPUT", "LOG_FORMAT"] {
        let value = lookup(name).unwrap_or_default();
        logger.info(format!("[Env] {name}={value}"));
    }
}
