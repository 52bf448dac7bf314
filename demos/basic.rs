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

fn main() {
    let logger = logforth_pretty::builder().build().unwrap();

    logger.debug("This is a debug message");
    logger.info("Application started successfully");
    logger.info("[Server] Listening on port 8080");
    logger.warn("This is a warning message");
    logger.error("This is an error message");
    logger.trace("hey");

    logger.with_field("user", "alice").info("User logged in");
    logger
        .with_field("duration", "150ms")
        .info("[Request] GET /api/users");

    // fields are printed sorted by key
    logger
        .with_field("user_id", 123)
        .with_field("endpoint", "/api/data")
        .with_field("method", "POST")
        .with_field("status", 200)
        .info("[API] Request completed");
}
