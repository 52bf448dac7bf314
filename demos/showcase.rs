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
use logforth_pretty::Logger;
use logforth_pretty::append::Destination;
use logforth_pretty::append::Stdout;
use logforth_pretty::config::FormatKind;
use logforth_pretty::config::OutputKind;
use logforth_pretty::layout::PrettyLayout;
use logforth_pretty::layout::TagStyle;

fn console(level: Level, layout: PrettyLayout) -> Logger {
    Logger::new(level, "Showcase", Destination::new(Stdout::default(), layout))
}

fn tour(logger: &Logger) {
    logger.debug("[Init] Initializing application");
    logger.info("[Server] Starting HTTP server on port 8080");
    logger.info("[Database] Connection pool established");
    logger
        .with_field("host", "localhost")
        .with_field("port", 5432)
        .info("[DB] Connected to PostgreSQL");
    logger.warn("[API] Rate limit approaching threshold");
    logger
        .with_field("user", "admin")
        .with_field("error", "invalid token")
        .error("[Auth] Authentication failed");
}

fn main() {
    let layout = PrettyLayout::default()
        .with_colors(true)
        .with_caller(true, Level::Warn)
        .with_tag_width(16)
        .with_color_brackets(true);

    println!("=== Plain tags ===\n");
    tour(&console(
        Level::Debug,
        layout.clone().with_tag_style(TagStyle::Plain, "·"),
    ));

    println!("\n=== Centered tags ===\n");
    tour(&console(
        Level::Debug,
        layout.clone().with_tag_style(TagStyle::Center, " "),
    ));

    println!("\n=== Fill glyphs ===\n");
    for (fill, name) in [("=", "Equals"), ("-", "Dash"), ("·", "Middle Dot"), ("•", "Bullet")] {
        println!("--- {name} ({fill}) ---");
        let logger = console(
            Level::Info,
            layout.clone().with_tag_style(TagStyle::Center, fill),
        );
        logger.info("[Init] Application started");
        logger.info("[Server] Listening on :8080");
        println!();
    }

    println!("=== Alignment ===\n");
    let logger = console(
        Level::Info,
        layout.clone().with_tag_style(TagStyle::Center, " "),
    );
    logger.info("[DB] Short tag");
    logger.info("[Server] Medium tag");
    logger.info("[Application] Longer tag");
    logger.info("[Initialize] Even longer tag");
    logger
        .with_field("duration", "125ms")
        .with_field("status", "success")
        .info("[API] With structured fields");
    logger.warn("[Cache] Warning with caller info shown below");
    logger.error("[Critical] Error with caller info shown below");

    println!("\n=== Right-padded tags, console and file ===\n");
    let dir = tempfile::tempdir().unwrap();
    let right = logforth_pretty::builder()
        .level(Level::Debug)
        .output(OutputKind::Both)
        .format(FormatKind::Plain)
        .custom_layout(
            layout
                .with_tag_width(10)
                .with_tag_style(TagStyle::Right, "_"),
        )
        .file(dir.path().join("service.log"))
        .build()
        .unwrap();
    tour(&right);
    right.flush();
}
