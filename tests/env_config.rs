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
use std::fs;

use logforth_pretty::config::EnvNames;
use logforth_pretty::record::Level;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect::<HashMap<_, _>>();
    move |name: &str| vars.get(name).cloned()
}

#[test]
fn test_file_output_from_environment() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("service.log");

    let logger = logforth_pretty::builder()
        .file(&path)
        .build_with(env(&[
            ("LOG_LEVEL", " Warning "),
            ("LOG_OUTPUT", "FILE"),
            ("LOG_FORMAT", "console"),
        ]))
        .unwrap();
    assert_eq!(logger.level(), Level::Warn);

    logger.info("[Api] filtered out");
    logger.with_field("path", "/health").warn("[Api] Slow request");
    logger.flush();

    let content = fs::read_to_string(&path).unwrap();
    assert!(!content.contains("filtered out"));
    assert!(!content.contains("initialized"));
    assert!(content.contains("WARN   [Api]"));
    assert!(content.contains("Slow request path=/health"));
    assert!(content.contains("└─ at (tests/env_config.rs:"));
}

#[test]
fn test_raw_json_and_fan_out_from_environment() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("fan_out.log");

    let logger = logforth_pretty::builder()
        .file(&path)
        .env_names(EnvNames {
            level: "SVC_LEVEL".to_string(),
            output: "SVC_OUTPUT".to_string(),
            format: "SVC_FORMAT".to_string(),
        })
        .build_with(env(&[
            ("SVC_LEVEL", "debug"),
            ("SVC_OUTPUT", "multi"),
            ("SVC_FORMAT", "multi"),
        ]))
        .unwrap();
    logger.with_field("job", "nightly").info("Export finished");
    logger.flush();

    let content = fs::read_to_string(&path).unwrap();
    let lines = content
        .lines()
        .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap())
        .collect::<Vec<_>>();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["level"], "debug");
    assert_eq!(
        lines[0]["msg"],
        "[Logger] Main initialized - Level: debug, Namespace: Main"
    );
    assert_eq!(lines[1]["msg"], "Export finished");
    assert_eq!(lines[1]["job"], "nightly");
}

#[test]
fn test_unknown_values_fall_back() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("raw.log");

    let logger = logforth_pretty::builder()
        .file(&path)
        .output(logforth_pretty::config::OutputKind::File)
        .build_with(env(&[("LOG_LEVEL", "verbose"), ("LOG_FORMAT", "yaml")]))
        .unwrap();
    assert_eq!(logger.level(), Level::Info);

    logger.info("plain text");
    logger.flush();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("time="));
    assert!(content.contains(" level=info msg=\"plain text\""));
}
