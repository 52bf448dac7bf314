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
use logforth_pretty::append::FileConfig;
use logforth_pretty::config::FormatKind;
use logforth_pretty::config::OutputKind;

fn main() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("service.log");

    let logger = logforth_pretty::builder()
        .level(Level::Info)
        .output(OutputKind::File)
        .format(FormatKind::Plain)
        .file(&path)
        .file_config(FileConfig::new(1, 3, 7, true))
        .without_caller()
        .build()
        .unwrap();

    logger.info("Application started - this will be written to file");
    logger.info("[Server] Server is running");
    for i in 0..10 {
        logger.with_field("iteration", i).info("[Task] Processing item");
    }
    logger.info(format!("Application finished - check {}", path.display()));
    logger.flush();

    print!("{}", std::fs::read_to_string(&path).unwrap());
}
