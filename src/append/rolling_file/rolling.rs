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

use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use flate2::Compression;
use flate2::write::GzEncoder;
use jiff::Span;
use jiff::Timestamp;
use jiff::civil::DateTime;
use jiff::tz::TimeZone;

use crate::Error;
use crate::append::rolling_file::FileConfig;
use crate::append::rolling_file::clock::Clock;
use crate::logger::handle_log_error;

const BACKUP_TIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%S";
const COMPRESS_SUFFIX: &str = ".gz";
const MEGABYTE: u64 = 1024 * 1024;

/// A writer for a size-rotated log file.
///
/// When a write would grow the file beyond the maximum size, the file is renamed to a backup
/// named after the rotation time, e.g. `app-2024-08-10T17-12-52.123.log`, and a new file is
/// opened in its place. Backups are then optionally compressed and pruned by count and age.
#[derive(Debug)]
pub struct RollingFileWriter {
    state: State,
    writer: File,
}

impl Drop for RollingFileWriter {
    fn drop(&mut self) {
        if let Err(err) = self.writer.flush() {
            let err = Error::new("failed to flush file writer on dropped").with_source(err);
            handle_log_error(&err);
        }
    }
}

impl Write for RollingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let len = buf.len() as u64;
        if let Some(max_size) = self.state.max_size {
            if len > max_size {
                return Err(io::Error::other(format!(
                    "write length {len} exceeds maximum file size {max_size}"
                )));
            }
            if self.state.current_filesize.saturating_add(len) > max_size {
                self.refresh_writer();
            }
        }

        let n = self.writer.write(buf)?;
        self.state.current_filesize += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl RollingFileWriter {
    /// Open the log file at `path`, creating missing parent directories.
    ///
    /// An existing file is appended to.
    pub fn new(path: impl Into<PathBuf>, config: FileConfig) -> Result<Self, Error> {
        Self::with_clock(path.into(), config, Clock::DefaultClock)
    }

    pub(crate) fn with_clock(
        path: PathBuf,
        config: FileConfig,
        clock: Clock,
    ) -> Result<Self, Error> {
        let (state, writer) = State::new(path, config, clock)?;
        Ok(RollingFileWriter { state, writer })
    }

    /// Rotate the log file now, regardless of its size.
    pub fn rotate(&mut self) -> Result<(), Error> {
        let file = self.state.rotate_log_writer()?;
        if let Err(err) = self.writer.flush() {
            let err = Error::new("failed to flush previous writer").with_source(err);
            handle_log_error(&err);
        }
        self.writer = file;
        self.state.current_filesize = 0;
        self.state.mill();
        Ok(())
    }

    fn refresh_writer(&mut self) {
        if let Err(err) = self.rotate() {
            let err = Error::new("failed to rotate log writer").with_source(err);
            handle_log_error(&err);
        }
    }
}

#[derive(Debug)]
struct Backup {
    filepath: PathBuf,
    timestamp: Timestamp,
    compressed: bool,
}

#[derive(Debug)]
struct State {
    filepath: PathBuf,
    log_dir: PathBuf,
    prefix: String,
    extension: Option<String>,
    current_filesize: u64,
    max_size: Option<u64>,
    max_backups: usize,
    max_age: Option<Span>,
    compress: bool,
    clock: Clock,
}

impl State {
    fn new(filepath: PathBuf, config: FileConfig, clock: Clock) -> Result<(Self, File), Error> {
        let filename = filepath
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                Error::new("log file path must name a UTF-8 file")
                    .with_context("path", filepath.display())
            })?;
        let (prefix, extension) = match filename.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (format!("{stem}-"), Some(ext.to_string())),
            _ => (format!("{filename}-"), None),
        };

        let log_dir = match filepath.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&log_dir)
            .map_err(|err| Error::new("failed to create log directory").with_source(err))?;

        let max_size = match config.max_size_mb {
            0 => None,
            n => Some(n.saturating_mul(MEGABYTE)),
        };
        let max_age = match config.max_age_days {
            0 => None,
            n => Some(Span::new().hours(24 * i64::from(n))),
        };

        let mut state = State {
            filepath,
            log_dir,
            prefix,
            extension,
            current_filesize: 0,
            max_size,
            max_backups: config.max_backups as usize,
            max_age,
            compress: config.compress,
            clock,
        };

        let file = state.open_log_writer()?;
        state.current_filesize = file
            .metadata()
            .map_err(|err| Error::new("failed to stat log file").with_source(err))?
            .len();
        Ok((state, file))
    }

    fn open_log_writer(&self) -> Result<File, Error> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.filepath)
            .map_err(|err| {
                Error::new("failed to open log file")
                    .with_context("path", self.filepath.display())
                    .with_source(err)
            })
    }

    fn backup_filename(&self, now: Timestamp) -> PathBuf {
        let time = format!(
            "{}.{:03}",
            now.strftime(BACKUP_TIME_FORMAT),
            now.subsec_millisecond()
        );
        let filename = match &self.extension {
            Some(ext) => format!("{}{time}.{ext}", self.prefix),
            None => format!("{}{time}", self.prefix),
        };
        self.log_dir.join(filename)
    }

    fn parse_backup_time(&self, filename: &str) -> Option<(Timestamp, bool)> {
        let (filename, compressed) = match filename.strip_suffix(COMPRESS_SUFFIX) {
            Some(filename) => (filename, true),
            None => (filename, false),
        };
        let time = filename.strip_prefix(&self.prefix)?;
        let time = match &self.extension {
            Some(ext) => time.strip_suffix(ext.as_str())?.strip_suffix('.')?,
            None => time,
        };

        let (secs, millis) = time.rsplit_once('.')?;
        if millis.len() != 3 {
            return None;
        }
        let millis = millis.parse::<i16>().ok()?;
        let datetime = DateTime::strptime(BACKUP_TIME_FORMAT, secs)
            .ok()?
            .with()
            .millisecond(millis)
            .build()
            .ok()?;
        let timestamp = datetime.to_zoned(TimeZone::UTC).ok()?.timestamp();
        Some((timestamp, compressed))
    }

    // newest first
    fn list_backups(&self) -> Result<Vec<Backup>, Error> {
        let read_dir = fs::read_dir(&self.log_dir).map_err(|err| {
            Error::new(format!(
                "failed to read log dir: {}",
                self.log_dir.display()
            ))
            .with_source(err)
        })?;

        let mut backups = read_dir
            .filter_map(|entry| {
                let entry = entry.ok()?;
                let metadata = entry.metadata().ok()?;
                // the writer only creates files, not directories or symlinks
                if !metadata.is_file() {
                    return None;
                }

                let filename = entry.file_name();
                let (timestamp, compressed) = self.parse_backup_time(filename.to_str()?)?;
                Some(Backup {
                    filepath: entry.path(),
                    timestamp,
                    compressed,
                })
            })
            .collect::<Vec<_>>();

        backups.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(backups)
    }

    // the first backup name not taken by a plain or compressed backup, moving one
    // millisecond forward on each collision
    fn free_backup_filename(&self) -> PathBuf {
        let mut now = self.clock.now();
        loop {
            let backup = self.backup_filename(now);
            let compressed = format!("{}{COMPRESS_SUFFIX}", backup.display());
            if !backup.exists() && !Path::new(&compressed).exists() {
                return backup;
            }
            match now.checked_add(Span::new().milliseconds(1)) {
                Ok(next) => now = next,
                Err(_) => return backup,
            }
        }
    }

    fn rotate_log_writer(&self) -> Result<File, Error> {
        let backup = self.free_backup_filename();
        fs::rename(&self.filepath, &backup).map_err(|err| {
            Error::new(format!(
                "failed to archive log: {}",
                self.filepath.display()
            ))
            .with_source(err)
        })?;
        self.open_log_writer()
    }

    /// Remove the backups beyond the count and age limits, then compress the rest.
    fn mill(&self) {
        if let Err(err) = self.mill_run() {
            let err = Error::new("failed to clean up log backups").with_source(err);
            handle_log_error(&err);
        }
    }

    fn mill_run(&self) -> Result<(), Error> {
        let mut backups = self.list_backups()?;

        let mut removals = vec![];
        if self.max_backups > 0 && backups.len() > self.max_backups {
            removals.extend(backups.split_off(self.max_backups));
        }
        if let Some(max_age) = self.max_age {
            let cutoff = self
                .clock
                .now()
                .checked_sub(max_age)
                .map_err(|err| Error::new("failed to compute backup cutoff").with_source(err))?;
            let (kept, expired) = backups
                .into_iter()
                .partition::<Vec<_>, _>(|backup| backup.timestamp >= cutoff);
            backups = kept;
            removals.extend(expired);
        }

        for backup in removals {
            let filepath = &backup.filepath;
            fs::remove_file(filepath).map_err(|err| {
                Error::new(format!("failed to remove old log: {}", filepath.display()))
                    .with_source(err)
            })?;
        }

        if self.compress {
            for backup in backups.iter().filter(|backup| !backup.compressed) {
                compress_file(&backup.filepath)?;
            }
        }

        Ok(())
    }
}

fn compress_file(path: &Path) -> Result<(), Error> {
    let compress_error = |err: io::Error| {
        Error::new(format!("failed to compress log: {}", path.display())).with_source(err)
    };

    let mut reader = File::open(path).map(BufReader::new).map_err(compress_error)?;
    let gz_path = format!("{}{COMPRESS_SUFFIX}", path.display());
    let output = File::create(&gz_path).map_err(compress_error)?;
    let mut encoder = GzEncoder::new(BufWriter::new(output), Compression::default());
    io::copy(&mut reader, &mut encoder).map_err(compress_error)?;
    encoder
        .finish()
        .and_then(|mut writer| writer.flush())
        .map_err(compress_error)?;

    fs::remove_file(path).map_err(compress_error)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Read;
    use std::io::Write;
    use std::path::Path;

    use flate2::read::GzDecoder;
    use jiff::Span;
    use jiff::Timestamp;
    use rand::Rng;
    use rand::distr::Alphanumeric;
    use tempfile::TempDir;

    use super::*;
    use crate::append::rolling_file::clock::ManualClock;

    fn start_time() -> Timestamp {
        "2024-08-10T00:00:00Z".parse().unwrap()
    }

    fn writer(dir: &Path, config: FileConfig) -> RollingFileWriter {
        let clock = Clock::ManualClock(ManualClock::new(start_time()));
        RollingFileWriter::with_clock(dir.join("app.log"), config, clock).unwrap()
    }

    fn filenames(dir: &Path) -> Vec<String> {
        let mut names = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect::<Vec<_>>();
        names.sort();
        names
    }

    fn generate_random_string(len: usize) -> String {
        let mut rng = rand::rng();
        std::iter::repeat(())
            .map(|()| rng.sample(Alphanumeric))
            .map(char::from)
            .take(len)
            .collect()
    }

    #[test]
    fn test_backup_filename() {
        let temp_dir = TempDir::new().unwrap();
        let writer = writer(temp_dir.path(), FileConfig::default());
        let now: Timestamp = "2024-08-10T17:12:52.123Z".parse().unwrap();
        let backup = writer.state.backup_filename(now);
        assert_eq!(
            backup.file_name().unwrap(),
            "app-2024-08-10T17-12-52.123.log"
        );

        let filename = backup.file_name().unwrap().to_str().unwrap();
        assert_eq!(writer.state.parse_backup_time(filename), Some((now, false)));
        let compressed = format!("{filename}.gz");
        assert_eq!(
            writer.state.parse_backup_time(&compressed),
            Some((now, true))
        );
        assert_eq!(writer.state.parse_backup_time("app.log"), None);
        assert_eq!(writer.state.parse_backup_time("other-2024.log"), None);
    }

    #[test]
    fn test_rotation_on_size() {
        let temp_dir = TempDir::new().unwrap();
        let config = FileConfig::new(1, 10, 0, false);
        let mut writer = writer(temp_dir.path(), config);

        let chunk = generate_random_string(300 * 1024);
        for _ in 0..3 {
            writer.write_all(chunk.as_bytes()).unwrap();
        }
        assert_eq!(filenames(temp_dir.path()), vec!["app.log"]);
        assert_eq!(writer.state.current_filesize, 900 * 1024);

        writer.state.clock.advance(Span::new().seconds(1));
        writer.write_all(chunk.as_bytes()).unwrap();
        writer.flush().unwrap();
        assert_eq!(
            filenames(temp_dir.path()),
            vec!["app-2024-08-10T00-00-01.000.log", "app.log"]
        );
        assert_eq!(writer.state.current_filesize, 300 * 1024);
        let backup = temp_dir.path().join("app-2024-08-10T00-00-01.000.log");
        assert_eq!(fs::metadata(backup).unwrap().len(), 900 * 1024);
    }

    #[test]
    fn test_rotations_within_one_millisecond_keep_both_backups() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = writer(temp_dir.path(), FileConfig::new(1, 5, 0, true));

        writer.write_all(b"first\n").unwrap();
        writer.rotate().unwrap();
        writer.write_all(b"second\n").unwrap();
        writer.rotate().unwrap();
        writer.write_all(b"third\n").unwrap();
        writer.rotate().unwrap();
        assert_eq!(
            filenames(temp_dir.path()),
            vec![
                "app-2024-08-10T00-00-00.000.log.gz",
                "app-2024-08-10T00-00-00.001.log.gz",
                "app-2024-08-10T00-00-00.002.log.gz",
                "app.log",
            ]
        );

        let gz = fs::File::open(temp_dir.path().join("app-2024-08-10T00-00-00.000.log.gz")).unwrap();
        let mut content = String::new();
        GzDecoder::new(gz).read_to_string(&mut content).unwrap();
        assert_eq!(content, "first\n");
    }

    #[test]
    fn test_huge_max_size_saturates() {
        let temp_dir = TempDir::new().unwrap();
        let writer = writer(temp_dir.path(), FileConfig::new(u64::MAX, 1, 0, false));
        assert_eq!(writer.state.max_size, Some(u64::MAX));
    }

    #[test]
    fn test_oversized_write_fails() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = writer(temp_dir.path(), FileConfig::new(1, 1, 0, false));
        let chunk = vec![b'x'; 1024 * 1024 + 1];
        assert!(writer.write(&chunk).is_err());
    }

    #[test]
    fn test_max_backups() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = writer(temp_dir.path(), FileConfig::new(1, 2, 0, false));

        for _ in 0..5 {
            writer.write_all(b"hello\n").unwrap();
            writer.state.clock.advance(Span::new().seconds(1));
            writer.rotate().unwrap();
        }
        assert_eq!(
            filenames(temp_dir.path()),
            vec![
                "app-2024-08-10T00-00-04.000.log",
                "app-2024-08-10T00-00-05.000.log",
                "app.log",
            ]
        );
    }

    #[test]
    fn test_max_age() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = writer(temp_dir.path(), FileConfig::new(1, 0, 2, false));

        writer.write_all(b"old\n").unwrap();
        writer.rotate().unwrap();
        writer.state.clock.advance(Span::new().hours(24));
        writer.write_all(b"recent\n").unwrap();
        writer.rotate().unwrap();
        assert_eq!(filenames(temp_dir.path()).len(), 3);

        writer.state.clock.advance(Span::new().hours(25));
        writer.write_all(b"current\n").unwrap();
        writer.rotate().unwrap();
        assert_eq!(
            filenames(temp_dir.path()),
            vec![
                "app-2024-08-11T00-00-00.000.log",
                "app-2024-08-12T01-00-00.000.log",
                "app.log",
            ]
        );
    }

    #[test]
    fn test_compress_backups() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = writer(temp_dir.path(), FileConfig::new(1, 5, 0, true));

        writer.write_all(b"first line\n").unwrap();
        writer.rotate().unwrap();
        writer.write_all(b"second line\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(
            filenames(temp_dir.path()),
            vec!["app-2024-08-10T00-00-00.000.log.gz", "app.log"]
        );

        let gz = fs::File::open(temp_dir.path().join("app-2024-08-10T00-00-00.000.log.gz")).unwrap();
        let mut content = String::new();
        GzDecoder::new(gz).read_to_string(&mut content).unwrap();
        assert_eq!(content, "first line\n");

        let current = fs::read_to_string(temp_dir.path().join("app.log")).unwrap();
        assert_eq!(current, "second line\n");
    }

    #[test]
    fn test_reopen_appends() {
        let temp_dir = TempDir::new().unwrap();
        {
            let mut writer = writer(temp_dir.path(), FileConfig::default());
            writer.write_all(b"one\n").unwrap();
        }
        let mut writer = writer(temp_dir.path(), FileConfig::default());
        assert_eq!(writer.state.current_filesize, 4);
        writer.write_all(b"two\n").unwrap();
        writer.flush().unwrap();
        let content = fs::read_to_string(temp_dir.path().join("app.log")).unwrap();
        assert_eq!(content, "one\ntwo\n");
    }

    #[test]
    fn test_nested_directory_is_created() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("logs").join("nested").join("service.log");
        let mut writer = RollingFileWriter::new(&path, FileConfig::default()).unwrap();
        writer.write_all(b"hello\n").unwrap();
        writer.flush().unwrap();
        assert!(path.exists());
    }
}
