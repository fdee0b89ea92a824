//! Size-capped rotating log file for the diagnostic log.
//!
//! When a write would push the active file past `max_bytes`, the file is
//! shifted to `<file>.1`, older backups move up by one, and anything beyond
//! `backups` is deleted.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    file: File,
    len: u64,
}

impl RotatingFile {
    /// Open (or create) `path` in append mode.
    pub fn open(path: impl Into<PathBuf>, max_bytes: u64, backups: usize) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = open_append(&path)?;
        let len = file.metadata()?.len();
        Ok(Self {
            path,
            max_bytes,
            backups,
            file,
            len,
        })
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        if self.backups == 0 {
            self.file = File::create(&self.path)?;
            self.len = 0;
            return Ok(());
        }
        let oldest = backup_path(&self.path, self.backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.backups).rev() {
            let from = backup_path(&self.path, index);
            if from.exists() {
                fs::rename(&from, backup_path(&self.path, index + 1))?;
            }
        }
        match fs::rename(&self.path, backup_path(&self.path, 1)) {
            Ok(()) => {}
            // Active file removed underneath us; start a fresh one.
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err),
        }
        self.file = open_append(&self.path)?;
        self.len = 0;
        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.len > 0 && self.len + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        let written = self.file.write(buf)?;
        self.len += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// `listflow.log` -> `listflow.log.2`.
pub fn backup_path(path: &Path, index: usize) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".{}", index));
    path.with_file_name(name)
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Shares one [`RotatingFile`] across every writer the subscriber asks for.
#[derive(Clone)]
pub struct RotatingMakeWriter {
    file: Arc<Mutex<RotatingFile>>,
}

impl RotatingMakeWriter {
    pub fn new(file: RotatingFile) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
        }
    }
}

pub struct RotatingWriter {
    file: Arc<Mutex<RotatingFile>>,
}

impl<'a> MakeWriter<'a> for RotatingMakeWriter {
    type Writer = RotatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        RotatingWriter {
            file: self.file.clone(),
        }
    }
}

impl Write for RotatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file mutex poisoned"))?;
        file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file mutex poisoned"))?;
        file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> Vec<u8> {
        format!("{:0>9}\n", n).into_bytes()
    }

    #[test]
    fn rotates_when_cap_would_be_exceeded() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("app.log");
        let mut file = RotatingFile::open(&path, 20, 3).expect("open");
        for n in 0..3 {
            file.write_all(&line(n)).expect("write");
        }
        file.flush().expect("flush");

        assert_eq!(fs::read_to_string(&path).expect("active"), "000000002\n");
        assert_eq!(
            fs::read_to_string(backup_path(&path, 1)).expect("backup"),
            "000000000\n000000001\n"
        );
    }

    #[test]
    fn keeps_at_most_configured_backups() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("app.log");
        let mut file = RotatingFile::open(&path, 10, 2).expect("open");
        for n in 0..5 {
            file.write_all(&line(n)).expect("write");
        }
        file.flush().expect("flush");

        assert_eq!(fs::read_to_string(&path).expect("active"), "000000004\n");
        assert_eq!(
            fs::read_to_string(backup_path(&path, 1)).expect("backup 1"),
            "000000003\n"
        );
        assert_eq!(
            fs::read_to_string(backup_path(&path, 2)).expect("backup 2"),
            "000000002\n"
        );
        assert!(!backup_path(&path, 3).exists());
    }

    #[test]
    fn reopening_appends_and_counts_existing_bytes() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("app.log");
        fs::write(&path, "000000000\n").expect("seed");
        let mut file = RotatingFile::open(&path, 15, 1).expect("open");
        file.write_all(&line(1)).expect("write");
        file.flush().expect("flush");

        assert_eq!(fs::read_to_string(&path).expect("active"), "000000001\n");
        assert_eq!(
            fs::read_to_string(backup_path(&path, 1)).expect("backup"),
            "000000000\n"
        );
    }

    #[test]
    fn recovers_when_active_file_was_deleted() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("app.log");
        let mut file = RotatingFile::open(&path, 15, 2).expect("open");
        file.write_all(&line(0)).expect("write");
        fs::remove_file(&path).expect("delete active log");

        file.write_all(&line(1)).expect("write after delete");
        file.write_all(&line(2)).expect("write after reopen");
        file.flush().expect("flush");

        assert_eq!(fs::read_to_string(&path).expect("active"), "000000002\n");
        assert_eq!(
            fs::read_to_string(backup_path(&path, 1)).expect("backup"),
            "000000001\n"
        );
    }

    #[test]
    fn make_writer_shares_one_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("logs/app.log");
        let make = RotatingMakeWriter::new(RotatingFile::open(&path, 1024, 3).expect("open"));
        make.make_writer().write_all(b"one\n").expect("write");
        make.make_writer().write_all(b"two\n").expect("write");
        assert_eq!(fs::read_to_string(&path).expect("read"), "one\ntwo\n");
    }
}
