//! Size-rotated line writer for the span journal.
//!
//! Backups are numbered: `<file>.1` is the most recent, `<file>.N` the oldest. When the
//! live file would grow past its limit, every backup shifts up by one, the oldest is
//! dropped, and the live file becomes `<file>.1`.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Size at which the journal rotates (5 MiB).
pub const MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Number of rotated journals kept next to the live one.
pub const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe, lazily opened, size-rotated line writer.
pub struct FileWriter {
    file_path: PathBuf,
    max_bytes: u64,
    backups: usize,
    /// Open handle plus the number of bytes in the live file.
    state: Mutex<Option<(File, u64)>>,
}

impl FileWriter {
    /// Creates a writer with the default limits. Nothing is opened until the first write.
    #[must_use]
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    #[must_use]
    pub const fn with_limits(file_path: PathBuf, max_bytes: u64, backups: usize) -> Self {
        Self {
            file_path,
            max_bytes,
            backups,
            state: Mutex::new(None),
        }
    }

    /// Appends `line` and a newline, rotating first if the line would not fit.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the journal cannot be opened, rotated or
    /// written, or if the lock was poisoned.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| io::Error::other(format!("journal lock poisoned: {e}")))?;

        let incoming = line.len() as u64 + 1;
        let current = match state.as_ref() {
            Some((_, len)) => *len,
            None => fs::metadata(&self.file_path).map_or(0, |m| m.len()),
        };
        if current > 0 && current + incoming > self.max_bytes {
            *state = None;
            self.rotate()?;
        }

        if state.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)?;
            let len = file.metadata()?.len();
            *state = Some((file, len));
        }

        let (file, len) = state
            .as_mut()
            .ok_or_else(|| io::Error::other("journal not open"))?;
        writeln!(file, "{line}")?;
        file.flush()?;
        *len += incoming;
        Ok(())
    }

    /// Shifts `<file>.k` to `<file>.k+1`, dropping the oldest, then moves the live file
    /// to `<file>.1`. With zero backups the live file is simply removed.
    fn rotate(&self) -> io::Result<()> {
        if self.backups == 0 {
            return remove_if_exists(&self.file_path);
        }
        remove_if_exists(&self.backup_path(self.backups))?;
        for index in (1..self.backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        if self.file_path.exists() {
            fs::rename(&self.file_path, self.backup_path(1))?;
        }
        Ok(())
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.file_path.as_os_str().to_owned();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .field("backups", &self.backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn appends_lines_and_creates_lazily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spans.jsonl");
        let writer = FileWriter::new(path.clone());
        assert!(!path.exists());

        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"b\":2}").unwrap();
        assert_eq!(read(&path), "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn rotates_into_numbered_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spans.jsonl");
        // Each line is 4 bytes with its newline; two fit per file.
        let writer = FileWriter::with_limits(path.clone(), 8, 2);

        for line in ["aaa", "bbb", "ccc", "ddd", "eee", "fff", "ggg"] {
            writer.write_line(line).unwrap();
        }

        assert_eq!(read(&path), "ggg\n");
        assert_eq!(read(&dir.path().join("spans.jsonl.1")), "eee\nfff\n");
        assert_eq!(read(&dir.path().join("spans.jsonl.2")), "ccc\nddd\n");
        assert!(!dir.path().join("spans.jsonl.3").exists());
    }

    #[test]
    fn existing_journal_size_counts_toward_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spans.jsonl");
        fs::write(&path, "0123456\n").unwrap();

        let writer = FileWriter::with_limits(path.clone(), 10, 1);
        writer.write_line("xyz").unwrap();
        assert_eq!(read(&path), "xyz\n");
        assert_eq!(read(&dir.path().join("spans.jsonl.1")), "0123456\n");
    }

    #[test]
    fn oversized_line_still_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spans.jsonl");
        let writer = FileWriter::with_limits(path.clone(), 4, 1);
        writer.write_line("longer than the limit").unwrap();
        assert_eq!(read(&path), "longer than the limit\n");
    }
}
