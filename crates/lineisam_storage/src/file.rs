//! File-based storage backend.

use crate::backend::StorageBackend;
use crate::error::{StorageError, StorageResult};
use parking_lot::{Mutex, RwLock};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

/// A file-based storage backend.
///
/// A backend is either opened for reading ([`FileBackend::open`]) or created
/// for writing ([`FileBackend::create`]). The file handle is closed when the
/// backend is dropped, on every exit path of the caller.
///
/// # Example
///
/// ```no_run
/// use lineisam_storage::{StorageBackend, FileBackend};
/// use std::path::Path;
///
/// let mut index = FileBackend::create(Path::new("data.idx")).unwrap();
/// index.append(b"apple,").unwrap();
/// index.sync().unwrap();
/// ```
#[derive(Debug)]
pub struct FileBackend {
    file: Mutex<File>,
    size: RwLock<u64>,
    writable: bool,
}

impl FileBackend {
    /// Opens an existing file for reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be opened.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let file = OpenOptions::new().read(true).open(path)?;
        let size = file.metadata()?.len();

        Ok(Self {
            file: Mutex::new(file),
            size: RwLock::new(size),
            writable: false,
        })
    }

    /// Creates a file for writing, truncating it if it already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn create(path: &Path) -> StorageResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            file: Mutex::new(file),
            size: RwLock::new(0),
            writable: true,
        })
    }
}

impl StorageBackend for FileBackend {
    fn read_at(&self, offset: u64, len: usize) -> StorageResult<Vec<u8>> {
        let size = *self.size.read();
        let end = offset.saturating_add(len as u64);

        if offset > size || end > size {
            return Err(StorageError::ReadPastEnd { offset, len, size });
        }

        if len == 0 {
            return Ok(Vec::new());
        }

        let mut file = self.file.lock();
        file.seek(SeekFrom::Start(offset))?;

        let mut buffer = vec![0u8; len];
        file.read_exact(&mut buffer)?;

        Ok(buffer)
    }

    fn append(&mut self, data: &[u8]) -> StorageResult<u64> {
        if !self.writable {
            return Err(StorageError::ReadOnly);
        }
        if data.is_empty() {
            return Ok(*self.size.read());
        }

        let mut file = self.file.lock();
        let mut size = self.size.write();

        let offset = *size;
        file.seek(SeekFrom::End(0))?;
        file.write_all(data)?;
        *size += data.len() as u64;

        Ok(offset)
    }

    fn flush(&mut self) -> StorageResult<()> {
        if self.writable {
            self.file.lock().flush()?;
        }
        Ok(())
    }

    fn size(&self) -> StorageResult<u64> {
        Ok(*self.size.read())
    }

    fn sync(&mut self) -> StorageResult<()> {
        if self.writable {
            self.file.lock().sync_all()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_create_new() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.idx");

        let backend = FileBackend::create(&path).unwrap();
        assert_eq!(backend.size().unwrap(), 0);
        assert!(path.exists());
    }

    #[test]
    fn file_create_truncates_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.idx");
        std::fs::write(&path, b"stale index bytes").unwrap();

        let backend = FileBackend::create(&path).unwrap();
        assert_eq!(backend.size().unwrap(), 0);
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
    }

    #[test]
    fn file_append_and_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.idx");

        let mut backend = FileBackend::create(&path).unwrap();

        let offset1 = backend.append(b"hello").unwrap();
        assert_eq!(offset1, 0);

        let offset2 = backend.append(b" world").unwrap();
        assert_eq!(offset2, 5);

        assert_eq!(backend.size().unwrap(), 11);
        assert_eq!(&backend.read_at(0, 11).unwrap(), b"hello world");
        assert_eq!(&backend.read_at(6, 5).unwrap(), b"world");
    }

    #[test]
    fn file_open_reads_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.txt");
        std::fs::write(&path, b"apple,1\nbanana,2\n").unwrap();

        let backend = FileBackend::open(&path).unwrap();
        assert_eq!(backend.size().unwrap(), 17);
        assert_eq!(&backend.read_at(8, 6).unwrap(), b"banana");
    }

    #[test]
    fn file_open_missing_fails() {
        let dir = tempdir().unwrap();
        let result = FileBackend::open(&dir.path().join("missing.txt"));
        assert!(matches!(result, Err(StorageError::Io(_))));
    }

    #[test]
    fn file_open_is_read_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.txt");
        std::fs::write(&path, b"x\n").unwrap();

        let mut backend = FileBackend::open(&path).unwrap();
        assert!(matches!(backend.append(b"y"), Err(StorageError::ReadOnly)));
        assert_eq!(std::fs::read(&path).unwrap(), b"x\n");
    }

    #[test]
    fn file_read_past_end_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.idx");

        let mut backend = FileBackend::create(&path).unwrap();
        backend.append(b"hello").unwrap();

        let result = backend.read_at(10, 5);
        assert!(matches!(result, Err(StorageError::ReadPastEnd { .. })));

        let result = backend.read_at(3, 5);
        assert!(matches!(result, Err(StorageError::ReadPastEnd { .. })));
    }

    #[test]
    fn file_persistence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.idx");

        {
            let mut backend = FileBackend::create(&path).unwrap();
            backend.append(b"persistent data").unwrap();
            backend.sync().unwrap();
        }

        {
            let backend = FileBackend::open(&path).unwrap();
            assert_eq!(backend.size().unwrap(), 15);
            assert_eq!(&backend.read_at(0, 15).unwrap(), b"persistent data");
        }
    }

    #[test]
    fn file_empty_append_and_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.idx");

        let mut backend = FileBackend::create(&path).unwrap();
        backend.append(b"x").unwrap();
        assert_eq!(backend.append(b"").unwrap(), 1);
        assert!(backend.read_at(1, 0).unwrap().is_empty());
    }
}
