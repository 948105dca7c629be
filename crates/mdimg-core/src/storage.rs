//! Disk I/O for downloaded images and rewritten documents.
//!
//! Images are written to `<final>.part` and renamed into place only once the
//! transfer is complete, so a failed download never leaves a file under the
//! final name.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// `<final_path>.part`
pub fn temp_path_for(final_path: &Path) -> PathBuf {
    let mut name = final_path.as_os_str().to_os_string();
    name.push(TEMP_SUFFIX);
    PathBuf::from(name)
}

/// Buffered writer for a temp file that becomes `final_path` on [`finalize`](Self::finalize).
pub struct PartFile {
    writer: BufWriter<File>,
    temp_path: PathBuf,
    final_path: PathBuf,
}

impl PartFile {
    /// Creates (or truncates) the temp file next to `final_path`.
    pub fn create(final_path: &Path) -> io::Result<Self> {
        let temp_path = temp_path_for(final_path);
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            temp_path,
            final_path: final_path.to_path_buf(),
        })
    }

    /// Flushes, syncs and renames the temp file to its final name.
    pub fn finalize(self) -> io::Result<()> {
        let file = self.writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        drop(file);
        fs::rename(&self.temp_path, &self.final_path)
    }

    /// Removes the temp file. Failure to remove is logged, not returned.
    pub fn discard(self) {
        let temp_path = self.temp_path;
        drop(self.writer);
        if let Err(e) = fs::remove_file(&temp_path) {
            tracing::warn!("failed to remove {}: {}", temp_path.display(), e);
        }
    }
}

impl Write for PartFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Writes a fully buffered payload through a [`PartFile`].
pub fn write_file_atomic(final_path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut part = PartFile::create(final_path)?;
    if let Err(e) = part.write_all(bytes) {
        part.discard();
        return Err(e);
    }
    part.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_appends_suffix() {
        assert_eq!(
            temp_path_for(Path::new("/a/b/img_1_0.png")),
            PathBuf::from("/a/b/img_1_0.png.part")
        );
        assert_eq!(temp_path_for(Path::new("img")), PathBuf::from("img.part"));
    }

    #[test]
    fn finalize_renames_into_place() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("a.png");
        let mut part = PartFile::create(&final_path).unwrap();
        part.write_all(b"hello").unwrap();
        assert!(temp_path_for(&final_path).exists());
        assert!(!final_path.exists());
        part.finalize().unwrap();
        assert_eq!(fs::read(&final_path).unwrap(), b"hello");
        assert!(!temp_path_for(&final_path).exists());
    }

    #[test]
    fn discard_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("a.png");
        let mut part = PartFile::create(&final_path).unwrap();
        part.write_all(b"<html>404</html>").unwrap();
        part.discard();
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn write_file_atomic_writes_payload() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("b.gif");
        write_file_atomic(&final_path, b"GIF89a").unwrap();
        assert_eq!(fs::read(&final_path).unwrap(), b"GIF89a");
    }

    #[test]
    fn create_in_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(PartFile::create(&dir.path().join("missing").join("a.png")).is_err());
    }
}
