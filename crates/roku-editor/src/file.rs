//! Loading and saving documents.
//!
//! Files are plain bytes split on `\n`. A trailing `\r` on each line is
//! dropped so CRLF files open cleanly; saving always writes `\n`. Bytes are
//! never decoded, so any encoding survives a load/save cycle untouched
//! apart from line endings.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::error::Result;
use crate::row_store::RowStore;

/// Read `path` into a clean [`RowStore`].
///
/// A missing file is an empty document, so `roku new.txt` starts editing a
/// file that does not exist yet.
///
/// # Errors
///
/// Any I/O error other than "not found".
pub fn load(path: &Path, tab_stop: usize) -> Result<RowStore> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "new file");
            return Ok(RowStore::new(tab_stop));
        }
        Err(err) => return Err(err.into()),
    };

    let store = RowStore::from_lines(split_lines(&bytes), tab_stop);
    tracing::info!(path = %path.display(), rows = store.len(), "file opened");
    Ok(store)
}

/// Split file contents into lines without their terminators.
///
/// A final line without a newline still counts; a trailing newline does
/// not start an extra empty line.
#[must_use]
pub fn split_lines(bytes: &[u8]) -> Vec<Vec<u8>> {
    if bytes.is_empty() {
        return Vec::new();
    }
    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    body.split(|&b| b == b'\n')
        .map(|line| {
            let end = line
                .iter()
                .rposition(|&b| b != b'\r' && b != b'\n')
                .map_or(0, |i| i + 1);
            line[..end].to_vec()
        })
        .collect()
}

/// Write the document to `path`, truncating any previous content.
///
/// Creates the file with mode 0644 on unix. Returns the number of bytes
/// written. The dirty counter is left alone; the caller resets it once the
/// write is known to have succeeded.
///
/// # Errors
///
/// Any I/O error opening or writing the file.
pub fn save(store: &RowStore, path: &Path) -> Result<usize> {
    let text = store.to_text();

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }

    let mut file = options.open(path)?;
    file.write_all(&text)?;
    file.flush()?;

    tracing::info!(path = %path.display(), bytes = text.len(), "file saved");
    Ok(text.len())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EditorError;
    use pretty_assertions::assert_eq;

    fn lines(v: &[&str]) -> Vec<Vec<u8>> {
        v.iter().map(|s| s.as_bytes().to_vec()).collect()
    }

    // -- split_lines --------------------------------------------------------

    #[test]
    fn split_plain() {
        assert_eq!(split_lines(b"a\nb\n"), lines(&["a", "b"]));
    }

    #[test]
    fn split_without_trailing_newline() {
        assert_eq!(split_lines(b"a\nb"), lines(&["a", "b"]));
    }

    #[test]
    fn split_strips_carriage_returns() {
        assert_eq!(split_lines(b"a\r\nb\r\n"), lines(&["a", "b"]));
    }

    #[test]
    fn split_keeps_blank_lines() {
        assert_eq!(split_lines(b"a\n\n\nb\n"), lines(&["a", "", "", "b"]));
        assert_eq!(split_lines(b"\n"), lines(&[""]));
    }

    #[test]
    fn split_empty() {
        assert!(split_lines(b"").is_empty());
    }

    // -- load / save --------------------------------------------------------

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roundtrip.txt");

        let mut store = RowStore::from_lines(["hello", "\tworld"], 8);
        store.insert_char(0, 5, b'!');
        let written = save(&store, &path).unwrap();

        assert_eq!(written, 14);
        assert_eq!(fs::read(&path).unwrap(), b"hello!\n\tworld\n");
        assert!(store.is_dirty());

        let loaded = load(&path, 8).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.row(1).unwrap().render(), b"        world");
        assert!(!loaded.is_dirty());
    }

    #[test]
    fn save_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.txt");
        fs::write(&path, "a much longer previous content\n").unwrap();

        save(&RowStore::from_lines(["x"], 8), &path).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"x\n");
    }

    #[test]
    fn load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = load(&dir.path().join("nope.txt"), 8).unwrap();
        assert!(store.is_empty());
        assert!(!store.is_dirty());
    }

    #[test]
    fn load_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load(dir.path(), 8), Err(EditorError::Io(_))));
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("file.txt");
        let err = save(&RowStore::default(), &path).unwrap_err();
        assert!(matches!(err, EditorError::Io(_)));
    }
}
