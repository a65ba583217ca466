use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::mime::MimeType;
use crate::options::SniffOptions;
use crate::sniff::{self, SNIFF_LEN};

/// Reads at most `len` bytes from the start of `path`.
///
/// Only the bytes actually read are allocated, whatever `len` is.
pub fn read_prefix(path: &Path, len: usize) -> Result<Vec<u8>> {
    let io_err = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    let mut buffer = Vec::with_capacity(len.min(SNIFF_LEN));
    file.take(u64::try_from(len).unwrap_or(u64::MAX))
        .read_to_end(&mut buffer)
        .map_err(io_err)?;

    debug!(path = %path.display(), read = buffer.len(), "read file prefix");
    Ok(buffer)
}

/// Identifies the file at `path` from its leading bytes and, depending on
/// `options`, its name.
pub fn sniff_file(path: &Path, options: &SniffOptions) -> Result<MimeType> {
    let name = file_name(path);

    if options.prefer_extension {
        let by_name = MimeType::from_path(&name);
        if !by_name.is_default() {
            return Ok(by_name);
        }
    }

    let prefix = read_prefix(path, options.prefix_len)?;
    let sniffed = sniff::guess(&prefix);

    if sniffed.is_default() && options.extension_fallback {
        return Ok(MimeType::from_path(&name));
    }
    Ok(sniffed)
}

/// Identifies `path` by name only, without touching the file system.
pub fn by_name(path: &Path) -> MimeType {
    MimeType::from_path(&file_name(path))
}

// The final component only, so platform separators never reach
// `extension_of`.
fn file_name(path: &Path) -> Cow<'_, str> {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn read_prefix_is_bounded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xAB; 1024]).unwrap();

        let prefix = read_prefix(file.path(), 10).unwrap();
        assert_eq!(prefix, vec![0xAB; 10]);
    }

    #[test]
    fn read_prefix_short_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"GIF").unwrap();

        assert_eq!(read_prefix(file.path(), 262).unwrap(), b"GIF");
    }

    #[test]
    fn read_prefix_huge_len_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0x89, 0x50, 0x4E, 0x47]).unwrap();

        let prefix = read_prefix(file.path(), usize::MAX).unwrap();
        assert_eq!(prefix, [0x89, 0x50, 0x4E, 0x47]);
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.png");

        let err = read_prefix(&missing, 16).unwrap_err();
        match &err {
            Error::Io { path, .. } => assert_eq!(path, &missing),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("missing.png"));
    }

    #[test]
    fn by_name_uses_final_component() {
        assert_eq!(by_name(Path::new("assets.d/site.css")).essence(), "text/css");
        assert!(by_name(Path::new("/")).is_default());
    }
}
